//! Authored scene files: a serialized `GraphSpec` in YAML or JSON.

use std::path::Path;

use anyhow::{Context, Result};
use waypoint_nav::{GraphSpec, PathGraph};

/// Load and validate a waypoint graph. `.json` files are parsed as JSON,
/// everything else as YAML.
pub fn load_graph(path: &Path) -> Result<PathGraph> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene from {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let spec: GraphSpec = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scene from {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse scene from {}", path.display()))?
    };

    let graph = PathGraph::from_spec(spec)
        .with_context(|| format!("Invalid waypoint graph in {}", path.display()))?;
    tracing::info!(scene = %path.display(), waypoints = graph.len(), "Scene loaded");
    Ok(graph)
}
