//! Waypoint CLI - route queries and path-following simulation over an
//! authored waypoint graph.
//!
//! - `waypoint inspect` - graph summary
//! - `waypoint nearest` - closest waypoint to a point
//! - `waypoint route` - shortest route between two waypoints or points
//! - `waypoint follow` - simulate a follower along a route
//! - `waypoint wander` - simulate a random walk

mod config;
mod scene;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use waypoint_nav::{
    random_generation_point, PathFollower, PathGraph, Route, SearchFilter, SplitMix64, Vec3,
    WaypointId, Wanderer,
};

use crate::config::SimConfig;

#[derive(Parser)]
#[command(name = "waypoint")]
#[command(about = "Waypoint graph routing and path following", version)]
struct Cli {
    /// Project root directory
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Simulation config file (defaults to <project>/.waypoint/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Scene file (defaults to <project>/.waypoint/scene.yaml)
    #[arg(short, long, global = true)]
    scene: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the waypoint graph
    Inspect,

    /// Find the waypoint closest to a point
    Nearest {
        /// Point as x,y,z
        #[arg(value_parser = parse_point, allow_hyphen_values = true)]
        point: Vec3,

        #[arg(long, value_enum)]
        filter: Option<FilterArg>,
    },

    /// Find the shortest route
    Route {
        #[command(flatten)]
        ends: RouteEnds,

        #[arg(long, value_enum)]
        filter: Option<FilterArg>,

        /// Print the route as JSON
        #[arg(long)]
        json: bool,
    },

    /// Simulate a follower travelling a route
    Follow {
        #[command(flatten)]
        ends: RouteEnds,

        #[arg(long, value_enum)]
        filter: Option<FilterArg>,

        /// Starting position as x,y,z (defaults to the route's first waypoint)
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        at: Option<Vec3>,

        /// Override the configured speed
        #[arg(long)]
        speed: Option<f32>,

        /// Print the position after every tick
        #[arg(long)]
        trace: bool,
    },

    /// Simulate a random walk
    Wander {
        /// Starting waypoint (defaults to a random generation point)
        #[arg(long)]
        start: Option<u32>,

        /// Number of ticks to simulate (defaults to max_ticks)
        #[arg(long)]
        ticks: Option<u32>,

        /// Override the configured seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print the position after every tick
        #[arg(long)]
        trace: bool,
    },
}

/// Route endpoints, either waypoint ids or points resolved to their
/// nearest waypoint.
#[derive(clap::Args)]
struct RouteEnds {
    #[arg(long, conflicts_with = "from_point", required_unless_present = "from_point")]
    from: Option<u32>,

    #[arg(long, conflicts_with = "to_point", required_unless_present = "to_point")]
    to: Option<u32>,

    /// Start point as x,y,z
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    from_point: Option<Vec3>,

    /// Destination point as x,y,z
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    to_point: Option<Vec3>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterArg {
    Normal,
    All,
}

impl From<FilterArg> for SearchFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Normal => SearchFilter::Normal,
            FilterArg::All => SearchFilter::All,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let project_root = match cli.project {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::load_from_project(&project_root)?,
    };

    let scene_path = cli
        .scene
        .unwrap_or_else(|| project_root.join(".waypoint/scene.yaml"));
    let graph = scene::load_graph(&scene_path)?;

    match cli.command {
        Commands::Inspect => inspect(&graph, &scene_path),
        Commands::Nearest { point, filter } => {
            let filter = filter.map_or(config.filter, SearchFilter::from);
            nearest(&graph, point, filter)
        }
        Commands::Route { ends, filter, json } => {
            let filter = filter.map_or(config.filter, SearchFilter::from);
            let route = resolve_route(&graph, &ends, filter)?;
            print_route(&graph, &route, json)
        }
        Commands::Follow {
            ends,
            filter,
            at,
            speed,
            trace,
        } => {
            let filter = filter.map_or(config.filter, SearchFilter::from);
            let route = resolve_route(&graph, &ends, filter)?;
            let speed = speed.unwrap_or(config.speed);
            follow(&graph, route, at, speed, trace, &config)
        }
        Commands::Wander {
            start,
            ticks,
            seed,
            trace,
        } => {
            let mut rng = SplitMix64::new(seed.unwrap_or(config.seed));
            let start = match start {
                Some(id) => WaypointId(id),
                None => random_generation_point(&graph, &mut rng)
                    .context("Scene has no generation points; pass --start")?,
            };
            wander(&graph, start, rng, ticks.unwrap_or(config.max_ticks), trace, &config)
        }
    }
}

fn parse_point(s: &str) -> std::result::Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z but got '{s}'"));
    };
    let coord = |v: &str| {
        v.parse::<f32>()
            .map_err(|e| format!("invalid coordinate '{v}': {e}"))
    };
    Ok(Vec3::new(coord(x)?, coord(y)?, coord(z)?))
}

fn fmt_point(p: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", p.x, p.y, p.z)
}

fn inspect(graph: &PathGraph, scene_path: &Path) -> Result<()> {
    let edges: usize = graph.waypoints().iter().map(|wp| graph.edges(wp.id).len()).sum();
    let special = graph.len() - graph.waypoints_in(SearchFilter::Normal).count();

    println!("Waypoint Graph");
    println!("==============");
    println!();
    println!("Scene: {}", scene_path.display());
    println!("Waypoints: {} ({} special)", graph.len(), special);
    println!("Edges: {}", edges);
    println!("Generation points: {}", graph.generation_points().count());
    println!();
    for wp in graph.waypoints() {
        let spawn = if wp.generation_point { " spawn" } else { "" };
        println!(
            "  {:>5} {} {:?}{}",
            wp.id.0,
            fmt_point(wp.position),
            wp.category,
            spawn
        );
        for edge in graph.edges(wp.id) {
            match edge.segment.control() {
                Some(control) => println!(
                    "        -> {} curve via {}",
                    edge.target.0,
                    fmt_point(control)
                ),
                None => println!("        -> {}", edge.target.0),
            }
        }
    }
    Ok(())
}

fn nearest(graph: &PathGraph, point: Vec3, filter: SearchFilter) -> Result<()> {
    let Some(id) = graph.nearest_waypoint(point, filter) else {
        bail!("No waypoint admitted by filter {:?}", filter);
    };
    let position = graph
        .position(id)
        .context("Nearest waypoint missing from graph")?;
    println!(
        "{} at {} (distance {:.3})",
        id.0,
        fmt_point(position),
        position.distance(point)
    );
    Ok(())
}

fn resolve_route(graph: &PathGraph, ends: &RouteEnds, filter: SearchFilter) -> Result<Route> {
    let start = match (ends.from, ends.from_point) {
        (Some(id), _) => Some(WaypointId(id)),
        (None, Some(point)) => graph.nearest_waypoint(point, filter),
        (None, None) => bail!("Pass --from or --from-point"),
    };
    let dest = match (ends.to, ends.to_point) {
        (Some(id), _) => Some(WaypointId(id)),
        (None, Some(point)) => graph.nearest_waypoint(point, filter),
        (None, None) => bail!("Pass --to or --to-point"),
    };
    let (Some(start), Some(dest)) = (start, dest) else {
        bail!("Could not resolve route endpoints under filter {:?}", filter);
    };

    tracing::info!(start = start.0, dest = dest.0, ?filter, "Searching for route");
    graph
        .find_route(start, dest, filter)
        .with_context(|| format!("No route from {} to {}", start.0, dest.0))
}

fn print_route(graph: &PathGraph, route: &Route, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(route)?);
        return Ok(());
    }
    let ids: Vec<String> = route.waypoints().iter().map(|id| id.0.to_string()).collect();
    println!("Route: {}", ids.join(" -> "));
    if let Some(cost) = route.cost(graph) {
        println!("Cost: {:.3}", cost);
    }
    Ok(())
}

fn follow(
    graph: &PathGraph,
    route: Route,
    at: Option<Vec3>,
    speed: f32,
    trace: bool,
    config: &SimConfig,
) -> Result<()> {
    let start = route.start().context("Route is empty")?;
    let mut position = match at {
        Some(point) => point,
        None => graph.position(start).context("Route start missing from graph")?,
    };

    print_route(graph, &route, false)?;
    let mut follower = PathFollower::with_config(route, config.follower);

    let mut ticks = 0;
    while !follower.is_complete() && ticks < config.max_ticks {
        position = follower.tick(graph, position, config.dt, speed).position;
        ticks += 1;
        if trace {
            println!("  [{:>5}] {:?} {}", ticks, follower.phase(), fmt_point(position));
        }
    }

    if follower.is_complete() {
        println!("Arrived after {} ticks at {}", ticks, fmt_point(position));
    } else {
        tracing::warn!(ticks, "Tick limit reached before arrival");
        println!(
            "Stopped after {} ticks at {} ({:?})",
            ticks,
            fmt_point(position),
            follower.phase()
        );
    }
    Ok(())
}

fn wander(
    graph: &PathGraph,
    start: WaypointId,
    rng: SplitMix64,
    ticks: u32,
    trace: bool,
    config: &SimConfig,
) -> Result<()> {
    let mut position = graph
        .position(start)
        .with_context(|| format!("Unknown start waypoint {}", start.0))?;
    let mut wanderer = Wanderer::with_config(start, rng, config.follower);

    tracing::info!(start = start.0, ticks, "Wandering");
    let mut elapsed = 0;
    while elapsed < ticks {
        let outcome = wanderer.tick(graph, position, config.dt, config.speed);
        position = outcome.position;
        elapsed += 1;
        if trace {
            println!("  [{:>5}] {}", elapsed, fmt_point(position));
        }
        if outcome.stalled {
            break;
        }
    }

    println!(
        "Wandered {} ticks, {} arrivals, now at {}",
        elapsed,
        wanderer.arrivals(),
        fmt_point(position)
    );
    if wanderer.is_stalled() {
        if let Some(from) = wanderer.from() {
            println!("Stalled at dead end {}", from.0);
        }
    }
    Ok(())
}
