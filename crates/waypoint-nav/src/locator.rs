use crate::{Category, PathGraph, Vec3, WaypointId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which waypoint categories a query may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SearchFilter {
    /// `Normal` waypoints only.
    Normal,
    #[default]
    All,
}

impl SearchFilter {
    pub fn admits(self, category: Category) -> bool {
        match self {
            SearchFilter::All => true,
            SearchFilter::Normal => category == Category::Normal,
        }
    }
}

/// Closest waypoint to `point` among those admitted by `filter`.
///
/// Ties go to the waypoint enumerated first. `None` if nothing is admitted.
pub fn nearest_waypoint(graph: &PathGraph, point: Vec3, filter: SearchFilter) -> Option<WaypointId> {
    let mut best: Option<(f32, WaypointId)> = None;
    for wp in graph.waypoints_in(filter) {
        let d = wp.position.distance(point);
        match best {
            None => best = Some((d, wp.id)),
            Some((best_d, _)) if d < best_d => best = Some((d, wp.id)),
            _ => {}
        }
    }
    best.map(|(_, id)| id)
}

impl PathGraph {
    pub fn nearest_waypoint(&self, point: Vec3, filter: SearchFilter) -> Option<WaypointId> {
        nearest_waypoint(self, point, filter)
    }
}
