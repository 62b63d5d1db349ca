use crate::{PathGraph, WaypointId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered waypoints from start (index 0) to destination (last index).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Route {
    waypoints: Vec<WaypointId>,
}

impl Route {
    pub fn new(waypoints: Vec<WaypointId>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[WaypointId] {
        &self.waypoints
    }

    pub fn start(&self) -> Option<WaypointId> {
        self.waypoints.first().copied()
    }

    pub fn destination(&self) -> Option<WaypointId> {
        self.waypoints.last().copied()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn contains(&self, id: WaypointId) -> bool {
        self.waypoints.contains(&id)
    }

    /// Sum of straight-line distances between consecutive waypoints.
    ///
    /// `None` if a waypoint is missing from `graph`.
    pub fn cost(&self, graph: &PathGraph) -> Option<f32> {
        let mut total = 0.0;
        for w in self.waypoints.windows(2) {
            total += graph.position(w[0])?.distance(graph.position(w[1])?);
        }
        if let Some(&only) = self.waypoints.first() {
            graph.position(only)?;
        }
        Some(total)
    }

    pub fn into_waypoints(self) -> Vec<WaypointId> {
        self.waypoints
    }
}

impl From<Vec<WaypointId>> for Route {
    fn from(waypoints: Vec<WaypointId>) -> Self {
        Self::new(waypoints)
    }
}
