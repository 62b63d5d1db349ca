use thiserror::Error;

use crate::WaypointId;

/// Errors raised while ingesting an authored waypoint graph.
///
/// Query-time outcomes (no waypoint, no route) are `Option`s, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("duplicate waypoint identity {0:?}")]
    DuplicateWaypoint(WaypointId),

    #[error("edge references unknown source waypoint {0:?}")]
    UnknownWaypoint(WaypointId),

    #[error("edge {from:?} -> {target:?} references an unknown target waypoint")]
    UnknownTarget { from: WaypointId, target: WaypointId },

    #[error("waypoint {0:?} has a non-finite position or control point")]
    NonFinitePosition(WaypointId),
}

pub type Result<T> = std::result::Result<T, GraphError>;
