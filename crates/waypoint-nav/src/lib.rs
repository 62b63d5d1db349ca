//! Waypoint graph navigation: shortest routes over an authored waypoint
//! network and tick-driven following of those routes along straight and
//! quadratic-curve legs.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod curve;
pub mod error;
pub mod follower;
pub mod graph;
pub mod locator;
pub mod math;
pub mod rng;
pub mod route;
pub mod search;
pub mod wander;
pub mod world;

pub use config::{CurvePacing, FollowerConfig};
pub use error::GraphError;
pub use follower::{FollowPhase, Leg, PathFollower, TickOutcome};
pub use graph::{
    Category, Edge, EdgeSpec, GraphSpec, PathGraph, PathGraphBuilder, Segment, SegmentKind,
    Waypoint, WaypointId, WaypointSpec,
};
pub use locator::{nearest_waypoint, SearchFilter};
pub use math::Vec3;
pub use rng::SplitMix64;
pub use route::Route;
pub use search::RouteQuery;
pub use wander::{random_generation_point, WanderOutcome, Wanderer};
pub use world::{NavWorldMut, NavWorldView};
