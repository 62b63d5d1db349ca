//! Random-walk traversal: on each arrival, take a random outgoing edge.

use crate::config::FollowerConfig;
use crate::follower::{step_leg, Leg, LegStep};
use crate::{PathGraph, Segment, SplitMix64, Vec3, WaypointId};

/// Upper bound on waypoint arrivals handled within one tick.
const MAX_ARRIVALS_PER_TICK: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WanderOutcome {
    pub position: Vec3,
    /// The wanderer sits on a waypoint without outgoing edges.
    pub stalled: bool,
}

#[derive(Debug, Clone)]
pub struct Wanderer {
    rng: SplitMix64,
    config: FollowerConfig,
    from: Option<WaypointId>,
    leg: Option<Leg>,
    curve_t: f32,
    arrivals: u64,
}

impl Wanderer {
    /// Start by heading straight for `start`.
    pub fn new(start: WaypointId, rng: SplitMix64) -> Self {
        Self::with_config(start, rng, FollowerConfig::default())
    }

    pub fn with_config(start: WaypointId, rng: SplitMix64, config: FollowerConfig) -> Self {
        Self {
            rng,
            config,
            from: None,
            leg: Some(Leg {
                target: start,
                segment: Segment::Straight,
            }),
            curve_t: 0.0,
            arrivals: 0,
        }
    }

    pub fn from(&self) -> Option<WaypointId> {
        self.from
    }

    pub fn target(&self) -> Option<Leg> {
        self.leg
    }

    pub fn is_stalled(&self) -> bool {
        self.leg.is_none()
    }

    /// Waypoints reached so far.
    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }

    pub fn tick(&mut self, graph: &PathGraph, position: Vec3, dt: f32, speed: f32) -> WanderOutcome {
        let mut position = position;
        let mut budget = (speed * dt).max(0.0);

        for _ in 0..MAX_ARRIVALS_PER_TICK {
            let Some(leg) = self.leg else { break };
            let Some(target) = graph.position(leg.target) else {
                tracing::warn!(waypoint = leg.target.0, "wander target missing from graph");
                self.leg = None;
                break;
            };
            let from = self.from.and_then(|id| graph.position(id));

            match step_leg(
                from,
                target,
                leg.segment,
                position,
                &mut self.curve_t,
                budget,
                &self.config,
            ) {
                LegStep::Moved(next) => {
                    position = next;
                    break;
                }
                LegStep::Arrived { leftover } => {
                    position = target;
                    self.choose_next(graph, leg.target);
                    if !self.config.carry_over || leftover <= 0.0 {
                        break;
                    }
                    budget = leftover;
                }
            }
        }

        WanderOutcome {
            position,
            stalled: self.is_stalled(),
        }
    }

    fn choose_next(&mut self, graph: &PathGraph, reached: WaypointId) {
        self.from = Some(reached);
        self.arrivals += 1;
        self.curve_t = 0.0;

        let edges = graph.edges(reached);
        if edges.is_empty() {
            tracing::debug!(waypoint = reached.0, "wanderer reached a dead end");
            self.leg = None;
            return;
        }

        let edge = edges[self.rng.next_index(edges.len())];
        self.leg = Some(Leg {
            target: edge.target,
            segment: edge.segment,
        });
    }
}

/// Random spawn waypoint among the graph's generation points.
pub fn random_generation_point(graph: &PathGraph, rng: &mut SplitMix64) -> Option<WaypointId> {
    let points: Vec<WaypointId> = graph.generation_points().map(|wp| wp.id).collect();
    if points.is_empty() {
        return None;
    }
    Some(points[rng.next_index(points.len())])
}
