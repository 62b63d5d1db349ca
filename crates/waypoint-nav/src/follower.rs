//! Tick-driven traversal of a [`Route`] along straight and curved legs.

use crate::config::{CurvePacing, FollowerConfig};
use crate::curve;
use crate::{NavWorldMut, PathGraph, Route, Segment, SegmentKind, Vec3, WaypointId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowPhase {
    /// Heading for the first route waypoint; no leg has started yet.
    NotStarted,
    TraversingStraight,
    TraversingCurve,
    Completed,
}

/// The edge currently being traversed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub target: WaypointId,
    pub segment: Segment,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub position: Vec3,
    pub complete: bool,
}

/// Distance under which a target counts as reached despite float rounding.
const ARRIVAL_EPSILON: f32 = 1e-5;

pub(crate) enum LegStep {
    /// Budget spent before reaching the target.
    Moved(Vec3),
    /// Snapped to the target with `leftover` distance unspent.
    Arrived { leftover: f32 },
}

/// Advance `position` along one leg by `budget`.
///
/// `from` is `None` before the first leg begins, in which case the target is
/// approached in a straight line.
pub(crate) fn step_leg(
    from: Option<Vec3>,
    target: Vec3,
    segment: Segment,
    position: Vec3,
    curve_t: &mut f32,
    budget: f32,
    config: &FollowerConfig,
) -> LegStep {
    let to_target = target - position;
    let remaining = to_target.length();
    if remaining <= budget + ARRIVAL_EPSILON {
        return LegStep::Arrived {
            leftover: (budget - remaining).max(0.0),
        };
    }

    match (from, segment) {
        (Some(p0), Segment::Curve { control }) => {
            *curve_t += match config.curve_pacing {
                CurvePacing::Uniform => curve::uniform_step_with_epsilon(
                    p0,
                    target,
                    control,
                    *curve_t,
                    budget,
                    config.curve_speed_epsilon,
                ),
                CurvePacing::Parametric { rate } => budget * rate,
            };
            if *curve_t >= 1.0 {
                LegStep::Arrived { leftover: 0.0 }
            } else {
                LegStep::Moved(curve::point(p0, target, control, *curve_t))
            }
        }
        _ => LegStep::Moved(position + to_target * (budget / remaining)),
    }
}

/// Moves one entity along a route, one tick at a time.
///
/// Owns only its own progress; the graph is borrowed per tick, so any number
/// of followers can share one graph.
#[derive(Debug, Clone)]
pub struct PathFollower {
    route: Route,
    config: FollowerConfig,
    from: Option<WaypointId>,
    leg: Option<Leg>,
    cursor: usize,
    curve_t: f32,
    phase: FollowPhase,
}

impl PathFollower {
    pub fn new(route: Route) -> Self {
        Self::with_config(route, FollowerConfig::default())
    }

    pub fn with_config(route: Route, config: FollowerConfig) -> Self {
        let leg = route.start().map(|target| Leg {
            target,
            segment: Segment::Straight,
        });
        let phase = if leg.is_some() {
            FollowPhase::NotStarted
        } else {
            FollowPhase::Completed
        };
        Self {
            route,
            config,
            from: None,
            leg,
            cursor: 0,
            curve_t: 0.0,
            phase,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn config(&self) -> &FollowerConfig {
        &self.config
    }

    pub fn phase(&self) -> FollowPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == FollowPhase::Completed
    }

    /// Index into the route of the waypoint currently targeted.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn from(&self) -> Option<WaypointId> {
        self.from
    }

    pub fn target(&self) -> Option<Leg> {
        self.leg
    }

    /// Progress along the current curve leg, `0` on straight legs.
    pub fn curve_progress(&self) -> f32 {
        self.curve_t
    }

    /// Advance from `position` by `speed * dt` along the route.
    ///
    /// Ticking a completed follower returns `position` unchanged.
    pub fn tick(&mut self, graph: &PathGraph, position: Vec3, dt: f32, speed: f32) -> TickOutcome {
        let mut position = position;
        let mut budget = (speed * dt).max(0.0);

        while let Some(leg) = self.leg {
            let Some(target) = graph.position(leg.target) else {
                tracing::warn!(waypoint = leg.target.0, "route waypoint missing from graph");
                self.finish();
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
                    self.advance(graph, leg.target);
                    if !self.config.carry_over || leftover <= 0.0 {
                        break;
                    }
                    budget = leftover;
                }
            }
        }

        TickOutcome {
            position,
            complete: self.is_complete(),
        }
    }

    /// Tick against a host world. An entity that no longer exists counts as
    /// arrived.
    pub fn tick_entity<W>(
        &mut self,
        graph: &PathGraph,
        world: &mut W,
        entity: W::Entity,
        dt: f32,
        speed: f32,
    ) -> bool
    where
        W: NavWorldMut,
    {
        let Some(position) = world.position(entity) else {
            return true;
        };
        let outcome = self.tick(graph, position, dt, speed);
        world.set_position(entity, outcome.position);
        outcome.complete
    }

    fn advance(&mut self, graph: &PathGraph, reached: WaypointId) {
        self.from = Some(reached);
        self.cursor += 1;
        self.curve_t = 0.0;

        let Some(&next) = self.route.waypoints().get(self.cursor) else {
            tracing::debug!(waypoint = reached.0, "route complete");
            self.finish();
            return;
        };

        let segment = match graph.edge(reached, next) {
            Some(edge) => edge.segment,
            None => {
                tracing::warn!(
                    from = reached.0,
                    target = next.0,
                    "no edge between route waypoints, moving straight"
                );
                Segment::Straight
            }
        };

        self.leg = Some(Leg {
            target: next,
            segment,
        });
        self.phase = match segment.kind() {
            SegmentKind::Straight => FollowPhase::TraversingStraight,
            SegmentKind::Curve => FollowPhase::TraversingCurve,
        };
        tracing::trace!(
            from = reached.0,
            target = next.0,
            phase = ?self.phase,
            "leg started"
        );
    }

    fn finish(&mut self) {
        self.leg = None;
        self.curve_t = 0.0;
        self.phase = FollowPhase::Completed;
    }
}
