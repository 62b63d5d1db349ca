use core::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{PathGraph, Route, SearchFilter, Vec3, WaypointId};

#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: f32,
    slot: usize,
    /// Sequence number of the node's first entry into the open set.
    seq: u64,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenNode {}

/// Reusable scratch buffers for route searches.
///
/// Avoids per-query allocations when many agents plan against the same graph.
#[derive(Debug, Default)]
pub struct RouteQuery {
    open: BinaryHeap<OpenNode>,
    g_score: Vec<f32>,
    first_seq: Vec<Option<u64>>,
    closed: Vec<bool>,
    came_from: Vec<Option<usize>>,
    expansions: usize,
}

impl RouteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of waypoints closed by the most recent search.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    fn reset(&mut self, n: usize) {
        self.open.clear();
        self.g_score.clear();
        self.g_score.resize(n, f32::INFINITY);
        self.first_seq.clear();
        self.first_seq.resize(n, None);
        self.closed.clear();
        self.closed.resize(n, false);
        self.came_from.clear();
        self.came_from.resize(n, None);
        self.expansions = 0;
    }
}

impl PathGraph {
    /// Shortest route between two waypoints, or `None` if unreachable.
    ///
    /// Under [`SearchFilter::Normal`] interior waypoints must be `Normal`; the
    /// start and destination themselves are exempt from the filter.
    pub fn find_route(
        &self,
        start: WaypointId,
        dest: WaypointId,
        filter: SearchFilter,
    ) -> Option<Route> {
        let mut query = RouteQuery::default();
        let mut out = Vec::new();
        self.find_route_into(start, dest, filter, &mut query, &mut out)?;
        Some(Route::new(out))
    }

    /// Shortest route between the waypoints nearest to two points.
    pub fn find_route_between(
        &self,
        start: Vec3,
        dest: Vec3,
        filter: SearchFilter,
    ) -> Option<Route> {
        let start = self.nearest_waypoint(start, filter)?;
        let dest = self.nearest_waypoint(dest, filter)?;
        self.find_route(start, dest, filter)
    }

    /// Allocation-reusing form of [`PathGraph::find_route`].
    ///
    /// `out` is cleared first and holds the route on success.
    pub fn find_route_into(
        &self,
        start: WaypointId,
        dest: WaypointId,
        filter: SearchFilter,
        query: &mut RouteQuery,
        out: &mut Vec<WaypointId>,
    ) -> Option<()> {
        out.clear();
        let start_slot = self.slot(start)?;
        let dest_slot = self.slot(dest)?;

        let found = self.a_star(start_slot, dest_slot, filter, query, out);
        match found {
            Some(()) => tracing::debug!(
                start = start.0,
                dest = dest.0,
                waypoints = out.len(),
                expansions = query.expansions,
                cost = query.g_score[dest_slot],
                "route found"
            ),
            None => tracing::debug!(
                start = start.0,
                dest = dest.0,
                expansions = query.expansions,
                "no route"
            ),
        }
        found
    }

    fn a_star(
        &self,
        start: usize,
        dest: usize,
        filter: SearchFilter,
        query: &mut RouteQuery,
        out: &mut Vec<WaypointId>,
    ) -> Option<()> {
        query.reset(self.len());

        let goal = self.waypoint_at(dest).position;
        let heuristic = |slot: usize| self.waypoint_at(slot).position.distance(goal);

        query.g_score[start] = 0.0;
        query.first_seq[start] = Some(0);
        query.open.push(OpenNode {
            f: heuristic(start),
            slot: start,
            seq: 0,
        });
        let mut next_seq: u64 = 1;

        while let Some(node) = query.open.pop() {
            if query.closed[node.slot] {
                // Stale heap entry.
                continue;
            }

            if node.slot == dest {
                out.push(self.waypoint_at(dest).id);
                let mut current = dest;
                while let Some(prev) = query.came_from[current] {
                    current = prev;
                    out.push(self.waypoint_at(current).id);
                }
                out.reverse();
                return Some(());
            }

            query.closed[node.slot] = true;
            query.expansions += 1;

            let here = self.waypoint_at(node.slot);
            let g = query.g_score[node.slot];
            tracing::trace!(waypoint = here.id.0, g, f = node.f, "expand");

            for edge in self.edges_at(node.slot) {
                let next = edge.target_slot();
                if query.closed[next] {
                    continue;
                }

                let neighbor = self.waypoint_at(next);
                if next != dest && !filter.admits(neighbor.category) {
                    continue;
                }

                let tentative_g = g + here.position.distance(neighbor.position);
                let seq = match query.first_seq[next] {
                    None => {
                        let seq = next_seq;
                        next_seq += 1;
                        query.first_seq[next] = Some(seq);
                        seq
                    }
                    Some(_) if tentative_g >= query.g_score[next] => continue,
                    Some(seq) => seq,
                };

                query.came_from[next] = Some(node.slot);
                query.g_score[next] = tentative_g;
                query.open.push(OpenNode {
                    f: tentative_g + heuristic(next),
                    slot: next,
                    seq,
                });
            }
        }

        None
    }
}
