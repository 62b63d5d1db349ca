//! Read-only waypoint graph: waypoints stored in an arena, each owning its
//! outgoing edges in authored order.

use std::collections::BTreeMap;

use crate::error::{GraphError, Result};
use crate::{SearchFilter, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stable waypoint identity assigned by the authoring tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WaypointId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Category {
    #[default]
    Normal,
    Special,
}

/// Segment tag as authored; see [`Segment`] for the resolved form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SegmentKind {
    #[default]
    Straight,
    Curve,
}

/// Shape of the path between an edge's source and target.
///
/// Only curves carry a control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Straight,
    Curve { control: Vec3 },
}

impl Segment {
    pub fn kind(self) -> SegmentKind {
        match self {
            Segment::Straight => SegmentKind::Straight,
            Segment::Curve { .. } => SegmentKind::Curve,
        }
    }

    pub fn control(self) -> Option<Vec3> {
        match self {
            Segment::Straight => None,
            Segment::Curve { control } => Some(control),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub id: WaypointId,
    pub position: Vec3,
    pub category: Category,
    /// Valid spawn location for newly generated entities.
    pub generation_point: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: WaypointId,
    pub segment: Segment,
    slot: usize,
}

impl Edge {
    /// Arena slot of the target waypoint.
    pub(crate) fn target_slot(&self) -> usize {
        self.slot
    }
}

/// Authored outgoing edge, as handed over by the authoring tool.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgeSpec {
    pub target: WaypointId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: SegmentKind,
    /// Curve control point. Defaults to the segment midpoint for curves and
    /// is discarded for straight edges.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub control: Option<Vec3>,
}

impl EdgeSpec {
    pub fn straight(target: WaypointId) -> Self {
        Self {
            target,
            kind: SegmentKind::Straight,
            control: None,
        }
    }

    pub fn curve(target: WaypointId, control: Option<Vec3>) -> Self {
        Self {
            target,
            kind: SegmentKind::Curve,
            control,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WaypointSpec {
    pub id: WaypointId,
    pub position: Vec3,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Category,
    #[cfg_attr(feature = "serde", serde(default))]
    pub generation_point: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub edges: Vec<EdgeSpec>,
}

impl WaypointSpec {
    pub fn new(id: WaypointId, position: Vec3) -> Self {
        Self {
            id,
            position,
            category: Category::Normal,
            generation_point: false,
            edges: Vec::new(),
        }
    }
}

/// Finished graph as produced by the authoring tool.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphSpec {
    pub waypoints: Vec<WaypointSpec>,
}

#[derive(Debug, Clone)]
pub struct PathGraph {
    waypoints: Vec<Waypoint>,
    edges: Vec<Vec<Edge>>,
    index: BTreeMap<WaypointId, usize>,
}

impl PathGraph {
    /// Validate and resolve an authored graph.
    ///
    /// Waypoint enumeration order and per-waypoint edge order follow `spec`.
    pub fn from_spec(spec: GraphSpec) -> Result<Self> {
        let mut index = BTreeMap::new();
        let mut waypoints = Vec::with_capacity(spec.waypoints.len());

        for (slot, wp) in spec.waypoints.iter().enumerate() {
            if !wp.position.is_finite() {
                return Err(GraphError::NonFinitePosition(wp.id));
            }
            if index.insert(wp.id, slot).is_some() {
                return Err(GraphError::DuplicateWaypoint(wp.id));
            }
            waypoints.push(Waypoint {
                id: wp.id,
                position: wp.position,
                category: wp.category,
                generation_point: wp.generation_point,
            });
        }

        let mut edges = Vec::with_capacity(spec.waypoints.len());
        for wp in spec.waypoints {
            let mut out = Vec::with_capacity(wp.edges.len());
            for e in wp.edges {
                let slot = *index.get(&e.target).ok_or(GraphError::UnknownTarget {
                    from: wp.id,
                    target: e.target,
                })?;

                let segment = match e.kind {
                    SegmentKind::Straight => {
                        if e.control.is_some() {
                            tracing::warn!(
                                from = wp.id.0,
                                target = e.target.0,
                                "discarding control point on straight edge"
                            );
                        }
                        Segment::Straight
                    }
                    SegmentKind::Curve => {
                        let control = e
                            .control
                            .unwrap_or_else(|| wp.position.midpoint(waypoints[slot].position));
                        if !control.is_finite() {
                            return Err(GraphError::NonFinitePosition(wp.id));
                        }
                        Segment::Curve { control }
                    }
                };

                out.push(Edge {
                    target: e.target,
                    segment,
                    slot,
                });
            }
            edges.push(out);
        }

        tracing::debug!(
            waypoints = waypoints.len(),
            edges = edges.iter().map(Vec::len).sum::<usize>(),
            "path graph built"
        );

        Ok(Self {
            waypoints,
            edges,
            index,
        })
    }

    /// Export back into the authored form. Curves always carry their control point.
    pub fn to_spec(&self) -> GraphSpec {
        let waypoints = self
            .waypoints
            .iter()
            .zip(&self.edges)
            .map(|(wp, edges)| WaypointSpec {
                id: wp.id,
                position: wp.position,
                category: wp.category,
                generation_point: wp.generation_point,
                edges: edges
                    .iter()
                    .map(|e| EdgeSpec {
                        target: e.target,
                        kind: e.segment.kind(),
                        control: e.segment.control(),
                    })
                    .collect(),
            })
            .collect();
        GraphSpec { waypoints }
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn contains(&self, id: WaypointId) -> bool {
        self.index.contains_key(&id)
    }

    /// All waypoints in enumeration (authored) order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn waypoints_in(&self, filter: SearchFilter) -> impl Iterator<Item = &Waypoint> + '_ {
        self.waypoints
            .iter()
            .filter(move |wp| filter.admits(wp.category))
    }

    pub fn generation_points(&self) -> impl Iterator<Item = &Waypoint> + '_ {
        self.waypoints.iter().filter(|wp| wp.generation_point)
    }

    pub fn waypoint(&self, id: WaypointId) -> Option<&Waypoint> {
        self.slot(id).map(|slot| &self.waypoints[slot])
    }

    pub fn position(&self, id: WaypointId) -> Option<Vec3> {
        self.waypoint(id).map(|wp| wp.position)
    }

    /// Outgoing edges in authored order. Unknown waypoints have none.
    pub fn edges(&self, id: WaypointId) -> &[Edge] {
        self.slot(id)
            .map(|slot| self.edges[slot].as_slice())
            .unwrap_or(&[])
    }

    /// First authored edge from `from` to `to`.
    pub fn edge(&self, from: WaypointId, to: WaypointId) -> Option<&Edge> {
        self.edges(from).iter().find(|e| e.target == to)
    }

    pub(crate) fn slot(&self, id: WaypointId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub(crate) fn waypoint_at(&self, slot: usize) -> &Waypoint {
        &self.waypoints[slot]
    }

    pub(crate) fn edges_at(&self, slot: usize) -> &[Edge] {
        &self.edges[slot]
    }
}

/// Incremental construction of a [`PathGraph`], mostly for tests and tools.
#[derive(Debug, Clone, Default)]
pub struct PathGraphBuilder {
    waypoints: Vec<WaypointSpec>,
    edges: Vec<(WaypointId, EdgeSpec)>,
}

impl PathGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn waypoint(&mut self, id: u32, position: Vec3) -> &mut Self {
        self.waypoint_with(id, position, Category::Normal, false)
    }

    pub fn special(&mut self, id: u32, position: Vec3) -> &mut Self {
        self.waypoint_with(id, position, Category::Special, false)
    }

    pub fn waypoint_with(
        &mut self,
        id: u32,
        position: Vec3,
        category: Category,
        generation_point: bool,
    ) -> &mut Self {
        let mut spec = WaypointSpec::new(WaypointId(id), position);
        spec.category = category;
        spec.generation_point = generation_point;
        self.waypoints.push(spec);
        self
    }

    pub fn straight(&mut self, from: u32, to: u32) -> &mut Self {
        self.edges
            .push((WaypointId(from), EdgeSpec::straight(WaypointId(to))));
        self
    }

    /// Straight edges in both directions.
    pub fn two_way(&mut self, a: u32, b: u32) -> &mut Self {
        self.straight(a, b).straight(b, a)
    }

    pub fn curve(&mut self, from: u32, to: u32, control: Vec3) -> &mut Self {
        self.edges
            .push((WaypointId(from), EdgeSpec::curve(WaypointId(to), Some(control))));
        self
    }

    /// Curve whose control point defaults to the segment midpoint.
    pub fn curve_default(&mut self, from: u32, to: u32) -> &mut Self {
        self.edges
            .push((WaypointId(from), EdgeSpec::curve(WaypointId(to), None)));
        self
    }

    pub fn build(&self) -> Result<PathGraph> {
        let mut spec = GraphSpec {
            waypoints: self.waypoints.clone(),
        };
        for (from, edge) in &self.edges {
            let wp = spec
                .waypoints
                .iter_mut()
                .find(|wp| wp.id == *from)
                .ok_or(GraphError::UnknownWaypoint(*from))?;
            wp.edges.push(edge.clone());
        }
        PathGraph::from_spec(spec)
    }
}

#[cfg(feature = "serde")]
impl Serialize for PathGraph {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_spec().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PathGraph {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let spec = GraphSpec::deserialize(deserializer)?;
        PathGraph::from_spec(spec).map_err(serde::de::Error::custom)
    }
}
