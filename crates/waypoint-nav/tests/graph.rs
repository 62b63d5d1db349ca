use waypoint_nav::{
    Category, EdgeSpec, GraphError, GraphSpec, PathGraph, PathGraphBuilder, SearchFilter, Segment,
    Vec3, WaypointId, WaypointSpec,
};

fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

#[test]
fn builder_preserves_enumeration_and_edge_order() {
    let graph = PathGraphBuilder::new()
        .waypoint(3, v(0.0, 0.0, 0.0))
        .waypoint(1, v(1.0, 0.0, 0.0))
        .waypoint(2, v(2.0, 0.0, 0.0))
        .straight(3, 2)
        .straight(3, 1)
        .build()
        .expect("graph should build");

    let ids: Vec<u32> = graph.waypoints().iter().map(|wp| wp.id.0).collect();
    assert_eq!(ids, vec![3, 1, 2]);

    let targets: Vec<u32> = graph.edges(WaypointId(3)).iter().map(|e| e.target.0).collect();
    assert_eq!(targets, vec![2, 1]);
    assert!(graph.edges(WaypointId(1)).is_empty());
    assert!(graph.edges(WaypointId(99)).is_empty());
}

#[test]
fn duplicate_identity_is_rejected() {
    let err = PathGraphBuilder::new()
        .waypoint(1, v(0.0, 0.0, 0.0))
        .waypoint(1, v(1.0, 0.0, 0.0))
        .build()
        .expect_err("duplicate should fail");
    assert_eq!(err, GraphError::DuplicateWaypoint(WaypointId(1)));
}

#[test]
fn dangling_edges_are_rejected() {
    let err = PathGraphBuilder::new()
        .waypoint(1, v(0.0, 0.0, 0.0))
        .straight(1, 7)
        .build()
        .expect_err("unknown target should fail");
    assert_eq!(
        err,
        GraphError::UnknownTarget {
            from: WaypointId(1),
            target: WaypointId(7)
        }
    );

    let err = PathGraphBuilder::new()
        .waypoint(1, v(0.0, 0.0, 0.0))
        .straight(5, 1)
        .build()
        .expect_err("unknown source should fail");
    assert_eq!(err, GraphError::UnknownWaypoint(WaypointId(5)));
}

#[test]
fn non_finite_positions_are_rejected() {
    let err = PathGraphBuilder::new()
        .waypoint(1, v(f32::NAN, 0.0, 0.0))
        .build()
        .expect_err("NaN position should fail");
    assert_eq!(err, GraphError::NonFinitePosition(WaypointId(1)));
}

#[test]
fn curve_without_control_defaults_to_midpoint() {
    let graph = PathGraphBuilder::new()
        .waypoint(1, v(0.0, 0.0, 0.0))
        .waypoint(2, v(4.0, 2.0, 0.0))
        .curve_default(1, 2)
        .build()
        .expect("graph should build");

    let edge = graph.edge(WaypointId(1), WaypointId(2)).expect("edge");
    assert_eq!(
        edge.segment,
        Segment::Curve {
            control: v(2.0, 1.0, 0.0)
        }
    );
}

#[test]
fn straight_edge_never_keeps_a_control_point() {
    let mut a = WaypointSpec::new(WaypointId(1), v(0.0, 0.0, 0.0));
    a.edges.push(EdgeSpec {
        target: WaypointId(2),
        kind: waypoint_nav::SegmentKind::Straight,
        control: Some(v(9.0, 9.0, 9.0)),
    });
    let b = WaypointSpec::new(WaypointId(2), v(1.0, 0.0, 0.0));

    let graph = PathGraph::from_spec(GraphSpec {
        waypoints: vec![a, b],
    })
    .expect("graph should build");

    let edge = graph.edge(WaypointId(1), WaypointId(2)).expect("edge");
    assert_eq!(edge.segment, Segment::Straight);
    assert_eq!(edge.segment.control(), None);
}

#[test]
fn filters_and_generation_points() {
    let graph = PathGraphBuilder::new()
        .waypoint_with(1, v(0.0, 0.0, 0.0), Category::Normal, true)
        .special(2, v(1.0, 0.0, 0.0))
        .waypoint_with(3, v(2.0, 0.0, 0.0), Category::Special, true)
        .build()
        .expect("graph should build");

    let normal: Vec<u32> = graph
        .waypoints_in(SearchFilter::Normal)
        .map(|wp| wp.id.0)
        .collect();
    assert_eq!(normal, vec![1]);
    assert_eq!(graph.waypoints_in(SearchFilter::All).count(), 3);

    let spawns: Vec<u32> = graph.generation_points().map(|wp| wp.id.0).collect();
    assert_eq!(spawns, vec![1, 3]);
}

#[test]
fn nearest_waypoint_respects_filter_and_ties() {
    let graph = PathGraphBuilder::new()
        .special(1, v(0.0, 0.0, 0.0))
        .waypoint(2, v(-2.0, 0.0, 0.0))
        .waypoint(3, v(2.0, 0.0, 0.0))
        .build()
        .expect("graph should build");

    let origin = v(0.1, 0.0, 0.0);
    assert_eq!(graph.nearest_waypoint(origin, SearchFilter::All), Some(WaypointId(1)));

    // Equidistant from 2 and 3: first enumerated wins.
    let centre = v(0.0, 0.0, 0.0);
    assert_eq!(
        graph.nearest_waypoint(centre, SearchFilter::Normal),
        Some(WaypointId(2))
    );
}

#[test]
fn nearest_waypoint_on_empty_filtered_set_is_none() {
    let graph = PathGraphBuilder::new()
        .special(1, v(0.0, 0.0, 0.0))
        .build()
        .expect("graph should build");
    assert_eq!(
        graph.nearest_waypoint(v(0.0, 0.0, 0.0), SearchFilter::Normal),
        None
    );

    let empty = PathGraphBuilder::new().build().expect("empty graph");
    assert!(empty.is_empty());
    assert_eq!(empty.nearest_waypoint(Vec3::ZERO, SearchFilter::All), None);
}

#[test]
fn spec_roundtrip_keeps_resolved_controls() {
    let graph = PathGraphBuilder::new()
        .waypoint(1, v(0.0, 0.0, 0.0))
        .waypoint(2, v(2.0, 0.0, 0.0))
        .curve_default(1, 2)
        .straight(2, 1)
        .build()
        .expect("graph should build");

    let spec = graph.to_spec();
    assert_eq!(spec.waypoints[0].edges[0].control, Some(v(1.0, 0.0, 0.0)));
    assert_eq!(spec.waypoints[1].edges[0].control, None);

    let rebuilt = PathGraph::from_spec(spec.clone()).expect("rebuild");
    assert_eq!(rebuilt.to_spec(), spec);
}
