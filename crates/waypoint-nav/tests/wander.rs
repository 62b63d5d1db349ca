use waypoint_nav::{
    random_generation_point, Category, PathGraph, PathGraphBuilder, SplitMix64, Vec3, Wanderer,
    WaypointId,
};

fn v(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Square loop with a curved diagonal and a branch off each corner.
fn plaza() -> PathGraph {
    PathGraphBuilder::new()
        .waypoint_with(1, v(0.0, 0.0, 0.0), Category::Normal, true)
        .waypoint(2, v(4.0, 0.0, 0.0))
        .waypoint_with(3, v(4.0, 4.0, 0.0), Category::Normal, true)
        .waypoint(4, v(0.0, 4.0, 0.0))
        .two_way(1, 2)
        .two_way(2, 3)
        .two_way(3, 4)
        .two_way(4, 1)
        .curve(1, 3, v(3.0, 1.0, 0.0))
        .build()
        .expect("plaza graph")
}

fn run(graph: &PathGraph, seed: u64, ticks: usize) -> Vec<Vec3> {
    let mut wanderer = Wanderer::new(WaypointId(1), SplitMix64::new(seed));
    let mut pos = v(0.0, 0.0, 0.0);
    let mut trail = Vec::with_capacity(ticks);
    for _ in 0..ticks {
        let out = wanderer.tick(graph, pos, 0.1, 3.0);
        assert!(!out.stalled);
        pos = out.position;
        trail.push(pos);
    }
    trail
}

#[test]
fn wandering_is_reproducible_per_seed() {
    let graph = plaza();
    assert_eq!(run(&graph, 11, 200), run(&graph, 11, 200));
}

#[test]
fn wanderer_keeps_moving_on_a_loop() {
    let graph = plaza();
    let mut wanderer = Wanderer::new(WaypointId(1), SplitMix64::new(5));
    let mut pos = v(0.0, 0.0, 0.0);
    for _ in 0..300 {
        pos = wanderer.tick(&graph, pos, 0.1, 3.0).position;
    }
    assert!(wanderer.arrivals() > 5);
    assert!(!wanderer.is_stalled());

    // Every visited leg target is a real waypoint.
    let target = wanderer.target().expect("wanderer has a leg").target;
    assert!(graph.contains(target));
}

#[test]
fn dead_end_stalls_the_wanderer() {
    let graph = PathGraphBuilder::new()
        .waypoint(1, v(0.0, 0.0, 0.0))
        .waypoint(2, v(1.0, 0.0, 0.0))
        .straight(1, 2)
        .build()
        .expect("graph");

    let mut wanderer = Wanderer::new(WaypointId(1), SplitMix64::new(0));
    let mut pos = v(0.0, 0.0, 0.0);
    let mut stalled = false;
    for _ in 0..10 {
        let out = wanderer.tick(&graph, pos, 0.5, 1.0);
        pos = out.position;
        if out.stalled {
            stalled = true;
            break;
        }
    }

    assert!(stalled);
    assert_eq!(pos, v(1.0, 0.0, 0.0));
    assert_eq!(wanderer.from(), Some(WaypointId(2)));

    // Further ticks keep it in place.
    let out = wanderer.tick(&graph, pos, 0.5, 1.0);
    assert!(out.stalled);
    assert_eq!(out.position, pos);
}

#[test]
fn spawn_points_come_from_generation_waypoints() {
    let graph = plaza();
    let mut rng = SplitMix64::new(99);
    for _ in 0..32 {
        let id = random_generation_point(&graph, &mut rng).expect("spawn point");
        let wp = graph.waypoint(id).expect("waypoint");
        assert!(wp.generation_point);
    }

    let bare = PathGraphBuilder::new()
        .waypoint(1, v(0.0, 0.0, 0.0))
        .build()
        .expect("graph");
    assert_eq!(random_generation_point(&bare, &mut rng), None);
}
