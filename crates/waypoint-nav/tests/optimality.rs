use proptest::prelude::*;

use waypoint_nav::{PathGraph, PathGraphBuilder, SearchFilter, Vec3, WaypointId};

fn build(points: &[(i8, i8, i8)], edges: &[(usize, usize)]) -> PathGraph {
    let mut builder = PathGraphBuilder::new();
    for (i, &(x, y, z)) in points.iter().enumerate() {
        builder.waypoint(i as u32, Vec3::new(x as f32, y as f32, z as f32));
    }
    for &(a, b) in edges {
        builder.straight((a % points.len()) as u32, (b % points.len()) as u32);
    }
    builder.build().expect("random graph")
}

/// All-pairs shortest distances by Floyd-Warshall, in f64.
fn reference_distances(graph: &PathGraph) -> Vec<Vec<f64>> {
    let n = graph.len();
    let mut d = vec![vec![f64::INFINITY; n]; n];
    for (i, wp) in graph.waypoints().iter().enumerate() {
        d[i][i] = 0.0;
        for edge in graph.edges(wp.id) {
            let j = edge.target.0 as usize;
            let target = graph.position(edge.target).expect("target");
            let w = f64::from(wp.position.distance(target));
            if w < d[i][j] {
                d[i][j] = w;
            }
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let via = d[i][k] + d[k][j];
                if via < d[i][j] {
                    d[i][j] = via;
                }
            }
        }
    }
    d
}

proptest! {
    #[test]
    fn routes_are_shortest_and_well_formed(
        points in prop::collection::vec((-8i8..8, -8i8..8, -2i8..2), 2..9),
        edges in prop::collection::vec((0usize..16, 0usize..16), 0..24),
        start in 0usize..16,
        dest in 0usize..16,
    ) {
        let graph = build(&points, &edges);
        let n = points.len();
        let (start, dest) = (start % n, dest % n);
        let reference = reference_distances(&graph);

        let route = graph.find_route(WaypointId(start as u32), WaypointId(dest as u32), SearchFilter::All);

        match route {
            None => prop_assert!(reference[start][dest].is_infinite()),
            Some(route) => {
                prop_assert_eq!(route.start(), Some(WaypointId(start as u32)));
                prop_assert_eq!(route.destination(), Some(WaypointId(dest as u32)));

                let mut seen = std::collections::BTreeSet::new();
                for id in route.waypoints() {
                    prop_assert!(seen.insert(*id), "repeated waypoint {:?}", id);
                }
                for w in route.waypoints().windows(2) {
                    prop_assert!(graph.edge(w[0], w[1]).is_some());
                }

                let cost = f64::from(route.cost(&graph).expect("cost"));
                prop_assert!((cost - reference[start][dest]).abs() < 1e-3,
                    "cost {} vs shortest {}", cost, reference[start][dest]);
            }
        }
    }
}
