//! Common test utilities and fixture helpers.
//!
//! Small hand-built networks for the routing integration tests, plus the path
//! to the checked-in JSON fixture.

#![allow(dead_code)]

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use roadnav_lib::{
    Graph, GraphBuilder, NodeId, Position, Restriction, RestrictionIndex, Road, RoadId,
    RoadNetwork,
};

/// Path to the sample city dataset shared with the CLI tests.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/sample_city.json")
}

pub fn road(id: RoadId, name: &str, one_way: bool, speed_class: u8, road_class: u8) -> Road {
    Road {
        id,
        name: name.to_string(),
        city: "Testville".to_string(),
        one_way,
        speed_class,
        road_class,
    }
}

pub const A: NodeId = 1;
pub const B: NodeId = 2;
pub const C: NodeId = 3;
pub const D: NodeId = 4;
pub const ISLAND: NodeId = 5;

/// Four-node diamond: A-B 2 km, A-C 1 km, B-D 1 km, C-D 4 km, plus an
/// unconnected island node.
///
/// With `one_way_bd` the B-D segment runs D -> B only.
pub fn diamond(one_way_bd: bool) -> RoadNetwork {
    let mut builder = Graph::builder();
    builder.add_node(A, Position::new(0.0, 0.0)).unwrap();
    builder.add_node(B, Position::new(1.0, 0.0)).unwrap();
    builder.add_node(C, Position::new(0.0, 0.5)).unwrap();
    builder.add_node(D, Position::new(1.5, 0.0)).unwrap();
    builder.add_node(ISLAND, Position::new(9.0, 9.0)).unwrap();

    builder.add_road(road(10, "North Road", false, 3, 2)).unwrap();
    builder.add_road(road(11, "South Road", false, 3, 2)).unwrap();
    builder.add_road(road(12, "East Lane", one_way_bd, 3, 2)).unwrap();
    builder.add_road(road(13, "West Lane", false, 3, 2)).unwrap();

    builder.add_segment(10, A, B, 2.0).unwrap();
    builder.add_segment(11, A, C, 1.0).unwrap();
    if one_way_bd {
        builder.add_segment(12, D, B, 1.0).unwrap();
    } else {
        builder.add_segment(12, B, D, 1.0).unwrap();
    }
    builder.add_segment(13, C, D, 4.0).unwrap();

    RoadNetwork {
        graph: builder.build(),
        restrictions: RestrictionIndex::empty(),
    }
}

/// `rows x cols` grid with 1 km spacing. Every edge gets its own road with a
/// random speed class, road class and length (never shorter than the
/// straight-line distance); roughly one in `one_way_every` roads is one-way.
/// Some edges also get a longer parallel road between the same intersections.
pub fn grid(rows: i64, cols: i64, seed: u64, one_way_every: u32) -> RoadNetwork {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = Graph::builder();
    for r in 0..rows {
        for c in 0..cols {
            builder
                .add_node(grid_id(r, c, cols), Position::new(c as f64, r as f64))
                .unwrap();
        }
    }

    let mut next_road: RoadId = 1000;
    let mut add_road = |builder: &mut GraphBuilder,
                        rng: &mut StdRng,
                        from: NodeId,
                        to: NodeId,
                        length: f64| {
        let one_way = one_way_every > 0 && rng.gen_ratio(1, one_way_every);
        let speed_class = rng.gen_range(0..=6);
        let road_class = rng.gen_range(0..=4);

        let id = next_road;
        next_road += 1;
        builder
            .add_road(road(
                id,
                &format!("Road {id}"),
                one_way,
                speed_class,
                road_class,
            ))
            .unwrap();
        let (start, end) = if rng.gen_bool(0.5) { (to, from) } else { (from, to) };
        builder.add_segment(id, start, end, length).unwrap();
    };
    let mut link = |builder: &mut GraphBuilder, from: NodeId, to: NodeId| {
        let length = rng.gen_range(1.0..2.0);
        add_road(builder, &mut rng, from, to, length);
        if rng.gen_bool(0.15) {
            let detour = length + rng.gen_range(0.1..1.0);
            add_road(builder, &mut rng, from, to, detour);
        }
    };

    for r in 0..rows {
        for c in 0..cols {
            let here = grid_id(r, c, cols);
            if c + 1 < cols {
                link(&mut builder, here, grid_id(r, c + 1, cols));
            }
            if r + 1 < rows {
                link(&mut builder, here, grid_id(r + 1, c, cols));
            }
        }
    }

    RoadNetwork {
        graph: builder.build(),
        restrictions: RestrictionIndex::empty(),
    }
}

pub fn grid_id(row: i64, col: i64, cols: i64) -> NodeId {
    row * cols + col + 1
}

/// Attach `restrictions` to an existing network.
pub fn with_restrictions(network: RoadNetwork, restrictions: Vec<Restriction>) -> RoadNetwork {
    let index = RestrictionIndex::build(&network.graph, restrictions).unwrap();
    RoadNetwork {
        graph: network.graph,
        restrictions: index,
    }
}

/// Forbid roughly one turn in `every` at each intersection with at least two
/// segments.
pub fn random_restrictions(graph: &Graph, seed: u64, every: u32) -> Vec<Restriction> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut nodes: Vec<_> = graph.nodes().collect();
    nodes.sort_by_key(|node| node.id);

    let mut restrictions = Vec::new();
    for node in nodes {
        let incident = node.segments();
        if incident.len() < 2 || !rng.gen_ratio(1, every) {
            continue;
        }
        let len = incident.len();
        let first = rng.gen_range(0..len);
        let second = (first + rng.gen_range(1..len)) % len;
        let arrive = graph.segment(incident[first]).unwrap();
        let leave = graph.segment(incident[second]).unwrap();
        restrictions.push(Restriction {
            prev_node: arrive.far_end(node.id).unwrap(),
            prev_road: arrive.road,
            node: node.id,
            next_road: leave.road,
            next_node: leave.far_end(node.id).unwrap(),
        });
    }
    restrictions
}
