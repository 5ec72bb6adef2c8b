use driftree_core::ParametricGraph;
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// The three-node graph whose tree flips whenever `sin(t)` exceeds `0.8`.
#[must_use]
pub fn triangle() -> ParametricGraph {
    ParametricGraph::from_records([(1, 2, 1.0, 0.0), (2, 3, 1.0, 0.0), (1, 3, 5.0, -5.0)])
        .expect("triangle records are valid")
}

/// Generates a connected graph: a random spanning path plus `extra` chords.
#[must_use]
pub fn random_connected(seed: u64, nodes: usize, extra: usize) -> ParametricGraph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut records = Vec::with_capacity(nodes + extra);
    for node in 2..=nodes {
        let parent = rng.gen_range(1..node);
        records.push((parent, node, rng.gen_range(0.0..10.0), rng.gen_range(-4.0..4.0)));
    }
    for _ in 0..extra {
        let source = rng.gen_range(1..=nodes);
        let mut target = rng.gen_range(1..=nodes);
        if target == source {
            target = source % nodes + 1;
        }
        records.push((source, target, rng.gen_range(0.0..10.0), rng.gen_range(-4.0..4.0)));
    }
    ParametricGraph::from_records(records).expect("generated records are valid")
}
