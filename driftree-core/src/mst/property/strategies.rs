//! Strategy builders for MST property-based tests.
//!
//! Generates small multigraphs with random parametric coefficients. Node
//! counts stay at or below eight and edge counts at or below twelve so the
//! brute-force oracle remains tractable.

use proptest::prelude::*;

use crate::ParametricGraph;

/// Upper bound on generated node ids.
const MAX_NODES: usize = 8;
/// Upper bound on generated edges.
const MAX_EDGES: usize = 12;

/// Fixture for MST property tests.
#[derive(Clone, Debug)]
pub(crate) struct MstFixture {
    /// The generated graph.
    pub graph: ParametricGraph,
    /// Parameter value to build the tree at.
    pub parameter: f64,
}

fn record_strategy(node_count: usize) -> impl Strategy<Value = (usize, usize, f64, f64)> {
    (1..=node_count, 1..node_count, -5.0_f64..5.0, -5.0_f64..5.0).prop_map(
        move |(source, offset, coeff_a, coeff_b)| {
            // Offsetting within the node ring guarantees `target != source`.
            let target = (source - 1 + offset) % node_count + 1;
            (source, target, coeff_a, coeff_b)
        },
    )
}

/// Generates graphs whose coefficients are drawn from a continuous range.
pub(crate) fn mst_fixture_strategy() -> impl Strategy<Value = MstFixture> {
    (2..=MAX_NODES)
        .prop_flat_map(|node_count| {
            (
                prop::collection::vec(record_strategy(node_count), 1..=MAX_EDGES),
                -10.0_f64..10.0,
            )
        })
        .prop_map(|(records, parameter)| MstFixture {
            graph: ParametricGraph::from_records(records).unwrap_or_default(),
            parameter,
        })
}

/// Generates graphs whose coefficients come from a tiny integer palette so
/// that many edges tie at every parameter value.
pub(crate) fn tied_fixture_strategy() -> impl Strategy<Value = MstFixture> {
    (2..=MAX_NODES)
        .prop_flat_map(|node_count| {
            let record = (1..=node_count, 1..node_count, 0_u8..3).prop_map(
                move |(source, offset, level)| {
                    let target = (source - 1 + offset) % node_count + 1;
                    (source, target, f64::from(level), 0.0)
                },
            );
            prop::collection::vec(record, 1..=MAX_EDGES)
        })
        .prop_map(|records| MstFixture {
            graph: ParametricGraph::from_records(records).unwrap_or_default(),
            parameter: 0.0,
        })
}
