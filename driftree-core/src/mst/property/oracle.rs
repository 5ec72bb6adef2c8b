//! Brute-force minimum spanning forest oracle.
//!
//! Enumerates every edge subset of the forest size and keeps the cheapest
//! acyclic one. Exponential in the edge count, so fixtures stay small.

use crate::{ParametricGraph, WeightFunction};

/// Result of the exhaustive search.
#[derive(Clone, Copy, Debug)]
pub(super) struct OracleResult {
    /// Minimum achievable forest weight.
    pub total_weight: f64,
    /// Number of edges in any minimum spanning forest.
    pub edge_count: usize,
}

/// Path-halving find over a plain parent table.
pub(super) fn find_root(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}

/// Counts the components over nodes `1..=node_count` when every edge is present.
pub(super) fn component_count(graph: &ParametricGraph) -> usize {
    let mut parent: Vec<usize> = (0..=graph.node_count()).collect();
    let mut components = graph.node_count();
    for edge in graph.edges() {
        let left = find_root(&mut parent, edge.source());
        let right = find_root(&mut parent, edge.target());
        if left != right {
            parent[right] = left;
            components -= 1;
        }
    }
    components
}

/// Finds the minimum spanning forest weight at `parameter` by exhaustion.
pub(super) fn brute_force_forest<W: WeightFunction>(
    graph: &ParametricGraph,
    weight: &W,
    parameter: f64,
) -> OracleResult {
    let edge_count = graph.node_count().saturating_sub(component_count(graph));
    let weights: Vec<f64> = graph
        .edges()
        .iter()
        .map(|edge| weight.weight(edge, parameter))
        .collect();

    let mut best = f64::INFINITY;
    for mask in 0_u32..(1_u32 << graph.len()) {
        if mask.count_ones() as usize != edge_count {
            continue;
        }
        if let Some(total) = acyclic_subset_weight(graph, &weights, mask) {
            best = best.min(total);
        }
    }

    OracleResult {
        total_weight: if edge_count == 0 { 0.0 } else { best },
        edge_count,
    }
}

fn acyclic_subset_weight(graph: &ParametricGraph, weights: &[f64], mask: u32) -> Option<f64> {
    let mut parent: Vec<usize> = (0..=graph.node_count()).collect();
    let mut total = 0.0;
    for (index, edge) in graph.edges().iter().enumerate() {
        if mask & (1 << index) == 0 {
            continue;
        }
        let left = find_root(&mut parent, edge.source());
        let right = find_root(&mut parent, edge.target());
        if left == right {
            return None;
        }
        parent[right] = left;
        total += weights[index];
    }
    Some(total)
}
