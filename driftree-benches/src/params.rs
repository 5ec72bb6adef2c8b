//! Benchmark parameter types.
//!
//! Groups related benchmark parameters into structs so that the
//! benchmark identifiers render consistently in Criterion reports.

use std::fmt;

/// Parameters for a single MST build benchmark.
#[derive(Clone, Debug)]
pub struct GraphBenchParams {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Number of edges in the graph.
    pub edge_count: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},m={}", self.node_count, self.edge_count)
    }
}

/// Parameters for a full sweep benchmark.
#[derive(Clone, Debug)]
pub struct SweepBenchParams {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// Number of parameter samples in the sweep.
    pub sample_count: usize,
}

impl fmt::Display for SweepBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},samples={}", self.node_count, self.sample_count)
    }
}
