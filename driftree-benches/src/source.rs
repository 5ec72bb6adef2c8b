//! Synthetic parametric graphs for benchmarking.
//!
//! Graphs are connected by construction: a random Hamiltonian path links
//! every node, then extra chords are added between random node pairs.
//! Coefficients are drawn so that edge weights cross as the parameter moves,
//! and generation is seeded for reproducibility across benchmark runs.

use driftree_core::{GraphError, ParametricGraph};
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

/// Errors that may occur during synthetic graph generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// Fewer than two nodes were requested.
    #[error("node count must be at least 2 (got {requested})")]
    TooFewNodes {
        /// The rejected node count.
        requested: usize,
    },
    /// The generated records failed graph validation.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Configuration for synthetic graph generation.
#[derive(Clone, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of nodes, labelled `1..=node_count`.
    pub node_count: usize,
    /// Chords added on top of the spanning path.
    pub extra_edges: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates a connected graph from the given configuration.
///
/// The graph holds `node_count - 1 + extra_edges` edges. The constant
/// coefficient lies in `[1, 10)` and the drift coefficient in `[-5, 5)`.
///
/// # Errors
///
/// Returns [`SyntheticError::TooFewNodes`] if `node_count` is below two.
///
/// # Examples
///
/// ```
/// use driftree_benches::source::{SyntheticGraphConfig, generate};
///
/// let config = SyntheticGraphConfig { node_count: 10, extra_edges: 5, seed: 42 };
/// let graph = generate(&config).expect("valid config");
/// assert_eq!(graph.node_count(), 10);
/// assert_eq!(graph.len(), 14);
/// ```
pub fn generate(config: &SyntheticGraphConfig) -> Result<ParametricGraph, SyntheticError> {
    let node_count = config.node_count;
    if node_count < 2 {
        return Err(SyntheticError::TooFewNodes {
            requested: node_count,
        });
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut order: Vec<usize> = (1..=node_count).collect();
    order.shuffle(&mut rng);

    let path = order.windows(2).filter_map(|pair| match pair {
        [source, target] => Some((*source, *target)),
        _ => None,
    });
    let mut pairs: Vec<(usize, usize)> = path.collect();
    for _ in 0..config.extra_edges {
        let source = rng.gen_range(1..=node_count);
        let mut target = rng.gen_range(1..node_count);
        if target >= source {
            target += 1;
        }
        pairs.push((source, target));
    }

    let records = pairs.into_iter().map(|(source, target)| {
        (
            source,
            target,
            rng.gen_range(1.0..10.0),
            rng.gen_range(-5.0..5.0),
        )
    });
    Ok(ParametricGraph::from_records(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftree_core::{MstBuilder, Sinusoidal};
    use rstest::rstest;

    #[rstest]
    #[case::tiny(2, 0)]
    #[case::small(16, 8)]
    #[case::medium(128, 256)]
    fn generates_connected_graphs(#[case] node_count: usize, #[case] extra_edges: usize) {
        let graph = generate(&SyntheticGraphConfig {
            node_count,
            extra_edges,
            seed: 7,
        })
        .expect("generation must succeed");
        assert_eq!(graph.node_count(), node_count);
        assert_eq!(graph.len(), node_count - 1 + extra_edges);

        let mst = MstBuilder::new(&graph, &Sinusoidal)
            .build(1.0)
            .expect("MST must build");
        assert!(mst.is_spanning_tree());
    }

    #[rstest]
    fn generation_is_seeded() {
        let config = SyntheticGraphConfig {
            node_count: 32,
            extra_edges: 32,
            seed: 99,
        };
        let first = generate(&config).expect("generation must succeed");
        let second = generate(&config).expect("generation must succeed");
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn rejects_too_few_nodes(#[case] node_count: usize) {
        let err = generate(&SyntheticGraphConfig {
            node_count,
            extra_edges: 4,
            seed: 1,
        })
        .expect_err("generation must fail");
        assert_eq!(
            err,
            SyntheticError::TooFewNodes {
                requested: node_count
            }
        );
    }
}
