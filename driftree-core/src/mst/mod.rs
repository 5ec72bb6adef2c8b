//! Minimum spanning tree construction at a fixed parameter value.
//!
//! [`MstBuilder`] evaluates every edge weight at `t`, orders the edges by
//! `(weight, id)` and runs Kruskal's algorithm over a freshly allocated
//! [`UnionFind`]. Construction halts once `node_count - 1` edges have been
//! accepted; disconnected graphs yield a minimum spanning forest.

mod union_find;

use std::cmp::Ordering;

use tracing::{debug, instrument};

use crate::{
    edge::EdgeId,
    graph::ParametricGraph,
    weight::WeightFunction,
};

pub use self::union_find::{UnionFind, UnionFindError};

/// Errors returned while computing a minimum spanning tree/forest.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum MstError {
    /// The parameter value was NaN or infinite.
    #[error("cannot build an MST at non-finite parameter {parameter}")]
    NonFiniteParameter {
        /// The rejected parameter value.
        parameter: f64,
    },
    /// The weight function produced NaN or infinity for an edge.
    #[error("edge {edge} has non-finite weight at t={parameter}")]
    NonFiniteWeight {
        /// The edge whose weight could not be ordered.
        edge: EdgeId,
        /// Parameter value at which the weight was evaluated.
        parameter: f64,
    },
    /// The union-find rejected a node index.
    #[error(transparent)]
    UnionFind(#[from] UnionFindError),
}

impl MstError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> MstErrorCode {
        match self {
            Self::NonFiniteParameter { .. } => MstErrorCode::NonFiniteParameter,
            Self::NonFiniteWeight { .. } => MstErrorCode::NonFiniteWeight,
            Self::UnionFind(_) => MstErrorCode::NodeOutOfRange,
        }
    }
}

/// Machine-readable error codes for [`MstError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MstErrorCode {
    /// The parameter value was NaN or infinite.
    NonFiniteParameter,
    /// The weight function produced NaN or infinity for an edge.
    NonFiniteWeight,
    /// The union-find rejected a node index.
    NodeOutOfRange,
}

impl MstErrorCode {
    /// Returns the symbolic identifier for logging and metrics surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NonFiniteParameter => "NON_FINITE_PARAMETER",
            Self::NonFiniteWeight => "NON_FINITE_WEIGHT",
            Self::NodeOutOfRange => "NODE_OUT_OF_RANGE",
        }
    }
}

/// An edge accepted into the tree, with its weight at the build parameter.
///
/// Endpoints are stored in canonical undirected form (`source < target`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MstEdge {
    id: EdgeId,
    source: usize,
    target: usize,
    weight: f64,
}

impl MstEdge {
    /// Returns the load-order identifier of the underlying edge.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> EdgeId { self.id }

    /// Returns the smaller endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// Returns the larger endpoint id.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> usize { self.target }

    /// Returns the edge weight at the build parameter.
    #[must_use]
    #[rustfmt::skip]
    pub fn weight(&self) -> f64 { self.weight }
}

impl Eq for MstEdge {}

impl Ord for MstEdge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for MstEdge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The minimum spanning tree (or forest) of a graph at one parameter value.
#[derive(Clone, Debug, PartialEq)]
pub struct MstResult {
    parameter: f64,
    node_count: usize,
    edges: Vec<MstEdge>,
    total_weight: f64,
}

impl MstResult {
    /// Returns the parameter value the tree was built at.
    #[must_use]
    #[rustfmt::skip]
    pub fn parameter(&self) -> f64 { self.parameter }

    /// Returns the node count of the source graph.
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the accepted edges in union order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[MstEdge] { &self.edges }

    /// Returns the sum of accepted edge weights, added in union order.
    #[must_use]
    #[rustfmt::skip]
    pub fn total_weight(&self) -> f64 { self.total_weight }

    /// Returns the number of accepted edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.edges.len() }

    /// Returns `true` when no edge was accepted.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }

    /// Returns the accepted edge identifiers in union order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().map(MstEdge::id)
    }

    /// Returns the number of connected components over nodes `1..=node_count`.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.node_count.saturating_sub(self.edges.len())
    }

    /// Returns `true` when the result spans every node in a single tree.
    #[must_use]
    pub fn is_spanning_tree(&self) -> bool {
        self.node_count > 0 && self.component_count() == 1
    }
}

/// Runs Kruskal's algorithm over a [`ParametricGraph`] at chosen parameters.
///
/// The builder borrows the graph and weight function; every call to
/// [`MstBuilder::build`] is independent and deterministic.
///
/// # Examples
/// ```
/// use driftree_core::{MstBuilder, ParametricGraph, Sinusoidal};
///
/// let graph = ParametricGraph::from_records([
///     (1, 2, 1.0, 0.0),
///     (2, 3, 1.0, 0.0),
///     (1, 3, 5.0, -5.0),
/// ])
/// .expect("records are valid");
/// let builder = MstBuilder::new(&graph, &Sinusoidal);
/// let mst = builder.build(std::f64::consts::FRAC_PI_2).expect("build succeeds");
/// let ids: Vec<usize> = mst.edge_ids().map(|id| id.get()).collect();
/// assert_eq!(ids, [2, 0]);
/// assert_eq!(mst.total_weight(), 1.0);
/// ```
#[derive(Debug)]
pub struct MstBuilder<'g, W> {
    graph: &'g ParametricGraph,
    weight: &'g W,
}

impl<W> Clone for MstBuilder<'_, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for MstBuilder<'_, W> {}

impl<'g, W: WeightFunction> MstBuilder<'g, W> {
    /// Creates a builder over `graph` using `weight` to evaluate edges.
    #[must_use]
    pub const fn new(graph: &'g ParametricGraph, weight: &'g W) -> Self {
        Self { graph, weight }
    }

    /// Returns the graph this builder reads from.
    #[must_use]
    #[rustfmt::skip]
    pub fn graph(&self) -> &'g ParametricGraph { self.graph }

    /// Computes the minimum spanning tree/forest at `parameter`.
    ///
    /// Edges are sorted by instantaneous weight with ties broken by edge id,
    /// so equal-weight edges loaded earlier are preferred.
    ///
    /// # Errors
    /// Returns [`MstError::NonFiniteParameter`] for a NaN or infinite
    /// `parameter` and [`MstError::NonFiniteWeight`] when the weight function
    /// yields a non-finite value for any edge.
    #[instrument(
        name = "core.mst_build",
        level = "debug",
        err,
        skip(self),
        fields(edges = self.graph.len(), nodes = self.graph.node_count()),
    )]
    pub fn build(&self, parameter: f64) -> Result<MstResult, MstError> {
        if !parameter.is_finite() {
            return Err(MstError::NonFiniteParameter { parameter });
        }

        let mut candidates = self.weigh_edges(parameter)?;
        candidates.sort_unstable();

        let node_count = self.graph.node_count();
        let target = node_count.saturating_sub(1);
        let mut union_find = UnionFind::new(node_count);
        let mut edges = Vec::with_capacity(target);
        let mut total_weight = 0.0;

        for candidate in candidates {
            if edges.len() == target {
                break;
            }
            if union_find.union(candidate.source, candidate.target)? {
                total_weight += candidate.weight;
                edges.push(candidate);
            }
        }

        debug!(
            accepted = edges.len(),
            total_weight,
            spanning = edges.len() == target && target > 0,
            "mst build completed"
        );
        Ok(MstResult {
            parameter,
            node_count,
            edges,
            total_weight,
        })
    }

    fn weigh_edges(&self, parameter: f64) -> Result<Vec<MstEdge>, MstError> {
        self.graph
            .edges()
            .iter()
            .map(|edge| {
                let weight = self.weight.weight(edge, parameter);
                if !weight.is_finite() {
                    return Err(MstError::NonFiniteWeight {
                        edge: edge.id(),
                        parameter,
                    });
                }
                let (source, target) = edge.endpoints();
                Ok(MstEdge {
                    id: edge.id(),
                    source,
                    target,
                    weight,
                })
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod property;
