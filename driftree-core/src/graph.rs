//! Immutable parametric graph shared read-only by the engine.

use crate::{
    edge::{EdgeId, ParametricEdge},
    error::GraphError,
};

/// An undirected multigraph whose edge weights depend on a scalar parameter.
///
/// Nodes are numbered `1..=node_count`, where `node_count` is the largest
/// endpoint seen. Edge identifiers follow load order and are therefore part
/// of the graph's semantics: they break ties between equally weighted edges.
///
/// # Examples
/// ```
/// use driftree_core::ParametricGraph;
///
/// let graph = ParametricGraph::from_records([
///     (1, 2, 1.0, 0.0),
///     (2, 3, 1.0, 0.0),
///     (1, 3, 5.0, -5.0),
/// ])
/// .expect("records are valid");
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.len(), 3);
/// assert_eq!(graph.edges()[2].id().get(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParametricGraph {
    node_count: usize,
    edges: Vec<ParametricEdge>,
}

impl ParametricGraph {
    /// The largest accepted node id.
    ///
    /// Every MST build allocates union-find state for `node_count + 1`
    /// slots, so node ids are capped at load time.
    pub const MAX_NODE_ID: usize = 1 << 24;

    /// Builds a graph from `(u, v, a, b)` records in load order.
    ///
    /// # Errors
    /// Returns [`GraphError::ZeroNodeId`] when an endpoint is `0`,
    /// [`GraphError::NodeIdTooLarge`] when an endpoint exceeds
    /// [`ParametricGraph::MAX_NODE_ID`], [`GraphError::SelfLoop`] when both
    /// endpoints coincide, and [`GraphError::NonFiniteCoefficient`] when `a`
    /// or `b` is NaN or infinite. No partial graph is produced on failure.
    pub fn from_records<I>(records: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize, f64, f64)>,
    {
        let mut node_count = 0;
        let mut edges = Vec::new();
        for (index, (source, target, coeff_a, coeff_b)) in records.into_iter().enumerate() {
            validate_record(index, source, target, coeff_a, coeff_b)?;
            node_count = node_count.max(source).max(target);
            edges.push(ParametricEdge::new(
                EdgeId::new(index),
                source,
                target,
                coeff_a,
                coeff_b,
            ));
        }
        Ok(Self { node_count, edges })
    }

    /// Returns the largest node id referenced by any edge (`0` when empty).
    #[must_use]
    #[rustfmt::skip]
    pub fn node_count(&self) -> usize { self.node_count }

    /// Returns the edges in load order.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[ParametricEdge] { &self.edges }

    /// Returns the number of edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.edges.len() }

    /// Returns `true` when the graph has no edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.edges.is_empty() }

    /// Looks up an edge by identifier.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&ParametricEdge> {
        self.edges.get(id.get())
    }
}

fn validate_record(
    index: usize,
    source: usize,
    target: usize,
    coeff_a: f64,
    coeff_b: f64,
) -> Result<(), GraphError> {
    if source == 0 || target == 0 {
        return Err(GraphError::ZeroNodeId { edge: index });
    }
    let largest = source.max(target);
    if largest > ParametricGraph::MAX_NODE_ID {
        return Err(GraphError::NodeIdTooLarge {
            edge: index,
            node: largest,
            max: ParametricGraph::MAX_NODE_ID,
        });
    }
    if source == target {
        return Err(GraphError::SelfLoop {
            edge: index,
            node: source,
        });
    }
    if !coeff_a.is_finite() || !coeff_b.is_finite() {
        return Err(GraphError::NonFiniteCoefficient { edge: index });
    }
    Ok(())
}
