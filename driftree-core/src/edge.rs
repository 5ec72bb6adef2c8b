//! Parametric edge records.
//!
//! An edge carries two coefficients that a [`crate::WeightFunction`] turns
//! into an instantaneous weight for a given parameter value.

use std::fmt;

/// Stable identifier assigned to an edge in load order.
///
/// Identifiers break weight ties during MST construction and identify edges
/// when consecutive trees are compared.
///
/// # Examples
/// ```
/// use driftree_core::EdgeId;
///
/// let id = EdgeId::new(3);
/// assert_eq!(id.get(), 3);
/// assert!(EdgeId::new(1) < id);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Wraps a zero-based load-order index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the zero-based load-order index.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An undirected edge whose weight depends on the sweep parameter.
///
/// Edges are created by [`crate::ParametricGraph::from_records`], which
/// assigns identifiers and validates endpoints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParametricEdge {
    id: EdgeId,
    source: usize,
    target: usize,
    coeff_a: f64,
    coeff_b: f64,
}

impl ParametricEdge {
    pub(crate) const fn new(
        id: EdgeId,
        source: usize,
        target: usize,
        coeff_a: f64,
        coeff_b: f64,
    ) -> Self {
        Self {
            id,
            source,
            target,
            coeff_a,
            coeff_b,
        }
    }

    /// Returns the load-order identifier.
    #[must_use]
    #[rustfmt::skip]
    pub fn id(&self) -> EdgeId { self.id }

    /// Returns the first endpoint as provided at load time.
    #[must_use]
    #[rustfmt::skip]
    pub fn source(&self) -> usize { self.source }

    /// Returns the second endpoint as provided at load time.
    #[must_use]
    #[rustfmt::skip]
    pub fn target(&self) -> usize { self.target }

    /// Returns the constant coefficient `a`.
    #[must_use]
    #[rustfmt::skip]
    pub fn coeff_a(&self) -> f64 { self.coeff_a }

    /// Returns the parameter-dependent coefficient `b`.
    #[must_use]
    #[rustfmt::skip]
    pub fn coeff_b(&self) -> f64 { self.coeff_b }

    /// Returns the endpoints in canonical `(min, max)` order.
    #[must_use]
    pub fn endpoints(&self) -> (usize, usize) {
        if self.source <= self.target {
            (self.source, self.target)
        } else {
            (self.target, self.source)
        }
    }
}
