//! Weight functions evaluated against a [`ParametricEdge`] at a parameter value.

use crate::edge::ParametricEdge;

/// Maps an edge and a parameter value to an instantaneous weight.
///
/// Implementations must be pure: evaluating the same edge at the same
/// parameter always yields the same weight. Closures of the form
/// `Fn(&ParametricEdge, f64) -> f64` implement the trait directly.
///
/// # Examples
/// ```
/// use driftree_core::{ParametricGraph, Sinusoidal, WeightFunction};
///
/// let graph = ParametricGraph::from_records([(1, 2, 1.0, 2.0)]).expect("valid graph");
/// let edge = &graph.edges()[0];
/// assert_eq!(Sinusoidal.weight(edge, 0.0), 1.0);
///
/// let doubled = |edge: &driftree_core::ParametricEdge, t: f64| 2.0 * edge.coeff_a() + t;
/// assert_eq!(doubled.weight(edge, 1.0), 3.0);
/// ```
pub trait WeightFunction: Sync {
    /// Evaluates the weight of `edge` at `parameter`.
    fn weight(&self, edge: &ParametricEdge, parameter: f64) -> f64;
}

/// The default weight family, `a + b * sin(t)`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Sinusoidal;

impl WeightFunction for Sinusoidal {
    fn weight(&self, edge: &ParametricEdge, parameter: f64) -> f64 {
        edge.coeff_a() + edge.coeff_b() * parameter.sin()
    }
}

/// Linear drift, `a + b * t`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Linear;

impl WeightFunction for Linear {
    fn weight(&self, edge: &ParametricEdge, parameter: f64) -> f64 {
        edge.coeff_a() + edge.coeff_b() * parameter
    }
}

impl<F> WeightFunction for F
where
    F: Fn(&ParametricEdge, f64) -> f64 + Sync,
{
    fn weight(&self, edge: &ParametricEdge, parameter: f64) -> f64 {
        self(edge, parameter)
    }
}
