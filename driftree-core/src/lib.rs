//! Driftree core library.
//!
//! Tracks how the minimum spanning tree of a graph with parameter-dependent
//! edge weights changes as the parameter is swept across a range.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod change;
mod edge;
mod error;
mod graph;
mod mst;
mod sweep;
mod weight;

#[cfg(test)]
pub(crate) mod test_utils;

pub use crate::{
    builder::{ExecutionStrategy, SweepBuilder, SweepConfig},
    change::{ChangePolicy, ChangeRecord, ChangeTracker},
    edge::{EdgeId, ParametricEdge},
    error::{GraphError, GraphErrorCode, SweepError, SweepErrorCode},
    graph::ParametricGraph,
    mst::{MstBuilder, MstEdge, MstError, MstErrorCode, MstResult, UnionFind, UnionFindError},
    sweep::{
        ParameterIter, ParameterRange, Parameters, Sweep, SweepReport, SweepSample, Sweeper,
        Transition,
    },
    weight::{Linear, Sinusoidal, WeightFunction},
};
