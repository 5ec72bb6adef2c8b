//! Error types for the driftree core library.
//!
//! Defines the graph-construction and sweep error enums exposed by the public
//! API together with their stable machine-readable codes.

use std::fmt;

use thiserror::Error;

use crate::{builder::ExecutionStrategy, mst::MstError, mst::MstErrorCode};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while assembling a [`crate::ParametricGraph`].
///
/// `edge` fields carry the zero-based load-order index of the offending record.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// Node ids are 1-based; an endpoint was `0`.
    #[error("edge {edge} references node 0, but node ids start at 1")]
    ZeroNodeId {
        /// Load-order index of the offending edge.
        edge: usize,
    },
    /// Both endpoints of the edge are the same node.
    #[error("edge {edge} is a self-loop on node {node}")]
    SelfLoop {
        /// Load-order index of the offending edge.
        edge: usize,
        /// The node referenced by both endpoints.
        node: usize,
    },
    /// A weight coefficient was NaN or infinite.
    #[error("edge {edge} has a non-finite weight coefficient")]
    NonFiniteCoefficient {
        /// Load-order index of the offending edge.
        edge: usize,
    },
    /// An endpoint exceeded [`crate::ParametricGraph::MAX_NODE_ID`].
    #[error("edge {edge} references node {node}, above the supported maximum {max}")]
    NodeIdTooLarge {
        /// Load-order index of the offending edge.
        edge: usize,
        /// The largest endpoint of the edge.
        node: usize,
        /// The supported maximum node id.
        max: usize,
    },
}

impl GraphError {
    /// Returns the load-order index of the record that was rejected.
    #[must_use]
    pub const fn edge(&self) -> usize {
        match self {
            Self::ZeroNodeId { edge }
            | Self::SelfLoop { edge, .. }
            | Self::NonFiniteCoefficient { edge }
            | Self::NodeIdTooLarge { edge, .. } => *edge,
        }
    }
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// Node ids are 1-based; an endpoint was `0`.
        ZeroNodeId => ZeroNodeId { .. } => "GRAPH_ZERO_NODE_ID",
        /// Both endpoints of the edge are the same node.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// A weight coefficient was NaN or infinite.
        NonFiniteCoefficient => NonFiniteCoefficient { .. } => "GRAPH_NON_FINITE_COEFFICIENT",
        /// An endpoint exceeded the supported maximum node id.
        NodeIdTooLarge => NodeIdTooLarge { .. } => "GRAPH_NODE_ID_TOO_LARGE",
    }
}

/// Error type produced when configuring or running a parameter sweep.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SweepError {
    /// A parameter value or range bound was NaN or infinite.
    #[error("sweep parameter {value} is not finite")]
    NonFiniteParameter {
        /// The rejected value.
        value: f64,
    },
    /// The range step was zero or negative.
    #[error("sweep step must be positive (got {step})")]
    InvalidStep {
        /// The rejected step.
        step: f64,
    },
    /// The range start exceeded its end.
    #[error("sweep range start {start} exceeds end {end}")]
    InvalidRange {
        /// Lower bound supplied by the caller.
        start: f64,
        /// Upper bound supplied by the caller.
        end: f64,
    },
    /// The range would hold more than [`crate::ParameterRange::MAX_SAMPLES`] values.
    #[error("sweep range {start}..={end} step {step} exceeds {max} samples")]
    TooManySamples {
        /// Lower bound supplied by the caller.
        start: f64,
        /// Upper bound supplied by the caller.
        end: f64,
        /// Step supplied by the caller.
        step: f64,
        /// The supported maximum sample count.
        max: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// Building the MST for one sample failed, aborting the sweep.
    #[error("sweep failed at t={parameter}: {source}")]
    Sample {
        /// Parameter value of the failing sample.
        parameter: f64,
        /// Underlying MST construction error.
        #[source]
        source: MstError,
    },
}

define_error_codes! {
    /// Stable codes describing [`SweepError`] variants.
    enum SweepErrorCode for SweepError {
        /// A parameter value or range bound was NaN or infinite.
        NonFiniteParameter => NonFiniteParameter { .. } => "SWEEP_NON_FINITE_PARAMETER",
        /// The range step was zero or negative.
        InvalidStep => InvalidStep { .. } => "SWEEP_INVALID_STEP",
        /// The range start exceeded its end.
        InvalidRange => InvalidRange { .. } => "SWEEP_INVALID_RANGE",
        /// The range held more values than a sweep supports.
        TooManySamples => TooManySamples { .. } => "SWEEP_TOO_MANY_SAMPLES",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "SWEEP_BACKEND_UNAVAILABLE",
        /// Building the MST for one sample failed.
        SampleFailure => Sample { .. } => "SWEEP_SAMPLE_FAILURE",
    }
}

impl SweepError {
    /// Retrieve the inner [`MstErrorCode`] when the error originated in an MST build.
    #[must_use]
    pub const fn mst_code(&self) -> Option<MstErrorCode> {
        match self {
            Self::Sample { source, .. } => Some(source.code()),
            _ => None,
        }
    }
}
