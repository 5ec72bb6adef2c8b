//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs
//! so setup functions can propagate failures with `?` instead of using
//! `.expect()`.

use crate::source::SyntheticError;
use driftree_core::{MstError, SweepError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// A single MST build failed.
    #[error("MST computation failed: {0}")]
    Mst(#[from] MstError),
    /// Sweep configuration or execution failed.
    #[error("sweep failed: {0}")]
    Sweep(#[from] SweepError),
}
