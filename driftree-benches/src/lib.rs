//! Benchmark support crate for driftree.
//!
//! Provides seeded synthetic edge lists and parameter types used by the
//! Criterion benchmarks for single MST builds and full parameter sweeps.

pub mod error;
pub mod params;
pub mod source;
