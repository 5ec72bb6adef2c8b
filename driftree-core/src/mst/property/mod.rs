//! Property-based tests for the Kruskal MST builder.
//!
//! Verifies the builder against an exhaustive brute-force oracle on small
//! graphs, validates structural invariants (acyclicity, forest edge count,
//! canonical endpoints) and checks that repeated builds are bit-identical.

mod oracle;
pub(crate) mod strategies;
