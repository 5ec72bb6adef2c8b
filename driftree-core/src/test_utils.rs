//! Shared test utilities for `driftree-core`.

use driftree_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::ParametricGraph;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `DRIFTREE_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a graph from literal records, panicking on invalid fixtures.
#[must_use]
pub(crate) fn graph(records: &[(usize, usize, f64, f64)]) -> ParametricGraph {
    match ParametricGraph::from_records(records.iter().copied()) {
        Ok(graph) => graph,
        Err(err) => panic!("fixture graph must be valid: {err}"),
    }
}

/// The three-node fixture whose tree flips between `t = 0` and `t = pi/2`.
#[must_use]
pub(crate) fn triangle() -> ParametricGraph {
    graph(&[(1, 2, 1.0, 0.0), (2, 3, 1.0, 0.0), (1, 3, 5.0, -5.0)])
}
