//! Change detection between trees built at consecutive parameter samples.
//!
//! Each tree is reduced to a set of comparison keys and the symmetric
//! difference of the two sets is split into removed and added edges. Which
//! key is used is governed by [`ChangePolicy`]; the two policies only differ
//! when the graph holds parallel edges between the same pair of nodes.

use std::collections::BTreeMap;

use crate::{edge::EdgeId, mst::MstResult};

/// Selects how edges are identified when two trees are compared.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ChangePolicy {
    /// Compare unordered node pairs. Swapping one parallel edge for another
    /// between the same nodes is not reported.
    #[default]
    NodePair,
    /// Compare edge identifiers, reporting swaps between parallel edges.
    EdgeId,
}

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
enum ChangeKey {
    Pair(usize, usize),
    Id(EdgeId),
}

/// Differences between the tree at one sample and the tree before it.
///
/// # Examples
/// ```
/// use driftree_core::ChangeRecord;
///
/// let record = ChangeRecord::unchanged(0.0);
/// assert_eq!(record.instability(), 0);
/// assert!(record.is_unchanged());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeRecord {
    parameter: f64,
    added: Vec<EdgeId>,
    removed: Vec<EdgeId>,
}

impl ChangeRecord {
    /// Creates an empty record, as reported for the first sample of a sweep.
    #[must_use]
    pub const fn unchanged(parameter: f64) -> Self {
        Self {
            parameter,
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Returns the parameter value of the later sample.
    #[must_use]
    #[rustfmt::skip]
    pub fn parameter(&self) -> f64 { self.parameter }

    /// Returns edges present now but absent before, in ascending id order.
    #[must_use]
    #[rustfmt::skip]
    pub fn added(&self) -> &[EdgeId] { &self.added }

    /// Returns edges present before but absent now, in ascending id order.
    #[must_use]
    #[rustfmt::skip]
    pub fn removed(&self) -> &[EdgeId] { &self.removed }

    /// Returns the size of the symmetric difference between the two trees.
    #[must_use]
    pub fn instability(&self) -> usize {
        self.added.len() + self.removed.len()
    }

    /// Returns `true` when the two trees matched under the active policy.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compares consecutive [`MstResult`] values under a [`ChangePolicy`].
///
/// # Examples
/// ```
/// use driftree_core::{ChangePolicy, ChangeTracker, MstBuilder, ParametricGraph, Sinusoidal};
///
/// let graph = ParametricGraph::from_records([
///     (1, 2, 1.0, 0.0),
///     (2, 3, 1.0, 0.0),
///     (1, 3, 5.0, -5.0),
/// ])
/// .expect("records are valid");
/// let builder = MstBuilder::new(&graph, &Sinusoidal);
/// let before = builder.build(0.0).expect("build succeeds");
/// let after = builder.build(std::f64::consts::FRAC_PI_2).expect("build succeeds");
///
/// let tracker = ChangeTracker::new(ChangePolicy::NodePair);
/// assert_eq!(tracker.compare(None, &before).instability(), 0);
/// let change = tracker.compare(Some(&before), &after);
/// assert_eq!(change.instability(), 2);
/// assert_eq!(change.removed()[0].get(), 1);
/// assert_eq!(change.added()[0].get(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ChangeTracker {
    policy: ChangePolicy,
}

impl ChangeTracker {
    /// Creates a tracker using `policy` to identify edges.
    #[must_use]
    pub const fn new(policy: ChangePolicy) -> Self {
        Self { policy }
    }

    /// Returns the active comparison policy.
    #[must_use]
    #[rustfmt::skip]
    pub fn policy(&self) -> ChangePolicy { self.policy }

    /// Compares `current` against the tree of the preceding sample.
    ///
    /// When `previous` is `None` the sample is the first of its sweep and an
    /// unchanged record is returned.
    #[must_use]
    pub fn compare(&self, previous: Option<&MstResult>, current: &MstResult) -> ChangeRecord {
        let Some(previous) = previous else {
            return ChangeRecord::unchanged(current.parameter());
        };

        let before = self.keyed(previous);
        let after = self.keyed(current);
        let mut removed = only_in(&before, &after);
        let mut added = only_in(&after, &before);
        removed.sort_unstable();
        added.sort_unstable();

        ChangeRecord {
            parameter: current.parameter(),
            added,
            removed,
        }
    }

    fn keyed(&self, tree: &MstResult) -> BTreeMap<ChangeKey, EdgeId> {
        tree.edges()
            .iter()
            .map(|edge| {
                let key = match self.policy {
                    ChangePolicy::NodePair => ChangeKey::Pair(edge.source(), edge.target()),
                    ChangePolicy::EdgeId => ChangeKey::Id(edge.id()),
                };
                (key, edge.id())
            })
            .collect()
    }
}

fn only_in(
    left: &BTreeMap<ChangeKey, EdgeId>,
    right: &BTreeMap<ChangeKey, EdgeId>,
) -> Vec<EdgeId> {
    left.iter()
        .filter(|(key, _)| !right.contains_key(key))
        .map(|(_, id)| *id)
        .collect()
}
