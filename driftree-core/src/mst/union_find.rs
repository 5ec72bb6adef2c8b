//! Union-find (disjoint set union) used by Kruskal's algorithm.
//!
//! A fresh instance is allocated for every MST build and dropped afterwards,
//! so no component state leaks between parameter samples. Indices are
//! bounds-checked: an out-of-range node is reported, never clamped.

use thiserror::Error;

/// Errors raised by [`UnionFind`] when a precondition is violated.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum UnionFindError {
    /// A node index fell outside `0..len`.
    #[error("node {node} is outside the union-find range 0..{len}")]
    OutOfRange {
        /// The offending node index.
        node: usize,
        /// Number of slots in the structure.
        len: usize,
    },
}

/// Disjoint-set forest with path halving and union by rank.
///
/// # Examples
/// ```
/// use driftree_core::UnionFind;
///
/// let mut sets = UnionFind::new(3);
/// assert_eq!(sets.union(1, 2), Ok(true));
/// assert_eq!(sets.union(2, 1), Ok(false));
/// assert_eq!(sets.find(2), sets.find(1));
/// assert!(sets.find(4).is_err());
/// ```
#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    components: usize,
}

impl UnionFind {
    /// Creates `node_count + 1` singleton sets so that 1-based node ids index
    /// directly.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        let len = node_count.saturating_add(1);
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
            components: len,
        }
    }

    /// Returns the number of slots.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.parent.len() }

    /// Always `false`; the structure holds at least one slot.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.parent.is_empty() }

    /// Returns the number of disjoint sets across all slots.
    #[must_use]
    #[rustfmt::skip]
    pub fn components(&self) -> usize { self.components }

    /// Returns the representative of `node`'s set, halving the traversed path.
    ///
    /// # Errors
    /// Returns [`UnionFindError::OutOfRange`] when `node >= self.len()`.
    pub fn find(&mut self, node: usize) -> Result<usize, UnionFindError> {
        self.check(node)?;
        let mut current = node;
        loop {
            let parent = self.parent[current];
            if parent == current {
                return Ok(current);
            }
            let grandparent = self.parent[parent];
            self.parent[current] = grandparent;
            current = grandparent;
        }
    }

    /// Merges the sets containing `left` and `right`.
    ///
    /// Returns `Ok(true)` when two distinct sets were merged and `Ok(false)`
    /// without mutation when both already share a representative. The
    /// lower-rank root is attached beneath the higher-rank root; on a tie the
    /// root of `left` becomes the parent and its rank grows by one.
    ///
    /// # Errors
    /// Returns [`UnionFindError::OutOfRange`] when either node is out of range.
    pub fn union(&mut self, left: usize, right: usize) -> Result<bool, UnionFindError> {
        let left_root = self.find(left)?;
        let right_root = self.find(right)?;
        if left_root == right_root {
            return Ok(false);
        }

        let left_rank = self.rank[left_root];
        let right_rank = self.rank[right_root];
        let (parent, child) = if left_rank < right_rank {
            (right_root, left_root)
        } else {
            (left_root, right_root)
        };
        self.parent[child] = parent;
        if left_rank == right_rank {
            self.rank[parent] = left_rank.saturating_add(1);
        }
        self.components -= 1;
        Ok(true)
    }

    fn check(&self, node: usize) -> Result<(), UnionFindError> {
        if node < self.parent.len() {
            Ok(())
        } else {
            Err(UnionFindError::OutOfRange {
                node,
                len: self.parent.len(),
            })
        }
    }
}
