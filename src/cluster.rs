//! Union-Find clustering of verified-similar documents.
//!
//! An index-based disjoint-set forest: `parent[i]` points toward the
//! root of `i`'s component, and following parent links from any node
//! terminates at a root. Merging verified pairs computes the transitive
//! closure of "is similar to", so cluster membership is an equivalence
//! relation by construction. Merge order never changes the resulting
//! partition, only which index happens to label each root.

use std::collections::HashMap;

/// Disjoint-set forest over document indices.
pub struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    /// Create `n` singleton sets, each element its own parent.
    pub fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
        }
    }

    /// Number of elements (not components).
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Find the root of the component containing `i`.
    ///
    /// Path compression: nodes visited on the way re-point closer to the
    /// root, keeping later finds near O(1) amortized.
    pub fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    /// Merge the components containing `i` and `j`.
    ///
    /// Returns true if they were previously separate.
    pub fn union(&mut self, i: usize, j: usize) -> bool {
        let root_i = self.find(i);
        let root_j = self.find(j);
        if root_i == root_j {
            return false;
        }
        self.parent[root_j] = root_i;
        true
    }

    /// Whether `i` and `j` are in the same component.
    pub fn connected(&mut self, i: usize, j: usize) -> bool {
        self.find(i) == self.find(j)
    }

    /// Enumerate all clusters, singletons included.
    ///
    /// Members within a cluster are in increasing index order, and
    /// clusters are ordered by their smallest member, so the output is
    /// deterministic regardless of merge order.
    pub fn clusters(&mut self) -> Vec<Vec<usize>> {
        let mut by_root: HashMap<usize, Vec<usize>> = HashMap::new();
        for i in 0..self.parent.len() {
            let root = self.find(i);
            by_root.entry(root).or_default().push(i);
        }

        let mut clusters: Vec<Vec<usize>> = by_root.into_values().collect();
        clusters.sort_by_key(|members| members[0]);
        clusters
    }
}
