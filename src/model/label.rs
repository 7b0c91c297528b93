//! Distance labels and the label set answering distance queries.
//!
//! - [Label]: pivots of one node with the distance to each of them.
//! - [LabelSet]: the finished, read-only labels of all nodes of a tree.

use crate::error::{OracleError, Result};
use crate::oracle::query;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

/// Returns the maximal label size `ceil(log2(n)) + 1` that centroid
/// decomposition guarantees for a tree with `num_nodes` nodes
/// (`0` for the empty tree).
///
/// # Example
/// ```
/// use treedist::label_size_bound;
///
/// assert_eq!(label_size_bound(1), 1);
/// assert_eq!(label_size_bound(13), 5);
/// ```
pub fn label_size_bound(num_nodes: usize) -> usize {
    if num_nodes == 0 {
        return 0;
    }
    num_nodes.next_power_of_two().trailing_zeros() as usize + 1
}

// =#========================================================================#=
// LABEL
// =#========================================================================#=
/// Label of a single node: a short list of pivot nodes together with the
/// weighted distance from the owner to each pivot.
///
/// Entries are kept in the order they were recorded, which for centroid
/// labels is the order of decomposition levels (shallowest centroid first,
/// the owner itself last). Every finished label contains its owner at
/// distance 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Label<N> {
    /// Node this label belongs to
    owner: N,
    /// Pivots with distance from `owner`
    entries: Vec<(N, f64)>,
}

impl<N: PartialEq> Label<N> {
    /// Creates a label for `owner` holding the given entries.
    pub fn new(owner: N, entries: Vec<(N, f64)>) -> Self {
        Label { owner, entries }
    }

    /// Returns the node this label belongs to.
    pub fn owner(&self) -> &N {
        &self.owner
    }

    /// Returns the distance from the owner to `pivot`, or `None` if
    /// `pivot` is not part of this label.
    pub fn get(&self, pivot: &N) -> Option<f64> {
        self.entries
            .iter()
            .find(|(p, _)| p == pivot)
            .map(|&(_, distance)| distance)
    }

    /// Returns `true` if `pivot` is part of this label.
    pub fn contains_pivot(&self, pivot: &N) -> bool {
        self.entries.iter().any(|(p, _)| p == pivot)
    }

    /// Returns the number of pivots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the label has no pivots.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(pivot, distance)` entries in recording order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, f64)> {
        self.entries.iter().map(|(p, d)| (p, *d))
    }

    /// Iterates over the pivots in recording order.
    pub fn pivots(&self) -> impl Iterator<Item = &N> {
        self.entries.iter().map(|(p, _)| p)
    }

    pub(crate) fn push(&mut self, pivot: N, distance: f64) {
        self.entries.push((pivot, distance));
    }
}

impl<N: Eq + Hash + Clone> Label<N> {
    /// Returns the entries as a map from pivot to distance.
    pub fn to_map(&self) -> HashMap<N, f64> {
        self.entries.iter().cloned().collect()
    }
}

impl<N: Debug> fmt::Display for Label<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {{", self.owner)?;
        for (i, (pivot, distance)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{pivot:?}: {distance}")?;
        }
        write!(f, "}}")
    }
}

// =#========================================================================#=
// LABEL SET
// =#========================================================================#=
/// The labels of all nodes of a tree, sufficient to answer every pairwise
/// distance query exactly.
///
/// Built once by [build_labels](crate::build_labels) (or
/// [OracleBuilder](crate::OracleBuilder),
/// [build_rooted_labels](crate::build_rooted_labels)) and read-only
/// afterwards, so it can be shared freely between reading threads.
///
/// # Example
/// ```
/// use treedist::{WeightedTree, build_labels};
///
/// let tree = WeightedTree::from_edges([(1, 2, 10.0), (2, 3, 20.0)]).unwrap();
/// let labels = build_labels(&tree).unwrap();
/// assert_eq!(labels.distance(&1, &3).unwrap(), 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct LabelSet<N> {
    labels: HashMap<N, Label<N>>,
}

impl<N> Default for LabelSet<N> {
    fn default() -> Self {
        LabelSet {
            labels: HashMap::new(),
        }
    }
}

impl<N: Clone + Eq + Hash + Debug> LabelSet<N> {
    pub(crate) fn from_labels(labels: HashMap<N, Label<N>>) -> Self {
        LabelSet { labels }
    }

    /// Returns the label of `node`, or `None` if it is unknown.
    pub fn get(&self, node: &N) -> Option<&Label<N>> {
        self.labels.get(node)
    }

    /// Returns the label of `node`.
    ///
    /// # Errors
    /// [OracleError::UnknownNode] if `node` is not part of the labeled tree.
    pub fn label(&self, node: &N) -> Result<&Label<N>> {
        self.labels
            .get(node)
            .ok_or_else(|| OracleError::unknown_node(node))
    }

    /// Returns the exact weighted distance between `x` and `y`.
    ///
    /// # Errors
    /// [OracleError::UnknownNode] if either node is not part of the labeled tree.
    ///
    /// # Panics
    /// Panics if the two labels share no pivot, which means the labels were
    /// not produced for a single connected tree.
    pub fn distance(&self, x: &N, y: &N) -> Result<f64> {
        let from = self.label(x)?;
        let to = self.label(y)?;
        Ok(query::query(from, to))
    }

    /// Returns the number of labeled nodes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if no node is labeled (empty tree).
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns `true` if `node` has a label.
    pub fn contains(&self, node: &N) -> bool {
        self.labels.contains_key(node)
    }

    /// Iterates over all `(node, label)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, &Label<N>)> {
        self.labels.iter()
    }

    /// Returns the size of the largest label (`0` if empty).
    pub fn max_label_size(&self) -> usize {
        self.labels.values().map(Label::len).max().unwrap_or(0)
    }

    /// Returns the total number of label entries over all nodes.
    pub fn num_entries(&self) -> usize {
        self.labels.values().map(Label::len).sum()
    }

    /// Returns the first node whose label is larger than
    /// [`label_size_bound(num_nodes)`](label_size_bound), together with
    /// its label size.
    pub fn find_oversized(&self, num_nodes: usize) -> Option<(&N, usize)> {
        let bound = label_size_bound(num_nodes);
        self.labels
            .iter()
            .find(|(_, label)| label.len() > bound)
            .map(|(node, label)| (node, label.len()))
    }

    /// Asserts that every label holds at most `ceil(log2(num_nodes)) + 1`
    /// pivots. Diagnostic hook for tests, not a runtime gate.
    ///
    /// # Panics
    /// Panics naming the first oversized label.
    pub fn assert_label_size_bound(&self, num_nodes: usize) {
        if let Some((node, size)) = self.find_oversized(num_nodes) {
            panic!(
                "label of node {node:?} has size {size}, exceeding the bound {} for {num_nodes} nodes",
                label_size_bound(num_nodes)
            );
        }
    }
}

impl<N: Debug> fmt::Display for LabelSet<N> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "LabelSet ({} labels):", self.labels.len())?;
        for label in self.labels.values() {
            writeln!(f, "  {label}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_size_bound() {
        assert_eq!(label_size_bound(0), 0);
        assert_eq!(label_size_bound(1), 1);
        assert_eq!(label_size_bound(2), 2);
        assert_eq!(label_size_bound(3), 3);
        assert_eq!(label_size_bound(4), 3);
        assert_eq!(label_size_bound(5), 4);
        assert_eq!(label_size_bound(1024), 11);
        assert_eq!(label_size_bound(1025), 12);
    }

    #[test]
    fn test_label_lookup() {
        let label = Label::new('a', vec![('c', 3.5), ('a', 0.0)]);
        assert_eq!(label.owner(), &'a');
        assert_eq!(label.get(&'c'), Some(3.5));
        assert_eq!(label.get(&'b'), None);
        assert!(label.contains_pivot(&'a'));
        assert_eq!(label.pivots().collect::<Vec<_>>(), vec![&'c', &'a']);
        assert_eq!(label.to_string(), "'a': {'c': 3.5, 'a': 0}");
    }
}
