//! Ancestor labeling of a rooted tree.
//!
//! The label of a node holds the node itself, its children and every
//! ancestor up to the root. The lowest common ancestor of two nodes is in
//! both labels and lies on the path between them, so the query of
//! [query](crate::oracle::query) is exact on these labels too.
//!
//! The label of a node at depth `d` with `k` children has `1 + k + d`
//! entries: logarithmic for balanced binary trees, linear for a chain.

use crate::error::{OracleError, Result};
use crate::model::tree::NodeIndex;
use crate::model::{Label, LabelSet, WeightedTree};
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// Builds the ancestor labels of all nodes of `tree` rooted at `root`.
///
/// Entries are ordered: the node itself, its children, its ancestors from
/// the parent up to the root.
///
/// # Errors
/// * [OracleError::UnknownNode] if `root` is not part of `tree`
/// * malformed input, see [WeightedTree::validate]
///
/// # Example
/// ```
/// use treedist::{WeightedTree, build_rooted_labels};
///
/// let tree = WeightedTree::from_edges([(1, 2, 2.0), (1, 3, 5.0)]).unwrap();
/// let labels = build_rooted_labels(&tree, &1).unwrap();
/// assert_eq!(labels.get(&2).unwrap().to_string(), "2: {2: 0, 1: 2}");
/// assert_eq!(labels.distance(&2, &3).unwrap(), 7.0);
/// ```
pub fn build_rooted_labels<N>(tree: &WeightedTree<N>, root: &N) -> Result<LabelSet<N>>
where
    N: Clone + Eq + Hash + Debug,
{
    let root = tree
        .index_of(root)
        .ok_or_else(|| OracleError::unknown_node(root))?;
    tree.validate()?;

    // Parent and weight of the connecting edge, None for the root
    let mut parent: Vec<Option<(NodeIndex, f64)>> = vec![None; tree.num_nodes()];
    let mut labels = HashMap::with_capacity(tree.num_nodes());
    let mut queue = VecDeque::from([root]);
    let mut max_depth = 0;

    while let Some(index) = queue.pop_front() {
        let mut label = Label::new(tree[index].clone(), vec![(tree[index].clone(), 0.0)]);

        let parent_index = parent[index].map(|(p, _)| p);
        for edge in tree.neighbors(index) {
            if Some(edge.target) == parent_index {
                continue;
            }
            label.push(tree[edge.target].clone(), *edge.weight);
            parent[edge.target] = Some((index, *edge.weight));
            queue.push_back(edge.target);
        }

        let mut depth = 0;
        let mut distance = 0.0;
        let mut current = index;
        while let Some((ancestor, weight)) = parent[current] {
            distance += weight;
            depth += 1;
            label.push(tree[ancestor].clone(), distance);
            current = ancestor;
        }
        max_depth = usize::max(max_depth, depth);

        labels.insert(tree[index].clone(), label);
    }

    let labels = LabelSet::from_labels(labels);
    debug!(
        nodes = tree.num_nodes(),
        depth = max_depth,
        max_label_size = labels.max_label_size(),
        "built rooted labels"
    );
    Ok(labels)
}
