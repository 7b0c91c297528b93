//! Weighted tree representation.
//!
//! Provides the input model of the distance oracle:
//! * [`WeightedTree<N>`] - undirected weighted graph using the arena pattern,
//!   validated to be a tree before labels are built
//! * [Edge] as adjacency entry
//! * [NodeIndex] as type used to index nodes in the arena

use crate::error::{OracleError, Result};
use crate::model::weight::Weight;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt::Debug;
use std::hash::Hash;

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

/// Adjacency entry: the far endpoint of an edge and its weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Index of the adjacent node
    pub target: NodeIndex,
    /// Weight of the edge
    pub weight: Weight,
}

// =$========================================================================$=
// WEIGHTED TREE
// =$========================================================================$=
/// An undirected graph with weighted edges, represented using the arena
/// pattern, that is expected to form a single tree.
///
/// Nodes are arbitrary identifiers `N`, stored once in a contiguous vector
/// and referenced by [NodeIndex] in insertion order. Adjacency lists hold
/// [Edge]s in both directions, so the edge relation is symmetric by
/// construction.
///
/// # Structure
/// - Each node identifier appears once; [`add_node`](WeightedTree::add_node)
///   is idempotent.
/// - Each undirected edge appears once in the adjacency list of each
///   endpoint, with the same [Weight].
/// - Self loops are rejected.
///
/// Acyclicity and connectivity are not enforced while adding edges;
/// test them with [`validate()`](WeightedTree::validate).
///
/// # Example
/// ```
/// use treedist::WeightedTree;
///
/// let tree = WeightedTree::from_edges([(1, 2, 10.0), (2, 3, 20.0)]).unwrap();
/// assert_eq!(tree.num_nodes(), 3);
/// assert_eq!(tree.path_distance(&1, &3).unwrap(), 30.0);
/// ```
#[derive(Debug, Clone)]
pub struct WeightedTree<N> {
    /// Node identifiers (arena)
    nodes: Vec<N>,

    /// Reverse lookup from identifier to arena index
    index_of: HashMap<N, NodeIndex>,

    /// Adjacency lists, parallel to `nodes`
    adjacency: Vec<Vec<Edge>>,

    /// Number of undirected edges
    num_edges: usize,
}

impl<N> Default for WeightedTree<N> {
    fn default() -> Self {
        WeightedTree {
            nodes: Vec::new(),
            index_of: HashMap::new(),
            adjacency: Vec::new(),
            num_edges: 0,
        }
    }
}

// ============================================================================
// New, Construction (pub)
// ============================================================================
impl<N: Clone + Eq + Hash + Debug> WeightedTree<N> {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty tree with capacity for `num_nodes` nodes.
    pub fn with_capacity(num_nodes: usize) -> Self {
        WeightedTree {
            nodes: Vec::with_capacity(num_nodes),
            index_of: HashMap::with_capacity(num_nodes),
            adjacency: Vec::with_capacity(num_nodes),
            num_edges: 0,
        }
    }

    /// Builds a tree from undirected `(node, node, weight)` triples.
    ///
    /// # Errors
    /// See [`add_edge`](WeightedTree::add_edge).
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, N, f64)>,
    {
        let mut tree = Self::new();
        for (a, b, weight) in edges {
            tree.add_edge(a, b, weight)?;
        }
        Ok(tree)
    }

    /// Builds a tree from a mapping of each node to its neighbors and the
    /// weight of the connecting edge.
    ///
    /// Every entry `a -> b` must be matched by an entry `b -> a` with the same
    /// weight. Nodes without neighbors are kept as isolated nodes.
    ///
    /// # Errors
    /// * [OracleError::MissingReverseEdge] if an entry has no reverse entry
    /// * [OracleError::ConflictingWeight] if both directions disagree
    /// * [OracleError::SelfLoop], [OracleError::InvalidWeight] as for
    ///   [`add_edge`](WeightedTree::add_edge)
    pub fn from_adjacency<I, A>(adjacency: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, A)>,
        A: IntoIterator<Item = (N, f64)>,
    {
        let mut tree = Self::new();
        let mut entries: Vec<(NodeIndex, NodeIndex, f64)> = Vec::new();
        let mut directed: HashMap<(NodeIndex, NodeIndex), f64> = HashMap::new();

        for (node, neighbors) in adjacency {
            let from = tree.add_node(node);
            for (neighbor, weight) in neighbors {
                let to = tree.add_node(neighbor);
                entries.push((from, to, weight));
                directed.insert((from, to), weight);
            }
        }

        for (from, to, weight) in entries {
            if from == to {
                return Err(OracleError::SelfLoop {
                    node: format!("{:?}", tree.nodes[from]),
                });
            }
            match directed.get(&(to, from)) {
                None => {
                    return Err(OracleError::MissingReverseEdge {
                        from: format!("{:?}", tree.nodes[from]),
                        to: format!("{:?}", tree.nodes[to]),
                    });
                }
                Some(&reverse) if reverse.to_bits() != weight.to_bits() => {
                    return Err(OracleError::ConflictingWeight {
                        from: format!("{:?}", tree.nodes[from]),
                        to: format!("{:?}", tree.nodes[to]),
                        first: weight,
                        second: reverse,
                    });
                }
                Some(_) => tree.link(from, to, weight)?,
            }
        }

        Ok(tree)
    }

    /// Adds a node if not present yet and returns its index.
    pub fn add_node(&mut self, node: N) -> NodeIndex {
        match self.index_of.entry(node) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let index = self.nodes.len();
                self.nodes.push(entry.key().clone());
                self.adjacency.push(Vec::new());
                entry.insert(index);
                index
            }
        }
    }

    /// Adds the undirected edge `a - b` with the given weight, adding
    /// missing endpoints as new nodes.
    ///
    /// Adding an existing edge again with the same weight has no effect.
    ///
    /// # Errors
    /// * [OracleError::SelfLoop] if `a == b`
    /// * [OracleError::InvalidWeight] if `weight` is negative, NaN or infinite
    /// * [OracleError::ConflictingWeight] if the edge exists with another weight
    pub fn add_edge(&mut self, a: N, b: N, weight: f64) -> Result<()> {
        if a == b {
            return Err(OracleError::SelfLoop {
                node: format!("{a:?}"),
            });
        }
        let a = self.add_node(a);
        let b = self.add_node(b);
        self.link(a, b, weight)
    }

    /// Adds the undirected edge between two existing nodes by index.
    pub(crate) fn link(&mut self, a: NodeIndex, b: NodeIndex, weight: f64) -> Result<()> {
        let Some(weight) = Weight::try_new(weight) else {
            return Err(OracleError::InvalidWeight {
                from: format!("{:?}", self.nodes[a]),
                to: format!("{:?}", self.nodes[b]),
                weight,
            });
        };

        if let Some(existing) = self.edge_weight_by_index(a, b) {
            if existing == weight {
                return Ok(());
            }
            return Err(OracleError::ConflictingWeight {
                from: format!("{:?}", self.nodes[a]),
                to: format!("{:?}", self.nodes[b]),
                first: *existing,
                second: *weight,
            });
        }

        self.adjacency[a].push(Edge { target: b, weight });
        self.adjacency[b].push(Edge { target: a, weight });
        self.num_edges += 1;
        Ok(())
    }
}

// ============================================================================
// Getters / Accessors (pub)
// ============================================================================
impl<N> WeightedTree<N> {
    /// Returns the number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the identifier of the node at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> &N {
        &self.nodes[index]
    }

    /// Returns all node identifiers in arena order.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Returns the edges incident to the node at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn neighbors(&self, index: NodeIndex) -> &[Edge] {
        &self.adjacency[index]
    }

    /// Returns the adjacency lists of all nodes, indexed by [NodeIndex].
    pub fn adjacency(&self) -> &[Vec<Edge>] {
        &self.adjacency
    }

    /// Iterates over all undirected edges once, as `(a, b, weight)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, Weight)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(a, edges)| {
            edges
                .iter()
                .filter(move |edge| a < edge.target)
                .map(move |edge| (a, edge.target, edge.weight))
        })
    }

    fn edge_weight_by_index(&self, a: NodeIndex, b: NodeIndex) -> Option<Weight> {
        self.adjacency[a]
            .iter()
            .find(|edge| edge.target == b)
            .map(|edge| edge.weight)
    }
}

impl<N: Eq + Hash + Debug> WeightedTree<N> {
    /// Returns the index of `node`, or `None` if it is not in the tree.
    pub fn index_of(&self, node: &N) -> Option<NodeIndex> {
        self.index_of.get(node).copied()
    }

    /// Returns `true` if `node` is in the tree.
    pub fn contains(&self, node: &N) -> bool {
        self.index_of.contains_key(node)
    }

    /// Returns the weight of the edge `a - b`, or `None` if there is none.
    pub fn edge_weight(&self, a: &N, b: &N) -> Option<Weight> {
        let a = self.index_of(a)?;
        let b = self.index_of(b)?;
        self.edge_weight_by_index(a, b)
    }

    /// Computes the weighted distance between two nodes by walking the tree,
    /// summing edge weights along the path found.
    ///
    /// This is the ground truth the labels are checked against; it costs a
    /// full traversal per call.
    ///
    /// # Errors
    /// * [OracleError::UnknownNode] if either node is not in the tree
    /// * [OracleError::Disconnected] if `to` is not reachable from `from`
    pub fn path_distance(&self, from: &N, to: &N) -> Result<f64> {
        let start = self
            .index_of(from)
            .ok_or_else(|| OracleError::unknown_node(from))?;
        let target = self
            .index_of(to)
            .ok_or_else(|| OracleError::unknown_node(to))?;

        let mut distance: Vec<Option<f64>> = vec![None; self.num_nodes()];
        let mut stack = vec![(start, 0.0)];
        distance[start] = Some(0.0);
        let mut reached = 1;

        while let Some((index, dist)) = stack.pop() {
            if index == target {
                return Ok(dist);
            }
            for edge in &self.adjacency[index] {
                if distance[edge.target].is_none() {
                    let next = dist + *edge.weight;
                    distance[edge.target] = Some(next);
                    reached += 1;
                    stack.push((edge.target, next));
                }
            }
        }

        Err(OracleError::Disconnected {
            reached,
            total: self.num_nodes(),
        })
    }

    /// Validates that the graph is a tree: acyclic and connected.
    ///
    /// The empty graph and a single node are valid trees.
    ///
    /// # Errors
    /// * [OracleError::CycleDetected] naming a node on a cycle
    /// * [OracleError::Disconnected] if some node is not reachable from the first
    pub fn validate(&self) -> Result<()> {
        let n = self.num_nodes();
        let mut visited = vec![false; n];
        let mut reached_from_first = 0;
        let mut stack: Vec<(NodeIndex, Option<NodeIndex>)> = Vec::new();

        for start in 0..n {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            stack.push((start, None));
            let mut reached = 1;

            while let Some((index, parent)) = stack.pop() {
                for edge in &self.adjacency[index] {
                    if Some(edge.target) == parent {
                        continue;
                    }
                    if visited[edge.target] {
                        return Err(OracleError::CycleDetected {
                            node: format!("{:?}", self.nodes[edge.target]),
                        });
                    }
                    visited[edge.target] = true;
                    reached += 1;
                    stack.push((edge.target, Some(index)));
                }
            }

            if start == 0 {
                reached_from_first = reached;
            }
        }

        if reached_from_first < n {
            return Err(OracleError::Disconnected {
                reached: reached_from_first,
                total: n,
            });
        }

        debug_assert!(n == 0 || self.num_edges + 1 == n);
        Ok(())
    }

    /// Returns whether the graph is a tree, see [`validate()`](WeightedTree::validate).
    pub fn is_tree(&self) -> bool {
        self.validate().is_ok()
    }
}

impl<N> std::ops::Index<NodeIndex> for WeightedTree<N> {
    type Output = N;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_listed_once() {
        let tree = WeightedTree::from_edges([("a", "b", 1.0), ("b", "c", 2.0)]).unwrap();
        let edges: Vec<_> = tree.edges().collect();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0], (0, 1, Weight::new(1.0)));
        assert_eq!(edges[1], (1, 2, Weight::new(2.0)));
    }

    #[test]
    fn test_cycle_in_second_component_is_reported() {
        let mut tree = WeightedTree::new();
        tree.add_node(0);
        tree.add_edge(1, 2, 1.0).unwrap();
        tree.add_edge(2, 3, 1.0).unwrap();
        tree.add_edge(3, 1, 1.0).unwrap();
        assert!(matches!(
            tree.validate(),
            Err(OracleError::CycleDetected { .. })
        ));
    }
}
