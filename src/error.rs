//! Error type for tree construction, label construction and queries.
//!
//! [OracleError] covers malformed input (the graph is not a tree) and
//! lookups of nodes that are not part of a [LabelSet](crate::LabelSet).
//! Violations of internal invariants of the decomposition are not errors:
//! they panic, since continuing would silently return wrong distances.

use thiserror::Error;

/// Errors that can occur while building or querying distance labels.
///
/// Nodes are reported by their `Debug` representation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    /// An edge connects a node to itself.
    #[error("self loop at node {node}")]
    SelfLoop { node: String },

    /// An edge weight is negative, NaN or infinite.
    #[error("invalid weight {weight} on edge {from} - {to}")]
    InvalidWeight {
        from: String,
        to: String,
        weight: f64,
    },

    /// The same pair of nodes was given two different weights.
    #[error("conflicting weights {first} and {second} on edge {from} - {to}")]
    ConflictingWeight {
        from: String,
        to: String,
        first: f64,
        second: f64,
    },

    /// An adjacency entry `from -> to` has no matching `to -> from` entry.
    #[error("edge {from} -> {to} has no reverse edge")]
    MissingReverseEdge { from: String, to: String },

    /// The graph contains a cycle through the given node.
    #[error("graph is not a tree: cycle through node {node}")]
    CycleDetected { node: String },

    /// The graph consists of more than one component.
    #[error("graph is not a tree: {reached} of {total} nodes reachable")]
    Disconnected { reached: usize, total: usize },

    /// The node is not part of the tree or label set.
    #[error("unknown node {0}")]
    UnknownNode(String),
}

impl OracleError {
    pub(crate) fn unknown_node<N: std::fmt::Debug>(node: &N) -> Self {
        OracleError::UnknownNode(format!("{node:?}"))
    }

    /// Returns `true` if this error reports input that is not a tree.
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, OracleError::UnknownNode(_))
    }
}

/// Result type alias for oracle operations.
pub type Result<T> = std::result::Result<T, OracleError>;
