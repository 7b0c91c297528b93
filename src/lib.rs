//! Treedist is a library for exact distance queries on weighted trees
//! through compact distance labels.
//!
//! Preprocessing assigns every node of a tree a short *label*: a list of
//! pivot nodes together with the weighted distance to each of them. The
//! distance between any two nodes is then recovered from their two labels
//! alone, without walking the tree.
//!
//! Core functionality provided:
//! - Tree model: [WeightedTree] with non-negative [Weight]s on its edges,
//!   validated to be a tree before labeling.
//! - Centroid labeling: [build_labels] / [OracleBuilder] decompose the tree
//!   around centroids, giving labels of at most [`label_size_bound(n)`](label_size_bound)
//!   `= ceil(log2 n) + 1` entries for any tree shape.
//! - Rooted labeling: [build_rooted_labels] labels each node with its
//!   children and ancestors.
//! - Queries: [LabelSet::distance] or [distance].
//! - Loaders: [newick] strings/files and delimited [edge_list] files.
//! - Configurability:
//!   - Sequential or parallel construction (feature `parallel`)
//!   - Verification of the label size bound
//!
//! # Usage patterns
//! 1. The quick API functions in this module use default settings.
//! 2. Configure an [OracleBuilder] for control over construction.
//!
//! ## Example Default Configuration
//! ```
//! use treedist::{WeightedTree, build_labels, distance};
//!
//! let tree = WeightedTree::from_edges([(1, 2, 10.0), (1, 3, 20.0), (1, 4, 30.0), (1, 5, 40.0)])?;
//! let labels = build_labels(&tree)?;
//! assert_eq!(distance(&labels, &2, &5)?, 50.0);
//! # Ok::<(), treedist::OracleError>(())
//! ```
//!
//! ## Example Loading a Tree
//! ```
//! use treedist::{build_labels, parse_newick_str};
//!
//! let tree = parse_newick_str("((A:1,B:2)AB:3,C:4)R;").unwrap();
//! let labels = build_labels(&tree).unwrap();
//! assert_eq!(labels.distance(&"A".to_string(), &"C".to_string()).unwrap(), 8.0);
//! ```
//!
//! # Logging
//! Construction and loading emit [tracing] events (`debug` per build or
//! loaded input, `trace` per decomposition frame). No subscriber is
//! installed by the library.

pub mod edge_list;
pub mod error;
pub mod model;
pub mod newick;
pub mod oracle;
pub mod parser;

pub use error::OracleError;
pub use model::{Label, LabelSet, Weight, WeightedTree, label_size_bound};
pub use oracle::{OracleBuilder, build_labels, build_rooted_labels};

use parser::ParsingError;
use std::fmt::Debug;
use std::hash::Hash;
use std::path::Path;

// ============================================================================
// QUICK API (pub)
// ============================================================================
/// Returns the exact weighted distance between `x` and `y` from their labels.
///
/// # Errors
/// [OracleError::UnknownNode] if either node has no label.
///
/// # Panics
/// Panics if the two labels share no pivot (labels not built for one tree).
pub fn distance<N>(labels: &LabelSet<N>, x: &N, y: &N) -> Result<f64, OracleError>
where
    N: Clone + Eq + Hash + Debug,
{
    labels.distance(x, y)
}

/// Asserts that no label of a tree with `num_nodes` nodes exceeds
/// [`label_size_bound(num_nodes)`](label_size_bound). Test and diagnostic hook.
///
/// # Panics
/// Panics naming the first oversized label.
pub fn assert_label_size_bound<N>(labels: &LabelSet<N>, num_nodes: usize)
where
    N: Clone + Eq + Hash + Debug,
{
    labels.assert_label_size_bound(num_nodes);
}

/// Parses a single Newick string into a [WeightedTree], see [newick::parse_str].
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<WeightedTree<String>, ParsingError> {
    newick::parse_str(newick)
}

/// Reads a tab-separated edge list file, see [edge_list::read_edge_list_file].
pub fn read_edge_list_file<P: AsRef<Path>>(path: P) -> Result<WeightedTree<String>, ParsingError> {
    edge_list::read_edge_list_file(path)
}
