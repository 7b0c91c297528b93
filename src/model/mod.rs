//! Data model of the distance oracle.
//!
//! # Tree representation
//! Input trees are represented by [WeightedTree], which uses the arena
//! pattern to store node identifiers and their adjacency lists of [Edge]s,
//! referenced by [NodeIndex]. Edge weights are non-negative [Weight]s.
//!
//! # Labels
//! The output of preprocessing is a [LabelSet], mapping every node to its
//! [Label]. A label lists pivot nodes and the distance to each of them:
//!
//! | Builder | Pivots of a node | Label size |
//! |---------|------------------|------------|
//! | [build_labels](crate::build_labels) | centroids of all decomposition frames containing it | `≤ ceil(log2 n) + 1` |
//! | [build_rooted_labels](crate::build_rooted_labels) | itself, its children and all ancestors | `depth + 1 + #children` |

pub mod label;
pub mod tree;
pub mod weight;

pub use label::Label;
pub use label::LabelSet;
pub use label::label_size_bound;
pub use tree::Edge;
pub use tree::NodeIndex;
pub use tree::WeightedTree;
pub use weight::Weight;
