//! Construction of distance labels and the distance query.
//!
//! The default construction ([build_labels], [OracleBuilder]) uses
//! centroid decomposition: the centroid of the tree becomes a pivot of
//! every node, then each piece left after removing it is labeled the same
//! way. As each piece holds at most half of the nodes, every label has at
//! most [`label_size_bound(n)`](crate::label_size_bound) entries, for any
//! tree shape.
//!
//! [build_rooted_labels] is the simpler ancestor labeling of a rooted tree.
//! It is exact as well, but its labels are only short for balanced trees.
//!
//! # Example
//! ```
//! use treedist::{OracleBuilder, WeightedTree};
//!
//! let tree = WeightedTree::from_edges([(1, 2, 10.0), (1, 3, 20.0), (1, 4, 30.0)]).unwrap();
//! let labels = OracleBuilder::new()
//!     .sequential()
//!     .with_verification(true)
//!     .build(&tree)
//!     .unwrap();
//! assert_eq!(labels.distance(&2, &4).unwrap(), 40.0);
//! ```

pub(crate) mod centroid;
pub(crate) mod decompose;
pub(crate) mod labeling;
pub mod query;
pub mod rooted;

pub use query::query;
pub use rooted::build_rooted_labels;

use crate::error::{OracleError, Result};
use crate::model::{Label, LabelSet, WeightedTree};
use decompose::{Decomposition, FrameError};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// How [OracleBuilder] processes the decomposition frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstructionMode {
    /// One frame after the other on the calling thread
    #[default]
    Sequential,
    /// All frames of a decomposition level concurrently on the rayon pool
    #[cfg(feature = "parallel")]
    Parallel,
}

// =#========================================================================#=
// ORACLE BUILDER
// =#========================================================================#=
/// Builder for configuring the label construction of a tree.
///
/// # Configuration Options
///
/// * **Construction mode**:
///   - [sequential()](OracleBuilder::sequential) - single-threaded (default)
///   - [parallel()](OracleBuilder::parallel) - frames of one decomposition
///     level on the rayon thread pool (feature `parallel`)
///
/// * **Verification**: [with_verification()](OracleBuilder::with_verification)
///   checks every label against the size bound after construction
///   (default on in debug builds only).
///
/// Both modes produce identical labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleBuilder {
    mode: ConstructionMode,
    verify: bool,
}

impl Default for OracleBuilder {
    fn default() -> Self {
        OracleBuilder {
            mode: ConstructionMode::Sequential,
            verify: cfg!(debug_assertions),
        }
    }
}

// ============================================================================
// Configuration (pub)
// ============================================================================
impl OracleBuilder {
    /// Creates a builder with default settings: sequential, verified in
    /// debug builds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure **sequential** construction (default).
    pub fn sequential(mut self) -> Self {
        self.mode = ConstructionMode::Sequential;
        self
    }

    /// Configure **parallel** construction: the frames of each decomposition
    /// level are processed concurrently, their stamps merged once the level
    /// is done.
    #[cfg(feature = "parallel")]
    pub fn parallel(mut self) -> Self {
        self.mode = ConstructionMode::Parallel;
        self
    }

    /// Configure whether finished labels are checked against
    /// [`label_size_bound`](crate::label_size_bound).
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Returns the configured construction mode.
    pub fn mode(&self) -> ConstructionMode {
        self.mode
    }

    /// Returns whether finished labels are checked against the size bound.
    pub fn verifies(&self) -> bool {
        self.verify
    }

    // ============================================================================
    // Building (pub)
    // ============================================================================
    /// Builds the labels of all nodes of `tree`.
    ///
    /// This method:
    /// 1. Validates that `tree` is a tree (acyclic and connected)
    /// 2. Runs the centroid decomposition in the configured mode
    /// 3. Translates arena indices back to node identifiers
    /// 4. If configured, verifies the label size bound
    ///
    /// # Arguments
    /// * `tree` - The weighted tree to label
    ///
    /// # Returns
    /// A [LabelSet] with one label per node (empty for the empty tree)
    ///
    /// # Errors
    /// Malformed input, see [WeightedTree::validate]. Nothing is built then.
    ///
    /// # Panics
    /// Panics if an internal invariant of the decomposition is violated
    /// (centroid bound, missing self entry, label size bound).
    pub fn build<N>(&self, tree: &WeightedTree<N>) -> Result<LabelSet<N>>
    where
        N: Clone + Eq + Hash + Debug,
    {
        tree.validate()?;

        debug!(
            nodes = tree.num_nodes(),
            mode = ?self.mode,
            "building centroid labels"
        );

        let decomposition = match self.mode {
            ConstructionMode::Sequential => decompose::decompose(tree.adjacency()),
            #[cfg(feature = "parallel")]
            ConstructionMode::Parallel => decompose::decompose_parallel(tree.adjacency()),
        }
        .map_err(|err| frame_error_to_oracle_error(tree, err))?;

        let num_frames = decomposition.num_frames;
        let depth = decomposition.depth;
        let labels = into_label_set(tree, decomposition);

        if self.verify {
            labels.assert_label_size_bound(tree.num_nodes());
        }

        debug!(
            nodes = tree.num_nodes(),
            frames = num_frames,
            depth,
            max_label_size = labels.max_label_size(),
            entries = labels.num_entries(),
            "built centroid labels"
        );

        Ok(labels)
    }
}

// ============================================================================
// Helpers (private)
// ============================================================================
fn frame_error_to_oracle_error<N: Debug>(tree: &WeightedTree<N>, err: FrameError) -> OracleError {
    match err {
        FrameError::Cycle(index) => OracleError::CycleDetected {
            node: format!("{:?}", tree[index]),
        },
        FrameError::Disconnected { reached, total } => {
            OracleError::Disconnected { reached, total }
        }
    }
}

fn into_label_set<N>(tree: &WeightedTree<N>, decomposition: Decomposition) -> LabelSet<N>
where
    N: Clone + Eq + Hash + Debug,
{
    let mut labels = HashMap::with_capacity(tree.num_nodes());

    for (index, entries) in decomposition.labels.into_iter().enumerate() {
        // The node becomes a centroid in the last frame it is part of
        assert_eq!(
            entries.last(),
            Some(&(index, 0.0)),
            "label of node {:?} does not end with its self entry",
            tree[index]
        );

        let owner = tree[index].clone();
        let entries = entries
            .into_iter()
            .map(|(pivot, distance)| (tree[pivot].clone(), distance))
            .collect();
        labels.insert(owner.clone(), Label::new(owner, entries));
    }

    LabelSet::from_labels(labels)
}

// =#========================================================================#=
// QUICK API
// =#========================================================================#=
/// Builds the centroid labels of all nodes of `tree` with default settings.
///
/// Same as `OracleBuilder::new().build(tree)`, see [OracleBuilder::build].
///
/// # Example
/// ```
/// use treedist::{WeightedTree, build_labels};
///
/// let tree = WeightedTree::from_edges([(1, 2, 10.0)]).unwrap();
/// let labels = build_labels(&tree).unwrap();
/// assert_eq!(labels.distance(&1, &2).unwrap(), 10.0);
/// ```
pub fn build_labels<N>(tree: &WeightedTree<N>) -> Result<LabelSet<N>>
where
    N: Clone + Eq + Hash + Debug,
{
    OracleBuilder::new().build(tree)
}
