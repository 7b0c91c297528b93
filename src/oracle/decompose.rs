//! Centroid decomposition driving the label construction.
//!
//! The tree is split by an explicit worklist of [Frame]s instead of
//! recursion. All frames share the arena of the input tree; a frame is
//! only a root and a size, its nodes being those reachable from the root
//! without entering an already processed centroid (marked in `removed`).
//!
//! Processing a frame:
//! 1. find its centroid ([find_centroid]),
//! 2. stamp `(centroid, distance)` into the label of every frame node
//!    ([stamp_from_centroid]),
//! 3. mark the centroid removed and queue one child frame per piece.
//!
//! Each frame is at most half the size of its parent frame, so a node is
//! part of at most `floor(log2 n) + 1` frames and gets as many entries.

use crate::model::tree::{Edge, NodeIndex};
use crate::oracle::centroid::find_centroid;
use crate::oracle::labeling::stamp_from_centroid;
use tracing::trace;

/// Pending part of the decomposition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Frame {
    /// Any node of the frame; the scan starts here
    pub root: NodeIndex,
    /// Number of nodes in the frame
    pub size: usize,
    /// Decomposition level, 0 for the whole tree
    pub depth: usize,
}

/// Structural problem found while traversing a frame.
///
/// Only reachable for input that is not a tree; reported with arena
/// indices and translated to [OracleError](crate::OracleError) by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum FrameError {
    /// More nodes reachable than the frame holds
    Cycle(NodeIndex),
    /// Fewer nodes reachable than the frame holds
    Disconnected { reached: usize, total: usize },
}

/// Outcome of processing a single frame.
#[derive(Debug)]
struct FrameOutcome {
    centroid: NodeIndex,
    /// Distance from the centroid for every frame node
    stamps: Vec<(NodeIndex, f64)>,
    children: Vec<Frame>,
}

/// Raw decomposition result: per node index, the `(pivot, distance)`
/// entries in decomposition order.
#[derive(Debug)]
pub(crate) struct Decomposition {
    pub labels: Vec<Vec<(NodeIndex, f64)>>,
    pub num_frames: usize,
    pub depth: usize,
}

impl Decomposition {
    fn new(num_nodes: usize) -> Self {
        Decomposition {
            labels: vec![Vec::new(); num_nodes],
            num_frames: 0,
            depth: 0,
        }
    }

    fn record(&mut self, frame: &Frame, outcome: &FrameOutcome) {
        for &(node, distance) in &outcome.stamps {
            self.labels[node].push((outcome.centroid, distance));
        }
        self.num_frames += 1;
        self.depth = self.depth.max(frame.depth + 1);
    }
}

fn process_frame(
    adjacency: &[Vec<Edge>],
    removed: &[bool],
    frame: &Frame,
) -> Result<FrameOutcome, FrameError> {
    let centroid = find_centroid(adjacency, removed, frame)?;
    let stamping = stamp_from_centroid(adjacency, removed, centroid.node);

    assert_eq!(
        stamping.stamps.len(),
        frame.size,
        "labeling from centroid {} reached {} of {} frame nodes",
        centroid.node,
        stamping.stamps.len(),
        frame.size
    );
    assert!(
        stamping.max_hops <= frame.size / 2,
        "centroid {} is {} hops from a node of a frame of {}",
        centroid.node,
        stamping.max_hops,
        frame.size
    );

    trace!(
        centroid = centroid.node,
        size = frame.size,
        depth = frame.depth,
        largest_piece = centroid.largest_piece,
        "processed decomposition frame"
    );

    let children = centroid
        .pieces
        .iter()
        .map(|&(root, size)| Frame {
            root,
            size,
            depth: frame.depth + 1,
        })
        .collect();

    Ok(FrameOutcome {
        centroid: centroid.node,
        stamps: stamping.stamps,
        children,
    })
}

/// Decomposes the tree given by `adjacency` one frame at a time.
pub(crate) fn decompose(adjacency: &[Vec<Edge>]) -> Result<Decomposition, FrameError> {
    let num_nodes = adjacency.len();
    let mut decomposition = Decomposition::new(num_nodes);
    if num_nodes == 0 {
        return Ok(decomposition);
    }

    let mut removed = vec![false; num_nodes];
    let mut worklist = vec![Frame {
        root: 0,
        size: num_nodes,
        depth: 0,
    }];

    while let Some(frame) = worklist.pop() {
        let outcome = process_frame(adjacency, &removed, &frame)?;
        decomposition.record(&frame, &outcome);
        removed[outcome.centroid] = true;
        worklist.extend(outcome.children);
    }

    Ok(decomposition)
}

/// Decomposes the tree given by `adjacency` level by level, processing the
/// frames of a level concurrently.
///
/// Frames of one level are disjoint and only read `removed`; the centroids
/// are marked once the whole level is done.
#[cfg(feature = "parallel")]
pub(crate) fn decompose_parallel(adjacency: &[Vec<Edge>]) -> Result<Decomposition, FrameError> {
    use rayon::prelude::*;

    let num_nodes = adjacency.len();
    let mut decomposition = Decomposition::new(num_nodes);
    if num_nodes == 0 {
        return Ok(decomposition);
    }

    let mut removed = vec![false; num_nodes];
    let mut level = vec![Frame {
        root: 0,
        size: num_nodes,
        depth: 0,
    }];

    while !level.is_empty() {
        let outcomes = level
            .par_iter()
            .map(|frame| process_frame(adjacency, &removed, frame))
            .collect::<Result<Vec<_>, _>>()?;

        let mut next_level = Vec::new();
        for (frame, outcome) in level.iter().zip(outcomes) {
            decomposition.record(frame, &outcome);
            removed[outcome.centroid] = true;
            next_level.extend(outcome.children);
        }
        level = next_level;
    }

    Ok(decomposition)
}
