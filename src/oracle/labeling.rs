//! Distance stamping from a frame's centroid.

use crate::model::tree::{Edge, NodeIndex};
use std::collections::VecDeque;

/// Distances from one centroid to every node of its frame.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Stamping {
    /// `(node, weighted distance from the centroid)`, centroid first
    pub stamps: Vec<(NodeIndex, f64)>,
    /// Largest hop count from the centroid to a frame node
    pub max_hops: usize,
}

/// Walks the frame breadth-first from `centroid`, accumulating edge weights
/// (and hop counts), without entering `removed` nodes.
///
/// In a tree the path found is the only one, so the accumulated weight is
/// the exact distance.
pub(crate) fn stamp_from_centroid(
    adjacency: &[Vec<Edge>],
    removed: &[bool],
    centroid: NodeIndex,
) -> Stamping {
    let mut stamps = Vec::new();
    let mut max_hops = 0;
    let mut queue = VecDeque::from([(centroid, centroid, 0.0, 0usize)]);

    while let Some((node, parent, distance, hops)) = queue.pop_front() {
        stamps.push((node, distance));
        max_hops = max_hops.max(hops);

        for edge in &adjacency[node] {
            if edge.target != parent && !removed[edge.target] {
                queue.push_back((edge.target, node, distance + *edge.weight, hops + 1));
            }
        }
    }

    Stamping { stamps, max_hops }
}
