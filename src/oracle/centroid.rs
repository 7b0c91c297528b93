//! Centroid selection for one decomposition frame.
//!
//! A centroid of a tree with `n` nodes is a node whose removal leaves
//! pieces of at most `⌊n/2⌋` nodes each. Every tree has one or two of them.
//! Since any path starting at the centroid stays within one piece, its
//! longest hop distance to another node is bounded by `⌊n/2⌋` as well.
//!
//! # Selection policy
//! Candidates are scanned in preorder from the frame root; the candidate
//! with the smallest largest piece wins, ties going to the first found.
//! Only centroids reach a largest piece of `≤ ⌊n/2⌋`, and when there are
//! two, both leave exactly `n/2`. So "first candidate within the bound"
//! and "global minimum" select the same node here.

use crate::model::tree::{Edge, NodeIndex};
use crate::oracle::decompose::{Frame, FrameError};

/// Parent position of the frame root during the preorder scan.
const NO_PARENT: usize = usize::MAX;

/// Result of the centroid search in a frame.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Centroid {
    /// Chosen node
    pub node: NodeIndex,
    /// Number of nodes in the largest piece left after removing `node`
    pub largest_piece: usize,
    /// Root and size of each piece left after removing `node`
    pub pieces: Vec<(NodeIndex, usize)>,
}

/// Finds the centroid of the frame, that is, of the nodes reachable from
/// `frame.root` without entering a `removed` node.
///
/// Runs in time linear in the frame size: a single preorder pass collects
/// the frame, subtree sizes are accumulated in reverse preorder.
///
/// # Errors
/// * [FrameError::Cycle] if more than `frame.size` nodes are reachable
/// * [FrameError::Disconnected] if fewer are reachable
///
/// # Panics
/// Panics if the chosen node leaves a piece larger than `⌊frame.size/2⌋`.
pub(crate) fn find_centroid(
    adjacency: &[Vec<Edge>],
    removed: &[bool],
    frame: &Frame,
) -> Result<Centroid, FrameError> {
    let size = frame.size;

    // Preorder scan; the parent is skipped instead of tracking visited nodes
    let mut order: Vec<NodeIndex> = Vec::with_capacity(size);
    let mut parent_pos: Vec<usize> = Vec::with_capacity(size);
    let mut stack = vec![(frame.root, NO_PARENT)];

    while let Some((node, parent)) = stack.pop() {
        if order.len() == size {
            return Err(FrameError::Cycle(node));
        }
        let pos = order.len();
        order.push(node);
        parent_pos.push(parent);

        let parent_node = (parent != NO_PARENT).then(|| order[parent]);
        for edge in &adjacency[node] {
            if Some(edge.target) != parent_node && !removed[edge.target] {
                stack.push((edge.target, pos));
            }
        }
    }

    if order.len() < size {
        return Err(FrameError::Disconnected {
            reached: order.len(),
            total: size,
        });
    }

    // Subtree sizes and heaviest child per preorder position
    let mut subtree = vec![1usize; size];
    let mut heaviest_child = vec![0usize; size];
    for pos in (1..size).rev() {
        let parent = parent_pos[pos];
        subtree[parent] += subtree[pos];
        heaviest_child[parent] = heaviest_child[parent].max(subtree[pos]);
    }

    let (best, largest_piece) = (0..size)
        .map(|pos| (pos, heaviest_child[pos].max(size - subtree[pos])))
        .min_by_key(|&(_, piece)| piece)
        .unwrap_or((0, 0));

    assert!(
        largest_piece <= size / 2,
        "centroid {} leaves a piece of {largest_piece} nodes in a frame of {size}",
        order[best]
    );

    let mut pieces: Vec<(NodeIndex, usize)> = (best + 1..size)
        .filter(|&pos| parent_pos[pos] == best)
        .map(|pos| (order[pos], subtree[pos]))
        .collect();
    if best != 0 {
        pieces.push((order[parent_pos[best]], size - subtree[best]));
    }

    Ok(Centroid {
        node: order[best],
        largest_piece,
        pieces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeightedTree;

    fn frame_of(tree: &WeightedTree<u32>) -> Frame {
        Frame {
            root: 0,
            size: tree.num_nodes(),
            depth: 0,
        }
    }

    #[test]
    fn test_single_node_is_own_centroid() {
        let mut tree = WeightedTree::new();
        tree.add_node(7u32);
        let removed = vec![false];
        let centroid = find_centroid(tree.adjacency(), &removed, &frame_of(&tree)).unwrap();
        assert_eq!(centroid.node, 0);
        assert_eq!(centroid.largest_piece, 0);
        assert!(centroid.pieces.is_empty());
    }

    #[test]
    fn test_chain_picks_middle() {
        // 1 - 2 - 3 - 4 - 5, indices 0..5
        let tree =
            WeightedTree::from_edges([(1u32, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0), (4, 5, 1.0)])
                .unwrap();
        let removed = vec![false; 5];
        let centroid = find_centroid(tree.adjacency(), &removed, &frame_of(&tree)).unwrap();
        assert_eq!(tree[centroid.node], 3);
        assert_eq!(centroid.largest_piece, 2);

        let mut pieces = centroid.pieces.clone();
        pieces.sort();
        assert_eq!(pieces, vec![(1, 2), (3, 2)]);
    }

    #[test]
    fn test_even_chain_takes_first_of_two_centroids() {
        // 1 - 2 - 3 - 4: both 2 and 3 leave pieces of size 2
        let tree = WeightedTree::from_edges([(1u32, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)]).unwrap();
        let removed = vec![false; 4];
        let centroid = find_centroid(tree.adjacency(), &removed, &frame_of(&tree)).unwrap();
        assert_eq!(tree[centroid.node], 2);
        assert_eq!(centroid.largest_piece, 2);
    }

    #[test]
    fn test_star_picks_center_from_leaf_root() {
        let tree =
            WeightedTree::from_edges([(2u32, 1, 1.0), (1, 3, 1.0), (1, 4, 1.0), (1, 5, 1.0)])
                .unwrap();
        let removed = vec![false; 5];
        let centroid = find_centroid(tree.adjacency(), &removed, &frame_of(&tree)).unwrap();
        assert_eq!(tree[centroid.node], 1);
        assert_eq!(centroid.largest_piece, 1);
        assert_eq!(centroid.pieces.len(), 4);
    }

    #[test]
    fn test_removed_nodes_bound_the_frame() {
        // 1 - 2 - 3 - 4 - 5 with 3 removed: frame rooted at 4 is {4, 5}
        let tree =
            WeightedTree::from_edges([(1u32, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0), (4, 5, 1.0)])
                .unwrap();
        let mut removed = vec![false; 5];
        removed[2] = true;
        let frame = Frame {
            root: 3,
            size: 2,
            depth: 1,
        };
        let centroid = find_centroid(tree.adjacency(), &removed, &frame).unwrap();
        assert_eq!(tree[centroid.node], 4);
        assert_eq!(centroid.pieces, vec![(4, 1)]);
    }

    #[test]
    fn test_frame_size_mismatch_is_reported() {
        let tree = WeightedTree::from_edges([(1u32, 2, 1.0), (2, 3, 1.0)]).unwrap();
        let removed = vec![false; 3];
        let too_small = Frame {
            root: 0,
            size: 2,
            depth: 0,
        };
        assert!(matches!(
            find_centroid(tree.adjacency(), &removed, &too_small),
            Err(FrameError::Cycle(_))
        ));
        let too_large = Frame {
            root: 0,
            size: 4,
            depth: 0,
        };
        assert_eq!(
            find_centroid(tree.adjacency(), &removed, &too_large),
            Err(FrameError::Disconnected {
                reached: 3,
                total: 4
            })
        );
    }
}
