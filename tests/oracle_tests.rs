use std::collections::HashMap;
use treedist::{
    LabelSet, OracleBuilder, OracleError, WeightedTree, assert_label_size_bound, build_labels,
    build_rooted_labels, distance, label_size_bound,
};

fn unit_tree(edges: &[(u32, u32)]) -> WeightedTree<u32> {
    WeightedTree::from_edges(edges.iter().map(|&(a, b)| (a, b, 1.0))).unwrap()
}

fn balanced_binary_tree() -> WeightedTree<u32> {
    unit_tree(&[
        (1, 2),
        (1, 3),
        (2, 4),
        (2, 5),
        (3, 6),
        (3, 7),
        (4, 8),
        (4, 9),
        (5, 10),
        (5, 11),
        (6, 12),
        (6, 13),
    ])
}

fn as_maps(labels: &LabelSet<u32>) -> HashMap<u32, HashMap<u32, f64>> {
    labels
        .iter()
        .map(|(node, label)| (*node, label.to_map()))
        .collect()
}

/// Checks every pair against the distance found by walking the tree.
fn assert_matches_ground_truth(tree: &WeightedTree<u32>, labels: &LabelSet<u32>) {
    for x in tree.nodes() {
        for y in tree.nodes() {
            let expected = tree.path_distance(x, y).unwrap();
            let actual = labels.distance(x, y).unwrap();
            assert!(
                (expected - actual).abs() < 1e-9,
                "d({x}, {y}): labels {actual}, tree {expected}"
            );
        }
    }
}

// ============= Centroid labels =============

#[test]
fn test_two_nodes() {
    let tree = WeightedTree::from_edges([(1, 2, 10.0)]).unwrap();
    let labels = build_labels(&tree).unwrap();
    assert_eq!(distance(&labels, &1, &2).unwrap(), 10.0);
}

#[test]
fn test_chain() {
    let tree = WeightedTree::from_edges([(1, 2, 10.0), (2, 3, 20.0)]).unwrap();
    let labels = build_labels(&tree).unwrap();
    assert_eq!(distance(&labels, &1, &3).unwrap(), 30.0);
}

#[test]
fn test_star() {
    let tree = WeightedTree::from_edges([
        (1, 2, 10.0),
        (1, 3, 20.0),
        (1, 4, 30.0),
        (1, 5, 40.0),
    ])
    .unwrap();
    let labels = build_labels(&tree).unwrap();
    assert_eq!(distance(&labels, &2, &5).unwrap(), 50.0);

    // The center is the only centroid and the first pivot of everyone
    for (_, label) in labels.iter() {
        assert_eq!(label.pivots().next(), Some(&1));
    }
}

#[test]
fn test_single_node() {
    let mut tree = WeightedTree::new();
    tree.add_node(1u32);
    let labels = build_labels(&tree).unwrap();
    assert_eq!(
        as_maps(&labels),
        HashMap::from([(1, HashMap::from([(1, 0.0)]))])
    );
}

#[test]
fn test_empty_tree() {
    let tree: WeightedTree<u32> = WeightedTree::new();
    let labels = build_labels(&tree).unwrap();
    assert!(labels.is_empty());
    assert_eq!(labels.max_label_size(), 0);
}

#[test]
fn test_balanced_binary_tree() {
    let tree = balanced_binary_tree();
    let labels = build_labels(&tree).unwrap();
    assert_eq!(distance(&labels, &8, &13).unwrap(), 6.0);
    assert_eq!(distance(&labels, &3, &9).unwrap(), 4.0);
    assert_matches_ground_truth(&tree, &labels);
    assert_label_size_bound(&labels, tree.num_nodes());
}

#[test]
fn test_label_invariants() {
    let tree = balanced_binary_tree();
    let labels = build_labels(&tree).unwrap();
    assert_eq!(labels.len(), 13);

    for node in tree.nodes() {
        let label = labels.label(node).unwrap();
        assert_eq!(label.owner(), node);
        assert_eq!(label.get(node), Some(0.0));
        assert!(label.len() <= label_size_bound(13));
        assert_eq!(distance(&labels, node, node).unwrap(), 0.0);
        for other in tree.nodes() {
            assert_eq!(
                distance(&labels, node, other).unwrap(),
                distance(&labels, other, node).unwrap()
            );
        }
    }
}

#[test]
fn test_long_chain_stays_within_bound() {
    let tree = WeightedTree::from_edges((0u32..999).map(|i| (i, i + 1, 0.5))).unwrap();
    let labels = build_labels(&tree).unwrap();
    assert!(labels.max_label_size() <= label_size_bound(1000));
    assert_eq!(distance(&labels, &0, &999).unwrap(), 499.5);
    assert_eq!(distance(&labels, &250, &750).unwrap(), 250.0);
}

#[test]
fn test_zero_weight_edges() {
    let tree = WeightedTree::from_edges([(1u32, 2, 0.0), (2, 3, 0.0), (3, 4, 1.25)]).unwrap();
    let labels = build_labels(&tree).unwrap();
    assert_eq!(distance(&labels, &1, &3).unwrap(), 0.0);
    assert_eq!(distance(&labels, &1, &4).unwrap(), 1.25);
}

#[test]
fn test_rebuild_gives_same_distances() {
    let tree = balanced_binary_tree();
    let first = build_labels(&tree).unwrap();
    let second = OracleBuilder::new().with_verification(false).build(&tree).unwrap();
    for x in tree.nodes() {
        for y in tree.nodes() {
            assert_eq!(first.distance(x, y), second.distance(x, y));
        }
    }
}

#[test]
fn test_unknown_node() {
    let tree = WeightedTree::from_edges([(1, 2, 10.0)]).unwrap();
    let labels = build_labels(&tree).unwrap();
    assert_eq!(
        distance(&labels, &1, &3),
        Err(OracleError::UnknownNode("3".to_string()))
    );
    assert!(!distance(&labels, &3, &1).unwrap_err().is_malformed_input());
}

#[test]
fn test_cycle_is_rejected() {
    let tree = WeightedTree::from_edges([(1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0)]).unwrap();
    let err = build_labels(&tree).unwrap_err();
    assert!(matches!(err, OracleError::CycleDetected { .. }));
    assert!(err.is_malformed_input());
}

#[test]
fn test_forest_is_rejected() {
    let tree = unit_tree(&[(1, 2), (3, 4), (4, 5)]);
    assert_eq!(
        build_labels(&tree).unwrap_err(),
        OracleError::Disconnected {
            reached: 2,
            total: 5
        }
    );
}

#[test]
#[should_panic(expected = "exceeding the bound")]
fn test_size_bound_assertion_names_oversized_label() {
    // Rooted labels of a chain grow with the depth
    let tree = unit_tree(&[(1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 7)]);
    let labels = build_rooted_labels(&tree, &1).unwrap();
    assert_label_size_bound(&labels, tree.num_nodes());
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_sequential() {
    let tree = WeightedTree::from_edges((1u32..500).map(|i| (i / 4, i, f64::from(i % 11)))).unwrap();
    let sequential = OracleBuilder::new().sequential().build(&tree).unwrap();
    let parallel = OracleBuilder::new().parallel().build(&tree).unwrap();
    for node in tree.nodes() {
        assert_eq!(sequential.get(node), parallel.get(node));
    }
    assert_matches_ground_truth(&tree, &parallel);
}

// ============= Rooted labels =============

#[test]
fn test_rooted_balanced_binary_tree() {
    let tree = balanced_binary_tree();
    let labels = build_rooted_labels(&tree, &1).unwrap();
    assert_eq!(distance(&labels, &1, &2).unwrap(), 1.0);
    assert_eq!(distance(&labels, &1, &4).unwrap(), 2.0);
    assert_eq!(distance(&labels, &1, &9).unwrap(), 3.0);
    assert_eq!(distance(&labels, &3, &9).unwrap(), 4.0);
    assert_eq!(distance(&labels, &8, &13).unwrap(), 6.0);
    assert_matches_ground_truth(&tree, &labels);
}

#[test]
fn test_rooted_single_node() {
    let mut tree = WeightedTree::new();
    tree.add_node(1u32);
    let labels = build_rooted_labels(&tree, &1).unwrap();
    assert_eq!(
        as_maps(&labels),
        HashMap::from([(1, HashMap::from([(1, 0.0)]))])
    );
}

#[test]
fn test_rooted_three_nodes() {
    let tree = unit_tree(&[(1, 2), (1, 3)]);
    let labels = build_rooted_labels(&tree, &1).unwrap();
    let expected = [
        (1, 1, 0.0),
        (1, 2, 1.0),
        (1, 3, 1.0),
        (2, 2, 0.0),
        (2, 1, 1.0),
        (2, 3, 2.0),
    ];
    for (x, y, d) in expected {
        assert_eq!(distance(&labels, &x, &y).unwrap(), d, "d({x}, {y})");
    }
}

#[test]
fn test_rooted_three_nodes_weighted() {
    let tree = WeightedTree::from_edges([(1u32, 2, 2.0), (1, 3, 5.0)]).unwrap();
    let labels = build_rooted_labels(&tree, &1).unwrap();
    let expected = [
        (1, 1, 0.0),
        (1, 2, 2.0),
        (1, 3, 5.0),
        (2, 2, 0.0),
        (2, 1, 2.0),
        (2, 3, 7.0),
    ];
    for (x, y, d) in expected {
        assert_eq!(distance(&labels, &x, &y).unwrap(), d, "d({x}, {y})");
    }
}

#[test]
fn test_rooted_labels_of_any_root_are_exact() {
    let tree = WeightedTree::from_edges([
        (1u32, 2, 1.5),
        (2, 3, 2.0),
        (2, 4, 0.25),
        (4, 5, 3.0),
        (4, 6, 1.0),
    ])
    .unwrap();
    for root in tree.nodes() {
        let labels = build_rooted_labels(&tree, root).unwrap();
        assert_matches_ground_truth(&tree, &labels);
    }
}

#[test]
fn test_rooted_rejects_malformed_input() {
    let tree = unit_tree(&[(1, 2), (3, 4)]);
    assert!(matches!(
        build_rooted_labels(&tree, &1),
        Err(OracleError::Disconnected { .. })
    ));
    assert_eq!(
        build_rooted_labels(&tree, &42).unwrap_err(),
        OracleError::UnknownNode("42".to_string())
    );
}
