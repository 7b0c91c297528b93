//! Distance query on two finished labels.
//!
//! For two nodes `x` and `y` of a tree, the first centroid whose frame
//! contained both lies on the path between them: the frame was connected,
//! and `x` and `y` ended up in different pieces (or one of them is the
//! centroid). Both labels therefore share this pivot, and summing the two
//! distances to it gives the path length. Any other common pivot gives a
//! sum at least as large, so the minimum over common pivots is exact.

use crate::model::Label;

/// Returns the distance between the owners of two labels.
///
/// * Same owner: `0`.
/// * The destination is a pivot of the source: the recorded distance,
///   which already is the exact answer.
/// * Otherwise: the minimum of `d(x, p) + d(p, y)` over all common pivots `p`.
///
/// # Panics
/// Panics if the labels share no pivot; labels of one connected tree
/// always do.
///
/// # Example
/// ```
/// use treedist::model::Label;
/// use treedist::oracle::query;
///
/// let x = Label::new('x', vec![('c', 2.0), ('x', 0.0)]);
/// let y = Label::new('y', vec![('c', 5.0), ('y', 0.0)]);
/// assert_eq!(query(&x, &y), 7.0);
/// ```
pub fn query<N: PartialEq + std::fmt::Debug>(from: &Label<N>, to: &Label<N>) -> f64 {
    if from.owner() == to.owner() {
        return 0.0;
    }
    if let Some(distance) = from.get(to.owner()) {
        return distance;
    }

    shortest_via_common_pivot(from, to).unwrap_or_else(|| {
        panic!(
            "labels of {:?} and {:?} share no pivot",
            from.owner(),
            to.owner()
        )
    })
}

/// Returns the minimum of `d(x, p) + d(p, y)` over the pivots `p` common to
/// both labels, or `None` if there is none.
pub fn shortest_via_common_pivot<N: PartialEq>(from: &Label<N>, to: &Label<N>) -> Option<f64> {
    from.iter()
        .filter_map(|(pivot, to_pivot)| to.get(pivot).map(|from_pivot| to_pivot + from_pivot))
        .min_by(f64::total_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_owner_is_zero() {
        let x = Label::new(1, vec![(4, 3.0), (1, 0.0)]);
        assert_eq!(query(&x, &x), 0.0);
    }

    #[test]
    fn test_destination_as_pivot_short_circuits() {
        let x = Label::new(1, vec![(4, 3.0), (1, 0.0)]);
        let centroid = Label::new(4, vec![(4, 0.0)]);
        assert_eq!(query(&x, &centroid), 3.0);
        assert_eq!(query(&centroid, &x), 3.0);
        assert_eq!(shortest_via_common_pivot(&x, &centroid), Some(3.0));
    }

    #[test]
    fn test_minimum_over_common_pivots() {
        let x = Label::new('x', vec![('a', 4.0), ('b', 1.0), ('x', 0.0)]);
        let y = Label::new('y', vec![('a', 2.0), ('b', 9.0), ('y', 0.0)]);
        assert_eq!(query(&x, &y), 6.0);
    }

    #[test]
    #[should_panic(expected = "share no pivot")]
    fn test_disjoint_labels_panic() {
        let x = Label::new(1, vec![(1, 0.0)]);
        let y = Label::new(2, vec![(2, 0.0)]);
        query(&x, &y);
    }
}
