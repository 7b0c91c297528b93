//! Edge weights of a weighted tree.

use std::fmt;
use std::ops::Deref;

// =#========================================================================#=
// WEIGHT
// =#========================================================================#=
/// Weight of an undirected tree edge, enforced non-negative and finite.
///
/// Distances are sums of weights along the unique path between two nodes;
/// they are kept as plain `f64` and accumulated without rounding.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    /// Weight of a zero-length edge.
    pub const ZERO: Weight = Weight(0.0);

    /// Weight used when an input format omits it (hop distance).
    pub const UNIT: Weight = Weight(1.0);

    /// Creates a new weight.
    ///
    /// # Panics
    /// Panics if `weight` is negative or not finite.
    pub fn new(weight: f64) -> Self {
        assert!(weight >= 0.0, "Weight must be non-negative, got {weight}");
        assert!(weight.is_finite(), "Weight must be finite, got {weight}");
        Weight(weight)
    }

    /// Creates a new weight, or `None` if `weight` is negative, NaN or infinite.
    pub fn try_new(weight: f64) -> Option<Self> {
        if weight >= 0.0 && weight.is_finite() {
            Some(Weight(weight))
        } else {
            None
        }
    }

    /// Returns the raw value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Deref for Weight {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Weight {
    type Error = f64;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Weight::try_new(value).ok_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_invalid() {
        assert_eq!(Weight::try_new(-0.5), None);
        assert_eq!(Weight::try_new(f64::NAN), None);
        assert_eq!(Weight::try_new(f64::INFINITY), None);
        assert_eq!(Weight::try_new(2.5).map(Weight::value), Some(2.5));
    }

    #[test]
    #[should_panic]
    fn test_negative_weight_panics() {
        let _ = Weight::new(-1.0);
    }
}
