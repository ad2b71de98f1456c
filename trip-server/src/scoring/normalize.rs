//! Min-max normalization of trip metrics.

/// Scale `value` linearly so that `min` maps to 0 and `max` maps to 1.
///
/// When `max == min` every value maps to 0: a metric on which all
/// candidates tie has no influence on the score.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 0.0;
    }
    (value - min) / (max - min)
}

/// The observed range of one metric across a candidate set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    /// Range over the given values, or `None` if there are none.
    pub fn over(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        values.into_iter().fold(None, |range, v| match range {
            None => Some(MetricRange { min: v, max: v }),
            Some(r) => Some(MetricRange {
                min: r.min.min(v),
                max: r.max.max(v),
            }),
        })
    }

    /// Returns true if every value in the set was equal.
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Normalized badness of a value: 0 = best in set, 1 = worst.
    pub fn badness(&self, value: f64) -> f64 {
        normalize(value, self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_and_midpoint() {
        assert_eq!(normalize(10.0, 10.0, 20.0), 0.0);
        assert_eq!(normalize(20.0, 10.0, 20.0), 1.0);
        assert_eq!(normalize(15.0, 10.0, 20.0), 0.5);
    }

    #[test]
    fn equal_bounds_give_zero() {
        assert_eq!(normalize(5.0, 5.0, 5.0), 0.0);
        assert_eq!(normalize(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn range_over_values() {
        let range = MetricRange::over([3.0, 1.0, 7.0, 4.0]).unwrap();
        assert_eq!(range, MetricRange { min: 1.0, max: 7.0 });
        assert!(!range.is_degenerate());
        assert_eq!(range.badness(1.0), 0.0);
        assert_eq!(range.badness(7.0), 1.0);
    }

    #[test]
    fn range_over_nothing() {
        assert_eq!(MetricRange::over(std::iter::empty()), None);
    }

    #[test]
    fn single_value_is_degenerate() {
        let range = MetricRange::over([42.0]).unwrap();
        assert!(range.is_degenerate());
        assert_eq!(range.badness(42.0), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every value in the set normalizes into [0, 1]
        #[test]
        fn badness_within_unit_interval(values in prop::collection::vec(0.0f64..10_000.0, 1..20)) {
            let range = MetricRange::over(values.iter().copied()).unwrap();
            for v in &values {
                let b = range.badness(*v);
                prop_assert!(b.is_finite());
                prop_assert!((0.0..=1.0).contains(&b), "badness {} out of range", b);
            }
        }

        /// Ties never produce NaN
        #[test]
        fn constant_set_is_zero(v in 0.0f64..10_000.0, n in 1usize..10) {
            let range = MetricRange::over(std::iter::repeat(v).take(n)).unwrap();
            prop_assert_eq!(range.badness(v), 0.0);
        }
    }
}
