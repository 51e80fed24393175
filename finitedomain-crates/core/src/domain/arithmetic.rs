//! Interval arithmetic over [`Domain`]s.
//!
//! Each operation combines every pair of ranges of its operands and returns the union of the
//! resulting ranges. The result over-approximates the exact set (e.g. `[2, 3] * [2, 3]` yields
//! `[4, 9]` rather than `{4, 6, 9}`) but never loses a value, which is all a narrowing operator
//! needs. Computations are done in `i64` and clamped into `[SUB, SUP]`.

use super::Domain;
use super::SUB;
use super::SUP;
use crate::fd_assert_moderate;

impl Domain {
    /// All sums `a + b` with `a` in `self` and `b` in `other`.
    pub fn plus(&self, other: &Domain) -> Domain {
        self.combine(other, |(lo_a, hi_a), (lo_b, hi_b)| Some((lo_a + lo_b, hi_a + hi_b)))
    }

    /// All non-negative differences `a - b` with `a` in `self` and `b` in `other`.
    pub fn minus(&self, other: &Domain) -> Domain {
        self.combine(other, |(lo_a, hi_a), (lo_b, hi_b)| Some((lo_a - hi_b, hi_a - lo_b)))
    }

    /// All products `a * b` with `a` in `self` and `b` in `other`.
    pub fn mul(&self, other: &Domain) -> Domain {
        self.combine(other, |(lo_a, hi_a), (lo_b, hi_b)| Some((lo_a * lo_b, hi_a * hi_b)))
    }

    /// Every `q` such that `q * b` is in `self` for some `b` in `divisor`; this is the inverse of
    /// [`Domain::mul`].
    ///
    /// If both the dividend and the divisor may be zero then any quotient is possible.
    pub fn div_by(&self, divisor: &Domain) -> Domain {
        if self.contains(0) && divisor.contains(0) {
            return Domain::full();
        }

        self.combine(divisor, |(lo_c, hi_c), (lo_b, hi_b)| {
            let lo_b = lo_b.max(1);
            if hi_b < lo_b {
                return None;
            }
            // Operands are non-negative, so rounding the bounds outwards is a ceiling division
            // of the lower bound and a floor division of the upper bound.
            let lo = (lo_c + hi_b - 1) / hi_b;
            let hi = hi_c / lo_b;
            Some((lo, hi))
        })
    }

    fn combine(
        &self,
        other: &Domain,
        operation: impl Fn((i64, i64), (i64, i64)) -> Option<(i64, i64)>,
    ) -> Domain {
        let ranges = self.ranges.iter().flat_map(|&(lo_a, hi_a)| {
            let operation = &operation;
            other.ranges.iter().filter_map(move |&(lo_b, hi_b)| {
                operation((lo_a as i64, hi_a as i64), (lo_b as i64, hi_b as i64))
            })
        });
        let result = Domain::from_ranges(ranges.collect::<Vec<_>>());
        fd_assert_moderate!(result.ranges.iter().all(|(lo, hi)| *lo >= SUB && *hi <= SUP));
        result
    }
}
