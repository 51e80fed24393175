//! The value type describing the set of integers a variable may still take.
//!
//! A [`Domain`] is a sorted list of disjoint inclusive ranges. Two ranges are never adjacent
//! (`[0, 3]` and `[4, 6]` are always merged into `[0, 6]`), which makes structural equality the
//! same as set equality. All values lie within `[SUB, SUP]`.
//!
//! Domains are treated as immutable values: every narrowing operation returns a new [`Domain`] and
//! the propagation engine replaces the slot of a variable rather than mutating it in place.

mod arithmetic;

use std::fmt::Display;
use std::fmt::Formatter;

use crate::fd_assert_simple;

/// The smallest value any variable can take.
pub const SUB: i32 = 0;
/// The largest value any variable can take.
pub const SUP: i32 = 100_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Domain {
    ranges: Vec<(i32, i32)>,
}

impl Domain {
    pub fn empty() -> Domain {
        Domain { ranges: vec![] }
    }

    /// The domain `[SUB, SUP]`.
    pub fn full() -> Domain {
        Domain {
            ranges: vec![(SUB, SUP)],
        }
    }

    /// The domain containing every value of `[lower_bound, upper_bound]` which is within
    /// `[SUB, SUP]`; empty if the range is inverted.
    pub fn range(lower_bound: i32, upper_bound: i32) -> Domain {
        let lower_bound = lower_bound.max(SUB);
        let upper_bound = upper_bound.min(SUP);
        if lower_bound > upper_bound {
            return Domain::empty();
        }
        Domain {
            ranges: vec![(lower_bound, upper_bound)],
        }
    }

    pub fn value(value: i32) -> Domain {
        Domain::range(value, value)
    }

    /// The [`Domain`] containing exactly the provided values (duplicates are allowed).
    pub fn from_values(values: impl IntoIterator<Item = i32>) -> Domain {
        Domain::from_ranges(values.into_iter().map(|value| (value as i64, value as i64)))
    }

    /// Normalises arbitrary (possibly overlapping, unsorted or out of bounds) ranges.
    pub(crate) fn from_ranges(ranges: impl IntoIterator<Item = (i64, i64)>) -> Domain {
        let mut clamped = ranges
            .into_iter()
            .filter_map(|(lo, hi)| {
                let lo = lo.max(SUB as i64);
                let hi = hi.min(SUP as i64);
                (lo <= hi).then_some((lo as i32, hi as i32))
            })
            .collect::<Vec<_>>();
        clamped.sort_unstable();

        let mut merged: Vec<(i32, i32)> = Vec::with_capacity(clamped.len());
        for (lo, hi) in clamped {
            match merged.last_mut() {
                Some(last) if lo as i64 <= last.1 as i64 + 1 => last.1 = last.1.max(hi),
                _ => merged.push((lo, hi)),
            }
        }
        Domain { ranges: merged }
    }

    pub fn ranges(&self) -> &[(i32, i32)] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Whether exactly one value remains.
    pub fn is_solved(&self) -> bool {
        self.ranges.len() == 1 && self.ranges[0].0 == self.ranges[0].1
    }

    /// Whether the domain is exactly `{value}`.
    pub fn is_value(&self, value: i32) -> bool {
        self.solved_value() == Some(value)
    }

    pub fn solved_value(&self) -> Option<i32> {
        self.is_solved().then(|| self.ranges[0].0)
    }

    /// The lower bound; the domain should not be empty.
    pub fn min(&self) -> i32 {
        fd_assert_simple!(!self.is_empty(), "The minimum of an empty domain is undefined");
        self.ranges[0].0
    }

    /// The upper bound; the domain should not be empty.
    pub fn max(&self) -> i32 {
        fd_assert_simple!(!self.is_empty(), "The maximum of an empty domain is undefined");
        self.ranges[self.ranges.len() - 1].1
    }

    /// The number of values in the domain.
    pub fn size(&self) -> u64 {
        self.ranges
            .iter()
            .map(|(lo, hi)| (*hi as i64 - *lo as i64 + 1) as u64)
            .sum()
    }

    pub fn contains(&self, value: i32) -> bool {
        self.ranges
            .binary_search_by(|(lo, hi)| {
                if *hi < value {
                    std::cmp::Ordering::Less
                } else if *lo > value {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Enumerates the values of the domain in increasing order.
    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        self.ranges.iter().flat_map(|(lo, hi)| *lo..=*hi)
    }

    pub fn intersection(&self, other: &Domain) -> Domain {
        let mut result = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.ranges.len() && j < other.ranges.len() {
            let (lo_a, hi_a) = self.ranges[i];
            let (lo_b, hi_b) = other.ranges[j];

            let lo = lo_a.max(lo_b);
            let hi = hi_a.min(hi_b);
            if lo <= hi {
                result.push((lo, hi));
            }

            if hi_a < hi_b {
                i += 1;
            } else {
                j += 1;
            }
        }
        Domain { ranges: result }
    }

    /// Whether the two domains share at least one value.
    pub fn intersects(&self, other: &Domain) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < self.ranges.len() && j < other.ranges.len() {
            let (lo_a, hi_a) = self.ranges[i];
            let (lo_b, hi_b) = other.ranges[j];
            if lo_a.max(lo_b) <= hi_a.min(hi_b) {
                return true;
            }
            if hi_a < hi_b {
                i += 1;
            } else {
                j += 1;
            }
        }
        false
    }

    pub fn remove_value(&self, value: i32) -> Domain {
        if !self.contains(value) {
            return self.clone();
        }
        let mut ranges = Vec::with_capacity(self.ranges.len() + 1);
        for &(lo, hi) in &self.ranges {
            if value < lo || value > hi {
                ranges.push((lo, hi));
                continue;
            }
            if lo < value {
                ranges.push((lo, value - 1));
            }
            if value < hi {
                ranges.push((value + 1, hi));
            }
        }
        Domain { ranges }
    }

    /// Removes every value strictly smaller than `value`.
    pub fn remove_below(&self, value: i32) -> Domain {
        let ranges = self
            .ranges
            .iter()
            .filter(|(_, hi)| *hi >= value)
            .map(|&(lo, hi)| (lo.max(value), hi))
            .collect();
        Domain { ranges }
    }

    /// Removes every value strictly larger than `value`.
    pub fn remove_above(&self, value: i32) -> Domain {
        let ranges = self
            .ranges
            .iter()
            .filter(|(lo, _)| *lo <= value)
            .map(|&(lo, hi)| (lo, hi.min(value)))
            .collect();
        Domain { ranges }
    }

    /// The value at position `size / 2` (rounded down) when enumerating the domain.
    pub fn middle_element(&self) -> i32 {
        fd_assert_simple!(!self.is_empty(), "An empty domain has no middle element");
        let mut offset = self.size() / 2;
        for &(lo, hi) in &self.ranges {
            let range_size = (hi as i64 - lo as i64 + 1) as u64;
            if offset < range_size {
                return lo + offset as i32;
            }
            offset -= range_size;
        }
        unreachable!("The offset is always smaller than the size of the domain")
    }

    /// The first value of `list` which is contained in the domain.
    pub fn first_intersecting_value(&self, list: &[i32]) -> Option<i32> {
        list.iter().copied().find(|value| self.contains(*value))
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (index, (lo, hi)) in self.ranges.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            if lo == hi {
                write!(f, "{lo}")?;
            } else {
                write!(f, "{lo}..{hi}")?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_ranges_are_merged() {
        let domain = Domain::from_ranges([(4, 6), (0, 3), (10, 12), (11, 15)]);

        assert_eq!(domain.ranges(), &[(0, 6), (10, 15)]);
        assert_eq!(domain, Domain::from_values([0, 1, 2, 3, 4, 5, 6, 10, 11, 12, 13, 14, 15]));
    }

    #[test]
    fn out_of_bounds_values_are_clamped() {
        assert_eq!(Domain::range(-5, 3), Domain::range(0, 3));
        assert_eq!(Domain::range(SUP - 1, SUP + 10).max(), SUP);
        assert!(Domain::range(5, 4).is_empty());
    }

    #[test]
    fn queries_on_a_domain_with_holes() {
        let domain = Domain::from_values([1, 2, 3, 7, 9]);

        assert_eq!(domain.min(), 1);
        assert_eq!(domain.max(), 9);
        assert_eq!(domain.size(), 5);
        assert!(domain.contains(7));
        assert!(!domain.contains(8));
        assert!(!domain.is_solved());
        assert_eq!(domain.values().collect::<Vec<_>>(), vec![1, 2, 3, 7, 9]);
    }

    #[test]
    fn solved_domain_reports_its_value() {
        let domain = Domain::value(42);

        assert!(domain.is_solved());
        assert!(domain.is_value(42));
        assert_eq!(domain.solved_value(), Some(42));
        assert_eq!(Domain::range(1, 2).solved_value(), None);
    }

    #[test]
    fn intersection_of_ranges() {
        let a = Domain::from_ranges([(0, 5), (10, 20)]);
        let b = Domain::from_ranges([(3, 12), (18, 30)]);

        assert_eq!(a.intersection(&b).ranges(), &[(3, 5), (10, 12), (18, 20)]);
        assert!(a.intersects(&b));
        assert!(!Domain::range(0, 2).intersects(&Domain::range(3, 4)));
    }

    #[test]
    fn removing_a_value_splits_a_range() {
        let domain = Domain::range(0, 10).remove_value(5);

        assert_eq!(domain.ranges(), &[(0, 4), (6, 10)]);
        assert_eq!(domain.remove_value(0).min(), 1);
        assert_eq!(domain.remove_value(50), domain);
        assert!(Domain::value(3).remove_value(3).is_empty());
    }

    #[test]
    fn removing_below_and_above() {
        let domain = Domain::from_ranges([(0, 5), (10, 20)]);

        assert_eq!(domain.remove_below(3).ranges(), &[(3, 5), (10, 20)]);
        assert_eq!(domain.remove_below(7).ranges(), &[(10, 20)]);
        assert_eq!(domain.remove_above(12).ranges(), &[(0, 5), (10, 12)]);
        assert!(domain.remove_above(-1).is_empty());
    }

    #[test]
    fn middle_element_counts_enumerated_values() {
        assert_eq!(Domain::range(1, 99).middle_element(), 50);
        assert_eq!(Domain::range(1, 2).middle_element(), 2);
        assert_eq!(Domain::from_values([1, 2, 8, 9, 10]).middle_element(), 8);
    }

    #[test]
    fn first_intersecting_value_follows_list_order() {
        let domain = Domain::from_values([2, 4, 6]);

        assert_eq!(domain.first_intersecting_value(&[5, 6, 2]), Some(6));
        assert_eq!(domain.first_intersecting_value(&[1, 3]), None);
    }

    #[test]
    fn display_compacts_ranges() {
        assert_eq!(Domain::from_values([1, 2, 3, 7]).to_string(), "[1..3, 7]");
        assert_eq!(Domain::empty().to_string(), "[]");
    }
}
