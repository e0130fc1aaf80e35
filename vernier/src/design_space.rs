//! Lazy Cartesian product of tooth counts.
//!
//! The design space is never materialized. Each candidate is decoded from its
//! flat index in the product, with `z1` as the most significant digit and
//! `z4` as the least, so iterating indices in order reproduces the nested
//! loop order `z1 → z2 → z3 → z4`. Index decoding also lets rayon split the
//! space across threads while the collected output keeps generation order.

use crate::gear_set::GearSet;
use crate::range_spec::RangeSpec;
use rayon::prelude::*;
use std::iter::FusedIterator;

/// Every gear train admitted by a [`RangeSpec`].
#[derive(Debug, Clone, Copy)]
pub struct DesignSpace {
    ranges: RangeSpec,
    len: usize,
}

impl DesignSpace {
    pub fn new(ranges: RangeSpec) -> Self {
        let len = usize::try_from(ranges.candidate_count()).unwrap_or(usize::MAX);
        Self { ranges, len }
    }

    /// Bounds the space was built from
    pub fn ranges(&self) -> &RangeSpec {
        &self.ranges
    }

    /// Number of candidates in the product
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Candidate at position `index` in generation order
    pub fn get(&self, index: usize) -> Option<GearSet> {
        (index < self.len).then(|| self.decode(index))
    }

    /// Iterate from the first candidate. Each call starts over.
    pub fn iter(&self) -> DesignSpaceIter {
        DesignSpaceIter {
            space: *self,
            next: 0,
        }
    }

    /// Parallel iterator over the space, indexed in generation order
    pub fn par_iter(&self) -> impl IndexedParallelIterator<Item = GearSet> + '_ {
        (0..self.len).into_par_iter().map(move |index| self.decode(index))
    }

    fn decode(&self, index: usize) -> GearSet {
        let RangeSpec { z1, z2, z3, z4 } = self.ranges;

        let mut rest = index;
        let i4 = rest % z4.len();
        rest /= z4.len();
        let i3 = rest % z3.len();
        rest /= z3.len();
        let i2 = rest % z2.len();
        rest /= z2.len();

        GearSet::new(z1.at(rest), z2.at(i2), z3.at(i3), z4.at(i4))
    }
}

impl<'a> IntoIterator for &'a DesignSpace {
    type Item = GearSet;
    type IntoIter = DesignSpaceIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Sequential iterator over a [`DesignSpace`]
#[derive(Debug, Clone)]
pub struct DesignSpaceIter {
    space: DesignSpace,
    next: usize,
}

impl Iterator for DesignSpaceIter {
    type Item = GearSet;

    fn next(&mut self) -> Option<GearSet> {
        let gear_set = self.space.get(self.next)?;
        self.next += 1;
        Some(gear_set)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.space.len.saturating_sub(self.next);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<GearSet> {
        self.next = self.next.saturating_add(n);
        self.next()
    }
}

impl ExactSizeIterator for DesignSpaceIter {}

impl FusedIterator for DesignSpaceIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range_spec::ToothRange;

    fn nested_loops(ranges: &RangeSpec) -> Vec<GearSet> {
        let mut out = Vec::new();
        for z1 in ranges.z1.iter() {
            for z2 in ranges.z2.iter() {
                for z3 in ranges.z3.iter() {
                    for z4 in ranges.z4.iter() {
                        out.push(GearSet::new(z1, z2, z3, z4));
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_single_candidate() {
        let space = DesignSpace::new(RangeSpec::new(
            ToothRange::new(1, 2),
            ToothRange::new(5, 6),
            ToothRange::new(7, 8),
            ToothRange::new(7, 8),
        ));
        let all: Vec<_> = space.iter().collect();
        assert_eq!(all, vec![GearSet::new(1, 5, 7, 7)]);
    }

    #[test]
    fn test_matches_nested_loop_order() {
        let ranges = RangeSpec::new(
            ToothRange::new(1, 3),
            ToothRange::new(5, 8),
            ToothRange::new(7, 9),
            ToothRange::new(10, 14),
        );
        let space = DesignSpace::new(ranges);
        assert_eq!(space.len(), 2 * 3 * 2 * 4);
        assert_eq!(space.iter().collect::<Vec<_>>(), nested_loops(&ranges));
    }

    #[test]
    fn test_innermost_parameter_varies_fastest() {
        let space = DesignSpace::new(RangeSpec::default());
        let first: Vec<_> = space.iter().take(3).collect();
        assert_eq!(
            first,
            vec![
                GearSet::new(1, 5, 7, 7),
                GearSet::new(1, 5, 7, 8),
                GearSet::new(1, 5, 7, 9),
            ]
        );
        assert_eq!(space.get(space.len() - 1), Some(GearSet::new(5, 30, 30, 30)));
        assert_eq!(space.get(space.len()), None);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let space = DesignSpace::new(RangeSpec::default());
        let mut iter = space.iter();
        iter.nth(100);
        let first_again = space.iter().next();
        assert_eq!(first_again, Some(GearSet::new(1, 5, 7, 7)));
    }

    #[test]
    fn test_exact_size() {
        let space = DesignSpace::new(RangeSpec::default());
        let mut iter = space.iter();
        assert_eq!(iter.len(), 74880);
        iter.next();
        assert_eq!(iter.len(), 74879);
        assert_eq!(space.iter().count(), 74880);
    }

    #[test]
    fn test_empty_range_yields_nothing() {
        let mut ranges = RangeSpec::default();
        ranges.z2 = ToothRange::new(9, 9);
        let space = DesignSpace::new(ranges);
        assert!(space.is_empty());
        assert_eq!(space.iter().next(), None);
        assert_eq!(space.par_iter().count(), 0);
    }

    #[test]
    fn test_parallel_order_matches_sequential() {
        let space = DesignSpace::new(RangeSpec::default());
        let parallel: Vec<_> = space.par_iter().collect();
        let sequential: Vec<_> = space.iter().collect();
        assert_eq!(parallel, sequential);
    }
}
