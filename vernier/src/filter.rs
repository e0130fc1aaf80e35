//! Minimum-rotation threshold applied to analysed candidates.

use crate::candidate::CandidateRecord;
use crate::gear_set::GearSet;
use crate::period::RotationResult;

/// Default number of motor rotations a design must distinguish
pub const DEFAULT_MIN_ROTATIONS: f64 = 89.0;

/// Keeps designs whose distinguishable range reaches `min_rotations`.
///
/// The threshold is inclusive. The filter holds no state, so applying it twice
/// gives the same answer and filtering an already filtered list changes nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateFilter {
    min_rotations: f64,
}

impl CandidateFilter {
    pub fn new(min_rotations: f64) -> Self {
        Self { min_rotations }
    }

    pub fn min_rotations(&self) -> f64 {
        self.min_rotations
    }

    pub fn keep(&self, rotation: &RotationResult) -> bool {
        rotation.total_rotations >= self.min_rotations
    }

    /// Record for a surviving candidate, `None` when it falls short
    pub fn select(&self, gear_set: GearSet, rotation: RotationResult) -> Option<CandidateRecord> {
        self.keep(&rotation)
            .then(|| CandidateRecord::new(gear_set, rotation))
    }

    /// Order-preserving pass over already built records
    pub fn retain(&self, records: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
        records
            .into_iter()
            .filter(|record| self.keep(&record.rotation()))
            .collect()
    }
}

impl Default for CandidateFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ROTATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotation(total_rotations: f64) -> RotationResult {
        RotationResult {
            total_rotations,
            total_ratio: 0.1,
        }
    }

    fn record(z2: u32, total_rotations: f64) -> CandidateRecord {
        CandidateRecord::new(GearSet::new(1, z2, 7, 7), rotation(total_rotations))
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let filter = CandidateFilter::default();
        assert!(filter.keep(&rotation(89.0)));
        assert!(filter.keep(&rotation(90.0)));
        assert!(!filter.keep(&rotation(88.999)));
    }

    #[test]
    fn test_predicate_is_pure() {
        let filter = CandidateFilter::new(50.0);
        let r = rotation(49.5);
        assert_eq!(filter.keep(&r), filter.keep(&r));
    }

    #[test]
    fn test_nan_rotations_never_kept() {
        assert!(!CandidateFilter::new(0.0).keep(&rotation(f64::NAN)));
    }

    #[test]
    fn test_select_builds_record() {
        let filter = CandidateFilter::default();
        let gear_set = GearSet::new(5, 15, 30, 7);
        let kept = filter.select(gear_set, rotation(90.0)).unwrap();
        assert_eq!(kept.gear_set(), gear_set);
        assert_eq!(kept.total_rotations, 90.0);
        assert!(filter.select(gear_set, rotation(5.0)).is_none());
    }

    #[test]
    fn test_retain_preserves_order() {
        let filter = CandidateFilter::default();
        let records = vec![
            record(10, 90.0),
            record(11, 88.0),
            record(12, 108.0),
            record(13, 5.0),
            record(14, 99.0),
        ];
        let kept = filter.retain(records);
        let z2: Vec<_> = kept.iter().map(|r| r.z2).collect();
        assert_eq!(z2, vec![10, 12, 14]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let filter = CandidateFilter::default();
        let once = filter.retain(vec![record(10, 90.0), record(11, 12.0), record(12, 96.0)]);
        let twice = filter.retain(once.clone());
        assert_eq!(once, twice);
    }
}
