//! Surviving gear trains as written to the result table.

use crate::gear_set::GearSet;
use crate::period::RotationResult;
use serde::{Deserialize, Serialize};

/// One row of the result table.
///
/// Field order is the column order of the exported table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub z1: u32,
    pub z2: u32,
    pub z3: u32,
    pub z4: u32,
    pub total_rotations: f64,
    pub total_ratio: f64,
}

impl CandidateRecord {
    pub fn new(gear_set: GearSet, rotation: RotationResult) -> Self {
        Self {
            z1: gear_set.z1,
            z2: gear_set.z2,
            z3: gear_set.z3,
            z4: gear_set.z4,
            total_rotations: rotation.total_rotations,
            total_ratio: rotation.total_ratio,
        }
    }

    pub fn gear_set(&self) -> GearSet {
        GearSet::new(self.z1, self.z2, self.z3, self.z4)
    }

    pub fn rotation(&self) -> RotationResult {
        RotationResult {
            total_rotations: self.total_rotations,
            total_ratio: self.total_ratio,
        }
    }
}
