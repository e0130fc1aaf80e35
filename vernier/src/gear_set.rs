//! Tooth-count tuple describing one worm + spur gear train.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One candidate gear train.
///
/// The worm stage is `z1` starts driving a `z2` tooth wheel. The spur stage is
/// a `z3` tooth gear driving a `z4` tooth gear. `z1` counts thread starts rather
/// than teeth but is treated numerically the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GearSet {
    /// Worm thread starts
    pub z1: u32,
    /// Worm-wheel teeth
    pub z2: u32,
    /// Spur gear 1 teeth
    pub z3: u32,
    /// Spur gear 2 teeth
    pub z4: u32,
}

impl GearSet {
    pub fn new(z1: u32, z2: u32, z3: u32, z4: u32) -> Self {
        Self { z1, z2, z3, z4 }
    }

    /// Tooth counts in column order `(z1, z2, z3, z4)`
    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.z1, self.z2, self.z3, self.z4)
    }
}

impl From<(u32, u32, u32, u32)> for GearSet {
    fn from((z1, z2, z3, z4): (u32, u32, u32, u32)) -> Self {
        Self::new(z1, z2, z3, z4)
    }
}

impl fmt::Display for GearSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(z1={}, z2={}, z3={}, z4={})",
            self.z1, self.z2, self.z3, self.z4
        )
    }
}
