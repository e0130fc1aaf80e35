//! Tooth-count bounds for the four gear-train parameters.
//!
//! Each parameter is bounded by a half-open range `[lo, hi)`: the upper limit
//! is excluded, so `z1` in `1:6` yields the values 1 to 5.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// The four tooth-count parameters of a gear train
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToothParameter {
    /// `z1`, worm thread starts
    WormStarts,
    /// `z2`, worm-wheel teeth
    WormWheel,
    /// `z3`, spur gear 1 teeth
    SpurGear1,
    /// `z4`, spur gear 2 teeth
    SpurGear2,
}

impl ToothParameter {
    /// All parameters in enumeration order (outermost first)
    pub const ALL: [ToothParameter; 4] = [
        ToothParameter::WormStarts,
        ToothParameter::WormWheel,
        ToothParameter::SpurGear1,
        ToothParameter::SpurGear2,
    ];

    /// Column name used in result tables
    pub fn column(&self) -> &'static str {
        match self {
            ToothParameter::WormStarts => "z1",
            ToothParameter::WormWheel => "z2",
            ToothParameter::SpurGear1 => "z3",
            ToothParameter::SpurGear2 => "z4",
        }
    }
}

impl fmt::Display for ToothParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            ToothParameter::WormStarts => "worm starts",
            ToothParameter::WormWheel => "worm-wheel teeth",
            ToothParameter::SpurGear1 => "spur gear 1 teeth",
            ToothParameter::SpurGear2 => "spur gear 2 teeth",
        };
        write!(f, "{} ({})", self.column(), description)
    }
}

/// Half-open range of tooth counts `[lo, hi)`.
///
/// A range with `hi <= lo` is empty, matching how the search treats
/// degenerate bounds: no candidates, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToothRange {
    /// Smallest tooth count included
    pub lo: u32,
    /// First tooth count excluded
    pub hi: u32,
}

impl ToothRange {
    pub const fn new(lo: u32, hi: u32) -> Self {
        Self { lo, hi }
    }

    /// Range holding exactly one tooth count
    pub const fn single(value: u32) -> Self {
        Self::new(value, value.saturating_add(1))
    }

    /// Number of tooth counts in the range
    pub fn len(&self) -> usize {
        self.hi.saturating_sub(self.lo) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.hi <= self.lo
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.lo..self.hi).contains(&value)
    }

    /// Iterate the tooth counts in ascending order
    pub fn iter(&self) -> Range<u32> {
        self.lo..self.hi
    }

    /// Tooth count at `offset` from the start of the range.
    ///
    /// Callers guarantee `offset < self.len()`.
    pub(crate) fn at(&self, offset: usize) -> u32 {
        debug_assert!(offset < self.len());
        self.lo + offset as u32
    }
}

impl FromStr for ToothRange {
    type Err = String;

    /// Parse `"lo:hi"`, e.g. `"5:31"` for 5 to 30 teeth
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 2 {
            return Err(format!("Tooth range must be in format 'lo:hi', got '{s}'"));
        }

        let lo = parts[0]
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid lower bound: '{}'", parts[0].trim()))?;
        let hi = parts[1]
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("Invalid upper bound: '{}'", parts[1].trim()))?;

        Ok(ToothRange::new(lo, hi))
    }
}

impl fmt::Display for ToothRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lo, self.hi)
    }
}

/// Bounds for all four gear-train parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeSpec {
    /// Worm thread starts
    pub z1: ToothRange,
    /// Worm-wheel teeth
    pub z2: ToothRange,
    /// Spur gear 1 teeth
    pub z3: ToothRange,
    /// Spur gear 2 teeth
    pub z4: ToothRange,
}

impl RangeSpec {
    pub const fn new(z1: ToothRange, z2: ToothRange, z3: ToothRange, z4: ToothRange) -> Self {
        Self { z1, z2, z3, z4 }
    }

    /// Range configured for one parameter
    pub fn range(&self, parameter: ToothParameter) -> ToothRange {
        match parameter {
            ToothParameter::WormStarts => self.z1,
            ToothParameter::WormWheel => self.z2,
            ToothParameter::SpurGear1 => self.z3,
            ToothParameter::SpurGear2 => self.z4,
        }
    }

    /// Size of the full Cartesian product, saturating at `u64::MAX`
    pub fn candidate_count(&self) -> u64 {
        ToothParameter::ALL
            .iter()
            .map(|&p| self.range(p).len() as u64)
            .fold(1u64, |acc, n| acc.saturating_mul(n))
    }

    /// Parameters whose range holds no tooth counts
    pub fn empty_parameters(&self) -> Vec<ToothParameter> {
        ToothParameter::ALL
            .into_iter()
            .filter(|&p| self.range(p).is_empty())
            .collect()
    }

    /// Reject bounds that admit a zero tooth count.
    ///
    /// A zero in `z2` or `z3` divides by zero in the ratio calculation and a
    /// zero in `z1` or `z4` gives a zero ratio whose sensor period never
    /// closes, so any non-empty range starting at zero is fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for parameter in ToothParameter::ALL {
            let range = self.range(parameter);
            if !range.is_empty() && range.lo == 0 {
                return Err(ConfigError::ZeroTeeth { parameter, range });
            }
        }
        Ok(())
    }
}

impl Default for RangeSpec {
    fn default() -> Self {
        Self {
            z1: ToothRange::new(1, 6),
            z2: ToothRange::new(5, 31),
            z3: ToothRange::new(7, 31),
            z4: ToothRange::new(7, 31),
        }
    }
}
