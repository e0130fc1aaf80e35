//! Search configuration and its validation.
//!
//! A [`SearchConfig`] fixes everything a run depends on: the tooth-count
//! bounds, the rotation threshold and the real-GCD settings. It can be saved
//! to and loaded from pretty-printed JSON. Missing fields take their defaults,
//! so a file only needs the values it changes:
//!
//! ```json
//! {
//!   "ranges": { "z1": { "lo": 1, "hi": 3 } },
//!   "min_rotations": 100.0
//! }
//! ```

use crate::filter::{CandidateFilter, DEFAULT_MIN_ROTATIONS};
use crate::period::{RealGcd, DEFAULT_GCD_TOLERANCE, DEFAULT_MAX_GCD_ITERATIONS};
use crate::range_spec::{RangeSpec, ToothParameter, ToothRange};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Upper limit on the design-space size a run will enumerate
pub const DEFAULT_MAX_CANDIDATES: u64 = 10_000_000;

/// Errors from loading or validating a search configuration.
///
/// All of these are fatal and surface before enumeration starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read or write configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Range {range} for {parameter} admits zero teeth")]
    ZeroTeeth {
        parameter: ToothParameter,
        range: ToothRange,
    },

    #[error("GCD tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),

    #[error("GCD iteration cap must be at least 1")]
    ZeroIterations,

    #[error("Minimum rotations must be finite, got {0}")]
    InvalidThreshold(f64),

    #[error("Design space holds {count} candidates, more than the limit of {limit}")]
    TooManyCandidates { count: u64, limit: u64 },
}

/// Everything a search run depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Tooth-count bounds, upper limits excluded
    pub ranges: RangeSpec,
    /// Designs distinguishing fewer motor rotations are discarded
    pub min_rotations: f64,
    /// Remainder at which the real GCD stops
    pub gcd_tolerance: f64,
    /// Step bound for the real GCD
    pub max_gcd_iterations: usize,
    /// Refuse to enumerate design spaces larger than this
    pub max_candidates: u64,
}

impl SearchConfig {
    /// Check the configuration before any candidate is evaluated.
    ///
    /// # Errors
    ///
    /// * `ConfigError::ZeroTeeth` - a non-empty range starts at zero
    /// * `ConfigError::InvalidTolerance` - tolerance is not positive and finite
    /// * `ConfigError::ZeroIterations` - GCD iteration cap is zero
    /// * `ConfigError::InvalidThreshold` - `min_rotations` is NaN or infinite
    /// * `ConfigError::TooManyCandidates` - design space exceeds `max_candidates`
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ranges.validate()?;

        if !(self.gcd_tolerance.is_finite() && self.gcd_tolerance > 0.0) {
            return Err(ConfigError::InvalidTolerance(self.gcd_tolerance));
        }
        if self.max_gcd_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if !self.min_rotations.is_finite() {
            return Err(ConfigError::InvalidThreshold(self.min_rotations));
        }

        let count = self.ranges.candidate_count();
        if count > self.max_candidates {
            return Err(ConfigError::TooManyCandidates {
                count,
                limit: self.max_candidates,
            });
        }

        Ok(())
    }

    pub fn real_gcd(&self) -> RealGcd {
        RealGcd::new(self.gcd_tolerance, self.max_gcd_iterations)
    }

    pub fn filter(&self) -> CandidateFilter {
        CandidateFilter::new(self.min_rotations)
    }

    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON file. The result is not validated.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ranges: RangeSpec::default(),
            min_rotations: DEFAULT_MIN_ROTATIONS,
            gcd_tolerance: DEFAULT_GCD_TOLERANCE,
            max_gcd_iterations: DEFAULT_MAX_GCD_ITERATIONS,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_is_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_rotations, 89.0);
        assert_eq!(config.gcd_tolerance, 0.001);
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        for tolerance in [0.0, -0.001, f64::NAN, f64::INFINITY] {
            let config = SearchConfig {
                gcd_tolerance: tolerance,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidTolerance(_))
            ));
        }
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let config = SearchConfig {
            max_gcd_iterations: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroIterations)));
    }

    #[test]
    fn test_rejects_nan_threshold() {
        let config = SearchConfig {
            min_rotations: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_space() {
        let config = SearchConfig {
            max_candidates: 1000,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooManyCandidates {
                count: 74880,
                limit: 1000
            })
        ));
    }

    #[test]
    fn test_rejects_zero_teeth() {
        let mut config = SearchConfig::default();
        config.ranges.z1 = ToothRange::new(0, 6);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroTeeth {
                parameter: ToothParameter::WormStarts,
                ..
            })
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("search.json");

        let mut config = SearchConfig::default();
        config.ranges.z2 = ToothRange::new(10, 20);
        config.min_rotations = 120.0;
        config.save_to_file(&path).unwrap();

        let loaded = SearchConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "min_rotations": 100.0 }"#).unwrap();

        let loaded = SearchConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.min_rotations, 100.0);
        assert_eq!(loaded.ranges, RangeSpec::default());
        assert_eq!(loaded.max_gcd_iterations, DEFAULT_MAX_GCD_ITERATIONS);
    }

    #[test]
    fn test_partial_ranges_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ranges.json");
        std::fs::write(&path, r#"{ "ranges": { "z1": { "lo": 1, "hi": 3 } } }"#).unwrap();

        let loaded = SearchConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.ranges.z1, ToothRange::new(1, 3));
        assert_eq!(loaded.ranges.z2, RangeSpec::default().z2);
        assert_eq!(loaded.ranges.candidate_count(), 2 * 26 * 24 * 24);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = SearchConfig::load_from_file(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SearchConfig::load_from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
