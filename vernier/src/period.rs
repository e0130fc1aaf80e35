//! Combined period of the two sensor channels.
//!
//! The worm-wheel sensor repeats every `360 / gear1_ratio` degrees of motor
//! rotation and the output sensor every `360 / total_ratio` degrees. The pair
//! of readings first repeats at the least common multiple of those two
//! periods, which bounds how many motor rotations the pair can encode
//! absolutely.
//!
//! The periods are rational but generally not integral, so the LCM is taken
//! through a real-valued Euclidean GCD. The GCD stops once the remainder falls
//! below a tolerance; that cutoff truncates the result, so the LCM carries a
//! relative error on the order of `tolerance / gcd`. It is exact only when the
//! remainder sequence lands on zero.

use crate::error::AnalysisError;
use crate::gear_set::GearSet;
use crate::ratio::{calc_ratios, RatioResult};
use serde::{Deserialize, Serialize};

/// Degrees in one shaft rotation
pub const FULL_TURN_DEGREES: f64 = 360.0;

/// Remainder below which the real GCD is considered converged
pub const DEFAULT_GCD_TOLERANCE: f64 = 0.001;

/// Iteration cap for the real GCD. Tooth counts up to a few hundred converge
/// in well under ten steps.
pub const DEFAULT_MAX_GCD_ITERATIONS: usize = 100;

/// Euclidean GCD/LCM over `f64` with an explicit tolerance and step bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealGcd {
    /// Remainder magnitude at which iteration stops
    pub tolerance: f64,
    /// Maximum number of Euclidean steps before giving up
    pub max_iterations: usize,
}

impl RealGcd {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Greatest common divisor of two reals.
    ///
    /// Orders the operands by magnitude, then repeatedly replaces `(a, b)` with
    /// `(b, a - floor(a / b) * b)` until `|b| < tolerance` and returns `|a|`.
    /// `gcd(a, 0) == |a|` and the result does not depend on operand order.
    ///
    /// # Errors
    ///
    /// * `AnalysisError::NonConvergent` - an operand is NaN or infinite
    ///   (reported with zero iterations), or the remainder is still above
    ///   tolerance after `max_iterations` steps
    pub fn gcd(&self, a: f64, b: f64) -> Result<f64, AnalysisError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(AnalysisError::NonConvergent {
                a,
                b,
                iterations: 0,
            });
        }

        let (mut x, mut y) = (a, b);
        for _ in 0..self.max_iterations {
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            if y.abs() < self.tolerance {
                return Ok(x.abs());
            }
            let remainder = x - (x / y).floor() * y;
            x = y;
            y = remainder;
        }

        Err(AnalysisError::NonConvergent {
            a,
            b,
            iterations: self.max_iterations,
        })
    }

    /// Least common multiple of two reals, `|a * b| / gcd(a, b)`.
    ///
    /// # Errors
    ///
    /// * `AnalysisError::NonConvergent` - the GCD fails, or comes out zero so
    ///   no finite multiple exists
    pub fn lcm(&self, a: f64, b: f64) -> Result<f64, AnalysisError> {
        let gcd = self.gcd(a, b)?;
        if gcd <= 0.0 {
            return Err(AnalysisError::NonConvergent {
                a,
                b,
                iterations: 0,
            });
        }
        Ok((a * b).abs() / gcd)
    }
}

impl Default for RealGcd {
    fn default() -> Self {
        Self::new(DEFAULT_GCD_TOLERANCE, DEFAULT_MAX_GCD_ITERATIONS)
    }
}

/// How far the motor can turn before the two sensor readings repeat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationResult {
    /// Motor-shaft rotations in one period of the combined reading pair
    pub total_rotations: f64,
    /// Motor-to-output ratio, echoed from the ratio calculation
    pub total_ratio: f64,
}

/// Computes distinguishable rotations for gear trains.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodAnalyzer {
    gcd: RealGcd,
}

impl PeriodAnalyzer {
    pub fn new(gcd: RealGcd) -> Self {
        Self { gcd }
    }

    pub fn gcd(&self) -> &RealGcd {
        &self.gcd
    }

    /// Combined sensor period of an already computed set of ratios.
    ///
    /// A zero ratio gives an infinite sensor period and is reported as
    /// `AnalysisError::NonConvergent`.
    pub fn analyze(&self, ratios: &RatioResult) -> Result<RotationResult, AnalysisError> {
        let worm_period = FULL_TURN_DEGREES / ratios.gear1_ratio;
        let output_period = FULL_TURN_DEGREES / ratios.total_ratio;

        let combined_period = self.gcd.lcm(worm_period, output_period)?;

        Ok(RotationResult {
            total_rotations: combined_period / FULL_TURN_DEGREES,
            total_ratio: ratios.total_ratio,
        })
    }

    /// Ratios followed by period analysis for one gear train
    pub fn evaluate(&self, gear_set: &GearSet) -> Result<RotationResult, AnalysisError> {
        let ratios = calc_ratios(gear_set)?;
        self.analyze(&ratios)
    }
}

/// Distinguishable rotations of a gear train with the default GCD settings.
///
/// # Examples
///
/// ```rust
/// use vernier::{calc_total_rotations, GearSet};
///
/// let result = calc_total_rotations(&GearSet::new(5, 15, 30, 7)).unwrap();
/// assert!((result.total_rotations - 90.0).abs() < 1e-6);
/// ```
pub fn calc_total_rotations(gear_set: &GearSet) -> Result<RotationResult, AnalysisError> {
    PeriodAnalyzer::default().evaluate(gear_set)
}
