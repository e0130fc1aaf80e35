//! Stage and total gear ratios of a worm + spur train.

use crate::error::AnalysisError;
use crate::gear_set::GearSet;

/// Ratios derived from a [`GearSet`].
///
/// Ratios are output turns per input turn, so the worm-wheel turns
/// `gear1_ratio` times per motor-shaft rotation and the final spur gear turns
/// `total_ratio` times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioResult {
    /// Worm stage, `z1 / z2`
    pub gear1_ratio: f64,
    /// Spur stage, `z4 / z3`
    pub gear2_ratio: f64,
    /// Product of both stages
    pub total_ratio: f64,
}

/// Compute the worm, spur and total ratios of a gear train.
///
/// # Errors
///
/// * `AnalysisError::InvalidInput` - `z2` or `z3` is zero
///
/// # Examples
///
/// ```rust
/// use vernier::{calc_ratios, GearSet};
///
/// let ratios = calc_ratios(&GearSet::new(1, 5, 7, 7)).unwrap();
/// assert_eq!(ratios.gear1_ratio, 0.2);
/// assert_eq!(ratios.gear2_ratio, 1.0);
/// assert_eq!(ratios.total_ratio, 0.2);
/// ```
pub fn calc_ratios(gear_set: &GearSet) -> Result<RatioResult, AnalysisError> {
    if gear_set.z2 == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "worm-wheel teeth (z2) must be non-zero in {gear_set}"
        )));
    }
    if gear_set.z3 == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "spur gear 1 teeth (z3) must be non-zero in {gear_set}"
        )));
    }

    let gear1_ratio = gear_set.z1 as f64 / gear_set.z2 as f64;
    let gear2_ratio = gear_set.z4 as f64 / gear_set.z3 as f64;

    Ok(RatioResult {
        gear1_ratio,
        gear2_ratio,
        total_ratio: gear1_ratio * gear2_ratio,
    })
}
