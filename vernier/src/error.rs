//! Errors raised while analysing a single gear train.

use crate::gear_set::GearSet;
use thiserror::Error;

/// Failure of a ratio or period computation.
///
/// These are local to one candidate: the search records them against the
/// offending [`GearSet`] and moves on to the next candidate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Real GCD of {a} and {b} did not converge after {iterations} iterations")]
    NonConvergent { a: f64, b: f64, iterations: usize },
}

/// A candidate whose analysis failed, kept with enough context to reproduce it
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFailure {
    pub gear_set: GearSet,
    pub error: AnalysisError,
}

impl std::fmt::Display for CandidateFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.gear_set, self.error)
    }
}
