//! End-to-end search over a design space.
//!
//! The pipeline enumerates every gear train admitted by the configured
//! bounds, computes its ratios and combined sensor period, and keeps the ones
//! that meet the rotation threshold. No candidate is skipped or pruned.
//!
//! Candidates are independent, so the work can be spread over the rayon
//! thread pool. Survivors and failures are always reported in generation
//! order, so serial and parallel runs produce identical reports.

use crate::candidate::CandidateRecord;
use crate::config::{ConfigError, SearchConfig};
use crate::design_space::DesignSpace;
use crate::error::CandidateFailure;
use crate::filter::CandidateFilter;
use crate::gear_set::GearSet;
use crate::period::PeriodAnalyzer;
use crate::range_spec::ToothParameter;
use crate::sink::{ResultSink, SinkError};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::fmt;

/// How candidates are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One candidate at a time on the calling thread
    #[default]
    Serial,
    /// Spread over the current rayon thread pool
    Parallel,
}

/// Non-fatal conditions noticed during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchWarning {
    /// One or more parameter ranges are empty, so there is nothing to search
    EmptyDesignSpace { parameters: Vec<ToothParameter> },
}

impl fmt::Display for SearchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchWarning::EmptyDesignSpace { parameters } => {
                let names: Vec<String> = parameters.iter().map(|p| p.to_string()).collect();
                write!(f, "empty design space: no values for {}", names.join(", "))
            }
        }
    }
}

/// Everything a run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchReport {
    /// Candidates meeting the threshold, in generation order
    pub survivors: Vec<CandidateRecord>,
    /// Number of candidates evaluated
    pub evaluated: usize,
    /// Candidates whose analysis failed, in generation order
    pub failures: Vec<CandidateFailure>,
    pub warnings: Vec<SearchWarning>,
}

impl SearchReport {
    pub fn survivor_count(&self) -> usize {
        self.survivors.len()
    }

    /// Largest distinguishable rotation count among survivors
    pub fn max_rotations(&self) -> Option<f64> {
        self.survivors
            .iter()
            .map(|r| r.total_rotations)
            .fold(None, |best, r| Some(best.map_or(r, |b: f64| b.max(r))))
    }

    /// Up to `n` survivors with the most rotations. Ties keep generation order.
    pub fn best(&self, n: usize) -> Vec<&CandidateRecord> {
        let mut ranked: Vec<&CandidateRecord> = self.survivors.iter().collect();
        ranked.sort_by(|a, b| b.total_rotations.total_cmp(&a.total_rotations));
        ranked.truncate(n);
        ranked
    }
}

enum Outcome {
    Kept(CandidateRecord),
    Rejected,
    Failed(CandidateFailure),
}

/// Runs the enumerate → analyse → filter chain for one configuration.
#[derive(Clone)]
pub struct SearchPipeline {
    config: SearchConfig,
    analyzer: PeriodAnalyzer,
    filter: CandidateFilter,
    mode: ExecutionMode,
    progress: Option<ProgressBar>,
}

impl SearchPipeline {
    /// Build a pipeline, rejecting invalid configurations up front.
    ///
    /// # Errors
    ///
    /// Any error from [`SearchConfig::validate`].
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            analyzer: PeriodAnalyzer::new(config.real_gcd()),
            filter: config.filter(),
            config,
            mode: ExecutionMode::default(),
            progress: None,
        })
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Advance `progress` by one for each evaluated candidate
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn design_space(&self) -> DesignSpace {
        DesignSpace::new(self.config.ranges)
    }

    /// Evaluate every candidate and collect the report
    pub fn run(&self) -> SearchReport {
        let space = self.design_space();
        debug!(
            "Searching {} candidates (z1 {}, z2 {}, z3 {}, z4 {}), min rotations {}, {:?}",
            space.len(),
            self.config.ranges.z1,
            self.config.ranges.z2,
            self.config.ranges.z3,
            self.config.ranges.z4,
            self.filter.min_rotations(),
            self.mode
        );

        let mut report = SearchReport::default();

        let empty = self.config.ranges.empty_parameters();
        if !empty.is_empty() {
            let warning = SearchWarning::EmptyDesignSpace { parameters: empty };
            warn!("{warning}");
            report.warnings.push(warning);
        }

        let outcomes: Vec<Outcome> = match self.mode {
            ExecutionMode::Serial => space
                .iter()
                .map(|gear_set| self.evaluate(gear_set))
                .filter(|outcome| !matches!(outcome, Outcome::Rejected))
                .collect(),
            ExecutionMode::Parallel => space
                .par_iter()
                .map(|gear_set| self.evaluate(gear_set))
                .filter(|outcome| !matches!(outcome, Outcome::Rejected))
                .collect(),
        };

        report.evaluated = space.len();
        for outcome in outcomes {
            match outcome {
                Outcome::Kept(record) => report.survivors.push(record),
                Outcome::Failed(failure) => {
                    warn!("Skipping candidate {failure}");
                    report.failures.push(failure);
                }
                Outcome::Rejected => {}
            }
        }

        info!(
            "Evaluated {} candidates: {} kept, {} failed",
            report.evaluated,
            report.survivor_count(),
            report.failures.len()
        );

        report
    }

    /// Run the search and hand the survivors to `sink`
    pub fn run_into(&self, sink: &mut dyn ResultSink) -> Result<SearchReport, SinkError> {
        let report = self.run();
        sink.accept(&report.survivors)?;
        Ok(report)
    }

    fn evaluate(&self, gear_set: GearSet) -> Outcome {
        let outcome = match self.analyzer.evaluate(&gear_set) {
            Ok(rotation) => match self.filter.select(gear_set, rotation) {
                Some(record) => Outcome::Kept(record),
                None => Outcome::Rejected,
            },
            Err(error) => Outcome::Failed(CandidateFailure { gear_set, error }),
        };
        if let Some(progress) = &self.progress {
            progress.inc(1);
        }
        outcome
    }
}
