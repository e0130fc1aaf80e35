//! Gear-train search for two-sensor vernier absolute encoders
//!
//! A motor drives a worm (`z1` starts) meshing with a worm-wheel (`z2` teeth),
//! which in turn drives a spur pair (`z3` → `z4` teeth). One angle sensor reads
//! the worm-wheel and another reads the last spur gear. Because the two
//! sensors turn at different rates, the pair of readings only repeats after
//! many motor rotations, and every motor position inside that span can be
//! recovered absolutely.
//!
//! This crate enumerates every tooth-count combination inside configured
//! bounds, computes how many motor rotations each one can distinguish, and
//! keeps those that meet a minimum.
//!
//! # Module Structure
//!
//! - [`range_spec`] - Half-open tooth-count bounds
//! - [`design_space`] - Lazy Cartesian product of the bounds
//! - [`ratio`] - Worm, spur and total ratios
//! - [`period`] - Real-valued GCD/LCM and combined sensor period
//! - [`filter`] - Minimum-rotation threshold
//! - [`pipeline`] - End-to-end search, serial or parallel
//! - [`sink`] - Result export (CSV)
//! - [`config`] - Run configuration and validation
//!
//! # Example
//!
//! ```rust
//! use vernier::{RangeSpec, SearchConfig, SearchPipeline, ToothRange};
//!
//! let config = SearchConfig {
//!     ranges: RangeSpec::new(
//!         ToothRange::new(1, 2),
//!         ToothRange::new(10, 13),
//!         ToothRange::new(7, 10),
//!         ToothRange::new(7, 10),
//!     ),
//!     ..Default::default()
//! };
//!
//! let report = SearchPipeline::new(config)?.run();
//! assert_eq!(report.evaluated, 27);
//! for record in &report.survivors {
//!     println!("{:?} -> {:.1} rotations", record.gear_set(), record.total_rotations);
//! }
//! # Ok::<(), vernier::ConfigError>(())
//! ```

pub mod candidate;
pub mod config;
pub mod design_space;
pub mod error;
pub mod filter;
pub mod gear_set;
pub mod period;
pub mod pipeline;
pub mod range_spec;
pub mod ratio;
pub mod sink;

pub use candidate::CandidateRecord;
pub use config::{ConfigError, SearchConfig};
pub use design_space::DesignSpace;
pub use error::{AnalysisError, CandidateFailure};
pub use filter::CandidateFilter;
pub use gear_set::GearSet;
pub use period::{calc_total_rotations, PeriodAnalyzer, RealGcd, RotationResult};
pub use pipeline::{ExecutionMode, SearchPipeline, SearchReport, SearchWarning};
pub use range_spec::{RangeSpec, ToothParameter, ToothRange};
pub use ratio::{calc_ratios, RatioResult};
pub use sink::{CsvSink, ResultSink, SinkError};
