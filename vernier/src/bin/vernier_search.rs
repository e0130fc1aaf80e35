//! Exhaustive vernier gear-train search
//!
//! Enumerates worm + spur gear trains inside the configured tooth-count bounds
//! and writes every design that can distinguish at least the requested number
//! of motor rotations to a CSV table.
//!
//! # Usage
//!
//! ```bash
//! # Default bounds (z1 1:6, z2 5:31, z3 7:31, z4 7:31), keep designs >= 89 rotations
//! cargo run --release --bin vernier_search
//!
//! # Narrower worm, stricter threshold, custom output
//! cargo run --release --bin vernier_search -- --z1 1:3 --min-rotations 120 -o narrow.csv
//!
//! # Start from a saved configuration
//! cargo run --release --bin vernier_search -- --config search.json
//! ```

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::path::PathBuf;
use vernier::sink::DEFAULT_OUTPUT_FILENAME;
use vernier::{CsvSink, ExecutionMode, SearchConfig, SearchPipeline, ToothRange};

#[derive(Parser, Debug)]
#[command(
    name = "Vernier Gear Search",
    about = "Finds worm/spur gear trains whose two sensors encode many absolute motor rotations",
    long_about = None
)]
struct Args {
    /// JSON configuration to start from (flags below override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Worm starts range, upper bound excluded (format: "lo:hi")
    #[arg(long)]
    z1: Option<ToothRange>,

    /// Worm-wheel teeth range, upper bound excluded (format: "lo:hi")
    #[arg(long)]
    z2: Option<ToothRange>,

    /// Spur gear 1 teeth range, upper bound excluded (format: "lo:hi")
    #[arg(long)]
    z3: Option<ToothRange>,

    /// Spur gear 2 teeth range, upper bound excluded (format: "lo:hi")
    #[arg(long)]
    z4: Option<ToothRange>,

    /// Minimum distinguishable motor rotations for a design to be kept
    #[arg(long)]
    min_rotations: Option<f64>,

    /// Remainder at which the real-valued GCD stops
    #[arg(long)]
    gcd_tolerance: Option<f64>,

    /// Maximum Euclidean steps for the real-valued GCD
    #[arg(long)]
    max_gcd_iterations: Option<usize>,

    /// Refuse design spaces larger than this many candidates
    #[arg(long)]
    max_candidates: Option<u64>,

    /// Output CSV file for surviving designs
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILENAME)]
    output: PathBuf,

    /// Write the effective configuration to this JSON file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Number of top designs to print
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Run serially instead of in parallel
    #[arg(long, default_value_t = false)]
    serial: bool,

    /// Number of threads for parallel execution (0 = use all available)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Configuration file (or defaults) with command line overrides applied
    fn search_config(&self) -> Result<SearchConfig, vernier::ConfigError> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::load_from_file(path)?,
            None => SearchConfig::default(),
        };

        if let Some(range) = self.z1 {
            config.ranges.z1 = range;
        }
        if let Some(range) = self.z2 {
            config.ranges.z2 = range;
        }
        if let Some(range) = self.z3 {
            config.ranges.z3 = range;
        }
        if let Some(range) = self.z4 {
            config.ranges.z4 = range;
        }
        if let Some(min_rotations) = self.min_rotations {
            config.min_rotations = min_rotations;
        }
        if let Some(tolerance) = self.gcd_tolerance {
            config.gcd_tolerance = tolerance;
        }
        if let Some(iterations) = self.max_gcd_iterations {
            config.max_gcd_iterations = iterations;
        }
        if let Some(limit) = self.max_candidates {
            config.max_candidates = limit;
        }

        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = args.search_config()?;

    if let Some(path) = &args.save_config {
        config.save_to_file(path)?;
        info!("Saved configuration to {}", path.display());
    }

    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()?;
    }

    let mode = if args.serial {
        ExecutionMode::Serial
    } else {
        ExecutionMode::Parallel
    };

    let pipeline = SearchPipeline::new(config)?.with_mode(mode);
    let space = pipeline.design_space();
    let ranges = pipeline.config().ranges;

    println!("Vernier Gear Search");
    println!("===================");
    println!("Worm starts (z1):       {}", ranges.z1);
    println!("Worm-wheel teeth (z2):  {}", ranges.z2);
    println!("Spur gear 1 teeth (z3): {}", ranges.z3);
    println!("Spur gear 2 teeth (z4): {}", ranges.z4);
    println!("Candidates:             {}", space.len());
    println!("Min rotations:          {}", pipeline.config().min_rotations);
    println!("Mode:                   {mode:?}");
    println!();

    let progress = ProgressBar::new(space.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let mut sink = CsvSink::create(&args.output)?;
    let report = pipeline
        .with_progress(progress.clone())
        .run_into(&mut sink)?;
    progress.finish_and_clear();

    for warning in &report.warnings {
        eprintln!("Warning: {warning}");
    }
    for failure in &report.failures {
        eprintln!("Skipped {failure}");
    }

    println!(
        "Kept {} of {} designs ({} failed)",
        report.survivor_count(),
        report.evaluated,
        report.failures.len()
    );

    if args.top > 0 && !report.survivors.is_empty() {
        println!();
        println!(
            "{:<4} {:<4} {:<4} {:<4} {:>16} {:>12}",
            "z1", "z2", "z3", "z4", "Rotations", "Total ratio"
        );
        println!("{:-<49}", "");
        for record in report.best(args.top) {
            println!(
                "{:<4} {:<4} {:<4} {:<4} {:>16.3} {:>12.6}",
                record.z1,
                record.z2,
                record.z3,
                record.z4,
                record.total_rotations,
                record.total_ratio
            );
        }
    }

    println!();
    println!("Results written to {}", args.output.display());

    Ok(())
}
