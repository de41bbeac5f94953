#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::suspicious_operation_groupings,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(clippy::unwrap_used)]

use std::fmt::Display;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Error, Result};
use clap::{ArgAction, Parser};
use solver_harness::report::Report;

mod almanac;

/// Seed almanac puzzle solver.
#[derive(Parser, Debug)]
struct Cli {
    /// Path to the almanac input file.
    #[arg(value_name = "FILE", default_value = "inputs/almanac.txt")]
    input: PathBuf,

    /// Measure and print the durations of parsing and solving steps.
    #[arg(short, long, action = ArgAction::SetTrue)]
    timed: bool,

    /// Minimum duration (in milliseconds) required to print timing.
    /// 0 = always print.
    #[arg(long, value_name = "NUMBER", default_value_t)]
    min_timing_ms: u64,
}

/// Read the input file to a string.
fn get_input(input_file: &PathBuf) -> Result<String> {
    fs::read_to_string(input_file).with_context(|| {
        format!(
            "could not read input file at: {}\n\n\
            place the puzzle input there or pass a different FILE argument",
            input_file.display()
        )
    })
}

struct ConsoleReport {
    /// A minimum duration to filter any outputs of duration by.
    min_duration: Duration,
}

impl ConsoleReport {
    fn new(min_duration: Duration) -> Self {
        Self { min_duration }
    }

    fn format_duration(duration: Duration) -> String {
        const DECIMAL_PLACES: usize = 3;

        if duration.as_secs() > 0 {
            return format!("{:.*} seconds", DECIMAL_PLACES, duration.as_secs_f64());
        }
        let nanos = duration.subsec_nanos();
        if nanos >= 1_000_000 {
            format!("{:.*} milliseconds", DECIMAL_PLACES, f64::from(nanos) / 1e6)
        } else if nanos >= 1_000 {
            format!("{:.*} microseconds", DECIMAL_PLACES, f64::from(nanos) / 1e3)
        } else {
            format!("{nanos} nanoseconds")
        }
    }

    /// Convert an optional duration into a formatted duration, filtering out
    /// if the duration is shorter than the minimum duration.
    fn format_duration_above_min(&self, elapsed: Option<Duration>) -> Option<String> {
        elapsed
            .filter(|measured| *measured >= self.min_duration)
            .map(Self::format_duration)
    }
}

impl Report for ConsoleReport {
    fn run_title(&mut self, title: &str) {
        println!("= {title} =");
    }

    fn input_parsed(&mut self, elapsed: Option<Duration>) {
        if let Some(formatted_duration) = self.format_duration_above_min(elapsed) {
            println!("Input parsed in {formatted_duration}");
        }
    }

    fn answer_start(&mut self, label: &str) {
        println!("-- {label} --");
    }

    fn answer(&mut self, _label: &str, value: &dyn Display, elapsed: Option<Duration>) {
        if let Some(formatted_duration) = self.format_duration_above_min(elapsed) {
            println!("{value} ({formatted_duration})");
        } else {
            println!("{value}");
        }
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let input_str = get_input(&args.input)?;
    let mut report = ConsoleReport::new(Duration::from_millis(args.min_timing_ms));
    almanac::solve(&input_str, &mut report, args.timed).map_err(|dyn_error| {
        let anyhow_error = Error::from_boxed(dyn_error);
        anyhow_error.context("failed to solve the almanac")
    })
}
