//! Harness of traits and utilities for running a puzzle solver.
//!
//! # Quick Start
//!
//! 1. Define your input type and implement [`FromInput`]:
//!
//! ```
//! # use solver_harness::{AnyResult, FromInput};
//! #
//! struct Lines(Vec<String>);
//!
//! impl FromInput for Lines {
//!     fn from_input(input: &str) -> AnyResult<Self> {
//!         Ok(Self(input.lines().map(String::from).collect()))
//!     }
//! }
//! ```
//!
//! 2. Drive the solver with a [`Run`][report::Run], reporting through a
//!    [`Report`][report::Report] sink:
//!
//! ```
//! use solver_harness::report::{Report, Run};
//! use solver_harness::{AnyResult, FromInput};
//! #
//! # struct Lines(Vec<String>);
//! # impl FromInput for Lines {
//! #     fn from_input(input: &str) -> AnyResult<Self> {
//! #         Ok(Self(input.lines().map(String::from).collect()))
//! #     }
//! # }
//! # struct Quiet;
//! # impl Report for Quiet {
//! #     fn run_title(&mut self, _title: &str) {}
//! #     fn input_parsed(&mut self, _elapsed: Option<std::time::Duration>) {}
//! #     fn answer_start(&mut self, _label: &str) {}
//! #     fn answer(
//! #         &mut self,
//! #         _label: &str,
//! #         _value: &dyn std::fmt::Display,
//! #         _elapsed: Option<std::time::Duration>,
//! #     ) {
//! #     }
//! # }
//!
//! fn solve(input: &str, sink: &mut dyn Report, timed: bool) -> AnyResult<()> {
//!     let mut run = Run::new("Line Counter", sink, timed);
//!     let lines: Lines = run.parse(input)?;
//!     run.answer("line count", || Ok(lines.0.len()))
//! }
//! #
//! # let mut quiet = Quiet;
//! # solve("a\nb\n", &mut quiet, false).unwrap();
//! ```

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
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;

pub mod parsing;
pub mod report;

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type AnyError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return an [`AnyError`] as an error.
pub type AnyResult<T> = Result<T, AnyError>;

/// A trait for data structures that are created by parsing the whole input
/// string.
///
/// A [`Run`][report::Run] constructs the solver's input through this trait so
/// the parse step can be measured and reported like any other step.
pub trait FromInput: Sized {
    /// Parse an input string into an instance of self.
    ///
    /// # Errors
    ///
    /// If parsing fails, the resulting error is returned as a dynamically
    /// dispatched error.
    fn from_input(input: &str) -> AnyResult<Self>;
}
