//! The report sink and the run driver.
//!
//! A solver does not print: it pushes events into a [`Report`] sink while a
//! [`Run`] drives its steps. The binary decides how (and whether) events are
//! shown, and the same solver runs silently under tests.

use std::fmt::Display;
use std::time::{Duration, Instant};

use crate::{AnyResult, FromInput};

/// A sink for the output events of one solver run.
///
/// Durations are only passed when the run measures its steps; `None` means
/// timing was not requested, not that a step was instant.
pub trait Report {
    /// Called once with the solver's display title, before any other event.
    fn run_title(&mut self, title: &str);

    /// Called when the input has been parsed successfully.
    fn input_parsed(&mut self, elapsed: Option<Duration>);

    /// Called with an answer's label before the step starts computing.
    fn answer_start(&mut self, label: &str);

    /// Called with an answer's label and value when the step finishes.
    fn answer(&mut self, label: &str, value: &dyn Display, elapsed: Option<Duration>);
}

/// Evaluate a closure, measuring its wall-clock duration when `timed` is set.
fn measure_if<T>(timed: bool, f: impl FnOnce() -> T) -> (T, Option<Duration>) {
    if timed {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();
        (result, Some(elapsed))
    } else {
        (f(), None)
    }
}

/// A driver for one solver run.
///
/// The driver owns the run's [`Report`] sink and timing flag, so solver code
/// reads as a sequence of [`parse`][Self::parse] and [`answer`][Self::answer]
/// steps without threading either through every call.
pub struct Run<'a> {
    sink: &'a mut dyn Report,
    timed: bool,
}

impl<'a> Run<'a> {
    /// Start a run, emitting the title to the sink.
    pub fn new(title: &str, sink: &'a mut dyn Report, timed: bool) -> Self {
        sink.run_title(title);
        Self { sink, timed }
    }

    /// Parse the input through [`FromInput`], reporting the parse step.
    ///
    /// # Errors
    ///
    /// Any dynamically dispatched error from parsing is propagated; nothing
    /// is reported for a failed parse.
    pub fn parse<D: FromInput>(&mut self, input: &str) -> AnyResult<D> {
        let (result, elapsed) = measure_if(self.timed, || D::from_input(input));
        let parsed = result?;
        self.sink.input_parsed(elapsed);
        Ok(parsed)
    }

    /// Compute one labeled answer and report it.
    ///
    /// # Errors
    ///
    /// Any dynamically dispatched error from the step is propagated; the
    /// label is reported as started but no answer event is emitted.
    pub fn answer<T, F>(&mut self, label: &str, step: F) -> AnyResult<()>
    where
        T: Display,
        F: FnOnce() -> AnyResult<T>,
    {
        self.sink.answer_start(label);
        let (result, elapsed) = measure_if(self.timed, step);
        let value = result?;
        self.sink.answer(label, &value, elapsed);
        Ok(())
    }
}
