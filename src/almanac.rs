//! The seed almanac solver.
//!
//! The input declares seed numbers and an ordered cascade of piecewise
//! remapping tables. [`solve`] reports the lowest final-domain value for both
//! readings of the seed line: every number as one seed, and the numbers as
//! `(start, length)` range pairs.

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use regex::Regex;
use solver_harness::parsing::parse_field;
use solver_harness::report::{Report, Run};
use solver_harness::{AnyResult, FromInput};
use thiserror::Error;

mod chain;
mod span;
mod table;

use chain::{ChainBuilder, TranslatorChain};
use span::{Id, IdSpan, SpanOverflow};

/*
Input is an almanac. The first line lists seed numbers; the rest of the input
is blocks of maps, each opened by a `<from>-to-<to> map:` header and followed
by range triples `destination_start source_start length`.

Maps apply in the order they appear: each map's destination domain feeds the
next map's source domain, ending in the location domain. Numbers outside every
range of a map pass through it unchanged.
*/

#[derive(Error, Debug)]
enum AlmanacError {
    /// The input had no first line to read seeds from.
    #[error("expected a seed line as the first line of input")]
    MissingSeedLine,

    /// The first line contained no numbers.
    #[error("no seed numbers found on the first line: {0:?}")]
    NoSeeds(String),

    /// The range reading decodes `(start, length)` pairs, so an odd count of
    /// seed numbers cannot be decoded.
    #[error("seed ranges are (start, length) pairs, found {0} seed numbers")]
    OddSeedPair(usize),

    /// A seed range declaration did not fit in the id domain.
    #[error("invalid seed range")]
    InvalidSeedRange(#[from] SpanOverflow),

    /// Every declared seed range was empty, so no location exists.
    #[error("all seed ranges are empty")]
    EmptySeedRanges,
}

/// The parsed input: seed numbers plus the translation chain.
struct Almanac {
    /// Seed numbers in the order they appear on the seed line.
    ///
    /// Construction guarantees at least one number.
    seeds: Vec<Id>,
    chain: TranslatorChain,
}

impl FromInput for Almanac {
    fn from_input(input: &str) -> AnyResult<Self> {
        const NUMBER_PATTERN: &str = r"\d+";
        let number_re = Regex::new(NUMBER_PATTERN).expect("pattern should be valid");

        let mut lines = input.lines();
        let seed_line = lines.next().ok_or(AlmanacError::MissingSeedLine)?;
        // scan for numbers rather than requiring a "seeds:" label
        let seeds = number_re
            .find_iter(seed_line)
            .map(|found| parse_field::<Id>(found.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        if seeds.is_empty() {
            return Err(AlmanacError::NoSeeds(seed_line.to_owned()).into());
        }

        let mut builder = ChainBuilder::new();
        for (index, text) in lines.enumerate() {
            // one-based line numbers; the seed line was line 1
            builder.push_line(index.saturating_add(2), text)?;
        }
        let chain = builder.finish()?;

        Ok(Self { seeds, chain })
    }
}

/*
The first reading treats every seed number as one seed: map each through the
full chain and take the lowest location.
*/

impl Almanac {
    /// The lowest location reachable from the seed list.
    fn lowest_location(&self) -> Id {
        self.seeds
            .iter()
            .map(|&seed| self.chain.translate(seed))
            .min()
            .expect("construction should guarantee at least one seed")
    }
}

/*
The second reading pairs the seed numbers into (start, length) ranges that are
far too large to enumerate. Whole spans are pushed through the chain instead,
splitting wherever they cross a map boundary; the answer is the lowest start
among the surviving spans.
*/

impl Almanac {
    /// Decode the seed numbers as `(start, length)` range pairs.
    fn seed_spans(&self) -> Result<Vec<IdSpan>, AlmanacError> {
        if self.seeds.len() % 2 != 0 {
            return Err(AlmanacError::OddSeedPair(self.seeds.len()));
        }
        self.seeds
            .chunks_exact(2)
            .map(|pair| IdSpan::from_start_length(pair[0], pair[1]).map_err(AlmanacError::from))
            .collect()
    }

    /// The lowest location reachable from the seed ranges.
    ///
    /// # Errors
    ///
    /// Fails when the seed line does not decode into non-empty ranges; see
    /// [`AlmanacError`].
    fn lowest_location_for_ranges(&self) -> Result<Id, AlmanacError> {
        let located = self.chain.translate_spans(self.seed_spans()?);
        located
            .into_iter()
            .map(|span| span.start)
            .min()
            .ok_or(AlmanacError::EmptySeedRanges)
    }
}

/// Solve the almanac puzzle, reporting an answer for each reading of the seed
/// line.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or solving is propagated.
pub fn solve(input: &str, sink: &mut dyn Report, timed: bool) -> AnyResult<()> {
    let mut run = Run::new("Seed Almanac", sink, timed);
    let almanac: Almanac = run.parse(input)?;
    run.answer("lowest location from the seed list", || {
        Ok(almanac.lowest_location())
    })?;
    run.answer("lowest location from the seed ranges", || {
        Ok(almanac.lowest_location_for_ranges()?)
    })
}
