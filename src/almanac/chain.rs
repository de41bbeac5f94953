use std::num::ParseIntError;

use regex::Regex;
use solver_harness::parsing::{FieldError, parse_field};
use thiserror::Error;

use super::span::{Id, IdSpan, SpanOverflow};
use super::table::Translator;

/// An error raised while building a [`TranslatorChain`] from input lines.
///
/// All variants are fatal: the chain is either built completely or not at
/// all. Line numbers are one-based positions in the original input.
#[derive(Error, Debug)]
pub(crate) enum ChainError {
    /// Content appeared where a map header was required.
    #[error("line {line}: expected a \"<from>-to-<to> map:\" header, found {text:?}")]
    MalformedHeader { line: usize, text: String },

    /// A map range line was not exactly three parseable integers.
    #[error("line {line}: expected three integers for a map range, found {text:?}")]
    MalformedNumber {
        line: usize,
        text: String,
        #[source]
        source: Option<FieldError<ParseIntError>>,
    },

    /// A map range declaration did not fit in the id domain.
    #[error("line {line}: invalid range in the {map:?} map")]
    InvalidRange {
        line: usize,
        map: String,
        #[source]
        source: SpanOverflow,
    },

    /// The input defined no translation maps at all.
    #[error("input defines no translation maps")]
    EmptyChain,
}

/// Builds a [`TranslatorChain`] from input lines, one line at a time.
///
/// The builder is a small state machine over the line stream:
/// - a header line closes any open map and opens a new one;
/// - a line containing digits folds into the open map as a range triple
///   (`destination_start source_start length`);
/// - a blank line, or a line matching neither pattern, closes the open map;
/// - [`finish`][Self::finish] flushes the map left open at end of input.
pub(crate) struct ChainBuilder {
    /// Regex matching a map header and capturing its `<from>-to-<to>` label.
    header_re: Regex,
    stages: Vec<Translator>,
    open: Option<Translator>,
}

impl ChainBuilder {
    const HEADER_PATTERN: &str = r"(\w+-to-\w+) map:";

    pub(crate) fn new() -> Self {
        let header_re = Regex::new(Self::HEADER_PATTERN).expect("pattern should be valid");
        Self {
            header_re,
            stages: Vec::new(),
            open: None,
        }
    }

    fn close_open(&mut self) {
        if let Some(stage) = self.open.take() {
            self.stages.push(stage);
        }
    }

    /// Feed one input line to the builder.
    ///
    /// # Errors
    ///
    /// Returns a [`ChainError`] when the line is malformed; see the variant
    /// docs. Construction cannot be resumed after an error.
    pub(crate) fn push_line(&mut self, line: usize, text: &str) -> Result<(), ChainError> {
        if let Some(captures) = self.header_re.captures(text) {
            self.close_open();
            let label = captures
                .get(1)
                .expect("label should be in capture group 1")
                .as_str();
            self.open = Some(Translator::new(label));
            return Ok(());
        }

        if text.bytes().any(|byte| byte.is_ascii_digit()) {
            let Some(stage) = self.open.as_mut() else {
                return Err(ChainError::MalformedHeader {
                    line,
                    text: text.to_owned(),
                });
            };

            let fields: Vec<_> = text.split_whitespace().collect();
            let [destination_field, source_field, length_field] = fields[..] else {
                return Err(ChainError::MalformedNumber {
                    line,
                    text: text.to_owned(),
                    source: None,
                });
            };
            let destination_start = Self::range_field(line, text, destination_field)?;
            let source_start = Self::range_field(line, text, source_field)?;
            let length = Self::range_field(line, text, length_field)?;

            stage
                .add_range(source_start, destination_start, length)
                .map_err(|source| ChainError::InvalidRange {
                    line,
                    map: stage.label().to_owned(),
                    source,
                })?;
            return Ok(());
        }

        if text.trim().is_empty() {
            self.close_open();
            return Ok(());
        }

        // free-form text closes an open map; without one, a header was
        // required here
        if self.open.is_some() {
            self.close_open();
            Ok(())
        } else {
            Err(ChainError::MalformedHeader {
                line,
                text: text.to_owned(),
            })
        }
    }

    fn range_field(line: usize, text: &str, field: &str) -> Result<Id, ChainError> {
        parse_field(field).map_err(|source| ChainError::MalformedNumber {
            line,
            text: text.to_owned(),
            source: Some(source),
        })
    }

    /// Flush any open map and return the finished chain.
    ///
    /// The flush makes input without a trailing blank line build the same
    /// chain as input with one.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::EmptyChain`] when no maps were parsed.
    pub(crate) fn finish(mut self) -> Result<TranslatorChain, ChainError> {
        self.close_open();
        if self.stages.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        Ok(TranslatorChain {
            stages: self.stages,
        })
    }
}

/// The fixed, ordered sequence of translation stages.
///
/// Stage order is the order the maps appear in the input; each stage's
/// destination domain feeds the next stage's source domain. Immutable once
/// built.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TranslatorChain {
    stages: Vec<Translator>,
}

impl TranslatorChain {
    /// Map one identifier through every stage in order.
    pub(crate) fn translate(&self, id: Id) -> Id {
        self.stages
            .iter()
            .fold(id, |current, stage| stage.translate(current))
    }

    /// Map a set of spans through every stage in order.
    ///
    /// Spans split wherever they cross a stage's entry boundaries, so the
    /// result is the exact image of the inputs without visiting individual
    /// identifiers. Empty inputs are dropped and every returned span is
    /// non-empty.
    pub(crate) fn translate_spans(&self, spans: Vec<IdSpan>) -> Vec<IdSpan> {
        self.stages.iter().fold(spans, |current, stage| {
            let mut next = Vec::new();
            for span in current {
                stage.translate_span(span, &mut next);
            }
            next
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(lines: &[&str]) -> Result<TranslatorChain, ChainError> {
        let mut builder = ChainBuilder::new();
        for (index, &text) in lines.iter().enumerate() {
            builder.push_line(index + 1, text)?;
        }
        builder.finish()
    }

    #[test]
    fn builds_stages_in_file_order() -> Result<(), ChainError> {
        let chain = build(&[
            "light-to-temperature map:",
            "45 77 23",
            "",
            "temperature-to-humidity map:",
            "0 69 1",
            "",
        ])?;

        let mut first = Translator::new("light-to-temperature");
        let mut second = Translator::new("temperature-to-humidity");
        first
            .add_range(77, 45, 23)
            .expect("range should fit the id domain");
        second
            .add_range(69, 0, 1)
            .expect("range should fit the id domain");
        assert_eq!(
            chain,
            TranslatorChain {
                stages: vec![first, second]
            }
        );
        Ok(())
    }

    #[test]
    fn missing_trailing_blank_line_builds_the_same_chain() -> Result<(), ChainError> {
        let flushed = build(&["a-to-b map:", "10 20 5"])?;
        let terminated = build(&["a-to-b map:", "10 20 5", ""])?;
        assert_eq!(flushed, terminated);
        Ok(())
    }

    #[test]
    fn free_form_text_closes_the_open_map() -> Result<(), ChainError> {
        let chain = build(&[
            "a-to-b map:",
            "10 20 5",
            "that was the first map",
            "b-to-c map:",
            "0 5 5",
        ])?;
        // the stray line ended the first map, so both maps still exist
        assert_eq!(chain.translate(20), 10);
        assert_eq!(chain.translate(5), 0);
        Ok(())
    }

    #[test]
    fn content_before_any_header_is_rejected() {
        let result = build(&["10 20 5"]);
        assert!(matches!(
            result,
            Err(ChainError::MalformedHeader { line: 1, .. })
        ));

        let result = build(&["not a header", "a-to-b map:"]);
        assert!(matches!(
            result,
            Err(ChainError::MalformedHeader { line: 1, .. })
        ));
    }

    #[test]
    fn wrong_field_count_is_fatal() {
        let result = build(&["a-to-b map:", "10 20"]);
        assert!(matches!(
            result,
            Err(ChainError::MalformedNumber {
                line: 2,
                source: None,
                ..
            })
        ));
    }

    #[test]
    fn unparseable_field_is_fatal() {
        let result = build(&["a-to-b map:", "10 x20 5"]);
        assert!(matches!(
            result,
            Err(ChainError::MalformedNumber {
                line: 2,
                source: Some(_),
                ..
            })
        ));
    }

    #[test]
    fn overflowing_range_is_fatal() {
        let result = build(&["a-to-b map:", "0 18446744073709551615 2"]);
        assert!(matches!(result, Err(ChainError::InvalidRange { line: 2, .. })));
    }

    #[test]
    fn input_without_maps_is_an_empty_chain_error() {
        assert!(matches!(build(&[]), Err(ChainError::EmptyChain)));
        assert!(matches!(build(&["", ""]), Err(ChainError::EmptyChain)));
    }

    #[test]
    fn translate_folds_left_through_the_stages() -> Result<(), ChainError> {
        let chain = build(&[
            "seed-to-soil map:",
            "50 98 2",
            "52 50 48",
            "",
            "soil-to-fertilizer map:",
            "0 15 37",
            "37 52 2",
            "39 0 15",
        ])?;
        // 79 -> soil 81 -> fertilizer 81; 14 is passed through to soil, then
        // shifted into 53 by the second stage
        assert_eq!(chain.translate(79), 81);
        assert_eq!(chain.translate(14), 53);
        Ok(())
    }

    #[test]
    fn translate_spans_matches_pointwise_translation() -> Result<(), ChainError> {
        let chain = build(&[
            "a-to-b map:",
            "100 20 15",
            "0 60 5",
            "",
            "b-to-c map:",
            "500 0 200",
        ])?;

        let spans = vec![IdSpan::new(0, 80), IdSpan::new(100, 130)];
        let mut split_image: Vec<Id> = chain
            .translate_spans(spans.clone())
            .iter()
            .flat_map(|span| span.start..span.end)
            .collect();
        split_image.sort_unstable();

        let mut pointwise_image: Vec<Id> = spans
            .iter()
            .flat_map(|span| span.start..span.end)
            .map(|id| chain.translate(id))
            .collect();
        pointwise_image.sort_unstable();

        assert_eq!(split_image, pointwise_image);
        Ok(())
    }
}
