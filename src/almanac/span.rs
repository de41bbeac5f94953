use thiserror::Error;

/// The integer type for identifiers in the almanac.
///
/// Production inputs declare ranges spanning hundreds of millions of ids, so
/// identifiers are sized well past the observed 10 digit numbers.
pub(crate) type Id = u64;

/// A span's exclusive end does not fit in the id domain.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("span starting at {start} with length {length} does not fit in the id domain")]
pub(crate) struct SpanOverflow {
    start: Id,
    length: Id,
}

/// A half-open span of identifiers: `start` inclusive, `end` exclusive.
///
/// `start >= end` is a valid empty span. Empty spans show up as byproducts of
/// intersecting and splitting; they are filtered where produced, never raised
/// as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IdSpan {
    pub(crate) start: Id,
    pub(crate) end: Id,
}

impl IdSpan {
    pub(crate) fn new(start: Id, end: Id) -> Self {
        Self { start, end }
    }

    /// Build a span from an inclusive start and a length.
    ///
    /// # Errors
    ///
    /// Returns [`SpanOverflow`] when `start + length` exceeds the id domain.
    pub(crate) fn from_start_length(start: Id, length: Id) -> Result<Self, SpanOverflow> {
        let end = start
            .checked_add(length)
            .ok_or(SpanOverflow { start, length })?;
        Ok(Self { start, end })
    }

    pub(crate) fn is_empty(self) -> bool {
        self.start >= self.end
    }

    pub(crate) fn contains(self, id: Id) -> bool {
        self.start <= id && id < self.end
    }

    /// The overlap of two spans; empty when they are disjoint.
    pub(crate) fn intersection(self, other: Self) -> Self {
        Self {
            start: self.start.max(other.start),
            end: self.end.min(other.end),
        }
    }
}
