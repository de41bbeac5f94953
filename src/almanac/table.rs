use super::span::{Id, IdSpan, SpanOverflow};

/// A mapped range of identifiers: a source span shifted onto a destination
/// start.
#[derive(Debug, PartialEq, Eq)]
struct RangeEntry {
    source: IdSpan,
    destination_start: Id,
}

impl RangeEntry {
    /// Shift a piece of the source span onto the destination side.
    ///
    /// Callers pass a non-empty piece contained in `source`; the checked ends
    /// established by [`Translator::add_range`] make the shift overflow-free.
    fn project(&self, piece: IdSpan) -> IdSpan {
        let start = self.destination_start + (piece.start - self.source.start);
        IdSpan::new(start, start + (piece.end - piece.start))
    }
}

/// A single translation stage mapping identifiers from one domain to the
/// next.
///
/// Entries stay in insertion (file) order and lookups take the first
/// containing entry, so overlap between entries resolves to whichever was
/// declared first. Identifiers no entry contains pass through unchanged;
/// passthrough is the designed default, not an error.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Translator {
    /// The `<from>-to-<to>` text this stage was declared with.
    label: String,
    entries: Vec<RangeEntry>,
}

impl Translator {
    pub(crate) fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    /// Append an entry mapping `[source_start, source_start + length)` onto
    /// `[destination_start, destination_start + length)`.
    ///
    /// A zero-length entry is accepted and inert: it can never contain an
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SpanOverflow`] when either exclusive end exceeds the id
    /// domain.
    pub(crate) fn add_range(
        &mut self,
        source_start: Id,
        destination_start: Id,
        length: Id,
    ) -> Result<(), SpanOverflow> {
        let source = IdSpan::from_start_length(source_start, length)?;
        // the destination end is not stored, but it must exist in the domain
        IdSpan::from_start_length(destination_start, length)?;
        self.entries.push(RangeEntry {
            source,
            destination_start,
        });
        Ok(())
    }

    /// Map one identifier through this stage.
    pub(crate) fn translate(&self, id: Id) -> Id {
        for entry in &self.entries {
            if entry.source.contains(id) {
                return entry.destination_start + (id - entry.source.start);
            }
        }
        // no entry claims this id, it passes through unchanged
        id
    }

    /// Map a whole span through this stage, appending its image spans to
    /// `out`.
    ///
    /// The span is intersected against each entry in insertion order. Claimed
    /// pieces are shifted by that entry's offset; unclaimed remainders stay
    /// on a worklist for later entries, so overlapping entries resolve the
    /// same way as [`translate`][Self::translate]. Whatever survives every
    /// entry passes through unchanged. Every appended span is non-empty.
    pub(crate) fn translate_span(&self, span: IdSpan, out: &mut Vec<IdSpan>) {
        if span.is_empty() {
            return;
        }

        let mut unclaimed = vec![span];
        for entry in &self.entries {
            let mut remaining = Vec::new();
            for piece in unclaimed {
                let claimed = piece.intersection(entry.source);
                if claimed.is_empty() {
                    remaining.push(piece);
                    continue;
                }
                out.push(entry.project(claimed));
                let before = IdSpan::new(piece.start, claimed.start);
                if !before.is_empty() {
                    remaining.push(before);
                }
                let after = IdSpan::new(claimed.end, piece.end);
                if !after.is_empty() {
                    remaining.push(after);
                }
            }
            unclaimed = remaining;
            if unclaimed.is_empty() {
                break;
            }
        }
        out.extend(unclaimed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soil_table() -> Translator {
        let mut table = Translator::new("seed-to-soil");
        table
            .add_range(98, 50, 2)
            .expect("range should fit the id domain");
        table
            .add_range(50, 52, 48)
            .expect("range should fit the id domain");
        table
    }

    #[test]
    fn unmapped_ids_pass_through() {
        let table = soil_table();
        assert_eq!(table.translate(0), 0);
        assert_eq!(table.translate(49), 49);
        assert_eq!(table.translate(100), 100);
    }

    #[test]
    fn mapped_ids_shift_by_the_entry_offset() {
        let table = soil_table();
        assert_eq!(table.translate(98), 50);
        assert_eq!(table.translate(99), 51);
        assert_eq!(table.translate(79), 81);
        assert_eq!(table.translate(14), 14);
    }

    #[test]
    fn source_start_is_inclusive_and_source_end_is_exclusive() {
        let mut table = Translator::new("bounds");
        table
            .add_range(10, 100, 5)
            .expect("range should fit the id domain");
        assert_eq!(table.translate(10), 100);
        assert_eq!(table.translate(14), 104);
        // 15 == source end, which is outside the half-open span
        assert_eq!(table.translate(15), 15);
    }

    #[test]
    fn first_entry_in_insertion_order_wins_on_overlap() {
        let mut table = Translator::new("overlap");
        table
            .add_range(10, 100, 10)
            .expect("range should fit the id domain");
        table
            .add_range(15, 200, 10)
            .expect("range should fit the id domain");
        // 15..20 is covered by both entries; the first declared one claims it
        assert_eq!(table.translate(15), 105);
        assert_eq!(table.translate(19), 109);
        // 20..25 is only covered by the second entry
        assert_eq!(table.translate(20), 205);
    }

    #[test]
    fn zero_length_entry_never_matches() {
        let mut table = Translator::new("inert");
        table
            .add_range(10, 100, 0)
            .expect("zero length range should be accepted");
        assert_eq!(table.translate(10), 10);
    }

    #[test]
    fn add_range_rejects_overflowing_ends() {
        let mut table = Translator::new("overflow");
        assert!(table.add_range(Id::MAX, 0, 2).is_err());
        assert!(table.add_range(0, Id::MAX, 2).is_err());
    }

    #[test]
    fn span_overlapping_one_entry_splits_into_three_pieces() {
        let mut table = Translator::new("split");
        table
            .add_range(10, 100, 10)
            .expect("range should fit the id domain");
        let mut out = Vec::new();
        table.translate_span(IdSpan::new(5, 25), &mut out);
        out.sort_by_key(|span| span.start);
        assert_eq!(
            out,
            vec![
                IdSpan::new(5, 10),
                IdSpan::new(20, 25),
                IdSpan::new(100, 110),
            ]
        );
    }

    #[test]
    fn empty_span_produces_nothing() {
        let table = soil_table();
        let mut out = Vec::new();
        table.translate_span(IdSpan::new(60, 60), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn span_splitting_is_lossless() {
        let mut table = Translator::new("lossless");
        for (source_start, destination_start, length) in [(20, 200, 15), (30, 400, 20), (60, 0, 5)]
        {
            table
                .add_range(source_start, destination_start, length)
                .expect("range should fit the id domain");
        }

        let span = IdSpan::new(0, 100);
        let mut out = Vec::new();
        table.translate_span(span, &mut out);

        let mut split_image: Vec<Id> = out
            .iter()
            .flat_map(|piece| piece.start..piece.end)
            .collect();
        split_image.sort_unstable();
        let mut pointwise_image: Vec<Id> = (span.start..span.end)
            .map(|id| table.translate(id))
            .collect();
        pointwise_image.sort_unstable();
        assert_eq!(split_image, pointwise_image);
    }
}
