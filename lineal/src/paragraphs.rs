// Copyright 2026 the Lineal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paragraph table: an ordered, contiguous partition of the logical
//! text into paragraphs.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{CharacterIndex, Length};

/// True for characters that terminate a paragraph.
///
/// This is the bidi class B set, so a paragraph's content never needs
/// further paragraph-level splitting. A separator belongs to the
/// paragraph it ends.
pub(crate) fn is_paragraph_separator(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{001C}' | '\u{001D}' | '\u{001E}' | '\u{0085}' | '\u{2029}'
    )
}

/// The character range of one paragraph.
///
/// Runs in the table are sorted by start index, non-overlapping and
/// contiguous; together they cover the whole text. The trailing separator,
/// when present, is part of the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParagraphRun {
    range: Range<CharacterIndex>,
}

impl ParagraphRun {
    pub(crate) fn new(range: Range<CharacterIndex>) -> Self {
        Self { range }
    }

    /// The paragraph's character range.
    pub fn range(&self) -> Range<CharacterIndex> {
        self.range.clone()
    }

    /// Index of the paragraph's first character.
    pub fn start(&self) -> CharacterIndex {
        self.range.start
    }

    /// Number of characters in the paragraph, trailing separator included.
    pub fn len(&self) -> Length {
        self.range.end - self.range.start
    }

    /// True when the paragraph holds no characters.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub(crate) fn shift(&mut self, removed: Length, inserted: Length) {
        self.range.start = self.range.start + inserted - removed;
        self.range.end = self.range.end + inserted - removed;
    }
}

/// Scans `chars[start_index..start_index + number_of_characters]` for
/// paragraph separators and inserts the resulting runs into `table` at
/// their sorted position.
///
/// A run is emitted ending at (and including) each separator; characters
/// after the last separator form a final run. The caller must already have
/// removed any runs overlapping the range.
pub(crate) fn create_paragraphs(
    chars: &[char],
    table: &mut Vec<ParagraphRun>,
    start_index: CharacterIndex,
    number_of_characters: Length,
) {
    let end_index = start_index + number_of_characters;
    debug_assert!(end_index <= chars.len(), "paragraph range beyond the text");

    let mut new_runs = Vec::new();
    let mut first = start_index;
    for index in start_index..end_index {
        if is_paragraph_separator(chars[index]) {
            new_runs.push(ParagraphRun::new(first..index + 1));
            first = index + 1;
        }
    }
    if first < end_index {
        new_runs.push(ParagraphRun::new(first..end_index));
    }

    if new_runs.is_empty() {
        return;
    }

    let at = table.partition_point(|run| run.start() < start_index);
    debug_assert!(
        table.get(at).is_none_or(|run| run.start() >= end_index),
        "stale paragraphs overlap the recomputed range"
    );
    table.splice(at..at, new_runs);
}

/// Returns the indices of the runs whose character ranges intersect
/// `[index, index + number_of_characters)`.
///
/// A zero-length query intersects nothing and returns an empty sequence.
pub(crate) fn find_paragraphs(
    table: &[ParagraphRun],
    index: CharacterIndex,
    number_of_characters: Length,
) -> Vec<usize> {
    if number_of_characters == 0 {
        return Vec::new();
    }
    let end = index + number_of_characters;
    let first = table.partition_point(|run| run.range().end <= index);
    table[first..]
        .iter()
        .take_while(|run| run.start() < end)
        .enumerate()
        .map(|(offset, _)| first + offset)
        .collect()
}

/// Removes the runs intersecting `range`, returning the overall extent the
/// removed runs covered.
pub(crate) fn clear_paragraphs(
    table: &mut Vec<ParagraphRun>,
    range: Range<CharacterIndex>,
) -> Option<Range<CharacterIndex>> {
    if range.is_empty() {
        return None;
    }
    let first = table.partition_point(|run| run.range().end <= range.start);
    let mut last = first;
    while last < table.len() && table[last].start() < range.end {
        last += 1;
    }
    if first == last {
        return None;
    }
    let extent = table[first].start()..table[last - 1].range().end;
    table.drain(first..last);
    Some(extent)
}
