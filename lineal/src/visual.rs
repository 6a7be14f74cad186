// Copyright 2026 the Lineal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visual model boundary.
//!
//! Line layout is produced by the layout engine after wrapping; this crate
//! only reads it. The orchestrating control must finalize the line table
//! before any bidirectional line info is fetched against it.

use alloc::vec::Vec;
use core::ops::Range;

use crate::{CharacterIndex, Length};

/// One wrapped line of laid-out text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualLine {
    range: Range<CharacterIndex>,
}

impl VisualLine {
    /// The line's character range, in logical order.
    pub fn range(&self) -> Range<CharacterIndex> {
        self.range.clone()
    }

    /// Number of characters on the line.
    pub fn len(&self) -> Length {
        self.range.end - self.range.start
    }

    /// True when the line holds no characters.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// The layout engine's table of visual lines.
///
/// Lines are sorted, contiguous and cover the whole text; a line never
/// crosses a paragraph boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisualModel {
    lines: Vec<VisualLine>,
}

impl VisualModel {
    /// Builds the table from the lines' character ranges.
    pub fn from_line_ranges<I>(ranges: I) -> Self
    where
        I: IntoIterator<Item = Range<CharacterIndex>>,
    {
        let lines: Vec<VisualLine> = ranges.into_iter().map(|range| VisualLine { range }).collect();
        debug_assert!(
            lines
                .windows(2)
                .all(|pair| pair[0].range.end == pair[1].range.start),
            "visual lines must be contiguous"
        );
        Self { lines }
    }

    /// The laid-out lines.
    pub fn lines(&self) -> &[VisualLine] {
        &self.lines
    }

    /// The line containing `index`, if the layout covers it.
    pub fn line_containing(&self, index: CharacterIndex) -> Option<&VisualLine> {
        let at = self.lines.partition_point(|line| line.range.end <= index);
        self.lines.get(at).filter(|line| line.range.contains(&index))
    }
}
