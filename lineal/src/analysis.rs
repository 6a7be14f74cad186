// Copyright 2026 the Lineal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-paragraph bidirectional analysis.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use unicode_bidi::{BidiClass, BidiDataSource, BidiInfo, HardcodedBidiData};

use crate::{CharacterIndex, Length};

/// A bidirectional embedding level (even = LTR, odd = RTL).
pub(crate) type BidiLevel = u8;

/// Base direction of a paragraph or line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Left-to-right.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl Direction {
    /// True for [`Direction::Rtl`].
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

/// Bidirectional analysis of one paragraph.
///
/// Exists only for paragraphs containing at least one strongly
/// right-to-left character. Absence means the paragraph is pure LTR and
/// every map over it is the identity; callers must treat it that way
/// rather than synthesizing an all-zero level table.
///
/// The analysis is computed once per paragraph and shared by every visual
/// line the paragraph wraps into.
#[derive(Clone, Debug)]
pub struct BidiParagraphInfo {
    range: Range<CharacterIndex>,
    direction: Direction,
    base_level: BidiLevel,
    levels: Vec<BidiLevel>,
    classes: Vec<BidiClass>,
}

impl BidiParagraphInfo {
    /// Resolves embedding levels for one paragraph.
    ///
    /// `chars` is the paragraph's content without its trailing separator
    /// and `range` the global character range that content covers. Returns
    /// `None` when no character is strongly right-to-left (this covers the
    /// empty paragraph).
    pub fn analyze(range: Range<CharacterIndex>, chars: &[char]) -> Option<Self> {
        debug_assert_eq!(range.end - range.start, chars.len(), "range/content length mismatch");
        if !chars.iter().copied().any(needs_bidi_resolution) {
            return None;
        }

        let text: String = chars.iter().collect();
        let info = BidiInfo::new(&text, None);
        // The content carries no separator, so the analysis has exactly one
        // paragraph.
        debug_assert_eq!(info.paragraphs.len(), 1, "separator left in paragraph content");
        let base_level = info.paragraphs[0].level;

        // `unicode-bidi` indexes by byte; the model indexes by character.
        let mut levels = Vec::with_capacity(chars.len());
        let mut classes = Vec::with_capacity(chars.len());
        for (byte_index, _) in text.char_indices() {
            levels.push(info.levels[byte_index].number());
            classes.push(info.original_classes[byte_index]);
        }

        Some(Self {
            range,
            direction: if base_level.is_rtl() { Direction::Rtl } else { Direction::Ltr },
            base_level: base_level.number(),
            levels,
            classes,
        })
    }

    /// The global character range the analysis covers, trailing separator
    /// excluded.
    pub fn range(&self) -> Range<CharacterIndex> {
        self.range.clone()
    }

    /// The paragraph's base direction, from its first strong character.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn base_level(&self) -> BidiLevel {
        self.base_level
    }

    pub(crate) fn levels(&self) -> &[BidiLevel] {
        &self.levels
    }

    pub(crate) fn classes(&self) -> &[BidiClass] {
        &self.classes
    }

    pub(crate) fn shift(&mut self, removed: Length, inserted: Length) {
        self.range.start = self.range.start + inserted - removed;
        self.range.end = self.range.end + inserted - removed;
    }
}

/// True when `ch` forces bidirectional processing for its paragraph.
fn needs_bidi_resolution(ch: char) -> bool {
    matches!(
        HardcodedBidiData.bidi_class(ch),
        BidiClass::R
            | BidiClass::AL
            | BidiClass::AN
            | BidiClass::RLE
            | BidiClass::RLO
            | BidiClass::RLI
    )
}
