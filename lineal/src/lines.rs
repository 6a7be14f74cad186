// Copyright 2026 the Lineal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-line bidirectional info cache.

use alloc::vec::Vec;
use core::ops::Range;

use crate::analysis::{BidiParagraphInfo, Direction};
use crate::reorder;
use crate::{CharacterIndex, Length};

/// Cached reorder tables for one visual line.
///
/// `run` covers the whole line, trailing paragraph separator included, so
/// a fetch for any index the line owns finds this entry. The permutation
/// maps cover only the reorderable content; a separator is never reordered
/// and translates as identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidiLineInfo {
    run: Range<CharacterIndex>,
    direction: Direction,
    visual_to_logical: Vec<usize>,
    logical_to_visual: Vec<usize>,
    char_rtl: Vec<bool>,
}

impl BidiLineInfo {
    /// Builds the entry for the line covering `run`, a sub-range of the
    /// paragraph `info` analyzes.
    pub(crate) fn new(run: Range<CharacterIndex>, info: &BidiParagraphInfo) -> Self {
        let content = info.range();
        debug_assert!(run.start >= content.start, "line starts before its paragraph");

        // The line's reorderable content; a trailing separator falls
        // outside the analyzed range.
        let offset = run.start - content.start;
        let len = run.end.min(content.end).saturating_sub(run.start);

        let levels = &info.levels()[offset..offset + len];
        let classes = &info.classes()[offset..offset + len];
        let visual_to_logical = reorder::visual_to_logical(levels, classes, info.base_level());

        let mut logical_to_visual = Vec::new();
        logical_to_visual.resize(len, 0);
        for (visual, &logical) in visual_to_logical.iter().enumerate() {
            logical_to_visual[logical] = visual;
        }
        let char_rtl = levels.iter().map(|&level| level & 1 != 0).collect();

        Self {
            run,
            direction: info.direction(),
            visual_to_logical,
            logical_to_visual,
            char_rtl,
        }
    }

    /// The line's character range, trailing separator included.
    pub fn run(&self) -> Range<CharacterIndex> {
        self.run.clone()
    }

    /// The line's direction (its paragraph's base direction).
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of reorderable characters on the line.
    pub fn map_len(&self) -> Length {
        self.visual_to_logical.len()
    }

    /// The visual-to-logical map, in line-relative indices.
    pub fn visual_to_logical(&self) -> &[usize] {
        &self.visual_to_logical
    }

    /// The logical-to-visual map, in line-relative indices.
    pub fn logical_to_visual(&self) -> &[usize] {
        &self.logical_to_visual
    }

    pub(crate) fn contains(&self, index: CharacterIndex) -> bool {
        self.run.contains(&index)
    }

    /// Direction of the character at line-relative logical `offset`.
    pub(crate) fn char_is_rtl(&self, offset: usize) -> bool {
        self.char_rtl[offset]
    }
}

/// Lazily-filled cache of [`BidiLineInfo`] entries.
///
/// Holds entries only for lines that actually contain right-to-left
/// characters, ordered by character range; pure-LTR lines are remembered
/// only through the last-fetched marker. `current` is the entry index the
/// last successful fetch selected (0 when the last fetched line had no
/// bidi info); index translation always reads through it.
#[derive(Debug, Default)]
pub(crate) struct LineInfoCache {
    entries: Vec<BidiLineInfo>,
    current: usize,
    last_fetched: Option<(Range<CharacterIndex>, bool)>,
}

impl LineInfoCache {
    /// Result of a repeated fetch on the most recently fetched line.
    pub(crate) fn last_fetched(&self, index: CharacterIndex) -> Option<bool> {
        self.last_fetched
            .as_ref()
            .and_then(|(run, has_bidi)| run.contains(&index).then_some(*has_bidi))
    }

    pub(crate) fn mark_fetched(&mut self, run: Range<CharacterIndex>, has_bidi: bool) {
        self.last_fetched = Some((run, has_bidi));
    }

    /// Index of the cached entry covering `index`.
    pub(crate) fn find(&self, index: CharacterIndex) -> Option<usize> {
        let at = self.entries.partition_point(|entry| entry.run().end <= index);
        (at < self.entries.len() && self.entries[at].contains(index)).then_some(at)
    }

    /// Inserts an entry at its sorted position and returns its index.
    pub(crate) fn insert(&mut self, entry: BidiLineInfo) -> usize {
        let at = self
            .entries
            .partition_point(|cached| cached.run().start < entry.run().start);
        self.entries.insert(at, entry);
        at
    }

    pub(crate) fn set_current(&mut self, index: usize) {
        self.current = index;
    }

    pub(crate) fn current_index(&self) -> usize {
        self.current
    }

    /// The entry translation queries read through.
    ///
    /// Calling this without a preceding successful fetch is a caller
    /// contract violation.
    pub(crate) fn current_entry(&self) -> &BidiLineInfo {
        debug_assert!(!self.entries.is_empty(), "no bidirectional line info fetched");
        &self.entries[self.current]
    }

    pub(crate) fn fetched_entry(&self) -> Option<&BidiLineInfo> {
        match &self.last_fetched {
            Some((_, true)) => self.entries.get(self.current),
            _ => None,
        }
    }

    pub(crate) fn get(&self, index: usize) -> &BidiLineInfo {
        &self.entries[index]
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.current = 0;
        self.last_fetched = None;
    }
}
