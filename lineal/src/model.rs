// Copyright 2026 the Lineal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The logical model: the owning orchestrator.

use alloc::vec::Vec;
use core::ops::Range;

use hashbrown::HashMap;

use crate::analysis::BidiParagraphInfo;
use crate::lines::{BidiLineInfo, LineInfoCache};
use crate::paragraphs::{self, ParagraphRun};
use crate::visual::VisualModel;
use crate::{CharacterIndex, Direction, Length};

/// The logical text model.
///
/// Owns the character buffer, the paragraph table, the sparse
/// per-paragraph bidirectional analyses and the per-line reorder cache,
/// and answers the index-translation queries cursor placement, hit-testing
/// and selection logic build on.
///
/// All operations run on the single control thread between the event and
/// relayout phases of the host's update cycle. Edits fully invalidate the
/// caches they affect before returning, so a later query in the same pass
/// never observes stale state; the orchestrator in turn must rebuild
/// paragraph info and finalize the [`VisualModel`] before fetching line
/// info for a changed range.
#[derive(Debug, Default)]
pub struct LogicalModel {
    text: Vec<char>,
    paragraphs: Vec<ParagraphRun>,
    /// Sparse analyses keyed by paragraph start. A key mapped to `None` is
    /// a paragraph known to be pure LTR; a missing key is not yet
    /// analyzed.
    analyses: HashMap<CharacterIndex, Option<BidiParagraphInfo>>,
    lines: LineInfoCache,
}

impl LogicalModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole text, rebuilding the paragraph table and
    /// dropping every cache.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.chars().collect();
        self.paragraphs.clear();
        self.analyses.clear();
        self.lines.clear();
        self.create_paragraph_info(0, self.text.len());
    }

    /// The stored text's character count.
    pub fn character_count(&self) -> Length {
        self.text.len()
    }

    /// The character at `index`.
    pub fn character(&self, index: CharacterIndex) -> char {
        self.text[index]
    }

    // --- Paragraph table ---

    /// Scans `[start_index, start_index + number_of_characters)` for
    /// paragraph separators and inserts the resulting paragraphs at their
    /// sorted position.
    ///
    /// Any stale paragraphs overlapping the range must already have been
    /// removed with [`Self::clear_paragraphs`]. A range beyond the text is
    /// a caller contract violation.
    pub fn create_paragraph_info(
        &mut self,
        start_index: CharacterIndex,
        number_of_characters: Length,
    ) {
        paragraphs::create_paragraphs(
            &self.text,
            &mut self.paragraphs,
            start_index,
            number_of_characters,
        );
    }

    /// Returns the indices of the paragraphs intersecting
    /// `[index, index + number_of_characters)`, in order.
    pub fn find_paragraphs(
        &self,
        index: CharacterIndex,
        number_of_characters: Length,
    ) -> Vec<usize> {
        paragraphs::find_paragraphs(&self.paragraphs, index, number_of_characters)
    }

    /// Removes the paragraphs intersecting `range` together with their
    /// analyses, and drops the line cache.
    ///
    /// The edit path calls this over a changed range before re-creating
    /// paragraph info for it.
    pub fn clear_paragraphs(&mut self, range: Range<CharacterIndex>) {
        if let Some(extent) = paragraphs::clear_paragraphs(&mut self.paragraphs, range) {
            self.analyses.retain(|start, _| !extent.contains(start));
        }
        // Any cached line may reference the cleared content.
        self.lines.clear();
    }

    /// The paragraph table.
    pub fn paragraphs(&self) -> &[ParagraphRun] {
        &self.paragraphs
    }

    // --- Edits ---

    /// Replaces `range` with `replacement`.
    ///
    /// Clears the affected paragraphs, splices the buffer, shifts the
    /// surviving runs and analyses, and re-creates paragraph info over the
    /// affected span, merging with the following paragraph when the edit
    /// removed a separator. Every invalidated cache entry is gone before
    /// this returns.
    pub fn replace(&mut self, range: Range<CharacterIndex>, replacement: &str) {
        debug_assert!(
            range.start <= range.end && range.end <= self.text.len(),
            "edit range beyond the text"
        );
        let removed = range.end - range.start;

        // The affected span covers whole paragraphs around the edit. An
        // insertion just past a final separator touches no paragraph and
        // starts a new one; an insertion at the end of an unterminated
        // text continues its last paragraph.
        let mut touched = self.find_paragraphs(range.start, removed.max(1));
        if touched.is_empty()
            && range.start == self.text.len()
            && self.paragraphs.last().is_some_and(|run| {
                !paragraphs::is_paragraph_separator(self.text[run.range().end - 1])
            })
        {
            touched.push(self.paragraphs.len() - 1);
        }
        let (span_start, span_end_old) = match (touched.first(), touched.last()) {
            (Some(&first), Some(&last)) => {
                (self.paragraphs[first].start(), self.paragraphs[last].range().end)
            }
            _ => (range.start, range.start),
        };

        self.clear_paragraphs(span_start..span_end_old);

        let inserted: Vec<char> = replacement.chars().collect();
        let inserted_len = inserted.len();
        self.text.splice(range, inserted);

        if inserted_len != removed {
            for run in &mut self.paragraphs {
                if run.start() >= span_end_old {
                    run.shift(removed, inserted_len);
                }
            }
            let shifted: Vec<(CharacterIndex, Option<BidiParagraphInfo>)> = self
                .analyses
                .drain()
                .map(|(start, info)| {
                    if start >= span_end_old {
                        let info = info.map(|mut info| {
                            info.shift(removed, inserted_len);
                            info
                        });
                        (start + inserted_len - removed, info)
                    } else {
                        (start, info)
                    }
                })
                .collect();
            self.analyses.extend(shifted);
        }

        let mut span_end = span_end_old + inserted_len - removed;
        if span_end == span_start {
            return;
        }
        // The span may now end mid-paragraph (a separator was deleted);
        // pull following paragraphs in until it ends at a boundary.
        while span_end < self.text.len()
            && !paragraphs::is_paragraph_separator(self.text[span_end - 1])
        {
            let Some(&next) = self.find_paragraphs(span_end, 1).first() else {
                break;
            };
            let next_end = self.paragraphs[next].range().end;
            self.clear_paragraphs(span_end..next_end);
            span_end = next_end;
        }
        self.create_paragraph_info(span_start, span_end - span_start);
    }

    // --- Bidirectional analysis ---

    /// The base direction of paragraph `paragraph_index`, analyzing it on
    /// first use. Pure-LTR paragraphs report [`Direction::Ltr`].
    pub fn paragraph_direction(&mut self, paragraph_index: usize) -> Direction {
        self.ensure_analysis(paragraph_index)
            .map(BidiParagraphInfo::direction)
            .unwrap_or_default()
    }

    /// Direction of the character at `index` (true = right-to-left).
    ///
    /// A paragraph separator, or any character of a pure-LTR paragraph,
    /// reports false.
    pub fn character_direction(&mut self, index: CharacterIndex) -> bool {
        debug_assert!(index < self.text.len(), "character index beyond the text");
        let Some(paragraph_index) = self.paragraph_containing(index) else {
            return false;
        };
        match self.ensure_analysis(paragraph_index) {
            Some(info) if info.range().contains(&index) => {
                info.levels()[index - info.range().start] & 1 != 0
            }
            _ => false,
        }
    }

    /// True when any paragraph analyzed so far required bidirectional
    /// handling.
    pub fn has_bidirectional_text(&self) -> bool {
        self.analyses.values().any(Option::is_some)
    }

    fn ensure_analysis(&mut self, paragraph_index: usize) -> Option<&BidiParagraphInfo> {
        let run = self.paragraphs[paragraph_index].range();
        if !self.analyses.contains_key(&run.start) {
            let mut content_end = run.end;
            if content_end > run.start
                && paragraphs::is_paragraph_separator(self.text[content_end - 1])
            {
                content_end -= 1;
            }
            let info = BidiParagraphInfo::analyze(
                run.start..content_end,
                &self.text[run.start..content_end],
            );
            self.analyses.insert(run.start, info);
        }
        self.analyses[&run.start].as_ref()
    }

    fn paragraph_containing(&self, index: CharacterIndex) -> Option<usize> {
        let at = self
            .paragraphs
            .partition_point(|run| run.range().end <= index);
        (at < self.paragraphs.len() && self.paragraphs[at].range().contains(&index)).then_some(at)
    }

    // --- Line info ---

    /// Ensures the bidirectional info for the line containing
    /// `character_index` is cached, and reports whether that line has any.
    ///
    /// Consumers call this before every translation. `false` means the
    /// line is pure LTR: indices translate as identity and the translation
    /// functions must not be called. An index beyond the laid-out text
    /// reports `false`.
    ///
    /// Repeated fetches against the most recently fetched line return
    /// without recomputation; cursor-traversal loops hit this path once
    /// per character.
    pub fn fetch_bidirectional_line_info(
        &mut self,
        visual: &VisualModel,
        character_index: CharacterIndex,
    ) -> bool {
        if let Some(has_bidi) = self.lines.last_fetched(character_index) {
            return has_bidi;
        }

        if let Some(at) = self.lines.find(character_index) {
            let run = self.lines.get(at).run();
            self.lines.set_current(at);
            self.lines.mark_fetched(run, true);
            return true;
        }

        let Some(line) = visual.line_containing(character_index) else {
            self.lines.set_current(0);
            return false;
        };
        let line_run = line.range();

        match self.compute_line_entry(line_run.clone()) {
            Some(entry) => {
                let at = self.lines.insert(entry);
                self.lines.set_current(at);
                self.lines.mark_fetched(line_run, true);
                true
            }
            None => {
                self.lines.set_current(0);
                self.lines.mark_fetched(line_run, false);
                false
            }
        }
    }

    fn compute_line_entry(&mut self, line_run: Range<CharacterIndex>) -> Option<BidiLineInfo> {
        let paragraph_index = self.paragraph_containing(line_run.start)?;
        debug_assert!(
            line_run.end <= self.paragraphs[paragraph_index].range().end,
            "visual line crosses a paragraph boundary"
        );
        let info = self.ensure_analysis(paragraph_index)?;

        let content = info.range();
        let offset = line_run.start - content.start;
        let len = line_run.end.min(content.end).saturating_sub(line_run.start);
        if len == 0 {
            return None;
        }
        // Only lines that actually hold right-to-left characters get an
        // entry; everything else is identity.
        if !info.levels()[offset..offset + len]
            .iter()
            .any(|&level| level & 1 != 0)
        {
            return None;
        }
        Some(BidiLineInfo::new(line_run, info))
    }

    /// Index into the cached bidi entries of the most recently fetched
    /// bidi line; 0 when the last fetch found a pure-LTR line.
    pub fn bidirectional_line_index(&self) -> usize {
        self.lines.current_index()
    }

    /// The entry for the most recently fetched line, when that line had
    /// bidirectional info.
    pub fn bidirectional_line_info(&self) -> Option<&BidiLineInfo> {
        self.lines.fetched_entry()
    }

    /// Drops every cached line entry.
    ///
    /// The orchestrator calls this after any relayout that may have
    /// changed line wrap boundaries.
    pub fn invalidate_lines(&mut self) {
        self.lines.clear();
    }

    // --- Index translation ---

    /// Translates a visual character index on the fetched line to its
    /// logical character index. Both indices are global.
    ///
    /// [`Self::fetch_bidirectional_line_info`] must have returned `true`
    /// for an index on this line; anything else is a caller contract
    /// violation.
    pub fn logical_character_index(
        &self,
        visual_character_index: CharacterIndex,
    ) -> CharacterIndex {
        let line = self.lines.current_entry();
        debug_assert!(
            line.contains(visual_character_index),
            "index outside the fetched line"
        );
        let offset = visual_character_index - line.run().start;
        if offset < line.map_len() {
            line.run().start + line.visual_to_logical()[offset]
        } else {
            // The trailing separator is never reordered.
            visual_character_index
        }
    }

    /// Translates a logical character index on the fetched line to its
    /// visual character index. Both indices are global.
    ///
    /// Same fetch-first contract as [`Self::logical_character_index`].
    pub fn visual_character_index(
        &self,
        logical_character_index: CharacterIndex,
    ) -> CharacterIndex {
        let line = self.lines.current_entry();
        debug_assert!(
            line.contains(logical_character_index),
            "index outside the fetched line"
        );
        let offset = logical_character_index - line.run().start;
        if offset < line.map_len() {
            line.run().start + line.logical_to_visual()[offset]
        } else {
            logical_character_index
        }
    }

    /// Translates a visual cursor position on the fetched line to the
    /// logical index typing should continue at. Both are global.
    ///
    /// A line of `n` characters has `n + 1` cursor positions; which
    /// logical gap a visual gap denotes depends on the directions on
    /// either side of it. Same fetch-first contract as
    /// [`Self::logical_character_index`].
    pub fn logical_cursor_index(&self, visual_cursor_index: CharacterIndex) -> CharacterIndex {
        let line = self.lines.current_entry();
        let start = line.run().start;
        let content_end = start + line.map_len();
        debug_assert!(
            visual_cursor_index >= start && visual_cursor_index <= line.run().end,
            "cursor index outside the fetched line"
        );

        let rtl = line.direction().is_rtl();
        if visual_cursor_index == start {
            // Visual start of the line: logical end for RTL, start for
            // LTR.
            return if rtl { content_end } else { start };
        }
        if visual_cursor_index >= content_end {
            if visual_cursor_index > content_end {
                // Past the trailing separator.
                return visual_cursor_index;
            }
            return if rtl { start } else { content_end };
        }

        let previous = line.visual_to_logical()[visual_cursor_index - start - 1];
        let current = line.visual_to_logical()[visual_cursor_index - start];
        let previous_rtl = line.char_is_rtl(previous);
        let current_rtl = line.char_is_rtl(current);

        start
            + if previous_rtl == current_rtl {
                // Interior of a single-direction run: an LTR gap takes
                // the logical slot of the character to its visual right,
                // an RTL gap that of the character to its visual left.
                if previous_rtl {
                    previous
                } else {
                    current
                }
            } else if rtl {
                if current_rtl {
                    current + 1
                } else {
                    previous
                }
            } else if previous_rtl {
                previous
            } else {
                current
            }
    }
}
