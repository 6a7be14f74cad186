// Copyright 2026 the Lineal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{LogicalModel, VisualModel};

/// A model plus the visual line table the layout engine would supply.
pub(crate) struct TestModel {
    pub(crate) model: LogicalModel,
    pub(crate) visual: VisualModel,
}

/// Builds a model for `text` with one visual line per paragraph, wrapped
/// further at `extra_wraps`.
pub(crate) fn test_model(text: &str, extra_wraps: &[usize]) -> TestModel {
    let mut model = LogicalModel::new();
    model.set_text(text);
    let visual = lay_out(&model, extra_wraps);
    TestModel { model, visual }
}

/// Rebuilds the visual line table, e.g. after an edit or re-wrap.
pub(crate) fn lay_out(model: &LogicalModel, extra_wraps: &[usize]) -> VisualModel {
    let mut breaks: Vec<usize> = model
        .paragraphs()
        .iter()
        .map(|run| run.range().end)
        .collect();
    breaks.extend_from_slice(extra_wraps);
    breaks.sort_unstable();
    breaks.dedup();

    let mut ranges = Vec::new();
    let mut start = 0;
    for &end in &breaks {
        if end > start {
            ranges.push(start..end);
            start = end;
        }
    }
    VisualModel::from_line_ranges(ranges)
}

impl TestModel {
    pub(crate) fn expect_paragraphs(self, expected: &[(usize, usize)]) -> Self {
        let actual: Vec<(usize, usize)> = self
            .model
            .paragraphs()
            .iter()
            .map(|run| (run.start(), run.len()))
            .collect();
        assert_eq!(actual, expected, "paragraph table mismatch");
        self
    }

    pub(crate) fn expect_find(self, index: usize, count: usize, expected: &[usize]) -> Self {
        assert_eq!(
            self.model.find_paragraphs(index, count),
            expected,
            "find_paragraphs({index}, {count}) mismatch"
        );
        self
    }

    pub(crate) fn expect_fetch(mut self, index: usize, expected: bool) -> Self {
        assert_eq!(
            self.model.fetch_bidirectional_line_info(&self.visual, index),
            expected,
            "fetch mismatch at character {index}"
        );
        self
    }

    pub(crate) fn expect_fetch_line(mut self, index: usize, expected: bool, line: usize) -> Self {
        assert_eq!(
            self.model.fetch_bidirectional_line_info(&self.visual, index),
            expected,
            "fetch mismatch at character {index}"
        );
        assert_eq!(
            self.model.bidirectional_line_index(),
            line,
            "cached bidi line index mismatch at character {index}"
        );
        self
    }

    /// Fetches the line containing `fetch_at` and checks the logical
    /// character index of each of its visual positions.
    pub(crate) fn expect_logical_characters(mut self, fetch_at: usize, expected: &[usize]) -> Self {
        assert!(
            self.model.fetch_bidirectional_line_info(&self.visual, fetch_at),
            "expected bidi info at character {fetch_at}"
        );
        let run = self
            .model
            .bidirectional_line_info()
            .expect("fetched line info")
            .run();
        let actual: Vec<usize> = (run.start..run.start + expected.len())
            .map(|visual| self.model.logical_character_index(visual))
            .collect();
        assert_eq!(actual, expected, "visual to logical character mismatch");
        self
    }

    /// Fetches the line containing `fetch_at` and checks the logical
    /// cursor index of each of its visual cursor positions.
    pub(crate) fn expect_logical_cursors(mut self, fetch_at: usize, expected: &[usize]) -> Self {
        assert!(
            self.model.fetch_bidirectional_line_info(&self.visual, fetch_at),
            "expected bidi info at character {fetch_at}"
        );
        let run = self
            .model
            .bidirectional_line_info()
            .expect("fetched line info")
            .run();
        let actual: Vec<usize> = (run.start..run.start + expected.len())
            .map(|visual| self.model.logical_cursor_index(visual))
            .collect();
        assert_eq!(actual, expected, "visual to logical cursor mismatch");
        self
    }

    /// Fetches the line containing `fetch_at` and checks that character
    /// translation round-trips at every visual position.
    pub(crate) fn expect_round_trip(mut self, fetch_at: usize) -> Self {
        assert!(
            self.model.fetch_bidirectional_line_info(&self.visual, fetch_at),
            "expected bidi info at character {fetch_at}"
        );
        let info = self
            .model
            .bidirectional_line_info()
            .expect("fetched line info");
        let start = info.run().start;
        let len = info.map_len();
        for visual in start..start + len {
            let logical = self.model.logical_character_index(visual);
            assert_eq!(
                self.model.visual_character_index(logical),
                visual,
                "round trip mismatch at visual {visual}"
            );
        }
        self
    }
}
