// Copyright 2026 the Lineal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{lay_out, test_model};
use crate::Direction;

#[test]
fn deleting_a_separator_merges_paragraphs() {
    let mut fixture = test_model("Hello world\ndemo\n", &[]);
    fixture.model.replace(11..12, "");
    fixture.expect_paragraphs(&[(0, 16)]);
}

#[test]
fn inserting_a_separator_splits_a_paragraph() {
    let mut fixture = test_model("Hello world\n", &[]);
    fixture.model.replace(5..5, "\n");
    fixture.expect_paragraphs(&[(0, 6), (6, 7)]);
}

#[test]
fn appending_continues_an_unterminated_paragraph() {
    let mut fixture = test_model("abc", &[]);
    fixture.model.replace(3..3, "def");
    fixture.expect_paragraphs(&[(0, 6)]);
}

#[test]
fn appending_after_a_separator_starts_a_new_paragraph() {
    let mut fixture = test_model("abc\n", &[]);
    fixture.model.replace(4..4, "x");
    fixture.expect_paragraphs(&[(0, 4), (4, 1)]);
}

#[test]
fn replacing_mid_paragraph_keeps_neighbours() {
    let mut fixture = test_model("one\ntwo\nthree\n", &[]);
    fixture.model.replace(4..7, "2");
    fixture.expect_paragraphs(&[(0, 4), (4, 2), (6, 6)]);
}

#[test]
fn deleting_everything_empties_the_model() {
    let mut fixture = test_model("abc\nדו\n", &[]);
    fixture.model.replace(0..7, "");
    fixture.expect_paragraphs(&[]);
}

#[test]
fn edits_drop_stale_line_info() {
    let mut fixture = test_model("שלום", &[]);
    assert!(fixture.model.fetch_bidirectional_line_info(&fixture.visual, 0));

    fixture.model.replace(0..4, "abcd");
    fixture.visual = lay_out(&fixture.model, &[]);

    assert!(!fixture.model.fetch_bidirectional_line_info(&fixture.visual, 0));
    assert!(fixture.model.bidirectional_line_info().is_none());
}

#[test]
fn later_bidi_paragraphs_survive_edits_with_shifted_ranges() {
    let mut fixture = test_model("hello\nשלום\n", &[]);
    assert!(fixture.model.fetch_bidirectional_line_info(&fixture.visual, 6));

    fixture.model.replace(0..5, "hi");
    fixture = fixture.expect_paragraphs(&[(0, 3), (3, 5)]);
    fixture.visual = lay_out(&fixture.model, &[]);

    assert!(fixture.model.fetch_bidirectional_line_info(&fixture.visual, 3));
    assert_eq!(fixture.model.logical_character_index(3), 6);
}

#[test]
fn direction_queries() {
    let mut fixture = test_model("hello\nשלום עולם\n", &[]);
    assert!(!fixture.model.has_bidirectional_text());

    assert_eq!(fixture.model.paragraph_direction(0), Direction::Ltr);
    assert_eq!(fixture.model.paragraph_direction(1), Direction::Rtl);
    assert!(fixture.model.has_bidirectional_text());

    assert!(!fixture.model.character_direction(0));
    assert!(fixture.model.character_direction(6));
    // The space between the Hebrew words resolves to the paragraph level.
    assert!(fixture.model.character_direction(10));
    // The separator sits outside the analyzed content.
    assert!(!fixture.model.character_direction(15));
}
