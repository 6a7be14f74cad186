// Copyright 2026 the Lineal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line-granularity visual reordering.
//!
//! The paragraph analysis resolves embedding levels once; this module
//! applies the per-line steps of UAX #9: rule L1 resets separators and
//! line-final whitespace to the paragraph level, rule L2 reverses runs
//! from the highest level down to the lowest odd level. Both operate on a
//! line's sub-slice of the paragraph tables, which is why the same
//! paragraph can reorder differently on every line it wraps into.

use alloc::vec::Vec;

use smallvec::SmallVec;
use unicode_bidi::BidiClass;

use crate::analysis::BidiLevel;

/// Computes the visual-to-logical permutation for one line.
///
/// `levels` and `classes` are the line's slice of the owning paragraph's
/// tables; `para_level` is the paragraph's base level. Position `v` of the
/// returned map holds the line-relative logical index of the character
/// drawn at visual position `v`.
pub(crate) fn visual_to_logical(
    levels: &[BidiLevel],
    classes: &[BidiClass],
    para_level: BidiLevel,
) -> Vec<usize> {
    debug_assert_eq!(levels.len(), classes.len(), "level/class tables out of step");

    let mut levels: SmallVec<[BidiLevel; 32]> = SmallVec::from_slice(levels);
    reset_line_levels(&mut levels, classes, para_level);

    let mut map: Vec<usize> = (0..levels.len()).collect();

    let mut max_level = 0;
    let mut lowest_odd_level = BidiLevel::MAX;
    for &level in &levels {
        if level > max_level {
            max_level = level;
        }
        if level & 1 != 0 && level < lowest_odd_level {
            lowest_odd_level = level;
        }
    }
    if lowest_odd_level == BidiLevel::MAX {
        // Nothing right-to-left on this line.
        return map;
    }

    // L2: reverse every contiguous sequence at or above each level,
    // highest level first. Sequences at a given level nest inside those of
    // lower levels, so detecting them against the logical-order level
    // table stays valid across iterations.
    for level in (lowest_odd_level..=max_level).rev() {
        let mut i = 0;
        while i < levels.len() {
            if levels[i] >= level {
                let start = i;
                while i < levels.len() && levels[i] >= level {
                    i += 1;
                }
                map[start..i].reverse();
            } else {
                i += 1;
            }
        }
    }

    map
}

/// Rule L1: separators, and whitespace or isolate-formatting runs that end
/// the line or precede a separator, go back to the paragraph level.
fn reset_line_levels(levels: &mut [BidiLevel], classes: &[BidiClass], para_level: BidiLevel) {
    use BidiClass::*;

    let mut reset_from: Option<usize> = Some(0);
    let mut reset_to: Option<usize> = None;
    let mut prev_level = para_level;

    for (i, &class) in classes.iter().enumerate() {
        match class {
            // Segment and paragraph separators.
            B | S => {
                reset_to = Some(i + 1);
                if reset_from.is_none() {
                    reset_from = Some(i);
                }
            }
            // Whitespace and isolate formatting characters.
            WS | FSI | LRI | RLI | PDI => {
                if reset_from.is_none() {
                    reset_from = Some(i);
                }
            }
            // Retained explicit formatting characters take the level of
            // the preceding character.
            RLE | LRE | RLO | LRO | PDF | BN => {
                if reset_from.is_none() {
                    reset_from = Some(i);
                }
                levels[i] = prev_level;
            }
            _ => {
                reset_from = None;
            }
        }
        if let (Some(from), Some(to)) = (reset_from, reset_to) {
            for level in &mut levels[from..to] {
                *level = para_level;
            }
            reset_from = None;
            reset_to = None;
        }
        prev_level = levels[i];
    }
    if let Some(from) = reset_from {
        for level in &mut levels[from..] {
            *level = para_level;
        }
    }
}
