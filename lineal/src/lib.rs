// Copyright 2026 the Lineal Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logical/visual index translation for bidirectional text.
//!
//! Text is stored in *logical* order (the order characters are typed) but
//! drawn in *visual* order, and for mixed left-to-right/right-to-left
//! scripts the two differ per wrapped line. This crate owns that
//! reconciliation for a text control: a paragraph table over the logical
//! text, per-paragraph embedding-level analysis, a lazily-filled cache of
//! per-line reorder tables, and the index-translation queries cursor
//! placement, hit-testing and selection are built on.
//!
//! Embedding-level resolution (UAX #9 rules P/X/W/N/I) is delegated to the
//! [`unicode-bidi`] crate; the value here is applying the line-level rules
//! (L1/L2) per *visual line* and keeping the resulting tables consistent
//! while the text is edited and re-wrapped.
//!
//! [`unicode-bidi`]: https://docs.rs/unicode-bidi

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

mod analysis;
mod lines;
mod model;
mod paragraphs;
mod reorder;
mod visual;

#[cfg(test)]
mod tests;

pub use analysis::{BidiParagraphInfo, Direction};
pub use lines::BidiLineInfo;
pub use model::LogicalModel;
pub use paragraphs::ParagraphRun;
pub use visual::{VisualLine, VisualModel};

/// Index of a character in logical (storage) order.
pub type CharacterIndex = usize;

/// A number of characters.
pub type Length = usize;
