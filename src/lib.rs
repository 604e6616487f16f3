//! Paragraph layout and hyphenation for fixed-width e-ink displays.
//!
//! Words are appended to a [`ParagraphBuffer`], laid out by a
//! [`LayoutEngine`] against a caller-supplied [`WidthProvider`], and emitted
//! as pixel-positioned [`Line`]s through a callback. Long paragraphs are
//! flushed in chunks (see [`FlowSession`]) so peak memory stays bounded by
//! one chunk of buffered words rather than the whole paragraph.
//!
//! ```
//! use ink_layout::{
//!     HeuristicWidthProvider, Hyphenator, LayoutConfig, LayoutEngine, ParagraphBuffer,
//!     ParagraphStyle, WordStyle,
//! };
//!
//! let mut engine = LayoutEngine::new(LayoutConfig::for_page_width(240))
//!     .with_hyphenator(Hyphenator::for_language("en-US"));
//! let measurer = HeuristicWidthProvider::new(16.0);
//!
//! let mut paragraph = ParagraphBuffer::new(ParagraphStyle::default(), true);
//! for word in "A paragraph of characteristically unremarkable words.".split(' ') {
//!     paragraph.add_word(word, WordStyle::REGULAR);
//! }
//!
//! let mut lines = Vec::new();
//! engine.layout_paragraph(&mut paragraph, &measurer, true, |line| lines.push(line));
//! assert!(paragraph.is_empty());
//! assert!(lines.len() >= 2);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

extern crate alloc;

mod config;
mod engine;
mod error;
mod flow;
mod hyphenation;
mod line_break;
mod materialize;
mod measure;
mod paragraph;
mod style;

pub use config::LayoutConfig;
pub use engine::LayoutEngine;
pub use error::PatternError;
pub use flow::{FlowSession, FlowStats};
pub use hyphenation::{
    BreakInfo, BreakList, HyphenScratch, Hyphenator, Language, PatternTable, SOFT_HYPHEN,
};
pub use materialize::{Line, PlacedWord};
pub use measure::{FontId, HeuristicWidthProvider, WidthProvider};
pub use paragraph::{ParagraphBuffer, WordEntry};
pub use style::{ParagraphStyle, TextAlign, WordStyle};
