use alloc::string::String;
use alloc::vec::Vec;

use crate::hyphenation::SOFT_HYPHEN;
use crate::paragraph::WordEntry;
use crate::style::{ParagraphStyle, TextAlign, WordStyle};

/// A word positioned on a line.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlacedWord {
    /// Display text with soft hyphens removed.
    pub text: String,
    /// Left edge relative to the paragraph's content box.
    pub x_px: i32,
    pub style: WordStyle,
    /// The word was glued to its predecessor in the source stream.
    pub attached: bool,
}

/// One laid-out line of a paragraph.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Line {
    pub words: Vec<PlacedWord>,
    /// Style of the paragraph the line belongs to.
    pub paragraph: ParagraphStyle,
    /// Alignment after resolving the document default.
    pub alignment: TextAlign,
    /// Width the line was broken against (page width less any indent).
    pub available_width_px: i32,
    pub is_first_line: bool,
    /// Final line of the paragraph; never justified.
    pub is_last_line: bool,
}

impl Line {
    /// Words joined the way they were written: a space before each word that
    /// is not attached to its predecessor.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (idx, word) in self.words.iter().enumerate() {
            if idx > 0 && !word.attached {
                out.push(' ');
            }
            out.push_str(&word.text);
        }
        out
    }
}

/// Precomputed placement for one line before its words are drained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LineGeometry {
    pub word_count: usize,
    pub start_x: i32,
    pub gap_px: i32,
    pub available_px: i32,
    pub is_first: bool,
    pub is_last: bool,
}

/// Alignment arithmetic for `words` laid on one line.
///
/// `indent_px` is the first-line indent (zero on later lines); it only moves
/// the start of left and justified lines.
pub(crate) fn line_geometry(
    words: &[WordEntry],
    available_px: i32,
    indent_px: i32,
    space_px: i32,
    alignment: TextAlign,
    is_first: bool,
    is_last: bool,
) -> LineGeometry {
    let words_width: i32 = words.iter().map(|word| word.width_px).sum();
    let gaps = words
        .iter()
        .skip(1)
        .filter(|word| !word.attach_to_previous)
        .count() as i32;
    let spare = available_px - words_width;
    let natural_gaps = gaps * space_px;

    let gap_px = if alignment == TextAlign::Justify && !is_last && gaps >= 1 {
        spare / gaps
    } else {
        space_px
    };
    // Oversized forced lines would start left of the box; pin them to zero.
    let start_x = match alignment {
        TextAlign::Right => (spare - natural_gaps).max(0),
        TextAlign::Center => ((spare - natural_gaps) / 2).max(0),
        _ => indent_px,
    };

    LineGeometry {
        word_count: words.len(),
        start_x,
        gap_px,
        available_px,
        is_first,
        is_last,
    }
}

/// Move the next `geometry.word_count` entries out of `source` into a line.
pub(crate) fn materialize_line<I>(
    source: &mut I,
    geometry: &LineGeometry,
    paragraph: ParagraphStyle,
    alignment: TextAlign,
) -> Line
where
    I: Iterator<Item = WordEntry>,
{
    let mut words = Vec::with_capacity(geometry.word_count);
    let mut x = geometry.start_x;
    for (idx, entry) in source.by_ref().take(geometry.word_count).enumerate() {
        if idx > 0 && !entry.attach_to_previous {
            x += geometry.gap_px;
        }
        let mut text = entry.text;
        if text.contains(SOFT_HYPHEN) {
            text.retain(|ch| ch != SOFT_HYPHEN);
        }
        words.push(PlacedWord {
            text,
            x_px: x,
            style: entry.style,
            attached: entry.attach_to_previous,
        });
        x += entry.width_px;
    }

    Line {
        words,
        paragraph,
        alignment,
        available_width_px: geometry.available_px,
        is_first_line: geometry.is_first,
        is_last_line: geometry.is_last,
    }
}
