use alloc::string::String;
use alloc::vec::Vec;

use crate::engine::LayoutEngine;
use crate::materialize::Line;
use crate::measure::WidthProvider;
use crate::style::{ParagraphStyle, TextAlign, WordStyle};

/// Visual indent prepended to the first word when CSS gives none.
const FALLBACK_INDENT: char = '\u{2003}';

/// One buffered word.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordEntry {
    pub(crate) text: String,
    pub(crate) style: WordStyle,
    pub(crate) attach_to_previous: bool,
    /// Valid only inside a layout pass.
    pub(crate) width_px: i32,
}

impl WordEntry {
    pub(crate) fn new(text: String, style: WordStyle, attach_to_previous: bool) -> Self {
        Self {
            text,
            style,
            attach_to_previous,
            width_px: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> WordStyle {
        self.style
    }

    /// Rendered with no inter-word space before it.
    pub fn attaches_to_previous(&self) -> bool {
        self.attach_to_previous
    }
}

/// Ordered word buffer for one paragraph.
///
/// Words are appended by the owner and drained by layout calls as lines are
/// emitted. A paragraph may be laid out in several calls; first-line
/// treatment (indent, narrower width) applies only until the first line has
/// been emitted.
#[derive(Clone, Debug)]
pub struct ParagraphBuffer {
    words: Vec<WordEntry>,
    style: ParagraphStyle,
    hyphenation: bool,
    first_line_emitted: bool,
    indent_resolved: bool,
}

impl ParagraphBuffer {
    /// Empty paragraph. `hyphenation` selects the hyphenating break strategy.
    pub fn new(style: ParagraphStyle, hyphenation: bool) -> Self {
        Self {
            words: Vec::with_capacity(32),
            style,
            hyphenation,
            first_line_emitted: false,
            indent_resolved: false,
        }
    }

    /// Append a space-separated word. Empty text is ignored.
    pub fn add_word(&mut self, text: impl Into<String>, style: WordStyle) {
        self.add_word_with(text, style, false, false);
    }

    /// Append a word glued to the previous one (no space before it).
    pub fn add_attached_word(&mut self, text: impl Into<String>, style: WordStyle) {
        self.add_word_with(text, style, false, true);
    }

    /// Append a word with explicit underline and attachment flags.
    pub fn add_word_with(
        &mut self,
        text: impl Into<String>,
        style: WordStyle,
        underline: bool,
        attach_to_previous: bool,
    ) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        let style = if underline {
            style | WordStyle::UNDERLINE
        } else {
            style
        };
        self.words
            .push(WordEntry::new(text, style, attach_to_previous));
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn style(&self) -> &ParagraphStyle {
        &self.style
    }

    pub fn hyphenation_enabled(&self) -> bool {
        self.hyphenation
    }

    /// Words still buffered, in order.
    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    /// No line of this paragraph has been emitted yet.
    pub fn first_line_pending(&self) -> bool {
        !self.first_line_emitted
    }

    /// Lay out buffered words against `page_width_px` and emit lines.
    ///
    /// With `include_last_line` unset the final computed line stays buffered
    /// so more words can join it. Returns the number of lines emitted.
    pub fn layout_and_extract_lines<W, F>(
        &mut self,
        engine: &mut LayoutEngine,
        measurer: &W,
        page_width_px: i32,
        include_last_line: bool,
        on_line: F,
    ) -> usize
    where
        W: WidthProvider + ?Sized,
        F: FnMut(Line),
    {
        engine.layout_with_width(self, measurer, page_width_px, include_last_line, on_line)
    }

    pub(crate) fn words_mut(&mut self) -> &mut Vec<WordEntry> {
        &mut self.words
    }

    pub(crate) fn mark_first_line_emitted(&mut self) {
        self.first_line_emitted = true;
    }

    /// Prefix an em space when the paragraph has no CSS indent, no extra
    /// spacing, and a left or justified first line. Runs once.
    pub(crate) fn resolve_fallback_indent(&mut self, alignment: TextAlign) {
        if self.indent_resolved || self.first_line_emitted || self.words.is_empty() {
            return;
        }
        self.indent_resolved = true;
        if self.style.extra_paragraph_spacing
            || self.style.text_indent_defined
            || !alignment.honors_indent()
        {
            return;
        }
        self.words[0].text.insert(0, FALLBACK_INDENT);
    }
}
