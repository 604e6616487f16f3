use crate::measure::FontId;
use crate::style::TextAlign;

/// Buffered words at which a flow session flushes a chunk of lines.
pub(crate) const DEFAULT_MAX_BUFFERED_WORDS: usize = 750;
/// Lines a single layout call may emit before it stops and leaves the rest
/// buffered.
pub(crate) const DEFAULT_MAX_LINES_PER_CALL: usize = 1000;
/// In-place splits the oversized-word pre-pass may perform per call.
pub(crate) const DEFAULT_MAX_PRESPLITS: usize = 4096;

/// Layout configuration for one reader session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Width lines are broken against.
    pub page_width_px: i32,
    /// Font handle passed to the width provider.
    pub font_id: FontId,
    /// Alignment used for paragraphs styled `UseDocumentDefault`.
    pub default_alignment: TextAlign,
    /// Reader setting: break paragraphs with the hyphenating strategy.
    pub hyphenation: bool,
    /// Flush threshold for chunked paragraph layout.
    pub max_buffered_words: usize,
    /// Defensive cap on lines emitted per layout call.
    pub max_lines_per_call: usize,
    /// Defensive cap on oversized-word splits per layout call.
    pub max_presplits: usize,
}

impl LayoutConfig {
    /// Defaults with the given page width.
    pub fn for_page_width(page_width_px: i32) -> Self {
        Self {
            page_width_px,
            ..Self::default()
        }
    }

    /// Builder-style setter for the hyphenation reader setting.
    pub fn with_hyphenation(mut self, enabled: bool) -> Self {
        self.hyphenation = enabled;
        self
    }

    /// Builder-style setter for the document default alignment.
    pub fn with_default_alignment(mut self, alignment: TextAlign) -> Self {
        self.default_alignment = alignment;
        self
    }

    pub(crate) fn max_lines(self) -> usize {
        self.max_lines_per_call.max(1)
    }

    pub(crate) fn flush_threshold(self) -> usize {
        self.max_buffered_words.max(2)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width_px: 464,
            font_id: 0,
            default_alignment: TextAlign::Justify,
            hyphenation: true,
            max_buffered_words: DEFAULT_MAX_BUFFERED_WORDS,
            max_lines_per_call: DEFAULT_MAX_LINES_PER_CALL,
            max_presplits: DEFAULT_MAX_PRESPLITS,
        }
    }
}
