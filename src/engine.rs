use alloc::string::String;
use alloc::vec::Vec;

use crate::config::LayoutConfig;
use crate::hyphenation::Hyphenator;
use crate::line_break::{
    greedy_hyphenated_breaks, optimal_breaks, split_oversized_words, BreakContext, BreakScratch,
};
use crate::materialize::{line_geometry, materialize_line, Line, LineGeometry};
use crate::measure::WidthProvider;
use crate::paragraph::ParagraphBuffer;
use crate::style::WordStyle;

/// Buffers reused across layout calls so steady-state passes do not
/// reallocate.
#[derive(Clone, Debug, Default)]
pub(crate) struct LayoutScratch {
    breaks: BreakScratch,
    geometry: Vec<LineGeometry>,
    measure: String,
}

/// Paragraph layout engine for one open document.
///
/// Owns the configuration, the document's [`Hyphenator`], and the scratch
/// buffers every pass reuses. Engines are independent; nothing is shared
/// between instances.
#[derive(Clone, Debug)]
pub struct LayoutEngine {
    cfg: LayoutConfig,
    hyphenator: Hyphenator,
    scratch: LayoutScratch,
}

impl LayoutEngine {
    /// Engine without a pattern table (fallback breaks only).
    pub fn new(cfg: LayoutConfig) -> Self {
        Self {
            cfg,
            hyphenator: Hyphenator::none(),
            scratch: LayoutScratch::default(),
        }
    }

    pub fn with_hyphenator(mut self, hyphenator: Hyphenator) -> Self {
        self.hyphenator = hyphenator;
        self
    }

    /// Select the pattern table for a newly opened document's language.
    pub fn set_preferred_language(&mut self, tag: &str) {
        self.hyphenator = Hyphenator::for_language(tag);
        log::debug!(
            "layout: preferred language {:?} -> {:?}",
            tag,
            self.hyphenator.language()
        );
    }

    pub fn set_hyphenator(&mut self, hyphenator: Hyphenator) {
        self.hyphenator = hyphenator;
    }

    pub fn hyphenator(&self) -> &Hyphenator {
        &self.hyphenator
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.cfg
    }

    pub fn set_config(&mut self, cfg: LayoutConfig) {
        self.cfg = cfg;
    }

    /// Lay out `paragraph` at the configured page width.
    ///
    /// See [`ParagraphBuffer::layout_and_extract_lines`].
    pub fn layout_paragraph<W, F>(
        &mut self,
        paragraph: &mut ParagraphBuffer,
        measurer: &W,
        include_last_line: bool,
        on_line: F,
    ) -> usize
    where
        W: WidthProvider + ?Sized,
        F: FnMut(Line),
    {
        let width = self.cfg.page_width_px;
        self.layout_with_width(paragraph, measurer, width, include_last_line, on_line)
    }

    /// Lay out `paragraph` against `page_width_px`, emitting lines in order
    /// and draining their words from the buffer.
    pub fn layout_with_width<W, F>(
        &mut self,
        paragraph: &mut ParagraphBuffer,
        measurer: &W,
        page_width_px: i32,
        include_last_line: bool,
        mut on_line: F,
    ) -> usize
    where
        W: WidthProvider + ?Sized,
        F: FnMut(Line),
    {
        if paragraph.is_empty() {
            return 0;
        }

        let page_width_px = page_width_px.max(1);
        let paragraph_style = *paragraph.style();
        let alignment = paragraph_style
            .alignment
            .resolve(self.cfg.default_alignment);
        paragraph.resolve_fallback_indent(alignment);

        let first_line_pending = paragraph.first_line_pending();
        let indent_px = if first_line_pending {
            paragraph_style.first_line_indent_px(alignment)
        } else {
            0
        };
        let hyphenating = paragraph.hyphenation_enabled();

        let ctx = BreakContext {
            measurer,
            hyphenator: &self.hyphenator,
            font_id: self.cfg.font_id,
            space_px: measurer.measure_space(self.cfg.font_id, WordStyle::REGULAR),
            page_width_px,
            lead_width_px: (page_width_px - indent_px).max(1),
            max_lines: self.cfg.max_lines(),
            max_presplits: self.cfg.max_presplits,
        };

        let scratch = &mut self.scratch;
        let words = paragraph.words_mut();
        for word in words.iter_mut() {
            word.width_px = ctx.measure_visible(&word.text, word.style, &mut scratch.measure);
        }

        let truncated = if hyphenating {
            greedy_hyphenated_breaks(words, &ctx, &mut scratch.breaks)
        } else {
            split_oversized_words(words, &ctx, &mut scratch.breaks.split);
            optimal_breaks(words, &ctx, &mut scratch.breaks)
        };

        let ends = &scratch.breaks.ends;
        let computed = ends.len();
        let emit = if include_last_line || truncated {
            computed
        } else {
            computed.saturating_sub(1)
        };
        if emit == 0 {
            return 0;
        }

        scratch.geometry.clear();
        let mut start = 0usize;
        for (line_idx, &end) in ends.iter().take(emit).enumerate() {
            let is_first = first_line_pending && line_idx == 0;
            let is_last = include_last_line && !truncated && line_idx + 1 == computed;
            let (available, indent) = if is_first {
                (ctx.lead_width_px, indent_px)
            } else {
                (page_width_px, 0)
            };
            scratch.geometry.push(line_geometry(
                &words[start..end],
                available,
                indent,
                ctx.space_px,
                alignment,
                is_first,
                is_last,
            ));
            start = end;
        }

        let consumed = start;
        let mut drained = words.drain(..consumed);
        for geometry in scratch.geometry.iter() {
            on_line(materialize_line(
                &mut drained,
                geometry,
                paragraph_style,
                alignment,
            ));
        }
        drop(drained);

        paragraph.mark_first_line_emitted();
        log::debug!(
            "layout: emitted {} of {} lines ({} words left, truncated={})",
            emit,
            computed,
            paragraph.len(),
            truncated
        );
        emit
    }
}
