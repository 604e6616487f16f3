//! Streaming front end that keeps paragraph buffers bounded.
//!
//! A [`FlowSession`] accepts words one at a time and flushes a chunk of
//! lines whenever the open paragraph reaches the configured word threshold.
//! The final computed line of each chunk stays buffered so later words can
//! still join it, which keeps the output identical to laying the paragraph
//! out in one call in the common case.

use alloc::string::String;
use alloc::vec::Vec;

use crate::engine::LayoutEngine;
use crate::materialize::Line;
use crate::measure::WidthProvider;
use crate::paragraph::ParagraphBuffer;
use crate::style::{ParagraphStyle, WordStyle};

/// Counters for one flow session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlowStats {
    /// Paragraphs opened.
    pub paragraphs: usize,
    /// Lines emitted, across all paragraphs.
    pub lines: usize,
    /// Mid-paragraph flushes triggered by the word threshold.
    pub chunk_flushes: usize,
    /// Largest number of words buffered at once.
    pub peak_buffered_words: usize,
}

/// Incremental paragraph layout over a word stream.
///
/// Lines are either queued (plain `add_*`/`end_paragraph` calls, collected
/// with [`FlowSession::drain_lines`]) or streamed to a callback (the
/// `*_with_lines` variants).
#[derive(Debug)]
pub struct FlowSession<M> {
    engine: LayoutEngine,
    measurer: M,
    paragraph: Option<ParagraphBuffer>,
    lines: Vec<Line>,
    stats: FlowStats,
}

impl<M: WidthProvider> FlowSession<M> {
    pub fn new(engine: LayoutEngine, measurer: M) -> Self {
        Self {
            engine,
            measurer,
            paragraph: None,
            lines: Vec::new(),
            stats: FlowStats::default(),
        }
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut LayoutEngine {
        &mut self.engine
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    pub fn stats(&self) -> FlowStats {
        self.stats
    }

    /// Words buffered in the open paragraph.
    pub fn buffered_words(&self) -> usize {
        self.paragraph.as_ref().map_or(0, ParagraphBuffer::len)
    }

    /// Open a paragraph, closing any paragraph still open.
    ///
    /// Hyphenation follows the engine's reader setting.
    pub fn begin_paragraph(&mut self, style: ParagraphStyle) {
        let hyphenation = self.engine.config().hyphenation;
        self.begin_paragraph_with(style, hyphenation);
    }

    /// Open a paragraph with an explicit hyphenation choice.
    pub fn begin_paragraph_with(&mut self, style: ParagraphStyle, hyphenation: bool) {
        self.queue(|session, sink| {
            session.close_paragraph(sink);
            session.open_paragraph(style, hyphenation);
        });
    }

    pub fn add_word(&mut self, text: impl Into<String>, style: WordStyle) {
        self.add_word_with(text, style, false, false);
    }

    pub fn add_attached_word(&mut self, text: impl Into<String>, style: WordStyle) {
        self.add_word_with(text, style, false, true);
    }

    pub fn add_word_with(
        &mut self,
        text: impl Into<String>,
        style: WordStyle,
        underline: bool,
        attach_to_previous: bool,
    ) {
        let text = text.into();
        self.queue(|session, sink| {
            session.push_word(text, style, underline, attach_to_previous, sink);
        });
    }

    /// Like [`FlowSession::add_word_with`], streaming any flushed lines.
    pub fn add_word_with_lines<F>(
        &mut self,
        text: impl Into<String>,
        style: WordStyle,
        attach_to_previous: bool,
        mut on_line: F,
    ) where
        F: FnMut(Line),
    {
        self.push_word(text.into(), style, false, attach_to_previous, &mut on_line);
    }

    /// Lay out the rest of the open paragraph, last line included.
    pub fn end_paragraph(&mut self) {
        self.queue(|session, sink| session.close_paragraph(sink));
    }

    pub fn end_paragraph_with_lines<F>(&mut self, mut on_line: F)
    where
        F: FnMut(Line),
    {
        self.close_paragraph(&mut on_line);
    }

    /// Take every queued line.
    pub fn drain_lines(&mut self) -> Vec<Line> {
        core::mem::take(&mut self.lines)
    }

    /// Close the open paragraph and stream every queued and remaining line.
    pub fn finish<F>(&mut self, mut on_line: F) -> FlowStats
    where
        F: FnMut(Line),
    {
        for line in self.lines.drain(..) {
            on_line(line);
        }
        self.close_paragraph(&mut on_line);
        self.stats
    }

    fn queue<R>(&mut self, op: impl FnOnce(&mut Self, &mut dyn FnMut(Line)) -> R) -> R {
        let mut queued = core::mem::take(&mut self.lines);
        let out = op(self, &mut |line: Line| queued.push(line));
        self.lines = queued;
        out
    }

    fn open_paragraph(&mut self, style: ParagraphStyle, hyphenation: bool) {
        self.paragraph = Some(ParagraphBuffer::new(style, hyphenation));
        self.stats.paragraphs += 1;
    }

    fn push_word<F>(
        &mut self,
        text: String,
        style: WordStyle,
        underline: bool,
        attach_to_previous: bool,
        on_line: &mut F,
    ) where
        F: FnMut(Line) + ?Sized,
    {
        if self.paragraph.is_none() {
            self.open_paragraph(ParagraphStyle::default(), self.engine.config().hyphenation);
        }
        let threshold = self.engine.config().flush_threshold();
        let Some(paragraph) = self.paragraph.as_mut() else {
            return;
        };
        paragraph.add_word_with(text, style, underline, attach_to_previous);
        let buffered = paragraph.len();
        self.stats.peak_buffered_words = self.stats.peak_buffered_words.max(buffered);
        if buffered < threshold {
            return;
        }

        let stats = &mut self.stats;
        let emitted = self
            .engine
            .layout_paragraph(paragraph, &self.measurer, false, |line| {
                stats.lines += 1;
                on_line(line);
            });
        stats.chunk_flushes += 1;
        log::debug!(
            "flow: chunk flush at {} buffered words emitted {} lines ({} kept)",
            buffered,
            emitted,
            paragraph.len()
        );
    }

    fn close_paragraph<F>(&mut self, on_line: &mut F)
    where
        F: FnMut(Line) + ?Sized,
    {
        let Some(mut paragraph) = self.paragraph.take() else {
            return;
        };
        let stats = &mut self.stats;
        // Several calls when the per-call line cap leaves words behind.
        while !paragraph.is_empty() {
            let emitted = self
                .engine
                .layout_paragraph(&mut paragraph, &self.measurer, true, |line| {
                    stats.lines += 1;
                    on_line(line);
                });
            if emitted == 0 {
                break;
            }
        }
    }
}
