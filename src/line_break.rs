//! Line partitioning: cost-minimizing and greedy-hyphenating strategies,
//! and the in-place word split both of them fall back on.

use alloc::string::String;
use alloc::vec::Vec;

use crate::hyphenation::{BreakInfo, BreakList, HyphenScratch, Hyphenator, SOFT_HYPHEN};
use crate::measure::{FontId, WidthProvider};
use crate::paragraph::WordEntry;
use crate::style::WordStyle;

const INFEASIBLE: i64 = i64::MAX / 4;
const MAX_COST: i64 = INFEASIBLE - 1;

/// Fixed inputs of one layout pass.
pub(crate) struct BreakContext<'a, W: ?Sized> {
    pub measurer: &'a W,
    pub hyphenator: &'a Hyphenator,
    pub font_id: FontId,
    pub space_px: i32,
    pub page_width_px: i32,
    /// Width of a line starting at word 0; narrower while the paragraph's
    /// first line is still pending and indented.
    pub lead_width_px: i32,
    pub max_lines: usize,
    pub max_presplits: usize,
}

impl<W: WidthProvider + ?Sized> BreakContext<'_, W> {
    fn line_width(&self, starts_at_first_word: bool) -> i32 {
        if starts_at_first_word {
            self.lead_width_px
        } else {
            self.page_width_px
        }
    }

    /// Measure `text` as displayed, i.e. without soft hyphens.
    pub(crate) fn measure_visible(
        &self,
        text: &str,
        style: WordStyle,
        buf: &mut String,
    ) -> i32 {
        if !text.contains(SOFT_HYPHEN) {
            return self.measurer.measure_word(self.font_id, text, style);
        }
        buf.clear();
        buf.extend(text.chars().filter(|&ch| ch != SOFT_HYPHEN));
        self.measurer.measure_word(self.font_id, buf, style)
    }
}

/// Work buffers for the in-place split.
#[derive(Clone, Debug, Default)]
pub(crate) struct SplitScratch {
    hyphen: HyphenScratch,
    candidates: BreakList,
    text: String,
}

/// Work buffers for the break strategies.
#[derive(Clone, Debug, Default)]
pub(crate) struct BreakScratch {
    cost: Vec<i64>,
    next: Vec<usize>,
    /// Exclusive end index of each computed line.
    pub ends: Vec<usize>,
    pub split: SplitScratch,
}

/// Split `words[index]` at the widest break whose prefix fits `available_px`.
///
/// The prefix keeps the entry (plus a `-` when the break needs one) and its
/// attachment to the previous word; the remainder is inserted right after it
/// with the same style, detached from the prefix. Words after the remainder
/// keep their own flags. Returns `false` when no candidate fits.
pub(crate) fn split_word<W: WidthProvider + ?Sized>(
    words: &mut Vec<WordEntry>,
    index: usize,
    available_px: i32,
    allow_fallback: bool,
    ctx: &BreakContext<'_, W>,
    scratch: &mut SplitScratch,
) -> bool {
    let Some(entry) = words.get(index) else {
        return false;
    };
    ctx.hyphenator.break_offsets_into(
        &entry.text,
        allow_fallback,
        &mut scratch.hyphen,
        &mut scratch.candidates,
    );

    let mut best: Option<(BreakInfo, i32)> = None;
    for &candidate in scratch.candidates.iter() {
        scratch.text.clear();
        scratch.text.extend(
            entry.text[..candidate.byte_offset]
                .chars()
                .filter(|&ch| ch != SOFT_HYPHEN),
        );
        if candidate.requires_inserted_hyphen {
            scratch.text.push('-');
        }
        let width = ctx
            .measurer
            .measure_word(ctx.font_id, &scratch.text, entry.style);
        if width > available_px {
            continue;
        }
        if best.map_or(true, |(_, best_width)| width > best_width) {
            best = Some((candidate, width));
        }
    }

    let Some((chosen, prefix_width)) = best else {
        return false;
    };

    let entry = &mut words[index];
    let remainder = entry.text.split_off(chosen.byte_offset);
    if chosen.requires_inserted_hyphen {
        entry.text.push('-');
    }
    entry.width_px = prefix_width;
    log::trace!(
        "layout: split {:?} + {:?} (fit {}px of {}px)",
        entry.text,
        remainder,
        prefix_width,
        available_px
    );

    let style = entry.style;
    let mut tail = WordEntry::new(remainder, style, false);
    tail.width_px = ctx.measure_visible(&tail.text, style, &mut scratch.text);
    words.insert(index + 1, tail);
    true
}

/// Split words whose run cannot fit a line even on its own.
///
/// A word's budget is the line width less the attached words before it in
/// its run. Fallback breaks are allowed. Words that still cannot be split are
/// left for the breaker to place on an overflowing line.
pub(crate) fn split_oversized_words<W: WidthProvider + ?Sized>(
    words: &mut Vec<WordEntry>,
    ctx: &BreakContext<'_, W>,
    scratch: &mut SplitScratch,
) {
    let mut splits = 0usize;
    let mut run_head = 0usize;
    let mut run_lead = 0i32;
    let mut idx = 0usize;
    while idx < words.len() {
        if idx == 0 || !words[idx].attach_to_previous {
            run_head = idx;
            run_lead = 0;
        }
        let limit = ctx.line_width(run_head == 0);
        if run_lead.saturating_add(words[idx].width_px) > limit {
            if splits >= ctx.max_presplits {
                log::warn!(
                    "layout: split cap {} reached; {} words left unsplit",
                    ctx.max_presplits,
                    words.len() - idx
                );
                return;
            }
            let available = limit - run_lead;
            if available > 0 && split_word(words, idx, available, true, ctx, scratch) {
                splits += 1;
            } else {
                log::warn!(
                    "layout: {:?} cannot be split to fit {}px; placing it overflowing",
                    words[idx].text,
                    available
                );
            }
        }
        run_lead = run_lead.saturating_add(words[idx].width_px);
        idx += 1;
    }
}

/// Minimum-raggedness partition of `words` into `scratch.ends`.
///
/// Each non-final line costs its squared slack; the final line is free.
/// Runs of attached words are never broken. A run too wide for any line is
/// placed alone. Returns `true` when the line cap cut reconstruction short.
pub(crate) fn optimal_breaks<W: WidthProvider + ?Sized>(
    words: &[WordEntry],
    ctx: &BreakContext<'_, W>,
    scratch: &mut BreakScratch,
) -> bool {
    let n = words.len();
    let cost = &mut scratch.cost;
    let next = &mut scratch.next;
    cost.clear();
    cost.resize(n + 1, INFEASIBLE);
    next.clear();
    next.resize(n, 0);
    cost[n] = 0;

    for i in (0..n).rev() {
        let limit = ctx.line_width(i == 0);
        let mut width = 0i32;
        for j in i..n {
            if j > i && !words[j].attach_to_previous {
                width = width.saturating_add(ctx.space_px);
            }
            width = width.saturating_add(words[j].width_px);
            if width > limit {
                break;
            }
            if j + 1 < n && words[j + 1].attach_to_previous {
                continue;
            }
            let line_cost = if j + 1 == n {
                0
            } else {
                let slack = i64::from(limit - width);
                (slack * slack).saturating_add(cost[j + 1]).min(MAX_COST)
            };
            if line_cost < cost[i] {
                cost[i] = line_cost;
                next[i] = j;
            }
        }

        if cost[i] >= INFEASIBLE {
            let last = run_end(words, i) - 1;
            next[i] = last;
            cost[i] = if last + 1 < n { cost[last + 1] } else { 0 };
        }
    }

    let ends = &mut scratch.ends;
    ends.clear();
    let mut start = 0usize;
    while start < n {
        if ends.len() >= ctx.max_lines {
            log::warn!(
                "layout: line cap {} reached with {} words pending",
                ctx.max_lines,
                n - start
            );
            return true;
        }
        let end = (next[start] + 1).clamp(start + 1, n);
        ends.push(end);
        start = end;
    }
    false
}

/// Fill lines left to right, hyphenating the first word that overflows.
///
/// Fallback breaks are only used for a word that starts its line. A run
/// that cannot be split moves whole to the next line unless it already
/// starts the line. Returns `true` when the line cap cut the pass short.
pub(crate) fn greedy_hyphenated_breaks<W: WidthProvider + ?Sized>(
    words: &mut Vec<WordEntry>,
    ctx: &BreakContext<'_, W>,
    scratch: &mut BreakScratch,
) -> bool {
    scratch.ends.clear();
    let mut current = 0usize;
    while current < words.len() {
        if scratch.ends.len() >= ctx.max_lines {
            log::warn!(
                "layout: line cap {} reached with {} words pending",
                ctx.max_lines,
                words.len() - current
            );
            return true;
        }
        let line_start = current;
        let limit = ctx.line_width(line_start == 0);
        let mut used = 0i32;

        while current < words.len() {
            let first_on_line = current == line_start;
            let gap = if first_on_line || words[current].attach_to_previous {
                0
            } else {
                ctx.space_px
            };
            let needed = gap.saturating_add(words[current].width_px);
            if used.saturating_add(needed) <= limit {
                used += needed;
                current += 1;
                continue;
            }

            let available = limit - used - gap;
            if available > 0
                && split_word(words, current, available, first_on_line, ctx, &mut scratch.split)
            {
                current += 1;
            } else if first_on_line {
                log::warn!(
                    "layout: {:?} overflows {}px; placing it alone",
                    words[current].text,
                    limit
                );
                current += 1;
            }
            break;
        }

        while current > line_start + 1
            && current < words.len()
            && words[current].attach_to_previous
        {
            current -= 1;
        }
        scratch.ends.push(current);
    }
    false
}

/// Exclusive end of the attached run starting at `start`.
fn run_end(words: &[WordEntry], start: usize) -> usize {
    let mut end = start + 1;
    while end < words.len() && words[end].attach_to_previous {
        end += 1;
    }
    end
}
