//! The engine reuses scratch buffers, computes run widths incrementally,
//! splits words in place and drains them through an iterator. This file
//! re-implements both break strategies and the word split the plain way
//! (owned vectors, fresh strings, widths recomputed per candidate) and
//! requires byte-identical lines, including on pages narrow enough that
//! words get split.

mod common;

use common::corpus::{Corpus, Token};
use common::measure::ProportionalMeasurer;
use ink_layout::{
    Hyphenator, LayoutConfig, LayoutEngine, Line, ParagraphBuffer, ParagraphStyle, TextAlign,
    WidthProvider, WordStyle, SOFT_HYPHEN,
};

const INDENT: i16 = 18;
const SPACE: i32 = 5;

#[derive(Clone)]
struct RefWord {
    /// Source text, soft hyphens included.
    text: String,
    style: WordStyle,
    attach: bool,
    width: i32,
}

#[derive(Debug, PartialEq, Eq)]
struct RefLine {
    words: Vec<(String, i32, bool)>,
    available: i32,
    first: bool,
    last: bool,
}

fn visible(text: &str) -> String {
    text.chars().filter(|&c| c != SOFT_HYPHEN).collect()
}

fn width_of(text: &str, style: WordStyle) -> i32 {
    ProportionalMeasurer.measure_word(0, &visible(text), style)
}

fn measure(tokens: &[Token]) -> Vec<RefWord> {
    tokens
        .iter()
        .map(|t| RefWord {
            text: t.text.clone(),
            style: t.style,
            attach: t.attach,
            width: width_of(&t.text, t.style),
        })
        .collect()
}

/// Split `words[index]` at the widest candidate whose prefix fits.
fn reference_split(
    words: &mut Vec<RefWord>,
    index: usize,
    available: i32,
    fallback: bool,
    hyphenator: &Hyphenator,
) -> bool {
    let word = words[index].clone();
    let mut best: Option<(usize, bool, i32)> = None;
    for info in hyphenator.break_offsets(&word.text, fallback) {
        let mut prefix = word.text[..info.byte_offset].to_string();
        if info.requires_inserted_hyphen {
            prefix.push('-');
        }
        let width = width_of(&prefix, word.style);
        if width <= available && best.is_none_or(|(_, _, w)| width > w) {
            best = Some((info.byte_offset, info.requires_inserted_hyphen, width));
        }
    }
    let Some((offset, hyphen, width)) = best else {
        return false;
    };

    let mut prefix = word.text[..offset].to_string();
    if hyphen {
        prefix.push('-');
    }
    let rest = word.text[offset..].to_string();
    words[index] = RefWord {
        text: prefix,
        width,
        ..word.clone()
    };
    words.insert(
        index + 1,
        RefWord {
            width: width_of(&rest, word.style),
            text: rest,
            style: word.style,
            attach: false,
        },
    );
    true
}

/// Split every word whose run cannot fit a line on its own.
fn reference_presplit(words: &mut Vec<RefWord>, page: i32, lead: i32, hyphenator: &Hyphenator) {
    let mut head = 0;
    let mut run_lead = 0;
    let mut idx = 0;
    while idx < words.len() {
        if idx == 0 || !words[idx].attach {
            head = idx;
            run_lead = 0;
        }
        let limit = if head == 0 { lead } else { page };
        if run_lead + words[idx].width > limit {
            let available = limit - run_lead;
            if available > 0 {
                reference_split(words, idx, available, true, hyphenator);
            }
        }
        run_lead += words[idx].width;
        idx += 1;
    }
}

fn line_width(words: &[RefWord]) -> i32 {
    let mut width = 0;
    for (idx, w) in words.iter().enumerate() {
        if idx > 0 && !w.attach {
            width += SPACE;
        }
        width += w.width;
    }
    width
}

fn run_end(words: &[RefWord], start: usize) -> usize {
    let mut end = start + 1;
    while end < words.len() && words[end].attach {
        end += 1;
    }
    end
}

fn reference_optimal(words: &[RefWord], page: i32, lead: i32) -> Vec<usize> {
    let n = words.len();
    let mut cost: Vec<Option<i64>> = vec![None; n + 1];
    let mut next = vec![0usize; n];
    cost[n] = Some(0);

    for i in (0..n).rev() {
        let limit = if i == 0 { lead } else { page };
        let mut best: Option<(i64, usize)> = None;
        let mut end = i;
        while end < n {
            end = run_end(words, end);
            let width = line_width(&words[i..end]);
            if width > limit {
                break;
            }
            let slack = i64::from(limit - width);
            let rest = cost[end].unwrap_or(0);
            let c = if end == n { 0 } else { slack * slack + rest };
            if best.is_none_or(|(b, _)| c < b) {
                best = Some((c, end));
            }
        }
        match best {
            Some((c, end)) => {
                cost[i] = Some(c);
                next[i] = end;
            }
            None => {
                let end = run_end(words, i);
                cost[i] = cost[end];
                next[i] = end;
            }
        }
    }

    let mut ends = Vec::new();
    let mut start = 0;
    while start < n {
        ends.push(next[start]);
        start = next[start];
    }
    ends
}

fn reference_greedy(
    words: &mut Vec<RefWord>,
    page: i32,
    lead: i32,
    hyphenator: &Hyphenator,
) -> Vec<usize> {
    let mut ends = Vec::new();
    let mut current = 0;
    while current < words.len() {
        let start = current;
        let limit = if start == 0 { lead } else { page };
        let mut used = 0;
        while current < words.len() {
            let first = current == start;
            let gap = if first || words[current].attach { 0 } else { SPACE };
            if used + gap + words[current].width <= limit {
                used += gap + words[current].width;
                current += 1;
                continue;
            }
            let available = limit - used - gap;
            if available > 0 && reference_split(words, current, available, first, hyphenator) {
                current += 1;
            } else if first {
                current += 1;
            }
            break;
        }
        while current > start + 1 && current < words.len() && words[current].attach {
            current -= 1;
        }
        ends.push(current);
    }
    ends
}

fn reference_lines(words: &[RefWord], ends: &[usize], page: i32, align: TextAlign) -> Vec<RefLine> {
    let indent = if matches!(align, TextAlign::Justify | TextAlign::Left) {
        i32::from(INDENT)
    } else {
        0
    };
    let mut lines = Vec::new();
    let mut start = 0;
    for (k, &end) in ends.iter().enumerate() {
        let first = k == 0;
        let last = k + 1 == ends.len();
        let line = &words[start..end];
        let available = if first { page - indent } else { page };
        let total: i32 = line.iter().map(|w| w.width).sum();
        let gaps = line.iter().skip(1).filter(|w| !w.attach).count() as i32;
        let spare = available - total;
        let gap = if align == TextAlign::Justify && !last && gaps > 0 {
            spare / gaps
        } else {
            SPACE
        };
        let mut x = match align {
            TextAlign::Right => (spare - gaps * SPACE).max(0),
            TextAlign::Center => ((spare - gaps * SPACE) / 2).max(0),
            _ if first => indent,
            _ => 0,
        };
        let mut placed = Vec::new();
        for (idx, w) in line.iter().enumerate() {
            if idx > 0 && !w.attach {
                x += gap;
            }
            placed.push((visible(&w.text), x, w.style.contains(WordStyle::BOLD)));
            x += w.width;
        }
        lines.push(RefLine {
            words: placed,
            available,
            first,
            last,
        });
        start = end;
    }
    lines
}

fn engine_lines(
    tokens: &[Token],
    page: i32,
    align: TextAlign,
    hyphenation: bool,
    hyphenator: &Hyphenator,
) -> Vec<RefLine> {
    let mut engine =
        LayoutEngine::new(LayoutConfig::for_page_width(page)).with_hyphenator(hyphenator.clone());
    let style = ParagraphStyle::aligned(align).with_text_indent(INDENT);
    let mut paragraph = ParagraphBuffer::new(style, hyphenation);
    for t in tokens {
        paragraph.add_word_with(t.text.as_str(), t.style, false, t.attach);
    }
    let mut lines: Vec<Line> = Vec::new();
    engine.layout_paragraph(&mut paragraph, &ProportionalMeasurer, true, |line| lines.push(line));
    assert!(paragraph.is_empty());
    lines
        .into_iter()
        .map(|line| RefLine {
            words: line
                .words
                .into_iter()
                .map(|w| (w.text, w.x_px, w.style.contains(WordStyle::BOLD)))
                .collect(),
            available: line.available_width_px,
            first: line.is_first_line,
            last: line.is_last_line,
        })
        .collect()
}

const ALIGNMENTS: [TextAlign; 4] = [
    TextAlign::Justify,
    TextAlign::Left,
    TextAlign::Center,
    TextAlign::Right,
];

fn lead_width(page: i32, align: TextAlign) -> i32 {
    if align.honors_indent() {
        page - i32::from(INDENT)
    } else {
        page
    }
}

fn hyphenators() -> [(&'static str, Hyphenator); 2] {
    [
        ("en", Hyphenator::for_language("en-US")),
        ("none", Hyphenator::none()),
    ]
}

#[test]
fn optimal_breaks_match_the_plain_algorithm() {
    let mut splits = 0;
    for (lang, hyphenator) in hyphenators() {
        for seed in [3u32, 17, 256, 4099, 65_537, 900_001] {
            let tokens = Corpus::new(seed).paragraph(220);
            for page in [60, 97, 150, 240, 311, 464] {
                for align in ALIGNMENTS {
                    let mut words = measure(&tokens);
                    reference_presplit(&mut words, page, lead_width(page, align), &hyphenator);
                    splits += words.len() - tokens.len();
                    let ends = reference_optimal(&words, page, lead_width(page, align));
                    let expected = reference_lines(&words, &ends, page, align);
                    let actual = engine_lines(&tokens, page, align, false, &hyphenator);
                    assert_eq!(
                        actual, expected,
                        "lang={lang} seed={seed} page={page} align={align:?}"
                    );
                }
            }
        }
    }
    assert!(splits > 0, "no case exercised the word split");
}

#[test]
fn greedy_breaks_match_the_plain_algorithm() {
    let mut splits = 0;
    for (lang, hyphenator) in hyphenators() {
        for seed in [5u32, 11, 77, 1024, 31_337] {
            let corpora = [
                Corpus::new(seed).short_paragraph(300),
                Corpus::new(seed).paragraph(220),
            ];
            for tokens in &corpora {
                for page in [60, 97, 150, 233, 464] {
                    for align in ALIGNMENTS {
                        let mut words = measure(tokens);
                        let ends = reference_greedy(
                            &mut words,
                            page,
                            lead_width(page, align),
                            &hyphenator,
                        );
                        splits += words.len() - tokens.len();
                        let expected = reference_lines(&words, &ends, page, align);
                        let actual = engine_lines(tokens, page, align, true, &hyphenator);
                        assert_eq!(
                            actual, expected,
                            "lang={lang} seed={seed} page={page} align={align:?}"
                        );
                    }
                }
            }
        }
    }
    assert!(splits > 0, "no case exercised the word split");
}
