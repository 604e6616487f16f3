//! Word-shape analysis ahead of pattern matching.

use alloc::vec::Vec;

use super::SOFT_HYPHEN;

/// Hard hyphens that already render a glyph at the break.
pub(crate) fn is_hard_hyphen(ch: char) -> bool {
    matches!(ch, '-' | '\u{2010}')
}

/// Codepoint range `[start, end)` of `chars` left after stripping leading and
/// trailing punctuation and trailing bracket groups (`word[12]`, `array[i]`).
///
/// A `]` with no opening `[` inside the word is dropped like punctuation.
pub(crate) fn core_bounds(chars: &[(usize, char)]) -> (usize, usize) {
    let mut start = 0usize;
    while start < chars.len() && !chars[start].1.is_alphanumeric() {
        start += 1;
    }

    let mut end = chars.len();
    loop {
        while end > start && !chars[end - 1].1.is_alphanumeric() && chars[end - 1].1 != ']' {
            end -= 1;
        }
        if end <= start || chars[end - 1].1 != ']' {
            break;
        }
        let close = end - 1;
        end = chars[start..close]
            .iter()
            .rposition(|&(_, ch)| ch == '[')
            .map_or(close, |open| start + open);
    }
    (start, end)
}

/// Author-supplied break points inside `core`: after hard hyphens flanked by
/// letters, and at soft hyphens.
///
/// Pushes `(byte_offset, requires_inserted_hyphen)` in order.
pub(crate) fn explicit_breaks(core: &[(usize, char)], out: &mut Vec<(usize, bool)>) {
    out.clear();
    if core.len() < 3 {
        return;
    }
    for idx in 1..core.len() - 1 {
        let (offset, ch) = core[idx];
        if ch == SOFT_HYPHEN {
            out.push((offset, true));
        } else if is_hard_hyphen(ch)
            && core[idx - 1].1.is_alphabetic()
            && core[idx + 1].1.is_alphabetic()
        {
            out.push((offset + ch.len_utf8(), false));
        }
    }
}

/// Whether a forced break before `core[idx]` is worth offering next to the
/// word's own hyphens: never just before a hyphen, never just after a soft
/// hyphen (that break is the soft hyphen's own).
pub(crate) fn is_fallback_boundary(core: &[(usize, char)], idx: usize) -> bool {
    let (Some(&(_, before)), Some(&(_, at))) = (core.get(idx.wrapping_sub(1)), core.get(idx))
    else {
        return false;
    };
    !is_hard_hyphen(at) && at != SOFT_HYPHEN && before != SOFT_HYPHEN
}

/// First lowercase mapping of `ch`, keeping the codepoint count stable.
pub(crate) fn fold_case(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}
