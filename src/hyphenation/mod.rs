//! Liang-pattern hyphenation with explicit-hyphen and fallback breaks.

mod patterns;
mod word;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use smallvec::SmallVec;

use crate::error::PatternError;

pub use patterns::PatternTable;

/// Invisible discretionary break marker.
pub const SOFT_HYPHEN: char = '\u{00AD}';

/// Minimums used when no pattern table is active.
const FALLBACK_MIN_PREFIX: usize = 2;
const FALLBACK_MIN_SUFFIX: usize = 2;

const EN_US_PATTERNS: &str = include_str!("en_us.pat");
const EN_US_EXCEPTIONS: &str = include_str!("en_us.hyp");

/// A permitted break inside a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakInfo {
    /// Byte offset into the word; the prefix is `word[..byte_offset]`.
    pub byte_offset: usize,
    /// A `-` must be appended to the prefix when breaking here.
    pub requires_inserted_hyphen: bool,
}

/// Ordered break candidates for one word.
pub type BreakList = SmallVec<[BreakInfo; 8]>;

/// Languages with a built-in pattern table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    English,
}

impl Language {
    /// Match a BCP 47-ish tag by primary subtag (`en-US`, `en_GB`, `EN`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match primary_subtag(tag).as_str() {
            "en" => Some(Self::English),
            _ => None,
        }
    }

    /// Normalized primary subtag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::English => "en",
        }
    }

    /// Compile this language's built-in table.
    pub fn pattern_table(self) -> Result<PatternTable, PatternError> {
        match self {
            Self::English => PatternTable::parse(EN_US_PATTERNS, EN_US_EXCEPTIONS, 2, 3),
        }
    }
}

fn primary_subtag(tag: &str) -> String {
    let trimmed = tag.trim();
    let primary = trimmed
        .split(|ch| ch == '-' || ch == '_')
        .next()
        .unwrap_or(trimmed);
    primary.to_ascii_lowercase()
}

/// Reusable work buffers for [`Hyphenator::break_offsets_into`].
#[derive(Clone, Debug, Default)]
pub struct HyphenScratch {
    chars: Vec<(usize, char)>,
    letters: Vec<char>,
    padded: Vec<char>,
    gap_scores: Vec<u8>,
    indexes: Vec<usize>,
    explicit: Vec<(usize, bool)>,
}

impl HyphenScratch {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Break-point oracle for the active document language.
///
/// Construct one per opened document and hand it to the layout engine;
/// clones share the compiled table.
#[derive(Clone, Debug, Default)]
pub struct Hyphenator {
    language: Option<String>,
    table: Option<Arc<PatternTable>>,
}

impl Hyphenator {
    /// No pattern table: every word falls back to codepoint-boundary breaks.
    pub fn none() -> Self {
        Self::default()
    }

    /// Select the built-in table for `tag`, or no table when unsupported.
    pub fn for_language(tag: &str) -> Self {
        let Some(language) = Language::from_tag(tag) else {
            log::debug!("hyphenation: no patterns for language tag {:?}", tag);
            return Self::none();
        };
        match language.pattern_table() {
            Ok(table) => {
                log::debug!(
                    "hyphenation: language={} patterns={} exceptions={}",
                    language.tag(),
                    table.pattern_count(),
                    table.exception_count()
                );
                Self {
                    language: Some(String::from(language.tag())),
                    table: Some(Arc::new(table)),
                }
            }
            Err(err) => {
                log::warn!("hyphenation: built-in {} table rejected: {}", language.tag(), err);
                Self::none()
            }
        }
    }

    /// Use a caller-compiled table for `tag`.
    pub fn with_table(tag: &str, table: PatternTable) -> Self {
        Self {
            language: Some(primary_subtag(tag)),
            table: Some(Arc::new(table)),
        }
    }

    pub fn has_language_support(&self) -> bool {
        self.table.is_some()
    }

    /// Primary subtag of the active table, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn table(&self) -> Option<&PatternTable> {
        self.table.as_deref()
    }

    /// Break candidates for `word`, in ascending offset order.
    ///
    /// Allocates fresh work buffers; layout code uses
    /// [`Self::break_offsets_into`] with a long-lived [`HyphenScratch`].
    pub fn break_offsets(&self, word: &str, include_fallback: bool) -> BreakList {
        let mut scratch = HyphenScratch::new();
        let mut out = BreakList::new();
        self.break_offsets_into(word, include_fallback, &mut scratch, &mut out);
        out
    }

    /// As [`Self::break_offsets`], writing into `out` and reusing `scratch`.
    ///
    /// When `include_fallback` is set or no table is active, every codepoint
    /// boundary within the minimum prefix/suffix lengths is offered, merged
    /// with the word's explicit and soft hyphens. Otherwise explicit and soft
    /// hyphens take precedence over pattern breaks: a word that has any is
    /// only offered those.
    pub fn break_offsets_into(
        &self,
        word: &str,
        include_fallback: bool,
        scratch: &mut HyphenScratch,
        out: &mut BreakList,
    ) {
        out.clear();
        scratch.chars.clear();
        scratch.chars.extend(word.char_indices());
        let (start, end) = word::core_bounds(&scratch.chars);
        if start >= end {
            return;
        }
        let core = &scratch.chars[start..end];

        word::explicit_breaks(core, &mut scratch.explicit);
        out.extend(
            scratch
                .explicit
                .iter()
                .map(|&(byte_offset, requires_inserted_hyphen)| BreakInfo {
                    byte_offset,
                    requires_inserted_hyphen,
                }),
        );

        let (min_prefix, min_suffix) = match self.table.as_deref() {
            Some(table) => (table.min_prefix(), table.min_suffix()),
            None => (FALLBACK_MIN_PREFIX, FALLBACK_MIN_SUFFIX),
        };
        let n = core.len();

        if include_fallback || self.table.is_none() {
            if n >= min_prefix + min_suffix {
                let explicit = out.len();
                out.extend(
                    (min_prefix..=n - min_suffix)
                        .filter(|&idx| word::is_fallback_boundary(core, idx))
                        .map(|idx| BreakInfo {
                            byte_offset: core[idx].0,
                            requires_inserted_hyphen: !word::is_hard_hyphen(core[idx - 1].1),
                        }),
                );
                if explicit > 0 {
                    // Stable sort keeps the explicit entry of a shared offset.
                    out.sort_by_key(|info| info.byte_offset);
                    out.dedup_by_key(|info| info.byte_offset);
                }
            }
            return;
        }

        if !out.is_empty() || n < min_prefix + min_suffix {
            return;
        }

        let Some(table) = self.table.as_deref() else {
            return;
        };
        if !core.iter().all(|(_, ch)| ch.is_alphabetic()) {
            return;
        }
        scratch.letters.clear();
        scratch
            .letters
            .extend(core.iter().map(|&(_, ch)| word::fold_case(ch)));
        table.break_indexes(
            &scratch.letters,
            &mut scratch.padded,
            &mut scratch.gap_scores,
            &mut scratch.indexes,
        );
        out.extend(scratch.indexes.iter().map(|&idx| BreakInfo {
            byte_offset: core[idx].0,
            requires_inserted_hyphen: true,
        }));
    }
}
