use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::PatternError;

/// Longest pattern (in letters, boundary dots included) accepted by the parser.
const MAX_PATTERN_LETTERS: usize = 32;
const MAX_SCORE_DIGIT: u8 = 9;

#[derive(Clone, Copy, Debug, Default)]
struct TrieNode {
    first_edge: u32,
    edge_count: u16,
    score_start: u32,
    score_len: u8,
}

#[derive(Clone, Copy, Debug)]
struct TrieEdge {
    ch: char,
    target: u32,
}

#[derive(Clone, Debug)]
struct ExceptionEntry {
    letters: Box<[char]>,
    breaks: Box<[u16]>,
}

#[derive(Default)]
struct BuildNode {
    children: Vec<(char, u32)>,
    scores: Option<(u32, u8)>,
}

/// Compiled Liang pattern table with its exception list.
///
/// Patterns use TeX notation: letters interleaved with single digit scores,
/// `.` marking a word boundary (`.ach4`, `a1b`, `4m1p`). A gap whose highest
/// matching score is odd is a permitted break.
#[derive(Clone, Debug)]
pub struct PatternTable {
    nodes: Box<[TrieNode]>,
    edges: Box<[TrieEdge]>,
    scores: Box<[u8]>,
    exceptions: Box<[ExceptionEntry]>,
    pattern_count: usize,
    min_prefix: usize,
    min_suffix: usize,
}

impl PatternTable {
    /// Compile whitespace-separated patterns and hyphen-marked exceptions.
    ///
    /// `%` starts a comment running to end of line in both inputs. Minimums
    /// are in codepoints and clamp to at least one.
    pub fn parse(
        patterns: &str,
        exceptions: &str,
        min_prefix: usize,
        min_suffix: usize,
    ) -> Result<Self, PatternError> {
        let mut build = Vec::with_capacity(1024);
        build.push(BuildNode::default());
        let mut scores = Vec::with_capacity(patterns.len());
        let mut letters = Vec::with_capacity(MAX_PATTERN_LETTERS);
        let mut digits = Vec::with_capacity(MAX_PATTERN_LETTERS + 1);
        let mut pattern_count = 0usize;

        for (index, token) in tokens(patterns).enumerate() {
            parse_pattern(token, &mut letters, &mut digits)
                .map_err(|err| err.with_token(index, token))?;
            let node = insert(&mut build, &letters);
            if build[node].scores.is_some() {
                return Err(PatternError::new("PATTERN_DUPLICATE", "pattern listed twice")
                    .with_token(index, token));
            }
            let start = u32::try_from(scores.len()).map_err(|_| {
                PatternError::new("PATTERN_TABLE_TOO_LARGE", "score storage overflow")
                    .with_token(index, token)
            })?;
            scores.extend_from_slice(&digits);
            build[node].scores = Some((start, digits.len() as u8));
            pattern_count += 1;
        }

        if pattern_count == 0 {
            return Err(PatternError::new("PATTERN_EMPTY", "no patterns"));
        }

        let mut parsed_exceptions = Vec::new();
        for (index, token) in tokens(exceptions).enumerate() {
            let entry = parse_exception(token).map_err(|err| err.with_token(index, token))?;
            parsed_exceptions.push(entry);
        }
        parsed_exceptions.sort_by(|a, b| a.letters.cmp(&b.letters));
        parsed_exceptions.dedup_by(|a, b| a.letters == b.letters);

        let (nodes, edges) = flatten(build)?;
        Ok(Self {
            nodes,
            edges,
            scores: scores.into_boxed_slice(),
            exceptions: parsed_exceptions.into_boxed_slice(),
            pattern_count,
            min_prefix: min_prefix.max(1),
            min_suffix: min_suffix.max(1),
        })
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    /// Minimum codepoints before a break.
    pub fn min_prefix(&self) -> usize {
        self.min_prefix
    }

    /// Minimum codepoints after a break.
    pub fn min_suffix(&self) -> usize {
        self.min_suffix
    }

    /// Collect permitted break indexes for lowercase `letters`.
    ///
    /// Index `i` means a break before `letters[i]`. `padded` and `gap_scores`
    /// are caller-owned work buffers.
    pub(crate) fn break_indexes(
        &self,
        letters: &[char],
        padded: &mut Vec<char>,
        gap_scores: &mut Vec<u8>,
        out: &mut Vec<usize>,
    ) {
        out.clear();
        let n = letters.len();
        if n < self.min_prefix + self.min_suffix {
            return;
        }

        if let Ok(found) = self
            .exceptions
            .binary_search_by(|entry| entry.letters[..].cmp(letters))
        {
            for &at in self.exceptions[found].breaks.iter() {
                let at = usize::from(at);
                if at >= self.min_prefix && n - at >= self.min_suffix {
                    out.push(at);
                }
            }
            return;
        }

        padded.clear();
        padded.push('.');
        padded.extend_from_slice(letters);
        padded.push('.');
        self.score_gaps(padded, gap_scores);

        // Gap before letters[i] sits at padded index i + 1.
        for i in self.min_prefix..=(n - self.min_suffix) {
            if gap_scores[i + 1] % 2 == 1 {
                out.push(i);
            }
        }
    }

    fn score_gaps(&self, padded: &[char], gap_scores: &mut Vec<u8>) {
        gap_scores.clear();
        gap_scores.resize(padded.len() + 1, 0);
        for start in 0..padded.len() {
            let mut node = 0usize;
            for &ch in &padded[start..] {
                match self.child(node, ch) {
                    Some(next) => node = next,
                    None => break,
                }
                let entry = self.nodes[node];
                if entry.score_len == 0 {
                    continue;
                }
                let from = entry.score_start as usize;
                let to = from + usize::from(entry.score_len);
                for (offset, &score) in self.scores[from..to].iter().enumerate() {
                    let slot = &mut gap_scores[start + offset];
                    if score > *slot {
                        *slot = score;
                    }
                }
            }
        }
    }

    fn child(&self, node: usize, ch: char) -> Option<usize> {
        let entry = self.nodes[node];
        let from = entry.first_edge as usize;
        let to = from + usize::from(entry.edge_count);
        let edges = &self.edges[from..to];
        edges
            .binary_search_by(|edge| edge.ch.cmp(&ch))
            .ok()
            .map(|idx| edges[idx].target as usize)
    }
}

fn tokens(input: &str) -> impl Iterator<Item = &str> {
    input
        .lines()
        .map(|line| match line.find('%') {
            Some(comment) => &line[..comment],
            None => line,
        })
        .flat_map(str::split_whitespace)
}

fn parse_pattern(
    token: &str,
    letters: &mut Vec<char>,
    digits: &mut Vec<u8>,
) -> Result<(), PatternError> {
    letters.clear();
    digits.clear();
    digits.push(0);
    let mut pending_digit = false;
    for ch in token.chars() {
        if let Some(value) = ch.to_digit(10) {
            if pending_digit {
                return Err(PatternError::new(
                    "PATTERN_DIGIT_RUN",
                    "scores are single digits between letters",
                ));
            }
            let last = digits.len() - 1;
            digits[last] = (value as u8).min(MAX_SCORE_DIGIT);
            pending_digit = true;
            continue;
        }
        if ch.is_whitespace() || ch == '-' {
            return Err(PatternError::new(
                "PATTERN_BAD_CHAR",
                "patterns hold letters, digits, and boundary dots only",
            ));
        }
        for lower in ch.to_lowercase() {
            letters.push(lower);
            digits.push(0);
        }
        pending_digit = false;
    }

    if letters.is_empty() || letters.iter().all(|&ch| ch == '.') {
        return Err(PatternError::new("PATTERN_NO_LETTERS", "pattern has no letters"));
    }
    if letters.len() > MAX_PATTERN_LETTERS {
        return Err(PatternError::new("PATTERN_TOO_LONG", "pattern is too long"));
    }
    let last = letters.len() - 1;
    if letters
        .iter()
        .enumerate()
        .any(|(idx, &ch)| ch == '.' && idx != 0 && idx != last)
    {
        return Err(PatternError::new(
            "PATTERN_BOUNDARY",
            "boundary dot inside pattern",
        ));
    }
    Ok(())
}

fn parse_exception(token: &str) -> Result<ExceptionEntry, PatternError> {
    let mut letters = Vec::with_capacity(token.len());
    let mut breaks = Vec::new();
    let mut previous_was_hyphen = true;
    for ch in token.chars() {
        if ch == '-' {
            if previous_was_hyphen {
                return Err(PatternError::new(
                    "EXCEPTION_MALFORMED",
                    "hyphen at word edge or repeated",
                ));
            }
            let at = u16::try_from(letters.len()).map_err(|_| {
                PatternError::new("EXCEPTION_TOO_LONG", "exception word is too long")
            })?;
            breaks.push(at);
            previous_was_hyphen = true;
            continue;
        }
        letters.extend(ch.to_lowercase());
        previous_was_hyphen = false;
    }
    if letters.is_empty() {
        return Err(PatternError::new("EXCEPTION_EMPTY", "exception has no letters"));
    }
    if previous_was_hyphen {
        return Err(PatternError::new(
            "EXCEPTION_MALFORMED",
            "hyphen at word edge or repeated",
        ));
    }
    Ok(ExceptionEntry {
        letters: letters.into_boxed_slice(),
        breaks: breaks.into_boxed_slice(),
    })
}

fn insert(build: &mut Vec<BuildNode>, letters: &[char]) -> usize {
    let mut node = 0usize;
    for &ch in letters {
        let found = build[node]
            .children
            .binary_search_by(|(existing, _)| existing.cmp(&ch));
        node = match found {
            Ok(idx) => build[node].children[idx].1 as usize,
            Err(idx) => {
                let next = build.len();
                build.push(BuildNode::default());
                build[node].children.insert(idx, (ch, next as u32));
                next
            }
        };
    }
    node
}

fn flatten(build: Vec<BuildNode>) -> Result<(Box<[TrieNode]>, Box<[TrieEdge]>), PatternError> {
    let edge_total = build.iter().map(|node| node.children.len()).sum();
    let mut nodes = Vec::with_capacity(build.len());
    let mut edges = Vec::with_capacity(edge_total);
    for node in build {
        let first_edge = u32::try_from(edges.len())
            .map_err(|_| PatternError::new("PATTERN_TABLE_TOO_LARGE", "too many trie edges"))?;
        let edge_count = u16::try_from(node.children.len())
            .map_err(|_| PatternError::new("PATTERN_TABLE_TOO_LARGE", "trie node fan-out"))?;
        edges.extend(
            node.children
                .into_iter()
                .map(|(ch, target)| TrieEdge { ch, target }),
        );
        let (score_start, score_len) = node.scores.unwrap_or((0, 0));
        nodes.push(TrieNode {
            first_edge,
            edge_count,
            score_start,
            score_len,
        });
    }
    Ok((nodes.into_boxed_slice(), edges.into_boxed_slice()))
}
