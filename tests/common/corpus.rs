//! Deterministic word streams for layout tests and benches.

use ink_layout::WordStyle;

/// One word as a tokenizer would hand it to a paragraph buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub style: WordStyle,
    pub attach: bool,
}

impl Token {
    pub fn word(text: &str) -> Self {
        Self {
            text: text.to_string(),
            style: WordStyle::REGULAR,
            attach: false,
        }
    }
}

const WORDS: &[&str] = &[
    "the", "reader", "turned", "another", "page", "of", "quiet", "prose", "and", "found",
    "a", "letter", "folded", "twice", "between", "chapters", "written", "in", "faded",
    "ink", "by", "someone", "who", "knew", "every", "word", "would", "matter", "later",
];

const LONG_WORDS: &[&str] = &[
    "characteristically",
    "representation",
    "international",
    "accessibility",
    "hyphenation",
    "algorithm",
    "paragraph",
    "beautiful",
];

const EXPLICIT_WORDS: &[&str] = &[
    "co\u{AD}oper\u{AD}ation",
    "well-known",
    "state-of-the-art",
    "non\u{AD}trivial",
];

const SHORT_WORDS: &[&str] = &[
    "a", "an", "the", "cat", "sat", "on", "its", "mat", "dog", "ran", "to", "be", "or", "not",
    "we", "saw", "him", "go", "by", "sea",
];

/// xorshift stream seeded per corpus so runs are reproducible.
pub struct Corpus {
    state: u32,
}

impl Corpus {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    fn next(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    fn pick<'a>(&mut self, list: &[&'a str]) -> &'a str {
        list[self.next() as usize % list.len()]
    }

    fn style(&mut self) -> WordStyle {
        match self.next() % 16 {
            0 => WordStyle::BOLD,
            1 => WordStyle::ITALIC,
            2 => WordStyle::BOLD_ITALIC,
            _ => WordStyle::REGULAR,
        }
    }

    /// Mixed prose: long words, explicit hyphens, soft hyphens, styled words,
    /// and punctuation attached to its neighbours.
    pub fn paragraph(&mut self, words: usize) -> Vec<Token> {
        let mut out = Vec::with_capacity(words + words / 4);
        for _ in 0..words {
            let text = match self.next() % 10 {
                0 | 1 => self.pick(LONG_WORDS),
                2 => self.pick(EXPLICIT_WORDS),
                _ => self.pick(WORDS),
            };
            let style = self.style();
            let roll = self.next() % 12;
            if roll == 0 {
                out.push(Token {
                    text: "(".to_string(),
                    style,
                    attach: false,
                });
                out.push(Token {
                    text: text.to_string(),
                    style,
                    attach: true,
                });
                out.push(Token {
                    text: ")".to_string(),
                    style,
                    attach: true,
                });
                continue;
            }
            out.push(Token {
                text: text.to_string(),
                style,
                attach: false,
            });
            if roll == 1 || roll == 2 {
                let punct = if roll == 1 { "," } else { "." };
                out.push(Token {
                    text: punct.to_string(),
                    style: WordStyle::REGULAR,
                    attach: true,
                });
            }
        }
        out
    }

    /// Words of at most three letters (never hyphenated) with attached
    /// punctuation.
    pub fn short_paragraph(&mut self, words: usize) -> Vec<Token> {
        let mut out = Vec::with_capacity(words + words / 4);
        for _ in 0..words {
            let text = self.pick(SHORT_WORDS);
            let style = self.style();
            out.push(Token {
                text: text.to_string(),
                style,
                attach: false,
            });
            if self.next() % 7 == 0 {
                out.push(Token {
                    text: ",".to_string(),
                    style,
                    attach: true,
                });
            }
        }
        out
    }
}
