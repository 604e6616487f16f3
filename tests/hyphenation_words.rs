use ink_layout::{BreakList, HyphenScratch, Hyphenator, PatternTable};

const WORDS: &[&str] = &[
    "hyphenation",
    "characteristically",
    "representation",
    "international",
    "accessibility",
    "unremarkable",
    "extraordinary",
    "programmable",
    "typography",
    "Mississippi",
    "encyclopaedia",
    "dictionary",
    "the",
    "a",
    "",
    "(parenthetical),",
    "footnoted[12]",
    "well-known",
    "co\u{AD}oper\u{AD}ation",
    "na\u{EF}ve",
    "r\u{E9}sum\u{E9}",
    "1984",
    "R2D2",
];

fn offsets(list: &BreakList) -> Vec<usize> {
    list.iter().map(|b| b.byte_offset).collect()
}

#[test]
fn breaks_are_ordered_char_boundaries_inside_the_word() {
    let hyphenator = Hyphenator::for_language("en-US");
    for word in WORDS {
        for fallback in [false, true] {
            let list = hyphenator.break_offsets(word, fallback);
            let found = offsets(&list);
            assert!(found.windows(2).all(|w| w[0] < w[1]), "{word}: {found:?}");
            for info in &list {
                assert!(info.byte_offset > 0 && info.byte_offset < word.len());
                assert!(word.is_char_boundary(info.byte_offset), "{word}: {found:?}");
                let (prefix, suffix) = word.split_at(info.byte_offset);
                assert_eq!(format!("{prefix}{suffix}"), *word);
                if !info.requires_inserted_hyphen {
                    assert!(prefix.ends_with('-'), "{word}: no glyph at {prefix:?}");
                }
            }
        }
    }
}

#[test]
fn scratch_reuse_matches_fresh_buffers() {
    let hyphenator = Hyphenator::for_language("en");
    let mut scratch = HyphenScratch::new();
    let mut out = BreakList::new();
    for _ in 0..3 {
        for word in WORDS {
            hyphenator.break_offsets_into(word, false, &mut scratch, &mut out);
            assert_eq!(out, hyphenator.break_offsets(word, false), "{word}");
        }
    }
}

#[test]
fn pattern_breaks_respect_minimum_fragments() {
    let hyphenator = Hyphenator::for_language("en-US");
    for word in WORDS.iter().filter(|w| w.chars().all(char::is_alphabetic)) {
        let chars = word.chars().count();
        for info in &hyphenator.break_offsets(word, false) {
            let before = word[..info.byte_offset].chars().count();
            assert!(before >= 2, "{word} breaks after {before}");
            assert!(chars - before >= 3, "{word} leaves {}", chars - before);
        }
    }
}

#[test]
fn case_and_wrapping_punctuation_do_not_change_breaks() {
    let hyphenator = Hyphenator::for_language("en-US");
    let plain = offsets(&hyphenator.break_offsets("hyphenation", false));
    assert!(!plain.is_empty());
    assert_eq!(offsets(&hyphenator.break_offsets("Hyphenation", false)), plain);
    assert_eq!(offsets(&hyphenator.break_offsets("HYPHENATION", false)), plain);

    let shifted: Vec<usize> = plain.iter().map(|o| o + 1).collect();
    assert_eq!(offsets(&hyphenator.break_offsets("(hyphenation),", false)), shifted);
    assert_eq!(offsets(&hyphenator.break_offsets("hyphenation[3]", false)), plain);
}

#[test]
fn digits_block_pattern_breaks_but_not_fallback() {
    let hyphenator = Hyphenator::for_language("en-US");
    assert!(hyphenator.break_offsets("R2D2xyz", false).is_empty());
    assert!(!hyphenator.break_offsets("R2D2xyz", true).is_empty());
}

#[test]
fn explicit_breaks_replace_patterns() {
    let hyphenator = Hyphenator::for_language("en-US");
    let list = hyphenator.break_offsets("self-hyphenation", false);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].byte_offset, "self-".len());
    assert!(!list[0].requires_inserted_hyphen);
}

#[test]
fn forced_breaks_keep_the_explicit_ones() {
    for hyphenator in [Hyphenator::for_language("en-US"), Hyphenator::none()] {
        let list = hyphenator.break_offsets("self-hyphenation", true);
        assert!(list.len() > 1);
        let explicit = list
            .iter()
            .find(|b| b.byte_offset == "self-".len())
            .expect("hard hyphen break");
        assert!(!explicit.requires_inserted_hyphen);
        assert!(list.iter().all(|b| b.byte_offset != "self".len()));
        assert_eq!(
            list.iter().filter(|b| !b.requires_inserted_hyphen).count(),
            1
        );
    }
}

#[test]
fn custom_tables_load_through_the_public_parser() {
    let table = PatternTable::parse("1ba 1ca", "", 1, 1).expect("valid patterns");
    assert_eq!(table.pattern_count(), 2);
    let hyphenator = Hyphenator::with_table("xx-YY", table);
    assert_eq!(hyphenator.language(), Some("xx"));
    assert_eq!(offsets(&hyphenator.break_offsets("abaca", false)), [1, 3]);

    assert!(PatternTable::parse("a1b 2c3", "", 1, 1).is_ok());
    let err = PatternTable::parse("a12b", "", 1, 1).expect_err("adjacent digits");
    assert_eq!(err.code, "PATTERN_DIGIT_RUN");
    assert_eq!(err.token_index, Some(0));
    assert!(err.to_string().starts_with("hyphenation:PATTERN_DIGIT_RUN"));
}
