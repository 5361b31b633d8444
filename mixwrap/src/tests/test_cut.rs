// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::{line_texts, TestEnv};
use crate::MultilineBlock;

/// Joins the lines, dropping the hyphens the cut inserted.
fn rejoin(block: &MultilineBlock) -> String {
    block
        .lines()
        .iter()
        .map(|line| {
            let text = line.text();
            if line.is_hyphenated() {
                text.strip_suffix('-').unwrap_or(text)
            } else {
                text
            }
        })
        .collect()
}

#[test]
fn long_word_is_hyphenated() {
    let mut env = TestEnv::new();
    let block = env.layout("abcdefghij", 35.0);
    assert_eq!(line_texts(&block), ["ab-", "cd-", "ef-", "gh-", "ij"]);
    assert_eq!(block.word_cut_count(), 4, "every line but the last is cut");
    for line in &block.lines()[..4] {
        assert!(line.is_hyphenated(), "{:?} ends in a hyphen", line.text());
        assert_eq!(line.width(), 26.0, "two letters and an unspaced hyphen");
    }
    assert!(!block.lines()[4].is_hyphenated(), "the tail is whole");
}

#[test]
fn cut_segments_rebuild_the_word() {
    let word = "Antidisestablishmentarianism";
    let mut env = TestEnv::new();
    for width in (30..=80).step_by(5).map(f64::from) {
        let block = env.layout(word, width);
        for line in block.lines() {
            assert!(
                line.width() <= width,
                "{:?} overflows wrap width {width}",
                line.text()
            );
        }
        assert_eq!(rejoin(&block), word, "at wrap width {width}");
        assert_eq!(
            block.word_cut_count(),
            block.lines().len() - 1,
            "lines end in a hyphen except the last at wrap width {width}"
        );
    }
}

#[test]
fn cut_starts_on_the_current_line() {
    let mut env = TestEnv::new();
    let block = env.layout("ab cdefghijkl", 50.0);
    assert_eq!(line_texts(&block), ["ab c-", "defg-", "hijkl"]);
    assert_eq!(block.word_cut_count(), 2);
    assert_eq!(rejoin(&block), "ab cdefghijkl");
}

#[test]
fn no_hyphen_without_room_for_one() {
    let mut env = TestEnv::new();
    let block = env.layout("abc", 12.0);
    assert_eq!(
        line_texts(&block),
        ["a", "b", "c"],
        "one letter per line, no hyphen fits"
    );
    assert_eq!(block.word_cut_count(), 0, "nothing is marked as cut");
}

#[test]
fn cut_lines_take_the_font_size_into_account() {
    let mut env = TestEnv::with_options(crate::FontOptions {
        size: 32,
        ..crate::FontOptions::default()
    });
    let block = env.layout("abcdefghij", 70.0);
    assert_eq!(
        line_texts(&block),
        ["ab-", "cd-", "ef-", "gh-", "ij"],
        "twice the size, twice the width"
    );
}
