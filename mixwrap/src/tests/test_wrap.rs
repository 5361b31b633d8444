// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::utils::TestEnv;
use crate::kurbo::Rect;

const SENTENCE: &str = "The quick brown fox jumps over the lazy dog, and then it runs far away.";

#[test]
fn short_text_is_one_line() {
    let mut env = TestEnv::new();
    let block = env.layout("hello world", 1000.0);
    assert_eq!(block.lines().len(), 1, "everything fits");
    let line = &block.lines()[0];
    assert_eq!(line.text(), "hello world");
    assert_eq!(line.width(), 110.0, "ten letters and a space");
    assert_eq!(line.top(), 4.0, "ascenders rise above the x-height");
    assert_eq!(line.bottom(), 0.0, "no descenders");
    assert_eq!(line.bbox(), Rect::new(0.0, 0.0, 110.0, 14.0));
    assert_eq!(block.word_cut_count(), 0, "nothing was hyphenated");
}

#[test]
fn words_wrap_at_spaces() {
    let mut env = TestEnv::new();
    let block = env.layout("hello world", 60.0);
    assert_eq!(
        super::utils::line_texts(&block),
        ["hello", "world"],
        "the space is dropped at the break"
    );
    assert_eq!(block.lines()[0].width(), 50.0, "trailing space is not counted");
    let second = block.lines()[1].bbox().y0;
    let expected = env.font.line_height() + block.lines()[0].top();
    assert!(
        (second - expected).abs() < 1e-9,
        "next line starts one line height plus the top extent lower, got {second}"
    );
}

#[test]
fn lines_never_exceed_the_wrap_width() {
    let mut env = TestEnv::new();
    for width in [60.0, 75.0, 100.0, 140.0, 230.0] {
        let block = env.layout(SENTENCE, width);
        for line in block.lines() {
            assert!(
                line.width() <= width,
                "{:?} is {} wide at wrap width {width}",
                line.text(),
                line.width()
            );
            assert!(!line.text().starts_with(' '), "no line starts with a space");
            assert!(!line.text().ends_with(' '), "no line ends with a space");
        }
        assert_eq!(
            super::utils::line_texts(&block).join(" "),
            SENTENCE,
            "breaks only replace spaces at wrap width {width}"
        );
    }
}

#[test]
fn newline_always_breaks() {
    let mut env = TestEnv::new();
    let block = env.layout("ab \ncd", 1000.0);
    assert_eq!(super::utils::line_texts(&block), ["ab", "cd"]);
    assert_eq!(
        block.lines()[0].width(),
        20.0,
        "the space before the newline is dropped"
    );
}

#[test]
fn consecutive_newlines_keep_empty_lines() {
    let mut env = TestEnv::new();
    assert_eq!(env.lines("a\n\nb", 1000.0), ["a", "", "b"]);
}

#[test]
fn leading_space_is_dropped() {
    let mut env = TestEnv::new();
    assert_eq!(env.lines(" a", 1000.0), ["a"]);
}

#[test]
fn word_ends_after_terminator() {
    let mut env = TestEnv::new();
    assert_eq!(env.lines("a.b", 1000.0), ["a.b"], "no space needed when it fits");
    assert_eq!(
        env.lines("a.b", 20.0),
        ["a.", "b"],
        "the full stop ends the word"
    );
}

#[test]
fn no_break_space_joins_words() {
    let mut env = TestEnv::new();
    let block = env.layout("a\u{a0}b", 1000.0);
    assert_eq!(block.lines().len(), 1);
    assert_eq!(block.lines()[0].width(), 30.0, "measured as a space");
}

#[test]
fn letter_spacing_scales_advances() {
    let mut env = TestEnv::new();
    env.font.set_letter_spacing(2.0);
    let block = env.layout("a b", 1000.0);
    assert_eq!(
        block.lines()[0].width(),
        60.0,
        "letters and the space are doubled"
    );
}

#[test]
fn space_size_scales_spaces_only() {
    let mut env = TestEnv::new();
    env.font.set_space_size(0.5);
    let block = env.layout("a b", 1000.0);
    assert_eq!(block.lines()[0].width(), 25.0, "only the space is halved");
}

#[test]
fn layout_is_deterministic() {
    let mut env = TestEnv::new();
    let first = env.layout(SENTENCE, 100.0);
    let second = env.layout(SENTENCE, 100.0);
    assert_eq!(first, second, "same input, same lines");
}

#[test]
fn block_bounds_are_the_union_of_line_boxes() {
    let mut env = TestEnv::new();
    let block = env.layout(SENTENCE, 100.0);
    let union = block
        .lines()
        .iter()
        .map(|line| line.bbox())
        .reduce(|acc, bbox| acc.union(bbox))
        .expect("the sentence has lines");
    assert_eq!(block.bounds(), union);
    assert_eq!(env.font.multiline_bounding_box(block.lines()), union);
}

#[test]
fn empty_text_has_no_lines() {
    let mut env = TestEnv::new();
    let block = env.layout("", 100.0);
    assert!(block.is_empty(), "nothing to lay out");
    assert_eq!(block.bounds(), Rect::ZERO, "empty bounds");
}

#[test]
fn malformed_bytes_are_skipped() {
    let mut env = TestEnv::new();
    let block = env.font.parse_bytes(
        b"ab\xffcd",
        1000.0,
        crate::kurbo::Point::ZERO,
        crate::Alignment::Left,
    );
    assert_eq!(super::utils::line_texts(&block), ["abcd"]);
}
