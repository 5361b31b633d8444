// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Character classes that drive line breaking.

/// U+00A0 NO-BREAK SPACE. Advances like a space but never ends a word.
pub const NO_BREAK_SPACE: char = '\u{A0}';

/// U+2019 RIGHT SINGLE QUOTATION MARK, used as an apostrophe inside Latin words.
const RIGHT_SINGLE_QUOTATION_MARK: char = '\u{2019}';

/// Highest scalar value of the Latin-like range (the end of Latin Extended-B).
const LATIN_MAX: u32 = 591;

/// How the line breaker treats a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    /// `'\n'`, a forced break.
    Newline,
    /// `' '`, a break opportunity.
    Space,
    /// Part of a word; words break only at spaces and after terminators.
    Latin,
    /// A character that may break on either side.
    Wide,
}

/// Classifies `ch` for line breaking.
pub fn classify(ch: char) -> CharClass {
    match ch {
        '\n' => CharClass::Newline,
        ' ' => CharClass::Space,
        _ if is_latin(ch) => CharClass::Latin,
        _ => CharClass::Wide,
    }
}

/// Whether `ch` belongs to a script written with spaces between words.
pub fn is_latin(ch: char) -> bool {
    u32::from(ch) <= LATIN_MAX || ch == RIGHT_SINGLE_QUOTATION_MARK
}

/// Whether a word ends after `ch` even without a following space.
pub fn is_word_terminator(ch: char) -> bool {
    matches!(ch, ',' | '.' | '!' | '?')
}

/// Whether `ch` must not be the first character of a line.
///
/// These are the ideographic comma and full stop and the fullwidth parentheses.
pub fn is_no_line_start(ch: char) -> bool {
    matches!(ch, '\u{3001}' | '\u{3002}' | '\u{FF08}' | '\u{FF09}')
}

/// Whether `ch` is drawn as blank space of the space width.
pub fn is_space_like(ch: char) -> bool {
    ch == ' ' || ch == NO_BREAK_SPACE
}
