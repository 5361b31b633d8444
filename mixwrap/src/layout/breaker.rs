// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-pass line breaking over a codepoint stream.
//!
//! Latin text is collected into words which are placed whole when they fit
//! and split with a hyphen when they fit on no line. Wide characters are
//! placed one at a time, with a lookahead that keeps a closing punctuation
//! mark on the same line as the character before it.

use core::iter::Peekable;

use super::line::{Line, Word};
use super::{GlyphSource, Spacing};
use crate::decode::DecodeError;
use crate::kurbo::Point;
use crate::script::{self, CharClass};

pub(crate) struct LineBreaker<'a, S: ?Sized> {
    source: &'a mut S,
    pub(super) spacing: Spacing,
    max_width: f64,
    lines: Vec<Line>,
    pub(super) line: Line,
    word: Word,
}

impl<'a, S: GlyphSource + ?Sized> LineBreaker<'a, S> {
    pub(crate) fn new(source: &'a mut S, spacing: Spacing, max_width: f64, origin: Point) -> Self {
        Self {
            source,
            spacing,
            max_width,
            lines: Vec::new(),
            line: Line::new(origin, spacing.x_height),
            word: Word::default(),
        }
    }

    /// Breaks the whole stream and returns the sealed lines.
    pub(crate) fn run<I>(mut self, input: I) -> Vec<Line>
    where
        I: Iterator<Item = Result<char, DecodeError>>,
    {
        let mut input = input
            .filter_map(|step| {
                step.inspect_err(|err| log::warn!("skipping {err}")).ok()
            })
            .peekable();
        let mut prev = None;
        while let Some(ch) = input.next() {
            let class = script::classify(ch);
            let after_terminator = prev.is_some_and(script::is_word_terminator);
            if matches!(class, CharClass::Newline | CharClass::Space)
                || (class == CharClass::Latin && after_terminator)
            {
                self.flush_word(0.0);
            }
            match class {
                CharClass::Newline => {
                    self.line.pop_trailing_space(self.spacing.space_width);
                    self.seal();
                }
                CharClass::Space => self.push_space(),
                CharClass::Latin => {
                    let glyph = self.spacing.advance(self.source, ch);
                    self.word.push(glyph);
                }
                CharClass::Wide => self.push_wide(ch, &mut input),
            }
            prev = Some(ch);
        }
        self.flush_word(0.0);
        if !self.line.is_empty() {
            self.seal();
        }
        self.lines
    }

    /// Moves the current line to the result and continues on the next one.
    pub(super) fn seal(&mut self) {
        let next = self.line.next_line(self.spacing.line_height);
        self.lines.push(core::mem::replace(&mut self.line, next));
    }

    pub(super) fn fits(&self, width: f64) -> bool {
        width <= self.max_width
    }

    fn push_space(&mut self) {
        if self.line.is_empty() {
            return;
        }
        if !self.fits(self.line.width() + self.spacing.space_width) {
            self.seal();
            return;
        }
        let space = self.spacing.advance(self.source, ' ');
        self.line.push(&space);
    }

    /// Places the pending word, preferring to leave room for a `trailing` mark.
    ///
    /// The word is only cut when it fits on no line by itself.
    fn flush_word(&mut self, trailing: f64) {
        if self.word.is_empty() {
            return;
        }
        let word = core::mem::take(&mut self.word);
        if self.fits(self.line.width() + word.width + trailing) {
            self.line.push_word(&word);
        } else if self.fits(word.width + trailing) {
            self.wrap_word(&word);
        } else if self.fits(self.line.width() + word.width) {
            self.line.push_word(&word);
        } else if self.fits(word.width) {
            self.wrap_word(&word);
        } else {
            self.cut_word(&word);
        }
        self.word = word;
        self.word.clear();
    }

    /// Starts `word` on a fresh line.
    fn wrap_word(&mut self, word: &Word) {
        self.line.pop_trailing_space(self.spacing.space_width);
        if !self.line.is_empty() {
            self.seal();
        }
        self.line.push_word(word);
    }

    fn push_wide<I>(&mut self, ch: char, input: &mut Peekable<I>)
    where
        I: Iterator<Item = char>,
    {
        let glyph = self.spacing.advance(self.source, ch);
        let trailing = if script::is_no_line_start(ch) {
            glyph.width
        } else {
            0.0
        };
        self.flush_word(trailing);

        let occupied = !self.line.is_empty();
        let next = match input.peek() {
            Some(&next) if script::is_no_line_start(next) => Some(next),
            _ => None,
        };
        if let Some(next) = next {
            let mark = self.spacing.advance(self.source, next);
            if occupied && !self.fits(self.line.width() + glyph.width + mark.width) {
                self.seal();
                self.line.push(&glyph);
                return;
            }
        }
        if occupied && !self.fits(self.line.width() + glyph.width) {
            self.seal();
        }
        self.line.push(&glyph);
    }
}
