// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hyphenation of words that fit on no line.

use super::breaker::LineBreaker;
use super::line::Word;
use super::GlyphSource;

impl<S: GlyphSource + ?Sized> LineBreaker<'_, S> {
    /// Places `word` character by character, starting on the current line and
    /// ending each full line with a hyphen.
    ///
    /// A line that cannot hold even one character and a hyphen is left
    /// without a hyphen and may overflow.
    pub(super) fn cut_word(&mut self, word: &Word) {
        let glyphs = &word.glyphs;
        let hyphen = self.spacing.hyphen;
        let mut i = 0;
        while let Some(glyph) = glyphs.get(i) {
            let width = self.line.width();
            let Some(next) = glyphs.get(i + 1) else {
                // Last character.
                if self.fits(width + glyph.width) || self.line.is_empty() {
                    self.line.push(glyph);
                    i += 1;
                } else {
                    self.line.pop_trailing_space(self.spacing.space_width);
                    self.seal();
                }
                continue;
            };
            if i + 2 == glyphs.len() && self.fits(width + glyph.width + next.width) {
                self.line.push(glyph);
                self.line.push(next);
                return;
            }
            if self.fits(width + glyph.width + next.width + hyphen.width) {
                self.line.push(glyph);
                i += 1;
            } else if self.fits(width + glyph.width + hyphen.width) {
                self.line.push(glyph);
                self.line.push_hyphen(&hyphen);
                self.seal();
                i += 1;
            } else if !self.line.is_empty() {
                self.line.pop_trailing_space(self.spacing.space_width);
                self.seal();
            } else {
                self.line.push(glyph);
                i += 1;
                if i < glyphs.len() {
                    self.seal();
                }
            }
        }
    }
}
