// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use smallvec::SmallVec;

use super::Advance;
use crate::kurbo::{Point, Rect};

/// One line of laid-out text.
///
/// The box spans from `top` above the x-height down to `bottom` below the
/// baseline, so its height is `top + x_height + bottom`.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    text: String,
    origin: Point,
    width: f64,
    top: f64,
    bottom: f64,
    x_height: f64,
    hyphenated: bool,
}

impl Line {
    pub(crate) fn new(origin: Point, x_height: f64) -> Self {
        Self {
            text: String::new(),
            origin,
            width: 0.0,
            top: 0.0,
            bottom: 0.0,
            x_height,
            hyphenated: false,
        }
    }

    /// The characters on the line, including an inserted hyphen.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The line box.
    pub fn bbox(&self) -> Rect {
        Rect::from_origin_size(
            self.origin,
            (self.width, self.top + self.x_height + self.bottom),
        )
    }

    /// Sum of the advances on the line.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// How far the tallest glyph rises above the x-height.
    pub fn top(&self) -> f64 {
        self.top
    }

    /// How far the deepest glyph reaches below the baseline.
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Height of `x`, the reference the line box is built from.
    pub fn x_height(&self) -> f64 {
        self.x_height
    }

    /// Distance from the top of the box to the baseline.
    pub fn baseline_offset(&self) -> f64 {
        self.top + self.x_height
    }

    /// Whether the line ends in a hyphen inserted to split a word.
    pub fn is_hyphenated(&self) -> bool {
        self.hyphenated
    }

    /// Whether nothing has been placed on the line.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn origin(&self) -> Point {
        self.origin
    }

    pub(crate) fn set_x(&mut self, x: f64) {
        self.origin.x = x;
    }

    pub(crate) fn push(&mut self, glyph: &Advance) {
        self.text.push(glyph.ch);
        self.width += glyph.width;
        self.raise(glyph.top, glyph.bottom);
    }

    pub(crate) fn push_word(&mut self, word: &Word) {
        self.text.push_str(&word.text);
        self.width += word.width;
        self.raise(word.top, word.bottom);
    }

    pub(crate) fn push_hyphen(&mut self, hyphen: &Advance) {
        self.push(hyphen);
        self.hyphenated = true;
    }

    /// Removes one trailing space and its width.
    pub(crate) fn pop_trailing_space(&mut self, space_width: f64) {
        if self.text.ends_with(' ') {
            self.text.pop();
            self.width -= space_width;
        }
    }

    /// An empty line starting one line height below this one.
    pub(crate) fn next_line(&self, line_height: f64) -> Self {
        Self::new(
            Point::new(self.origin.x, self.origin.y + line_height + self.top),
            self.x_height,
        )
    }

    fn raise(&mut self, top: f64, bottom: f64) {
        self.top = self.top.max(top);
        self.bottom = self.bottom.max(bottom);
    }
}

/// A run of Latin characters not yet placed on a line.
#[derive(Clone, Debug, Default)]
pub(crate) struct Word {
    pub(crate) text: String,
    pub(crate) glyphs: SmallVec<[Advance; 16]>,
    pub(crate) width: f64,
    pub(crate) top: f64,
    pub(crate) bottom: f64,
}

impl Word {
    pub(crate) fn push(&mut self, glyph: Advance) {
        self.text.push(glyph.ch);
        self.width += glyph.width;
        self.top = self.top.max(glyph.top);
        self.bottom = self.bottom.max(glyph.bottom);
        self.glyphs.push(glyph);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.glyphs.clear();
        self.width = 0.0;
        self.top = 0.0;
        self.bottom = 0.0;
    }
}
