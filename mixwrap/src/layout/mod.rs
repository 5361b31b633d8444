// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line breaking and the laid-out result.

pub(crate) mod alignment;
pub(crate) mod breaker;
mod cut;
mod line;

use mixwrap_atlas::{GlyphMetrics, GlyphRecord};

use crate::kurbo::Rect;

pub use line::Line;

/// Horizontal placement of each line within the wrap width.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Lines start at the block origin.
    #[default]
    Left,
    /// Lines end at the wrap width.
    Right,
    /// Lines are centered within the wrap width.
    Center,
}

/// Paragraph text broken into lines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultilineBlock {
    pub(crate) lines: Vec<Line>,
    pub(crate) width: f64,
    pub(crate) alignment: Alignment,
    pub(crate) bounds: Rect,
}

impl MultilineBlock {
    /// The lines in reading order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The wrap width the text was broken at.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// The alignment the lines were placed with.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Union of the line boxes, or [`Rect::ZERO`] without lines.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of lines that end in a hyphen inserted to split a word.
    pub fn word_cut_count(&self) -> usize {
        self.lines.iter().filter(|line| line.is_hyphenated()).count()
    }

    /// Whether the block has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Ink bounds of a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StringBounds {
    /// Union of the glyph bitmaps, positioned relative to the baseline origin.
    pub rect: Rect,
    /// Largest distance a glyph reaches below its baseline.
    pub top_extent: f64,
}

/// Supplies glyph records to layout, rasterizing them on demand.
pub(crate) trait GlyphSource {
    fn glyph(&mut self, ch: char) -> &GlyphRecord;

    fn metrics(&mut self, ch: char) -> GlyphMetrics {
        *self.glyph(ch).metrics()
    }
}

/// A glyph reduced to what line breaking needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Advance {
    pub(crate) ch: char,
    /// Horizontal advance, letter spacing applied.
    pub(crate) width: f64,
    /// Extent above the x-height.
    pub(crate) top: f64,
    /// Extent below the baseline.
    pub(crate) bottom: f64,
}

/// Font-wide measures shared by a layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Spacing {
    pub(crate) letter_spacing: f64,
    pub(crate) space_width: f64,
    pub(crate) line_height: f64,
    pub(crate) x_height: f64,
    pub(crate) hyphen: Advance,
}

impl Spacing {
    /// Measures the reference glyphs `p`, `x` and `-` through `source`.
    pub(crate) fn new<S: GlyphSource + ?Sized>(
        source: &mut S,
        letter_spacing: f64,
        space_size: f64,
        line_height: f64,
    ) -> Self {
        let x_height = f64::from(source.metrics('x').bitmap_top);
        let space_width = f64::from(source.metrics('p').advance) * space_size * letter_spacing;
        let mut spacing = Self {
            letter_spacing,
            space_width,
            line_height,
            x_height,
            hyphen: Advance {
                ch: '-',
                width: 0.0,
                top: 0.0,
                bottom: 0.0,
            },
        };
        let mut hyphen = spacing.advance(source, '-');
        // The inserted hyphen is not letter spaced.
        hyphen.width = f64::from(source.metrics('-').advance);
        spacing.hyphen = hyphen;
        spacing
    }

    /// Measures `ch` for line breaking.
    pub(crate) fn advance<S: GlyphSource + ?Sized>(&self, source: &mut S, ch: char) -> Advance {
        if crate::script::is_space_like(ch) {
            return Advance {
                ch,
                width: self.space_width,
                top: 0.0,
                bottom: 0.0,
            };
        }
        let metrics = source.metrics(ch);
        Advance {
            ch,
            width: f64::from(metrics.advance) * self.letter_spacing,
            top: f64::from(metrics.bitmap_top) - self.x_height,
            bottom: f64::from(metrics.descent()),
        }
    }
}
