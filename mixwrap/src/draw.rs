// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output for renderers: textured quads over the atlas and glyph outlines.

use mixwrap_atlas::{TextureUploader, UvRect};

use crate::font::Font;
use crate::kurbo::{Affine, BezPath, Point, Rect};
use crate::layout::MultilineBlock;
use crate::measure::ink_rect;

/// One glyph to draw: a screen rectangle and the atlas region to fill it with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphQuad {
    /// Where the glyph bitmap goes, y down.
    pub rect: Rect,
    /// The glyph's region of the atlas texture, [`UvRect::ZERO`] if it did not fit.
    pub uv: UvRect,
    /// The character drawn.
    pub codepoint: char,
}

impl<U: TextureUploader> Font<U> {
    /// Quads for `text` with its first baseline at `(x, y)`.
    ///
    /// Glyphs without a bitmap produce no quad.
    pub fn string_quads(&mut self, text: &str, x: f64, y: f64) -> Vec<GlyphQuad> {
        let mut quads = Vec::new();
        self.walk_pen(text, Point::new(x, y), |pen, record| {
            if let Some(rect) = ink_rect(pen, record) {
                quads.push(GlyphQuad {
                    rect,
                    uv: record.uv_or_zero(),
                    codepoint: record.codepoint(),
                });
            }
        });
        quads
    }

    /// Quads for every line of `block`.
    ///
    /// Lines are snapped to whole pixels. With `baseline` set, each line's box
    /// top is taken as its baseline, so the block was positioned by baseline.
    pub fn block_quads(&mut self, block: &MultilineBlock, baseline: bool) -> Vec<GlyphQuad> {
        let mut quads = Vec::new();
        for line in block.lines() {
            let bbox = line.bbox();
            let y = if baseline {
                bbox.y0
            } else {
                bbox.y0 + line.baseline_offset()
            };
            quads.extend(self.string_quads(line.text(), bbox.x0.trunc(), y.trunc()));
        }
        quads
    }

    /// Outlines of the glyphs of `text`, placed with the first baseline at `(x, y)`.
    ///
    /// Outlines are only kept when the font was loaded with
    /// [`make_contours`](crate::FontOptions::make_contours); otherwise this logs
    /// a warning and returns nothing.
    pub fn string_outlines(&mut self, text: &str, x: f64, y: f64) -> Vec<BezPath> {
        if !self.options().make_contours {
            log::warn!("glyph outlines were not requested when the font was loaded");
            return Vec::new();
        }
        let mut outlines = Vec::new();
        self.walk_pen(text, Point::new(x, y), |pen, record| {
            if let Some(outline) = record.outline() {
                outlines.push(Affine::translate(pen.to_vec2()) * outline);
            }
        });
        outlines
    }
}
