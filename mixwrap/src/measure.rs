// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-line measurement. Text is not wrapped; `'\n'` moves the pen down one line.

use mixwrap_atlas::{GlyphRecord, TextureUploader};

use crate::font::Font;
use crate::kurbo::{Point, Rect};
use crate::layout::{GlyphSource, StringBounds};
use crate::script;

impl<U: TextureUploader> Font<U> {
    /// Ink bounds of `text` drawn with its first baseline at `(x, y)`.
    ///
    /// Glyphs without a bitmap do not contribute, so text made only of spaces
    /// measures as [`StringBounds::default`].
    pub fn measure_string(&mut self, text: &str, x: f64, y: f64) -> StringBounds {
        let mut rect: Option<Rect> = None;
        let mut top_extent = 0_f64;
        self.walk_pen(text, Point::new(x, y), |pen, record| {
            let Some(ink) = ink_rect(pen, record) else {
                return;
            };
            rect = Some(rect.map_or(ink, |rect| rect.union(ink)));
            top_extent = top_extent.max(f64::from(record.metrics().descent()));
        });
        match rect {
            Some(rect) => StringBounds { rect, top_extent },
            None => StringBounds::default(),
        }
    }

    /// Width of the ink of `text`.
    pub fn string_width(&mut self, text: &str) -> f64 {
        self.measure_string(text, 0.0, 0.0).rect.width()
    }

    /// Height of the ink of `text`.
    pub fn string_height(&mut self, text: &str) -> f64 {
        self.measure_string(text, 0.0, 0.0).rect.height()
    }

    /// Width of the bitmap of `ch`.
    pub fn letter_width(&mut self, ch: char) -> f64 {
        self.letter_metric(ch, |record| f64::from(record.metrics().width))
    }

    /// Height of `ch` above the baseline.
    pub fn letter_height(&mut self, ch: char) -> f64 {
        self.letter_metric(ch, |record| f64::from(record.metrics().bitmap_top))
    }

    fn letter_metric(&mut self, ch: char, metric: impl FnOnce(&GlyphRecord) -> f64) -> f64 {
        match self.layout_source() {
            Some((mut glyphs, _)) => metric(glyphs.glyph(ch)),
            None => 0.0,
        }
    }

    /// Calls `visit` with the pen position of every glyph of `text`.
    ///
    /// Spaces only advance the pen. Returns `false` when no face is loaded.
    pub(crate) fn walk_pen(
        &mut self,
        text: &str,
        origin: Point,
        mut visit: impl FnMut(Point, &GlyphRecord),
    ) -> bool {
        let line_height = self.line_height();
        let Some((mut glyphs, spacing)) = self.layout_source() else {
            return false;
        };
        let mut pen = origin;
        for ch in text.chars() {
            if ch == '\n' {
                pen = Point::new(origin.x, pen.y + line_height);
                continue;
            }
            if script::is_space_like(ch) {
                pen.x += spacing.space_width;
                continue;
            }
            let record = glyphs.glyph(ch);
            visit(pen, record);
            pen.x += f64::from(record.metrics().advance) * spacing.letter_spacing;
        }
        true
    }
}

/// The bitmap box of `record` drawn at `pen`, if it has any pixels.
pub(crate) fn ink_rect(pen: Point, record: &GlyphRecord) -> Option<Rect> {
    let metrics = record.metrics();
    if metrics.width == 0 || metrics.rows == 0 {
        return None;
    }
    let x0 = pen.x + f64::from(metrics.bitmap_left);
    let y0 = pen.y - f64::from(metrics.bitmap_top);
    Some(Rect::new(
        x0,
        y0,
        x0 + f64::from(metrics.width),
        y0 + f64::from(metrics.rows),
    ))
}
