// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the glyph cache and a font rasterization engine.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::kurbo::BezPath;

/// How glyph coverage is rendered.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum RenderMode {
    /// 8-bit antialiased coverage.
    #[default]
    Antialiased,
    /// 1-bit coverage, packed most significant bit first.
    Mono,
}

/// Layout of the bytes in a [`RasterizedGlyph`] buffer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PixelMode {
    /// One coverage byte per pixel.
    Gray,
    /// One bit per pixel, most significant bit first; rows are `pitch` bytes apart.
    Mono,
}

/// A glyph bitmap together with the metrics the rasterizer reported for it.
///
/// Metrics are in whole pixels. `bitmap_top` is the distance from the baseline
/// up to the first bitmap row, `bitmap_left` the distance from the pen position
/// to the first bitmap column.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RasterizedGlyph {
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub rows: u32,
    /// Distance in bytes between the starts of two consecutive rows.
    pub pitch: usize,
    /// How the coverage bytes are laid out.
    pub pixel_mode: PixelMode,
    /// Coverage data, `rows * pitch` bytes.
    pub buffer: Vec<u8>,
    /// Horizontal advance in pixels.
    pub advance: i32,
    /// Distance from the baseline to the top row of the bitmap.
    pub bitmap_top: i32,
    /// Distance from the pen position to the leftmost column of the bitmap.
    pub bitmap_left: i32,
}

impl RasterizedGlyph {
    /// A glyph with no pixels that only advances the pen.
    pub fn empty(advance: i32) -> Self {
        Self {
            width: 0,
            rows: 0,
            pitch: 0,
            pixel_mode: PixelMode::Gray,
            buffer: Vec::new(),
            advance,
            bitmap_top: 0,
            bitmap_left: 0,
        }
    }

    /// Returns the coverage at `(x, y)` as a value in `0..=255`.
    ///
    /// Coordinates outside the bitmap have no coverage.
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.rows {
            return 0;
        }
        let row = y as usize * self.pitch;
        match self.pixel_mode {
            PixelMode::Gray => self.buffer.get(row + x as usize).copied().unwrap_or(0),
            PixelMode::Mono => {
                let byte = self.buffer.get(row + x as usize / 8).copied().unwrap_or(0);
                if byte & (0x80 >> (x % 8)) != 0 {
                    255
                } else {
                    0
                }
            }
        }
    }

    /// Expands the coverage into a white RGBA bitmap with `border` transparent
    /// pixels on every side.
    ///
    /// Coverage goes to the alpha channel so that bilinear sampling at the glyph
    /// edge blends against transparent white instead of a neighbouring glyph.
    pub fn expand_rgba(&self, border: u32) -> PaddedBitmap {
        let width = self.width + border * 2;
        let height = self.rows + border * 2;
        let mut pixels = vec![[255_u8, 255, 255, 0]; width as usize * height as usize];
        for y in 0..self.rows {
            let dst_row = (y + border) as usize * width as usize;
            for x in 0..self.width {
                pixels[dst_row + (x + border) as usize][3] = self.coverage(x, y);
            }
        }
        PaddedBitmap {
            width,
            height,
            border,
            glyph_width: self.width,
            glyph_height: self.rows,
            pixels,
        }
    }
}

/// An RGBA glyph bitmap surrounded by a transparent border, ready for upload.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PaddedBitmap {
    /// Width including the border on both sides.
    pub width: u32,
    /// Height including the border on both sides.
    pub height: u32,
    /// Border thickness in pixels.
    pub border: u32,
    /// Width of the glyph itself.
    pub glyph_width: u32,
    /// Height of the glyph itself.
    pub glyph_height: u32,
    /// Row-major RGBA pixels.
    pub pixels: Vec<[u8; 4]>,
}

impl PaddedBitmap {
    /// The pixels as a flat byte slice, four bytes per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Reasons a rasterizer can fail to produce a glyph.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RasterErrorKind {
    /// The face has no usable font data.
    InvalidFace,
    /// The engine could not render the glyph.
    RenderFailed,
}

/// Error returned by [`Rasterizer::render_glyph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RasterError {
    kind: RasterErrorKind,
    codepoint: char,
}

impl RasterError {
    /// Creates a new error for `codepoint`.
    pub const fn new(kind: RasterErrorKind, codepoint: char) -> Self {
        Self { kind, codepoint }
    }

    /// Returns the error kind.
    pub const fn kind(self) -> RasterErrorKind {
        self.kind
    }

    /// Returns the codepoint that failed to render.
    pub const fn codepoint(self) -> char {
        self.codepoint
    }
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            RasterErrorKind::InvalidFace => "invalid font face",
            RasterErrorKind::RenderFailed => "glyph could not be rendered",
        };
        write!(f, "{msg} for U+{:04X}", u32::from(self.codepoint))
    }
}

impl core::error::Error for RasterError {}

/// A font rasterization engine bound to one face.
pub trait Rasterizer {
    /// Sets the nominal size in points and the resolution it is rendered at.
    fn set_pixel_size(&mut self, size: u32, dpi: u32);

    /// Renders the glyph for `codepoint` at the current size.
    fn render_glyph(
        &mut self,
        codepoint: char,
        mode: RenderMode,
    ) -> Result<RasterizedGlyph, RasterError>;

    /// Returns the outline of the glyph for `codepoint` in pixels, y pointing down,
    /// relative to the pen position on the baseline.
    fn outline(&mut self, codepoint: char) -> Option<BezPath>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for Box<R> {
    fn set_pixel_size(&mut self, size: u32, dpi: u32) {
        (**self).set_pixel_size(size, dpi);
    }

    fn render_glyph(
        &mut self,
        codepoint: char,
        mode: RenderMode,
    ) -> Result<RasterizedGlyph, RasterError> {
        (**self).render_glyph(codepoint, mode)
    }

    fn outline(&mut self, codepoint: char) -> Option<BezPath> {
        (**self).outline(codepoint)
    }
}

/// Pixels per em for a nominal `size` in points rendered at `dpi`.
pub fn pixels_per_em(size: u32, dpi: u32) -> f32 {
    size as f32 * dpi as f32 / 72.0
}
