// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Rasterizer`] backed by swash for bitmaps and skrifa for outlines.

use alloc::vec::Vec;

use skrifa::MetadataProvider;
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use swash::scale::image::{Content, Image};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use swash::FontRef;

use crate::kurbo::BezPath;
use crate::raster::{
    PixelMode, RasterError, RasterErrorKind, RasterizedGlyph, Rasterizer, RenderMode,
    pixels_per_em,
};

/// Coverage at or above this value sets a bit in mono mode.
const MONO_THRESHOLD: u8 = 128;

/// Rasterizes the glyphs of one face held in memory.
pub struct SwashRasterizer {
    data: Vec<u8>,
    index: u32,
    ppem: f32,
    context: ScaleContext,
}

impl SwashRasterizer {
    /// Creates a rasterizer for face `index` of the font file `data`.
    ///
    /// Returns `None` when the data does not contain a usable face at that index.
    pub fn from_data(data: Vec<u8>, index: u32) -> Option<Self> {
        FontRef::from_index(&data, index as usize)?;
        skrifa::FontRef::from_index(&data, index).ok()?;
        Some(Self {
            data,
            index,
            ppem: 0.0,
            context: ScaleContext::new(),
        })
    }

    /// The current size in pixels per em.
    pub fn ppem(&self) -> f32 {
        self.ppem
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "advances of rasterized glyphs fit in i32"
    )]
    fn render(&mut self, codepoint: char, mode: RenderMode) -> Result<RasterizedGlyph, RasterError> {
        let font = FontRef::from_index(&self.data, self.index as usize)
            .ok_or(RasterError::new(RasterErrorKind::InvalidFace, codepoint))?;
        // Unmapped codepoints render the .notdef glyph.
        let glyph_id = font.charmap().map(codepoint);
        let advance = font
            .glyph_metrics(&[])
            .scale(self.ppem)
            .advance_width(glyph_id)
            .round() as i32;
        let mut scaler = self
            .context
            .builder(font)
            .size(self.ppem)
            .hint(true)
            .build();
        let Some(image) = Render::new(&[
            Source::ColorOutline(0),
            Source::ColorBitmap(StrikeWith::BestFit),
            Source::Outline,
        ])
        .format(Format::Alpha)
        .render(&mut scaler, glyph_id) else {
            return Ok(RasterizedGlyph::empty(advance));
        };
        Ok(to_rasterized(&image, advance, mode))
    }
}

impl Rasterizer for SwashRasterizer {
    fn set_pixel_size(&mut self, size: u32, dpi: u32) {
        self.ppem = pixels_per_em(size, dpi);
    }

    fn render_glyph(
        &mut self,
        codepoint: char,
        mode: RenderMode,
    ) -> Result<RasterizedGlyph, RasterError> {
        self.render(codepoint, mode)
    }

    fn outline(&mut self, codepoint: char) -> Option<BezPath> {
        let font = skrifa::FontRef::from_index(&self.data, self.index).ok()?;
        let glyph_id = font.charmap().map(codepoint)?;
        let glyph = font.outline_glyphs().get(glyph_id)?;
        let mut pen = FlippedPath(BezPath::new());
        glyph
            .draw(
                DrawSettings::unhinted(Size::new(self.ppem), LocationRef::default()),
                &mut pen,
            )
            .ok()?;
        Some(pen.0)
    }
}

impl core::fmt::Debug for SwashRasterizer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SwashRasterizer")
            .field("data", &self.data.len())
            .field("index", &self.index)
            .field("ppem", &self.ppem)
            .finish_non_exhaustive()
    }
}

/// Converts a swash image into coverage in the requested mode.
fn to_rasterized(image: &Image, advance: i32, mode: RenderMode) -> RasterizedGlyph {
    let width = image.placement.width;
    let rows = image.placement.height;
    let pixel_count = width as usize * rows as usize;
    let coverage: Vec<u8> = match image.content {
        Content::Mask => image.data.iter().copied().take(pixel_count).collect(),
        // Color and subpixel images carry four channels; alpha is the coverage.
        Content::Color | Content::SubpixelMask => image
            .data
            .chunks_exact(4)
            .map(|px| px[3])
            .take(pixel_count)
            .collect(),
    };
    let (pitch, pixel_mode, buffer) = match mode {
        RenderMode::Antialiased => (width as usize, PixelMode::Gray, coverage),
        RenderMode::Mono => {
            let pitch = (width as usize).div_ceil(8);
            let mut packed = alloc::vec![0_u8; pitch * rows as usize];
            for (i, &value) in coverage.iter().enumerate() {
                if value >= MONO_THRESHOLD {
                    let (y, x) = (i / width as usize, i % width as usize);
                    packed[y * pitch + x / 8] |= 0x80 >> (x % 8);
                }
            }
            (pitch, PixelMode::Mono, packed)
        }
    };
    RasterizedGlyph {
        width,
        rows,
        pitch,
        pixel_mode,
        buffer,
        advance,
        bitmap_top: image.placement.top,
        bitmap_left: image.placement.left,
    }
}

/// Collects an outline into a path, flipping y so that it points down.
struct FlippedPath(BezPath);

impl OutlinePen for FlippedPath {
    #[inline]
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to((x, -y));
    }

    #[inline]
    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to((x, -y));
    }

    #[inline]
    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.0.curve_to((cx0, -cy0), (cx1, -cy1), (x, -y));
    }

    #[inline]
    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.0.quad_to((cx, -cy), (x, -y));
    }

    #[inline]
    fn close(&mut self) {
        self.0.close_path();
    }
}
