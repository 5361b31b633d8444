// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared glyph texture and its packer.

use super::region::{AtlasFull, AtlasRegion, UvRect};
use super::upload::{FilterMode, TextureFormat, TextureUploader};
use crate::raster::PaddedBitmap;

/// Size and sampling of the atlas texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Free space kept along the left and top edges.
    pub margin: u32,
    /// Sampling filter.
    pub filter: FilterMode,
}

impl AtlasConfig {
    /// Fonts above this size get the large texture.
    pub const LARGE_FONT_SIZE: u32 = 30;
    /// Antialiased fonts above this size are sampled with [`FilterMode::Linear`].
    pub const LINEAR_FILTER_SIZE: u32 = 20;

    /// The texture used for a font of `size` points.
    ///
    /// Fonts up to 30 points get 512x512, larger ones 1024x1024.
    pub fn for_font(size: u32, antialiased: bool) -> Self {
        let side = if size > Self::LARGE_FONT_SIZE { 1024 } else { 512 };
        let filter = if antialiased && size > Self::LINEAR_FILTER_SIZE {
            FilterMode::Linear
        } else {
            FilterMode::Nearest
        };
        Self {
            width: side,
            height: side,
            margin: AtlasRegion::DEFAULT_MARGIN,
            filter,
        }
    }
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self::for_font(12, true)
    }
}

/// One fixed-size texture holding every rasterized glyph of a font.
///
/// The texture never grows and glyphs are never evicted; [`place`](Self::place)
/// fails with [`AtlasFull`] once the shelves are exhausted.
pub struct GlyphAtlas<U> {
    config: AtlasConfig,
    region: AtlasRegion,
    uploader: U,
    allocated: bool,
    placed: usize,
}

impl<U: TextureUploader> GlyphAtlas<U> {
    /// Creates an empty atlas. The texture is allocated on first placement.
    pub fn new(config: AtlasConfig, uploader: U) -> Self {
        Self {
            config,
            region: AtlasRegion::new(config.margin),
            uploader,
            allocated: false,
            placed: 0,
        }
    }

    /// Uploads `bitmap` into free space and returns the coordinates of the glyph
    /// inside it, with the border excluded.
    pub fn place(&mut self, bitmap: &PaddedBitmap) -> Result<UvRect, AtlasFull> {
        let AtlasConfig { width, height, .. } = self.config;
        let rect = self
            .region
            .allocate(bitmap.width, bitmap.height, width, height)?;
        if !self.allocated {
            log::debug!(
                "allocating {width}x{height} glyph atlas ({:?} filter)",
                self.config.filter
            );
            self.uploader
                .allocate(width, height, TextureFormat::Rgba8, self.config.filter);
            self.allocated = true;
        }
        self.uploader
            .sub_upload(rect.x, rect.y, rect.width, rect.height, bitmap.as_bytes());
        self.placed += 1;

        let (w, h) = (width as f32, height as f32);
        let left = (rect.x + bitmap.border) as f32;
        let top = (rect.y + bitmap.border) as f32;
        Ok(UvRect {
            u1: left / w,
            v1: top / h,
            u2: (left + bitmap.glyph_width as f32) / w,
            v2: (top + bitmap.glyph_height as f32) / h,
        })
    }

    /// Forgets every placement. The texture is allocated again, with the new
    /// configuration, on the next placement.
    pub fn reset(&mut self, config: AtlasConfig) {
        self.config = config;
        self.region = AtlasRegion::new(config.margin);
        self.allocated = false;
        self.placed = 0;
    }

    /// The current configuration.
    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// The free-space cursor.
    pub fn region(&self) -> &AtlasRegion {
        &self.region
    }

    /// Whether the texture has been allocated since the last reset.
    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    /// Number of bitmaps placed since the last reset.
    pub fn len(&self) -> usize {
        self.placed
    }

    /// Whether nothing has been placed since the last reset.
    pub fn is_empty(&self) -> bool {
        self.placed == 0
    }

    /// The texture receiver.
    pub fn uploader(&self) -> &U {
        &self.uploader
    }

    /// The texture receiver, mutably.
    pub fn uploader_mut(&mut self) -> &mut U {
        &mut self.uploader
    }
}

impl<U> core::fmt::Debug for GlyphAtlas<U> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlyphAtlas")
            .field("config", &self.config)
            .field("region", &self.region)
            .field("allocated", &self.allocated)
            .field("placed", &self.placed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::atlas::region::AtlasRect;
    use crate::atlas::{UploadCommand, UploadRecorder};
    use crate::raster::{PixelMode, RasterizedGlyph};

    fn bitmap(width: u32, rows: u32) -> PaddedBitmap {
        RasterizedGlyph {
            width,
            rows,
            pitch: width as usize,
            pixel_mode: PixelMode::Gray,
            buffer: alloc::vec![255; (width * rows) as usize],
            advance: width as i32,
            bitmap_top: rows as i32,
            bitmap_left: 0,
        }
        .expand_rgba(3)
    }

    fn uploads(recorder: &UploadRecorder) -> Vec<AtlasRect> {
        recorder
            .commands
            .iter()
            .filter_map(|c| match *c {
                UploadCommand::SubUpload {
                    x,
                    y,
                    width,
                    height,
                    ..
                } => Some(AtlasRect {
                    x,
                    y,
                    width,
                    height,
                }),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn config_follows_font_size() {
        assert_eq!(AtlasConfig::for_font(30, true).width, 512, "small font");
        assert_eq!(AtlasConfig::for_font(31, true).width, 1024, "large font");
        assert_eq!(AtlasConfig::for_font(20, true).filter, FilterMode::Nearest, "at threshold");
        assert_eq!(AtlasConfig::for_font(21, true).filter, FilterMode::Linear, "above threshold");
        assert_eq!(AtlasConfig::for_font(40, false).filter, FilterMode::Nearest, "mono");
    }

    #[test]
    fn texture_is_allocated_lazily() {
        let mut atlas = GlyphAtlas::new(AtlasConfig::for_font(12, true), UploadRecorder::new());
        assert!(atlas.uploader().commands.is_empty(), "nothing before the first glyph");
        atlas.place(&bitmap(4, 4)).unwrap();
        atlas.place(&bitmap(4, 4)).unwrap();
        let allocations = atlas
            .uploader()
            .commands
            .iter()
            .filter(|c| matches!(c, UploadCommand::Allocate { .. }))
            .count();
        assert_eq!(allocations, 1, "one allocation for two glyphs");
        assert!(
            matches!(atlas.uploader().commands[0], UploadCommand::Allocate { width: 512, .. }),
            "allocation precedes the upload"
        );
    }

    #[test]
    fn uv_excludes_border() {
        let mut atlas = GlyphAtlas::new(AtlasConfig::for_font(12, true), UploadRecorder::new());
        let uv = atlas.place(&bitmap(8, 16)).unwrap();
        assert_eq!(uv.u1, 13.0 / 512.0, "left edge skips margin and border");
        assert_eq!(uv.v1, 13.0 / 512.0, "top edge skips margin and border");
        assert_eq!(uv.u2, 21.0 / 512.0, "right edge");
        assert_eq!(uv.v2, 29.0 / 512.0, "bottom edge");
    }

    #[test]
    fn placements_never_overlap() {
        let mut atlas = GlyphAtlas::new(AtlasConfig::for_font(12, true), UploadRecorder::new());
        let sizes = [(5, 9), (30, 30), (12, 3), (60, 44), (1, 1), (25, 50)];
        for i in 0..120 {
            let (w, h) = sizes[i % sizes.len()];
            if atlas.place(&bitmap(w, h)).is_err() {
                break;
            }
        }
        let rects = uploads(atlas.uploader());
        assert!(rects.len() > 10, "a useful number of glyphs was placed");
        for (i, a) in rects.iter().enumerate() {
            assert!(a.x + a.width <= 512 && a.y + a.height <= 512, "inside the texture");
            for b in &rects[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn full_atlas_reports_error() {
        let mut atlas = GlyphAtlas::new(AtlasConfig::for_font(12, true), UploadRecorder::new());
        let mut placed = 0;
        let err = loop {
            match atlas.place(&bitmap(200, 200)) {
                Ok(_) => placed += 1,
                Err(err) => break err,
            }
        };
        assert_eq!(placed, 4, "two rows of two glyphs fit in 512x512");
        assert_eq!(err, AtlasFull { width: 206, height: 206 }, "padded size is reported");
        assert_eq!(atlas.len(), 4, "failed placements are not counted");
    }

    #[test]
    fn reset_reallocates_with_new_config() {
        let mut atlas = GlyphAtlas::new(AtlasConfig::for_font(12, true), UploadRecorder::new());
        atlas.place(&bitmap(4, 4)).unwrap();
        atlas.reset(AtlasConfig::for_font(48, true));
        assert!(!atlas.is_allocated() && atlas.is_empty(), "reset forgets everything");
        atlas.uploader_mut().commands.clear();
        atlas.place(&bitmap(4, 4)).unwrap();
        assert!(
            matches!(
                atlas.uploader().commands[0],
                UploadCommand::Allocate { width: 1024, filter: FilterMode::Linear, .. }
            ),
            "new texture uses the new size"
        );
    }
}
