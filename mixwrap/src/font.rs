// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A loaded font face together with its glyph atlas.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mixwrap_atlas::{
    CacheStats, FontAtlas, GlyphAtlas, GlyphRecord, PixmapTexture, RasterOptions, Rasterizer,
    RenderMode, TextureUploader,
};

use crate::context::FontContext;
use crate::decode::Codepoints;
use crate::kurbo::{Point, Rect};
use crate::layout::breaker::LineBreaker;
use crate::layout::{alignment, Alignment, GlyphSource, Line, MultilineBlock, Spacing};
use crate::resolve::FontResolver;

/// Line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f64 = 1.43;

/// How a font is loaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontOptions {
    /// Nominal size in points.
    pub size: u32,
    /// Whether glyphs are rendered with antialiasing or as 1-bit bitmaps.
    pub antialiased: bool,
    /// Whether glyph outlines are extracted for [`Font::string_outlines`].
    pub make_contours: bool,
    /// Accuracy of outline simplification. Zero keeps outlines as drawn.
    pub simplify_amount: f64,
    /// Resolution to rasterize at, overriding [`FontContext::default_dpi`].
    pub dpi: Option<u32>,
}

impl FontOptions {
    fn raster_options(&self) -> RasterOptions {
        RasterOptions {
            font_size: self.size,
            mode: if self.antialiased {
                RenderMode::Antialiased
            } else {
                RenderMode::Mono
            },
            make_contours: self.make_contours,
            simplify_amount: self.simplify_amount,
            ..RasterOptions::default()
        }
    }
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            size: 12,
            antialiased: true,
            make_contours: false,
            simplify_amount: 0.3,
            dpi: None,
        }
    }
}

/// Failure to load a font.
#[derive(Debug)]
#[non_exhaustive]
pub enum FontError {
    /// The file does not exist and no resolver knows the name.
    NotFound(PathBuf),
    /// The file exists but could not be read.
    Io {
        /// The file that was read.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The file holds no usable font face.
    InvalidFont(PathBuf),
    /// The operation needs a font that was loaded before.
    NotLoaded,
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "font file not found: {}", path.display()),
            Self::Io { path, source } => {
                write!(f, "failed to read font file {}: {source}", path.display())
            }
            Self::InvalidFont(path) => write!(f, "no usable font face in {}", path.display()),
            Self::NotLoaded => f.write_str("no font is loaded"),
        }
    }
}

impl core::error::Error for FontError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Opens font files as rasterizers.
pub trait FaceLoader {
    /// Loads the first face of the font file at `path`.
    fn load_face(&mut self, path: &Path) -> Result<Box<dyn Rasterizer>, FontError>;
}

#[cfg(feature = "swash")]
pub use swash_loader::SwashLoader;

#[cfg(feature = "swash")]
mod swash_loader {
    use std::path::Path;

    use mixwrap_atlas::{Rasterizer, SwashRasterizer};

    use super::{FaceLoader, FontError};

    /// Reads font files from disk and rasterizes them with swash.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct SwashLoader;

    impl FaceLoader for SwashLoader {
        fn load_face(&mut self, path: &Path) -> Result<Box<dyn Rasterizer>, FontError> {
            let data = std::fs::read(path).map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    FontError::NotFound(path.to_path_buf())
                } else {
                    FontError::Io {
                        path: path.to_path_buf(),
                        source,
                    }
                }
            })?;
            let face = SwashRasterizer::from_data(data, 0)
                .ok_or_else(|| FontError::InvalidFont(path.to_path_buf()))?;
            Ok(Box::new(face))
        }
    }
}

/// A font face at one size, with the atlas its glyphs are drawn from.
///
/// A `Font` starts out unloaded. Layout and measurement on an unloaded font
/// log an error and return empty results.
pub struct Font<U = PixmapTexture> {
    loader: Box<dyn FaceLoader>,
    resolver: Option<Arc<dyn FontResolver + Send + Sync>>,
    face: Option<Box<dyn Rasterizer>>,
    atlas: FontAtlas<U>,
    options: FontOptions,
    path: Option<PathBuf>,
    default_dpi: u32,
    letter_spacing: f64,
    space_size: f64,
    line_height: f64,
}

#[cfg(feature = "swash")]
impl Font<PixmapTexture> {
    /// Creates an unloaded font that reads files with [`SwashLoader`] and keeps
    /// its atlas in a [`PixmapTexture`].
    pub fn new(cx: &FontContext) -> Self {
        Self::with_parts(cx, SwashLoader, PixmapTexture::new())
    }
}

impl<U: TextureUploader> Font<U> {
    /// Creates an unloaded font from its collaborators.
    pub fn with_parts(cx: &FontContext, loader: impl FaceLoader + 'static, uploader: U) -> Self {
        let options = FontOptions::default();
        Self {
            loader: Box::new(loader),
            resolver: cx.resolver.clone(),
            face: None,
            atlas: FontAtlas::new(uploader, options.raster_options()),
            options,
            path: None,
            default_dpi: cx.default_dpi,
            letter_spacing: 1.0,
            space_size: 1.0,
            line_height: LINE_HEIGHT_FACTOR * f64::from(options.size),
        }
    }

    /// Loads the font at `path` with `options`, replacing the current face.
    ///
    /// When `path` is not an existing file it is looked up by name through the
    /// context's resolver, so names such as `sans-serif` work as well. Every
    /// cached glyph is dropped and the line height is reset to `1.43 * size`.
    pub fn load(&mut self, path: impl AsRef<Path>, options: FontOptions) -> Result<(), FontError> {
        self.unload();
        let path = self.locate(path.as_ref());
        self.options = options;
        self.path = Some(path.clone());
        let mut face = self.loader.load_face(&path).inspect_err(|err| {
            log::error!("{err}");
        })?;
        let dpi = options.dpi.unwrap_or(self.default_dpi);
        face.set_pixel_size(options.size, dpi);
        self.atlas.reset(options.raster_options());
        self.line_height = LINE_HEIGHT_FACTOR * f64::from(options.size);
        self.face = Some(face);
        log::debug!(
            "loaded {} at {}pt and {dpi} dpi",
            path.display(),
            options.size
        );
        Ok(())
    }

    /// Loads the last font again with its options.
    pub fn reload(&mut self) -> Result<(), FontError> {
        let path = self.path.clone().ok_or(FontError::NotLoaded)?;
        self.load(path, self.options)
    }

    /// Drops the face and every cached glyph. The path is kept for [`reload`](Self::reload).
    pub fn unload(&mut self) {
        self.face = None;
        self.atlas.reset(self.options.raster_options());
    }

    /// Loads the last font again at `size`.
    pub fn change_size(&mut self, size: u32) -> Result<(), FontError> {
        let path = self.path.clone().ok_or(FontError::NotLoaded)?;
        self.load(
            path,
            FontOptions {
                size,
                ..self.options
            },
        )
    }

    /// Whether a face is loaded.
    pub fn is_loaded(&self) -> bool {
        self.face.is_some()
    }

    /// Whether glyphs are rendered with antialiasing.
    pub fn is_antialiased(&self) -> bool {
        self.options.antialiased
    }

    /// The nominal size in points.
    pub fn size(&self) -> u32 {
        self.options.size
    }

    /// The options of the last load.
    pub fn options(&self) -> &FontOptions {
        &self.options
    }

    /// The file of the last load, after name resolution.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Multiplier applied to every advance. Affects later layouts only.
    pub fn set_letter_spacing(&mut self, spacing: f64) {
        self.letter_spacing = spacing;
    }

    /// The advance multiplier.
    pub fn letter_spacing(&self) -> f64 {
        self.letter_spacing
    }

    /// Multiplier applied to the width of a space. Affects later layouts only.
    pub fn set_space_size(&mut self, size: f64) {
        self.space_size = size;
    }

    /// The space width multiplier.
    pub fn space_size(&self) -> f64 {
        self.space_size
    }

    /// Distance between consecutive baselines, before the extent of tall glyphs.
    pub fn set_line_height(&mut self, height: f64) {
        self.line_height = height;
    }

    /// The line height.
    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    /// Drops every cached glyph and limits the cache to `limit` codepoints.
    ///
    /// A limit of zero is ignored.
    pub fn reserve_characters(&mut self, limit: usize) {
        self.atlas.reserve(limit);
    }

    /// Number of glyphs rasterized since the last reset.
    pub fn loaded_character_count(&self) -> usize {
        self.atlas.cache().loaded_count()
    }

    /// Number of distinct codepoints the cache holds.
    pub fn character_limit(&self) -> usize {
        self.atlas.cache().limit()
    }

    /// Cache and atlas counters since the last reset.
    pub fn stats(&self) -> CacheStats {
        self.atlas.stats()
    }

    /// The glyph record of `ch`, if it was looked up since the last reset.
    pub fn glyph(&self, ch: char) -> Option<&GlyphRecord> {
        self.atlas.get(ch)
    }

    /// The texture atlas.
    pub fn atlas(&self) -> &GlyphAtlas<U> {
        self.atlas.atlas()
    }

    /// The texture the atlas uploads into.
    pub fn texture(&self) -> &U {
        self.atlas.atlas().uploader()
    }

    /// The texture the atlas uploads into, mutably.
    pub fn texture_mut(&mut self) -> &mut U {
        self.atlas.atlas_mut().uploader_mut()
    }

    /// Binds the atlas texture for drawing.
    pub fn bind_texture(&mut self) {
        self.texture_mut().bind();
    }

    /// Releases the atlas texture after drawing.
    pub fn unbind_texture(&mut self) {
        self.texture_mut().unbind();
    }

    /// Breaks `text` into lines no wider than `max_width`, the first starting at `origin`.
    pub fn parse_text(
        &mut self,
        text: &str,
        max_width: f64,
        origin: Point,
        alignment: Alignment,
    ) -> MultilineBlock {
        self.parse_bytes(text.as_bytes(), max_width, origin, alignment)
    }

    /// Like [`parse_text`](Self::parse_text) for UTF-8 that may be malformed.
    ///
    /// Malformed sequences are logged and skipped.
    pub fn parse_bytes(
        &mut self,
        bytes: &[u8],
        max_width: f64,
        origin: Point,
        alignment: Alignment,
    ) -> MultilineBlock {
        let Some((mut glyphs, spacing)) = self.layout_source() else {
            return MultilineBlock {
                width: max_width,
                alignment,
                ..MultilineBlock::default()
            };
        };
        let mut lines =
            LineBreaker::new(&mut glyphs, spacing, max_width, origin).run(Codepoints::new(bytes));
        alignment::align(&mut lines, max_width, alignment);
        let bounds = alignment::multiline_bounding_box(&lines);
        MultilineBlock {
            lines,
            width: max_width,
            alignment,
            bounds,
        }
    }

    /// The box of `line` once aligned within `width`.
    pub fn line_bounding_box(&self, line: &Line, width: f64, alignment: Alignment) -> Rect {
        alignment::line_bounding_box(line, width, alignment)
    }

    /// Union of the boxes of `lines`, or [`Rect::ZERO`] when there are none.
    pub fn multiline_bounding_box(&self, lines: &[Line]) -> Rect {
        alignment::multiline_bounding_box(lines)
    }

    /// The y of line `n` of `block`: the top of its box, or its baseline.
    pub fn line_position_y(&self, block: &MultilineBlock, n: usize, baseline: bool) -> Option<f64> {
        let line = block.lines().get(n)?;
        let top = line.bbox().y0;
        Some(if baseline {
            top + line.baseline_offset()
        } else {
            top
        })
    }

    /// The y of the last line of `block`.
    pub fn last_line_position_y(&self, block: &MultilineBlock, baseline: bool) -> Option<f64> {
        let last = block.lines().len().checked_sub(1)?;
        self.line_position_y(block, last, baseline)
    }

    /// The face and atlas as a glyph source, with the font-wide measures.
    ///
    /// Logs an error when no face is loaded.
    pub(crate) fn layout_source(&mut self) -> Option<(Glyphs<'_, dyn Rasterizer, U>, Spacing)> {
        let (letter_spacing, space_size, line_height) =
            (self.letter_spacing, self.space_size, self.line_height);
        let Some(face) = self.face.as_deref_mut() else {
            log::error!("{}; call `Font::load` first", FontError::NotLoaded);
            return None;
        };
        let mut glyphs = Glyphs {
            face,
            atlas: &mut self.atlas,
        };
        let spacing = Spacing::new(&mut glyphs, letter_spacing, space_size, line_height);
        Some((glyphs, spacing))
    }

    fn locate(&self, path: &Path) -> PathBuf {
        if path.is_file() {
            return path.to_path_buf();
        }
        let resolved = self
            .resolver
            .as_ref()
            .zip(path.to_str())
            .and_then(|(resolver, name)| resolver.resolve(name));
        resolved.unwrap_or_else(|| path.to_path_buf())
    }
}

impl<U> fmt::Debug for Font<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("path", &self.path)
            .field("options", &self.options)
            .field("loaded", &self.face.is_some())
            .field("atlas", &self.atlas)
            .field("letter_spacing", &self.letter_spacing)
            .field("space_size", &self.space_size)
            .field("line_height", &self.line_height)
            .finish_non_exhaustive()
    }
}

/// A face and the atlas its glyphs are cached in.
pub(crate) struct Glyphs<'a, R: ?Sized, U> {
    face: &'a mut R,
    atlas: &'a mut FontAtlas<U>,
}

impl<R: Rasterizer + ?Sized, U: TextureUploader> GlyphSource for Glyphs<'_, R, U> {
    fn glyph(&mut self, ch: char) -> &GlyphRecord {
        self.atlas.glyph(&mut *self.face, ch)
    }
}
