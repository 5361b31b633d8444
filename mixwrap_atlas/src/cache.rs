// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-codepoint glyph records with on-demand rasterization.

use alloc::vec::Vec;
use core::fmt::{self, Debug, Formatter};

use foldhash::fast::FixedState;
use hashbrown::HashMap;

use crate::atlas::{AtlasConfig, GlyphAtlas, TextureUploader, UvRect};
use crate::kurbo::{BezPath, simplify};
use crate::raster::{RasterizedGlyph, Rasterizer, RenderMode};

/// Number of distinct codepoints a cache holds unless reserved otherwise.
pub const DEFAULT_CHARACTER_LIMIT: usize = 10_000;

/// Index of a glyph record, stable until the cache is reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u32);

impl SlotId {
    /// Slot handed out when the cache is full. It refers to the first codepoint
    /// ever seen, so text still draws, with the wrong glyph.
    pub const SENTINEL: Self = Self(0);

    /// The slot as an index into the record arena.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Whether a record has been rasterized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GlyphState {
    /// Assigned a slot, not yet rasterized.
    #[default]
    Unloaded,
    /// Rasterized; metrics are valid.
    Loaded,
}

/// Pixel metrics of a rasterized glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Horizontal advance.
    pub advance: i32,
    /// Bitmap width.
    pub width: u32,
    /// Bitmap height.
    pub rows: u32,
    /// Distance from the baseline up to the top of the bitmap.
    pub bitmap_top: i32,
    /// Distance from the pen position to the left of the bitmap.
    pub bitmap_left: i32,
}

impl GlyphMetrics {
    /// Distance the bitmap reaches below the baseline; negative when it sits above.
    pub const fn descent(&self) -> i32 {
        self.rows as i32 - self.bitmap_top
    }
}

impl From<&RasterizedGlyph> for GlyphMetrics {
    fn from(glyph: &RasterizedGlyph) -> Self {
        Self {
            advance: glyph.advance,
            width: glyph.width,
            rows: glyph.rows,
            bitmap_top: glyph.bitmap_top,
            bitmap_left: glyph.bitmap_left,
        }
    }
}

/// Everything known about one codepoint.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRecord {
    codepoint: char,
    state: GlyphState,
    metrics: GlyphMetrics,
    uv: Option<UvRect>,
    outline: Option<BezPath>,
}

impl GlyphRecord {
    fn new(codepoint: char) -> Self {
        Self {
            codepoint,
            state: GlyphState::Unloaded,
            metrics: GlyphMetrics::default(),
            uv: None,
            outline: None,
        }
    }

    /// The codepoint this record describes.
    pub fn codepoint(&self) -> char {
        self.codepoint
    }

    /// Whether the glyph has been rasterized.
    pub fn state(&self) -> GlyphState {
        self.state
    }

    /// Pixel metrics; all zero while unloaded.
    pub fn metrics(&self) -> &GlyphMetrics {
        &self.metrics
    }

    /// Location in the atlas, if the glyph is loaded and was placed.
    pub fn uv(&self) -> Option<UvRect> {
        match self.state {
            GlyphState::Loaded => self.uv,
            GlyphState::Unloaded => None,
        }
    }

    /// Location in the atlas, or [`UvRect::ZERO`] when there is none.
    pub fn uv_or_zero(&self) -> UvRect {
        self.uv().unwrap_or(UvRect::ZERO)
    }

    /// Simplified outline, when contours were requested.
    pub fn outline(&self) -> Option<&BezPath> {
        self.outline.as_ref()
    }
}

/// The cache capacity was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapacityExceeded {
    /// The configured limit.
    pub limit: usize,
}

impl fmt::Display for CapacityExceeded {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "glyph cache is limited to {} characters", self.limit)
    }
}

impl core::error::Error for CapacityExceeded {}

/// Counters describing how a cache has been used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups of a codepoint that already had a slot.
    pub hits: u64,
    /// Lookups that assigned a new slot.
    pub misses: u64,
    /// Glyphs that found no room in the atlas.
    pub atlas_overflows: u64,
    /// Lookups refused because the character limit was reached.
    pub capacity_overflows: u64,
}

/// Maps codepoints to stable slots over an arena of [`GlyphRecord`]s.
#[derive(Clone)]
pub struct GlyphCache {
    records: Vec<GlyphRecord>,
    slots: HashMap<char, SlotId, FixedState>,
    limit: usize,
    stats: CacheStats,
    fallback: GlyphRecord,
}

impl GlyphCache {
    /// Creates an empty cache holding up to [`DEFAULT_CHARACTER_LIMIT`] codepoints.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_CHARACTER_LIMIT)
    }

    /// Creates an empty cache holding up to `limit` codepoints.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: Vec::new(),
            slots: HashMap::with_hasher(FixedState::default()),
            limit: limit.max(1),
            stats: CacheStats::default(),
            fallback: GlyphRecord::new('\0'),
        }
    }

    /// Returns the slot of `codepoint`, assigning one on first sighting.
    ///
    /// When the limit is reached, returns [`SlotId::SENTINEL`]. The first refusal
    /// after a clear is logged as an error and later ones only at trace level.
    pub fn lookup(&mut self, codepoint: char) -> SlotId {
        match self.try_lookup(codepoint) {
            Ok(slot) => slot,
            Err(err) if self.is_first_overflow() => {
                log::error!("{err}; U+{:04X} uses slot 0", u32::from(codepoint));
                SlotId::SENTINEL
            }
            Err(err) => {
                log::trace!("{err}; U+{:04X} uses slot 0", u32::from(codepoint));
                SlotId::SENTINEL
            }
        }
    }

    fn is_first_overflow(&self) -> bool {
        self.stats.capacity_overflows == 1
    }

    /// Returns the slot of `codepoint`, assigning one on first sighting.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the limit keeps slot numbers small"
    )]
    pub fn try_lookup(&mut self, codepoint: char) -> Result<SlotId, CapacityExceeded> {
        if let Some(&slot) = self.slots.get(&codepoint) {
            self.stats.hits += 1;
            return Ok(slot);
        }
        if self.records.len() >= self.limit {
            self.stats.capacity_overflows += 1;
            return Err(CapacityExceeded { limit: self.limit });
        }
        let slot = SlotId(self.records.len() as u32);
        self.records.push(GlyphRecord::new(codepoint));
        self.slots.insert(codepoint, slot);
        self.stats.misses += 1;
        Ok(slot)
    }

    /// Returns the slot of `codepoint` without assigning one.
    pub fn slot(&self, codepoint: char) -> Option<SlotId> {
        self.slots.get(&codepoint).copied()
    }

    /// Returns the record in `slot`, or an empty unloaded record if there is none.
    pub fn record(&self, slot: SlotId) -> &GlyphRecord {
        self.records.get(slot.index()).unwrap_or(&self.fallback)
    }

    /// Drops every record and sets the limit to `limit`, reserving storage for it.
    ///
    /// A limit of zero is ignored.
    pub fn reserve(&mut self, limit: usize) {
        if limit == 0 {
            return;
        }
        self.clear();
        self.limit = limit;
        self.records.reserve(limit);
        self.slots.reserve(limit);
    }

    /// Drops every record and the statistics. The limit is kept.
    pub fn clear(&mut self) {
        self.records.clear();
        self.slots.clear();
        self.stats = CacheStats::default();
    }

    /// Number of codepoints with a slot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no codepoint has a slot.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rasterized records.
    pub fn loaded_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.state == GlyphState::Loaded)
            .count()
    }

    /// Maximum number of codepoints.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Usage counters since the last reset.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Clear hit/miss statistics without clearing the cache itself.
    pub fn clear_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    /// Iterates over all records in slot order.
    pub fn records(&self) -> impl Iterator<Item = &GlyphRecord> + '_ {
        self.records.iter()
    }
}

impl Default for GlyphCache {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for GlyphCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphCache")
            .field("records", &self.records.len())
            .field("limit", &self.limit)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// How glyphs are rasterized and stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterOptions {
    /// Nominal font size in points; selects the atlas size.
    pub font_size: u32,
    /// Antialiased or 1-bit coverage.
    pub mode: RenderMode,
    /// Transparent padding around each glyph in the atlas.
    pub border: u32,
    /// Whether glyph outlines are extracted as well.
    pub make_contours: bool,
    /// Accuracy passed to outline simplification; zero keeps outlines as drawn.
    pub simplify_amount: f64,
}

impl RasterOptions {
    /// Default padding around each glyph.
    pub const DEFAULT_BORDER: u32 = 3;

    /// The atlas configuration for these options.
    pub fn atlas_config(&self) -> AtlasConfig {
        AtlasConfig::for_font(self.font_size, self.mode == RenderMode::Antialiased)
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            font_size: 12,
            mode: RenderMode::Antialiased,
            border: Self::DEFAULT_BORDER,
            make_contours: false,
            simplify_amount: 0.3,
        }
    }
}

/// A [`GlyphCache`] whose glyphs live in a [`GlyphAtlas`].
pub struct FontAtlas<U> {
    cache: GlyphCache,
    atlas: GlyphAtlas<U>,
    options: RasterOptions,
}

impl<U: TextureUploader> FontAtlas<U> {
    /// Creates an empty font atlas drawing into `uploader`.
    pub fn new(uploader: U, options: RasterOptions) -> Self {
        Self {
            cache: GlyphCache::new(),
            atlas: GlyphAtlas::new(options.atlas_config(), uploader),
            options,
        }
    }

    /// Returns the record for `codepoint`, rasterizing it with `rasterizer` on first use.
    pub fn glyph<R: Rasterizer + ?Sized>(
        &mut self,
        rasterizer: &mut R,
        codepoint: char,
    ) -> &GlyphRecord {
        let slot = self.cache.lookup(codepoint);
        self.ensure_rasterized(rasterizer, slot)
    }

    /// Rasterizes and places the record in `slot` unless that already happened.
    pub fn ensure_rasterized<R: Rasterizer + ?Sized>(
        &mut self,
        rasterizer: &mut R,
        slot: SlotId,
    ) -> &GlyphRecord {
        let Some(record) = self.cache.records.get(slot.index()) else {
            return &self.cache.fallback;
        };
        if record.state == GlyphState::Loaded {
            return &self.cache.records[slot.index()];
        }
        let codepoint = record.codepoint;

        let glyph = rasterizer
            .render_glyph(codepoint, self.options.mode)
            .unwrap_or_else(|err| {
                log::warn!("{err}; using an empty bitmap");
                RasterizedGlyph::empty(0)
            });
        let metrics = GlyphMetrics::from(&glyph);
        let uv = match self.atlas.place(&glyph.expand_rgba(self.options.border)) {
            Ok(uv) => Some(uv),
            Err(err) => {
                log::warn!("{err}; U+{:04X} will not be drawn", u32::from(codepoint));
                self.cache.stats.atlas_overflows += 1;
                None
            }
        };
        let outline = if self.options.make_contours {
            rasterizer
                .outline(codepoint)
                .map(|path| simplify_outline(&path, self.options.simplify_amount))
        } else {
            None
        };
        log::trace!(
            "rasterized U+{:04X} into slot {}: {}x{} advance {}",
            u32::from(codepoint),
            slot.0,
            metrics.width,
            metrics.rows,
            metrics.advance
        );

        let record = &mut self.cache.records[slot.index()];
        record.state = GlyphState::Loaded;
        record.metrics = metrics;
        record.uv = uv;
        record.outline = outline;
        record
    }

    /// Returns the record for `codepoint` if it has a slot.
    pub fn get(&self, codepoint: char) -> Option<&GlyphRecord> {
        self.cache
            .slot(codepoint)
            .map(|slot| self.cache.record(slot))
    }

    /// Drops every record and placement and adopts `options`.
    pub fn reset(&mut self, options: RasterOptions) {
        self.options = options;
        self.cache.clear();
        self.atlas.reset(options.atlas_config());
    }

    /// Drops every record and placement and sets the character limit to `limit`.
    ///
    /// A limit of zero is ignored.
    pub fn reserve(&mut self, limit: usize) {
        if limit == 0 {
            return;
        }
        self.cache.reserve(limit);
        self.atlas.reset(self.options.atlas_config());
    }

    /// The slot table.
    pub fn cache(&self) -> &GlyphCache {
        &self.cache
    }

    /// The slot table, mutably.
    pub fn cache_mut(&mut self) -> &mut GlyphCache {
        &mut self.cache
    }

    /// The texture atlas.
    pub fn atlas(&self) -> &GlyphAtlas<U> {
        &self.atlas
    }

    /// The texture atlas, mutably.
    pub fn atlas_mut(&mut self) -> &mut GlyphAtlas<U> {
        &mut self.atlas
    }

    /// The options glyphs are rasterized with.
    pub fn options(&self) -> &RasterOptions {
        &self.options
    }

    /// Usage counters since the last reset.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats
    }
}

impl<U> Debug for FontAtlas<U> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontAtlas")
            .field("cache", &self.cache)
            .field("atlas", &self.atlas)
            .field("options", &self.options)
            .finish()
    }
}

fn simplify_outline(path: &BezPath, accuracy: f64) -> BezPath {
    if accuracy <= 0.0 {
        return path.clone();
    }
    simplify::simplify_bezpath(path, accuracy, &simplify::SimplifyOptions::default())
}
