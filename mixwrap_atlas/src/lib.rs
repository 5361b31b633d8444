// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mixwrap Atlas rasterizes glyphs once and keeps them in a shared texture atlas.
//!
//! The crate is split into:
//! - [`raster`]: the [`Rasterizer`] seam to a font engine and the bitmap it returns
//! - [`atlas`]: shelf packing into one fixed-size texture, behind the
//!   [`TextureUploader`] seam
//! - [`GlyphCache`] and [`FontAtlas`]: codepoint slots, glyph metrics and
//!   on-demand rasterization
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//! - `swash` (enabled by default): Provides [`SwashRasterizer`], backed by swash for
//!   bitmaps and skrifa for outlines.
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("mixwrap_atlas requires either the `std` or `libm` feature to be enabled");

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use peniko::kurbo;

pub mod atlas;
pub mod raster;

mod cache;
#[cfg(feature = "swash")]
mod swash_raster;

pub use atlas::{
    AtlasConfig, AtlasFull, AtlasRect, AtlasRegion, FilterMode, GlyphAtlas, PixmapTexture,
    TextureFormat, TextureUploader, UploadCommand, UploadRecorder, UvRect,
};
pub use cache::{
    CacheStats, CapacityExceeded, DEFAULT_CHARACTER_LIMIT, FontAtlas, GlyphCache, GlyphMetrics,
    GlyphRecord, GlyphState, RasterOptions, SlotId,
};
pub use raster::{
    PaddedBitmap, PixelMode, RasterError, RasterErrorKind, RasterizedGlyph, Rasterizer, RenderMode,
};
#[cfg(feature = "swash")]
pub use swash_raster::SwashRasterizer;
