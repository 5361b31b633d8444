// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph texture atlas.
//!
//! This module provides the texture side of the glyph cache:
//! - Shelf packing of padded glyph bitmaps into one fixed-size texture
//! - Normalized texture coordinates with the padding excluded
//! - Lazy texture allocation on the first glyph
//! - A [`TextureUploader`] seam, with a CPU [`PixmapTexture`] and a deferred
//!   [`UploadRecorder`] implementation

mod commands;
mod packer;
mod region;
mod upload;

pub use commands::{UploadCommand, UploadRecorder};
pub use packer::{AtlasConfig, GlyphAtlas};
pub use region::{AtlasFull, AtlasRect, AtlasRegion, UvRect};
pub use upload::{FilterMode, PixmapTexture, TextureFormat, TextureUploader};
