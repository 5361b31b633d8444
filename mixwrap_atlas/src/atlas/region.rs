// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shelf allocation and texture coordinate types.

use core::fmt;

/// Pixel rectangle occupied by a padded glyph in the atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasRect {
    /// X position in atlas (pixels).
    pub x: u32,
    /// Y position in atlas (pixels).
    pub y: u32,
    /// Width including padding (pixels).
    pub width: u32,
    /// Height including padding (pixels).
    pub height: u32,
}

impl AtlasRect {
    /// Returns `true` if the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Normalized texture coordinates of a glyph inside the atlas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UvRect {
    /// Left edge.
    pub u1: f32,
    /// Top edge.
    pub v1: f32,
    /// Right edge.
    pub u2: f32,
    /// Bottom edge.
    pub v2: f32,
}

impl UvRect {
    /// Coordinates that sample nothing.
    pub const ZERO: Self = Self {
        u1: 0.0,
        v1: 0.0,
        u2: 0.0,
        v2: 0.0,
    };
}

/// The atlas has no room left for a glyph of the given padded size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasFull {
    /// Padded width of the rejected glyph.
    pub width: u32,
    /// Padded height of the rejected glyph.
    pub height: u32,
}

impl fmt::Display for AtlasFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no room in the glyph atlas for a {}x{} bitmap",
            self.width, self.height
        )
    }
}

impl core::error::Error for AtlasFull {}

/// Free-space cursor of a shelf packer.
///
/// Glyphs are placed left to right along the current row. When a glyph would
/// cross the right edge, the row is closed and a new one starts below its
/// tallest glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasRegion {
    x: u32,
    y: u32,
    row_height: u32,
    margin: u32,
}

impl AtlasRegion {
    /// Distance kept free along the left and top edges of the texture.
    pub const DEFAULT_MARGIN: u32 = 10;

    /// Creates an empty region whose rows start `margin` pixels from the edges.
    pub const fn new(margin: u32) -> Self {
        Self {
            x: margin,
            y: margin,
            row_height: 0,
            margin,
        }
    }

    /// X offset of the next placement in the current row.
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Y offset of the current row.
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Tallest glyph in the current row.
    pub const fn row_height(&self) -> u32 {
        self.row_height
    }

    /// Reserves a `width` x `height` rectangle in an `atlas_width` x `atlas_height` texture.
    ///
    /// The cursor is only moved when the allocation succeeds.
    pub fn allocate(
        &mut self,
        width: u32,
        height: u32,
        atlas_width: u32,
        atlas_height: u32,
    ) -> Result<AtlasRect, AtlasFull> {
        let full = AtlasFull { width, height };
        if self.margin + width > atlas_width {
            return Err(full);
        }
        let (mut x, mut y, mut row_height) = (self.x, self.y, self.row_height);
        if x + width > atlas_width {
            y += row_height;
            x = self.margin;
            row_height = 0;
        }
        if y + height > atlas_height {
            return Err(full);
        }
        self.x = x + width;
        self.y = y;
        self.row_height = row_height.max(height);
        Ok(AtlasRect {
            x,
            y,
            width,
            height,
        })
    }
}

impl Default for AtlasRegion {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MARGIN)
    }
}
