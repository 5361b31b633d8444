// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The texture seam and a CPU-side texture.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

/// Pixel format of the atlas texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum TextureFormat {
    /// Four 8-bit channels, red first.
    #[default]
    Rgba8,
}

/// Sampling filter of the atlas texture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Nearest texel.
    #[default]
    Nearest,
    /// Bilinear interpolation.
    Linear,
}

/// Receives the atlas texture and its incremental updates.
///
/// Implementations usually forward to a graphics API. The atlas calls
/// [`allocate`](Self::allocate) once before the first upload and again after a reset.
pub trait TextureUploader {
    /// Creates (or recreates) a texture of the given size, cleared to transparent.
    fn allocate(&mut self, width: u32, height: u32, format: TextureFormat, filter: FilterMode);

    /// Copies a `width` x `height` block of tightly packed RGBA pixels to `(x, y)`.
    fn sub_upload(&mut self, x: u32, y: u32, width: u32, height: u32, rgba: &[u8]);

    /// Makes the texture current for drawing.
    fn bind(&mut self) {}

    /// Releases the texture after drawing.
    fn unbind(&mut self) {}
}

impl<T: TextureUploader + ?Sized> TextureUploader for Box<T> {
    fn allocate(&mut self, width: u32, height: u32, format: TextureFormat, filter: FilterMode) {
        (**self).allocate(width, height, format, filter);
    }

    fn sub_upload(&mut self, x: u32, y: u32, width: u32, height: u32, rgba: &[u8]) {
        (**self).sub_upload(x, y, width, height, rgba);
    }

    fn bind(&mut self) {
        (**self).bind();
    }

    fn unbind(&mut self) {
        (**self).unbind();
    }
}

/// An atlas texture kept in memory as RGBA pixels.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PixmapTexture {
    width: u32,
    height: u32,
    filter: FilterMode,
    pixels: Vec<[u8; 4]>,
}

impl PixmapTexture {
    /// Creates an unallocated texture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Width in pixels, zero until allocated.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels, zero until allocated.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The filter requested at allocation.
    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Whether [`TextureUploader::allocate`] has been called.
    pub fn is_allocated(&self) -> bool {
        !self.pixels.is_empty()
    }

    /// Returns the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// All pixels as RGBA bytes in row-major order.
    pub fn data_as_u8_slice(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

impl TextureUploader for PixmapTexture {
    fn allocate(&mut self, width: u32, height: u32, _format: TextureFormat, filter: FilterMode) {
        self.width = width;
        self.height = height;
        self.filter = filter;
        self.pixels = vec![[0; 4]; width as usize * height as usize];
    }

    fn sub_upload(&mut self, x: u32, y: u32, width: u32, height: u32, rgba: &[u8]) {
        let Ok(src) = bytemuck::try_cast_slice::<u8, [u8; 4]>(rgba) else {
            log::warn!("ignoring upload of {} bytes, not whole RGBA pixels", rgba.len());
            return;
        };
        if x + width > self.width || y + height > self.height || src.len() < (width * height) as usize
        {
            log::warn!("ignoring {width}x{height} upload at ({x}, {y}) outside the texture");
            return;
        }
        if width == 0 || height == 0 {
            return;
        }
        let row_len = width as usize;
        for (row, src_row) in src.chunks_exact(row_len).take(height as usize).enumerate() {
            let start = (y as usize + row) * self.width as usize + x as usize;
            self.pixels[start..start + row_len].copy_from_slice(src_row);
        }
    }
}

impl core::fmt::Debug for PixmapTexture {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixmapTexture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_upload_writes_block() {
        let mut texture = PixmapTexture::new();
        assert!(!texture.is_allocated(), "starts unallocated");
        texture.allocate(4, 4, TextureFormat::Rgba8, FilterMode::Linear);
        let block = [[1_u8, 2, 3, 4]; 4];
        texture.sub_upload(1, 2, 2, 2, bytemuck::cast_slice(&block));
        assert_eq!(texture.pixel(0, 2), Some([0; 4]), "left of the block");
        assert_eq!(texture.pixel(1, 2), Some([1, 2, 3, 4]), "block origin");
        assert_eq!(texture.pixel(2, 3), Some([1, 2, 3, 4]), "block corner");
        assert_eq!(texture.pixel(3, 3), Some([0; 4]), "right of the block");
        assert_eq!(texture.filter(), FilterMode::Linear, "filter is kept");
    }

    #[test]
    fn out_of_bounds_upload_is_ignored() {
        let mut texture = PixmapTexture::new();
        texture.allocate(2, 2, TextureFormat::Rgba8, FilterMode::Nearest);
        texture.sub_upload(1, 1, 2, 2, &[255; 16]);
        assert!(
            texture.data_as_u8_slice().iter().all(|&b| b == 0),
            "texture is unchanged"
        );
    }
}
