// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A face made of solid boxes, so expected layouts can be computed by hand.
//!
//! At 16px every lowercase letter advances 10px and `x` is 10px tall. Letters
//! with ascenders, capitals and digits reach 14px, descenders hang 4px below
//! the baseline. Everything outside the Latin range is a 20px square-ish box.
//! Other sizes scale these numbers linearly.

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use mixwrap_atlas::{PixelMode, RasterError, RasterizedGlyph, Rasterizer, RenderMode};

use crate::kurbo::{BezPath, Rect, Shape};
use crate::{script, FaceLoader, FontError};

/// Glyph proportions at the 16px design size.
struct BoxShape {
    advance: i32,
    width: u32,
    top: i32,
    rows: u32,
}

const DESIGN_SIZE: u32 = 16;
const BEARING: i32 = 1;

fn box_shape(ch: char) -> BoxShape {
    let (advance, width, top, rows) = match ch {
        ' ' | script::NO_BREAK_SPACE => (5, 0, 0, 0),
        '-' => (6, 4, 6, 2),
        '.' | ',' => (4, 2, 2, 2),
        '!' | '?' => (4, 2, 14, 14),
        '\u{2019}' => (4, 2, 14, 4),
        'b' | 'd' | 'f' | 'h' | 'k' | 'l' | 't' | 'A'..='Z' | '0'..='9' => (10, 8, 14, 14),
        'g' | 'j' | 'p' | 'q' | 'y' => (10, 8, 10, 14),
        _ if script::is_latin(ch) => (10, 8, 10, 10),
        _ => (20, 18, 18, 20),
    };
    BoxShape {
        advance,
        width,
        top,
        rows,
    }
}

/// Renders every glyph as a fully covered box.
#[derive(Clone, Debug, Default)]
pub(crate) struct BoxRasterizer {
    size: u32,
    pixel_size: Rc<Cell<Option<(u32, u32)>>>,
}

impl BoxRasterizer {
    fn scale_i(&self, value: i32) -> i32 {
        value * self.size as i32 / DESIGN_SIZE as i32
    }

    fn scale_u(&self, value: u32) -> u32 {
        value * self.size / DESIGN_SIZE
    }
}

impl Rasterizer for BoxRasterizer {
    fn set_pixel_size(&mut self, size: u32, dpi: u32) {
        self.size = size;
        self.pixel_size.set(Some((size, dpi)));
    }

    fn render_glyph(
        &mut self,
        codepoint: char,
        _mode: RenderMode,
    ) -> Result<RasterizedGlyph, RasterError> {
        let shape = box_shape(codepoint);
        let width = self.scale_u(shape.width);
        let rows = self.scale_u(shape.rows);
        if width == 0 || rows == 0 {
            return Ok(RasterizedGlyph::empty(self.scale_i(shape.advance)));
        }
        Ok(RasterizedGlyph {
            width,
            rows,
            pitch: width as usize,
            pixel_mode: PixelMode::Gray,
            buffer: vec![255; (width * rows) as usize],
            advance: self.scale_i(shape.advance),
            bitmap_top: self.scale_i(shape.top),
            bitmap_left: self.scale_i(BEARING),
        })
    }

    fn outline(&mut self, codepoint: char) -> Option<BezPath> {
        let shape = box_shape(codepoint);
        if shape.width == 0 {
            return None;
        }
        let x0 = f64::from(self.scale_i(BEARING));
        let y0 = -f64::from(self.scale_i(shape.top));
        Some(
            Rect::new(
                x0,
                y0,
                x0 + f64::from(self.scale_u(shape.width)),
                y0 + f64::from(self.scale_u(shape.rows)),
            )
            .to_path(0.1),
        )
    }
}

/// Hands out [`BoxRasterizer`]s for any path except `missing.ttf`.
#[derive(Clone, Debug, Default)]
pub(crate) struct BoxLoader {
    /// The last size and resolution a loaded face was set to.
    pub(crate) pixel_size: Rc<Cell<Option<(u32, u32)>>>,
    /// Number of faces handed out.
    pub(crate) loads: Rc<Cell<usize>>,
}

impl FaceLoader for BoxLoader {
    fn load_face(&mut self, path: &Path) -> Result<Box<dyn Rasterizer>, FontError> {
        if path == Path::new("missing.ttf") {
            return Err(FontError::NotFound(path.to_path_buf()));
        }
        self.loads.set(self.loads.get() + 1);
        Ok(Box::new(BoxRasterizer {
            size: 0,
            pixel_size: self.pixel_size.clone(),
        }))
    }
}
