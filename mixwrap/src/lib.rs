// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mixwrap lays out paragraphs of mixed Latin and CJK text into lines of a given width.
//!
//! Latin-like text wraps at word boundaries and long words are hyphenated.
//! Ideographic text wraps between any two characters, except that closing
//! punctuation is kept with the character before it. Every glyph is rasterized
//! once into a shared texture atlas (see [`mixwrap_atlas`]) so the laid-out text
//! can be drawn as textured quads.
//!
//! ```no_run
//! use mixwrap::{Alignment, Font, FontContext, FontOptions};
//! use mixwrap::kurbo::Point;
//!
//! let cx = FontContext::new();
//! let mut font = Font::new(&cx);
//! font.load("sans-serif", FontOptions { size: 18, ..FontOptions::default() })?;
//! let block = font.parse_text("Hello 世界", 120.0, Point::new(10.0, 10.0), Alignment::Left);
//! for line in block.lines() {
//!     println!("{}", line.text());
//! }
//! # Ok::<(), mixwrap::FontError>(())
//! ```
//!
//! ## Features
//!
//! - `swash`: Provides [`SwashLoader`] and [`Font::new`], backed by swash and skrifa.
//! - `system` (enabled by default): Resolves family names such as `sans-serif` to
//!   installed font files using fontique. Implies `swash`.

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

pub use mixwrap_atlas;
pub use mixwrap_atlas::kurbo;

pub mod decode;
pub mod draw;
pub mod font;
pub mod layout;
pub mod resolve;
pub mod script;

mod context;
mod measure;

#[cfg(test)]
mod tests;

pub use context::FontContext;
pub use decode::{Codepoints, DecodeError};
pub use draw::GlyphQuad;
pub use font::{FaceLoader, Font, FontError, FontOptions};
#[cfg(feature = "swash")]
pub use font::SwashLoader;
pub use layout::{Alignment, Line, MultilineBlock, StringBounds};
pub use resolve::FontResolver;
#[cfg(feature = "system")]
pub use resolve::SystemFontResolver;
