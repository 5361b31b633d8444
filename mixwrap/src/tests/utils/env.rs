// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use mixwrap_atlas::UploadRecorder;

use super::BoxLoader;
use crate::kurbo::Point;
use crate::{Alignment, Font, FontContext, FontOptions, MultilineBlock};

/// Size the box face is designed at; metrics at this size are whole numbers.
pub(crate) const TEST_SIZE: u32 = 16;

pub(crate) struct TestEnv {
    pub(crate) font: Font<UploadRecorder>,
    pub(crate) loader: BoxLoader,
}

impl TestEnv {
    /// A box face loaded at [`TEST_SIZE`].
    pub(crate) fn new() -> Self {
        Self::with_options(FontOptions {
            size: TEST_SIZE,
            ..FontOptions::default()
        })
    }

    pub(crate) fn with_options(options: FontOptions) -> Self {
        let mut env = Self::unloaded();
        env.font
            .load("box.ttf", options)
            .expect("the box face always loads");
        env
    }

    pub(crate) fn unloaded() -> Self {
        let loader = BoxLoader::default();
        let font = Font::with_parts(
            &FontContext::without_resolver(),
            loader.clone(),
            UploadRecorder::new(),
        );
        Self { font, loader }
    }

    /// Left-aligned layout starting at the origin.
    pub(crate) fn layout(&mut self, text: &str, max_width: f64) -> MultilineBlock {
        self.font
            .parse_text(text, max_width, Point::ZERO, Alignment::Left)
    }

    /// The text of each line of a left-aligned layout.
    pub(crate) fn lines(&mut self, text: &str, max_width: f64) -> Vec<String> {
        line_texts(&self.layout(text, max_width))
    }
}

pub(crate) fn line_texts(block: &MultilineBlock) -> Vec<String> {
    block
        .lines()
        .iter()
        .map(|line| line.text().to_owned())
        .collect()
}
