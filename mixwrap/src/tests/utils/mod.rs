// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod env;
mod rasterizer;

pub(crate) use env::{line_texts, TestEnv, TEST_SIZE};
pub(crate) use rasterizer::BoxLoader;
