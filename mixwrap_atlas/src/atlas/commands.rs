// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred texture commands.
//!
//! Glyphs are often rasterized while no graphics context is current. An
//! [`UploadRecorder`] stands in for the texture during that time and the
//! application replays the recorded commands into the real texture later.

use alloc::vec::Vec;

use super::upload::{FilterMode, TextureFormat, TextureUploader};

/// A single texture command recorded for deferred replay.
///
/// The variants correspond 1:1 to the methods on [`TextureUploader`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadCommand {
    /// Create the texture.
    Allocate {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Pixel format.
        format: TextureFormat,
        /// Sampling filter.
        filter: FilterMode,
    },
    /// Copy a block of RGBA pixels into the texture.
    SubUpload {
        /// Destination x.
        x: u32,
        /// Destination y.
        y: u32,
        /// Block width.
        width: u32,
        /// Block height.
        height: u32,
        /// Tightly packed RGBA pixels.
        rgba: Vec<u8>,
    },
    /// Bind the texture.
    Bind,
    /// Unbind the texture.
    Unbind,
}

/// Records texture commands instead of executing them.
#[derive(Clone, Default)]
pub struct UploadRecorder {
    /// The recorded commands.
    pub commands: Vec<UploadCommand>,
}

impl UploadRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all recorded commands, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<UploadCommand> {
        core::mem::take(&mut self.commands)
    }

    /// Executes and drains the recorded commands against `target`.
    pub fn replay<T: TextureUploader + ?Sized>(&mut self, target: &mut T) {
        for command in self.take_commands() {
            match command {
                UploadCommand::Allocate {
                    width,
                    height,
                    format,
                    filter,
                } => target.allocate(width, height, format, filter),
                UploadCommand::SubUpload {
                    x,
                    y,
                    width,
                    height,
                    rgba,
                } => target.sub_upload(x, y, width, height, &rgba),
                UploadCommand::Bind => target.bind(),
                UploadCommand::Unbind => target.unbind(),
            }
        }
    }
}

impl TextureUploader for UploadRecorder {
    fn allocate(&mut self, width: u32, height: u32, format: TextureFormat, filter: FilterMode) {
        self.commands.push(UploadCommand::Allocate {
            width,
            height,
            format,
            filter,
        });
    }

    fn sub_upload(&mut self, x: u32, y: u32, width: u32, height: u32, rgba: &[u8]) {
        self.commands.push(UploadCommand::SubUpload {
            x,
            y,
            width,
            height,
            rgba: rgba.to_vec(),
        });
    }

    fn bind(&mut self) {
        self.commands.push(UploadCommand::Bind);
    }

    fn unbind(&mut self) {
        self.commands.push(UploadCommand::Unbind);
    }
}

impl core::fmt::Debug for UploadRecorder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UploadRecorder")
            .field("commands", &self.commands.len())
            .finish()
    }
}
