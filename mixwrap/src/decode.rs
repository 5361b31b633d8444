// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Step-by-step UTF-8 decoding.
//!
//! [`Codepoints`] yields one result per step so that a malformed byte sequence
//! only costs the caller that sequence, not the rest of the text.

use core::fmt;

/// A malformed UTF-8 sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeError {
    /// Byte offset of the sequence in the input.
    pub offset: usize,
    /// Number of bytes skipped.
    pub len: usize,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid UTF-8 sequence of {} byte(s) at offset {}",
            self.len, self.offset
        )
    }
}

impl core::error::Error for DecodeError {}

/// Iterator over the scalar values of a byte string.
#[derive(Clone, Debug)]
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Codepoints<'a> {
    /// Decodes `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Byte offset of the next step.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for Codepoints<'_> {
    type Item = Result<char, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.bytes.get(self.offset..)?;
        if rest.is_empty() {
            return None;
        }
        let head = &rest[..rest.len().min(4)];
        let valid = match core::str::from_utf8(head) {
            Ok(s) => s,
            Err(err) if err.valid_up_to() > 0 => {
                // The prefix is valid by construction.
                core::str::from_utf8(&head[..err.valid_up_to()]).unwrap_or_default()
            }
            Err(err) => {
                // `None` means the input ends inside a sequence.
                let len = err.error_len().unwrap_or(head.len());
                let error = DecodeError {
                    offset: self.offset,
                    len,
                };
                self.offset += len;
                return Some(Err(error));
            }
        };
        let ch = valid.chars().next()?;
        self.offset += ch.len_utf8();
        Some(Ok(ch))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bytes.len().saturating_sub(self.offset);
        (remaining.div_ceil(4), Some(remaining))
    }
}

impl<'a> From<&'a str> for Codepoints<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}
