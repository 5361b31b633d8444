// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use crate::resolve::FontResolver;

/// Settings shared by the fonts of an application.
///
/// This type is designed to be created once and handed to every [`Font`](crate::Font).
#[derive(Clone)]
pub struct FontContext {
    /// Resolution fonts are rasterized at unless their options name one.
    pub default_dpi: u32,
    /// Lookup of fonts by name, used when a load path is not a file.
    pub resolver: Option<Arc<dyn FontResolver + Send + Sync>>,
}

impl FontContext {
    /// The resolution used when nothing else is configured.
    pub const DEFAULT_DPI: u32 = 96;

    /// Create a new `FontContext`, resolving installed fonts if available.
    pub fn new() -> Self {
        #[cfg(feature = "system")]
        let resolver: Option<Arc<dyn FontResolver + Send + Sync>> =
            Some(Arc::new(crate::resolve::SystemFontResolver::new()));
        #[cfg(not(feature = "system"))]
        let resolver = None;
        Self {
            default_dpi: Self::DEFAULT_DPI,
            resolver,
        }
    }

    /// A context that only loads fonts from paths.
    pub fn without_resolver() -> Self {
        Self {
            default_dpi: Self::DEFAULT_DPI,
            resolver: None,
        }
    }
}

impl Default for FontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FontContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FontContext")
            .field("default_dpi", &self.default_dpi)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}
