// Copyright 2025 the Mixwrap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning a font name into a font file.

use std::path::PathBuf;

/// Finds the file of a font given by name.
///
/// [`Font::load`](crate::Font::load) consults the resolver when the path it is
/// given does not name an existing file.
pub trait FontResolver {
    /// Returns the path of the font called `name`, if one is known.
    fn resolve(&self, name: &str) -> Option<PathBuf>;
}

#[cfg(feature = "system")]
pub use system::SystemFontResolver;

#[cfg(feature = "system")]
mod system {
    use std::path::PathBuf;
    use std::sync::Mutex;

    use fontique::{Collection, CollectionOptions, GenericFamily, SourceKind};

    use super::FontResolver;

    /// Resolves names against the fonts installed on the system.
    ///
    /// The generic names `sans-serif`, `serif` and `monospace` resolve to the
    /// system's preferred family for that class.
    pub struct SystemFontResolver {
        collection: Mutex<Collection>,
    }

    impl SystemFontResolver {
        /// Scans the system fonts.
        pub fn new() -> Self {
            Self {
                collection: Mutex::new(Collection::new(CollectionOptions {
                    shared: false,
                    system_fonts: true,
                })),
            }
        }
    }

    impl Default for SystemFontResolver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl FontResolver for SystemFontResolver {
        fn resolve(&self, name: &str) -> Option<PathBuf> {
            let Ok(mut collection) = self.collection.lock() else {
                log::error!("font collection lock is poisoned");
                return None;
            };
            let family_id = match generic_family(name) {
                Some(generic) => collection.generic_families(generic).next()?,
                None => collection.family_id(name)?,
            };
            let family = collection.family(family_id)?;
            let font = family.default_font()?;
            let path = match &font.source().kind {
                SourceKind::Path(path) => path.to_path_buf(),
                _ => return None,
            };
            log::debug!("resolved font {name:?} to {}", path.display());
            Some(path)
        }
    }

    impl core::fmt::Debug for SystemFontResolver {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.debug_struct("SystemFontResolver").finish_non_exhaustive()
        }
    }

    fn generic_family(name: &str) -> Option<GenericFamily> {
        match name {
            "sans-serif" => Some(GenericFamily::SansSerif),
            "serif" => Some(GenericFamily::Serif),
            "monospace" => Some(GenericFamily::Monospace),
            _ => None,
        }
    }
}
