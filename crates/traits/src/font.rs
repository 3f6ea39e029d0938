//! FontProvider trait for abstracting font acquisition.
//!
//! The engine draws with exactly two fonts: one covering the primary body
//! script (e.g. Hangul + Latin) and one covering emoji/pictograph glyphs.
//! Where those binaries come from (disk, an asset bundle, a download cache)
//! is the host's concern, expressed through this trait.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for font loading operations.
#[derive(Error, Debug, Clone)]
pub enum FontError {
    #[error("No font registered for role {0:?}")]
    NotFound(FontRole),

    #[error("Failed to load font '{path}': {message}")]
    LoadFailed { path: String, message: String },

    #[error("Invalid font data: {0}")]
    InvalidData(String),
}

/// The role a font plays in mixed-script rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Body script font (letters, digits, punctuation, CJK).
    Primary,
    /// Emoji / pictograph / dingbat font.
    Symbol,
}

/// Shared font binary (reference-counted bytes).
pub type SharedFontData = Arc<Vec<u8>>;

/// A source of font binaries, keyed by role.
pub trait FontProvider: Send + Sync + Debug {
    /// Load the font binary for a role.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::NotFound`] if the provider has no font for the
    /// role, or [`FontError::LoadFailed`] if the binary cannot be read.
    fn load_font(&self, role: FontRole) -> Result<SharedFontData, FontError>;

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// An in-memory font provider.
///
/// Fonts must be registered before use. Works in any environment; the usual
/// choice for tests and embedded asset bundles.
#[derive(Debug, Default)]
pub struct InMemoryFontProvider {
    fonts: RwLock<HashMap<FontRole, SharedFontData>>,
}

impl InMemoryFontProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font binary under a role, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`FontError::LoadFailed`] if the internal lock is poisoned.
    pub fn add(&self, role: FontRole, data: Vec<u8>) -> Result<(), FontError> {
        let mut fonts = self.fonts.write().map_err(|_| FontError::LoadFailed {
            path: format!("{:?}", role),
            message: "font store lock poisoned".to_string(),
        })?;
        fonts.insert(role, Arc::new(data));
        Ok(())
    }
}

impl FontProvider for InMemoryFontProvider {
    fn load_font(&self, role: FontRole) -> Result<SharedFontData, FontError> {
        let fonts = self.fonts.read().map_err(|_| FontError::LoadFailed {
            path: format!("{:?}", role),
            message: "font store lock poisoned".to_string(),
        })?;
        fonts.get(&role).cloned().ok_or(FontError::NotFound(role))
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_role_reports_not_found() {
        let provider = InMemoryFontProvider::new();
        provider.add(FontRole::Primary, vec![0, 1, 2, 3]).unwrap();

        assert!(provider.load_font(FontRole::Primary).is_ok());
        assert!(matches!(
            provider.load_font(FontRole::Symbol),
            Err(FontError::NotFound(FontRole::Symbol))
        ));
    }
}
