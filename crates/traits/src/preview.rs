//! PreviewResolver trait for link-preview thumbnails.
//!
//! Sources-section bullets may carry a small preview image of the linked
//! page. Resolving one is a network concern (fetch the page, read its
//! metadata image tags, fetch the image) that has no place inside the layout
//! pass, so it sits behind this capability. The resolver is expected to apply
//! its own short timeout; any failure is equivalent to "no preview".

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for preview resolution.
#[derive(Error, Debug, Clone)]
pub enum PreviewError {
    #[error("Failed to fetch preview for '{url}': {message}")]
    Fetch { url: String, message: String },

    #[error("Invalid preview image: {0}")]
    InvalidImage(String),
}

/// Shared image bytes (reference-counted).
pub type SharedImageData = Arc<Vec<u8>>;

/// Resolves a preview image for a URL.
pub trait PreviewResolver: Send + Sync + Debug {
    /// Returns `Ok(None)` when the page offers no usable preview image.
    ///
    /// Implementations must not block longer than a few seconds; the caller
    /// treats any error the same as `Ok(None)` and renders without an image.
    fn resolve_preview_image(&self, url: &str) -> Result<Option<SharedImageData>, PreviewError>;

    /// Returns a human-readable name for this resolver (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A resolver that never returns a preview. The default for offline use.
#[derive(Debug, Default)]
pub struct NullPreviewResolver;

impl PreviewResolver for NullPreviewResolver {
    fn resolve_preview_image(&self, _url: &str) -> Result<Option<SharedImageData>, PreviewError> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "null"
    }
}

/// A resolver serving pre-registered images, for tests and fixtures.
#[derive(Debug, Default)]
pub struct InMemoryPreviewResolver {
    images: RwLock<HashMap<String, SharedImageData>>,
}

impl InMemoryPreviewResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, url: impl Into<String>, data: Vec<u8>) {
        if let Ok(mut images) = self.images.write() {
            images.insert(url.into(), Arc::new(data));
        }
    }
}

impl PreviewResolver for InMemoryPreviewResolver {
    fn resolve_preview_image(&self, url: &str) -> Result<Option<SharedImageData>, PreviewError> {
        let images = self.images.read().map_err(|_| PreviewError::Fetch {
            url: url.to_string(),
            message: "preview store lock poisoned".to_string(),
        })?;
        Ok(images.get(url).cloned())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}
