//! Filesystem-backed font provider.

use briefpress_traits::{FontError, FontProvider, FontRole, SharedFontData};
use std::path::PathBuf;
use std::sync::Arc;

/// Loads the two role fonts from configured file paths.
#[derive(Debug)]
pub struct FileFontProvider {
    primary: PathBuf,
    symbol: PathBuf,
}

impl FileFontProvider {
    pub fn new(primary: impl Into<PathBuf>, symbol: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            symbol: symbol.into(),
        }
    }
}

impl FontProvider for FileFontProvider {
    fn load_font(&self, role: FontRole) -> Result<SharedFontData, FontError> {
        let path = match role {
            FontRole::Primary => &self.primary,
            FontRole::Symbol => &self.symbol,
        };
        log::debug!("loading {:?} font from {}", role, path.display());
        std::fs::read(path)
            .map(Arc::new)
            .map_err(|e| FontError::LoadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "filesystem"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_registered_paths_and_reports_missing_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not really a font").unwrap();

        let provider = FileFontProvider::new(file.path(), "/nonexistent/symbol.ttf");
        assert_eq!(
            provider.load_font(FontRole::Primary).unwrap().as_slice(),
            b"not really a font"
        );
        assert!(matches!(
            provider.load_font(FontRole::Symbol),
            Err(FontError::LoadFailed { .. })
        ));
    }
}
