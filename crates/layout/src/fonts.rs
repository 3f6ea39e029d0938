//! Font metrics and the class→font table.
//!
//! Width measurement goes through the [`FontMetrics`] trait so layout stays
//! testable without real font binaries. The production implementation,
//! [`LoadedFont`], wraps a TTF/OTF binary and re-creates a `ttf_parser::Face`
//! view over the shared bytes on demand; parsing the header is cheap and
//! avoids a self-referential struct. Advances are cached per codepoint.
//!
//! [`FontTable`] maps each [`ScriptClass`] to its font handle. Drawing code
//! looks fonts up through the table instead of branching on the class, so
//! adding another script group never touches the drawing logic.

use crate::LayoutError;
use crate::script::{self, ScriptClass};
use briefpress_traits::{FontError, FontProvider, FontRole, SharedFontData};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};

/// Width and coverage queries against one font at arbitrary point sizes.
pub trait FontMetrics: Send + Sync + Debug {
    /// Horizontal advance of `c` at `size` points.
    fn advance(&self, c: char, size: f32) -> f32;

    /// Whether the font has a glyph for `c`.
    fn has_glyph(&self, c: char) -> bool;
}

/// A parsed font binary with cached advance widths.
pub struct LoadedFont {
    data: SharedFontData,
    units_per_em: f32,
    advances: RwLock<HashMap<char, Option<u16>>>,
}

impl Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("data_len", &self.data.len())
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

impl LoadedFont {
    /// Parses the font header and validates the binary.
    ///
    /// # Errors
    ///
    /// Returns `FontError::InvalidData` if the bytes are not a parsable font.
    pub fn from_data(data: SharedFontData) -> Result<Self, FontError> {
        let units_per_em = {
            let face = ttf_parser::Face::parse(&data, 0)
                .map_err(|e| FontError::InvalidData(e.to_string()))?;
            face.units_per_em() as f32
        };
        log::debug!(
            "parsed font: {} bytes, {} units/em",
            data.len(),
            units_per_em
        );
        Ok(Self {
            data,
            units_per_em,
            advances: RwLock::new(HashMap::new()),
        })
    }

    /// The raw font binary, as needed for PDF embedding.
    pub fn data(&self) -> SharedFontData {
        self.data.clone()
    }

    /// Creates a lightweight Face view over the font data.
    /// This is cheap (parsing header) and avoids self-referential struct issues.
    fn as_face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, 0).ok()
    }

    fn advance_units(&self, c: char) -> Option<u16> {
        if let Ok(cache) = self.advances.read()
            && let Some(units) = cache.get(&c)
        {
            return *units;
        }

        let units = self
            .as_face()
            .and_then(|face| face.glyph_index(c).and_then(|id| face.glyph_hor_advance(id)));

        if let Ok(mut cache) = self.advances.write() {
            cache.insert(c, units);
        }
        units
    }
}

impl FontMetrics for LoadedFont {
    fn advance(&self, c: char, size: f32) -> f32 {
        match self.advance_units(c) {
            Some(units) => units as f32 / self.units_per_em * size,
            // Coverage is validated before rendering starts; this path only
            // feeds width estimates for text that is never drawn.
            None => size * 0.6,
        }
    }

    fn has_glyph(&self, c: char) -> bool {
        self.advance_units(c).is_some()
    }
}

/// Fixed-advance metrics: every glyph is `em_fraction` of the point size.
///
/// Useful for tests and for headless measurement where no font binary is
/// available. Glyphs listed in `missing` report no coverage.
#[derive(Debug, Clone)]
pub struct FixedMetrics {
    em_fraction: f32,
    missing: Vec<char>,
}

impl FixedMetrics {
    pub fn new(em_fraction: f32) -> Self {
        Self {
            em_fraction,
            missing: Vec::new(),
        }
    }

    pub fn with_missing(mut self, missing: &[char]) -> Self {
        self.missing.extend_from_slice(missing);
        self
    }
}

impl FontMetrics for FixedMetrics {
    fn advance(&self, _c: char, size: f32) -> f32 {
        size * self.em_fraction
    }

    fn has_glyph(&self, c: char) -> bool {
        !self.missing.contains(&c)
    }
}

/// The class→font mapping used by all measurement and drawing.
#[derive(Debug, Clone)]
pub struct FontTable {
    fonts: [Arc<dyn FontMetrics>; ScriptClass::COUNT],
}

impl FontTable {
    pub fn new(primary: Arc<dyn FontMetrics>, symbol: Arc<dyn FontMetrics>) -> Self {
        Self {
            fonts: [primary, symbol],
        }
    }

    /// Builds the table from a [`FontProvider`], parsing both role fonts.
    pub fn from_provider(provider: &dyn FontProvider) -> Result<Self, FontError> {
        log::debug!("loading fonts from provider '{}'", provider.name());
        let primary = LoadedFont::from_data(provider.load_font(FontRole::Primary)?)?;
        let symbol = LoadedFont::from_data(provider.load_font(FontRole::Symbol)?)?;
        Ok(Self::new(Arc::new(primary), Arc::new(symbol)))
    }

    /// A table with the same fixed-advance metrics for both classes.
    pub fn fixed(em_fraction: f32) -> Self {
        let metrics = Arc::new(FixedMetrics::new(em_fraction));
        Self::new(metrics.clone(), metrics)
    }

    pub fn metrics(&self, class: ScriptClass) -> &dyn FontMetrics {
        self.fonts[class.index()].as_ref()
    }

    /// Verifies that every drawable codepoint of `text` has a glyph in the
    /// font of its class. Run once before drawing starts; a miss is a
    /// configuration error, not a per-character fallback.
    pub fn ensure_coverage(&self, text: &str) -> Result<(), LayoutError> {
        for c in text.chars() {
            if c.is_whitespace() || c.is_control() {
                continue;
            }
            let class = script::classify(c);
            if !self.metrics(class).has_glyph(c) {
                return Err(LayoutError::MissingGlyph {
                    ch: c,
                    code: c as u32,
                    class,
                });
            }
        }
        Ok(())
    }
}
