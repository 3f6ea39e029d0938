//! Briefing configuration.
//!
//! Everything here deserializes with per-field defaults, so a config file
//! only names what it overrides. The defaults reproduce the stock report:
//! A4, 15 mm margins, a "Real Sources" section, 2000-byte delivery chunks,
//! and KST (UTC+9) date stamping.

use briefpress_layout::Theme;
use briefpress_types::{Margins, PageSize, mm};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BriefingConfig {
    /// Document title written into the PDF metadata.
    pub title: String,
    /// Prefix of the delivered filename; the date stamp is appended.
    pub filename_prefix: String,
    pub page_size: PageSize,
    /// Page margins, in millimeters on all four sides.
    pub margin_mm: f32,
    /// Marker text that, bold-wrapped, opens the sources section.
    pub sources_marker: String,
    /// Upper bound for one text payload posted to the sink, in bytes.
    pub chunk_limit: usize,
    /// Offset applied to UTC when stamping dates (hours).
    pub utc_offset_hours: i32,
    pub theme: Theme,
}

impl Default for BriefingConfig {
    fn default() -> Self {
        Self {
            title: "Daily Weather Briefing".to_string(),
            filename_prefix: "Daily_Briefing".to_string(),
            page_size: PageSize::A4,
            margin_mm: 15.0,
            sources_marker: "Real Sources".to_string(),
            chunk_limit: 2000,
            utc_offset_hours: 9,
            theme: Theme::default(),
        }
    }
}

impl BriefingConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Page margins in points.
    pub fn margins(&self) -> Margins {
        Margins::all(mm(self.margin_mm))
    }
}
