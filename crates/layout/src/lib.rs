//! Text classification, measurement and wrapping for the briefing renderer.
//!
//! This crate owns everything about the input text that can be decided
//! without a page: which script class each character belongs to, how a line
//! splits into same-font runs and how wide they render, where `[title](url)`
//! spans sit inside a line, what kind of block each input line is, and how a
//! paragraph wraps into display lines at a given column width.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Glyph '{ch}' (U+{code:04X}) is not covered by the {class:?} font")]
    MissingGlyph {
        ch: char,
        code: u32,
        class: script::ScriptClass,
    },
}

pub mod blocks;
pub mod fonts;
pub mod inline;
pub mod runs;
pub mod script;
pub mod style;
pub mod wrapper;

pub use blocks::{Block, classify, classify_line, strip_emphasis};
pub use fonts::{FixedMetrics, FontMetrics, FontTable, LoadedFont};
pub use inline::{InlineLink, Span, extract};
pub use runs::{InlineRun, measure_width, segment};
pub use script::ScriptClass;
pub use style::{TextStyle, Theme};
pub use wrapper::wrap;
