//! Capability traits for the briefpress engine.
//!
//! The rendering core never performs I/O of its own. Everything that touches
//! the outside world (font binaries, link-preview images, the briefing text
//! itself, the chat platform the result is posted to) comes in through one of
//! the traits in this crate, so the engine stays deterministic and testable
//! with the in-memory implementations provided alongside each trait.

pub mod delivery;
pub mod font;
pub mod preview;

pub use delivery::{
    BriefingSink, BriefingSource, MemorySink, SinkError, SinkEvent, SourceError, StaticSource,
};
pub use font::{FontError, FontProvider, FontRole, InMemoryFontProvider, SharedFontData};
pub use preview::{
    InMemoryPreviewResolver, NullPreviewResolver, PreviewError, PreviewResolver, SharedImageData,
};
