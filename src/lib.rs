//! briefpress renders markdown-flavored briefing text into a paginated PDF
//! and delivers it through a size-limited sink.
//!
//! The heart of the crate is the layout engine: block classification of the
//! loosely structured input (bold headlines, bullet links, a distinguished
//! sources section), per-glyph font fallback between a primary script font
//! and a symbol/emoji font, greedy wrapping on real glyph widths, and page
//! writing that attaches clickable hyperlink regions to exact rendered text
//! extents. Everything that touches the outside world (fonts, link previews,
//! the briefing source, the chat sink) is injected through the traits in
//! `briefpress-traits`.

pub mod chunker;
pub mod config;
pub mod fonts;
pub mod pipeline;

pub use chunker::chunk_message;
pub use config::BriefingConfig;
pub use fonts::FileFontProvider;
pub use pipeline::{BriefingPipeline, PipelineError};

// Re-export the building blocks so embedders need only this crate.
pub use briefpress_layout::{
    Block, FixedMetrics, FontTable, InlineLink, InlineRun, LayoutError, LoadedFont, ScriptClass,
    Span, TextStyle, Theme, classify, classify_line, extract, measure_width, segment,
    strip_emphasis, wrap,
};
pub use briefpress_render_pdf::{
    BriefingRenderer, DrawOp, LinkRegion, PageWriter, RenderError, RenderedDoc, RenderedPage,
    write_pdf,
};
pub use briefpress_traits::{
    BriefingSink, BriefingSource, FontError, FontProvider, FontRole, InMemoryFontProvider,
    InMemoryPreviewResolver, MemorySink, NullPreviewResolver, PreviewError, PreviewResolver,
    SinkError, SinkEvent, SourceError, StaticSource,
};
pub use briefpress_types::{Color, Margins, PageSize, Rect, Size, mm};
