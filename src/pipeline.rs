//! The briefing pipeline: source → render → sink.

use crate::chunker::chunk_message;
use crate::config::BriefingConfig;
use briefpress_layout::{FontTable, LoadedFont};
use briefpress_render_pdf::{BriefingRenderer, RenderError, RenderedDoc, write_pdf};
use briefpress_traits::{
    BriefingSink, BriefingSource, FontError, FontProvider, FontRole, PreviewResolver,
    SharedFontData, SinkError, SourceError,
};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] SinkError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A configured renderer plus its collaborators, reusable across runs.
pub struct BriefingPipeline {
    config: BriefingConfig,
    primary_font: SharedFontData,
    symbol_font: SharedFontData,
    fonts: FontTable,
    previews: Box<dyn PreviewResolver>,
}

impl BriefingPipeline {
    /// Loads and validates both role fonts up front; a missing or unparsable
    /// font fails here, before any briefing is fetched.
    pub fn new(
        config: BriefingConfig,
        font_provider: &dyn FontProvider,
        previews: Box<dyn PreviewResolver>,
    ) -> Result<Self, PipelineError> {
        let primary_font = font_provider.load_font(FontRole::Primary)?;
        let symbol_font = font_provider.load_font(FontRole::Symbol)?;
        let fonts = FontTable::new(
            Arc::new(LoadedFont::from_data(primary_font.clone())?),
            Arc::new(LoadedFont::from_data(symbol_font.clone())?),
        );
        Ok(Self {
            config,
            primary_font,
            symbol_font,
            fonts,
            previews,
        })
    }

    pub fn config(&self) -> &BriefingConfig {
        &self.config
    }

    /// Lays out `markdown` into positioned pages without serializing them.
    pub fn render_document(&self, markdown: &str) -> Result<RenderedDoc, PipelineError> {
        let renderer =
            BriefingRenderer::new(&self.fonts, &self.config.theme, self.previews.as_ref());
        let doc = renderer.render(
            markdown,
            self.config.page_size.dimensions(),
            self.config.margins(),
            &self.config.sources_marker,
        )?;
        Ok(doc)
    }

    /// Renders `markdown` all the way to PDF bytes.
    pub fn render_pdf(&self, markdown: &str) -> Result<Vec<u8>, PipelineError> {
        let doc = self.render_document(markdown)?;
        log::debug!("laid out {} pages", doc.pages.len());
        let bytes = write_pdf(&doc, &self.config.title, &self.primary_font, &self.symbol_font)?;
        Ok(bytes)
    }

    /// One full run: fetch the briefing, render it, and post the PDF plus the
    /// chunked text summary through the sink.
    pub fn run(
        &self,
        source: &dyn BriefingSource,
        sink: &dyn BriefingSink,
    ) -> Result<(), PipelineError> {
        log::info!("fetching briefing from source '{}'", source.name());
        let markdown = source.fetch_markdown()?;

        let pdf = self.render_pdf(&markdown)?;
        let stamp = self.local_now().format("%Y%m%d");
        let filename = format!("{}_{}.pdf", self.config.filename_prefix, stamp);
        sink.post_document(&filename, &pdf)?;

        let limit = self.config.chunk_limit.min(sink.max_payload());
        for chunk in chunk_message(&markdown, limit) {
            if !chunk.trim().is_empty() {
                sink.post_text(&chunk)?;
            }
        }

        log::info!(
            "briefing delivered to '{}': {} ({} bytes)",
            sink.name(),
            filename,
            pdf.len()
        );
        Ok(())
    }

    fn local_now(&self) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(self.config.utc_offset_hours * 3600)
            .unwrap_or_else(|| Utc.fix());
        Utc::now().with_timezone(&offset)
    }
}
