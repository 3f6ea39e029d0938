//! Block dispatch and drawing.
//!
//! The renderer walks classified blocks strictly in order, driving the
//! wrapper, link extractor and run segmenter for layout and the
//! [`PageWriter`] for placement. All text goes through one mixed-font path:
//! runs are drawn with their class's font while an x-cursor advances by
//! measured widths, and link spans additionally register a clickable region
//! over their exact rendered extent.

use crate::error::RenderError;
use crate::page::{DrawOp, LinkRegion, PageWriter, RenderedDoc};
use briefpress_layout::{
    Block, FontTable, Span, TextStyle, Theme, classify, extract, measure_width, segment,
    strip_emphasis, wrap,
};
use briefpress_traits::PreviewResolver;
use briefpress_types::{Margins, Rect, Size};
use image::GenericImageView;

/// Prefix glyphs drawn before bulleted lines.
const BULLET_PREFIX: &str = "• ";

/// Whether the sources header has been passed yet. Bullets after it get
/// link-preview thumbnails.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SourcesState {
    BeforeSources,
    AfterSources,
}

/// Renders one briefing text into positioned pages.
pub struct BriefingRenderer<'a> {
    fonts: &'a FontTable,
    theme: &'a Theme,
    previews: &'a dyn PreviewResolver,
}

impl<'a> BriefingRenderer<'a> {
    pub fn new(fonts: &'a FontTable, theme: &'a Theme, previews: &'a dyn PreviewResolver) -> Self {
        Self {
            fonts,
            theme,
            previews,
        }
    }

    /// Renders `text` into a paginated document.
    ///
    /// Glyph coverage is validated up front: a codepoint missing from the
    /// font of its class is a configuration error, reported before anything
    /// is drawn.
    pub fn render(
        &self,
        text: &str,
        page_size: Size,
        margins: Margins,
        sources_marker: &str,
    ) -> Result<RenderedDoc, RenderError> {
        self.fonts.ensure_coverage(text)?;
        self.fonts.ensure_coverage(BULLET_PREFIX)?;

        let blocks = classify(text, sources_marker);
        log::debug!("rendering {} blocks", blocks.len());

        let mut writer = PageWriter::new(page_size, margins);
        let mut state = SourcesState::BeforeSources;

        for block in &blocks {
            match block {
                Block::Blank => writer.advance(self.theme.blank_gap),
                Block::SectionHeader { label } => {
                    self.draw_section_header(&mut writer, label);
                    state = SourcesState::AfterSources;
                }
                Block::Headline { text } => self.draw_headline(&mut writer, text),
                Block::BulletLink {
                    prefix_text,
                    link,
                    trailing_text,
                } => {
                    let with_thumbnail = state == SourcesState::AfterSources;
                    self.draw_bullet_link(&mut writer, prefix_text, link, trailing_text);
                    if with_thumbnail {
                        self.draw_thumbnail(&mut writer, &link.target_url);
                    }
                }
                Block::BulletPlain { text } => self.draw_wrapped(&mut writer, text, true),
                Block::Paragraph { text } => self.draw_wrapped(&mut writer, text, false),
            }
        }

        Ok(writer.finish())
    }

    fn draw_section_header(&self, writer: &mut PageWriter, label: &str) {
        let style = self.theme.section;
        writer.ensure_room(style.line_height);
        let x = writer.left();
        let y = writer.cursor_y();
        self.draw_spans(writer, x, y, label, style);
        writer.advance(style.line_height + self.theme.section_gap);
    }

    fn draw_headline(&self, writer: &mut PageWriter, raw: &str) {
        let label = strip_emphasis(raw);
        let label = label.trim();
        let style = self.theme.headline;
        let padding = self.theme.headline_padding;
        let box_height = style.size + 2.0 * padding;

        let column = writer.content_width() - 2.0 * padding;
        for segment_text in wrap(self.fonts, label, style.size, column) {
            writer.ensure_room(box_height + self.theme.headline_gap);
            let text_width = measure_width(self.fonts, &segment_text, style.size);
            let x = writer.left();
            let y = writer.cursor_y();
            writer.push(DrawOp::Rect {
                rect: Rect::new(x, y, text_width + 2.0 * padding, box_height),
                fill: self.theme.headline_fill,
                corner_radius: self.theme.headline_corner_radius,
            });
            self.draw_spans(writer, x + padding, y + padding, &segment_text, style);
            writer.advance(box_height + self.theme.headline_gap);
        }
    }

    fn draw_bullet_link(
        &self,
        writer: &mut PageWriter,
        prefix_text: &str,
        link: &briefpress_layout::InlineLink,
        trailing_text: &str,
    ) {
        let style = self.theme.body;
        writer.ensure_room(style.line_height);
        let y = writer.cursor_y();
        let mut x = writer.left();

        // This block type is exempt from wrapping: one visual line.
        x = self.draw_runs(writer, x, y, BULLET_PREFIX, style);
        x = self.draw_runs(writer, x, y, prefix_text, style);

        let link_start = x;
        x = self.draw_runs(writer, x, y, &link.display_text, style);
        writer.push_link(LinkRegion {
            rect: Rect::new(link_start, y, x - link_start, style.line_height),
            url: link.target_url.clone(),
        });

        self.draw_runs(writer, x, y, trailing_text, style);
        writer.advance(style.line_height);
    }

    fn draw_thumbnail(&self, writer: &mut PageWriter, url: &str) {
        let data = match self.previews.resolve_preview_image(url) {
            Ok(Some(data)) => data,
            Ok(None) => return,
            Err(e) => {
                log::warn!("preview resolution failed for {}: {}", url, e);
                return;
            }
        };

        let (px_w, px_h) = match image::load_from_memory(&data) {
            Ok(img) => img.dimensions(),
            Err(e) => {
                log::warn!("preview image for {} not decodable: {}", url, e);
                return;
            }
        };
        if px_w == 0 || px_h == 0 {
            return;
        }

        // Fit into the fixed square, preserving aspect ratio and never
        // scaling beyond the image's native size.
        let square = self.theme.thumbnail_size;
        let scale = (square / px_w as f32)
            .min(square / px_h as f32)
            .min(1.0);
        let width = px_w as f32 * scale;
        let height = px_h as f32 * scale;

        writer.ensure_room(height + self.theme.thumbnail_gap);
        let rect = Rect::new(writer.left(), writer.cursor_y(), width, height);
        writer.push(DrawOp::Image {
            rect,
            data,
        });
        writer.push_link(LinkRegion {
            rect,
            url: url.to_string(),
        });
        writer.advance(height + self.theme.thumbnail_gap);
    }

    fn draw_wrapped(&self, writer: &mut PageWriter, text: &str, bulleted: bool) {
        let style = self.theme.body;
        let indent = if bulleted {
            measure_width(self.fonts, BULLET_PREFIX, style.size)
        } else {
            0.0
        };

        let lines = wrap(self.fonts, text, style.size, writer.content_width() - indent);
        for (i, line) in lines.iter().enumerate() {
            writer.ensure_room(style.line_height);
            let y = writer.cursor_y();
            let mut x = writer.left();
            if bulleted {
                if i == 0 {
                    x = self.draw_runs(writer, x, y, BULLET_PREFIX, style);
                } else {
                    x += indent;
                }
            }
            self.draw_spans(writer, x, y, line, style);
            writer.advance(style.line_height);
        }
    }

    /// Draws a line of text that may contain link spans. Plain spans go
    /// through the mixed-font run path; each link span additionally records
    /// a clickable region spanning its rendered extent.
    fn draw_spans(&self, writer: &mut PageWriter, x: f32, y: f32, text: &str, style: TextStyle) -> f32 {
        let mut cursor_x = x;
        for span in extract(text) {
            match span {
                Span::Text(t) => {
                    cursor_x = self.draw_runs(writer, cursor_x, y, &t, style);
                }
                Span::Link(link) => {
                    let start = cursor_x;
                    cursor_x = self.draw_runs(writer, cursor_x, y, &link.display_text, style);
                    writer.push_link(LinkRegion {
                        rect: Rect::new(start, y, cursor_x - start, style.line_height),
                        url: link.target_url,
                    });
                }
            }
        }
        cursor_x
    }

    /// Draws text with per-run font fallback, advancing the x-cursor by each
    /// run's measured width.
    fn draw_runs(&self, writer: &mut PageWriter, x: f32, y: f32, text: &str, style: TextStyle) -> f32 {
        let mut cursor_x = x;
        for run in segment(self.fonts, text, style.size) {
            let width = run.width;
            writer.push(DrawOp::Text {
                x: cursor_x,
                y,
                size: style.size,
                color: style.color,
                class: run.class,
                content: run.text,
            });
            cursor_x += width;
        }
        cursor_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use briefpress_layout::ScriptClass;
    use briefpress_traits::{InMemoryPreviewResolver, NullPreviewResolver};
    use std::io::Cursor;

    const MARKER: &str = "Real Sources";

    fn render(text: &str) -> RenderedDoc {
        render_with(text, &NullPreviewResolver)
    }

    fn render_with(text: &str, previews: &dyn PreviewResolver) -> RenderedDoc {
        let fonts = FontTable::fixed(0.5);
        let theme = Theme::default();
        BriefingRenderer::new(&fonts, &theme, previews)
            .render(text, Size::new(595.0, 842.0), Margins::all(40.0), MARKER)
            .unwrap()
    }

    fn drawn_text(doc: &RenderedDoc) -> String {
        doc.pages
            .iter()
            .flat_map(|p| &p.ops)
            .filter_map(|op| match op {
                DrawOp::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    fn all_links(doc: &RenderedDoc) -> Vec<&LinkRegion> {
        doc.pages.iter().flat_map(|p| &p.links).collect()
    }

    /// A tiny valid PNG, wider than tall, for thumbnail tests.
    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(width, height));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn bullet_link_draws_title_but_never_the_url() {
        let doc = render("- [기상청](https://example.com/a)");
        let text = drawn_text(&doc);
        assert!(text.contains("기상청"));
        assert!(!text.contains("https://example.com/a"));

        let links = all_links(&doc);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://example.com/a");
        // At 0.5 em fixed metrics and 10 pt body text: "• " is 10 pt wide,
        // the three-glyph title is 15 pt.
        assert!((links[0].rect.x - 50.0).abs() < 1e-3);
        assert!((links[0].rect.width - 15.0).abs() < 1e-3);
    }

    #[test]
    fn bullet_link_advances_exactly_one_line_without_thumbnail() {
        let doc = render("- [a](http://a)\n- [b](http://b)");
        let ys: Vec<f32> = doc.pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { y, .. } => Some(*y),
                _ => None,
            })
            .collect();
        let first = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let last = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        assert!((last - first - Theme::default().body.line_height).abs() < 1e-3);
    }

    #[test]
    fn sources_header_is_accent_colored_and_mixed_font() {
        let doc = render("**📚 Real Sources:**");
        let section = Theme::default().section;
        let ops: Vec<_> = doc.pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text {
                    color,
                    class,
                    content,
                    size,
                    ..
                } => Some((*color, *class, content.clone(), *size)),
                _ => None,
            })
            .collect();

        assert!(
            ops.iter()
                .any(|(c, class, text, size)| *c == section.color
                    && *class == ScriptClass::Symbol
                    && text == "📚"
                    && *size == section.size)
        );
        assert!(
            ops.iter()
                .any(|(c, class, text, _)| *c == section.color
                    && *class == ScriptClass::Primary
                    && text == " Real Sources:")
        );
    }

    #[test]
    fn thumbnails_appear_only_after_the_sources_header() {
        let resolver = InMemoryPreviewResolver::new();
        resolver.add("http://pre", png_fixture(8, 4));
        resolver.add("http://post", png_fixture(8, 4));

        let text = "- [before](http://pre)\n**📚 Real Sources:**\n- [after](http://post)";
        let doc = render_with(text, &resolver);

        let images: Vec<_> = doc.pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Image { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        // Only the bullet after the header gets a preview.
        assert_eq!(images.len(), 1);
        // 8x4 px fits inside the 64 pt square without upscaling.
        assert!((images[0].width - 8.0).abs() < 1e-3);
        assert!((images[0].height - 4.0).abs() < 1e-3);

        // The thumbnail itself is clickable to the same URL.
        let links = all_links(&doc);
        let post_links: Vec<_> = links.iter().filter(|l| l.url == "http://post").collect();
        assert_eq!(post_links.len(), 2);
        assert!(post_links.iter().any(|l| l.rect == images[0]));
    }

    #[test]
    fn large_thumbnail_is_fitted_into_the_square() {
        let resolver = InMemoryPreviewResolver::new();
        resolver.add("http://big", png_fixture(200, 100));
        let doc = render_with("**📚 Real Sources:**\n- [big](http://big)", &resolver);

        let image_rect = doc.pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Image { rect, .. } => Some(*rect),
                _ => None,
            })
            .expect("thumbnail drawn");
        let square = Theme::default().thumbnail_size;
        assert!((image_rect.width - square).abs() < 1e-3);
        assert!((image_rect.height - square / 2.0).abs() < 1e-3);
    }

    #[test]
    fn undecodable_preview_bytes_degrade_to_no_thumbnail() {
        let resolver = InMemoryPreviewResolver::new();
        resolver.add("http://bad", vec![0xde, 0xad, 0xbe, 0xef]);
        let doc = render_with("**📚 Real Sources:**\n- [x](http://bad)", &resolver);
        assert!(
            !doc.pages[0]
                .ops
                .iter()
                .any(|op| matches!(op, DrawOp::Image { .. }))
        );
    }

    #[test]
    fn headline_is_boxed_and_stripped() {
        let doc = render("**Storm warning**");
        let theme = Theme::default();
        let text = drawn_text(&doc);
        assert!(text.contains("Storm warning"));
        assert!(!text.contains("**"));

        let rect = doc.pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Rect {
                    rect,
                    fill,
                    corner_radius,
                } if *fill == theme.headline_fill => Some((*rect, *corner_radius)),
                _ => None,
            })
            .expect("headline background drawn");
        // Box is sized to the text plus padding, not the full column.
        let expected_width = measure_width(&FontTable::fixed(0.5), "Storm warning", theme.headline.size)
            + 2.0 * theme.headline_padding;
        assert!((rect.0.width - expected_width).abs() < 1e-3);
        assert_eq!(rect.1, theme.headline_corner_radius);
    }

    #[test]
    fn paragraph_link_inside_wrapped_text_is_clickable() {
        let doc = render("see [here](http://target) for details");
        let links = all_links(&doc);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "http://target");
        assert!(!drawn_text(&doc).contains("http://target"));
    }

    #[test]
    fn long_documents_paginate_without_splitting_primitives() {
        let text = "paragraph line with several words\n".repeat(120);
        let doc = render(&text);
        assert!(doc.pages.len() > 1);

        let top = 40.0;
        let bottom = 842.0 - 40.0;
        for page in &doc.pages {
            for op in &page.ops {
                let (start, end) = op.vertical_extent();
                assert!(start >= top - 0.01, "op starts above the margin");
                assert!(end <= bottom + 0.01, "op crosses the bottom margin");
            }
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let text = "intro\n\n**Alert**\n- [a](http://a)\n**📚 Real Sources:**\n- [b](http://b)";
        assert_eq!(render(text), render(text));
    }

    #[test]
    fn missing_glyph_fails_before_any_drawing() {
        use briefpress_layout::FixedMetrics;
        use std::sync::Arc;

        let primary = Arc::new(FixedMetrics::new(0.5).with_missing(&['한']));
        let symbol = Arc::new(FixedMetrics::new(1.0));
        let fonts = FontTable::new(primary, symbol);
        let theme = Theme::default();
        let renderer = BriefingRenderer::new(&fonts, &theme, &NullPreviewResolver);

        let result = renderer.render("한국", Size::new(595.0, 842.0), Margins::all(40.0), MARKER);
        assert!(matches!(result, Err(RenderError::Layout(_))));
    }
}
