//! Serialization of a [`RenderedDoc`] to PDF bytes via printpdf.
//!
//! Geometry arrives in top-down page coordinates; PDF user space is
//! bottom-up, so every y is flipped against the page height here and nowhere
//! else. Text is positioned per run with an explicit text matrix, matching
//! the positions the layout pass measured.

use crate::error::RenderError;
use crate::page::{DrawOp, RenderedDoc};
use briefpress_layout::ScriptClass;
use briefpress_types::{Color, Rect};
use printpdf::font::ParsedFont;
use printpdf::graphics::{LinePoint, Polygon, PolygonRing, WindingOrder};
use printpdf::text::TextItem;
use printpdf::{
    Actions, FontId, Layer, LinkAnnotation, Mm, Op, PaintMode, PdfDocument, PdfPage,
    PdfSaveOptions, Point, Pt, RawImage, Rgb, TextMatrix, XObjectTransform,
};

// Cubic bezier approximation of a quarter circle.
const CORNER_K: f32 = 0.552_284_75;

struct FontIds {
    primary: FontId,
    symbol: FontId,
}

impl FontIds {
    fn for_class(&self, class: ScriptClass) -> FontId {
        match class {
            ScriptClass::Primary => self.primary.clone(),
            ScriptClass::Symbol => self.symbol.clone(),
        }
    }
}

/// Serializes a rendered document, embedding the two role fonts.
pub fn write_pdf(
    doc: &RenderedDoc,
    title: &str,
    primary_font: &[u8],
    symbol_font: &[u8],
) -> Result<Vec<u8>, RenderError> {
    let mut pdf = PdfDocument::new(title);
    let mut warnings = Vec::new();

    let primary = ParsedFont::from_bytes(primary_font, 0, &mut warnings)
        .ok_or_else(|| RenderError::Pdf("failed to parse primary font".into()))?;
    let symbol = ParsedFont::from_bytes(symbol_font, 0, &mut warnings)
        .ok_or_else(|| RenderError::Pdf("failed to parse symbol font".into()))?;
    let fonts = FontIds {
        primary: pdf.add_font(&primary),
        symbol: pdf.add_font(&symbol),
    };

    let page_height = doc.page_size.height;
    for page in &doc.pages {
        let mut ops: Vec<Op> = Vec::new();
        let layer_name = format!("Page {} content", page.index + 1);
        let layer_id = pdf.add_layer(&Layer::new(&*layer_name));
        ops.push(Op::BeginLayer { layer_id });

        for op in &page.ops {
            match op {
                DrawOp::Text {
                    x,
                    y,
                    size,
                    color,
                    class,
                    content,
                } => {
                    let font = fonts.for_class(*class);
                    ops.push(Op::SetFillColor {
                        col: to_pdf_color(*color),
                    });
                    ops.push(Op::StartTextSection);
                    ops.push(Op::SetFontSize {
                        size: Pt(*size),
                        font: font.clone(),
                    });
                    let baseline = page_height - y - size;
                    ops.push(Op::SetTextMatrix {
                        matrix: TextMatrix::Translate(Pt(*x), Pt(baseline)),
                    });
                    ops.push(Op::WriteText {
                        items: vec![TextItem::Text(content.clone())],
                        font,
                    });
                    ops.push(Op::EndTextSection);
                }
                DrawOp::Rect {
                    rect,
                    fill,
                    corner_radius,
                } => {
                    ops.push(Op::SetFillColor {
                        col: to_pdf_color(*fill),
                    });
                    ops.push(Op::DrawPolygon {
                        polygon: rect_polygon(rect, *corner_radius, page_height),
                    });
                }
                DrawOp::Image { rect, data } => {
                    match RawImage::decode_from_bytes(data, &mut warnings) {
                        Ok(img) if img.width > 0 && img.height > 0 => {
                            let image_id = pdf.add_image(&img);
                            ops.push(Op::UseXobject {
                                id: image_id,
                                transform: XObjectTransform {
                                    translate_x: Some(Pt(rect.x)),
                                    translate_y: Some(Pt(page_height - rect.bottom())),
                                    rotate: None,
                                    scale_x: Some(rect.width / img.width as f32),
                                    scale_y: Some(rect.height / img.height as f32),
                                    // 1 px = 1 pt before scaling.
                                    dpi: Some(72.0),
                                },
                            });
                        }
                        _ => {
                            log::warn!("skipping thumbnail that printpdf could not decode");
                        }
                    }
                }
            }
        }

        for link in &page.links {
            ops.push(Op::LinkAnnotation {
                link: LinkAnnotation::new(
                    printpdf::Rect {
                        x: Pt(link.rect.x),
                        y: Pt(page_height - link.rect.bottom()),
                        width: Pt(link.rect.width),
                        height: Pt(link.rect.height),
                    },
                    Actions::Uri(link.url.clone()),
                    None,
                    None,
                    None,
                ),
            });
        }

        let width_mm: Mm = Pt(doc.page_size.width).into();
        let height_mm: Mm = Pt(page_height).into();
        pdf.pages.push(PdfPage::new(width_mm, height_mm, ops));
    }

    for warning in &warnings {
        log::debug!("printpdf: {:?}", warning);
    }
    Ok(pdf.save(&PdfSaveOptions::default(), &mut warnings))
}

fn to_pdf_color(color: Color) -> printpdf::color::Color {
    printpdf::color::Color::Rgb(Rgb::new(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        None,
    ))
}

fn line_point(x: f32, y: f32, bezier: bool) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier,
    }
}

/// Builds the fill polygon for a rectangle in PDF (bottom-up) space,
/// rounding the corners with quarter-circle beziers when a radius is set.
fn rect_polygon(rect: &Rect, corner_radius: f32, page_height: f32) -> Polygon {
    let x = rect.x;
    let y = page_height - rect.bottom();
    let w = rect.width;
    let h = rect.height;
    let r = corner_radius.min(w / 2.0).min(h / 2.0);

    let points = if r <= 0.0 {
        vec![
            line_point(x, y, false),
            line_point(x + w, y, false),
            line_point(x + w, y + h, false),
            line_point(x, y + h, false),
        ]
    } else {
        let k = CORNER_K * r;
        vec![
            // bottom edge, then around counterclockwise
            line_point(x + r, y, false),
            line_point(x + w - r, y, false),
            line_point(x + w - r + k, y, true),
            line_point(x + w, y + r - k, true),
            line_point(x + w, y + r, false),
            line_point(x + w, y + h - r, false),
            line_point(x + w, y + h - r + k, true),
            line_point(x + w - r + k, y + h, true),
            line_point(x + w - r, y + h, false),
            line_point(x + r, y + h, false),
            line_point(x + r - k, y + h, true),
            line_point(x, y + h - r + k, true),
            line_point(x, y + h - r, false),
            line_point(x, y + r, false),
            line_point(x, y + r - k, true),
            line_point(x + r - k, y, true),
            line_point(x + r, y, false),
        ]
    };

    Polygon {
        rings: vec![PolygonRing { points }],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    }
}
