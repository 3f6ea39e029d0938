//! The page writer: geometry, cursor, and page breaking.
//!
//! One [`PageWriter`] exists per render call. It owns the page currently
//! being written; closing a page (on break or at the end of the document)
//! freezes it into an immutable [`RenderedPage`] and appends it to the
//! output. The cursor runs top-down in points; the PDF backend flips the
//! y-axis when serializing.

use briefpress_layout::ScriptClass;
use briefpress_traits::SharedImageData;
use briefpress_types::{Color, Margins, Rect, Size};

/// One positioned draw primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A single-font text run. `y` is the top of the line box; the backend
    /// derives the baseline from the font size.
    Text {
        x: f32,
        y: f32,
        size: f32,
        color: Color,
        class: ScriptClass,
        content: String,
    },
    /// A filled rectangle, optionally with rounded corners.
    Rect {
        rect: Rect,
        fill: Color,
        corner_radius: f32,
    },
    /// An image placed into `rect` (already scaled by the renderer).
    Image { rect: Rect, data: SharedImageData },
}

impl DrawOp {
    /// The vertical extent of the primitive, for boundary assertions.
    pub fn vertical_extent(&self) -> (f32, f32) {
        match self {
            DrawOp::Text { y, size, .. } => (*y, *y + *size),
            DrawOp::Rect { rect, .. } => (rect.y, rect.bottom()),
            DrawOp::Image { rect, .. } => (rect.y, rect.bottom()),
        }
    }
}

/// A clickable rectangle mapped to a URL, independent of the visible glyphs.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRegion {
    pub rect: Rect,
    pub url: String,
}

/// A closed, immutable page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub index: usize,
    pub ops: Vec<DrawOp>,
    pub links: Vec<LinkRegion>,
}

/// The finished document: ordered pages plus the geometry they share.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDoc {
    pub page_size: Size,
    pub margins: Margins,
    pub pages: Vec<RenderedPage>,
}

// Epsilon for floating point comparisons at page boundaries.
const EPSILON: f32 = 0.01;

pub struct PageWriter {
    page_size: Size,
    margins: Margins,
    cursor_y: f32,
    page_index: usize,
    ops: Vec<DrawOp>,
    links: Vec<LinkRegion>,
    pages: Vec<RenderedPage>,
}

impl PageWriter {
    pub fn new(page_size: Size, margins: Margins) -> Self {
        Self {
            page_size,
            margins,
            cursor_y: margins.top,
            page_index: 0,
            ops: Vec::new(),
            links: Vec::new(),
            pages: Vec::new(),
        }
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Left edge of the content column.
    pub fn left(&self) -> f32 {
        self.margins.left
    }

    pub fn content_width(&self) -> f32 {
        self.page_size.width - self.margins.left - self.margins.right
    }

    /// Guarantees `height` points of room below the cursor, starting a new
    /// page if the current one cannot fit it. Called by every draw primitive
    /// for its own height, so no primitive ever straddles a page boundary.
    /// A pristine page is never broken; an oversized primitive draws there
    /// and overflows instead.
    pub fn ensure_room(&mut self, height: f32) {
        let bottom = self.page_size.height - self.margins.bottom;
        let pristine = self.ops.is_empty() && self.links.is_empty() && self.cursor_y <= self.margins.top;
        if self.cursor_y + height > bottom + EPSILON && !pristine {
            self.break_page();
        }
    }

    pub fn advance(&mut self, height: f32) {
        self.cursor_y += height;
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn push_link(&mut self, region: LinkRegion) {
        self.links.push(region);
    }

    fn break_page(&mut self) {
        log::debug!(
            "page {} closed with {} ops, {} links",
            self.page_index,
            self.ops.len(),
            self.links.len()
        );
        self.pages.push(RenderedPage {
            index: self.page_index,
            ops: std::mem::take(&mut self.ops),
            links: std::mem::take(&mut self.links),
        });
        self.page_index += 1;
        self.cursor_y = self.margins.top;
    }

    /// Closes the open page and returns the finished document.
    pub fn finish(mut self) -> RenderedDoc {
        // A trailing page is only kept if it has content, except for the
        // degenerate empty document which still yields one (empty) page.
        if !self.ops.is_empty() || !self.links.is_empty() || self.pages.is_empty() {
            self.pages.push(RenderedPage {
                index: self.page_index,
                ops: self.ops,
                links: self.links,
            });
        }
        RenderedDoc {
            page_size: self.page_size,
            margins: self.margins,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer() -> PageWriter {
        // 100 pt of content column: page height 120 with 10 pt margins.
        PageWriter::new(Size::new(200.0, 120.0), Margins::all(10.0))
    }

    fn text_op(y: f32) -> DrawOp {
        DrawOp::Text {
            x: 10.0,
            y,
            size: 10.0,
            color: Color::BLACK,
            class: ScriptClass::Primary,
            content: "x".to_string(),
        }
    }

    #[test]
    fn room_on_the_page_does_not_break() {
        let mut w = writer();
        w.ensure_room(50.0);
        assert_eq!(w.page_index(), 0);
        assert_eq!(w.cursor_y(), 10.0);
    }

    #[test]
    fn overflow_starts_a_new_page_and_resets_cursor() {
        let mut w = writer();
        w.advance(80.0);
        w.ensure_room(50.0); // 80 + 50 > 110
        assert_eq!(w.page_index(), 1);
        assert_eq!(w.cursor_y(), 10.0);
    }

    #[test]
    fn exact_fit_does_not_break() {
        let mut w = writer();
        w.advance(60.0);
        w.ensure_room(40.0); // 70 + 40 == bottom exactly
        assert_eq!(w.page_index(), 0);
    }

    #[test]
    fn finish_collects_pages_in_order() {
        let mut w = writer();
        w.push(text_op(w.cursor_y()));
        w.advance(100.0);
        w.ensure_room(15.0);
        w.push(text_op(w.cursor_y()));
        let doc = w.finish();

        assert_eq!(doc.pages.len(), 2);
        assert_eq!(doc.pages[0].index, 0);
        assert_eq!(doc.pages[1].index, 1);
        assert_eq!(doc.pages[0].ops.len(), 1);
        assert_eq!(doc.pages[1].ops.len(), 1);
    }

    #[test]
    fn empty_document_still_has_one_page() {
        let doc = writer().finish();
        assert_eq!(doc.pages.len(), 1);
        assert!(doc.pages[0].ops.is_empty());
    }

    #[test]
    fn trailing_blank_page_is_dropped() {
        let mut w = writer();
        w.push(text_op(w.cursor_y()));
        w.advance(100.0);
        w.ensure_room(50.0); // breaks; nothing drawn afterwards
        let doc = w.finish();
        assert_eq!(doc.pages.len(), 1);
    }
}
