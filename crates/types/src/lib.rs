//! Shared primitive types for the briefpress pipeline.

pub mod color;
pub mod geometry;

pub use color::Color;
pub use geometry::{Margins, PageSize, Rect, Size, mm};
