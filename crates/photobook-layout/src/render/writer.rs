//! The document writer seam
//!
//! The renderers only ever talk to a [`DocumentWriter`]. Coordinates passed
//! to it are in points with a top-left origin, exactly as the layout resolver
//! produces them; converting to the output format's coordinate system is the
//! writer's job.

use crate::decode::DecodedImage;
use crate::layout::Rect;
use crate::types::{Color, PageSize, Result};

/// An incremental print-document builder
pub trait DocumentWriter {
    /// Start the document with its first page.
    fn begin_document(&mut self, size: PageSize) -> Result<()>;

    /// Start a new page; subsequent drawing goes to it.
    fn add_page(&mut self, size: PageSize) -> Result<()>;

    /// Stroke the outline of `rect`.
    fn draw_rect(&mut self, rect: Rect, stroke: Color) -> Result<()>;

    /// Draw `image` scaled into `rect`.
    fn draw_image(&mut self, image: &DecodedImage, rect: Rect) -> Result<()>;

    /// Draw a single line of text whose top-left corner is at (`x`, `y`).
    fn draw_text(&mut self, text: &str, x: f64, y: f64, font_size: f64) -> Result<()>;

    /// Finish the document and return its bytes.
    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}
