//! Rendering of pages and books
//!
//! This module turns resolved layouts into drawing commands:
//! - The `DocumentWriter` seam and its `lopdf` implementation
//! - Rendering a single page (fit and place every image)
//! - Rendering a whole book in page order

mod book;
mod page;
mod pdf;
mod writer;

pub use book::{BookReport, render_book};
pub use page::{PageReport, RenderWarning, render_page};
pub use pdf::PdfWriter;
pub use writer::DocumentWriter;
