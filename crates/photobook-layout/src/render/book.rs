//! Book rendering
//!
//! Sequences the page renderer over an ordered list of pages. Pages are
//! written strictly in order since they all append to the same document.

use crate::constants::{EMPTY_BOOK_FONT_SIZE, EMPTY_BOOK_TEXT, EMPTY_BOOK_TEXT_POSITION};
use crate::options::RenderOptions;
use crate::types::{RenderPage, Result};

use super::page::{PageReport, RenderWarning, render_page};
use super::writer::DocumentWriter;

/// Outcome of rendering a whole book
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookReport {
    /// One report per rendered page, in output order. Empty for a book with
    /// no pages (the placeholder page has no report).
    pub pages: Vec<PageReport>,
}

impl BookReport {
    /// Total number of images drawn
    pub fn images_drawn(&self) -> usize {
        self.pages.iter().map(|p| p.drawn.len()).sum()
    }

    /// All warnings paired with the zero-based output page they occurred on
    pub fn warnings(&self) -> impl Iterator<Item = (usize, &RenderWarning)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, page)| page.warnings.iter().map(move |w| (i, w)))
    }
}

/// Render `pages` into `writer`, starting the document.
///
/// An empty page list still produces one page, carrying a short "no content"
/// notice, so the output is never an empty document.
pub fn render_book<W: DocumentWriter + ?Sized>(
    writer: &mut W,
    pages: &[RenderPage],
    options: &RenderOptions,
) -> Result<BookReport> {
    let mut report = BookReport::default();

    let Some(first) = pages.first() else {
        log::info!("Book has no pages, writing placeholder page");
        writer.begin_document(options.page_size())?;
        let (x, y) = EMPTY_BOOK_TEXT_POSITION;
        writer.draw_text(EMPTY_BOOK_TEXT, x, y, EMPTY_BOOK_FONT_SIZE)?;
        return Ok(report);
    };

    writer.begin_document(first.page_size)?;

    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            writer.add_page(page.page_size)?;
        }
        log::debug!(
            "Rendering page {} of {} ({} placement(s))",
            index + 1,
            pages.len(),
            page.placements.len()
        );
        report.pages.push(render_page(writer, page, options)?);
    }

    Ok(report)
}
