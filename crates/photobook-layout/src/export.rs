//! PDF export of whole books
//!
//! Ties the pieces together:
//! 1. Snapshot the book's pages in presentation order
//! 2. Render every page through the `lopdf` writer
//! 3. Hand back the bytes together with the per-page report

use crate::book::Book;
use crate::options::RenderOptions;
use crate::render::{BookReport, DocumentWriter, PdfWriter, render_book};
use crate::source::BookSource;
use crate::types::*;
use std::path::Path;

/// A rendered book
#[derive(Debug, Clone)]
pub struct ExportOutput {
    /// The PDF file contents
    pub bytes: Vec<u8>,
    /// What was drawn and what was skipped
    pub report: BookReport,
}

/// Export a book to PDF.
///
/// Rendering is CPU-bound and runs on the blocking thread pool.
pub async fn export_book(book: &Book, options: &RenderOptions) -> Result<ExportOutput> {
    options.validate()?;

    let book = book.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || export_book_sync(&book, &options)).await?
}

/// Load book `id` from `source` and export it
pub async fn export_from_source<S: BookSource>(
    source: &S,
    id: &str,
    options: &RenderOptions,
) -> Result<ExportOutput> {
    let book = source.load_book(id).await?;
    export_book(&book, options).await
}

/// Export a book to PDF on the current thread
pub fn export_book_sync(book: &Book, options: &RenderOptions) -> Result<ExportOutput> {
    options.validate()?;

    let pages = book.render_pages(options.page_size())?;
    let title = options.title.as_deref().unwrap_or(&book.title);

    let mut writer = PdfWriter::new().with_title(title);
    let report = render_book(&mut writer, &pages, options)?;
    let bytes = writer.finish()?;

    log::info!(
        "Exported \"{}\": {} page(s), {} image(s), {} warning(s), {} bytes",
        title,
        pages.len().max(1),
        report.images_drawn(),
        report.warnings().count(),
        bytes.len()
    );

    Ok(ExportOutput { bytes, report })
}

/// Write exported bytes to disk
pub async fn save_pdf(bytes: &[u8], path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
