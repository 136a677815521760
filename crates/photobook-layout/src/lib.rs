pub mod book;
pub mod constants;
pub mod decode;
pub mod export;
pub mod layout;
mod options;
pub mod render;
pub mod source;
mod stats;
mod types;

pub use book::{Book, Page};
pub use decode::{DecodedImage, ImageDecodeError, decode_image};
pub use export::{ExportOutput, export_book, export_book_sync, export_from_source, save_pdf};
pub use layout::{DropZone, Rect, content_area, fit_image, resolve};
pub use options::*;
pub use render::{
    BookReport, DocumentWriter, PageReport, PdfWriter, RenderWarning, render_book, render_page,
};
pub use source::{BookSource, JsonBookStore};
pub use stats::{BookStatistics, calculate_statistics};
pub use types::*;
