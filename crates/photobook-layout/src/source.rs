//! Book sources
//!
//! The persistence layer hands the exporter a snapshot of a book by id.
//! [`JsonBookStore`] keeps each book as `<id>.json` in a directory.

use crate::book::Book;
use crate::types::*;
use std::future::Future;
use std::path::{Path, PathBuf};

/// Read access to stored books
pub trait BookSource {
    /// Load the current state of the book `id`.
    fn load_book(&self, id: &str) -> impl Future<Output = Result<Book>> + Send;
}

/// A directory of JSON book files
#[derive(Debug, Clone)]
pub struct JsonBookStore {
    root: PathBuf,
}

impl JsonBookStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `id`
    pub fn path_for(&self, id: &str) -> Result<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PhotobookError::Config(format!("Invalid book id: {:?}", id)));
        }
        Ok(self.root.join(format!("{}.json", id)))
    }

    /// Store `book` under `id`, replacing any previous version
    #[cfg(feature = "serde")]
    pub async fn save_book(&self, id: &str, book: &Book) -> Result<()> {
        let path = self.path_for(id)?;
        tokio::fs::create_dir_all(&self.root).await?;
        book.save(path).await
    }

    /// Ids of all stored books, sorted
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(feature = "serde")]
impl BookSource for JsonBookStore {
    fn load_book(&self, id: &str) -> impl Future<Output = Result<Book>> + Send {
        let path = self.path_for(id);
        async move { Book::load(path?).await }
    }
}
