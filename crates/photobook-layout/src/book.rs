//! Book and page model
//!
//! A [`Book`] is the editable record owned by the persistence layer. The
//! renderers never see it directly: [`Book::render_pages`] produces the
//! immutable, ordered snapshot they work from.

use crate::constants::{DEFAULT_BOOK_TITLE, MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS};
use crate::types::*;
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One page of a book
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Page {
    /// 1-based page number, unique within the book
    pub page_number: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub layout: LayoutKind,
    /// At most one placement per drop zone index
    #[cfg_attr(feature = "serde", serde(default))]
    pub images: Vec<ImagePlacement>,
}

impl Page {
    pub fn new(page_number: u32, layout: LayoutKind) -> Self {
        Self {
            page_number,
            layout,
            images: Vec::new(),
        }
    }

    /// Place an image, replacing whatever occupied the same zone
    pub fn set_image(&mut self, placement: ImagePlacement) {
        self.images
            .retain(|img| img.drop_zone_index != placement.drop_zone_index);
        self.images.push(placement);
    }

    /// Remove the image on `zone_index`; returns whether one was removed
    pub fn remove_image(&mut self, zone_index: usize) -> bool {
        let before = self.images.len();
        self.images.retain(|img| img.drop_zone_index != zone_index);
        self.images.len() < before
    }

    /// The image on `zone_index`, if any
    pub fn image(&self, zone_index: usize) -> Option<&ImagePlacement> {
        self.images
            .iter()
            .find(|img| img.drop_zone_index == zone_index)
    }

    /// Placements whose zone index does not exist in the current layout
    pub fn stale_placements(&self) -> impl Iterator<Item = &ImagePlacement> {
        let zone_count = self.layout.zone_count();
        self.images
            .iter()
            .filter(move |img| img.drop_zone_index >= zone_count)
    }

    /// Snapshot this page for rendering
    pub fn to_render_page(&self, page_size: PageSize) -> RenderPage {
        RenderPage::new(self.layout, page_size, self.images.clone())
    }
}

/// A photobook: titled pages plus their presentation order
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Book {
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pages: Vec<Page>,
    /// Page numbers in presentation order. Empty means stored order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub page_order: Vec<u32>,
}

impl Default for Book {
    fn default() -> Self {
        Self::new(DEFAULT_BOOK_TITLE)
    }
}

impl Book {
    /// Create an empty book. A blank title falls back to the default title.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            DEFAULT_BOOK_TITLE.to_string()
        } else {
            title.trim().to_string()
        };
        Self {
            title,
            description: String::new(),
            pages: Vec::new(),
            page_order: Vec::new(),
        }
    }

    /// Check the title and description limits the editor enforces
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().chars().count() > MAX_TITLE_CHARS {
            return Err(PhotobookError::Config(format!(
                "Title cannot be more than {} characters",
                MAX_TITLE_CHARS
            )));
        }
        if self.description.trim().chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(PhotobookError::Config(format!(
                "Description cannot be more than {} characters",
                MAX_DESCRIPTION_CHARS
            )));
        }
        Ok(())
    }

    pub fn page(&self, page_number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }

    pub fn page_mut(&mut self, page_number: u32) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.page_number == page_number)
    }

    /// Append a new empty page and return its number (one past the highest
    /// existing number).
    pub fn add_page(&mut self, layout: LayoutKind) -> u32 {
        let page_number = self
            .pages
            .iter()
            .map(|p| p.page_number)
            .max()
            .unwrap_or(0)
            + 1;
        self.pages.push(Page::new(page_number, layout));
        self.page_order.push(page_number);
        page_number
    }

    /// Remove a page and its entry in the page order
    pub fn remove_page(&mut self, page_number: u32) -> bool {
        let before = self.pages.len();
        self.pages.retain(|p| p.page_number != page_number);
        self.page_order.retain(|&n| n != page_number);
        self.pages.len() < before
    }

    /// Put an image on a page, creating the page with `layout` if it does not
    /// exist yet. An existing page keeps its own layout.
    pub fn set_image(
        &mut self,
        page_number: u32,
        layout: LayoutKind,
        image_data: impl Into<ImageData>,
        zone_index: usize,
    ) {
        if self.page(page_number).is_none() {
            self.pages.push(Page::new(page_number, layout));
            if !self.page_order.contains(&page_number) {
                self.page_order.push(page_number);
            }
        }
        if let Some(page) = self.page_mut(page_number) {
            page.set_image(ImagePlacement::new(zone_index, image_data));
        }
    }

    /// Remove the image on a page's zone; returns whether one was removed
    pub fn remove_image(&mut self, page_number: u32, zone_index: usize) -> bool {
        self.page_mut(page_number)
            .is_some_and(|page| page.remove_image(zone_index))
    }

    /// Change a page's layout.
    ///
    /// Placements on zones that exist in the new layout are kept as they are;
    /// the others are removed and returned.
    pub fn set_layout(&mut self, page_number: u32, layout: LayoutKind) -> Result<Vec<ImagePlacement>> {
        let page = self
            .page_mut(page_number)
            .ok_or(PhotobookError::PageNotFound(page_number))?;

        page.layout = layout;
        let zone_count = layout.zone_count();
        let (kept, dropped): (Vec<_>, Vec<_>) = page
            .images
            .drain(..)
            .partition(|img| img.drop_zone_index < zone_count);
        page.images = kept;

        if !dropped.is_empty() {
            log::info!(
                "Page {} switched to {}: dropped {} placement(s)",
                page_number,
                layout,
                dropped.len()
            );
        }
        Ok(dropped)
    }

    /// Replace the page order. `order` must list every page exactly once.
    pub fn set_page_order(&mut self, order: Vec<u32>) -> Result<()> {
        self.check_order(&order)?;
        self.page_order = order;
        Ok(())
    }

    /// Pages in presentation order
    pub fn ordered_pages(&self) -> Result<Vec<&Page>> {
        self.check_unique_numbers()?;
        if self.page_order.is_empty() {
            return Ok(self.pages.iter().collect());
        }

        self.check_order(&self.page_order)?;
        self.page_order
            .iter()
            .map(|&n| self.page(n).ok_or(PhotobookError::PageNotFound(n)))
            .collect()
    }

    /// Snapshot the book for rendering: one [`RenderPage`] per page in
    /// presentation order, all at `page_size`.
    pub fn render_pages(&self, page_size: PageSize) -> Result<Vec<RenderPage>> {
        Ok(self
            .ordered_pages()?
            .into_iter()
            .map(|page| page.to_render_page(page_size))
            .collect())
    }

    fn check_unique_numbers(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for page in &self.pages {
            if !seen.insert(page.page_number) {
                return Err(PhotobookError::InvalidPageOrder(format!(
                    "page number {} is used by more than one page",
                    page.page_number
                )));
            }
        }
        Ok(())
    }

    fn check_order(&self, order: &[u32]) -> Result<()> {
        let mut seen = HashSet::new();
        for &n in order {
            if self.page(n).is_none() {
                return Err(PhotobookError::InvalidPageOrder(format!(
                    "page {} does not exist",
                    n
                )));
            }
            if !seen.insert(n) {
                return Err(PhotobookError::InvalidPageOrder(format!(
                    "page {} is listed more than once",
                    n
                )));
            }
        }
        if let Some(missing) = self.pages.iter().find(|p| !seen.contains(&p.page_number)) {
            return Err(PhotobookError::InvalidPageOrder(format!(
                "page {} is missing from the order",
                missing.page_number
            )));
        }
        Ok(())
    }

    /// Load a book from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        Self::from_json(&bytes)
    }

    /// Save the book to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PhotobookError::Config(format!("Failed to serialize book: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Parse a book from JSON bytes
    #[cfg(feature = "serde")]
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let book: Self = serde_json::from_slice(bytes)
            .map_err(|e| PhotobookError::Config(format!("Failed to parse book: {}", e)))?;
        book.validate()?;
        Ok(book)
    }
}
