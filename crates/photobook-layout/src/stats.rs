use crate::book::Book;
use crate::types::*;
use std::collections::BTreeMap;

/// Statistics about a book's contents
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookStatistics {
    /// Total number of pages
    pub pages: usize,
    /// Images sitting on a zone that exists in their page's layout
    pub placed_images: usize,
    /// Zones without an image
    pub empty_zones: usize,
    /// Images on a zone index their page's layout does not have
    pub stale_placements: usize,
    /// Number of pages using each layout
    pub layouts: BTreeMap<LayoutKind, usize>,
}

/// Calculate statistics for a book
pub fn calculate_statistics(book: &Book) -> BookStatistics {
    let mut stats = BookStatistics {
        pages: book.pages.len(),
        ..Default::default()
    };

    for page in &book.pages {
        *stats.layouts.entry(page.layout).or_insert(0) += 1;

        let zone_count = page.layout.zone_count();
        let filled = (0..zone_count)
            .filter(|&zone| page.image(zone).is_some())
            .count();
        stats.placed_images += filled;
        stats.empty_zones += zone_count - filled;
        stats.stale_placements += page.stale_placements().count();
    }

    stats
}
