//! Shared constants for photobook layout and export
//!
//! The pixel values below come from the editor's styling rules. The print
//! renderer has no layout engine, so they are reproduced here as fixed
//! numbers and converted to points with [`px_to_pt`]. Any change to the
//! editor's recipe needs a matching change here.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per CSS pixel (72 points per inch, 96 pixels per inch)
pub const POINTS_PER_PX: f64 = 72.0 / 96.0;

/// Convert CSS pixels to points
#[inline]
pub fn px_to_pt(px: f64) -> f64 {
    px * POINTS_PER_PX
}

/// Convert points to CSS pixels
#[inline]
pub fn pt_to_px(pt: f64) -> f64 {
    pt / POINTS_PER_PX
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// ISO A4 portrait width in points
pub const A4_WIDTH_PT: f64 = 595.28;

/// ISO A4 portrait height in points
pub const A4_HEIGHT_PT: f64 = 841.89;

// =============================================================================
// Editor Layout Recipe
// =============================================================================

/// Page padding on all four sides (pixels)
pub const PAGE_MARGIN_PX: f64 = 16.0;

/// Gap between neighbouring drop zones (pixels)
pub const ZONE_GAP_PX: f64 = 10.0;

/// Top padding of horizontal-triplet, and top/bottom padding of
/// vertical-tuple, as a fraction of the content height
pub const BAND_PADDING_FRACTION: f64 = 0.12;

/// Share of the content height given to the top row of horizontal-triplet
/// (after subtracting the row gap)
pub const TRIPLET_TOP_ROW_FRACTION: f64 = 0.5;

/// Width of the left column of vertical-triplet as a fraction of the
/// content width
pub const LEFT_COLUMN_FRACTION: f64 = 0.4;

// =============================================================================
// Diagnostics and Placeholders
// =============================================================================

/// Line width for zone outlines (points)
pub const ZONE_OUTLINE_WIDTH: f64 = 0.5;

/// Default zone outline color (#cccccc)
pub const ZONE_OUTLINE_COLOR: (u8, u8, u8) = (0xcc, 0xcc, 0xcc);

/// Text written on the single page of an empty book
pub const EMPTY_BOOK_TEXT: &str = "No images uploaded yet";

/// Position of the empty-book text from the top-left corner (points)
pub const EMPTY_BOOK_TEXT_POSITION: (f64, f64) = (50.0, 50.0);

/// Font size of the empty-book text (points)
pub const EMPTY_BOOK_FONT_SIZE: f64 = 12.0;

/// Title used when a book is created without one
pub const DEFAULT_BOOK_TITLE: &str = "Untitled Photobook";

/// Longest accepted book title (characters, after trimming)
pub const MAX_TITLE_CHARS: usize = 100;

/// Longest accepted book description (characters, after trimming)
pub const MAX_DESCRIPTION_CHARS: usize = 500;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_to_pt() {
        assert_eq!(px_to_pt(96.0), 72.0);
        assert_eq!(px_to_pt(48.0), 36.0);
        assert_eq!(px_to_pt(0.0), 0.0);
        assert_eq!(px_to_pt(PAGE_MARGIN_PX), 12.0);
        assert_eq!(px_to_pt(ZONE_GAP_PX), 7.5);
    }

    #[test]
    fn test_pt_to_px_inverts() {
        assert_eq!(pt_to_px(72.0), 96.0);
        assert_eq!(pt_to_px(px_to_pt(10.0)), 10.0);
    }
}
