//! Drop zone resolution
//!
//! Reproduces the editor's flexible-box recipe for each layout in absolute
//! points. Every layout starts from the same content area (page minus the
//! fixed margin); the per-layout branches then apply their paddings, gaps and
//! splits. All arithmetic stays in `f64` points with no rounding.

use crate::constants::{
    BAND_PADDING_FRACTION, LEFT_COLUMN_FRACTION, PAGE_MARGIN_PX, TRIPLET_TOP_ROW_FRACTION,
    ZONE_GAP_PX, px_to_pt,
};
use crate::types::{LayoutKind, PageSize, Result};

use super::{DropZone, Rect};

/// Compute the drop zones of `layout` on a page of `page_size`.
///
/// Zones are returned in index order (`zones[i].index == i`). The function is
/// pure: identical inputs always produce identical rectangles.
///
/// # Errors
/// [`PhotobookError::InvalidPageSize`](crate::PhotobookError::InvalidPageSize)
/// if the page cannot hold the fixed margin.
pub fn resolve(layout: LayoutKind, page_size: PageSize) -> Result<Vec<DropZone>> {
    page_size.validate()?;

    let content = content_area(page_size);
    let gap = px_to_pt(ZONE_GAP_PX);

    let rects = match layout {
        LayoutKind::HorizontalTriplet => horizontal_triplet(&content, gap),
        LayoutKind::VerticalTriplet => vertical_triplet(&content, gap),
        LayoutKind::VerticalTuple => vertical_tuple(&content, gap),
        LayoutKind::FullPage => vec![content],
    };
    debug_assert_eq!(rects.len(), layout.zone_count());

    Ok(rects
        .into_iter()
        .enumerate()
        .map(|(index, rect)| DropZone { index, rect })
        .collect())
}

/// The page area left after the fixed margin on all four sides
pub fn content_area(page_size: PageSize) -> Rect {
    Rect::new(0.0, 0.0, page_size.width_pt, page_size.height_pt).inset(px_to_pt(PAGE_MARGIN_PX))
}

/// 0 = top-left, 1 = top-right, 2 = bottom-wide
fn horizontal_triplet(content: &Rect, gap: f64) -> Vec<Rect> {
    let padding_top = content.height * BAND_PADDING_FRACTION;
    let top = content.y + padding_top;

    let rows_height = content.height - padding_top - gap;
    let top_row_height = rows_height * TRIPLET_TOP_ROW_FRACTION;
    let bottom_row_height = rows_height * (1.0 - TRIPLET_TOP_ROW_FRACTION);

    let top_zone_width = (content.width - gap) / 2.0;

    vec![
        Rect::new(content.x, top, top_zone_width, top_row_height),
        Rect::new(
            content.x + top_zone_width + gap,
            top,
            top_zone_width,
            top_row_height,
        ),
        Rect::new(
            content.x,
            top + top_row_height + gap,
            content.width,
            bottom_row_height,
        ),
    ]
}

/// 0 = left-top, 1 = left-bottom, 2 = right-large
fn vertical_triplet(content: &Rect, gap: f64) -> Vec<Rect> {
    let left_width = content.width * LEFT_COLUMN_FRACTION;
    let right_width = content.width - left_width - gap;
    let left_zone_height = (content.height - gap) / 2.0;

    vec![
        Rect::new(content.x, content.y, left_width, left_zone_height),
        Rect::new(
            content.x,
            content.y + left_zone_height + gap,
            left_width,
            left_zone_height,
        ),
        Rect::new(
            content.x + left_width + gap,
            content.y,
            right_width,
            content.height,
        ),
    ]
}

/// 0 = top, 1 = bottom
fn vertical_tuple(content: &Rect, gap: f64) -> Vec<Rect> {
    let padding = content.height * BAND_PADDING_FRACTION;
    let band_top = content.y + padding;
    let band_height = content.height - 2.0 * padding;
    let zone_height = (band_height - gap) / 2.0;

    vec![
        Rect::new(content.x, band_top, content.width, zone_height),
        Rect::new(
            content.x,
            band_top + zone_height + gap,
            content.width,
            zone_height,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_content_area_a4() {
        let content = content_area(PageSize::A4);
        assert_eq!(content.x, 12.0);
        assert_eq!(content.y, 12.0);
        assert!(approx(content.width, 595.28 - 24.0));
        assert!(approx(content.height, 841.89 - 24.0));
    }

    #[test]
    fn test_zone_counts_match_layout() {
        for layout in LayoutKind::all() {
            let zones = resolve(layout, PageSize::A4).unwrap();
            assert_eq!(zones.len(), layout.zone_count(), "{}", layout);
            for (i, zone) in zones.iter().enumerate() {
                assert_eq!(zone.index, i);
            }
        }
    }

    #[test]
    fn test_horizontal_triplet_rows_touch_through_gap() {
        let zones = resolve(LayoutKind::HorizontalTriplet, PageSize::A4).unwrap();
        let top = zones[0].rect;
        let bottom = zones[2].rect;
        assert!(approx(bottom.y - top.bottom(), 7.5));
        assert!(approx(zones[1].rect.x - top.right(), 7.5));
        // Bottom row ends exactly at the content area's bottom edge
        assert!(approx(bottom.bottom(), 841.89 - 12.0));
    }

    #[test]
    fn test_vertical_triplet_columns() {
        let content = content_area(PageSize::A4);
        let zones = resolve(LayoutKind::VerticalTriplet, PageSize::A4).unwrap();

        assert!(approx(zones[0].rect.width, content.width * 0.4));
        assert!(approx(zones[0].rect.width, zones[1].rect.width));
        assert!(approx(zones[0].rect.height, zones[1].rect.height));
        assert!(approx(zones[2].rect.x, content.x + content.width * 0.4 + 7.5));
        assert!(approx(zones[2].rect.right(), content.right()));
        assert!(approx(zones[2].rect.height, content.height));
        assert!(approx(zones[1].rect.bottom(), content.bottom()));
    }

    #[test]
    fn test_vertical_tuple_symmetric_padding() {
        let content = content_area(PageSize::A4);
        let zones = resolve(LayoutKind::VerticalTuple, PageSize::A4).unwrap();

        let top_padding = zones[0].rect.y - content.y;
        let bottom_padding = content.bottom() - zones[1].rect.bottom();
        assert!(approx(top_padding, content.height * 0.12));
        assert!(approx(top_padding, bottom_padding));
        assert!(approx(zones[0].rect.height, zones[1].rect.height));
    }

    #[test]
    fn test_full_page_is_content_area() {
        let zones = resolve(LayoutKind::FullPage, PageSize::A4).unwrap();
        assert_eq!(zones[0].rect, content_area(PageSize::A4));
    }

    #[test]
    fn test_rejects_degenerate_pages() {
        assert!(resolve(LayoutKind::FullPage, PageSize::new(0.0, 100.0)).is_err());
        assert!(resolve(LayoutKind::FullPage, PageSize::new(100.0, -1.0)).is_err());
        assert!(resolve(LayoutKind::FullPage, PageSize::new(f64::NAN, 100.0)).is_err());
        // Smaller than the two 12pt margins
        assert!(resolve(LayoutKind::FullPage, PageSize::new(20.0, 100.0)).is_err());
    }

    #[test]
    fn test_page_too_narrow_for_zone_gaps() {
        // Clears the margins but leaves the vertical-triplet right column
        // narrower than a gap
        for layout in LayoutKind::all() {
            assert!(resolve(layout, PageSize::new(30.0, 841.89)).is_err());
            assert!(resolve(layout, PageSize::new(841.89, 30.0)).is_err());
        }
    }

    #[test]
    fn test_smallest_valid_pages_have_positive_zones() {
        for size in [PageSize::new(37.0, 841.89), PageSize::new(595.28, 35.0)] {
            for layout in LayoutKind::all() {
                for zone in resolve(layout, size).unwrap() {
                    assert!(zone.rect.width > 0.0, "{} on {:?}", layout, size);
                    assert!(zone.rect.height > 0.0, "{} on {:?}", layout, size);
                }
            }
        }
    }
}
