//! Image placement within drop zones
//!
//! Images are fitted inside their zone: scaled until one axis touches the
//! zone edges, aspect ratio preserved, and centered on the other axis. They
//! are never cropped and never stretched.

use crate::types::ImageSize;

use super::Rect;

/// Calculate where an image of `image` pixels is drawn inside `zone`.
///
/// If the image is relatively wider than the zone it spans the zone's width
/// and is letterboxed top and bottom; otherwise it spans the zone's height and
/// is letterboxed left and right.
///
/// `image` must have non-zero dimensions; the decoder rejects anything else.
pub fn fit_image(zone: &Rect, image: ImageSize) -> Rect {
    let image_ratio = image.aspect_ratio();
    let zone_ratio = zone.aspect_ratio();

    if image_ratio > zone_ratio {
        let width = zone.width;
        let height = zone.width / image_ratio;
        Rect::new(zone.x, zone.y + (zone.height - height) / 2.0, width, height)
    } else {
        let height = zone.height;
        let width = zone.height * image_ratio;
        Rect::new(zone.x + (zone.width - width) / 2.0, zone.y, width, height)
    }
}
