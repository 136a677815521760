//! Page rendering
//!
//! Resolves a page's drop zones and draws each assigned image fitted inside
//! its zone. Problems with a single placement are reported as warnings and
//! never stop the rest of the page from rendering.

use crate::decode::decode_image;
use crate::layout::{DropZone, fit_image, resolve};
use crate::options::RenderOptions;
use crate::types::{ImagePlacement, RenderPage, Result};
use std::collections::BTreeMap;
use std::fmt;

use super::writer::DocumentWriter;

/// A placement that was skipped while rendering
#[derive(Debug, Clone, PartialEq)]
pub enum RenderWarning {
    /// The placement names a zone the page's layout does not have
    ZoneIndexOutOfRange { zone_index: usize, zone_count: usize },
    /// The image could not be decoded
    ImageDecodeFailure { zone_index: usize, reason: String },
}

impl RenderWarning {
    pub fn zone_index(&self) -> usize {
        match self {
            RenderWarning::ZoneIndexOutOfRange { zone_index, .. }
            | RenderWarning::ImageDecodeFailure { zone_index, .. } => *zone_index,
        }
    }
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderWarning::ZoneIndexOutOfRange {
                zone_index,
                zone_count,
            } => write!(
                f,
                "drop zone {} does not exist (layout has {} zones)",
                zone_index, zone_count
            ),
            RenderWarning::ImageDecodeFailure { zone_index, reason } => {
                write!(f, "image for drop zone {} could not be decoded: {}", zone_index, reason)
            }
        }
    }
}

/// Outcome of rendering one page
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageReport {
    /// Zone indices that received an image, in draw order
    pub drawn: Vec<usize>,
    /// Placements that were skipped
    pub warnings: Vec<RenderWarning>,
}

/// Render one page onto the writer's current page.
///
/// Images are drawn in ascending zone order regardless of the order of
/// `page.placements`; when several placements name the same zone the last one
/// wins.
///
/// # Errors
/// Only structural problems (an invalid page size, or a writer failure) are
/// returned as errors. Out-of-range zones and undecodable images are skipped
/// and recorded in the returned [`PageReport`].
pub fn render_page<W: DocumentWriter + ?Sized>(
    writer: &mut W,
    page: &RenderPage,
    options: &RenderOptions,
) -> Result<PageReport> {
    let zones = resolve(page.layout, page.page_size)?;
    let mut report = PageReport::default();

    if options.draw_zone_outlines {
        for zone in &zones {
            writer.draw_rect(zone.rect, options.outline_color)?;
        }
    }

    for (zone_index, placement) in placements_by_zone(&page.placements) {
        let Some(zone) = zones.get(zone_index) else {
            record(
                &mut report,
                RenderWarning::ZoneIndexOutOfRange {
                    zone_index,
                    zone_count: zones.len(),
                },
            );
            continue;
        };

        match place_image(writer, zone, placement)? {
            Ok(()) => report.drawn.push(zone_index),
            Err(warning) => record(&mut report, warning),
        }
    }

    log::debug!(
        "Rendered {} page: {} image(s), {} skipped",
        page.layout,
        report.drawn.len(),
        report.warnings.len()
    );

    Ok(report)
}

/// Keep the last placement for each zone, ordered by zone index
fn placements_by_zone(placements: &[ImagePlacement]) -> BTreeMap<usize, &ImagePlacement> {
    placements
        .iter()
        .map(|placement| (placement.drop_zone_index, placement))
        .collect()
}

/// Decode and draw a single placement.
///
/// The outer error is a writer failure and aborts the render; the inner one
/// is a recoverable problem with this placement only.
fn place_image<W: DocumentWriter + ?Sized>(
    writer: &mut W,
    zone: &DropZone,
    placement: &ImagePlacement,
) -> Result<std::result::Result<(), RenderWarning>> {
    let decode_failure = |reason: String| RenderWarning::ImageDecodeFailure {
        zone_index: zone.index,
        reason,
    };

    let image = match decode_image(&placement.image_data) {
        Ok(image) => image,
        Err(e) => return Ok(Err(decode_failure(e.to_string()))),
    };

    let size = match placement.natural_size {
        None => image.size,
        Some(size) if size.width > 0 && size.height > 0 => size,
        Some(_) => {
            return Ok(Err(decode_failure(
                "natural size has zero width or height".to_string(),
            )));
        }
    };

    writer.draw_image(&image, fit_image(&zone.rect, size))?;
    Ok(Ok(()))
}

fn record(report: &mut PageReport, warning: RenderWarning) {
    log::warn!("Skipping placement: {}", warning);
    report.warnings.push(warning);
}
