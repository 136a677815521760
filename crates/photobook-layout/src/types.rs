use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{
    A4_HEIGHT_PT, A4_WIDTH_PT, BAND_PADDING_FRACTION, LEFT_COLUMN_FRACTION, PAGE_MARGIN_PX,
    ZONE_GAP_PX, ZONE_OUTLINE_COLOR, px_to_pt,
};

#[derive(Error, Debug)]
pub enum PhotobookError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported layout: {0:?}")]
    UnsupportedLayout(String),
    #[error("Invalid page size: {width} x {height} pt")]
    InvalidPageSize { width: f64, height: f64 },
    #[error("Invalid page order: {0}")]
    InvalidPageOrder(String),
    #[error("Page {0} not found")]
    PageNotFound(u32),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Document has no pages")]
    NoPages,
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PhotobookError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for every photobook page)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes, in the point values PDF writers use for them
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_pt: f64, height_pt: f64 },
}

impl PaperSize {
    /// Get base dimensions in points (portrait for the standard sizes)
    pub fn dimensions_pt(self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (841.89, 1190.55),
            PaperSize::A4 => (A4_WIDTH_PT, A4_HEIGHT_PT),
            PaperSize::A5 => (419.53, 595.28),
            PaperSize::Letter => (612.0, 792.0),
            PaperSize::Legal => (612.0, 1008.0),
            PaperSize::Tabloid => (792.0, 1224.0),
            PaperSize::Custom {
                width_pt,
                height_pt,
            } => (width_pt, height_pt),
        }
    }

    /// Get the page size with orientation applied
    pub fn page_size(self, orientation: Orientation) -> PageSize {
        let (w, h) = self.dimensions_pt();
        match orientation {
            Orientation::Portrait => PageSize::new(w, h),
            Orientation::Landscape => PageSize::new(h, w),
        }
    }
}

/// Physical page dimensions in points (1/72 inch)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub width_pt: f64,
    pub height_pt: f64,
}

impl PageSize {
    /// ISO A4 portrait, 595.28 x 841.89 pt
    pub const A4: PageSize = PageSize {
        width_pt: A4_WIDTH_PT,
        height_pt: A4_HEIGHT_PT,
    };

    pub fn new(width_pt: f64, height_pt: f64) -> Self {
        Self {
            width_pt,
            height_pt,
        }
    }

    /// Check that every layout yields zones of positive size on this page.
    ///
    /// The tightest constraints are the right column of vertical-triplet
    /// (horizontally) and the padded band of vertical-tuple (vertically); both
    /// must stay wider than one zone gap. Anything else, including
    /// non-finite dimensions, is rejected with
    /// [`PhotobookError::InvalidPageSize`].
    pub fn validate(&self) -> Result<()> {
        let margin = px_to_pt(PAGE_MARGIN_PX);
        let gap = px_to_pt(ZONE_GAP_PX);
        let content_width = self.width_pt - 2.0 * margin;
        let content_height = self.height_pt - 2.0 * margin;

        let ok = self.width_pt.is_finite()
            && self.height_pt.is_finite()
            && content_width * (1.0 - LEFT_COLUMN_FRACTION) > gap
            && content_height * (1.0 - 2.0 * BAND_PADDING_FRACTION) > gap;
        if ok {
            Ok(())
        } else {
            Err(PhotobookError::InvalidPageSize {
                width: self.width_pt,
                height: self.height_pt,
            })
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// The closed set of page layouts the editor offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum LayoutKind {
    /// Two equal zones side by side on top, one wide zone below
    #[default]
    HorizontalTriplet,
    /// Two zones stacked on the left, one large zone on the right
    VerticalTriplet,
    /// Two zones stacked vertically with padding above and below
    VerticalTuple,
    /// One zone covering the whole content area (also `single-page`)
    FullPage,
}

impl LayoutKind {
    /// Every layout, in selector order
    pub fn all() -> [LayoutKind; 4] {
        [
            LayoutKind::HorizontalTriplet,
            LayoutKind::VerticalTriplet,
            LayoutKind::VerticalTuple,
            LayoutKind::FullPage,
        ]
    }

    /// Number of drop zones this layout has
    pub fn zone_count(self) -> usize {
        match self {
            LayoutKind::HorizontalTriplet | LayoutKind::VerticalTriplet => 3,
            LayoutKind::VerticalTuple => 2,
            LayoutKind::FullPage => 1,
        }
    }

    /// Wire name used by the editor and the book store
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutKind::HorizontalTriplet => "horizontal-triplet",
            LayoutKind::VerticalTriplet => "vertical-triplet",
            LayoutKind::VerticalTuple => "vertical-tuple",
            LayoutKind::FullPage => "full-page",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            LayoutKind::HorizontalTriplet => "Two images on top, one wide image below",
            LayoutKind::VerticalTriplet => "Two images on left, one large image on right",
            LayoutKind::VerticalTuple => "Two images stacked vertically",
            LayoutKind::FullPage => "One image filling the page",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = PhotobookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "horizontal-triplet" => Ok(LayoutKind::HorizontalTriplet),
            "vertical-triplet" => Ok(LayoutKind::VerticalTriplet),
            "vertical-tuple" => Ok(LayoutKind::VerticalTuple),
            "full-page" | "single-page" => Ok(LayoutKind::FullPage),
            other => Err(PhotobookError::UnsupportedLayout(other.to_string())),
        }
    }
}

impl TryFrom<String> for LayoutKind {
    type Error = PhotobookError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LayoutKind> for String {
    fn from(kind: LayoutKind) -> Self {
        kind.as_str().to_string()
    }
}

/// An RGB stroke color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Channels as fractions in 0..=1, the form PDF color operators take
    pub fn fractions(self) -> (f64, f64, f64) {
        (
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        let (r, g, b) = ZONE_OUTLINE_COLOR;
        Self::new(r, g, b)
    }
}

/// Natural pixel size of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height
    pub fn aspect_ratio(self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

/// Image payload as handed over by the upload pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum ImageData {
    /// Base64 text, optionally prefixed with `data:image/<fmt>;base64,`
    Encoded(String),
    /// Raw encoded file bytes (JPEG, PNG, ...)
    Bytes(Vec<u8>),
}

impl From<String> for ImageData {
    fn from(s: String) -> Self {
        ImageData::Encoded(s)
    }
}

impl From<&str> for ImageData {
    fn from(s: &str) -> Self {
        ImageData::Encoded(s.to_string())
    }
}

impl From<Vec<u8>> for ImageData {
    fn from(bytes: Vec<u8>) -> Self {
        ImageData::Bytes(bytes)
    }
}

/// An image assigned to one drop zone of a page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ImagePlacement {
    /// Zero-based drop zone index within the page's layout
    pub drop_zone_index: usize,
    /// The image itself
    pub image_data: ImageData,
    /// Overrides the decoded pixel size when computing the fit
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub natural_size: Option<ImageSize>,
}

impl ImagePlacement {
    pub fn new(drop_zone_index: usize, image_data: impl Into<ImageData>) -> Self {
        Self {
            drop_zone_index,
            image_data: image_data.into(),
            natural_size: None,
        }
    }

    pub fn with_natural_size(mut self, width: u32, height: u32) -> Self {
        self.natural_size = Some(ImageSize::new(width, height));
        self
    }
}

/// Immutable snapshot of one page, as consumed by the renderers
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPage {
    pub layout: LayoutKind,
    pub page_size: PageSize,
    pub placements: Vec<ImagePlacement>,
}

impl RenderPage {
    pub fn new(layout: LayoutKind, page_size: PageSize, placements: Vec<ImagePlacement>) -> Self {
        Self {
            layout,
            page_size,
            placements,
        }
    }
}
