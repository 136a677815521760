//! Image decoding for placements
//!
//! Turns the payload of an [`ImagePlacement`](crate::ImagePlacement) into
//! something the document writer can embed. JPEGs with one or three
//! components pass through untouched (PDF reads them natively through
//! `DCTDecode`); everything else is decoded to RGB pixels with a separate
//! alpha channel.

use crate::types::{ImageData, ImageSize};
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use image::{GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageDecodeError {
    #[error("image data is empty")]
    Empty,
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("unrecognized image format")]
    UnknownFormat,
    #[error("image has zero width or height")]
    ZeroSize,
}

/// Pixel data in a form the PDF writer can consume directly
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImagePixels {
    /// Original JPEG bytes, embedded with `DCTDecode`
    Jpeg { data: Vec<u8>, components: u8 },
    /// Decoded 8-bit RGB pixels (`width * height * 3` bytes) and an optional
    /// 8-bit alpha channel (`width * height` bytes)
    Rgb { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

/// A decoded image ready for embedding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodedImage {
    pub size: ImageSize,
    pub pixels: ImagePixels,
}

/// Decode a placement payload.
pub fn decode_image(data: &ImageData) -> Result<DecodedImage, ImageDecodeError> {
    match data {
        ImageData::Encoded(text) => decode_image_bytes(&decode_base64(text)?),
        ImageData::Bytes(bytes) => decode_image_bytes(bytes),
    }
}

/// Remove a leading `data:image/<fmt>;base64,` header, if present.
pub fn strip_data_uri(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("data:image/") else {
        return text;
    };
    match rest.split_once(";base64,") {
        Some((format, payload)) if !format.is_empty() && format.bytes().all(is_mime_char) => {
            payload
        }
        _ => text,
    }
}

fn is_mime_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')
}

/// Base64-decode an encoded payload, accepting a data URI header and
/// missing padding.
pub fn decode_base64(text: &str) -> Result<Vec<u8>, ImageDecodeError> {
    let payload: String = strip_data_uri(text.trim())
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if payload.is_empty() {
        return Err(ImageDecodeError::Empty);
    }

    match STANDARD.decode(&payload) {
        Ok(bytes) => Ok(bytes),
        Err(err) => STANDARD_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|_| ImageDecodeError::Base64(err)),
    }
}

/// Detect the format from magic bytes and decode accordingly.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<DecodedImage, ImageDecodeError> {
    if bytes.is_empty() {
        return Err(ImageDecodeError::Empty);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    let format = reader.format().ok_or(ImageDecodeError::UnknownFormat)?;

    if format == ImageFormat::Jpeg {
        if let Some(components) = jpeg_components(bytes).filter(|c| matches!(c, 1 | 3)) {
            let (width, height) = reader.into_dimensions()?;
            let size = checked_size(width, height)?;
            return Ok(DecodedImage {
                size,
                pixels: ImagePixels::Jpeg {
                    data: bytes.to_vec(),
                    components,
                },
            });
        }
    }

    let decoded = reader.decode()?;
    let (width, height) = decoded.dimensions();
    let size = checked_size(width, height)?;

    let alpha = decoded.color().has_alpha().then(|| {
        decoded
            .to_rgba8()
            .pixels()
            .map(|p| p.0[3])
            .collect::<Vec<u8>>()
    });
    let rgb = decoded.to_rgb8().into_raw();

    Ok(DecodedImage {
        size,
        pixels: ImagePixels::Rgb { rgb, alpha },
    })
}

fn checked_size(width: u32, height: u32) -> Result<ImageSize, ImageDecodeError> {
    if width == 0 || height == 0 {
        Err(ImageDecodeError::ZeroSize)
    } else {
        Ok(ImageSize::new(width, height))
    }
}

/// Scan JPEG markers for the start-of-frame segment and read its component
/// count (1 = gray, 3 = YCbCr/RGB, 4 = CMYK).
fn jpeg_components(data: &[u8]) -> Option<u8> {
    let mut i = 2; // skip SOI
    while i + 3 < data.len() {
        if data[i] != 0xFF {
            return None;
        }
        let marker = data[i + 1];
        // Fill bytes
        if marker == 0xFF {
            i += 1;
            continue;
        }
        let is_sof = matches!(marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF);
        if is_sof {
            // FF Cx, length(2), precision(1), height(2), width(2), components(1)
            return data.get(i + 9).copied();
        }
        let length = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        i += 2 + length;
    }
    None
}
