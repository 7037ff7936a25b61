//! Payload packer: arbitrary image bytes into a bounded text payload.
//!
//! The order matters for the capacity guarantee: downscale first, then
//! recompress losslessly, then base64. If the text still exceeds the
//! ceiling the request is rejected — a truncated base64 image would decode
//! into garbage on the receiving end, so truncation is never an option.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

use crate::error::{Error, Result};

/// Maximum length of the packed text payload, in characters.
///
/// The practical ceiling for reliably scannable image-in-QR symbols. The
/// earlier deployments wavered between 2000 and 2500; 2500 is the constant
/// the merged variant shipped with and is kept as the single authoritative
/// value.
pub const PAYLOAD_CEILING: usize = 2500;

/// Neither dimension of the packed image exceeds this, aspect preserved.
pub const THUMBNAIL_MAX: u32 = 128;

/// Packs raw image bytes into a base64 text payload no longer than
/// [`PAYLOAD_CEILING`].
///
/// Fails with [`Error::UnsupportedImage`] when the bytes are not a readable
/// raster, and with [`Error::PayloadTooLarge`] when even the downscaled,
/// recompressed form does not fit.
pub fn pack_image(bytes: &[u8]) -> Result<String> {
    let img = image::load_from_memory(bytes).map_err(Error::UnsupportedImage)?;
    // Downscale only; small images are packed as-is.
    let img = if img.width() > THUMBNAIL_MAX || img.height() > THUMBNAIL_MAX {
        img.thumbnail(THUMBNAIL_MAX, THUMBNAIL_MAX)
    } else {
        img
    };

    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img.to_rgb8())
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(Error::PngEncode)?;

    let encoded = STANDARD.encode(&buf);
    if encoded.len() > PAYLOAD_CEILING {
        tracing::warn!(len = encoded.len(), max = PAYLOAD_CEILING, "packed image over capacity");
        return Err(Error::PayloadTooLarge { len: encoded.len(), max: PAYLOAD_CEILING });
    }
    Ok(encoded)
}
