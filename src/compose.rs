//! Image compositor: pastes a logo centered over a rendered QR raster.
//!
//! The compositor knows nothing about error correction. The caller must
//! have rendered the symbol at level `H` so the modules hidden under the
//! logo remain recoverable.

use image::{imageops, DynamicImage, RgbImage, RgbaImage};

use crate::error::{Error, Result};

/// The logo is bounded to the QR's shorter dimension divided by this.
/// A quarter of the edge covers about a sixteenth of the area, well
/// inside what level-H correction can absorb; a third of the edge already
/// obscures too many modules to read back reliably.
pub const LOGO_FRACTION: u32 = 4;

/// Decodes `logo_bytes`, bounds the logo to a fraction of the QR's shorter
/// dimension (aspect preserved, alpha kept), and pastes it centered over
/// the raster.
///
/// Fails with [`Error::UnsupportedImage`] when the logo bytes are not a
/// readable raster.
pub fn overlay_logo(qr: &RgbImage, logo_bytes: &[u8]) -> Result<RgbaImage> {
    let logo = image::load_from_memory(logo_bytes).map_err(Error::UnsupportedImage)?;
    let bound = qr.width().min(qr.height()) / LOGO_FRACTION;
    // Shrink oversized logos; never enlarge a small one.
    let logo = if logo.width() > bound || logo.height() > bound {
        logo.thumbnail(bound, bound).to_rgba8()
    } else {
        logo.to_rgba8()
    };

    let mut canvas = DynamicImage::ImageRgb8(qr.clone()).to_rgba8();
    let x = (canvas.width() - logo.width()) / 2;
    let y = (canvas.height() - logo.height()) / 2;
    imageops::overlay(&mut canvas, &logo, i64::from(x), i64::from(y));
    Ok(canvas)
}

/// [`overlay_logo`], returned as PNG bytes.
pub fn overlay_logo_png(qr: &RgbImage, logo_bytes: &[u8]) -> Result<Vec<u8>> {
    crate::render::encode_png(DynamicImage::ImageRgba8(overlay_logo(qr, logo_bytes)?))
}
