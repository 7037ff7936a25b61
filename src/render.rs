//! QR encoder/renderer: text payload + [`StyleConfig`] in, raster out.
//!
//! Symbol construction (version selection, Reed-Solomon, masking) is
//! delegated to the `qrcode` codec with its default behavior; this module
//! owns turning the resulting module grid into pixels — quiet zone, solid
//! fill over background, and square or rounded module shapes.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;
use qrcode::types::QrError;
use qrcode::QrCode;

use crate::error::{Error, Result};
use crate::style::{EcLevel, ModuleShape, StyleConfig};

/// Byte-mode capacity of the largest symbol (version 40) at the given error
/// correction level. Payloads past this cannot fit no matter what, so the
/// renderer reports it as the ceiling in [`Error::PayloadTooLarge`].
pub fn symbol_capacity(ec_level: EcLevel) -> usize {
    match ec_level {
        EcLevel::Q => 1663,
        EcLevel::H => 1273,
    }
}

/// Renders `payload` into a square raster, quiet-zone border included.
///
/// Fails with [`Error::PayloadTooLarge`] when the payload does not fit the
/// largest symbol at the configured error correction level.
pub fn render(payload: &str, style: &StyleConfig) -> Result<RgbImage> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), style.ec_level.to_codec())
        .map_err(|e| match e {
            QrError::DataTooLong => Error::PayloadTooLarge {
                len: payload.len(),
                max: symbol_capacity(style.ec_level),
            },
            other => Error::Encode(other),
        })?;

    let width = code.width();
    let colors = code.to_colors();
    let sz = style.module_size;
    let total = (width as u32 + 2 * style.border) * sz;
    let mut canvas = RgbImage::from_pixel(total, total, style.background.to_pixel());

    let dark = |x: i32, y: i32| -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < width
            && (y as usize) < width
            && colors[y as usize * width + x as usize] == qrcode::Color::Dark
    };

    for y in 0..width as i32 {
        for x in 0..width as i32 {
            if !dark(x, y) {
                continue;
            }
            let px = (x as u32 + style.border) * sz;
            let py = (y as u32 + style.border) * sz;
            match style.shape {
                ModuleShape::Square => {
                    draw_filled_rect_mut(
                        &mut canvas,
                        Rect::at(px as i32, py as i32).of_size(sz, sz),
                        style.fill.to_pixel(),
                    );
                }
                ModuleShape::Rounded => {
                    let exposed = [
                        !dark(x - 1, y) && !dark(x, y - 1), // top-left
                        !dark(x + 1, y) && !dark(x, y - 1), // top-right
                        !dark(x - 1, y) && !dark(x, y + 1), // bottom-left
                        !dark(x + 1, y) && !dark(x, y + 1), // bottom-right
                    ];
                    draw_rounded_module(&mut canvas, px as i32, py as i32, sz, exposed, style);
                }
            }
        }
    }

    Ok(canvas)
}

/// Renders `payload` and returns the raster as PNG bytes.
pub fn render_png(payload: &str, style: &StyleConfig) -> Result<Vec<u8>> {
    encode_png(DynamicImage::ImageRgb8(render(payload, style)?))
}

/// Writes any raster out as an in-memory PNG.
pub(crate) fn encode_png(img: DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(Error::PngEncode)?;
    Ok(buf)
}

/// Draws one dark module as a square, then rounds off every corner whose
/// two orthogonal neighbors are light. Corners shared with a neighboring
/// dark module stay square so runs render as solid bars; a module with all
/// four corners exposed ends up a disc.
fn draw_rounded_module(
    canvas: &mut RgbImage,
    px: i32,
    py: i32,
    sz: u32,
    exposed: [bool; 4],
    style: &StyleConfig,
) {
    draw_filled_rect_mut(canvas, Rect::at(px, py).of_size(sz, sz), style.fill.to_pixel());

    // Below 4px a corner has no pixels worth carving.
    if !exposed.iter().any(|&e| e) || sz < 4 {
        return;
    }

    let r = sz / 2;
    let corners = [
        (px, py),
        (px + (sz - r) as i32, py),
        (px, py + (sz - r) as i32),
        (px + (sz - r) as i32, py + (sz - r) as i32),
    ];
    for (corner, &(cx, cy)) in exposed.iter().zip(corners.iter()) {
        if *corner {
            draw_filled_rect_mut(
                canvas,
                Rect::at(cx, cy).of_size(r, r),
                style.background.to_pixel(),
            );
        }
    }

    // One disc centered on the module restores the rounded quarter in each
    // carved-out corner. The disc must stay inside the cell:
    // `draw_filled_circle_mut` paints a diameter of `2 * radius + 1`, so a
    // radius of `sz / 2` spills one pixel into the neighboring cells and
    // corrupts the light separators of small symbols.
    let center = (px + sz as i32 / 2, py + sz as i32 / 2);
    draw_filled_circle_mut(canvas, center, sz as i32 / 2 - 1, style.fill.to_pixel());
}
