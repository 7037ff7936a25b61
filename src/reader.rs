//! QR decoder: raw image bytes in, zero or more decoded payloads out.
//!
//! This boundary never fails. Bytes that are not a readable raster and
//! rasters without a detectable symbol collapse into the same observable
//! outcome — an empty result — and any internal detector fault on one
//! candidate symbol simply drops that candidate.

/// Decodes every QR payload found in `bytes`.
///
/// Results are returned in detection order, duplicates included. An
/// unreadable image yields an empty vector, not an error.
pub fn decode(bytes: &[u8]) -> Vec<String> {
    let Ok(img) = image::load_from_memory(bytes) else {
        tracing::debug!("decode input is not a readable raster");
        return Vec::new();
    };

    let mut prepared = rqrr::PreparedImage::prepare(img.to_luma8());
    let grids = prepared.detect_grids();
    tracing::debug!(candidates = grids.len(), "detected QR candidates");

    grids
        .iter()
        .filter_map(|grid| grid.decode().ok())
        .map(|(_meta, content)| content)
        .filter(|content| !content.is_empty())
        .collect()
}
