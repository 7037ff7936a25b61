use thiserror::Error;

// Error
//------------------------------------------------------------------------------

/// Failures a pipeline call can report back to the session turn.
///
/// "No symbol found" is deliberately not here: the decoder reports it as an
/// empty result, and an event the state machine doesn't recognize is a normal
/// transition outcome, not an error. Nothing in this enum is fatal — every
/// variant is converted into a single outbound text message and the session
/// stays usable.
#[derive(Debug, Error)]
pub enum Error {
    /// The payload is longer than the largest QR symbol (or the configured
    /// packing ceiling) can hold. Truncating instead would corrupt an
    /// image payload on decode, so the request is rejected outright.
    #[error("payload of {len} characters exceeds the QR capacity of {max}")]
    PayloadTooLarge { len: usize, max: usize },

    /// The uploaded bytes could not be decoded as a raster image.
    #[error("the uploaded file is not a readable image")]
    UnsupportedImage(#[source] image::ImageError),

    /// Writing a rendered raster out as PNG failed.
    #[error("failed to encode the rendered image as PNG")]
    PngEncode(#[source] image::ImageError),

    /// The underlying QR codec rejected the payload for a reason other
    /// than capacity (invalid ECI designator and the like).
    #[error("QR encoding failed: {0}")]
    Encode(qrcode::types::QrError),
}

pub type Result<T> = std::result::Result<T, Error>;
