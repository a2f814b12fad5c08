//! Error types for QR generation.

use thiserror::Error;

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a render.
///
/// Malformed styling input (colors, gradient type, numeric options, error level)
/// never produces one of these; it is normalized to a default instead.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field was missing, or the requested raster is too large.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The data does not fit in a symbol at the chosen error correction level.
    #[error("failed to encode qrcode: {0}")]
    EncodingCapacity(#[from] qrcode::types::QrError),

    /// The logo source could not be retrieved.
    #[error("failed to fetch logo: {0}")]
    Fetch(String),

    /// The logo bytes are not a recognized image.
    #[error("failed to decode logo image: {0}")]
    Decode(#[source] image::ImageError),

    /// The final raster could not be written as PNG.
    #[error("failed to encode png: {0}")]
    Encode(#[source] image::ImageError),
}
