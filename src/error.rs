//! Error types for Graphic Field conversion.
//!
//! Configuration values are clamped rather than rejected, so most of these
//! errors come from degenerate images or from malformed compressed data.

use crate::EncodingMode;
use thiserror::Error;

/// Main error type for conversion operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The image (or the size it would be resized to) has no pixels.
    ///
    /// Zero-sized images would otherwise lead to divisions by zero while
    /// computing the aspect ratio, or to a header describing an empty field.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Compressed row data could not be expanded.
    #[error("Malformed data at position {position}: unexpected {found:?}")]
    MalformedData { position: usize, found: Option<char> },

    /// A binary field was requested as text.
    #[error("{0:?} payload is not text")]
    NotText(EncodingMode),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
