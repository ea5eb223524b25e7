//! LUT baking and upload errors.

use thiserror::Error;

use crate::surface::TextureHandle;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while baking, uploading or exporting a LUT.
#[derive(Debug, Error)]
pub enum LutError {
    /// Buffer or texture size does not match the LUT.
    #[error("invalid LUT size: {0}")]
    InvalidSize(String),

    /// The device surface rejected a request.
    #[error("device surface error: {0}")]
    Surface(String),

    /// Texture handle not known to the surface.
    #[error("unknown texture: {0:?}")]
    UnknownTexture(TextureHandle),

    /// Malformed `.cube` file.
    #[error("parse error: {0}")]
    Parse(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
