//! Error types for the icon store.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while syncing icons.
///
/// All of these abort the whole run: a bad favicon payload means the
/// upstream library is broken, not just one record.
#[derive(Debug, Error)]
pub enum IconError {
    /// Favicon is not a PNG.
    #[error("unexpected favicon mime type encountered: {mime_type}")]
    UnexpectedMimeType { mime_type: String },

    /// Favicon attribute is not valid base64.
    #[error("failed to decode favicon for book {book_id}: {source}")]
    InvalidPayload {
        book_id: String,
        source: base64::DecodeError,
    },

    /// Could not create the icon directory.
    #[error("failed to create icon directory {path}: {source}")]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// I/O error reading or writing the store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
