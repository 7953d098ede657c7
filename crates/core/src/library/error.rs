//! Error types for library fetching and parsing.

use thiserror::Error;

/// Errors that can occur while fetching or reading the XML library.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// HTTP transport failure talking to the library source.
    #[error("library request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the library source.
    #[error("library source returned HTTP {status}")]
    Upstream { status: u16 },

    /// The source did not provide a validator header to gate on.
    #[error("library response is missing the ETag header")]
    MissingEtag,

    /// I/O error reading or writing the local library file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed XML.
    #[error("failed to parse library XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed XML attribute.
    #[error("malformed XML attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// A `<book>` element is missing a required attribute.
    #[error("book element is missing required attribute '{name}'")]
    MissingAttribute { name: &'static str },

    /// A numeric attribute failed to parse.
    #[error("book attribute '{name}' has non-numeric value '{value}'")]
    InvalidAttribute { name: &'static str, value: String },
}
