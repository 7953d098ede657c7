//! Remote XML library: conditional fetching and streaming parsing.

mod error;
mod fetcher;
mod reader;
mod traits;
mod types;

pub use error::LibraryError;
pub use fetcher::HttpLibrarySource;
pub use reader::for_each_book;
pub use traits::LibrarySource;
pub use types::{BookRecord, FetchOutcome};
