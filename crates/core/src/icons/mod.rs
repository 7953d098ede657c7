//! Content-addressed favicon storage with garbage collection.

mod error;
mod store;

pub use error::IconError;
pub use store::{IconStore, IconSync, IconSyncStats, SyncedIcons};
