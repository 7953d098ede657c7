//! Updater error and run-report types.

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::icons::{IconError, IconSyncStats};
use crate::index::IndexError;
use crate::library::LibraryError;
use crate::resolver::SettingsError;

/// Errors surfaced by an update run.
#[derive(Debug, Error)]
pub enum UpdaterError {
    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error(transparent)]
    Icon(#[from] IconError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("failed to write library summary {path}: {source}")]
    Summary {
        path: String,
        source: std::io::Error,
    },
}

/// What an update run did.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The library fingerprint matched the previous run, nothing was rebuilt.
    Skipped,
    /// A full rebuild was published.
    Completed(RunStats),
}

/// Counters from one completed run.
#[derive(Debug, Clone)]
pub struct RunStats {
    /// Records present in the downloaded library.
    pub books_total: usize,
    /// Documents published to the search index.
    pub published: usize,
    /// Records left out, whatever the reason.
    pub skipped: usize,
    pub icons: IconSyncStats,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}
