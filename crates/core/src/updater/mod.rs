//! Periodic library updater: download, resolve, publish.

mod config;
mod runner;
mod summary;
mod types;

pub use config::UpdaterConfig;
pub use runner::Updater;
pub use summary::LibrarySummary;
pub use types::{RunOutcome, RunStats, UpdaterError};
