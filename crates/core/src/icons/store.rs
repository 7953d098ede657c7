//! Content-addressed icon directory.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use base64::Engine;
use tracing::debug;

use super::error::IconError;

/// Accepted favicon mime type. Anything else aborts the run.
const PNG_MIME_TYPE: &str = "image/png";

/// Manages a directory of content-addressed PNG icons.
///
/// Each distinct icon content is stored exactly once, named by the md5 of
/// its decoded bytes. Files are written during the record pass and orphans
/// are only deleted afterwards, so an interrupted run never removes icons
/// that are still referenced.
#[derive(Debug, Clone)]
pub struct IconStore {
    dir: PathBuf,
}

impl IconStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Start a sync pass, creating the directory if needed.
    pub fn begin_sync(&self) -> Result<IconSync, IconError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| {
            IconError::DirectoryCreationFailed {
                path: self.dir.clone(),
                source,
            }
        })?;
        Ok(IconSync {
            dir: self.dir.clone(),
            expected: HashSet::new(),
            matches: HashMap::new(),
            created: 0,
        })
    }
}

/// One write-then-reconcile pass over the catalog's icons.
#[derive(Debug)]
pub struct IconSync {
    dir: PathBuf,
    expected: HashSet<String>,
    matches: HashMap<String, String>,
    created: usize,
}

impl IconSync {
    /// Decode one book's favicon and write it if not already stored.
    ///
    /// Existing files are never rewritten; identical icons shared by many
    /// books collapse to a single file.
    pub fn add(
        &mut self,
        book_id: &str,
        favicon_b64: &str,
        mime_type: &str,
    ) -> Result<(), IconError> {
        if mime_type != PNG_MIME_TYPE {
            return Err(IconError::UnexpectedMimeType {
                mime_type: mime_type.to_string(),
            });
        }

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(favicon_b64)
            .map_err(|source| IconError::InvalidPayload {
                book_id: book_id.to_string(),
                source,
            })?;

        let hash = format!("{:x}", md5::compute(&bytes));
        let file_name = format!("{hash}.png");
        let path = self.dir.join(&file_name);

        self.matches.insert(book_id.to_string(), hash);
        if self.expected.insert(file_name) && !path.exists() {
            std::fs::write(&path, &bytes)?;
            self.created += 1;
        }
        Ok(())
    }

    /// Delete on-disk icons no longer referenced by any record and report
    /// counters.
    pub fn reconcile(self) -> Result<SyncedIcons, IconError> {
        let mut total_on_disk = 0;
        let mut deleted = 0;

        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if !name.ends_with(".png") {
                continue;
            }
            total_on_disk += 1;
            if !self.expected.contains(name) {
                std::fs::remove_file(entry.path())?;
                deleted += 1;
            }
        }

        let stats = IconSyncStats {
            created: self.created,
            deleted,
            total_in_memory: self.expected.len(),
            total_on_disk,
        };
        debug!(
            created = stats.created,
            deleted = stats.deleted,
            in_memory = stats.total_in_memory,
            on_disk = stats.total_on_disk,
            "icon sync complete"
        );

        Ok(SyncedIcons {
            stats,
            matches: self.matches,
        })
    }
}

/// Counters from one icon sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IconSyncStats {
    pub created: usize,
    pub deleted: usize,
    pub total_in_memory: usize,
    pub total_on_disk: usize,
}

/// Result of a completed sync: stats plus the book-id to icon-hash mapping
/// needed when publishing documents.
#[derive(Debug)]
pub struct SyncedIcons {
    pub stats: IconSyncStats,
    matches: HashMap<String, String>,
}

impl SyncedIcons {
    pub fn hash_for(&self, book_id: &str) -> Option<&str> {
        self.matches.get(book_id).map(String::as_str)
    }
}
