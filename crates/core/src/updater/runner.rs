//! Periodic library update runs.
//!
//! One run: read settings, prepare the write index, download the library if
//! its fingerprint changed, sync favicons to disk, resolve and publish every
//! record, make the write index live, report stale settings entries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::icons::IconStore;
use crate::index::{BookDocument, IndexPublisher};
use crate::library::{for_each_book, LibrarySource};
use crate::resolver::{resolve, Resolution, Settings, SettingsUsage};

use super::config::UpdaterConfig;
use super::summary::LibrarySummary;
use super::types::{RunOutcome, RunStats, UpdaterError};

/// Drives the whole ingest pipeline on a fixed period.
pub struct Updater {
    config: UpdaterConfig,
    source: Arc<dyn LibrarySource>,
    icons: IconStore,
    publisher: IndexPublisher,

    // Runtime state
    last_etag: Mutex<Option<String>>,
    running: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
}

impl Updater {
    pub fn new(
        config: UpdaterConfig,
        source: Arc<dyn LibrarySource>,
        publisher: IndexPublisher,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let icons = IconStore::new(&config.favicons_path);

        Self {
            config,
            source,
            icons,
            publisher,
            last_etag: Mutex::new(None),
            running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
        }
    }

    /// Execute one update run.
    ///
    /// Returns [`RunOutcome::Skipped`] when the upstream fingerprint matches
    /// the previous run. The fingerprint lives in process memory only, so a
    /// restart always re-downloads once.
    pub async fn run(&self) -> Result<RunOutcome, UpdaterError> {
        let started_at = Utc::now();
        let clock = Instant::now();

        let settings = Settings::from_files(
            &self.config.overridden_books_path,
            &self.config.ignored_books_path,
        )?;

        let target = self.publisher.prepare().await?;

        for path in [&self.config.library_path, &self.config.summary_path] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(crate::library::LibraryError::from)?;
            }
        }

        let previous_etag = self.last_etag.lock().await.clone();
        let outcome = self
            .source
            .fetch(&self.config.library_path, previous_etag.as_deref())
            .await?;
        *self.last_etag.lock().await = Some(outcome.etag.clone());

        if !outcome.changed {
            debug!("library did not change since last run, update finished");
            return Ok(RunOutcome::Skipped);
        }

        let books_total =
            for_each_book::<_, UpdaterError>(&self.config.library_path, |_| Ok(()))?;
        debug!(count = books_total, "books present in library");

        let mut sync = self.icons.begin_sync()?;
        for_each_book::<_, UpdaterError>(&self.config.library_path, |book| {
            sync.add(&book.id, &book.favicon, &book.favicon_mime_type)?;
            Ok(())
        })?;
        let icons = sync.reconcile()?;

        let mut usage = SettingsUsage::default();
        let mut summary = LibrarySummary::default();
        let mut documents = Vec::new();
        let mut skipped = 0usize;
        for_each_book::<_, UpdaterError>(&self.config.library_path, |book| {
            let resolution = resolve(
                &book.name,
                &book.tags,
                book.flavour.as_deref(),
                &settings,
                &mut usage,
            );
            match resolution {
                Resolution::Resolved(resolved) => {
                    summary.add(&book.id, &resolved);
                    let tags = book.public_tags();
                    // The icon pass read the same file, so a hash is present
                    let favicon = icons.hash_for(&book.id).unwrap_or_default().to_string();
                    documents.push(BookDocument {
                        book_id: book.id,
                        project: resolved.project,
                        language: resolved.language,
                        selection: resolved.selection,
                        flavour: resolved.flavour,
                        category: resolved.category,
                        url: book.url,
                        size: book.size,
                        media_count: book.media_count,
                        article_count: book.article_count,
                        title: book.title,
                        description: book.description,
                        creator: book.creator,
                        publisher: book.publisher,
                        tags,
                        favicon,
                    });
                }
                Resolution::Skipped(reason) => {
                    skipped += 1;
                    if reason.is_legacy() {
                        debug!(id = %book.id, name = %book.name, reason = %reason, "book skipped");
                    } else {
                        warn!(id = %book.id, name = %book.name, reason = %reason, "book skipped");
                    }
                }
            }
            Ok(())
        })?;

        for document in &documents {
            self.publisher.publish_one(&target, document).await?;
        }
        let published = documents.len();
        debug!(count = published, "books published");

        summary
            .write(&self.config.summary_path)
            .map_err(|source| UpdaterError::Summary {
                path: self.config.summary_path.display().to_string(),
                source,
            })?;

        self.publisher.finish(&target).await?;

        let report = settings.unused_report(&usage);
        for name in &report.ignores {
            warn!(name, "book is set to be ignored but absent from the library");
        }
        for name in &report.overrides {
            warn!(name, "book is set to be overridden but absent from the library");
        }

        Ok(RunOutcome::Completed(RunStats {
            books_total,
            published,
            skipped,
            icons: icons.stats,
            started_at,
            duration: clock.elapsed(),
        }))
    }

    /// Start the periodic update loop (spawns a background task).
    pub fn start(self: &Arc<Self>) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Updater already running");
            return;
        }

        info!("Starting library updater");

        let updater = Arc::clone(self);
        let running = Arc::clone(&self.running);
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let period = Duration::from_secs(self.config.period_secs);

        tokio::spawn(async move {
            info!("Update loop started");
            loop {
                match updater.run().await {
                    Ok(RunOutcome::Completed(stats)) => {
                        info!(
                            books = stats.books_total,
                            published = stats.published,
                            skipped = stats.skipped,
                            icons_created = stats.icons.created,
                            icons_deleted = stats.icons.deleted,
                            duration_ms = stats.duration.as_millis() as u64,
                            "library update complete"
                        );
                    }
                    Ok(RunOutcome::Skipped) => {
                        debug!("library unchanged, nothing to update");
                    }
                    Err(e) => {
                        warn!("Update run failed: {}", e);
                    }
                }

                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Update loop received shutdown signal");
                        break;
                    }
                    _ = tokio::time::sleep(period) => {
                        if !running.load(Ordering::Relaxed) {
                            break;
                        }
                    }
                }
            }
            info!("Update loop stopped");
        });
    }

    /// Stop the update loop gracefully.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            warn!("Updater not running");
            return;
        }

        info!("Stopping library updater");
        let _ = self.shutdown_tx.send(());
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}
