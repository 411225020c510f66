//! Batch orchestration: worker pool, progress reporting, ordered output.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::join_all;
use tracing::debug;

use crate::model::{BatchEntry, FileDescriptor, Thumbnail};
use crate::options::ThumbnailOptions;
use crate::pipeline::Thumbnailer;

/// Progress callback: `(completed, total)` after each finished item.
pub type ProgressFn = dyn Fn(usize, usize) + Send + Sync;

/// Error callback: invoked with the item's resolved identifier when its
/// thumbnail came back as an error.
pub type ErrorFn = dyn Fn(&str) + Send + Sync;

/// Options for a batch run.
pub struct BatchOptions {
    /// Per-item thumbnail options, shared by every file in the batch
    /// (including the cancellation token).
    pub thumbnail: ThumbnailOptions,

    /// Prefix joined onto each descriptor's `file` to form the identifier
    /// actually loaded.
    pub prefix: Option<String>,

    /// Worker count. `None` means one worker per item; values are clamped
    /// to `[1, item count]`.
    pub concurrency: Option<usize>,

    /// Called after each item completes, successfully or with an error.
    /// Aborted items never advance progress.
    pub on_progress: Option<Box<ProgressFn>>,

    /// Called for each item whose thumbnail is an error.
    pub on_error: Option<Box<ErrorFn>>,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            thumbnail: ThumbnailOptions::default(),
            prefix: None,
            concurrency: None,
            on_progress: None,
            on_error: None,
        }
    }
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-item thumbnail options.
    pub fn with_thumbnail(mut self, thumbnail: ThumbnailOptions) -> Self {
        self.thumbnail = thumbnail;
        self
    }

    /// Set the identifier prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Cap the number of concurrent workers.
    pub fn with_concurrency(mut self, workers: usize) -> Self {
        self.concurrency = Some(workers);
        self
    }

    /// Register a progress callback.
    pub fn with_on_progress(mut self, f: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Register an error callback.
    pub fn with_on_error(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }
}

/// Join the batch prefix onto a descriptor's file name.
pub(crate) fn resolve_identifier(prefix: Option<&str>, file: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{file}"),
        None => file.to_string(),
    }
}

/// Run a batch: a bounded pool of workers pulls items off a shared cursor
/// until it runs past the end, then results are reassembled in input order.
pub(crate) async fn run(
    thumbnailer: &Thumbnailer,
    files: &[FileDescriptor],
    options: &BatchOptions,
) -> Vec<BatchEntry> {
    if files.is_empty() || options.thumbnail.cancel.is_cancelled() {
        return Vec::new();
    }

    let items: Vec<&FileDescriptor> = files
        .iter()
        .filter(|d| d.file.as_deref().is_some_and(|f| !f.is_empty()))
        .collect();
    let total = items.len();
    if total == 0 {
        return Vec::new();
    }

    let workers = options.concurrency.unwrap_or(total).clamp(1, total);
    debug!("batch of {} items across {} workers", total, workers);

    let cursor = AtomicUsize::new(0);
    let completed = AtomicUsize::new(0);
    let slots: Vec<Mutex<Option<Thumbnail>>> = (0..total).map(|_| Mutex::new(None)).collect();

    join_all((0..workers).map(|_| {
        drain(
            thumbnailer,
            &items,
            options,
            total,
            &cursor,
            &completed,
            &slots,
        )
    }))
    .await;

    items
        .into_iter()
        .zip(slots)
        .filter_map(|(descriptor, slot)| {
            slot.into_inner()
                .ok()
                .flatten()
                .map(|thumbnail| BatchEntry {
                    descriptor: descriptor.clone(),
                    thumbnail,
                })
        })
        .collect()
}

/// One worker: claim the next unclaimed item, process it, repeat until the
/// cursor runs out.
async fn drain(
    thumbnailer: &Thumbnailer,
    items: &[&FileDescriptor],
    options: &BatchOptions,
    total: usize,
    cursor: &AtomicUsize,
    completed: &AtomicUsize,
    slots: &[Mutex<Option<Thumbnail>>],
) {
    loop {
        let index = cursor.fetch_add(1, Ordering::SeqCst);
        if index >= total {
            return;
        }
        // Descriptors without a file name were filtered out before the pool
        // started, so `file` is always present here.
        let file = items[index].file.as_deref().unwrap_or_default();
        let identifier = resolve_identifier(options.prefix.as_deref(), file);

        let Some(thumbnail) = thumbnailer
            .create_thumbnail(&identifier, &options.thumbnail)
            .await
        else {
            // Aborted: no slot write, no progress tick.
            continue;
        };

        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(on_progress) = &options.on_progress {
            on_progress(done, total);
        }
        if thumbnail.is_error() {
            if let Some(on_error) = &options.on_error {
                on_error(&identifier);
            }
        }
        if let Ok(mut slot) = slots[index].lock() {
            *slot = Some(thumbnail);
        }
    }
}
