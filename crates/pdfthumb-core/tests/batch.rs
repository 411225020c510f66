//! Batch orchestration: ordering, callbacks, concurrency, cancellation.

mod common;

use std::sync::{Arc, Mutex};

use pdfthumb_core::{
    BatchOptions, CancellationToken, FileDescriptor, Thumbnail, ThumbnailOptions,
};
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{thumbnailer, write_fixture};

fn descriptors(sources: &[&str]) -> Vec<FileDescriptor> {
    sources.iter().map(|s| FileDescriptor::new(*s)).collect()
}

#[tokio::test]
async fn results_follow_input_order() {
    let dir = tempfile::tempdir().unwrap();
    // Uneven sizes so completion order differs from input order under
    // concurrency, but output order must not.
    let a = write_fixture(dir.path(), "a.pdf", "pages=1;w=200;h=200");
    let b = write_fixture(dir.path(), "b.pdf", "pages=1;w=4;h=4");
    let c = write_fixture(dir.path(), "c.pdf", "pages=1;w=120;h=80");

    let results = thumbnailer()
        .create_thumbnails(&descriptors(&[&a, &b, &c]), &BatchOptions::new())
        .await;

    let files: Vec<_> = results
        .iter()
        .map(|entry| entry.descriptor.file.as_deref().unwrap())
        .collect();
    assert_eq!(files, vec![a.as_str(), b.as_str(), c.as_str()]);
}

#[tokio::test]
async fn failed_items_do_not_poison_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_fixture(dir.path(), "good.pdf", "pages=1;w=10;h=10");
    let bad = write_fixture(dir.path(), "bad.pdf", "total garbage");
    let also_good = write_fixture(dir.path(), "also_good.pdf", "pages=2;w=10;h=10");

    let results = thumbnailer()
        .create_thumbnails(&descriptors(&[&good, &bad, &also_good]), &BatchOptions::new())
        .await;

    assert_eq!(results.len(), 3);
    assert!(!results[0].thumbnail.is_error());
    assert!(results[1].thumbnail.is_error());
    assert!(!results[2].thumbnail.is_error());
}

#[tokio::test]
async fn progress_counts_errors_and_errors_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_fixture(dir.path(), "good.pdf", "pages=1;w=10;h=10");
    let bad = write_fixture(dir.path(), "bad.pdf", "nope");

    let progress: Arc<Mutex<Vec<(usize, usize)>>> = Arc::new(Mutex::new(Vec::new()));
    let errors: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let options = BatchOptions::new()
        .with_concurrency(1)
        .with_on_progress({
            let progress = progress.clone();
            move |done, total| progress.lock().unwrap().push((done, total))
        })
        .with_on_error({
            let errors = errors.clone();
            move |identifier: &str| errors.lock().unwrap().push(identifier.to_string())
        });

    let results = thumbnailer()
        .create_thumbnails(&descriptors(&[&good, &bad]), &options)
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(*progress.lock().unwrap(), vec![(1, 2), (2, 2)]);
    assert_eq!(*errors.lock().unwrap(), vec![bad]);
}

#[tokio::test]
async fn prefix_is_joined_onto_each_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), "doc.pdf", "pages=1;w=10;h=10");
    let prefix = format!("{}/", dir.path().to_str().unwrap());

    let options = BatchOptions::new().with_prefix(&prefix);
    let results = thumbnailer()
        .create_thumbnails(&descriptors(&["doc.pdf"]), &options)
        .await;

    assert_eq!(results.len(), 1);
    assert!(!results[0].thumbnail.is_error());
    // The descriptor keeps the caller's original name, not the joined one.
    assert_eq!(results[0].descriptor.file.as_deref(), Some("doc.pdf"));
}

#[tokio::test]
async fn descriptors_without_a_file_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_fixture(dir.path(), "doc.pdf", "pages=1;w=10;h=10");

    let mut nameless = FileDescriptor::default();
    nameless.extra.insert("note".to_string(), json!("no file"));
    let empty = FileDescriptor::new("");

    let progress: Arc<Mutex<Vec<(usize, usize)>>> = Arc::new(Mutex::new(Vec::new()));
    let options = BatchOptions::new().with_on_progress({
        let progress = progress.clone();
        move |done, total| progress.lock().unwrap().push((done, total))
    });

    let results = thumbnailer()
        .create_thumbnails(&[nameless, empty, FileDescriptor::new(&doc)], &options)
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].descriptor.file.as_deref(), Some(doc.as_str()));
    // Skipped descriptors never count toward the total.
    assert_eq!(*progress.lock().unwrap(), vec![(1, 1)]);
}

#[tokio::test]
async fn extra_descriptor_fields_survive_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_fixture(dir.path(), "doc.pdf", "pages=1;w=10;h=10");

    let mut descriptor = FileDescriptor::new(&doc);
    descriptor.extra.insert("id".to_string(), json!(42));

    let results = thumbnailer()
        .create_thumbnails(&[descriptor], &BatchOptions::new())
        .await;

    assert_eq!(results[0].descriptor.extra["id"], json!(42));
}

#[tokio::test]
async fn empty_input_yields_empty_output() {
    let progress = Arc::new(Mutex::new(Vec::new()));
    let errors: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let options = BatchOptions::new()
        .with_on_progress({
            let progress = progress.clone();
            move |done, total| progress.lock().unwrap().push((done, total))
        })
        .with_on_error({
            let errors = errors.clone();
            move |identifier: &str| errors.lock().unwrap().push(identifier.to_string())
        });

    let results = thumbnailer().create_thumbnails(&[], &options).await;
    assert!(results.is_empty());
    assert!(progress.lock().unwrap().is_empty());
    assert!(errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn pre_cancelled_batch_produces_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_fixture(dir.path(), "doc.pdf", "pages=1;w=10;h=10");

    let cancel = CancellationToken::new();
    cancel.cancel();
    let options = BatchOptions::new()
        .with_thumbnail(ThumbnailOptions::new().with_cancel(cancel));

    let results = thumbnailer()
        .create_thumbnails(&descriptors(&[&doc]), &options)
        .await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn cancelling_mid_batch_drops_remaining_items() {
    let dir = tempfile::tempdir().unwrap();
    let sources: Vec<String> = (0..4)
        .map(|i| write_fixture(dir.path(), &format!("doc{i}.pdf"), "pages=1;w=10;h=10"))
        .collect();
    let files: Vec<FileDescriptor> = sources.iter().map(FileDescriptor::new).collect();

    let progress = Arc::new(Mutex::new(Vec::new()));
    let errors: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let cancel = CancellationToken::new();
    // A single worker processes items in order; cancel after the first one
    // completes so the other three are aborted at their pre-checkpoint.
    let options = BatchOptions::new()
        .with_concurrency(1)
        .with_thumbnail(ThumbnailOptions::new().with_cancel(cancel.clone()))
        .with_on_progress({
            let progress = progress.clone();
            move |done, total| {
                progress.lock().unwrap().push((done, total));
                cancel.cancel();
            }
        })
        .with_on_error({
            let errors = errors.clone();
            move |identifier: &str| errors.lock().unwrap().push(identifier.to_string())
        });

    let results = thumbnailer().create_thumbnails(&files, &options).await;

    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].descriptor.file.as_deref(),
        Some(sources[0].as_str())
    );
    assert!(matches!(results[0].thumbnail, Thumbnail::DataUrl(_)));
    // The three aborted items never tick progress and are not errors.
    assert_eq!(*progress.lock().unwrap(), vec![(1, 4)]);
    assert!(errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn concurrency_is_clamped_to_item_count() {
    let dir = tempfile::tempdir().unwrap();
    let doc = write_fixture(dir.path(), "doc.pdf", "pages=1;w=10;h=10");

    // More workers than items must not panic or duplicate results.
    let options = BatchOptions::new().with_concurrency(16);
    let results = thumbnailer()
        .create_thumbnails(&descriptors(&[&doc]), &options)
        .await;
    assert_eq!(results.len(), 1);
}
