//! Batch command - generate thumbnails for multiple PDF files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use pdfthumb_core::{
    BatchEntry, BatchOptions, CancellationToken, FileDescriptor, OutputKind, Thumbnail,
    ThumbnailOptions, Thumbnailer,
};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long, default_value = "thumbnails")]
    output_dir: PathBuf,

    /// Prefix joined onto each file name before loading
    #[arg(long)]
    prefix: Option<String>,

    /// Number of parallel workers (default: one per file)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// 1-based page to render, clamped to each document's page range
    #[arg(short, long, default_value = "1")]
    page: u32,

    /// Render scale relative to each page's intrinsic size
    #[arg(short, long, default_value = "1.0")]
    scale: f32,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,
}

pub async fn run(args: BatchArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    // Expand glob pattern
    let files: Vec<FileDescriptor> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("pdf")
        })
        .filter_map(|p| p.to_str().map(FileDescriptor::new))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    fs::create_dir_all(&args.output_dir)?;

    // Set up progress bar
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    // Ctrl-C aborts the remaining files; completed ones are still written.
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let mut options = BatchOptions::new()
        .with_thumbnail(
            ThumbnailOptions::new()
                .with_output(OutputKind::Buffer)
                .with_page(args.page)
                .with_scale(args.scale)
                .with_cancel(cancel.clone()),
        )
        .with_on_progress({
            let pb = pb.clone();
            move |_, _| pb.inc(1)
        })
        .with_on_error(|identifier: &str| warn!("Failed to process {}", identifier));
    if let Some(prefix) = &args.prefix {
        options = options.with_prefix(prefix);
    }
    if let Some(jobs) = args.jobs {
        options = options.with_concurrency(jobs);
    }

    let thumbnailer = Thumbnailer::new().map_err(|e| anyhow::anyhow!("{e}"))?;
    let results = thumbnailer.create_thumbnails(&files, &options).await;

    pb.finish_with_message("Complete");

    if cancel.is_cancelled() {
        println!("{} Batch aborted", style("⚠").yellow());
    }

    // Write outputs
    let mut rows = Vec::with_capacity(results.len());
    for entry in &results {
        rows.push(write_entry(entry, &args.output_dir));
    }

    let successful = rows.iter().filter(|r| r.error.is_none()).count();
    let failed: Vec<_> = rows.iter().filter(|r| r.error.is_some()).collect();

    // Generate summary if requested
    if args.summary {
        let summary_path = args.output_dir.join("summary.csv");
        write_summary(&summary_path, &rows)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    // Print summary
    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for row in &failed {
            println!(
                "  - {}: {}",
                row.file,
                row.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Summary of one processed file.
struct SummaryRow {
    file: String,
    output: Option<PathBuf>,
    bytes: usize,
    error: Option<String>,
}

/// Write a single batch entry to the output directory.
fn write_entry(entry: &BatchEntry, output_dir: &Path) -> SummaryRow {
    let file = entry.descriptor.file.clone().unwrap_or_default();
    match &entry.thumbnail {
        Thumbnail::Buffer(png) => {
            let stem = Path::new(&file)
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("thumbnail");
            let output_path = output_dir.join(format!("{stem}.png"));
            match fs::write(&output_path, png) {
                Ok(()) => SummaryRow {
                    file,
                    output: Some(output_path),
                    bytes: png.len(),
                    error: None,
                },
                Err(e) => SummaryRow {
                    file,
                    output: None,
                    bytes: 0,
                    error: Some(e.to_string()),
                },
            }
        }
        Thumbnail::Error(message) => SummaryRow {
            file,
            output: None,
            bytes: 0,
            error: Some(message.clone()),
        },
        // Batch runs request Buffer output, so data URLs do not occur here.
        Thumbnail::DataUrl(_) => SummaryRow {
            file,
            output: None,
            bytes: 0,
            error: Some("unexpected data URL output".to_string()),
        },
    }
}

fn write_summary(path: &Path, rows: &[SummaryRow]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["filename", "status", "output", "bytes", "error"])?;

    for row in rows {
        let status = if row.error.is_none() { "success" } else { "error" };
        wtr.write_record([
            row.file.as_str(),
            status,
            &row.output
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            &row.bytes.to_string(),
            row.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
