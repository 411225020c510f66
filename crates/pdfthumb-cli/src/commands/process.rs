//! Process command - generate a thumbnail for a single PDF.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::debug;

use pdfthumb_core::{OutputKind, Thumbnail, ThumbnailOptions, Thumbnailer};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file: a local path, http(s) URL or data URL
    #[arg(required = true)]
    input: String,

    /// Output file for png format (default: <input stem>.png)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "png")]
    format: OutputFormat,

    /// 1-based page to render, clamped to the document's page range
    #[arg(short, long, default_value = "1")]
    page: u32,

    /// Render scale relative to the page's intrinsic size
    #[arg(short, long, default_value = "1.0")]
    scale: f32,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// PNG file
    Png,
    /// Base64 data URL on stdout
    DataUrl,
}

pub async fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let start = Instant::now();

    let output_kind = match args.format {
        OutputFormat::Png => OutputKind::Buffer,
        OutputFormat::DataUrl => OutputKind::DataUrl,
    };
    let options = ThumbnailOptions::new()
        .with_output(output_kind)
        .with_page(args.page)
        .with_scale(args.scale);

    let thumbnailer = Thumbnailer::new().map_err(|e| anyhow::anyhow!("{e}"))?;
    let thumbnail = thumbnailer
        .create_thumbnail(&args.input, &options)
        .await
        .ok_or_else(|| anyhow::anyhow!("operation was cancelled"))?;

    match thumbnail {
        Thumbnail::Error(message) => {
            anyhow::bail!("Failed to process {}: {}", args.input, message);
        }
        Thumbnail::DataUrl(url) => {
            println!("{url}");
        }
        Thumbnail::Buffer(png) => {
            let output_path = args.output.unwrap_or_else(|| default_output(&args.input));
            fs::write(&output_path, &png)?;
            println!(
                "{} Thumbnail written to {} ({} bytes)",
                style("✓").green(),
                output_path.display(),
                png.len()
            );
        }
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Derive an output name next to the working directory from the input stem.
fn default_output(input: &str) -> PathBuf {
    let stem = PathBuf::from(input)
        .file_stem()
        .and_then(|s| s.to_str().map(String::from))
        .unwrap_or_else(|| "thumbnail".to_string());
    PathBuf::from(format!("{stem}.png"))
}
