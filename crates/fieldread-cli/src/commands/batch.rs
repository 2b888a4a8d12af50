//! Batch processing command for multiple OCR text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use fieldread_core::models::config::OutputConfig;
use fieldread_core::FieldKind;

use super::extract::{format_report, resolve_kind, FieldReport, KindArg, OutputFormat};
use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Field to extract (default: from config)
    #[arg(short, long, value_enum)]
    kind: Option<KindArg>,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    report: Option<FieldReport>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let kind = resolve_kind(args.kind, &config);

    // Expand glob pattern
    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "txt" | "text" | "ocr")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Extraction is pure, so files are fanned out to a bounded set of tasks.
    let output_config = Arc::new(config.output.clone());
    let jobs = args.jobs.max(1);
    let mut tasks = JoinSet::new();
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        if tasks.len() >= jobs {
            if let Some(joined) = tasks.join_next().await {
                let result = joined?;
                record(&result, &args, &pb)?;
                results.push(result);
            }
        }

        let output_config = Arc::clone(&output_config);
        tasks.spawn(async move { process_single_file(path, kind, &output_config).await });
    }

    while let Some(joined) = tasks.join_next().await {
        let result = joined?;
        record(&result, &args, &pb)?;
        results.push(result);
    }

    pb.finish_with_message("Complete");
    results.sort_by(|a, b| a.path.cmp(&b.path));

    let successful: Vec<_> = results.iter().filter(|r| r.report.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    // Write per-file outputs
    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(report) = &result.report {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("result");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                fs::write(&output_path, format_report(report, args.format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let flagged = successful
        .iter()
        .filter(|r| r.report.as_ref().is_some_and(|report| report.needs_verification))
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful ({} need verification), {} failed",
        style(successful.len()).green(),
        style(flagged).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Advance progress and stop early on failures unless asked to continue.
fn record(result: &ProcessResult, args: &BatchArgs, pb: &ProgressBar) -> anyhow::Result<()> {
    pb.inc(1);

    if let Some(error_msg) = &result.error {
        if args.continue_on_error {
            warn!("Failed to process {}: {}", result.path.display(), error_msg);
        } else {
            error!("Failed to process {}: {}", result.path.display(), error_msg);
            anyhow::bail!("Processing failed: {}", error_msg);
        }
    }

    Ok(())
}

async fn process_single_file(path: PathBuf, kind: FieldKind, output: &OutputConfig) -> ProcessResult {
    let file_start = Instant::now();

    let (report, error) = match tokio::fs::read_to_string(&path).await {
        Ok(text) => (Some(FieldReport::build(&text, kind, output)), None),
        Err(e) => (None, Some(e.to_string())),
    };

    ProcessResult {
        path,
        report,
        error,
        processing_time_ms: file_start.elapsed().as_millis() as u64,
    }
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "kind",
        "value",
        "confidence",
        "needs_verification",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        if let Some(report) = &result.report {
            wtr.write_record([
                filename,
                "success",
                report.kind.as_str(),
                &report.value.as_ref().map(|v| v.to_string()).unwrap_or_default(),
                report.confidence.as_str(),
                &report.needs_verification.to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
