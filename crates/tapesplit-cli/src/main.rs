//! Audio side-splitting binary.
//!
//! Usage: `tapesplit <identifier> [side-file]...`
//!
//! Side files are already-downloaded local paths, processed in the given
//! order (Side A, Side B, ...). With no side arguments, the item's `raw/`
//! directory is used. Catalog lookup and downloading are external concerns
//! and are not handled here.
//!
//! Configuration comes from `TAPESPLIT_*` environment variables (a `.env`
//! file is honored).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tapesplit_media::{check_ffmpeg, check_ffprobe, Ffmpeg};
use tapesplit_models::{
    CleanupConfig, CleanupOutcome, ItemLayout, ProcessingReport, ResumeVerdict, SplitConfig,
};
use tapesplit_pipeline::{
    maybe_cleanup_item, plan_resume, process_sides, validate_tracks, write_report,
    TracksValidation,
};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("tapesplit=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    if let Err(e) = run().await {
        error!("tapesplit failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let identifier = args
        .next()
        .context("usage: tapesplit <identifier> [side-file]...")?;
    let side_args: Vec<PathBuf> = args.map(PathBuf::from).collect();

    check_ffmpeg()?;
    check_ffprobe()?;

    let out_dir = std::env::var("TAPESPLIT_OUT_DIR").unwrap_or_else(|_| "out".to_string());
    let split = SplitConfig::from_env();
    let cleanup = CleanupConfig::from_env();
    let layout = ItemLayout::new(&out_dir, &identifier);
    let tool = Ffmpeg::new();

    info!(identifier = %identifier, out = %layout.root.display(), "Starting run");
    let started = Instant::now();

    match plan_resume(&tool, &layout, &split.extension).await? {
        ResumeVerdict::Skip => {
            info!(identifier = %identifier, "Output already valid, nothing to do");
            return Ok(());
        }
        ResumeVerdict::NeedsFullProcessing if side_args.is_empty() => {
            bail!(
                "{identifier}: no usable output and no raw sources on disk; \
                 downloading is not handled here - pass side files as arguments"
            );
        }
        verdict => {
            info!(identifier = %identifier, ?verdict, "Work needed");
        }
    }

    let sides = if side_args.is_empty() {
        raw_side_files(&layout).await?
    } else {
        side_args
    };
    if sides.is_empty() {
        bail!("{identifier}: raw/ holds no side files");
    }

    let result = process_sides(&tool, &layout.tracks_dir(), &sides, &split).await;

    let side_names: Vec<String> = sides
        .iter()
        .map(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect();

    match result {
        Ok(outcome) => {
            match validate_tracks(&tool, &layout.tracks_dir(), &split.extension).await? {
                TracksValidation::Valid { count } => {
                    info!(identifier = %identifier, tracks = count, "Output validated");
                }
                TracksValidation::Invalid { reason } => {
                    warn!(identifier = %identifier, reason = %reason, "Output failed validation");
                }
            }

            let cleanup_outcome =
                maybe_cleanup_item(&tool, &layout, &cleanup, &split.extension, false).await?;

            let report = ProcessingReport {
                identifier: identifier.clone(),
                settings: split,
                sides: side_names,
                tracks: outcome
                    .tracks
                    .iter()
                    .map(|t| t.path.display().to_string())
                    .collect(),
                track_count: outcome.tracks.len(),
                elapsed_secs: started.elapsed().as_secs_f64(),
                finished_at: Utc::now(),
                error: None,
                cleanup: cleanup_outcome,
            };
            write_report(&layout, &report).await?;

            info!(
                identifier = %identifier,
                tracks = report.track_count,
                elapsed = format!("{:.1}s", report.elapsed_secs),
                "Run complete"
            );
            Ok(())
        }
        Err(e) => {
            // Best-effort failure report; already-exported tracks stay put
            let report = ProcessingReport {
                identifier: identifier.clone(),
                settings: split,
                sides: side_names,
                tracks: Vec::new(),
                track_count: 0,
                elapsed_secs: started.elapsed().as_secs_f64(),
                finished_at: Utc::now(),
                error: Some(e.to_string()),
                cleanup: CleanupOutcome::skipped("run failed, keeping intermediates"),
            };
            if let Err(report_err) = write_report(&layout, &report).await {
                warn!("Could not write failure report: {}", report_err);
            }
            Err(e.into())
        }
    }
}

/// Side files from the item's raw/ directory, in name order.
async fn raw_side_files(layout: &ItemLayout) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(layout.raw_dir())
        .await
        .with_context(|| format!("reading {}", layout.raw_dir().display()))?;

    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}
