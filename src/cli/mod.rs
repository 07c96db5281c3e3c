//! Command line boundary for icon generation.
//!
//! This layer owns everything the core pipeline treats as external: path
//! resolution, source-image loading, and rendering the batch report. The
//! core receives already-resolved values and hands back a report; nothing
//! in it blocks on the terminal.

mod args;
mod output;

pub use args::{Args, DEFAULT_CATALOG_DIR, MANIFEST_FILENAME};
pub use output::OutputManager;

use crate::error::Result;
use crate::generate::{BatchGenerator, BatchReport, FailurePolicy, SlotOutcome};
use crate::manifest::{self, AppIdentity};
use crate::sink::FsSink;
use crate::{bail, resample, source};
use std::sync::Arc;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    if let Err(message) = args.validate() {
        bail!(message);
    }
    execute(args).await
}

/// Runs the full pipeline for already-parsed arguments.
///
/// Returns the process exit code: 0 when every entry succeeded, 1 when any
/// entry failed or was skipped.
pub async fn execute(args: Args) -> Result<i32> {
    let output = OutputManager::new(args.verbose, args.quiet);

    // Manifest-level failures are fatal: nothing is processed or written.
    let manifest_path = args.manifest_path();
    let manifest = manifest::read_manifest(&manifest_path)?;
    output.info(&format!(
        "Manifest lists {} icon renditions",
        manifest.images.len()
    ));

    let mut source_image = source::load_source_image(&args.image)?;
    if !source::is_square(&source_image) {
        if args.crop {
            output.warn(&format!(
                "Source image is {}x{}; cropping to centered square",
                source_image.width(),
                source_image.height()
            ));
            source_image = resample::crop_square(&source_image);
        } else {
            output.warn(&format!(
                "Source image is {}x{} (not square); pass --crop to center-crop it",
                source_image.width(),
                source_image.height()
            ));
        }
    }

    let policy = if args.fail_fast {
        FailurePolicy::Abort
    } else {
        FailurePolicy::Continue
    };
    let generator = BatchGenerator::new(source_image, args.catalog_path(), Arc::new(FsSink))
        .with_policy(policy);
    let report = generator.run(&manifest.images).await;

    render_report(&output, &report);

    // The rewrite reflects only successful entries. It is skipped entirely
    // when nothing succeeded, and under --fail-fast when anything failed.
    let aborted = args.fail_fast && report.failed() > 0;
    if report.succeeded() > 0 && !aborted {
        let updated = manifest::apply_results(&manifest, &report.filenames(), &AppIdentity::default());
        manifest::write_manifest(&updated, &manifest_path)?;
        output.success(&format!("Updated {}", manifest_path.display()));
    } else if aborted {
        output.warn("Manifest left untouched (batch aborted)");
    } else {
        output.warn("Manifest left untouched (no entries succeeded)");
    }

    Ok(if report.succeeded() == report.slots.len() {
        0
    } else {
        1
    })
}

/// Renders the single structured summary for the batch.
fn render_report(output: &OutputManager, report: &BatchReport) {
    output.section("Icon generation");
    output.println(&format!(
        "{} succeeded, {} failed, {} skipped",
        report.succeeded(),
        report.failed(),
        report.skipped()
    ));

    for slot in &report.slots {
        match &slot.outcome {
            SlotOutcome::Success {
                filename,
                width,
                height,
            } => {
                output.verbose(&format!(
                    "{}@{} -> {filename} ({width}x{height})",
                    slot.size, slot.scale
                ));
            }
            SlotOutcome::Failure { reason } => {
                output.indent(&format!("{}@{}: {reason}", slot.size, slot.scale));
            }
            SlotOutcome::Skipped => {
                output.indent(&format!("{}@{}: skipped", slot.size, slot.scale));
            }
        }
    }
}
