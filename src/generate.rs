//! Batch icon generation.
//!
//! One pass over the manifest's entries: parse dimensions, resample,
//! encode, hand bytes to the sink, and record an index-aligned outcome
//! slot per entry. Entries are independent, so the batch fans out to
//! blocking workers and joins in manifest order; slots are index-addressed,
//! which keeps the output order identical no matter how the workers are
//! scheduled. The manifest rewrite must only consume a completed report
//! (the join happens inside [`BatchGenerator::run`]).

use crate::encode::encode_png;
use crate::error::{Error, Result};
use crate::geometry::{ScaleFactor, TargetDimensions};
use crate::manifest::IconSpec;
use crate::resample;
use crate::sink::ArtifactSink;
use image::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;

/// How the batch reacts to a failing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure and keep going (the default).
    #[default]
    Continue,
    /// Stop at the first failure; remaining entries are marked skipped.
    Abort,
}

/// Result of rendering one icon spec, before it reaches the sink.
#[derive(Debug)]
pub struct GeneratedIcon {
    /// Deterministic output filename, `AppIcon<size>-<scale>.png`.
    pub filename: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Encoded PNG bytes.
    pub png_bytes: Vec<u8>,
}

/// Terminal state of one manifest entry.
#[derive(Debug)]
pub enum SlotOutcome {
    /// The icon was generated and written.
    Success {
        /// Recorded output filename.
        filename: String,
        /// Output width in pixels.
        width: u32,
        /// Output height in pixels.
        height: u32,
    },
    /// The entry failed; the batch may have continued without it.
    Failure {
        /// What went wrong.
        reason: Error,
    },
    /// Never attempted because an earlier entry aborted the batch.
    Skipped,
}

/// One entry's identity plus its outcome.
#[derive(Debug)]
pub struct EntrySlot {
    /// The entry's original size string.
    pub size: String,
    /// The entry's original scale string.
    pub scale: String,
    /// What happened to it.
    pub outcome: SlotOutcome,
}

/// Overall batch status, a simple function of the slot states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Every entry succeeded.
    AllSucceeded,
    /// Some entries succeeded, some did not.
    Partial,
    /// No entry succeeded.
    AllFailed,
}

/// Index-aligned outcomes for a whole batch.
#[derive(Debug)]
pub struct BatchReport {
    /// One slot per input entry, in manifest order.
    pub slots: Vec<EntrySlot>,
}

impl BatchReport {
    /// Number of successful entries.
    pub fn succeeded(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s.outcome, SlotOutcome::Success { .. }))
            .count()
    }

    /// Number of failed entries (skipped entries are not failures).
    pub fn failed(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s.outcome, SlotOutcome::Failure { .. }))
            .count()
    }

    /// Number of entries never attempted.
    pub fn skipped(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s.outcome, SlotOutcome::Skipped))
            .count()
    }

    /// Overall status.
    pub fn status(&self) -> BatchStatus {
        if self.failed() == 0 && self.skipped() == 0 {
            BatchStatus::AllSucceeded
        } else if self.succeeded() > 0 {
            BatchStatus::Partial
        } else {
            BatchStatus::AllFailed
        }
    }

    /// Index-aligned filenames for the manifest rewrite; `None` for slots
    /// that did not succeed.
    pub fn filenames(&self) -> Vec<Option<String>> {
        self.slots
            .iter()
            .map(|s| match &s.outcome {
                SlotOutcome::Success { filename, .. } => Some(filename.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Deterministic output filename for a manifest entry.
///
/// Built from the entry's original size and scale strings, not the
/// resolved pixel dimensions: `"60x60"` at `"2x"` becomes
/// `AppIcon60x60-2x.png`.
pub fn icon_filename(size: &str, scale: &str) -> String {
    format!("AppIcon{size}-{scale}.png")
}

/// Drives one pass over a manifest's icon specs.
///
/// Holds the single read-only source raster shared by all workers and the
/// caller-supplied output directory. Path resolution (project root, asset
/// catalog) happens outside; the generator only ever joins filenames onto
/// the directory it was given.
pub struct BatchGenerator {
    source: Arc<DynamicImage>,
    output_dir: PathBuf,
    sink: Arc<dyn ArtifactSink>,
    policy: FailurePolicy,
}

impl BatchGenerator {
    /// Creates a generator writing into `output_dir` through `sink`.
    pub fn new(
        source: DynamicImage,
        output_dir: impl Into<PathBuf>,
        sink: Arc<dyn ArtifactSink>,
    ) -> Self {
        Self {
            source: Arc::new(source),
            output_dir: output_dir.into(),
            sink,
            policy: FailurePolicy::default(),
        }
    }

    /// Sets the failure policy.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Processes every spec and returns the completed, index-aligned report.
    ///
    /// Under [`FailurePolicy::Continue`] entries fan out to blocking
    /// workers and all of them resolve; under [`FailurePolicy::Abort`]
    /// entries run in order and the first failure marks the rest skipped.
    pub async fn run(&self, specs: &[IconSpec]) -> BatchReport {
        match self.policy {
            FailurePolicy::Continue => self.run_fanout(specs).await,
            FailurePolicy::Abort => self.run_sequential(specs).await,
        }
    }

    async fn run_fanout(&self, specs: &[IconSpec]) -> BatchReport {
        let mut handles = Vec::with_capacity(specs.len());
        for spec in specs {
            handles.push(self.spawn_entry(spec));
        }

        let mut slots = Vec::with_capacity(specs.len());
        for (spec, handle) in specs.iter().zip(handles) {
            slots.push(EntrySlot {
                size: spec.size.clone(),
                scale: spec.scale.clone(),
                outcome: join_outcome(handle.await, spec),
            });
        }

        BatchReport { slots }
    }

    async fn run_sequential(&self, specs: &[IconSpec]) -> BatchReport {
        let mut slots = Vec::with_capacity(specs.len());
        let mut aborted = false;

        for spec in specs {
            if aborted {
                slots.push(EntrySlot {
                    size: spec.size.clone(),
                    scale: spec.scale.clone(),
                    outcome: SlotOutcome::Skipped,
                });
                continue;
            }

            let outcome = join_outcome(self.spawn_entry(spec).await, spec);
            if matches!(outcome, SlotOutcome::Failure { .. }) {
                log::warn!(
                    "Aborting batch at {}@{} per fail-fast policy",
                    spec.size,
                    spec.scale
                );
                aborted = true;
            }
            slots.push(EntrySlot {
                size: spec.size.clone(),
                scale: spec.scale.clone(),
                outcome,
            });
        }

        BatchReport { slots }
    }

    /// Runs one entry's parse → resample → encode → write on the blocking
    /// pool. The resample and encode are CPU-bound; keeping them off the
    /// async worker threads matters once entries fan out.
    fn spawn_entry(&self, spec: &IconSpec) -> tokio::task::JoinHandle<Result<GeneratedIcon>> {
        let source = Arc::clone(&self.source);
        let sink = Arc::clone(&self.sink);
        let output_dir = self.output_dir.clone();
        let spec = spec.clone();

        tokio::task::spawn_blocking(move || {
            let icon = render_entry(&source, &spec)?;
            sink.write(&output_dir, &icon.filename, &icon.png_bytes)?;
            Ok(icon)
        })
    }
}

/// Pure per-entry pipeline: dimensions → resample → encode.
fn render_entry(source: &DynamicImage, spec: &IconSpec) -> Result<GeneratedIcon> {
    let scale = ScaleFactor::parse(&spec.scale)?;
    let target = TargetDimensions::from_size_string(&spec.size, scale)?;
    let resampled = resample::scale_to_dimensions(source, target)?;
    let png_bytes = encode_png(&resampled)?;

    log::debug!(
        "Rendered {}@{} as {}x{}",
        spec.size,
        spec.scale,
        resampled.width(),
        resampled.height()
    );

    Ok(GeneratedIcon {
        filename: icon_filename(&spec.size, &spec.scale),
        width: resampled.width(),
        height: resampled.height(),
        png_bytes,
    })
}

fn join_outcome(
    joined: std::result::Result<Result<GeneratedIcon>, tokio::task::JoinError>,
    spec: &IconSpec,
) -> SlotOutcome {
    match joined {
        Ok(Ok(icon)) => SlotOutcome::Success {
            filename: icon.filename,
            width: icon.width,
            height: icon.height,
        },
        Ok(Err(reason)) => SlotOutcome::Failure { reason },
        Err(join_error) => SlotOutcome::Failure {
            reason: Error::Generic(format!(
                "worker for {}@{} did not finish: {join_error}",
                spec.size, spec.scale
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use image::RgbaImage;
    use std::path::Path;

    fn spec(size: &str, scale: &str) -> IconSpec {
        IconSpec {
            idiom: Some("iphone".to_string()),
            size: size.to_string(),
            scale: scale.to_string(),
            filename: None,
            extra: serde_json::Map::new(),
        }
    }

    fn source(side: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            side,
            side,
            image::Rgba([120, 40, 200, 255]),
        ))
    }

    #[test]
    fn test_icon_filename_convention() {
        assert_eq!(icon_filename("60x60", "2x"), "AppIcon60x60-2x.png");
        assert_eq!(icon_filename("20x20", "1x"), "AppIcon20x20-1x.png");
    }

    #[tokio::test]
    async fn test_batch_generates_expected_files() {
        let sink = Arc::new(MemorySink::new());
        let generator = BatchGenerator::new(source(400), "/icons", Arc::clone(&sink) as _);
        let specs = [spec("20x20", "1x"), spec("20x20", "2x")];

        let report = generator.run(&specs).await;
        assert_eq!(report.status(), BatchStatus::AllSucceeded);
        assert_eq!(
            report.filenames(),
            vec![
                Some("AppIcon20x20-1x.png".to_string()),
                Some("AppIcon20x20-2x.png".to_string())
            ]
        );

        let files = sink.files();
        let one_x = &files[Path::new("/icons/AppIcon20x20-1x.png")];
        let two_x = &files[Path::new("/icons/AppIcon20x20-2x.png")];
        let decoded_1x = image::load_from_memory(one_x).unwrap();
        let decoded_2x = image::load_from_memory(two_x).unwrap();
        assert_eq!((decoded_1x.width(), decoded_1x.height()), (20, 20));
        assert_eq!((decoded_2x.width(), decoded_2x.height()), (40, 40));
    }

    #[tokio::test]
    async fn test_bad_entry_does_not_poison_batch() {
        let sink = Arc::new(MemorySink::new());
        let generator = BatchGenerator::new(source(64), "/icons", Arc::clone(&sink) as _);
        let specs = [spec("bad", "1x"), spec("16x16", "1x")];

        let report = generator.run(&specs).await;
        assert_eq!(report.status(), BatchStatus::Partial);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert!(matches!(
            report.slots[0].outcome,
            SlotOutcome::Failure {
                reason: Error::DimensionParse { .. }
            }
        ));
        assert_eq!(
            report.filenames(),
            vec![None, Some("AppIcon16x16-1x.png".to_string())]
        );
    }

    #[tokio::test]
    async fn test_slots_stay_in_manifest_order() {
        let sink = Arc::new(MemorySink::new());
        let generator = BatchGenerator::new(source(256), "/icons", Arc::clone(&sink) as _);
        let sizes = ["16x16", "20x20", "29x29", "32x32", "40x40", "60x60", "64x64"];
        let specs: Vec<IconSpec> = sizes.iter().map(|s| spec(s, "2x")).collect();

        let report = generator.run(&specs).await;
        for (slot, size) in report.slots.iter().zip(sizes) {
            assert_eq!(slot.size, size);
            match &slot.outcome {
                SlotOutcome::Success { filename, .. } => {
                    assert_eq!(filename, &icon_filename(size, "2x"));
                }
                other => panic!("expected success for {size}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_abort_policy_stops_after_failure() {
        let sink = Arc::new(MemorySink::new());
        let generator = BatchGenerator::new(source(64), "/icons", Arc::clone(&sink) as _)
            .with_policy(FailurePolicy::Abort);
        let specs = [spec("16x16", "1x"), spec("bad", "1x"), spec("32x32", "1x")];

        let report = generator.run(&specs).await;
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);
        assert!(matches!(report.slots[2].outcome, SlotOutcome::Skipped));
        assert_eq!(report.status(), BatchStatus::Partial);
        assert_eq!(sink.files().len(), 1);
    }

    #[tokio::test]
    async fn test_all_failed_status() {
        let sink = Arc::new(MemorySink::new());
        let generator = BatchGenerator::new(source(64), "/icons", Arc::clone(&sink) as _);
        let specs = [spec("bad", "1x"), spec("16x16", "nope")];

        let report = generator.run(&specs).await;
        assert_eq!(report.status(), BatchStatus::AllFailed);
        assert!(report.filenames().iter().all(Option::is_none));
    }
}
