//! Artifact output seam.
//!
//! The batch generator hands finished PNG bytes to an [`ArtifactSink`]
//! rather than touching the filesystem itself, so generation logic can be
//! tested against an in-memory sink.

use crate::error::{ErrorExt, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Destination for generated icon bytes.
///
/// Implementations must tolerate concurrent writes to distinct filenames;
/// the batch generator may run entries in parallel.
pub trait ArtifactSink: Send + Sync {
    /// Writes one icon's bytes as `filename` under `dir`.
    fn write(&self, dir: &Path, filename: &str, bytes: &[u8]) -> Result<()>;
}

/// Writes artifacts to the local filesystem, creating `dir` as needed.
///
/// Writes are plain overwrites: regeneration is idempotent (identical
/// inputs produce identical bytes), so a partial batch leaves nothing that
/// a rerun won't replace.
#[derive(Debug, Default)]
pub struct FsSink;

impl ArtifactSink for FsSink {
    fn write(&self, dir: &Path, filename: &str, bytes: &[u8]) -> Result<()> {
        std::fs::create_dir_all(dir).fs_context("creating icon output directory", dir)?;
        let path = dir.join(filename);
        std::fs::write(&path, bytes).fs_context("writing icon file", &path)?;
        log::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

/// Collects artifacts in memory, keyed by their would-be path.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Mutex<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far.
    pub fn files(&self) -> BTreeMap<PathBuf, Vec<u8>> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ArtifactSink for MemorySink {
    fn write(&self, dir: &Path, filename: &str, bytes: &[u8]) -> Result<()> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(dir.join(filename), bytes.to_vec());
        Ok(())
    }
}
