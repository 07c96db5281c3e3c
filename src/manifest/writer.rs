//! Manifest rewrite with generated filenames.
//!
//! The rewrite touches exactly three things: each successful entry's
//! `filename`, `info.author`, and `info.version`. Everything else in the
//! document survives byte-for-byte (modulo JSON re-serialization). The
//! write is atomic: serialize to a temp file beside the target, then
//! rename, so a failure leaves the last known-good manifest on disk.

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use serde_json::Value;
use std::io::{self, Write};
use std::path::Path;

/// Application identity recorded in the manifest's `info` block.
///
/// An explicit immutable value rather than ambient global state; the
/// default is this crate's own name and version.
#[derive(Debug, Clone)]
pub struct AppIdentity {
    /// Tool name written to `info.author`.
    pub name: String,
    /// Tool version written to `info.version`.
    pub version: String,
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Returns a copy of `manifest` with generated filenames and identity applied.
///
/// `filenames` must be index-aligned with `manifest.images`; a `None` slot
/// (failed entry) leaves that entry's existing filename untouched.
pub fn apply_results(
    manifest: &Manifest,
    filenames: &[Option<String>],
    identity: &AppIdentity,
) -> Manifest {
    debug_assert_eq!(manifest.images.len(), filenames.len());

    let mut updated = manifest.clone();
    for (spec, filename) in updated.images.iter_mut().zip(filenames) {
        if let Some(name) = filename {
            spec.filename = Some(name.clone());
        }
    }
    updated.info.author = Value::String(identity.name.clone());
    updated.info.version = Value::String(identity.version.clone());
    updated
}

/// Serializes `manifest` and writes it atomically to `path`.
///
/// The temp file lives in the same directory as `path` so the final rename
/// stays on one filesystem.
pub fn write_manifest(manifest: &Manifest, path: &Path) -> Result<()> {
    let serialized = serde_json::to_string_pretty(manifest).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        error: io::Error::other(e),
    })?;

    let temp_path = path.with_extension("json.tmp");
    let write_temp = || -> io::Result<()> {
        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(serialized.as_bytes())?;
        file.sync_all()
    };

    if let Err(error) = write_temp() {
        let _ = std::fs::remove_file(&temp_path);
        return Err(Error::Write {
            path: temp_path,
            error,
        });
    }

    if let Err(error) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(Error::Write {
            path: path.to_path_buf(),
            error,
        });
    }

    log::info!("Rewrote manifest {}", path.display());
    Ok(())
}
