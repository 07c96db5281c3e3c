//! Icon manifest reading.
//!
//! The manifest is a JSON document in the standard asset-catalog
//! `Contents.json` layout: an `images` array of icon specifications plus a
//! top-level `info` block. Fields this tool does not understand are
//! captured into flattened maps and round-trip verbatim through a rewrite.

pub mod writer;

pub use writer::{AppIdentity, apply_results, write_manifest};

use crate::error::{Error, ErrorExt, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// One manifest entry describing a single required output image.
///
/// `size` and `scale` default to empty strings when absent so that a
/// malformed entry fails during dimension parsing (a per-entry, recoverable
/// failure) instead of poisoning the whole manifest parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconSpec {
    /// Opaque platform/form-factor tag, carried through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idiom: Option<String>,

    /// Logical size string, e.g. `"32x32"`.
    #[serde(default)]
    pub size: String,

    /// Scale string, e.g. `"2x"`.
    #[serde(default)]
    pub scale: String,

    /// Filename recorded by a previous generation run, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Any other fields, preserved verbatim on rewrite.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Top-level `info` metadata block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestInfo {
    /// Tool version stamp; replaced on rewrite.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub version: Value,

    /// Authoring tool name; replaced on rewrite.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub author: Value,

    /// Any other fields, preserved verbatim on rewrite.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A parsed icon manifest.
///
/// Entry count and order are preserved through the whole pipeline: the Nth
/// generated filename is written back into the Nth entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Ordered icon specifications.
    pub images: Vec<IconSpec>,

    /// Metadata block.
    #[serde(default)]
    pub info: ManifestInfo,

    /// Any other top-level fields, preserved verbatim on rewrite.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Loads and parses the manifest at `path`.
///
/// Fails with `ManifestNotFound` when the file is absent and
/// `ManifestParse` when the text is not valid JSON or lacks an `images`
/// array. Both are fatal to the run; no entries are processed.
pub fn read_manifest(path: &Path) -> Result<Manifest> {
    if !path.exists() {
        return Err(Error::ManifestNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path).fs_context("reading manifest", path)?;
    let manifest: Manifest = serde_json::from_str(&text).map_err(|e| Error::ManifestParse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    log::debug!(
        "Read manifest with {} entries from {}",
        manifest.images.len(),
        path.display()
    );

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "images": [
            {"idiom": "iphone", "size": "20x20", "scale": "2x"},
            {"idiom": "iphone", "size": "20x20", "scale": "3x", "role": "notification"}
        ],
        "info": {"version": 1, "author": "xcode"},
        "properties": {"pre-rendered": true}
    }"#;

    #[test]
    fn test_parse_preserves_unknown_fields() {
        let manifest: Manifest = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(manifest.images.len(), 2);
        assert_eq!(manifest.images[1].extra["role"], "notification");
        assert_eq!(manifest.extra["properties"]["pre-rendered"], true);
        assert_eq!(manifest.info.version, 1);
    }

    #[test]
    fn test_missing_size_becomes_empty_string() {
        let manifest: Manifest =
            serde_json::from_str(r#"{"images": [{"idiom": "mac"}]}"#).unwrap();
        assert_eq!(manifest.images[0].size, "");
        assert_eq!(manifest.images[0].scale, "");
    }

    #[test]
    fn test_missing_images_array_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Contents.json");
        std::fs::write(&path, r#"{"info": {"version": 1}}"#).unwrap();
        let err = read_manifest(&path).unwrap_err();
        assert!(matches!(err, Error::ManifestParse { .. }));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Contents.json");
        std::fs::write(&path, "not json at all").unwrap();
        let err = read_manifest(&path).unwrap_err();
        assert!(matches!(err, Error::ManifestParse { .. }));
    }

    #[test]
    fn test_absent_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_manifest(&dir.path().join("Contents.json")).unwrap_err();
        assert!(matches!(err, Error::ManifestNotFound { .. }));
    }
}
