//! # iconsmith
//!
//! Manifest-driven app-icon generation.
//!
//! Give it one square source image and an asset-catalog manifest
//! (`Contents.json`) enumerating required sizes and scale factors; it
//! resamples the source to every listed rendition with a Lanczos filter,
//! writes the PNG files, and rewrites the manifest to record the generated
//! filenames.
//!
//! ## Pipeline
//!
//! `(source image, manifest path)` → manifest reader → batch generator
//! (per entry: dimension parse → resample → PNG encode → write) → manifest
//! writer. Entries are independent and fan out to workers; outcome slots
//! stay index-aligned with the manifest, so parallelism never reorders
//! results.
//!
//! ## Usage
//!
//! ```bash
//! iconsmith icon.png /path/to/MyProject
//! iconsmith icon.png /path/to/MyProject --crop --fail-fast
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod cli;
pub mod encode;
pub mod error;
pub mod generate;
pub mod geometry;
pub mod manifest;
pub mod resample;
pub mod sink;
pub mod source;

// Re-export main types for public API
pub use encode::encode_png;
pub use error::{Context, Error, ErrorExt, Result};
pub use generate::{
    BatchGenerator, BatchReport, BatchStatus, EntrySlot, FailurePolicy, GeneratedIcon,
    SlotOutcome, icon_filename,
};
pub use geometry::{ScaleFactor, TargetDimensions};
pub use manifest::{AppIdentity, IconSpec, Manifest, ManifestInfo, read_manifest};
pub use sink::{ArtifactSink, FsSink, MemorySink};
pub use source::load_source_image;
