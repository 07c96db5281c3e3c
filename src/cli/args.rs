//! Command line argument parsing and validation.
//!
//! The tool is designed to "just work": point it at a source image and a
//! project root, and it generates every rendition the asset catalog's
//! manifest asks for.

use clap::Parser;
use std::path::PathBuf;

/// Well-known asset-catalog subpath beneath the project root.
pub const DEFAULT_CATALOG_DIR: &str = "Assets.xcassets/AppIcon.appiconset";

/// Manifest filename inside the catalog directory.
pub const MANIFEST_FILENAME: &str = "Contents.json";

/// Generate a complete app-icon set from a single source image
#[derive(Parser, Debug)]
#[command(
    name = "iconsmith",
    version,
    about = "Generate a complete app-icon set from a single source image",
    long_about = "Reads the icon manifest (Contents.json) beneath a project root, \
generates every listed rendition from one source image, and rewrites the \
manifest with the generated filenames.

Usage:
  iconsmith icon.png /path/to/MyProject
  iconsmith icon.png /path/to/MyProject --catalog-dir Art/Icons.appiconset
  iconsmith icon.png /path/to/MyProject --crop --fail-fast"
)]
pub struct Args {
    /// Source image file (PNG or JPEG, ideally square)
    #[arg(index = 1, value_name = "IMAGE")]
    pub image: PathBuf,

    /// Project root containing the icon asset catalog
    #[arg(index = 2, value_name = "PROJECT_ROOT")]
    pub project_root: PathBuf,

    /// Asset-catalog directory, relative to the project root
    #[arg(long, value_name = "DIR", default_value = DEFAULT_CATALOG_DIR)]
    pub catalog_dir: PathBuf,

    /// Center-crop a non-square source image before scaling
    #[arg(long)]
    pub crop: bool,

    /// Abort the whole batch on the first failing entry
    #[arg(long)]
    pub fail_fast: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Show per-entry detail
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The resolved catalog directory (icons and manifest live here).
    pub fn catalog_path(&self) -> PathBuf {
        self.project_root.join(&self.catalog_dir)
    }

    /// The resolved manifest path.
    pub fn manifest_path(&self) -> PathBuf {
        self.catalog_path().join(MANIFEST_FILENAME)
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.catalog_dir.is_absolute() {
            return Err(format!(
                "--catalog-dir must be relative to the project root, got {}",
                self.catalog_dir.display()
            ));
        }

        Ok(())
    }
}
