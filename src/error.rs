//! Error types for icon generation.
//!
//! One error enum covers the whole pipeline. Manifest-level failures
//! (`ManifestNotFound`, `ManifestParse`) abort the run before any entry is
//! processed; everything raised while rendering a single manifest entry is
//! caught by the batch generator and recorded in that entry's slot instead
//! of propagating.
//!
//! The [`Context`] and [`ErrorExt`] traits and the [`bail!`] macro provide
//! the plumbing for attaching operation and path context as errors bubble
//! up.

use std::{fmt::Display, io, path::PathBuf};
use thiserror::Error as DeriveError;

/// Errors returned by the icon pipeline.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "reading manifest")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// No manifest file exists at the resolved catalog path.
    #[error("manifest not found: {path}")]
    ManifestNotFound {
        /// Path that was checked
        path: PathBuf,
    },

    /// The manifest file is not valid JSON, or lacks an `images` array.
    #[error("cannot parse manifest {path}: {reason}")]
    ManifestParse {
        /// Path of the offending manifest
        path: PathBuf,
        /// What the JSON parser rejected
        reason: String,
    },

    /// A size or scale string could not be turned into target dimensions.
    #[error("cannot parse dimensions from {input:?}: {reason}")]
    DimensionParse {
        /// The offending size or scale string
        input: String,
        /// What was wrong with it
        reason: &'static str,
    },

    /// The source image file could not be opened or decoded.
    #[error("cannot read source image {path}: {error}")]
    SourceImageUnreadable {
        /// Path of the source image
        path: PathBuf,
        /// The underlying decode error
        error: image::ImageError,
    },

    /// Resampling could not produce an output raster.
    #[error("resampling to {width}x{height} failed: {reason}")]
    Resample {
        /// Target width in pixels
        width: u32,
        /// Target height in pixels
        height: u32,
        /// Why the resample was rejected
        reason: String,
    },

    /// The resampled raster could not be serialized to PNG.
    #[error("PNG encoding failed: {0}")]
    Encode(#[source] image::ImageError),

    /// An artifact or manifest could not be written to disk.
    #[error("cannot write {path}: {error}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Generic I/O error.
    #[error("{0}")]
    Io(#[from] io::Error),

    /// Image processing error without a more specific home.
    #[error("{0}")]
    Image(#[from] image::ImageError),

    /// JSON serialization/deserialization error.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    Generic(String),
}

impl Error {
    /// Actionable hints rendered alongside fatal errors.
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            Error::ManifestNotFound { path } => vec![
                format!("Check that {} exists", path.display()),
                "Pass --catalog-dir if the icon set lives somewhere other than \
                 Assets.xcassets/AppIcon.appiconset"
                    .to_string(),
            ],
            Error::ManifestParse { .. } => vec![
                "The manifest must be a JSON object with an \"images\" array".to_string(),
                "Regenerate the file from your asset catalog editor if it was hand-edited"
                    .to_string(),
            ],
            Error::SourceImageUnreadable { .. } => vec![
                "Use a PNG or JPEG source image".to_string(),
                "Verify the file opens in an image viewer".to_string(),
            ],
            _ => vec![],
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Works with both `Result<T>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::Generic(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::Generic(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the
    /// operation, e.g., "reading manifest", "creating output directory".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with error.
///
/// Converts the message into an [`Error::Generic`] and returns immediately.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::error::Error::Generic($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::error::Error::Generic($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::error::Error::Generic(format!($fmt, $($arg)*)))
    };
}
