//! Error types for template materialization.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors that can occur while materializing a template tree.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Could not locate package template at: {0}")]
    TemplateMissing(PathBuf),

    #[error("Target directory for new package already exists: {0}")]
    TargetAlreadyExists(PathBuf),

    #[error("Rendered name '{name}' for {path} is not a plain file name")]
    UnsafeName { path: PathBuf, name: String },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TreeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The offending path, for I/O failures and rejected names.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Io { path, .. } | Self::UnsafeName { path, .. } => Some(path),
            _ => None,
        }
    }
}
