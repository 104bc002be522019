//! Error types for the core module.

use std::path::PathBuf;

use thiserror::Error;

use pkgwiz_identity::IdentityError;
use pkgwiz_templates::TreeError;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while creating a package.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Name '{0}' is not a valid package name")]
    InvalidName(String),

    #[error("Name '{0}' is not a valid organization name")]
    InvalidOrganization(String),

    #[error("Package name '{0}' is not a valid complete package name")]
    InvalidCompleteName(String),

    #[error("Package name '{name}' is too long to appear in the editor ({length} characters, limit is {limit})")]
    NameTooLong {
        name: String,
        length: usize,
        limit: usize,
    },

    #[error("{0}")]
    InvalidVersion(String),

    #[error("{field} '{value}' must not contain path separators")]
    InvalidPathValue { field: &'static str, value: String },

    #[error("Could not locate package template at: {0}")]
    TemplateNotFound(PathBuf),

    #[error("Target directory for new package already exists: {0}")]
    TargetExists(PathBuf),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("Git error: {0}")]
    GitError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<IdentityError> for CoreError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidName(name) => Self::InvalidName(name),
            IdentityError::InvalidOrganization(org) => Self::InvalidOrganization(org),
            IdentityError::InvalidCompleteName(name) => Self::InvalidCompleteName(name),
            IdentityError::NameTooLong {
                name,
                length,
                limit,
            } => Self::NameTooLong {
                name,
                length,
                limit,
            },
            other @ (IdentityError::InvalidSemanticVersion(_)
            | IdentityError::InvalidPlatformVersion(_)) => Self::InvalidVersion(other.to_string()),
        }
    }
}

impl CoreError {
    /// True for errors raised before anything was written to disk.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidName(_)
                | Self::InvalidOrganization(_)
                | Self::InvalidCompleteName(_)
                | Self::NameTooLong { .. }
                | Self::InvalidVersion(_)
                | Self::InvalidPathValue { .. }
        )
    }
}
