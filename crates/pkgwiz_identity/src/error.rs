//! Error types for package identities.

use thiserror::Error;

/// Result type alias for identity operations.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Errors that can occur while building a package identity or parsing a version.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Name '{0}' is not a valid package name")]
    InvalidName(String),

    #[error("Name '{0}' is not a valid organization name")]
    InvalidOrganization(String),

    #[error("Package name '{0}' is not a valid complete package name")]
    InvalidCompleteName(String),

    #[error(
        "Package name '{name}' is too long to appear in the editor ({length} characters, limit is {limit})"
    )]
    NameTooLong {
        name: String,
        length: usize,
        limit: usize,
    },

    #[error("Version '{0}' is not a valid semantic version")]
    InvalidSemanticVersion(String),

    #[error("Version '{0}' is not a valid platform version")]
    InvalidPlatformVersion(String),
}
