//! Semantic and platform version value objects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IdentityError, IdentityResult};
use crate::validator;

/// A parsed semantic version such as `1.4.0-preview.2+build.9`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

impl SemanticVersion {
    /// Parse a version string, failing on anything outside the semver grammar.
    pub fn parse(version: &str) -> IdentityResult<Self> {
        validator::validate_semantic_version(version)
            .ok_or_else(|| IdentityError::InvalidSemanticVersion(version.to_string()))
    }
}

impl FromStr for SemanticVersion {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

/// Minimum host version a package declares, e.g. `2021.3.5f1`.
///
/// Each part is kept as entered and may be empty. A version with an empty
/// part is still representable so that callers can report on it, but it
/// contributes nothing to a generated manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformVersion {
    pub major: String,
    pub minor: String,
    pub release: String,
}

impl PlatformVersion {
    pub fn new(
        major: impl Into<String>,
        minor: impl Into<String>,
        release: impl Into<String>,
    ) -> Self {
        Self {
            major: major.into(),
            minor: minor.into(),
            release: release.into(),
        }
    }

    /// Parse `major.minor` or `major.minor.release`, validating every part.
    pub fn parse(version: &str) -> IdentityResult<Self> {
        if !validator::validate_platform_version_str(version) {
            return Err(IdentityError::InvalidPlatformVersion(version.to_string()));
        }

        let mut parts = version.split('.');
        let major = parts.next().unwrap_or_default();
        let minor = parts.next().unwrap_or_default();
        let release = parts.next().unwrap_or_default();
        Ok(Self::new(major, minor, release))
    }

    /// True when major, minor and release are all non-empty.
    pub fn is_fully_specified(&self) -> bool {
        !self.major.is_empty() && !self.minor.is_empty() && !self.release.is_empty()
    }

    /// True when nothing at all was entered.
    pub fn is_unspecified(&self) -> bool {
        self.major.is_empty() && self.minor.is_empty() && self.release.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        validator::validate_platform_version(&self.major, &self.minor, Some(&self.release))
    }
}

impl FromStr for PlatformVersion {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.release)
    }
}
