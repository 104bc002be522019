//! Manifest fragments spliced into the package manifest template.
//!
//! The fragments are not standalone JSON. Each one either is empty or ends
//! with a trailing comma, so that the manifest template can place
//! `$DEPENDENCIES` and `$UNITY_VERSION` on their own lines ahead of other keys
//! and stay valid whether or not the fragment is present.

use std::fmt::Write as _;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use pkgwiz_identity::{validator, PlatformVersion};

/// One `"package": "version"` entry of the manifest's dependency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEntry {
    pub package: String,
    pub version: String,
}

impl DependencyEntry {
    pub fn new(package: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
        }
    }

    pub fn has_valid_package(&self) -> bool {
        validator::validate_complete_name(&self.package)
    }

    pub fn has_valid_version(&self) -> bool {
        validator::is_semantic_version(&self.version)
    }
}

impl FromStr for DependencyEntry {
    type Err = String;

    /// Parse the `package@version` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('@') {
            Some((package, version)) if !package.is_empty() && !version.is_empty() => {
                Ok(Self::new(package.trim(), version.trim()))
            }
            _ => Err(format!("expected <package>@<version>, got '{}'", s)),
        }
    }
}

/// Build the `"dependencies"` block, or an empty string when there are none.
///
/// Entries appear in input order, one per line.
pub fn build_dependency_fragment(entries: &[DependencyEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut fragment = String::from("\"dependencies\": {\n");
    for (i, entry) in entries.iter().enumerate() {
        let _ = write!(fragment, "    \"{}\": \"{}\"", entry.package, entry.version);
        if i != entries.len() - 1 {
            fragment.push(',');
        }
        fragment.push('\n');
    }
    fragment.push_str("  },");
    fragment
}

/// Build the `"unity"`/`"unityRelease"` lines, or an empty string unless all
/// three parts of the version are present.
pub fn build_platform_version_fragment(version: Option<&PlatformVersion>) -> String {
    match version {
        Some(v) if v.is_fully_specified() => format!(
            "\"unity\": \"{}.{}\",\n  \"unityRelease\": \"{}\",",
            v.major, v.minor, v.release
        ),
        _ => String::new(),
    }
}
