//! Grammar checks for package names, organizations and versions.
//!
//! Every function here is total: a string that does not match is a normal
//! `false`/`None` result, never an error.

use std::sync::OnceLock;

use regex::Regex;

use crate::version::SemanticVersion;

fn complete_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-._]{0,213}$").unwrap())
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-._]{0,112}$").unwrap())
}

fn organization_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-_]{0,99}$").unwrap())
}

/// Semantic versioning 2.0.0 grammar with named numeric components.
fn semver_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<major>0|[1-9][0-9]*)\.(?P<minor>0|[1-9][0-9]*)\.(?P<patch>0|[1-9][0-9]*)",
            r"(?:-(?P<prerelease>(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)",
            r"(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?",
            r"(?:\+(?P<build>[0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
        ))
        .unwrap()
    })
}

fn platform_major_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[1-9][0-9]{3}$").unwrap())
}

fn platform_minor_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[1-9]$").unwrap())
}

fn platform_release_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(0|[1-9][0-9]*)[abfp](0|[1-9][0-9]*)$").unwrap())
}

/// Check a package name such as `widgets` or `core.runtime`.
pub fn validate_name(name: &str) -> bool {
    !name.is_empty() && name_pattern().is_match(name)
}

/// Check an organization name. Dots are not allowed.
pub fn validate_organization_name(organization: &str) -> bool {
    !organization.is_empty() && organization_pattern().is_match(organization)
}

/// Check a fully qualified package name such as `com.acme.widgets`.
pub fn validate_complete_name(complete_name: &str) -> bool {
    !complete_name.is_empty() && complete_name_pattern().is_match(complete_name)
}

/// Parse a semantic version, returning its components on success.
pub fn validate_semantic_version(version: &str) -> Option<SemanticVersion> {
    let caps = semver_pattern().captures(version)?;

    // Components that overflow u64 match the grammar but cannot be represented.
    let major = caps["major"].parse().ok()?;
    let minor = caps["minor"].parse().ok()?;
    let patch = caps["patch"].parse().ok()?;

    Some(SemanticVersion {
        major,
        minor,
        patch,
        prerelease: caps.name("prerelease").map(|m| m.as_str().to_string()),
        build: caps.name("build").map(|m| m.as_str().to_string()),
    })
}

/// Convenience form of [`validate_semantic_version`].
pub fn is_semantic_version(version: &str) -> bool {
    validate_semantic_version(version).is_some()
}

/// Check a platform version triple.
///
/// Major and minor are mandatory. The release part is only checked when it
/// is present and non-empty.
pub fn validate_platform_version(major: &str, minor: &str, release: Option<&str>) -> bool {
    platform_major_pattern().is_match(major)
        && platform_minor_pattern().is_match(minor)
        && release.map_or(true, |r| r.is_empty() || platform_release_pattern().is_match(r))
}

/// Check a dotted platform version such as `2021.3` or `2021.3.5f1`.
pub fn validate_platform_version_str(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    match parts.as_slice() {
        [major, minor] => validate_platform_version(major, minor, None),
        [major, minor, release] => validate_platform_version(major, minor, Some(release)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["widgets", "0day", "core.runtime", "my_pkg-2", "a"] {
            assert!(validate_name(name), "expected '{}' to be valid", name);
        }
        assert!(validate_name(&"a".repeat(113)));
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "Widgets", "my pkg", "-widgets", ".widgets", "wid$gets"] {
            assert!(!validate_name(name), "expected '{}' to be invalid", name);
        }
        assert!(!validate_name(&"a".repeat(114)));
    }

    #[test]
    fn test_organization_rejects_dots() {
        assert!(validate_organization_name("acme"));
        assert!(validate_organization_name("acme-games_2"));
        assert!(!validate_organization_name("acme.games"));
        assert!(!validate_organization_name("Acme"));
        assert!(!validate_organization_name(""));
        assert!(!validate_organization_name(&"a".repeat(101)));
    }

    #[test]
    fn test_complete_name() {
        assert!(validate_complete_name("com.acme.foo"));
        assert!(!validate_complete_name("com.acme.Foo"));
        assert!(!validate_complete_name(""));
        assert!(!validate_complete_name(&"a".repeat(215)));
    }

    #[test]
    fn test_semantic_version_components() {
        let version = validate_semantic_version("1.22.333").unwrap();
        assert_eq!((version.major, version.minor, version.patch), (1, 22, 333));
        assert_eq!(version.prerelease, None);
        assert_eq!(version.build, None);

        let version = validate_semantic_version("2.0.0-preview.3+build.7").unwrap();
        assert_eq!(version.prerelease.as_deref(), Some("preview.3"));
        assert_eq!(version.build.as_deref(), Some("build.7"));
    }

    #[test]
    fn test_semantic_version_rejections() {
        for version in ["", "1.0", "01.0.0", "1.0.0-", "1.0.0+", "v1.0.0", "1.0.0-01"] {
            assert!(validate_semantic_version(version).is_none(), "{}", version);
        }
        assert!(validate_semantic_version("99999999999999999999.0.0").is_none());
    }

    #[test]
    fn test_platform_version() {
        assert!(validate_platform_version("2021", "3", None));
        assert!(validate_platform_version("2021", "3", Some("")));
        assert!(validate_platform_version("2021", "3", Some("5f1")));
        assert!(validate_platform_version("2022", "1", Some("0b12")));
        assert!(!validate_platform_version("", "3", None));
        assert!(!validate_platform_version("2021", "", None));
        assert!(!validate_platform_version("999", "3", None));
        assert!(!validate_platform_version("2021", "10", None));
        assert!(!validate_platform_version("2021", "3", Some("5x1")));
        assert!(!validate_platform_version("2021", "3", Some("05f1")));
    }

    #[test]
    fn test_platform_version_str() {
        assert!(validate_platform_version_str("2021.3"));
        assert!(validate_platform_version_str("2021.3.5f1"));
        assert!(!validate_platform_version_str("2021"));
        assert!(!validate_platform_version_str("2021.3.5f1.2"));
    }
}
