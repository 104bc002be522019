//! Package creation request and its form-level validation.

use serde::{Deserialize, Serialize};

use pkgwiz_identity::{complete_name, validator, ErrorPriority, PlatformVersion, ValidationReport};
use pkgwiz_templates::DependencyEntry;

use crate::error::{CoreError, CoreResult};

/// True if `value` would split a rendered file or directory name.
fn has_path_separator(value: &str) -> bool {
    value.contains(['/', '\\'])
}

/// Everything a caller supplies to create a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRequest {
    pub name: String,
    pub organization: String,
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dependencies: Vec<DependencyEntry>,
    #[serde(default)]
    pub platform_version: Option<PlatformVersion>,
    #[serde(default = "default_init_repository")]
    pub init_repository: bool,
    /// Overrides the `$ASSEMBLY` value when non-empty.
    #[serde(default)]
    pub assembly_prefix: String,
}

fn default_init_repository() -> bool {
    true
}

impl PackageRequest {
    pub fn new(
        name: impl Into<String>,
        organization: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            organization: organization.into(),
            display_name: display_name.into(),
            description: String::new(),
            dependencies: Vec::new(),
            platform_version: None,
            init_repository: default_init_repository(),
            assembly_prefix: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_dependency(mut self, package: impl Into<String>, version: impl Into<String>) -> Self {
        self.dependencies.push(DependencyEntry::new(package, version));
        self
    }

    pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = DependencyEntry>) -> Self {
        self.dependencies.extend(dependencies);
        self
    }

    pub fn with_platform_version(mut self, version: PlatformVersion) -> Self {
        self.platform_version = Some(version);
        self
    }

    pub fn init_repository(mut self, init: bool) -> Self {
        self.init_repository = init;
        self
    }

    pub fn with_assembly_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.assembly_prefix = prefix.into();
        self
    }

    /// `com.<organization>.<name>`, whether valid or not.
    pub fn complete_name(&self) -> String {
        complete_name(&self.name, &self.organization)
    }

    /// Value for `$ASSEMBLY`: the prefix, or the display name without spaces.
    pub fn assembly_name(&self) -> String {
        if self.assembly_prefix.is_empty() {
            self.display_name.replace(' ', "")
        } else {
            self.assembly_prefix.clone()
        }
    }

    /// Reject display name and assembly values that would move rendered
    /// entries out of their directory.
    pub fn check_path_values(&self) -> CoreResult<()> {
        if has_path_separator(&self.display_name) {
            return Err(CoreError::InvalidPathValue {
                field: "Display name",
                value: self.display_name.clone(),
            });
        }
        if has_path_separator(&self.assembly_prefix) {
            return Err(CoreError::InvalidPathValue {
                field: "Assembly prefix",
                value: self.assembly_prefix.clone(),
            });
        }
        Ok(())
    }

    /// Check every field and collect the findings in display order.
    pub fn validate(&self, max_complete_name_length: usize) -> ValidationReport {
        let mut report = ValidationReport::new();

        if self.name.is_empty() {
            report.add_required();
        } else if !validator::validate_name(&self.name) {
            report.add(ErrorPriority::PackageName, "Invalid character in package name");
        }

        if self.organization.is_empty() {
            report.add_required();
        } else if !validator::validate_organization_name(&self.organization) {
            report.add(
                ErrorPriority::PackageOrganization,
                "Invalid character in organization name",
            );
        }

        if self.display_name.is_empty() {
            report.add_required();
        } else if has_path_separator(&self.display_name) {
            report.add(ErrorPriority::PackageName, "Invalid character in display name");
        }

        if has_path_separator(&self.assembly_prefix) {
            report.add(ErrorPriority::PackageName, "Invalid character in assembly prefix");
        }

        if report.is_valid() {
            let complete = self.complete_name();
            if complete.len() > max_complete_name_length {
                report.add(
                    ErrorPriority::PackageName,
                    format!(
                        "Package name '{}' is too long (limit is {} characters)",
                        complete, max_complete_name_length
                    ),
                );
            } else if !validator::validate_complete_name(&complete) {
                report.add(
                    ErrorPriority::PackageName,
                    format!("Invalid package name '{}'", complete),
                );
            }
        }

        for dependency in &self.dependencies {
            if dependency.package.is_empty() {
                report.add_required();
                continue;
            }
            if !dependency.has_valid_package() {
                report.add(
                    ErrorPriority::DependencyName,
                    format!("Invalid dependency package name '{}'", dependency.package),
                );
                continue;
            }
            // The version is only judged once the package name is usable.
            if !dependency.has_valid_version() {
                report.add(
                    ErrorPriority::DependencySemVer,
                    format!("Invalid version '{}'", dependency.version),
                );
            }
        }

        if let Some(version) = &self.platform_version {
            if !version.is_unspecified() && !version.is_valid() {
                report.add(
                    ErrorPriority::PlatformVersion,
                    format!("Invalid minimal Unity version '{}'", version),
                );
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> PackageRequest {
        PackageRequest::new("widgets", "acme", "Acme Widgets")
    }

    #[test]
    fn test_assembly_name_defaults_to_display_name() {
        assert_eq!(valid_request().assembly_name(), "AcmeWidgets");
        assert_eq!(
            valid_request().with_assembly_prefix("Acme.Widgets").assembly_name(),
            "Acme.Widgets"
        );
    }

    #[test]
    fn test_valid_request_has_no_findings() {
        let request = valid_request()
            .with_dependency("com.unity.mathematics", "1.2.6")
            .with_platform_version(PlatformVersion::new("2021", "3", "5f1"));
        assert!(request.validate(50).is_valid());
    }

    #[test]
    fn test_missing_fields_reported_once() {
        let request = PackageRequest::new("", "", "");
        let report = request.validate(50);
        assert_eq!(report.issues().len(), 1);
        assert_eq!(report.top().unwrap().priority, ErrorPriority::RequiredFieldEmpty);
    }

    #[test]
    fn test_name_error_outranks_missing_field() {
        let request = PackageRequest::new("Widgets", "acme", "");
        let report = request.validate(50);
        let top = report.top().unwrap();
        assert_eq!(top.priority, ErrorPriority::PackageName);
        assert_eq!(top.message, "Invalid character in package name");
    }

    #[test]
    fn test_path_separators_in_free_text_rejected() {
        let request = PackageRequest::new("widgets", "acme", "../../../escaped");
        let report = request.validate(50);
        assert_eq!(report.top().unwrap().message, "Invalid character in display name");
        assert!(matches!(
            request.check_path_values(),
            Err(CoreError::InvalidPathValue { field: "Display name", .. })
        ));

        let request = valid_request().with_assembly_prefix("Acme\\Widgets");
        assert_eq!(
            request.validate(50).top().unwrap().message,
            "Invalid character in assembly prefix"
        );
        assert!(request.check_path_values().is_err());

        let request = valid_request().with_assembly_prefix("Acme.Widgets");
        assert!(request.validate(50).is_valid());
        assert!(request.check_path_values().is_ok());
    }

    #[test]
    fn test_too_long_name_reported() {
        let request = PackageRequest::new("x".repeat(46), "myorg", "X");
        let report = request.validate(50);
        assert_eq!(report.top().unwrap().priority, ErrorPriority::PackageName);
        assert!(report.top().unwrap().message.contains("too long"));
    }

    #[test]
    fn test_dependency_findings() {
        let request = valid_request()
            .with_dependency("Com.Bad", "1.0.0")
            .with_dependency("com.good.pkg", "1.0")
            .with_dependency("com.other.pkg", "not-a-version");
        let report = request.validate(50);

        let sorted = report.sorted();
        assert_eq!(sorted.len(), 3);
        assert_eq!(sorted[0].priority, ErrorPriority::DependencyName);
        assert_eq!(sorted[0].message, "Invalid dependency package name 'Com.Bad'");
        assert_eq!(sorted[1].message, "Invalid version '1.0'");
        assert_eq!(sorted[2].message, "Invalid version 'not-a-version'");
    }

    #[test]
    fn test_invalid_dependency_name_skips_version_check() {
        let request = valid_request().with_dependency("BAD", "nope");
        let report = request.validate(50);
        assert_eq!(report.issues().len(), 1);
        assert_eq!(report.top().unwrap().priority, ErrorPriority::DependencyName);
    }

    #[test]
    fn test_platform_version_findings() {
        let blank = valid_request().with_platform_version(PlatformVersion::default());
        assert!(blank.validate(50).is_valid());

        let bad = valid_request().with_platform_version(PlatformVersion::new("21", "3", ""));
        let report = bad.validate(50);
        assert_eq!(report.top().unwrap().priority, ErrorPriority::PlatformVersion);
    }

    #[test]
    fn test_request_from_json_defaults() {
        let request: PackageRequest = serde_json::from_str(
            r#"{"name": "widgets", "organization": "acme", "display_name": "Acme Widgets"}"#,
        )
        .unwrap();
        assert!(request.init_repository);
        assert!(request.dependencies.is_empty());
        assert_eq!(request, valid_request());
    }
}
