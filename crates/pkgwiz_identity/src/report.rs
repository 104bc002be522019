//! Ordered validation findings for package creation input.

use serde::Serialize;

/// Display priority of a finding. Lower variants are shown first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ErrorPriority {
    PackageName,
    PackageOrganization,
    DependencyName,
    DependencySemVer,
    PlatformVersion,
    RequiredFieldEmpty,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub priority: ErrorPriority,
    pub message: String,
}

/// Findings collected by one validation pass.
///
/// A fresh report is produced for every pass; nothing is shared between
/// passes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finding. Only one `RequiredFieldEmpty` finding is kept.
    pub fn add(&mut self, priority: ErrorPriority, message: impl Into<String>) {
        if priority == ErrorPriority::RequiredFieldEmpty
            && self.issues.iter().any(|i| i.priority == priority)
        {
            return;
        }
        self.issues.push(ValidationIssue {
            priority,
            message: message.into(),
        });
    }

    pub fn add_required(&mut self) {
        self.add(ErrorPriority::RequiredFieldEmpty, "*Required");
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// The finding to show the user: lowest priority value, earliest first.
    pub fn top(&self) -> Option<&ValidationIssue> {
        self.issues.iter().min_by_key(|i| i.priority)
    }

    /// All findings in priority order, ties kept in insertion order.
    pub fn sorted(&self) -> Vec<&ValidationIssue> {
        let mut issues: Vec<_> = self.issues.iter().collect();
        issues.sort_by_key(|i| i.priority);
        issues
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn merge(&mut self, other: ValidationReport) {
        for issue in other.issues {
            self.add(issue.priority, issue.message);
        }
    }
}
