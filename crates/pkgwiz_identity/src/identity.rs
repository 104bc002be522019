//! Validated package identity.

use std::fmt;

use serde::Serialize;

use crate::error::{IdentityError, IdentityResult};
use crate::validator;

/// Longest complete name the host can display in its package list.
pub const DEFAULT_MAX_COMPLETE_NAME_LENGTH: usize = 50;

/// A package identity whose parts and complete name have all been validated.
///
/// The only way to obtain one is through [`PackageIdentity::new`] or
/// [`PackageIdentity::with_limit`]; the fields are read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageIdentity {
    name: String,
    organization: String,
    complete_name: String,
}

impl PackageIdentity {
    /// Build an identity using the default display limit.
    pub fn new(name: &str, organization: &str) -> IdentityResult<Self> {
        Self::with_limit(name, organization, DEFAULT_MAX_COMPLETE_NAME_LENGTH)
    }

    /// Build an identity, rejecting complete names longer than `max_length`.
    ///
    /// The complete name is re-checked against its own grammar even though
    /// both parts already passed theirs.
    pub fn with_limit(name: &str, organization: &str, max_length: usize) -> IdentityResult<Self> {
        if !validator::validate_name(name) {
            return Err(IdentityError::InvalidName(name.to_string()));
        }
        if !validator::validate_organization_name(organization) {
            return Err(IdentityError::InvalidOrganization(organization.to_string()));
        }

        let complete_name = complete_name(name, organization);
        if complete_name.len() > max_length {
            return Err(IdentityError::NameTooLong {
                length: complete_name.len(),
                name: complete_name,
                limit: max_length,
            });
        }
        if !validator::validate_complete_name(&complete_name) {
            return Err(IdentityError::InvalidCompleteName(complete_name));
        }

        Ok(Self {
            name: name.to_string(),
            organization: organization.to_string(),
            complete_name,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    /// The fully qualified `com.<organization>.<name>` form.
    pub fn complete_name(&self) -> &str {
        &self.complete_name
    }
}

impl fmt::Display for PackageIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.complete_name)
    }
}

/// Join an organization and a name into `com.<organization>.<name>`.
pub fn complete_name(name: &str, organization: &str) -> String {
    format!("com.{}.{}", organization, name)
}
