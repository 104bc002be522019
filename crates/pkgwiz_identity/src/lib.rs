//! # pkgwiz_identity
//!
//! Package identity and version grammars for pkgwizard.
//!
//! This crate holds the pure, dependency-free half of package creation:
//!
//! - **Validators**: total grammar checks for names, organizations, complete
//!   names, semantic versions and platform versions
//! - **PackageIdentity**: the only way to obtain a validated
//!   `com.<organization>.<name>` identity
//! - **Versions**: `SemanticVersion` and `PlatformVersion` value objects
//! - **Reports**: ordered validation findings for input forms
//!
//! ## Example
//!
//! ```rust
//! use pkgwiz_identity::{validator, PackageIdentity};
//!
//! assert!(validator::validate_complete_name("com.acme.widgets"));
//!
//! let identity = PackageIdentity::new("widgets", "acme").unwrap();
//! assert_eq!(identity.complete_name(), "com.acme.widgets");
//! ```

pub mod error;
pub mod identity;
pub mod report;
pub mod validator;
pub mod version;

pub use error::{IdentityError, IdentityResult};
pub use identity::{complete_name, PackageIdentity, DEFAULT_MAX_COMPLETE_NAME_LENGTH};
pub use report::{ErrorPriority, ValidationIssue, ValidationReport};
pub use version::{PlatformVersion, SemanticVersion};
