//! # pkgwiz_core
//!
//! Package creation for pkgwizard.
//!
//! This crate ties identity validation and template materialization together
//! and talks to the outside world through small capability traits.
//!
//! # Architecture
//!
//! - **PackageWizard**: validates a request, materializes the template and
//!   runs the follow-up steps
//! - **PackageRequest**: caller input plus form-level validation
//! - **WizardConfig**: project layout and tool settings from `pkgwizard.yaml`
//! - **RepositoryInitializer**: best-effort repository setup (`git`)
//! - **PackageHost** / **MenuHost**: host environment bindings
//!
//! # Example
//!
//! ```rust,no_run
//! use pkgwiz_core::{PackageRequest, PackageWizard, WizardConfig};
//!
//! let root = std::env::current_dir().unwrap();
//! let config = WizardConfig::load(&root).unwrap();
//! let wizard = PackageWizard::new(&root, config);
//!
//! let request = PackageRequest::new("widgets", "acme", "Acme Widgets")
//!     .with_dependency("com.unity.mathematics", "1.2.6")
//!     .init_repository(false);
//!
//! let path = wizard.create(&request).unwrap();
//! println!("Created {}", path.display());
//! ```

pub mod config;
pub mod error;
pub mod git;
pub mod host;
pub mod request;
pub mod wizard;

// Re-export main types for convenience
pub use config::{GitConfig, WizardConfig, CONFIG_FILE};
pub use error::{CoreError, CoreResult};
pub use git::{GitInitializer, RepositoryInitializer};
pub use host::{
    host_for_command, register_wizard, CommandHost, CreationCommand, LoggingHost, MenuHost,
    PackageHost,
};
pub use request::PackageRequest;
pub use wizard::{general_substitutions, manifest_substitutions, PackageWizard};
