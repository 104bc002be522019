//! # pkgwiz_templates
//!
//! Template rendering and package tree materialization for pkgwizard.
//!
//! A package template is an ordinary directory tree whose contents, file
//! names and directory names carry `$TOKEN` placeholders. This crate:
//!
//! - Renders text through an ordered set of literal substitutions
//! - Copies a template tree (never its `.git` directory) and renders it in place
//! - Builds the dependency and platform-version fragments spliced into the
//!   package manifest
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use pkgwiz_templates::{placeholders, Substitutions, TreeMaterializer};
//!
//! let subs = Substitutions::new()
//!     .with(placeholders::PACKAGE, "widgets")
//!     .with(placeholders::ORGANIZATION, "acme");
//!
//! let report = TreeMaterializer::new()
//!     .materialize(
//!         Path::new("Template~/com.$ORGANIZATION.$PACKAGE"),
//!         Path::new("Packages/com.acme.widgets"),
//!         &subs,
//!     )
//!     .unwrap();
//! println!("{} files copied", report.copied_files);
//! ```

pub mod error;
pub mod manifest;
pub mod materializer;
pub mod renderer;

pub use error::{TreeError, TreeResult};
pub use manifest::{build_dependency_fragment, build_platform_version_fragment, DependencyEntry};
pub use materializer::{
    is_plain_name, ManifestTemplate, MaterializeReport, TreeMaterializer, DEFAULT_MANIFEST_FILE,
    DEFAULT_TEMPLATE_MARKER,
};
pub use renderer::{placeholders, Substitutions};
