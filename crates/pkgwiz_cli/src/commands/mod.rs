//! CLI command definitions.
//!
//! This module defines the command structure for the pkgwizard CLI and the
//! arguments shared between commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use pkgwiz_core::{PackageRequest, WizardConfig};
use pkgwiz_identity::PlatformVersion;
use pkgwiz_templates::DependencyEntry;

pub mod config;
pub mod create;
pub mod validate;

/// pkgwizard - create packages from a template
#[derive(Parser)]
#[command(name = "pkgwiz")]
#[command(version, about = "pkgwizard - create packages from a template")]
#[command(long_about = r#"
pkgwizard creates a new package in a project's Packages directory from a
template tree. Placeholders ($PACKAGE, $ORGANIZATION, $DISPLAY_NAME,
$DESCRIPTION, $DEPENDENCIES, $UNITY_VERSION, $ASSEMBLY) are replaced in the
contents and names of files ending in .template and in directory names.

COMMANDS:
  create    → Create a new package (optionally with a git repository)
  validate  → Check package details without creating anything
  config    → Print the effective configuration

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
  4 - Template error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new package from the template
    Create(create::CreateArgs),

    /// Validate package details without creating anything
    Validate(validate::ValidateArgs),

    /// Print the effective configuration as YAML
    Config(config::ConfigArgs),
}

/// Where the project lives and how it is laid out.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root (defaults to the current directory)
    #[arg(long, env = "PKGWIZ_PROJECT")]
    pub project: Option<PathBuf>,

    /// Configuration file (defaults to <project>/pkgwizard.yaml)
    #[arg(long, env = "PKGWIZ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory new packages are created in
    #[arg(long)]
    pub packages_dir: Option<PathBuf>,

    /// Package template directory
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
}

impl ProjectArgs {
    pub fn project_root(&self) -> Result<PathBuf> {
        match &self.project {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().context("Failed to determine current directory"),
        }
    }

    /// Load the configuration and apply command-line overrides.
    pub fn load(&self) -> Result<(PathBuf, WizardConfig)> {
        let root = self.project_root()?;
        let mut config = match &self.config {
            Some(path) => WizardConfig::from_file(path)
                .with_context(|| format!("Failed to load configuration {:?}", path))?,
            None => WizardConfig::load(&root).context("Failed to load configuration")?,
        };

        if let Some(dir) = &self.packages_dir {
            config.packages_dir = dir.clone();
        }
        if let Some(dir) = &self.template_dir {
            config.template_dir = dir.clone();
        }

        Ok((root, config))
    }
}

/// Package details, as the creation form would collect them.
#[derive(Args, Debug, Clone)]
pub struct PackageArgs {
    /// Package name (e.g. widgets)
    #[arg(short, long)]
    pub name: String,

    /// Organization name (e.g. acme)
    #[arg(short, long)]
    pub organization: String,

    /// Human readable name (e.g. "Acme Widgets")
    #[arg(short, long)]
    pub display_name: String,

    /// Package description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Dependency as <package>@<version>; repeat for more
    #[arg(long = "dependency", value_name = "PACKAGE@VERSION")]
    pub dependencies: Vec<DependencyEntry>,

    /// JSON file holding a list of {"package", "version"} objects
    #[arg(long)]
    pub dependencies_file: Option<PathBuf>,

    /// Minimal Unity version (e.g. 2021.3 or 2021.3.5f1)
    #[arg(long, value_name = "VERSION")]
    pub unity: Option<PlatformVersion>,

    /// Assembly definition prefix (defaults to the display name without spaces)
    #[arg(long, default_value = "")]
    pub assembly_prefix: String,
}

impl PackageArgs {
    /// Build the request. Dependencies from a file come before `--dependency` ones.
    pub fn to_request(&self, init_repository: bool) -> Result<PackageRequest> {
        let mut dependencies = Vec::new();
        if let Some(path) = &self.dependencies_file {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read dependencies file {:?}", path))?;
            let entries: Vec<DependencyEntry> = serde_json::from_str(&content)
                .with_context(|| format!("Invalid dependencies file {:?}", path))?;
            dependencies.extend(entries);
        }
        dependencies.extend(self.dependencies.iter().cloned());

        let mut request = PackageRequest::new(&self.name, &self.organization, &self.display_name)
            .with_description(&self.description)
            .with_dependencies(dependencies)
            .with_assembly_prefix(&self.assembly_prefix)
            .init_repository(init_repository);
        if let Some(version) = &self.unity {
            request = request.with_platform_version(version.clone());
        }
        Ok(request)
    }
}

/// Input rejected by form validation; carries the top finding.
#[derive(Error, Debug)]
#[error("validation failed: {0}")]
pub struct ValidationFailed(pub String);

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "pkgwiz",
            "create",
            "--name",
            "widgets",
            "--organization",
            "acme",
            "--display-name",
            "Acme Widgets",
            "--dependency",
            "com.unity.mathematics@1.2.6",
            "--dependency",
            "com.acme.core@2.0.0",
            "--unity",
            "2021.3.5f1",
            "--no-git",
        ])
        .unwrap();

        let Commands::Create(args) = cli.command else {
            panic!("expected create command");
        };
        assert!(args.no_git);
        let request = args.package.to_request(!args.no_git).unwrap();
        assert_eq!(request.complete_name(), "com.acme.widgets");
        assert_eq!(request.dependencies.len(), 2);
        assert_eq!(request.dependencies[0].package, "com.unity.mathematics");
        assert_eq!(
            request.platform_version,
            Some(PlatformVersion::new("2021", "3", "5f1"))
        );
        assert!(!request.init_repository);
    }

    #[test]
    fn test_rejects_malformed_values() {
        assert!(Cli::try_parse_from([
            "pkgwiz", "validate", "-n", "w", "-o", "a", "-d", "W", "--dependency", "nope",
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "pkgwiz", "validate", "-n", "w", "-o", "a", "-d", "W", "--unity", "21.3",
        ])
        .is_err());
    }

    #[test]
    fn test_dependencies_file_comes_first() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("deps.json");
        fs::write(&file, r#"[{"package": "com.a.first", "version": "1.0.0"}]"#).unwrap();

        let cli = Cli::try_parse_from([
            "pkgwiz",
            "validate",
            "-n",
            "widgets",
            "-o",
            "acme",
            "-d",
            "Widgets",
            "--dependency",
            "com.b.second@2.0.0",
            "--dependencies-file",
            file.to_str().unwrap(),
        ])
        .unwrap();

        let Commands::Validate(args) = cli.command else {
            panic!("expected validate command");
        };
        let request = args.package.to_request(false).unwrap();
        let names: Vec<_> = request.dependencies.iter().map(|d| d.package.as_str()).collect();
        assert_eq!(names, vec!["com.a.first", "com.b.second"]);
    }
}
