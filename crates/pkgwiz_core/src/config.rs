//! Wizard configuration.
//!
//! Read from `pkgwizard.yaml` at the project root when present. Every field
//! has a default, so a partial file (or none at all) is fine. Relative paths
//! resolve against the project root.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use pkgwiz_identity::DEFAULT_MAX_COMPLETE_NAME_LENGTH;
use pkgwiz_templates::{DEFAULT_MANIFEST_FILE, DEFAULT_TEMPLATE_MARKER};

use crate::error::{CoreError, CoreResult};

/// Configuration file name looked up in the project root.
pub const CONFIG_FILE: &str = "pkgwizard.yaml";

/// Git settings used when initializing a new package repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub executable: String,
    pub commit_message: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            executable: "git".to_string(),
            commit_message: "Initial commit".to_string(),
        }
    }
}

/// Top-level wizard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Directory new packages are created in.
    pub packages_dir: PathBuf,
    /// Root of the package template.
    pub template_dir: PathBuf,
    /// Suffix of files that must be rendered.
    pub template_marker: String,
    /// Manifest template at the template root.
    pub manifest_file: String,
    /// Longest complete package name accepted.
    pub max_complete_name_length: usize,
    pub git: GitConfig,
    /// Program and arguments run to make the host refresh its package graph.
    /// Empty means the request is only logged.
    pub resolve_command: Vec<String>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            packages_dir: PathBuf::from("Packages"),
            template_dir: PathBuf::from("Packages/com.pkgwizard/Template~/com.$ORGANIZATION.$PACKAGE"),
            template_marker: DEFAULT_TEMPLATE_MARKER.to_string(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            max_complete_name_length: DEFAULT_MAX_COMPLETE_NAME_LENGTH,
            git: GitConfig::default(),
            resolve_command: Vec::new(),
        }
    }
}

impl WizardConfig {
    /// Load `pkgwizard.yaml` from `project_root`, or defaults if it is absent.
    pub fn load(project_root: &Path) -> CoreResult<Self> {
        let path = project_root.join(CONFIG_FILE);
        if !path.exists() {
            debug!("No {} in {:?}, using defaults", CONFIG_FILE, project_root);
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Load a configuration file.
    pub fn from_file(path: &Path) -> CoreResult<Self> {
        debug!("Loading configuration from {:?}", path);
        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> CoreResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject settings that would make every creation fail.
    pub fn validate(&self) -> CoreResult<()> {
        if self.template_marker.is_empty() {
            return Err(CoreError::Config("template_marker must not be empty".to_string()));
        }
        if !self.manifest_file.ends_with(&self.template_marker) {
            return Err(CoreError::Config(format!(
                "manifest_file '{}' must end with the template marker '{}'",
                self.manifest_file, self.template_marker
            )));
        }
        if self.max_complete_name_length == 0 {
            return Err(CoreError::Config(
                "max_complete_name_length must be greater than zero".to_string(),
            ));
        }
        if self.git.executable.is_empty() {
            return Err(CoreError::Config("git.executable must not be empty".to_string()));
        }
        Ok(())
    }

    /// Absolute packages directory for `project_root`.
    pub fn packages_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.packages_dir)
    }

    /// Absolute template directory for `project_root`.
    pub fn template_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.template_dir)
    }
}
