//! Repository initialization for new packages.
//!
//! Runs `git init .`, `git add .` and `git commit -m <message>` in the new
//! package directory, one after the other. Every step runs even when an
//! earlier one failed. Each step blocks until the process exits; there is no
//! timeout.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info, warn};

use crate::config::GitConfig;
use crate::error::{CoreError, CoreResult};

/// Turns a freshly created package directory into a repository.
#[cfg_attr(test, mockall::automock)]
pub trait RepositoryInitializer {
    fn initialize(&self, path: &Path) -> CoreResult<()>;
}

/// Initializer backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitInitializer {
    executable: String,
    commit_message: String,
}

impl Default for GitInitializer {
    fn default() -> Self {
        Self::from_config(&GitConfig::default())
    }
}

impl GitInitializer {
    pub fn from_config(config: &GitConfig) -> Self {
        Self {
            executable: config.executable.clone(),
            commit_message: config.commit_message.clone(),
        }
    }

    /// Check if the executable can be run at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    fn run(&self, path: &Path, args: &[&str]) -> CoreResult<()> {
        debug!("Running {} {} in {}", self.executable, args.join(" "), path.display());

        let output = Command::new(&self.executable)
            .args(args)
            .current_dir(path)
            .output()
            .map_err(|e| {
                CoreError::GitError(format!("Failed to run {} {}: {}", self.executable, args[0], e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CoreError::GitError(format!(
                "{} {} failed: {}",
                self.executable,
                args[0],
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl RepositoryInitializer for GitInitializer {
    /// Runs all steps and reports the first failure.
    fn initialize(&self, path: &Path) -> CoreResult<()> {
        info!("Initializing Git repository at {}", path.display());

        let steps: [&[&str]; 3] = [
            &["init", "."],
            &["add", "."],
            &["commit", "-m", self.commit_message.as_str()],
        ];

        let mut first_error = None;
        for args in steps {
            if let Err(e) = self.run(path, args) {
                warn!("{}", e);
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_executable_is_error() {
        let git = GitInitializer::from_config(&GitConfig {
            executable: "pkgwiz-no-such-git".to_string(),
            ..Default::default()
        });
        let temp_dir = TempDir::new().unwrap();

        assert!(!git.is_available());
        assert!(matches!(
            git.initialize(temp_dir.path()),
            Err(CoreError::GitError(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_every_step_runs_after_a_failure() {
        use std::os::unix::fs::PermissionsExt;

        let tools = TempDir::new().unwrap();
        let log = tools.path().join("calls.log");
        let script = tools.path().join("fake-git");
        fs::write(
            &script,
            format!("#!/bin/sh\necho \"$1\" >> '{}'\nexit 1\n", log.display()),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let git = GitInitializer::from_config(&GitConfig {
            executable: script.to_string_lossy().to_string(),
            ..Default::default()
        });
        let package = TempDir::new().unwrap();

        let err = git.initialize(package.path()).unwrap_err();
        assert!(matches!(err, CoreError::GitError(ref msg) if msg.contains(" init failed")));
        assert_eq!(fs::read_to_string(&log).unwrap(), "init\nadd\ncommit\n");
    }

    #[test]
    fn test_init_repo() {
        let git = GitInitializer::default();
        if !git.is_available() {
            println!("Git not available, skipping test");
            return;
        }

        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("package.json"), "{}").unwrap();

        // Commit may fail without a configured identity; init and add must not.
        let _ = git.initialize(temp_dir.path());
        assert!(temp_dir.path().join(".git").exists());
    }
}
