//! Capabilities provided by the host environment.
//!
//! The wizard never talks to the host editor directly. A host binding
//! implements these traits: [`PackageHost`] to refresh the package graph
//! after a package is created, and [`MenuHost`] to expose the creation
//! command in the host's UI.

use std::process::Command;

use tracing::{info, warn};

/// Host-side package graph.
#[cfg_attr(test, mockall::automock)]
pub trait PackageHost {
    /// Ask the host to re-resolve its packages. The outcome is not reported back.
    fn resolve_packages(&self);
}

/// Host that only records the request in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHost;

impl PackageHost for LoggingHost {
    fn resolve_packages(&self) {
        info!("Package graph refresh requested");
    }
}

/// Host that runs an external command to refresh its package graph.
#[derive(Debug, Clone)]
pub struct CommandHost {
    program: String,
    args: Vec<String>,
}

impl CommandHost {
    /// Build from a `[program, args...]` list. Returns `None` for an empty list.
    pub fn from_command_line(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl PackageHost for CommandHost {
    fn resolve_packages(&self) {
        info!("Running package refresh command: {}", self.program);
        match Command::new(&self.program).args(&self.args).status() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!("Package refresh command exited with {}", status),
            Err(e) => warn!("Failed to run package refresh command {}: {}", self.program, e),
        }
    }
}

/// Pick a host for the configured refresh command.
pub fn host_for_command(command: &[String]) -> Box<dyn PackageHost> {
    match CommandHost::from_command_line(command) {
        Some(host) => Box::new(host),
        None => Box::new(LoggingHost),
    }
}

/// An entry the host shows in its UI to start package creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationCommand {
    pub id: String,
    pub label: String,
}

impl CreationCommand {
    pub fn create_package() -> Self {
        Self {
            id: "pkgwizard.create-package".to_string(),
            label: "Create new package".to_string(),
        }
    }
}

/// Host UI that accepts a creation command.
pub trait MenuHost {
    fn register_creation_command(&mut self, command: CreationCommand);
}

/// Register the wizard's entry with a host UI.
pub fn register_wizard(host: &mut dyn MenuHost) {
    host.register_creation_command(CreationCommand::create_package());
}
