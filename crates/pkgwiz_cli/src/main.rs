//! pkgwizard CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Validation failure
//! - 4: Template error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pkgwiz_core::CoreError;

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
    pub const TEMPLATE_ERROR: u8 = 4;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        "pkgwiz=debug"
    } else if cli.quiet {
        "pkgwiz=warn"
    } else {
        "pkgwiz=info"
    };

    // Initialize logging
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(log_filter(rust_log.as_deref(), default_level))
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match cli.command {
        Commands::Create(args) => commands::create::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Config(args) => commands::config::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// `RUST_LOG` when set, otherwise the verbosity chosen on the command line.
fn log_filter(rust_log: Option<&str>, default_level: &str) -> EnvFilter {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(format!("warn,{}", default_level)),
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.downcast_ref::<commands::ValidationFailed>().is_some() {
        return ExitCodes::VALIDATION_FAILURE;
    }

    match e.downcast_ref::<CoreError>() {
        Some(err) if err.is_validation() => ExitCodes::VALIDATION_FAILURE,
        Some(CoreError::TemplateNotFound(_)) | Some(CoreError::Tree(_)) => {
            ExitCodes::TEMPLATE_ERROR
        }
        Some(CoreError::TargetExists(_)) | Some(CoreError::Config(_)) | Some(CoreError::Yaml(_)) => {
            ExitCodes::INVALID_ARGS
        }
        _ => ExitCodes::GENERAL_ERROR,
    }
}
