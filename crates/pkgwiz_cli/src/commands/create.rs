//! Create command - Create a new package from the template.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use pkgwiz_core::PackageWizard;

use super::{PackageArgs, ProjectArgs, ValidationFailed};

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    #[command(flatten)]
    pub project: ProjectArgs,

    /// Do not initialize a git repository in the new package
    #[arg(long)]
    pub no_git: bool,
}

pub fn execute(args: CreateArgs) -> Result<()> {
    let (root, config) = args.project.load()?;
    let request = args.package.to_request(!args.no_git)?;

    info!("Creating package: {}", request.complete_name());

    // Same checks the creation form runs; creation only starts on a clean report.
    let report = request.validate(config.max_complete_name_length);
    if let Some(issue) = report.top() {
        for finding in report.sorted() {
            eprintln!("   ❌ {}", finding.message);
        }
        return Err(ValidationFailed(issue.message.clone()).into());
    }

    let wizard = PackageWizard::new(&root, config);
    let path = wizard
        .create(&request)
        .context("Failed to create package")?;

    println!("✅ Package '{}' created successfully!", request.complete_name());
    println!();
    println!("Location: {}", path.display());
    if request.init_repository {
        println!("Git: repository initialization attempted (see log for details)");
    }

    Ok(())
}
