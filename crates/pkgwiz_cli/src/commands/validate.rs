//! Validate command - Check package details without creating anything.

use anyhow::Result;
use clap::Args;

use pkgwiz_identity::ValidationReport;

use super::{PackageArgs, ProjectArgs, ValidationFailed};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    let (root, config) = args.project.load()?;
    let request = args.package.to_request(false)?;
    let report = request.validate(config.max_complete_name_length);

    print_report(&report);

    if let Some(issue) = report.top() {
        return Err(ValidationFailed(issue.message.clone()).into());
    }

    let target = config.packages_path(&root).join(request.complete_name());
    println!("✅ {}", request.complete_name());
    println!("   Assembly: {}.Runtime", request.assembly_name());
    println!("   Target:   {}", target.display());
    if target.exists() {
        println!("   ⚠️  Target directory already exists");
    }

    Ok(())
}

fn print_report(report: &ValidationReport) {
    for issue in report.sorted() {
        println!("   ❌ [{:?}] {}", issue.priority, issue.message);
    }
}
