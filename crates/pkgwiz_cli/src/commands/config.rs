//! Config command - Print the effective configuration.

use anyhow::Result;
use clap::Args;

use super::ProjectArgs;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn execute(args: ConfigArgs) -> Result<()> {
    let (root, config) = args.project.load()?;

    println!("# project: {}", root.display());
    print!("{}", config.to_yaml()?);

    Ok(())
}
