use anyhow::Result;
use clap::Parser;

use spikegui::cli::{self, CliArgs};
use spikegui::config::ShellConfig;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    spikegui::tracing::init(args.verbose);

    let session = args.into_session()?;
    let config = ShellConfig::load();

    let report = cli::run(&session, &config)?;
    println!("{}", report);
    Ok(())
}
