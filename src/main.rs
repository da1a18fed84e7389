//! Supermarket checkout simulator

use checkout::{cli::Cli, observability};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    observability::init(&cli.logging)?;

    cli.run()
}
