//! Pantry CLI - stock projections, charts and table sorting from the command line.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "pantry-cli",
    version,
    about = "Pantry inventory toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: pantry_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("pantry-cli {}", env!("CARGO_PKG_VERSION"));
    pantry_cmd::run(cli.command)
}
