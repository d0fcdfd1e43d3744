use clap::Parser;
use cweb::cli::{run_cli, Cli};
use cweb::logging::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging()?;
    run_cli(Cli::parse())
}
