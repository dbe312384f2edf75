//! folio CLI: turns a portfolio markdown file into typed content.
//!
//! Run with no arguments from the project root to regenerate the content
//! asset using `folio.toml` (or defaults).

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
