//! warmpath CLI: a developer harness over the extraction and ranking engine.
//!
//! Canonicalizes identifiers, builds search URLs, parses card text, replays
//! saved results pages through the collector, and ranks warm-intro paths.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
