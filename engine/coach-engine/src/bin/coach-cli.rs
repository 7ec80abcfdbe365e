//! # Coach CLI Binary
//!
//! Command-line interface for roster analysis against a league snapshot.

use anyhow::Result;
use clap::Parser;
use coach_engine::cli::{Cli, CliHandler};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Create CLI handler over the snapshot
    let handler = CliHandler::new(&cli.snapshot).await?;

    // Handle command
    handler.handle_command(cli.command).await?;

    Ok(())
}
