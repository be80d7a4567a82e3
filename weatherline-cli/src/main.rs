//! Binary crate for the `weatherline` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Merging flags over the config file
//! - Logging setup and exit status

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.init_logging();
    cmd.run().await
}
