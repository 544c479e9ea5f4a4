//! Binary crate for the `citycast` weather chat.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - The terminal chat UI

use clap::Parser;

mod app;
mod cli;
mod logging;
mod tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the key may come from the config file instead.
    dotenv::dotenv().ok();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
