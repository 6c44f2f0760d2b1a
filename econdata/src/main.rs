// econdata/src/main.rs

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug econdata ... for the details
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    commands::run::execute(cli.mode()).await
}
