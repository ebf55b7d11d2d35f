use anyhow::Result;
use clap::Parser;

use quickadd::cli::{self, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    cli::handle_run(cli).await
}
