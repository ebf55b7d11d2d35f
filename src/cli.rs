use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Label shown on the add button
    #[arg(short, long, default_value = "+ Add entry")]
    pub label: String,

    /// Exit after the first captured entry
    #[arg(long)]
    pub once: bool,
}

/// Resolved runtime options handed to the TUI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FormConfig {
    pub label: String,
    pub once: bool,
}

impl From<Cli> for FormConfig {
    fn from(cli: Cli) -> Self {
        Self {
            label: cli.label,
            once: cli.once,
        }
    }
}

pub async fn handle_run(cli: Cli) -> Result<()> {
    if !atty::is(atty::Stream::Stdin) {
        return Err(anyhow::anyhow!(
            "quickadd needs an interactive terminal (stdin is not a TTY)"
        ));
    }

    let config = FormConfig::from(cli);
    log::debug!("Starting TUI with {config:?}");

    let entries = crate::tui::run_tui(config).await?;
    log::info!("Captured {} entries", entries.len());

    // Captured entries go to stdout so the tool composes with pipes.
    for entry in &entries {
        println!("{entry}");
    }

    Ok(())
}
