use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sancdpd::app;
use sancdpd::cli::Cli;

fn main() -> Result<()> {
    // stderr only, quiet by default so the prompt stays readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    app::start_cli(&cli)?;
    Ok(())
}
