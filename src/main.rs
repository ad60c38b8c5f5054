use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use uniteocr::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    uniteocr::run(&cli)?;
    Ok(())
}
