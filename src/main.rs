use clap::Parser;
use fmtpick::cli::Cli;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Logs go to stderr so they never break the in-place progress line
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    info!("Starting fmtpick v{}", env!("CARGO_PKG_VERSION"));

    cli.run().await?;

    Ok(())
}
