use crate::config::Config;
use crate::core::{Session, YtDlp};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;

#[derive(Parser)]
#[command(name = "fmtpick")]
#[command(about = "List the formats of a video and download the one you pick")]
#[command(version)]
pub struct Cli {
    /// Output directory [default: downloads]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the yt-dlp executable
    #[arg(long, value_name = "PATH")]
    pub ytdlp: Option<PathBuf>,

    /// Container the video and audio streams are merged into [default: mp4]
    #[arg(long, value_name = "FORMAT")]
    pub merge_format: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Config file values overridden by whatever was given on the command line.
    pub fn config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(ytdlp) = &self.ytdlp {
            config.ytdlp_path = Some(ytdlp.clone());
        }
        if let Some(format) = &self.merge_format {
            config.merge_output_format = format.clone();
        }
        Ok(config)
    }

    pub async fn run(&self) -> Result<()> {
        let config = self.config()?;
        info!("Output directory: {}", config.output_dir.display());

        let backend = YtDlp::locate(config.ytdlp_path.as_deref())?;
        let mut session = Session::new(backend, std::io::stdout(), config.output_dir)
            .with_merge_format(config.merge_output_format);

        session.run(BufReader::new(tokio::io::stdin())).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_gives_defaults() {
        let cli = Cli::parse_from(["fmtpick"]);
        assert_eq!(cli.config().unwrap(), Config::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "fmtpick",
            "-o",
            "/tmp/out",
            "--ytdlp",
            "/usr/local/bin/yt-dlp",
            "--merge-format",
            "mkv",
        ]);
        let config = cli.config().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.ytdlp_path, Some(PathBuf::from("/usr/local/bin/yt-dlp")));
        assert_eq!(config.merge_output_format, "mkv");
    }
}
