use std::process::ExitStatus;
use thiserror::Error;

/// Failures reported by the external extraction/download tool.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("yt-dlp not found. Please install yt-dlp or pass --ytdlp")]
    NotFound,

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("yt-dlp exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("invalid metadata from yt-dlp: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The metadata query failed: bad URL, network issue, unsupported site.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ExtractionError(#[from] pub BackendError);

/// Fetching or merging failed after a format was selected.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("could not create output directory {path}: {source}")]
    OutputDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Malformed answer at the selection prompt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a valid number.")]
    NotANumber,

    #[error("Invalid selection. Please try again.")]
    OutOfRange { choice: i64, available: usize },
}
