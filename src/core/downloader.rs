use crate::core::{DownloadError, MediaBackend, ProgressEvent, ProgressReporter};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Container the merged output ends up in unless configured otherwise.
pub const DEFAULT_MERGE_FORMAT: &str = "mp4";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub format_selector: String,
    pub output_template: String,
    pub merge_output_format: String,
}

impl DownloadRequest {
    /// Video stream `format_id` plus the best audio stream, or the best single file
    /// when they cannot be combined. Named after the video title.
    pub fn new(url: &str, format_id: &str, output_dir: &Path, merge_output_format: &str) -> Self {
        Self {
            url: url.to_string(),
            format_selector: format!("{}+bestaudio/best", format_id),
            output_template: output_dir.join("%(title)s.%(ext)s").to_string_lossy().into_owned(),
            merge_output_format: merge_output_format.to_string(),
        }
    }
}

/// Download `format_id` of `url` into `output_dir`, reporting progress as it goes.
/// Failures are printed and returned; nothing is cleaned up.
pub async fn download_video<B, W>(
    backend: &B,
    url: &str,
    format_id: &str,
    output_dir: &Path,
    merge_output_format: &str,
    reporter: &mut ProgressReporter<'_, W>,
) -> Result<(), DownloadError>
where
    B: MediaBackend + ?Sized,
    W: Write + Send,
{
    std::fs::create_dir_all(output_dir).map_err(|source| DownloadError::OutputDir {
        path: output_dir.display().to_string(),
        source,
    })?;

    let request = DownloadRequest::new(url, format_id, output_dir, merge_output_format);
    info!("Downloading {} as {}", url, request.format_selector);

    let result = backend
        .download(&request, &mut |event: ProgressEvent| {
            // Progress rendering is best effort
            let _ = reporter.report(&event);
        })
        .await;

    let out = reporter.writer();
    match result {
        Ok(()) => {
            info!("Downloaded into: {}", output_dir.display());
            let _ = writeln!(out, "\nDownload completed successfully!");
            Ok(())
        }
        Err(e) => {
            warn!("Download of {} failed: {}", url, e);
            let _ = writeln!(out, "\nAn error occurred: {}", e);
            Err(e.into())
        }
    }
}
