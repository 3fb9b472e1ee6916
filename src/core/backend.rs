use crate::core::progress::PROGRESS_TEMPLATE;
use crate::core::{BackendError, DownloadRequest, ProgressEvent, RawInfo};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, error, info};

/// The external tool that knows how to talk to video sites.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Metadata for `url` without downloading anything.
    async fn extract_info(&self, url: &str) -> Result<RawInfo, BackendError>;

    /// Fetch and merge the streams described by `request`, calling `on_progress`
    /// for every progress record.
    async fn download(
        &self,
        request: &DownloadRequest,
        on_progress: &mut (dyn FnMut(ProgressEvent) + Send),
    ) -> Result<(), BackendError>;
}

/// `MediaBackend` backed by the `yt-dlp` executable.
pub struct YtDlp {
    program: PathBuf,
}

impl YtDlp {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    /// Use `explicit` when given, otherwise search `PATH`.
    pub fn locate(explicit: Option<&Path>) -> Result<Self, BackendError> {
        let program = match explicit {
            Some(path) => path.to_path_buf(),
            None => which::which("yt-dlp").map_err(|_| BackendError::NotFound)?,
        };
        info!("Using yt-dlp at: {}", program.display());
        Ok(Self::new(program))
    }

    fn command(&self, args: &[String]) -> Command {
        debug!("Running {} {:?}", self.program.display(), args);
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> BackendError {
        if source.kind() == std::io::ErrorKind::NotFound {
            return BackendError::NotFound;
        }
        BackendError::Spawn {
            program: self.program.display().to_string(),
            source,
        }
    }
}

pub fn extract_args(url: &str) -> Vec<String> {
    [
        "--dump-single-json",
        "--no-download",
        "--quiet",
        "--no-warnings",
        "--no-playlist",
        "--",
        url,
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn download_args(request: &DownloadRequest) -> Vec<String> {
    vec![
        "-f".to_string(),
        request.format_selector.clone(),
        "-o".to_string(),
        request.output_template.clone(),
        "--merge-output-format".to_string(),
        request.merge_output_format.clone(),
        "--quiet".to_string(),
        "--progress".to_string(),
        "--newline".to_string(),
        "--no-warnings".to_string(),
        "--no-playlist".to_string(),
        "--progress-template".to_string(),
        PROGRESS_TEMPLATE.to_string(),
        "--".to_string(),
        request.url.clone(),
    ]
}

#[async_trait]
impl MediaBackend for YtDlp {
    async fn extract_info(&self, url: &str) -> Result<RawInfo, BackendError> {
        let output = self
            .command(&extract_args(url))
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("yt-dlp extraction failed: {}", stderr);
            return Err(BackendError::Failed { status: output.status, stderr });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }

    async fn download(
        &self,
        request: &DownloadRequest,
        on_progress: &mut (dyn FnMut(ProgressEvent) + Send),
    ) -> Result<(), BackendError> {
        let mut child = self
            .command(&download_args(request))
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // stderr is drained alongside stdout so neither pipe can fill up
        let mut stderr = child.stderr.take();
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            if let Some(stderr) = stderr.as_mut() {
                let _ = stderr.read_to_end(&mut buf).await;
            }
            String::from_utf8_lossy(&buf).into_owned()
        });

        if let Some(stdout) = child.stdout.take() {
            let mut lines = BufReader::new(stdout).lines();
            while let Some(line) = lines.next_line().await? {
                match ProgressEvent::parse_line(&line) {
                    Some(event) => on_progress(event),
                    None => debug!("yt-dlp: {}", line),
                }
            }
        }

        let status = child.wait().await?;
        let stderr = stderr_task.await.unwrap_or_default();
        if !status.success() {
            let stderr = stderr.trim().to_string();
            error!("yt-dlp download failed: {}", stderr);
            return Err(BackendError::Failed { status, stderr });
        }

        Ok(())
    }
}
