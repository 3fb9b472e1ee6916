//! The interactive URL → format table → selection → download loop.
//!
//! The loop is an explicit state machine: [`Session::advance`] consumes one line of
//! input, performs whatever fetching or downloading that line triggers, and lands
//! in the next waiting state. [`Session::run`] only feeds it lines.

use crate::core::downloader::DEFAULT_MERGE_FORMAT;
use crate::core::{
    download_video, get_video_info, InputError, MediaBackend, ProgressReporter, VideoInfo,
};
use crate::utils::format_size;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

pub const URL_PROMPT: &str = "\nEnter YouTube URL (or 'q' to quit): ";
pub const SELECTION_PROMPT: &str = "\nSelect format number (or 'b' to go back): ";

#[derive(Debug, Clone, PartialEq)]
pub enum State {
    AwaitingUrl,
    AwaitingSelection { url: String, info: VideoInfo },
    Exited,
}

/// Turn a 1-based answer into an index into a list of `available` formats.
pub fn parse_selection(input: &str, available: usize) -> Result<usize, InputError> {
    let input = input.trim();
    let choice: i64 = match input.parse() {
        Ok(choice) => choice,
        // Whole numbers too large for i64 are still numbers, just not on the list
        Err(_) if is_integer(input) => {
            let choice = if input.starts_with('-') { i64::MIN } else { i64::MAX };
            return Err(InputError::OutOfRange { choice, available });
        }
        Err(_) => return Err(InputError::NotANumber),
    };
    if choice >= 1 && (choice as u64) <= available as u64 {
        Ok(choice as usize - 1)
    } else {
        Err(InputError::OutOfRange { choice, available })
    }
}

fn is_integer(input: &str) -> bool {
    let digits = input.strip_prefix(&['+', '-'][..]).unwrap_or(input);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

pub struct Session<B, W> {
    backend: B,
    out: W,
    output_dir: PathBuf,
    merge_output_format: String,
    state: State,
}

impl<B, W> Session<B, W>
where
    B: MediaBackend,
    W: Write + Send,
{
    pub fn new(backend: B, out: W, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            out,
            output_dir: output_dir.into(),
            merge_output_format: DEFAULT_MERGE_FORMAT.to_string(),
            state: State::AwaitingUrl,
        }
    }

    pub fn with_merge_format(mut self, format: impl Into<String>) -> Self {
        self.merge_output_format = format.into();
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn into_parts(self) -> (B, W) {
        (self.backend, self.out)
    }

    pub fn prompt(&self) -> Option<&'static str> {
        match self.state {
            State::AwaitingUrl => Some(URL_PROMPT),
            State::AwaitingSelection { .. } => Some(SELECTION_PROMPT),
            State::Exited => None,
        }
    }

    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "Enhanced YouTube Video Downloader")?;
        writeln!(self.out, "--------------------------------")
    }

    /// Feed lines from `input` until the user quits or input ends.
    pub async fn run<R>(&mut self, input: R) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.banner()?;
        let mut lines = input.lines();

        while let Some(prompt) = self.prompt() {
            write!(self.out, "{}", prompt)?;
            self.out.flush()?;

            match lines.next_line().await? {
                Some(line) => self.advance(&line).await?,
                None => {
                    writeln!(self.out)?;
                    self.quit()?;
                }
            }
        }

        Ok(())
    }

    /// Consume one line of input in the current state.
    pub async fn advance(&mut self, line: &str) -> io::Result<()> {
        let input = line.trim();
        match std::mem::replace(&mut self.state, State::AwaitingUrl) {
            State::AwaitingUrl => {
                if input.eq_ignore_ascii_case("q") {
                    self.quit()
                } else {
                    self.fetch(input).await
                }
            }
            State::AwaitingSelection { url, info } => {
                if input.eq_ignore_ascii_case("b") {
                    debug!("Back to URL prompt");
                    return Ok(());
                }
                match parse_selection(input, info.formats.len()) {
                    Ok(idx) => self.download(&url, &info, idx).await,
                    Err(e) => {
                        writeln!(self.out, "{}", e)?;
                        self.state = State::AwaitingSelection { url, info };
                        Ok(())
                    }
                }
            }
            State::Exited => {
                self.state = State::Exited;
                Ok(())
            }
        }
    }

    fn quit(&mut self) -> io::Result<()> {
        writeln!(self.out, "Goodbye!")?;
        self.state = State::Exited;
        Ok(())
    }

    async fn fetch(&mut self, url: &str) -> io::Result<()> {
        writeln!(self.out, "Fetching video information...")?;
        match get_video_info(&self.backend, url).await {
            Ok(info) => {
                self.show_formats(&info)?;
                self.state = State::AwaitingSelection { url: url.to_string(), info };
            }
            Err(e) => writeln!(self.out, "Error getting video info: {}", e)?,
        }
        Ok(())
    }

    fn show_formats(&mut self, info: &VideoInfo) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(out, "\nTitle: {}", info.title)?;
        writeln!(out, "Duration: {} seconds", info.duration)?;
        writeln!(out, "\nAvailable formats:")?;
        writeln!(out, "\nID | Resolution | Format | FPS | Size | Codecs | Note")?;
        writeln!(out, "{}", "-".repeat(80))?;

        for (i, fmt) in info.formats.iter().enumerate() {
            let fps = if fmt.fps > 0 { fmt.fps.to_string() } else { "N/A".to_string() };
            writeln!(
                out,
                "{:>2} | {:^10} | {:^6} | {:^4} | {:^8} | {:^10} | {}",
                i + 1,
                fmt.resolution,
                fmt.ext,
                fps,
                format_size(Some(fmt.filesize)),
                fmt.codecs(),
                fmt.format_note
            )?;
        }

        writeln!(out, "\nNote: Video will automatically be merged with best audio quality.")
    }

    async fn download(&mut self, url: &str, info: &VideoInfo, idx: usize) -> io::Result<()> {
        let selected = &info.formats[idx];
        writeln!(self.out, "\nSelected: {} - {}", selected.resolution, selected.format_note)?;

        if let Err(e) = std::fs::create_dir_all(&self.output_dir) {
            writeln!(self.out, "Error: {}", e)?;
            return Ok(());
        }

        let mut reporter = ProgressReporter::new(&mut self.out);
        // Outcome already reported to the user; either way we go back to the URL prompt
        let _ = download_video(
            &self.backend,
            url,
            &selected.format_id,
            &self.output_dir,
            &self.merge_output_format,
            &mut reporter,
        )
        .await;
        Ok(())
    }
}
