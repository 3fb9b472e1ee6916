use std::io::Write;

/// Marker yt-dlp prints in front of every record produced by our progress template.
pub const PROGRESS_MARKER: &str = "[progress]";

/// Template handed to `--progress-template`; each record becomes one stdout line.
pub const PROGRESS_TEMPLATE: &str =
    "download:[progress] %(progress.status)s %(progress._percent_str)s";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Downloading { percent: String },
    Finished,
    Other(String),
}

impl ProgressEvent {
    /// Parse a line of yt-dlp output; `None` for lines that are not progress records.
    pub fn parse_line(line: &str) -> Option<Self> {
        let record = line.trim().strip_prefix(PROGRESS_MARKER)?.trim();
        let (status, rest) = record.split_once(char::is_whitespace).unwrap_or((record, ""));

        Some(match status {
            "downloading" => {
                let percent = rest.trim();
                let percent = if percent.is_empty() || percent == "NA" { "0%" } else { percent };
                ProgressEvent::Downloading { percent: percent.to_string() }
            }
            "finished" => ProgressEvent::Finished,
            other => ProgressEvent::Other(other.to_string()),
        })
    }
}

/// Renders progress events as a single line updated in place.
pub struct ProgressReporter<'a, W: Write> {
    out: &'a mut W,
}

impl<'a, W: Write> ProgressReporter<'a, W> {
    pub fn new(out: &'a mut W) -> Self {
        Self { out }
    }

    pub fn report(&mut self, event: &ProgressEvent) -> std::io::Result<()> {
        match event {
            ProgressEvent::Downloading { percent } => {
                write!(self.out, "\rDownloading... {}", percent)?;
            }
            ProgressEvent::Finished => {
                writeln!(self.out, "\nProcessing completed file...")?;
            }
            ProgressEvent::Other(_) => return Ok(()),
        }
        self.out.flush()
    }

    pub fn writer(&mut self) -> &mut W {
        &mut *self.out
    }
}
