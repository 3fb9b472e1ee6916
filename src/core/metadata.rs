use serde::Deserialize;

/// Codec value yt-dlp uses for an absent stream.
pub const NO_CODEC: &str = "none";

/// Metadata document as emitted by `yt-dlp --dump-single-json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInfo {
    pub title: Option<String>,
    pub duration: Option<f64>,
    #[serde(default)]
    pub formats: Vec<RawFormat>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFormat {
    pub format_id: Option<String>,
    pub ext: Option<String>,
    pub resolution: Option<String>,
    pub filesize: Option<f64>,
    pub format_note: Option<String>,
    pub fps: Option<f64>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub tbr: Option<f64>, // total bitrate
}

impl RawFormat {
    pub fn has_video(&self) -> bool {
        self.vcodec.as_deref() != Some(NO_CODEC)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub title: String,
    pub duration: u64,
    pub formats: Vec<FormatEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormatEntry {
    pub format_id: String,
    pub ext: String,
    pub resolution: String,
    pub filesize: u64,
    pub format_note: String,
    pub fps: u32,
    pub vcodec: String,
    pub acodec: String,
    pub tbr: f64,
}

impl From<RawFormat> for FormatEntry {
    fn from(raw: RawFormat) -> Self {
        let na = || "N/A".to_string();
        Self {
            format_id: raw.format_id.unwrap_or_else(na),
            ext: raw.ext.unwrap_or_else(na),
            resolution: raw.resolution.unwrap_or_else(na),
            filesize: raw
                .filesize
                .filter(|size| size.is_finite() && *size > 0.0)
                .map(|size| size as u64)
                .unwrap_or(0),
            format_note: raw.format_note.unwrap_or_default(),
            fps: raw.fps.map(|fps| fps.max(0.0).round() as u32).unwrap_or(0),
            vcodec: raw.vcodec.unwrap_or_else(na),
            acodec: raw.acodec.unwrap_or_else(na),
            tbr: raw.tbr.filter(|tbr| tbr.is_finite()).unwrap_or(0.0),
        }
    }
}

impl FormatEntry {
    /// Vertical resolution taken from a `WIDTHxHEIGHT` string, 0 when it cannot be read.
    pub fn height(&self) -> u32 {
        self.resolution
            .split_once('x')
            .and_then(|(_, height)| height.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Short codec summary for the format table, e.g. `V:avc1/A:mp4a`.
    pub fn codecs(&self) -> String {
        let mut codecs = format!("V:{}", prefix(&self.vcodec, 4));
        if self.acodec != NO_CODEC {
            codecs.push_str("/A:");
            codecs.push_str(prefix(&self.acodec, 4));
        }
        codecs
    }
}

fn prefix(s: &str, chars: usize) -> &str {
    match s.char_indices().nth(chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
