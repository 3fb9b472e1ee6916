use crate::core::{ExtractionError, FormatEntry, MediaBackend, RawInfo, VideoInfo};
use tracing::{debug, warn};

/// Ask the backend for metadata and keep the formats that carry a video stream,
/// best first.
pub async fn get_video_info<B>(backend: &B, url: &str) -> Result<VideoInfo, ExtractionError>
where
    B: MediaBackend + ?Sized,
{
    let raw = backend.extract_info(url).await.map_err(|e| {
        warn!("Metadata query for {} failed: {}", url, e);
        ExtractionError(e)
    })?;
    let info = build_video_info(raw);
    debug!("{} video formats for {}", info.formats.len(), url);
    Ok(info)
}

pub fn build_video_info(raw: RawInfo) -> VideoInfo {
    let mut formats: Vec<FormatEntry> = raw
        .formats
        .into_iter()
        .filter(|f| f.has_video())
        .map(FormatEntry::from)
        .collect();

    // Stable sort: equal keys keep yt-dlp's order
    formats.sort_by(|a, b| {
        b.height()
            .cmp(&a.height())
            .then_with(|| b.tbr.total_cmp(&a.tbr))
    });

    VideoInfo {
        title: raw.title.unwrap_or_else(|| "Video".to_string()),
        duration: raw.duration.map(|d| d.max(0.0) as u64).unwrap_or(0),
        formats,
    }
}
