pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

pub use core::{
    download_video, get_video_info, DownloadRequest, FormatEntry, MediaBackend, ProgressEvent,
    ProgressReporter, Session, State, VideoInfo, YtDlp,
};
