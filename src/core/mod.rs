pub mod backend;
pub mod downloader;
pub mod error;
pub mod lister;
pub mod metadata;
pub mod progress;
pub mod session;

pub use backend::{MediaBackend, YtDlp};
pub use downloader::{download_video, DownloadRequest};
pub use error::{BackendError, DownloadError, ExtractionError, InputError};
pub use lister::{build_video_info, get_video_info};
pub use metadata::{FormatEntry, RawFormat, RawInfo, VideoInfo};
pub use progress::{ProgressEvent, ProgressReporter};
pub use session::{parse_selection, Session, State};
