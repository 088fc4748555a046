//! Playlist operations on top of an [`ExtractionEngine`].
//!
//! Both operations make a single enumeration call and then work through the
//! entries strictly in order. Neither holds state between requests.
//!
//! [`ExtractionEngine`]: crate::downloader::ExtractionEngine

pub mod download;
pub mod lister;
pub mod models;

use thiserror::Error;

use crate::downloader::DownloadError;

pub use download::{download_playlist, DEFAULT_OUTPUT_PATH};
pub use lister::fetch_playlist;
pub use models::{DownloadOutcome, EntryOutcome, PlaylistListResult, VideoDescriptor};

pub const PLAYLIST_NOT_FOUND: &str = "Playlist not found";
pub const NO_VIDEOS_IN_PLAYLIST: &str = "No videos found in playlist";
pub const NO_EXTRACTABLE_VIDEOS: &str = "Could not extract any videos from playlist";

#[derive(Debug, Error)]
pub enum PlaylistError {
    /// Playlist missing, empty, or without a single usable video
    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Engine(#[from] DownloadError),
}
