use tracing::{info, warn};

use super::models::{PlaylistListResult, VideoDescriptor, UNTITLED_PLAYLIST};
use super::{PlaylistError, NO_EXTRACTABLE_VIDEOS, NO_VIDEOS_IN_PLAYLIST, PLAYLIST_NOT_FOUND};
use crate::downloader::{ExtractOptions, ExtractionEngine};

/// List the videos of a playlist without downloading anything.
///
/// Entries without an id are dropped silently; entries that carry an id but
/// still cannot be described are logged and dropped.
pub async fn fetch_playlist(
    engine: &dyn ExtractionEngine,
    url: &str,
) -> Result<PlaylistListResult, PlaylistError> {
    let info = engine
        .extract_info(url, ExtractOptions::listing())
        .await?
        .ok_or(PlaylistError::NotFound(PLAYLIST_NOT_FOUND))?;

    if info.entries.is_empty() {
        return Err(PlaylistError::NotFound(NO_VIDEOS_IN_PLAYLIST));
    }

    let raw_count = info.entries.len();
    let videos: Vec<VideoDescriptor> = info
        .entries
        .iter()
        .flatten()
        .filter(|entry| entry.video_id().is_some())
        .filter_map(|entry| match VideoDescriptor::from_entry(entry) {
            Ok(video) => Some(video),
            Err(e) => {
                warn!(id = ?entry.id, error = %e, "skipping playlist entry");
                None
            }
        })
        .collect();

    if videos.is_empty() {
        return Err(PlaylistError::NotFound(NO_EXTRACTABLE_VIDEOS));
    }

    info!(
        engine = engine.name(),
        %url,
        entries = raw_count,
        videos = videos.len(),
        "playlist listed"
    );

    Ok(PlaylistListResult {
        playlist_title: info.title.unwrap_or_else(|| UNTITLED_PLAYLIST.to_string()),
        videos,
    })
}
