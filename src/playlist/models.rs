// Response shapes for the playlist operations

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::downloader::PlaylistEntry;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNTITLED_PLAYLIST: &str = "Untitled Playlist";

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", video_id)
}

/// Why an engine entry could not become a [`VideoDescriptor`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    #[error("entry has no video id")]
    MissingId,
    #[error("duration {0} is not a whole number of seconds")]
    InvalidDuration(f64),
}

/// Simplified view of one playlist video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDescriptor {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub duration: Option<u64>,
    pub url: String,
}

impl VideoDescriptor {
    pub fn from_entry(entry: &PlaylistEntry) -> Result<Self, DescriptorError> {
        let id = entry.video_id().ok_or(DescriptorError::MissingId)?;

        let duration = match entry.duration {
            Some(seconds) => Some(
                whole_seconds(seconds).ok_or(DescriptorError::InvalidDuration(seconds))?,
            ),
            None => None,
        };

        Ok(Self {
            id: id.to_string(),
            title: entry
                .title
                .clone()
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            thumbnail: thumbnail_url(id),
            duration,
            url: watch_url(id),
        })
    }
}

fn whole_seconds(seconds: f64) -> Option<u64> {
    (seconds.is_finite() && seconds >= 0.0 && seconds.fract() == 0.0).then(|| seconds as u64)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistListResult {
    pub playlist_title: String,
    pub videos: Vec<VideoDescriptor>,
}

/// Result of one per-video download attempt, keyed by title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Downloaded(String),
    Failed(String),
}

pub const STATUS_SUCCESS: &str = "success";

/// Envelope returned once every entry has been attempted.
///
/// `status` stays "success" even when individual videos failed; only
/// playlist-level failures turn into an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOutcome {
    pub status: String,
    pub message: String,
    pub downloaded_videos: Vec<String>,
    pub failed_videos: Vec<String>,
}

impl DownloadOutcome {
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = EntryOutcome>) -> Self {
        let mut downloaded_videos = Vec::new();
        let mut failed_videos = Vec::new();

        for outcome in outcomes {
            match outcome {
                EntryOutcome::Downloaded(title) => downloaded_videos.push(title),
                EntryOutcome::Failed(title) => failed_videos.push(title),
            }
        }

        Self {
            status: STATUS_SUCCESS.to_string(),
            message: format!(
                "Downloaded {} videos. {} videos failed.",
                downloaded_videos.len(),
                failed_videos.len()
            ),
            downloaded_videos,
            failed_videos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_synthesizes_urls() {
        let entry = PlaylistEntry::new("dQw4w9WgXcQ", "Never").with_duration(212.0);
        let video = VideoDescriptor::from_entry(&entry).unwrap();

        assert_eq!(video.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(
            video.thumbnail,
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
        assert_eq!(video.duration, Some(212));
        assert_eq!(video.title, "Never");
    }

    #[test]
    fn descriptor_defaults_title() {
        let entry = PlaylistEntry {
            id: Some("abc".to_string()),
            ..PlaylistEntry::default()
        };
        let video = VideoDescriptor::from_entry(&entry).unwrap();
        assert_eq!(video.title, UNKNOWN_TITLE);
        assert_eq!(video.duration, None);
    }

    #[test]
    fn descriptor_rejects_fractional_duration() {
        let entry = PlaylistEntry::new("abc", "A").with_duration(12.5);
        assert_eq!(
            VideoDescriptor::from_entry(&entry),
            Err(DescriptorError::InvalidDuration(12.5))
        );
    }

    #[test]
    fn descriptor_requires_id() {
        let entry = PlaylistEntry {
            title: Some("No id".to_string()),
            ..PlaylistEntry::default()
        };
        assert_eq!(
            VideoDescriptor::from_entry(&entry),
            Err(DescriptorError::MissingId)
        );
    }

    #[test]
    fn descriptor_serializes_missing_duration_as_null() {
        let video = VideoDescriptor::from_entry(&PlaylistEntry::new("abc", "A")).unwrap();
        let json = serde_json::to_value(&video).unwrap();
        assert!(json["duration"].is_null());
        assert_eq!(json["id"], "abc");
    }

    #[test]
    fn outcome_partitions_titles_in_order() {
        let outcome = DownloadOutcome::from_outcomes(vec![
            EntryOutcome::Downloaded("A".to_string()),
            EntryOutcome::Failed("B".to_string()),
            EntryOutcome::Downloaded("C".to_string()),
        ]);

        assert_eq!(outcome.status, "success");
        assert_eq!(outcome.message, "Downloaded 2 videos. 1 videos failed.");
        assert_eq!(outcome.downloaded_videos, vec!["A", "C"]);
        assert_eq!(outcome.failed_videos, vec!["B"]);
    }

    #[test]
    fn all_failed_is_still_success() {
        let outcome = DownloadOutcome::from_outcomes(vec![EntryOutcome::Failed("A".to_string())]);
        assert_eq!(outcome.status, STATUS_SUCCESS);
        assert_eq!(outcome.message, "Downloaded 0 videos. 1 videos failed.");
    }
}
