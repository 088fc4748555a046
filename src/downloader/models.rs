// Engine-facing data models

use std::path::{Path, PathBuf};

/// One video record as surfaced by the engine for a playlist.
///
/// yt-dlp entries are loosely typed, so every field is optional and the
/// record is validated once here instead of deep inside the handlers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistEntry {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Seconds, as reported by the engine (may be fractional)
    pub duration: Option<f64>,
}

impl PlaylistEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Build an entry from one element of yt-dlp's `entries` array.
    /// Returns `None` for `null` and anything that is not an object.
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        if !json.is_object() {
            return None;
        }

        Some(Self {
            id: json["id"].as_str().map(|s| s.to_string()),
            title: json["title"].as_str().map(|s| s.to_string()),
            duration: json["duration"].as_f64(),
        })
    }

    /// Identifier, if present and non-empty
    pub fn video_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Playlist-level result of an engine `extract_info` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaylistInfo {
    pub title: Option<String>,
    /// `None` marks an entry the engine reported as null or unusable
    pub entries: Vec<Option<PlaylistEntry>>,
}

impl PlaylistInfo {
    pub fn new(title: impl Into<String>, entries: Vec<Option<PlaylistEntry>>) -> Self {
        Self {
            title: Some(title.into()),
            entries,
        }
    }

    /// Parse the document printed by `yt-dlp --dump-single-json`.
    /// A JSON `null` means the engine found nothing.
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        if json.is_null() {
            return None;
        }

        let entries = json["entries"]
            .as_array()
            .map(|arr| arr.iter().map(PlaylistEntry::from_json).collect())
            .unwrap_or_default();

        Some(Self {
            title: json["title"].as_str().map(|s| s.to_string()),
            entries,
        })
    }
}

/// Options for the engine's "info, no download" operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Return lightweight entries without resolving each video
    pub flat: bool,
    /// Keep going past per-entry errors
    pub ignore_errors: bool,
}

impl ExtractOptions {
    /// Metadata listing: flat, tolerant of broken entries
    pub fn listing() -> Self {
        Self {
            flat: true,
            ignore_errors: true,
        }
    }

    /// Enumeration before a download run: flat, but engine errors surface
    pub fn enumeration() -> Self {
        Self {
            flat: true,
            ignore_errors: false,
        }
    }
}

/// Options for the engine's download operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    /// yt-dlp format selector
    pub format: String,
    pub output_path: PathBuf,
}

impl DownloadOptions {
    pub fn best_into(output_path: impl AsRef<Path>) -> Self {
        Self {
            format: "best".to_string(),
            output_path: output_path.as_ref().to_path_buf(),
        }
    }

    /// `{output_path}/%(title)s.%(ext)s`
    pub fn output_template(&self) -> String {
        self.output_path
            .join("%(title)s.%(ext)s")
            .to_string_lossy()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_flat_playlist_document() {
        let doc = json!({
            "_type": "playlist",
            "title": "Lo-fi",
            "entries": [
                {"_type": "url", "id": "abc", "title": "First", "duration": 212.0},
                null,
                {"_type": "url", "title": "No id"},
                "garbage"
            ]
        });

        let info = PlaylistInfo::from_json(&doc).unwrap();
        assert_eq!(info.title.as_deref(), Some("Lo-fi"));
        assert_eq!(info.entries.len(), 4);

        let first = info.entries[0].as_ref().unwrap();
        assert_eq!(first.video_id(), Some("abc"));
        assert_eq!(first.duration, Some(212.0));
        assert!(info.entries[1].is_none());
        assert_eq!(info.entries[2].as_ref().unwrap().video_id(), None);
        assert!(info.entries[3].is_none());
    }

    #[test]
    fn null_document_is_no_result() {
        assert!(PlaylistInfo::from_json(&serde_json::Value::Null).is_none());
    }

    #[test]
    fn missing_entries_is_empty_list() {
        let info = PlaylistInfo::from_json(&json!({"title": "Single"})).unwrap();
        assert!(info.entries.is_empty());
    }

    #[test]
    fn empty_id_is_not_usable() {
        let entry = PlaylistEntry::from_json(&json!({"id": ""})).unwrap();
        assert_eq!(entry.video_id(), None);
    }

    #[test]
    fn output_template_joins_directory() {
        let opts = DownloadOptions::best_into("downloads");
        assert_eq!(opts.format, "best");
        assert_eq!(
            opts.output_template(),
            Path::new("downloads").join("%(title)s.%(ext)s").to_string_lossy()
        );
    }
}
