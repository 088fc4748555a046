// Extraction engine trait definition

use async_trait::async_trait;

use super::errors::DownloadError;
use super::models::{DownloadOptions, ExtractOptions, PlaylistInfo};

/// The media-extraction engine the playlist operations delegate to
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Name of the engine (for logging)
    fn name(&self) -> &'static str;

    /// Resolve a URL to playlist metadata without downloading media.
    /// `Ok(None)` means the engine produced no result for the URL.
    async fn extract_info(
        &self,
        url: &str,
        options: ExtractOptions,
    ) -> Result<Option<PlaylistInfo>, DownloadError>;

    /// Download a single video URL to disk
    async fn download(&self, url: &str, options: &DownloadOptions) -> Result<(), DownloadError>;
}
