// In-memory engine for exercising the playlist operations and routes

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use super::errors::DownloadError;
use super::models::{DownloadOptions, ExtractOptions, PlaylistInfo};
use super::traits::ExtractionEngine;

pub struct ScriptedEngine {
    info: Result<Option<PlaylistInfo>, DownloadError>,
    failing_urls: HashSet<String>,
    extract_calls: Mutex<Vec<(String, ExtractOptions)>>,
    downloads: Mutex<Vec<(String, DownloadOptions)>>,
}

impl ScriptedEngine {
    pub fn returning(info: Option<PlaylistInfo>) -> Self {
        Self::with_result(Ok(info))
    }

    pub fn failing(err: DownloadError) -> Self {
        Self::with_result(Err(err))
    }

    fn with_result(info: Result<Option<PlaylistInfo>, DownloadError>) -> Self {
        Self {
            info,
            failing_urls: HashSet::new(),
            extract_calls: Mutex::new(Vec::new()),
            downloads: Mutex::new(Vec::new()),
        }
    }

    /// Make `download` fail for the watch URL of `video_id`
    pub fn fail_download(mut self, video_id: &str) -> Self {
        self.failing_urls
            .insert(format!("https://www.youtube.com/watch?v={}", video_id));
        self
    }

    pub fn extract_calls(&self) -> Vec<(String, ExtractOptions)> {
        self.extract_calls.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<(String, DownloadOptions)> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn extract_info(
        &self,
        url: &str,
        options: ExtractOptions,
    ) -> Result<Option<PlaylistInfo>, DownloadError> {
        self.extract_calls
            .lock()
            .unwrap()
            .push((url.to_string(), options));
        self.info.clone()
    }

    async fn download(&self, url: &str, options: &DownloadOptions) -> Result<(), DownloadError> {
        self.downloads
            .lock()
            .unwrap()
            .push((url.to_string(), options.clone()));

        if self.failing_urls.contains(url) {
            return Err(DownloadError::from("ERROR: Video unavailable"));
        }
        Ok(())
    }
}
