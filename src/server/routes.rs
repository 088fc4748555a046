use std::path::PathBuf;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::error::ApiError;
use super::extract::{PlaylistUrl, ValidatedJson};
use super::AppState;
use crate::playlist::{
    download_playlist, fetch_playlist, DownloadOutcome, PlaylistListResult, DEFAULT_OUTPUT_PATH,
};

pub const HEALTH_MESSAGE: &str = "YouTube Playlist Downloader API is running";

#[derive(Debug, Deserialize)]
pub struct PlaylistRequest {
    pub url: PlaylistUrl,
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub url: PlaylistUrl,
    #[serde(default)]
    pub output_path: Option<String>,
}

impl DownloadRequest {
    /// Target directory; absent, null or blank falls back to `downloads`
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(
            self.output_path
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .unwrap_or(DEFAULT_OUTPUT_PATH),
        )
    }
}

pub async fn root() -> Json<Value> {
    Json(json!({ "message": HEALTH_MESSAGE }))
}

pub async fn fetch_playlist_handler(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PlaylistRequest>,
) -> Result<Json<PlaylistListResult>, ApiError> {
    tracing::info!(url = %req.url, "fetching playlist");
    let result = fetch_playlist(state.engine.as_ref(), req.url.as_str()).await?;
    Ok(Json(result))
}

pub async fn download_playlist_handler(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<DownloadRequest>,
) -> Result<Json<DownloadOutcome>, ApiError> {
    let output_dir = req.output_dir();
    tracing::info!(url = %req.url, output = %output_dir.display(), "downloading playlist");
    let outcome = download_playlist(state.engine.as_ref(), req.url.as_str(), &output_dir).await?;
    Ok(Json(outcome))
}
