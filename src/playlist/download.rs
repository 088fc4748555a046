use std::path::Path;

use tracing::{info, warn};

use super::models::{watch_url, DownloadOutcome, EntryOutcome, UNKNOWN_TITLE};
use super::{PlaylistError, PLAYLIST_NOT_FOUND};
use crate::downloader::diagnostics::{diagnose_error, headline};
use crate::downloader::{DownloadOptions, ExtractOptions, ExtractionEngine, PlaylistEntry};

pub const DEFAULT_OUTPUT_PATH: &str = "downloads";

/// Download every video of a playlist into `output_path`, one at a time.
///
/// Per-video failures are recorded in the outcome and never abort the run.
pub async fn download_playlist(
    engine: &dyn ExtractionEngine,
    url: &str,
    output_path: &Path,
) -> Result<DownloadOutcome, PlaylistError> {
    let info = engine
        .extract_info(url, ExtractOptions::enumeration())
        .await?
        .ok_or(PlaylistError::NotFound(PLAYLIST_NOT_FOUND))?;

    let options = DownloadOptions::best_into(output_path);
    let total = info.entries.iter().flatten().count();
    info!(
        engine = engine.name(),
        %url,
        videos = total,
        output = %output_path.display(),
        "starting playlist download"
    );

    let mut outcomes = Vec::with_capacity(total);
    for (index, entry) in info.entries.iter().flatten().enumerate() {
        let outcome = download_entry(engine, entry, &options).await;
        if let EntryOutcome::Downloaded(title) = &outcome {
            info!(position = index + 1, total, %title, "video downloaded");
        }
        outcomes.push(outcome);
    }

    let outcome = DownloadOutcome::from_outcomes(outcomes);
    info!(%url, message = %outcome.message, "playlist download finished");
    Ok(outcome)
}

async fn download_entry(
    engine: &dyn ExtractionEngine,
    entry: &PlaylistEntry,
    options: &DownloadOptions,
) -> EntryOutcome {
    let title = entry
        .title
        .clone()
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    let Some(video_id) = entry.video_id() else {
        warn!(%title, "playlist entry has no video id");
        return EntryOutcome::Failed(title);
    };

    match engine.download(&watch_url(video_id), options).await {
        Ok(()) => EntryOutcome::Downloaded(title),
        Err(e) => {
            let text = e.to_string();
            let diagnosis = diagnose_error(&text);
            warn!(
                %video_id,
                %title,
                reason = diagnosis.map_or("unrecognised failure", |r| r.description()),
                permanent = diagnosis.is_some_and(|r| r.is_permanent()),
                detail = headline(&text).unwrap_or(""),
                "video download failed"
            );
            EntryOutcome::Failed(title)
        }
    }
}
