pub mod config;
pub mod downloader;
pub mod playlist;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};

use config::{Cli, EngineConfig};
use downloader::YtDlpEngine;
use server::AppState;

/// Resolve yt-dlp, then serve the API until shutdown
pub async fn run(cli: Cli) -> Result<()> {
    let engine_config = cli.engine_config();
    let engine = resolve_engine(engine_config.clone()).await?;

    let invocation = engine.invocation().clone();
    let version = tokio::task::spawn_blocking(move || invocation.version())
        .await
        .ok()
        .flatten();
    tracing::info!(
        invocation = %engine.invocation(),
        mode = %engine_config.mode,
        version = version.as_deref().unwrap_or("unknown"),
        "Using yt-dlp"
    );

    let state = AppState::new(Arc::new(engine));
    server::start_server(&cli.server_config(), state).await
}

/// Discovery probes the filesystem and may spawn the Python interpreter,
/// so it runs on the blocking pool
async fn resolve_engine(config: EngineConfig) -> Result<YtDlpEngine> {
    tokio::task::spawn_blocking(move || config.build_engine())
        .await
        .context("yt-dlp discovery task failed")?
        .context("yt-dlp is not available")
}

#[cfg(test)]
mod tests {
    use super::*;
    use downloader::EngineMode;

    #[tokio::test]
    async fn missing_engine_is_reported_from_blocking_pool() {
        let config = EngineConfig {
            mode: EngineMode::Cli,
            ytdlp_path: Some("/nonexistent/dir/yt-dlp".into()),
            python: "python3".to_string(),
            extract_timeout: None,
            proxy: None,
        };

        let err = resolve_engine(config).await.unwrap_err();
        assert_eq!(err.to_string(), "yt-dlp is not available");
    }
}
