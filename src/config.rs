// Command line and environment configuration

use std::path::PathBuf;

use clap::Parser;

use crate::downloader::{resolve_invocation, DownloadError, EngineMode, Invocation, YtDlpEngine};

#[derive(Debug, Parser)]
#[command(name = "playlist-downloader")]
#[command(author, version, about = "HTTP API for listing and downloading YouTube playlists")]
pub struct Cli {
    /// Host to bind to
    #[arg(long, env = "PLAYLIST_DL_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PLAYLIST_DL_PORT", default_value_t = 8000)]
    pub port: u16,

    /// How to launch yt-dlp
    #[arg(long, env = "PLAYLIST_DL_ENGINE", value_enum, default_value_t = EngineMode::Auto)]
    pub engine: EngineMode,

    /// Explicit yt-dlp binary
    #[arg(long, env = "YTDLP_PATH")]
    pub ytdlp_path: Option<PathBuf>,

    /// Python interpreter used for `-m yt_dlp`
    #[arg(long, env = "YTDLP_PYTHON", default_value = "python3")]
    pub python: String,

    /// Seconds allowed for a metadata call (0, the default, means no limit)
    #[arg(long, env = "PLAYLIST_DL_EXTRACT_TIMEOUT", default_value_t = 0)]
    pub extract_timeout: u64,

    /// Proxy handed to yt-dlp
    #[arg(long, env = "PLAYLIST_DL_PROXY")]
    pub proxy: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub mode: EngineMode,
    pub ytdlp_path: Option<PathBuf>,
    pub python: String,
    /// `None` leaves metadata calls unbounded
    pub extract_timeout: Option<u64>,
    pub proxy: Option<String>,
}

impl Cli {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            mode: self.engine,
            ytdlp_path: self.ytdlp_path.clone(),
            python: self.python.clone(),
            extract_timeout: (self.extract_timeout > 0).then_some(self.extract_timeout),
            proxy: self
                .proxy
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        }
    }
}

impl EngineConfig {
    pub fn resolve_invocation(&self) -> Result<Invocation, DownloadError> {
        resolve_invocation(self.mode, self.ytdlp_path.as_deref(), &self.python)
    }

    pub fn build_engine(&self) -> Result<YtDlpEngine, DownloadError> {
        Ok(YtDlpEngine::new(self.resolve_invocation()?)
            .with_extract_timeout(self.extract_timeout)
            .with_proxy(self.proxy.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["playlist-downloader"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn explicit_flags_resolve_into_configs() {
        let cli = parse(&[
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
            "--engine",
            "python",
            "--python",
            "python3.12",
            "--extract-timeout",
            "30",
            "--proxy",
            "http://proxy:3128",
        ]);

        assert_eq!(
            cli.server_config(),
            ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 9000
            }
        );

        let engine = cli.engine_config();
        assert_eq!(engine.mode, EngineMode::Python);
        assert_eq!(engine.python, "python3.12");
        assert_eq!(engine.extract_timeout, Some(30));
        assert_eq!(engine.proxy.as_deref(), Some("http://proxy:3128"));
    }

    #[test]
    fn metadata_calls_are_unbounded_by_default() {
        let cli = Cli::try_parse_from(["playlist-downloader"]).unwrap();
        if std::env::var_os("PLAYLIST_DL_EXTRACT_TIMEOUT").is_none() {
            assert_eq!(cli.engine_config().extract_timeout, None);
        }
    }

    #[test]
    fn zero_timeout_disables_limit() {
        let cli = parse(&["--extract-timeout", "0"]);
        assert_eq!(cli.engine_config().extract_timeout, None);
    }

    #[test]
    fn blank_proxy_is_ignored() {
        let cli = parse(&["--proxy", "  "]);
        assert_eq!(cli.engine_config().proxy, None);
    }

    #[test]
    fn unknown_engine_is_rejected() {
        assert!(Cli::try_parse_from(["playlist-downloader", "--engine", "lux"]).is_err());
    }

    #[test]
    fn missing_binary_fails_to_build_engine() {
        let cli = parse(&["--engine", "cli", "--ytdlp-path", "/nonexistent/dir/yt-dlp"]);
        assert!(matches!(
            cli.engine_config().build_engine(),
            Err(DownloadError::ToolNotFound(_))
        ));
    }
}
