// Error types for the extraction engine

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DownloadError {
    /// Network timeout while talking to the video site
    #[error("Network timeout: {0}")]
    NetworkTimeout(String),

    /// The site refused the request (429, bot check, etc.)
    #[error("Request blocked by YouTube: {0}")]
    BlockedByYouTube(String),

    /// yt-dlp or python not found in system
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// URL the engine could not handle
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse yt-dlp JSON output
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Command execution failed
    #[error("Execution error: {0}")]
    ExecutionError(String),

    /// Anything else, carrying yt-dlp's own message
    #[error("{0}")]
    Unknown(String),
}

// yt-dlp only reports failures as text on stderr
impl From<String> for DownloadError {
    fn from(s: String) -> Self {
        let s = s.trim().to_string();
        let lower = s.to_lowercase();

        if lower.contains("timeout") || lower.contains("timed out") {
            return Self::NetworkTimeout(s);
        }

        if lower.contains("http error 429")
            || lower.contains("confirm you're not a bot")
            || lower.contains("confirm you’re not a bot")
        {
            return Self::BlockedByYouTube(s);
        }

        if lower.contains("no such file") || lower.contains("command not found") {
            return Self::ToolNotFound(s);
        }

        if lower.contains("unsupported url") || lower.contains("is not a valid url") {
            return Self::InvalidUrl(s);
        }

        Self::Unknown(s)
    }
}

impl From<&str> for DownloadError {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}
