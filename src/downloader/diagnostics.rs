// Failure diagnostics for yt-dlp stderr
//
// A failed per-video download is recorded only by title in the response,
// so the reason is worked out here and attached to the log line instead.

use std::fmt;

/// Known reasons the site refuses a single video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingReason {
    DrmProtected,
    MembersOnly,
    AgeRestricted,
    PrivateVideo,
    VideoUnavailable,
    GeoBlocked,
    RateLimited,
    BotDetection,
    Http403Forbidden,
    NetworkTimeout,
}

/// Checked top to bottom; the first matching row wins
const SIGNATURES: &[(BlockingReason, &[&str])] = &[
    (
        BlockingReason::DrmProtected,
        &["drm", "widevine", "playready", "fairplay", "requires purchase", "youtube premium"],
    ),
    (
        BlockingReason::MembersOnly,
        &["members only", "members-only", "join this channel", "available to members"],
    ),
    (
        BlockingReason::AgeRestricted,
        &["age-restricted", "sign in to confirm your age", "inappropriate for some users"],
    ),
    (
        BlockingReason::PrivateVideo,
        &["private video", "video is private"],
    ),
    (
        BlockingReason::VideoUnavailable,
        &["video unavailable", "video has been removed", "no longer available", "video is unavailable"],
    ),
    (
        BlockingReason::GeoBlocked,
        &["available in your country", "blocked it in your country", "geo restriction", "geo-restricted"],
    ),
    (
        BlockingReason::RateLimited,
        &["http error 429", "too many requests", "rate limit"],
    ),
    (
        BlockingReason::BotDetection,
        &["not a bot", "captcha", "unusual traffic"],
    ),
    (
        BlockingReason::Http403Forbidden,
        &["http error 403", "forbidden"],
    ),
    (
        BlockingReason::NetworkTimeout,
        &["timed out", "timeout", "connection refused", "network is unreachable"],
    ),
];

impl BlockingReason {
    pub fn description(&self) -> &'static str {
        match self {
            Self::DrmProtected => "DRM-protected content",
            Self::MembersOnly => "Members-only content",
            Self::AgeRestricted => "Age-restricted content",
            Self::PrivateVideo => "Private video",
            Self::VideoUnavailable => "Video unavailable",
            Self::GeoBlocked => "Geographic restriction",
            Self::RateLimited => "Rate limited by YouTube",
            Self::BotDetection => "Bot detection triggered",
            Self::Http403Forbidden => "Access denied (HTTP 403)",
            Self::NetworkTimeout => "Network timeout",
        }
    }

    /// Retrying the same video later will not help
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::DrmProtected | Self::PrivateVideo | Self::VideoUnavailable
        )
    }
}

impl fmt::Display for BlockingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Match engine error text against the known blocking signatures
pub fn diagnose_error(error: &str) -> Option<BlockingReason> {
    let lower = error.to_lowercase();

    SIGNATURES
        .iter()
        .find(|(_, patterns)| patterns.iter().any(|p| lower.contains(p)))
        .map(|(reason, _)| *reason)
}

/// The first `ERROR:` line yt-dlp printed, or the first non-empty line
pub fn headline(error: &str) -> Option<&str> {
    let mut lines = error.lines().map(str::trim).filter(|l| !l.is_empty());
    let first = lines.clone().next();

    lines.find(|l| l.starts_with("ERROR:")).or(first)
}
