// Parser for yt-dlp's `--newline` download output

use lazy_static::lazy_static;
use regex::Regex;

/// Something worth logging from a yt-dlp stdout line
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadEvent {
    /// `[download] Destination: <path>`
    Destination(String),
    /// `[download]  12.5% of ~ 310.04MiB at 374.36KiB/s ETA 11:59`
    Progress {
        percent: f32,
        size: String,
        speed: Option<String>,
        eta: Option<String>,
    },
    /// `[Merger] Merging formats into ...`
    Merging,
    /// `[download] <path> has already been downloaded`
    AlreadyDownloaded(String),
}

lazy_static! {
    static ref PROGRESS_RE: Regex = Regex::new(
        r"^\[download\]\s+(\d+(?:\.\d+)?)%\s+of\s+~?\s*(\S+)(?:\s+at\s+(\S+))?(?:\s+ETA\s+(\S+))?"
    )
    .unwrap();
    static ref DEST_RE: Regex = Regex::new(r"^\[download\]\s+Destination:\s+(.+)$").unwrap();
    static ref ALREADY_RE: Regex =
        Regex::new(r"^\[download\]\s+(.+?)\s+has already been downloaded").unwrap();
    static ref MERGE_RE: Regex = Regex::new(r"^\[Merger?\]\s+Merging").unwrap();
}

pub fn parse_line(line: &str) -> Option<DownloadEvent> {
    let line = line.trim();

    if let Some(caps) = DEST_RE.captures(line) {
        return Some(DownloadEvent::Destination(caps[1].trim().to_string()));
    }

    if let Some(caps) = ALREADY_RE.captures(line) {
        return Some(DownloadEvent::AlreadyDownloaded(caps[1].to_string()));
    }

    if let Some(caps) = PROGRESS_RE.captures(line) {
        let percent: f32 = caps[1].parse().ok()?;
        return Some(DownloadEvent::Progress {
            percent,
            size: caps[2].to_string(),
            speed: caps.get(3).map(|m| m.as_str().to_string()),
            eta: caps.get(4).map(|m| m.as_str().to_string()),
        });
    }

    if MERGE_RE.is_match(line) {
        return Some(DownloadEvent::Merging);
    }

    None
}
