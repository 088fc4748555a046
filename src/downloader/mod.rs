// Extraction engine layer: the trait the playlist operations call and the
// yt-dlp subprocess implementation behind it

pub mod diagnostics;
pub mod errors;
pub mod models;
pub mod progress;
pub mod tools;
pub mod traits;
pub mod utils;
pub mod ytdlp;

#[cfg(test)]
pub(crate) mod test_support;

pub use errors::DownloadError;
pub use models::{DownloadOptions, ExtractOptions, PlaylistEntry, PlaylistInfo};
pub use tools::{resolve_invocation, EngineMode, Invocation};
pub use traits::ExtractionEngine;
pub use ytdlp::YtDlpEngine;
