// yt-dlp subprocess engine
//
// Metadata is read from `--dump-single-json`; downloads run one video per
// process with `--newline` so stdout can be followed line by line.

use async_trait::async_trait;
use tracing::{debug, info};

use super::errors::DownloadError;
use super::models::{DownloadOptions, ExtractOptions, PlaylistInfo};
use super::progress::{parse_line, DownloadEvent};
use super::tools::Invocation;
use super::traits::ExtractionEngine;
use super::utils::{run_output_with_timeout, run_streaming};

#[derive(Debug)]
pub struct YtDlpEngine {
    invocation: Invocation,
    /// Upper bound for metadata calls; downloads are never bounded
    extract_timeout: Option<u64>,
    proxy: Option<String>,
}

impl YtDlpEngine {
    pub fn new(invocation: Invocation) -> Self {
        Self {
            invocation,
            extract_timeout: None,
            proxy: None,
        }
    }

    pub fn with_extract_timeout(mut self, seconds: Option<u64>) -> Self {
        self.extract_timeout = seconds.filter(|s| *s > 0);
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy.filter(|p| !p.is_empty());
        self
    }

    pub fn invocation(&self) -> &Invocation {
        &self.invocation
    }

    fn extract_args(&self, url: &str, options: ExtractOptions) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--quiet".to_string(),
            "--no-warnings".to_string(),
        ];

        if options.flat {
            args.push("--flat-playlist".to_string());
        }
        if options.ignore_errors {
            args.push("--ignore-errors".to_string());
        }
        self.push_proxy(&mut args);

        args.push(url.to_string());
        self.invocation.args_with(args)
    }

    fn download_args(&self, url: &str, options: &DownloadOptions) -> Vec<String> {
        let mut args = vec![
            "-f".to_string(),
            options.format.clone(),
            "-o".to_string(),
            options.output_template(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "--newline".to_string(),
        ];
        self.push_proxy(&mut args);

        args.push(url.to_string());
        self.invocation.args_with(args)
    }

    fn push_proxy(&self, args: &mut Vec<String>) {
        if let Some(proxy) = &self.proxy {
            args.push("--proxy".to_string());
            args.push(proxy.clone());
        }
    }
}

/// Interpret the stdout of a `--dump-single-json` run
fn parse_info(stdout: &[u8]) -> Result<Option<PlaylistInfo>, DownloadError> {
    let text = String::from_utf8_lossy(stdout);
    let text = text.trim();

    if text.is_empty() {
        return Ok(None);
    }

    let json: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| DownloadError::ParseError(format!("Invalid JSON: {}", e)))?;

    Ok(PlaylistInfo::from_json(&json))
}

#[async_trait]
impl ExtractionEngine for YtDlpEngine {
    fn name(&self) -> &'static str {
        if self.invocation.prefix_args.is_empty() {
            "cli-yt-dlp"
        } else {
            "python-yt-dlp"
        }
    }

    async fn extract_info(
        &self,
        url: &str,
        options: ExtractOptions,
    ) -> Result<Option<PlaylistInfo>, DownloadError> {
        let args = self.extract_args(url, options);
        debug!(program = %self.invocation.program, args = %args.join(" "), "running yt-dlp extract");

        let output =
            run_output_with_timeout(&self.invocation.program, &args, self.extract_timeout).await?;
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            // With --ignore-errors yt-dlp exits non-zero on broken entries
            // but still prints whatever it resolved
            if !options.ignore_errors {
                return Err(DownloadError::from(stderr.to_string()));
            }
            debug!(status = %output.status, stderr = %stderr.trim(), "yt-dlp extract reported errors");
        }

        parse_info(&output.stdout)
    }

    async fn download(&self, url: &str, options: &DownloadOptions) -> Result<(), DownloadError> {
        tokio::fs::create_dir_all(&options.output_path)
            .await
            .map_err(|e| {
                DownloadError::ExecutionError(format!(
                    "Failed to create {}: {}",
                    options.output_path.display(),
                    e
                ))
            })?;

        let args = self.download_args(url, options);
        debug!(program = %self.invocation.program, args = %args.join(" "), "running yt-dlp download");

        let mut destination: Option<String> = None;
        let (status, stderr) = run_streaming(&self.invocation.program, &args, |line| {
            match parse_line(line) {
                Some(DownloadEvent::Destination(path)) => {
                    debug!(%url, %path, "download started");
                    destination = Some(path);
                }
                Some(DownloadEvent::AlreadyDownloaded(path)) => {
                    debug!(%url, %path, "file already present");
                    destination = Some(path);
                }
                Some(DownloadEvent::Progress { percent, size, speed, eta }) => {
                    debug!(
                        %url,
                        percent,
                        %size,
                        speed = speed.as_deref().unwrap_or("?"),
                        eta = eta.as_deref().unwrap_or("?"),
                        "download progress"
                    );
                }
                Some(DownloadEvent::Merging) => debug!(%url, "merging formats"),
                None => {}
            }
        })
        .await?;

        if status.success() {
            info!(%url, file = destination.as_deref().unwrap_or("?"), "download complete");
            return Ok(());
        }

        if stderr.trim().is_empty() {
            return Err(DownloadError::ExecutionError(format!(
                "yt-dlp exited with {}",
                status
            )));
        }
        Err(DownloadError::from(stderr))
    }
}
