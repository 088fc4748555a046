// yt-dlp discovery: native binary or Python module

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use clap::ValueEnum;

use super::errors::DownloadError;

/// How yt-dlp gets launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EngineMode {
    /// Native binary first, Python module as fallback
    #[default]
    Auto,
    /// Native `yt-dlp` binary
    Cli,
    /// `python3 -m yt_dlp`
    Python,
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Cli => write!(f, "cli"),
            Self::Python => write!(f, "python"),
        }
    }
}

/// A resolved command line prefix for running yt-dlp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub prefix_args: Vec<String>,
}

impl Invocation {
    pub fn native(path: impl AsRef<Path>) -> Self {
        Self {
            program: path.as_ref().to_string_lossy().to_string(),
            prefix_args: Vec::new(),
        }
    }

    pub fn python(python_cmd: impl Into<String>) -> Self {
        Self {
            program: python_cmd.into(),
            prefix_args: vec!["-m".to_string(), "yt_dlp".to_string()],
        }
    }

    /// Full argument list: the prefix followed by `args`
    pub fn args_with(&self, args: Vec<String>) -> Vec<String> {
        let mut full = self.prefix_args.clone();
        full.extend(args);
        full
    }

    pub fn version(&self) -> Option<String> {
        let output = Command::new(&self.program)
            .args(&self.prefix_args)
            .arg("--version")
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!version.is_empty()).then_some(version)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.prefix_args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Locate the yt-dlp binary: explicit path, common install locations, then PATH
pub fn find_ytdlp(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.exists().then(|| path.to_path_buf());
    }

    let common_paths = [
        "/opt/homebrew/bin/yt-dlp", // Homebrew on Apple Silicon
        "/usr/local/bin/yt-dlp",    // Homebrew on Intel Mac
        "/usr/bin/yt-dlp",
    ];

    common_paths
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
        .or_else(|| which::which("yt-dlp").ok())
}

/// Check that `python_cmd` can import the yt_dlp module
pub fn python_has_ytdlp(python_cmd: &str) -> bool {
    match Command::new(python_cmd)
        .args(["-c", "import yt_dlp"])
        .output()
    {
        Ok(out) => out.status.success(),
        Err(_) => false,
    }
}

/// Pick how to launch yt-dlp for the requested mode
pub fn resolve_invocation(
    mode: EngineMode,
    ytdlp_path: Option<&Path>,
    python_cmd: &str,
) -> Result<Invocation, DownloadError> {
    let native = || find_ytdlp(ytdlp_path).map(Invocation::native);
    let python = || python_has_ytdlp(python_cmd).then(|| Invocation::python(python_cmd));

    let found = match mode {
        EngineMode::Cli => native(),
        EngineMode::Python => python(),
        EngineMode::Auto => native().or_else(python),
    };

    found.ok_or_else(|| {
        DownloadError::ToolNotFound(match mode {
            EngineMode::Cli => "yt-dlp binary not found (brew install yt-dlp)".to_string(),
            EngineMode::Python => {
                format!("Python yt_dlp module not importable with {} (pip3 install yt-dlp)", python_cmd)
            }
            EngineMode::Auto => {
                "Neither the yt-dlp binary nor the Python yt_dlp module is available".to_string()
            }
        })
    })
}
