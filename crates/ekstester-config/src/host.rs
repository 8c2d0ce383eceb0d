//! Host environment: OS family and required executables
//!
//! Detected once at process start. Resolution takes a [`HostEnv`] value
//! instead of probing the host itself so it stays deterministic under test.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::{Error, Result};

/// Executable that must be on the search path
pub const AWS_CLI: &str = "aws";

/// OS family of the host, selecting platform-specific download URLs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HostPlatform {
    /// Linux (also used for any unrecognized OS)
    #[default]
    Linux,
    /// macOS
    Darwin,
}

impl HostPlatform {
    /// Platform of the running process
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS name as reported by `std::env::consts::OS`
    pub fn from_os(os: &str) -> Self {
        match os {
            "macos" | "darwin" => Self::Darwin,
            _ => Self::Linux,
        }
    }

    /// Token identifying the platform inside download URLs
    pub fn url_token(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Darwin => "darwin",
        }
    }

    /// Rewrite a Linux download URL to this platform's variant
    pub fn rewrite_url(&self, url: &str) -> String {
        match self {
            Self::Linux => url.to_string(),
            Self::Darwin => url.replace(Self::Linux.url_token(), self.url_token()),
        }
    }
}

impl std::fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url_token())
    }
}

/// Host facts consumed by the default provider and the resolver
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostEnv {
    /// OS family
    pub platform: HostPlatform,
    /// Absolute path of the `aws` CLI
    pub aws_cli_path: PathBuf,
}

impl HostEnv {
    /// Detect the host environment
    ///
    /// Fails with a precondition error when the `aws` CLI is not on the
    /// search path; callers treat that as fatal.
    pub fn detect() -> Result<Self> {
        let aws_cli_path = lookup_executable(AWS_CLI)?;
        let platform = HostPlatform::current();
        debug!(aws_cli = %aws_cli_path.display(), %platform, "detected host environment");
        Ok(Self {
            platform,
            aws_cli_path,
        })
    }
}

/// Resolve an executable on the search path with `which`
fn lookup_executable(tool: &str) -> Result<PathBuf> {
    let output = Command::new("which").arg(tool).output().map_err(|e| {
        Error::precondition(tool, format!("failed to look up {tool} on PATH: {e}"))
    })?;

    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !output.status.success() || path.is_empty() {
        return Err(Error::precondition(
            tool,
            format!("{tool} CLI is not installed (not found on PATH)"),
        ));
    }
    Ok(PathBuf::from(path))
}
