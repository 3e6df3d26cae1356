// Error taxonomy for the setup step. Everything here is fatal: the first
// error encountered aborts the run and becomes the single user-visible
// failure message. Per-plugin install failures are deliberately *not*
// represented here; they are warnings collected by the plugin loop
// (see `plugins::PluginOutcome`).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    /// The host OS has no ds release artifact.
    #[error("unsupported operating system '{0}' (supported: linux, macos, windows)")]
    UnsupportedPlatform(String),

    /// The host CPU architecture has no ds release artifact.
    #[error("unsupported architecture '{0}' (supported: x86_64, aarch64)")]
    UnsupportedArchitecture(String),

    /// An OS-conventional environment variable the resolver depends on is unset.
    #[error("required environment variable '{0}' is not set")]
    MissingEnvironment(&'static str),

    /// The latest-release lookup against the release index failed.
    #[error("failed to resolve the latest ds release: {0}")]
    ReleaseLookup(String),

    /// Fetching the release asset failed (network, HTTP status, or local write).
    #[error("failed to download {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    /// The archive extracted cleanly but the expected executable is not in it.
    /// Release archives are flat; no recursive search is attempted.
    #[error("expected binary not found in extracted archive: {}", expected.display())]
    BinaryNotFound { expected: PathBuf },

    /// The freshly installed binary failed its `ds version` smoke test.
    #[error("installed binary failed its version check: {0}")]
    SelfCheckFailed(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
