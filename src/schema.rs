// Shared data structures for the setup step: the resolved platform
// description, the result of an install, the config file target, and the
// slice of the GitHub release payload we actually read.

use serde::Deserialize;
use std::path::PathBuf;

/// Archive format of a ds release asset. Linux and macOS releases ship as
/// tarballs, Windows releases as zip files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGz,
    Zip,
}

impl ArchiveFormat {
    /// The filename extension as it appears in release asset names.
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::Zip => "zip",
        }
    }
}

/// Everything the installer needs to know about the running host, derived
/// once per resolution from (OS, architecture). Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Release asset filename, e.g. `ds-linux-amd64.tar.gz`.
    pub file_name: String,
    /// Name of the executable inside the archive (`ds`, or `ds.exe` on windows).
    pub binary_name: String,
    pub archive_format: ArchiveFormat,
}

/// Outcome of the install orchestrator, consumed by the entry point to
/// publish outputs and locate the binary. Lives only for the process;
/// the tool cache is the durable artifact.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    /// Directory containing the ds executable.
    pub install_path: PathBuf,
    /// The version tag that was actually installed.
    pub resolved_version: String,
    /// Whether the install was served from the tool cache.
    pub cache_hit: bool,
}

/// Where the config file goes: the resolved file path and its parent
/// directory, which is created on demand before writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigTarget {
    pub resolved_path: PathBuf,
    pub directory: PathBuf,
}

/// The slice of GitHub's release JSON the version resolver needs: just the
/// tag. Download URLs are constructed from the predictable releases
/// pattern, so asset listings are never fetched.
#[derive(Debug, Deserialize)]
pub struct Release {
    pub tag_name: String,
}
