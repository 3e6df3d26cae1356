// The install orchestrator: cache probe, download, extract, verify, chmod,
// cache insert. On a cache hit everything after the probe is skipped, so a
// re-run for an already-cached version performs no network or filesystem
// mutation at all.

use crate::errors::SetupError;
use crate::github::{DS_REPO, RELEASE_HOST};
use crate::platform::{self, TOOL_NAME};
use crate::runner::CommandRunner;
use crate::schema::DownloadResult;
use crate::tool_cache::ToolCache;
use crate::utils;
use crate::{log_debug, log_info};
use colored::Colorize;
use std::path::Path;

/// Fetches a release asset to a local path. Implemented over HTTPS by
/// `github::HttpFetcher`; tests substitute fakes so no install test ever
/// touches the network.
pub trait ArtifactFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), SetupError>;
}

/// Installs the given (already resolved) ds version, preferring the tool
/// cache. Returns the directory holding the executable.
pub fn install(
    version: &str,
    cache: &ToolCache,
    fetcher: &impl ArtifactFetcher,
) -> Result<DownloadResult, SetupError> {
    let platform = platform::current()?;

    if let Some(cached) = cache.find(TOOL_NAME, version) {
        log_info!(
            "[Installer] Cache hit for ds {} at {}",
            version.bold(),
            cached.display().to_string().green()
        );
        return Ok(DownloadResult {
            install_path: cached,
            resolved_version: version.to_string(),
            cache_hit: true,
        });
    }

    log_info!("[Installer] Cache miss for ds {}, downloading release asset", version.bold());
    let url = format!(
        "https://{RELEASE_HOST}/{DS_REPO}/releases/download/{version}/{}",
        platform.file_name
    );

    // Scratch space for the archive and its extraction; removed on drop.
    let scratch = tempfile::tempdir()?;
    let archive_path = scratch.path().join(&platform.file_name);
    fetcher.fetch(&url, &archive_path)?;

    let extracted = utils::extract_archive(&archive_path, scratch.path(), platform.archive_format)?;

    // Release archives are flat: the executable sits directly at the top
    // level, so a plain existence check is enough.
    let binary = extracted.join(&platform.binary_name);
    if !binary.is_file() {
        return Err(SetupError::BinaryNotFound { expected: binary });
    }
    utils::make_executable(&binary)?;

    let install_path = cache.add(TOOL_NAME, version, &extracted)?;
    log_info!(
        "[Installer] Installed ds {} to {}",
        version.bold(),
        install_path.display().to_string().green()
    );

    Ok(DownloadResult {
        install_path,
        resolved_version: version.to_string(),
        cache_hit: false,
    })
}

/// Smoke test: run the freshly installed binary once with `version`. A
/// failure here is fatal; the install cannot be trusted.
pub fn self_check(result: &DownloadResult, runner: &impl CommandRunner) -> Result<(), SetupError> {
    let platform = platform::current()?;
    let binary = result.install_path.join(&platform.binary_name);
    log_debug!("[Installer] Running self-check: {} version", binary.display());
    runner
        .run(&binary, &["version"])
        .map_err(SetupError::SelfCheckFailed)?;
    log_info!("[Installer] ds {} responds to 'version'", result.resolved_version.bold());
    Ok(())
}
