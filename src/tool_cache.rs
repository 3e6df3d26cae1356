// Directory-per-version tool cache, keyed by (tool name, version).
//
// Layout mirrors the hosted runner's tool cache: the extracted install
// lands in `{root}/{tool}/{version}/` with a sibling `{version}.complete`
// marker written last, so an insert interrupted mid-copy never reads as a
// hit on the next run. A hit's contents are *not* re-validated; the entry
// is trusted to match what a fresh download of the same version would
// have produced.

use crate::{log_debug, log_info};
use colored::Colorize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const COMPLETE_SUFFIX: &str = ".complete";

pub struct ToolCache {
    root: PathBuf,
}

impl ToolCache {
    pub fn new(root: PathBuf) -> Self {
        ToolCache { root }
    }

    /// Picks the cache root: the runner-managed tool cache when running on
    /// CI (`RUNNER_TOOL_CACHE`), a per-user directory otherwise.
    pub fn from_env() -> Self {
        let root = env::var("RUNNER_TOOL_CACHE")
            .map(PathBuf::from)
            .ok()
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| dirs::home_dir().map(|home| home.join(".setup-ds").join("cache")))
            .unwrap_or_else(|| env::temp_dir().join("setup-ds-cache"));
        log_debug!("[Cache] Using cache root {}", root.display());
        ToolCache::new(root)
    }

    fn entry_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(version)
    }

    fn marker_path(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(format!("{version}{COMPLETE_SUFFIX}"))
    }

    /// Looks up a cached install. `Some` only when both the version
    /// directory and its completion marker exist.
    pub fn find(&self, tool: &str, version: &str) -> Option<PathBuf> {
        let dir = self.entry_dir(tool, version);
        if dir.is_dir() && self.marker_path(tool, version).is_file() {
            log_debug!("[Cache] Hit for {}@{} at {}", tool.bold(), version.bold(), dir.display());
            Some(dir)
        } else {
            log_debug!("[Cache] No entry for {}@{}", tool.bold(), version.bold());
            None
        }
    }

    /// Copies `src_dir` into the cache under (tool, version) and returns the
    /// cache-owned directory, which callers must use from then on instead of
    /// the extraction path. Any stale marker is removed before the copy
    /// starts and a fresh one is written only after it finishes, so the
    /// entry never looks complete while it is partially populated.
    pub fn add(&self, tool: &str, version: &str, src_dir: &Path) -> io::Result<PathBuf> {
        let dest = self.entry_dir(tool, version);
        if dest.exists() {
            fs::remove_dir_all(&dest)?;
        }
        match fs::remove_file(self.marker_path(tool, version)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        copy_tree(src_dir, &dest)?;
        fs::write(self.marker_path(tool, version), b"")?;
        log_info!(
            "[Cache] Stored {}@{} at {}",
            tool.bold(),
            version.bold(),
            dest.display().to_string().green()
        );
        Ok(dest)
    }
}

fn copy_tree(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
