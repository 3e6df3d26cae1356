// Config file handling: resolving where the ds config lives and writing
// it with tightened permissions.
//
// Resolution order: an explicit override (with `~` expansion) wins;
// otherwise windows uses `%APPDATA%\ds\config.yaml` and everything else
// `~/.config/ds/config.yaml`. Resolution itself does no filesystem I/O,
// so the entry point can report "where the config would go" without
// writing anything.

use crate::errors::SetupError;
use crate::schema::ConfigTarget;
use crate::{log_debug, log_info};
use colored::Colorize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

const CONFIG_FILE_NAME: &str = "config.yaml";
const CONFIG_DIR_NAME: &str = "ds";

/// Resolves the config file location. Pure apart from reading the home
/// directory and, on windows, `APPDATA`.
pub fn resolve_target(override_path: Option<&str>) -> Result<ConfigTarget, SetupError> {
    let resolved_path = match override_path.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => {
            let expanded = shellexpand::tilde(path);
            std::path::absolute(PathBuf::from(expanded.as_ref()))?
        }
        None if cfg!(windows) => {
            let appdata = env::var("APPDATA")
                .map_err(|_| SetupError::MissingEnvironment("APPDATA"))?;
            PathBuf::from(appdata).join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
        }
        None => {
            let home = dirs::home_dir().ok_or(SetupError::MissingEnvironment("HOME"))?;
            home.join(".config").join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)
        }
    };

    let directory = resolved_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"));

    log_debug!("[Config] Resolved config target: {}", resolved_path.display());
    Ok(ConfigTarget { resolved_path, directory })
}

/// Writes the config content to the resolved target, creating parent
/// directories as needed. On unix the file is restricted to owner
/// read/write immediately after writing; the content may hold credentials.
/// Masking it from logs is the caller's job, done before this runs.
pub fn write(target: &ConfigTarget, content: &str) -> Result<(), SetupError> {
    fs::create_dir_all(&target.directory)?;
    fs::write(&target.resolved_path, content)?;

    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&target.resolved_path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&target.resolved_path, perms)?;
    }

    log_info!(
        "[Config] Wrote config file to {}",
        target.resolved_path.display().to_string().green()
    );
    Ok(())
}
