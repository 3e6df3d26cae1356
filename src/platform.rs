// Maps the running OS and CPU architecture to the matching ds release
// asset. ds publishes a small fixed matrix (linux/darwin/windows x
// amd64/arm64); anything outside it fails here, before any network or
// filesystem access happens.

use crate::errors::SetupError;
use crate::schema::{ArchiveFormat, PlatformInfo};
use crate::log_debug;
use colored::Colorize;
use std::env;

/// The tool name as it appears in asset filenames and cache keys.
pub const TOOL_NAME: &str = "ds";

/// Resolves the platform for the machine this process is running on.
/// Deterministic within a process; cheap enough to call repeatedly.
pub fn current() -> Result<PlatformInfo, SetupError> {
    resolve(env::consts::OS, env::consts::ARCH)
}

/// Pure mapping from (OS token, arch token) to a `PlatformInfo`.
/// Accepts both the Rust constants (`macos`, `x86_64`, `aarch64`) and the
/// release-naming equivalents (`darwin`, `amd64`, `arm64`).
pub fn resolve(os: &str, arch: &str) -> Result<PlatformInfo, SetupError> {
    let platform = match os {
        "linux" => "linux",
        "macos" | "darwin" => "darwin",
        "windows" => "windows",
        other => return Err(SetupError::UnsupportedPlatform(other.to_string())),
    };

    let arch_part = match arch {
        "x86_64" | "amd64" => "amd64",
        "aarch64" | "arm64" => "arm64",
        other => return Err(SetupError::UnsupportedArchitecture(other.to_string())),
    };

    let archive_format = if platform == "windows" {
        ArchiveFormat::Zip
    } else {
        ArchiveFormat::TarGz
    };

    let file_name = format!(
        "{}-{}-{}.{}",
        TOOL_NAME,
        platform,
        arch_part,
        archive_format.extension()
    );
    let binary_name = if platform == "windows" {
        format!("{TOOL_NAME}.exe")
    } else {
        TOOL_NAME.to_string()
    };

    log_debug!(
        "[Platform] Resolved {}-{} -> asset {}, binary {}",
        platform.cyan(),
        arch_part.cyan(),
        file_name.bold(),
        binary_name.bold()
    );

    Ok(PlatformInfo {
        file_name,
        binary_name,
        archive_format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_pairs_produce_expected_asset_names() {
        let cases = [
            ("linux", "x86_64", "ds-linux-amd64.tar.gz", "ds"),
            ("linux", "aarch64", "ds-linux-arm64.tar.gz", "ds"),
            ("macos", "x86_64", "ds-darwin-amd64.tar.gz", "ds"),
            ("macos", "aarch64", "ds-darwin-arm64.tar.gz", "ds"),
            ("windows", "x86_64", "ds-windows-amd64.zip", "ds.exe"),
            ("windows", "aarch64", "ds-windows-arm64.zip", "ds.exe"),
        ];
        for (os, arch, file_name, binary_name) in cases {
            let info = resolve(os, arch).unwrap();
            assert_eq!(info.file_name, file_name);
            assert_eq!(info.binary_name, binary_name);
        }
    }

    #[test]
    fn release_naming_aliases_are_accepted() {
        assert_eq!(
            resolve("darwin", "arm64").unwrap(),
            resolve("macos", "aarch64").unwrap()
        );
        assert_eq!(
            resolve("linux", "amd64").unwrap(),
            resolve("linux", "x86_64").unwrap()
        );
    }

    #[test]
    fn windows_selects_zip_others_select_tarball() {
        assert_eq!(
            resolve("windows", "x86_64").unwrap().archive_format,
            ArchiveFormat::Zip
        );
        assert_eq!(
            resolve("linux", "x86_64").unwrap().archive_format,
            ArchiveFormat::TarGz
        );
        assert_eq!(
            resolve("macos", "aarch64").unwrap().archive_format,
            ArchiveFormat::TarGz
        );
    }

    #[test]
    fn unknown_os_is_rejected() {
        match resolve("freebsd", "x86_64") {
            Err(SetupError::UnsupportedPlatform(os)) => assert_eq!(os, "freebsd"),
            other => panic!("expected UnsupportedPlatform, got {other:?}"),
        }
    }

    #[test]
    fn unknown_arch_is_rejected() {
        match resolve("linux", "riscv64") {
            Err(SetupError::UnsupportedArchitecture(arch)) => assert_eq!(arch, "riscv64"),
            other => panic!("expected UnsupportedArchitecture, got {other:?}"),
        }
    }

    #[test]
    fn current_host_resolves() {
        // The test matrix only runs on supported platforms.
        assert!(current().is_ok());
    }
}
