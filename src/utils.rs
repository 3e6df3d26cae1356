// Archive and file helpers shared by the installer.

use crate::schema::ArchiveFormat;
use crate::log_debug;
use colored::Colorize;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tar::Archive;
use zip::ZipArchive;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Unpacks a downloaded release archive into an `extracted/` subdirectory of
/// `dest` and returns that directory. The format comes from the platform
/// resolution, not from sniffing the file.
pub fn extract_archive(src: &Path, dest: &Path, format: ArchiveFormat) -> io::Result<PathBuf> {
    log_debug!(
        "[Utils] Extracting {:?} ({}) into {:?}",
        src.display(),
        format.extension().magenta(),
        dest.display()
    );

    let extracted_path = dest.join("extracted");
    fs::create_dir_all(&extracted_path)?;

    match format {
        ArchiveFormat::TarGz => {
            let tar_gz = File::open(src)?;
            let decompressor = GzDecoder::new(tar_gz);
            let mut archive = Archive::new(decompressor);
            archive.unpack(&extracted_path)?;
        }
        ArchiveFormat::Zip => {
            let file = File::open(src)?;
            let mut archive = ZipArchive::new(file)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            archive
                .extract(&extracted_path)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        }
    }

    log_debug!("[Utils] Archive contents available at {}", extracted_path.display());
    Ok(extracted_path)
}

/// `chmod +x` for the installed binary. Owner gets rwx, group and others rx.
#[cfg(unix)]
pub fn make_executable(path: &Path) -> io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    log_debug!("[Utils] Marked {} executable", path.display());
    Ok(())
}

/// Windows carries execute permission in the `.exe` extension; nothing to do.
#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Test fixture: builds a flat tar.gz with the given (name, contents)
/// entries, the same shape as a real ds release asset. Shared by the
/// installer tests.
#[cfg(test)]
pub(crate) fn build_targz(dest: &Path, entries: &[(&str, &[u8])]) {
    use flate2::Compression;
    use flate2::write::GzEncoder;

    let file = File::create(dest).unwrap();
    let encoder = GzEncoder::new(file, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (name, contents) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *contents).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn targz_round_trip() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("ds-linux-amd64.tar.gz");
        build_targz(&archive, &[("ds", b"fake binary"), ("LICENSE", b"MIT")]);

        let out = extract_archive(&archive, dir.path(), ArchiveFormat::TarGz).unwrap();
        assert_eq!(fs::read(out.join("ds")).unwrap(), b"fake binary");
        assert_eq!(fs::read(out.join("LICENSE")).unwrap(), b"MIT");
    }

    #[cfg(unix)]
    #[test]
    fn make_executable_sets_owner_exec_bit() {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("ds");
        fs::write(&bin, b"bin").unwrap();
        make_executable(&bin).unwrap();
        let mode = fs::metadata(&bin).unwrap().permissions().mode();
        assert_ne!(mode & 0o100, 0, "owner execute bit must be set");
    }
}
