//! Writes a generated file to where the user chose to save it.

#[cfg(unix)]
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use tempfile::NamedTempFile;

use crate::config::DEFAULT_FILENAME;
use crate::error::SaveError;
use crate::service::GeneratedFile;

/// Mode given to saved files on Unix when nothing is being replaced.
#[cfg(unix)]
const SAVED_FILE_MODE: u32 = 0o644;

/// Filename to offer in the save dialog. Directory parts sent by the server
/// are dropped, whichever separator they use.
pub fn suggested_name(file: &GeneratedFile) -> String {
    file.filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}

/// Permissions the saved file should end up with: those of the file being
/// replaced, otherwise world-readable like a regular download.
#[cfg(unix)]
fn final_permissions(path: &Path) -> fs::Permissions {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|meta| meta.permissions())
        .unwrap_or_else(|_| fs::Permissions::from_mode(SAVED_FILE_MODE))
}

/// Write `file` to `path`.
///
/// The bytes go to a temporary file next to `path` which is renamed over it
/// once complete; on any error the temporary is removed and `path` is left
/// untouched.
pub fn write_download(path: &Path, file: &GeneratedFile) -> Result<PathBuf, SaveError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |source: std::io::Error| SaveError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(&file.bytes).map_err(write_err)?;
    // Temporary files are created owner-only.
    #[cfg(unix)]
    tmp.as_file()
        .set_permissions(final_permissions(path))
        .map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!("Saved {} ({} bytes)", path.display(), file.bytes.len());
    Ok(path.to_path_buf())
}

/// Write `file` into `dir` under its suggested name.
pub fn save_in_dir(dir: &Path, file: &GeneratedFile) -> Result<PathBuf, SaveError> {
    write_download(&dir.join(suggested_name(file)), file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn generated(name: &str, body: &'static [u8]) -> GeneratedFile {
        GeneratedFile {
            filename: name.to_string(),
            bytes: Bytes::from_static(body),
        }
    }

    #[test]
    fn test_suggested_name_strips_directories() {
        assert_eq!(suggested_name(&generated("../../etc/site.dxf", b"")), "site.dxf");
        assert_eq!(suggested_name(&generated("..", b"")), DEFAULT_FILENAME);
        assert_eq!(suggested_name(&generated("..\\..\\x.dxf", b"")), "x.dxf");
        assert_eq!(suggested_name(&generated("C:\\out\\", b"")), DEFAULT_FILENAME);
    }

    #[test]
    fn test_save_in_dir_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_in_dir(dir.path(), &generated("site_42.dxf", b"0\nSECTION\n")).unwrap();

        assert_eq!(path, dir.path().join("site_42.dxf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"0\nSECTION\n");
        // Only the final file remains; the temporary was renamed away.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = save_in_dir(dir.path(), &generated("site_42.dxf", b"x")).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_replacing_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("vicinity_map.dxf");
        std::fs::write(&target, b"old").unwrap();
        std::fs::set_permissions(&target, std::fs::Permissions::from_mode(0o664)).unwrap();

        write_download(&target, &generated("vicinity_map.dxf", b"new")).unwrap();
        let mode = std::fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o664);
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("vicinity_map.dxf");
        std::fs::write(&target, b"old").unwrap();

        write_download(&target, &generated("vicinity_map.dxf", b"new")).unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn test_missing_directory_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("out.dxf");

        let err = write_download(&target, &generated("out.dxf", b"x")).unwrap_err();
        assert!(matches!(err, SaveError::Write { .. }));
        assert!(!target.exists());
    }
}
