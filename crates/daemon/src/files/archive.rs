//! Zip archive extraction.
//!
//! Extraction is synchronous (the zip reader seeks within the archive file)
//! and runs under `spawn_blocking` from the engine.

use std::fs::{self, File};
use std::io;
use std::path::Path;

use zip::ZipArchive;

use super::error::{classify_io, EngineError};

/// Extract a zip archive into the target directory, recreating the
/// archive's internal directory structure.
///
/// Entry names are validated before any write: an entry whose name would
/// land outside `target` (absolute, or traversal segments) fails the whole
/// extraction with [`EngineError::InvalidPath`].
pub(crate) fn extract_zip(source: &Path, target: &Path) -> Result<(), EngineError> {
    let file = File::open(source).map_err(|e| classify_io(source, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| EngineError::Archive {
        path: source.to_path_buf(),
        source: e,
    })?;

    fs::create_dir_all(target).map_err(|e| classify_io(target, e))?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| EngineError::Archive {
            path: source.to_path_buf(),
            source: e,
        })?;

        let relative = entry
            .enclosed_name()
            .ok_or_else(|| EngineError::InvalidPath(entry.name().to_string()))?;
        let destination = target.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&destination).map_err(|e| classify_io(&destination, e))?;
            continue;
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| classify_io(parent, e))?;
        }

        let mut output = File::create(&destination).map_err(|e| classify_io(&destination, e))?;
        io::copy(&mut entry, &mut output).map_err(|e| classify_io(&destination, e))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(mode);
            fs::set_permissions(&destination, perms).map_err(|e| classify_io(&destination, e))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_archive(path: &Path, entries: &[(&str, Option<&[u8]>)]) {
        let file = File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            match content {
                Some(bytes) => {
                    writer.start_file(*name, options).unwrap();
                    writer.write_all(bytes).unwrap();
                }
                None => {
                    writer.add_directory(*name, options).unwrap();
                }
            }
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_extract_recreates_structure() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("bundle.zip");
        build_archive(
            &archive_path,
            &[
                ("readme.txt", Some(b"hello".as_slice())),
                ("sub", None),
                ("sub/nested.txt", Some(b"nested".as_slice())),
            ],
        );

        let target = temp_dir.path().join("bundle");
        extract_zip(&archive_path, &target).unwrap();

        assert_eq!(fs::read(target.join("readme.txt")).unwrap(), b"hello");
        assert!(target.join("sub").is_dir());
        assert_eq!(fs::read(target.join("sub/nested.txt")).unwrap(), b"nested");
    }

    #[test]
    fn test_extract_creates_missing_parents() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("deep.zip");
        // No explicit directory entry for "a/b".
        build_archive(&archive_path, &[("a/b/c.txt", Some(b"deep".as_slice()))]);

        let target = temp_dir.path().join("deep");
        extract_zip(&archive_path, &target).unwrap();

        assert_eq!(fs::read(target.join("a/b/c.txt")).unwrap(), b"deep");
    }

    #[test]
    fn test_extract_rejects_traversal_entries() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("evil.zip");
        build_archive(&archive_path, &[("../escape.txt", Some(b"bad".as_slice()))]);

        let target = temp_dir.path().join("evil");
        let result = extract_zip(&archive_path, &target);
        assert!(matches!(result, Err(EngineError::InvalidPath(_))));
        assert!(!temp_dir.path().join("escape.txt").exists());
    }

    #[test]
    fn test_extract_not_a_zip() {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("fake.zip");
        fs::write(&archive_path, b"this is not a zip archive").unwrap();

        let target = temp_dir.path().join("fake");
        let result = extract_zip(&archive_path, &target);
        assert!(matches!(result, Err(EngineError::Archive { .. })));
    }
}
