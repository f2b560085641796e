//! Archive extraction for UDF containers.
//!
//! A UDF archive is an ordinary ZIP container. Extraction expands every entry
//! under a destination directory, preserving nested directory structure to
//! arbitrary depth. Extraction is all-or-nothing: the first bad entry,
//! truncated stream, or filesystem failure aborts the whole operation and the
//! caller must treat the destination contents as unusable.

mod locate;

pub use locate::locate_member;

use crate::error::{Error, Result};
use log::debug;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Extract every entry of the archive at `archive_path` into `dest_dir`.
///
/// Creates `dest_dir` (and intermediate directories) if absent. Entry names
/// that escape the destination directory are rejected as corrupt; hostile
/// archives must not be able to write outside the workspace.
///
/// # Returns
/// The paths of all extracted files (directories are created but not listed),
/// in archive entry order.
///
/// # Errors
/// * `Error::ArchiveUnreadable` - the file cannot be opened as a ZIP container
/// * `Error::ArchiveCorrupt` - an entry cannot be decoded or names an unsafe path
/// * `Error::Io` - workspace writes failed
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(archive_path: P, dest_dir: Q) -> Result<Vec<PathBuf>> {
    let archive_path = archive_path.as_ref();
    let dest_dir = dest_dir.as_ref();

    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(io::BufReader::new(file)).map_err(|e| match e {
        zip::result::ZipError::Io(e) => Error::Io(e),
        other => Error::ArchiveUnreadable(other.to_string()),
    })?;

    fs::create_dir_all(dest_dir)?;

    let mut extracted = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        // Malicious archives can contain entries like "../../../etc/passwd".
        let relative = entry.enclosed_name().ok_or_else(|| {
            Error::ArchiveCorrupt(format!("entry '{}' escapes the destination", entry.name()))
        })?;
        let out_path = dest_dir.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out_file = File::create(&out_path)?;
        io::copy(&mut entry, &mut out_file)?;
        extracted.push(out_path);
    }

    debug!(
        "extracted {} files from '{}' into '{}'",
        extracted.len(),
        archive_path.display(),
        dest_dir.display()
    );
    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_test_archive(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_extract_flat_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("test.udf");
        write_test_archive(&archive, &[("a.txt", "alpha"), ("b.txt", "beta")]);

        let dest = dir.path().join("out");
        let files = extract(&archive, &dest).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "alpha");
        assert_eq!(fs::read_to_string(dest.join("b.txt")).unwrap(), "beta");
    }

    #[test]
    fn test_extract_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("nested.udf");
        write_test_archive(&archive, &[("deep/er/est/file.xml", "<x/>")]);

        let dest = dir.path().join("out");
        let files = extract(&archive, &dest).unwrap();

        assert_eq!(files, vec![dest.join("deep/er/est/file.xml")]);
        assert_eq!(
            fs::read_to_string(dest.join("deep/er/est/file.xml")).unwrap(),
            "<x/>"
        );
    }

    #[test]
    fn test_extract_not_an_archive() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.udf");
        fs::write(&bogus, b"this is not a zip file at all").unwrap();

        let result = extract(&bogus, dir.path().join("out"));
        assert!(matches!(result, Err(Error::ArchiveUnreadable(_))));
    }

    #[test]
    fn test_extract_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract(dir.path().join("absent.udf"), dir.path().join("out"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
