//! UDF container detection.
//!
//! UDF archives are ZIP containers, so a cheap magic-byte check lets the
//! pipeline classify "not an archive at all" (`ArchiveUnreadable`) before the
//! decoder runs and without touching the central directory.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// ZIP local-file-header magic.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// End-of-central-directory magic; a ZIP with no entries starts with this.
const ZIP_EMPTY_MAGIC: &[u8] = b"PK\x05\x06";

/// Check whether the given bytes start a ZIP-compatible container.
pub fn is_udf_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC) || data.starts_with(ZIP_EMPTY_MAGIC)
}

/// Verify that the file at `path` begins with a ZIP container signature.
///
/// # Returns
/// * `Ok(())` if the file starts with a ZIP magic
/// * `Err(Error::ArchiveUnreadable)` otherwise
pub fn ensure_udf<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut header = [0u8; 4];
    if let Err(err) = file.read_exact(&mut header) {
        // A file shorter than the signature cannot be a ZIP container.
        return if err.kind() == io::ErrorKind::UnexpectedEof {
            Err(Error::ArchiveUnreadable(format!(
                "'{}' is too short to be a ZIP container",
                path.display()
            )))
        } else {
            Err(Error::Io(err))
        };
    }
    if !is_udf_bytes(&header) {
        return Err(Error::ArchiveUnreadable(format!(
            "'{}' does not start with a ZIP signature",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_udf_short_file_is_unreadable_not_io() {
        let dir = tempfile::tempdir().unwrap();

        let truncated = dir.path().join("truncated.udf");
        std::fs::write(&truncated, b"PK").unwrap();
        assert!(matches!(
            ensure_udf(&truncated),
            Err(Error::ArchiveUnreadable(_))
        ));

        let empty = dir.path().join("empty.udf");
        std::fs::write(&empty, b"").unwrap();
        assert!(matches!(ensure_udf(&empty), Err(Error::ArchiveUnreadable(_))));
    }

    #[test]
    fn test_ensure_udf_accepts_zip_signature() {
        let dir = tempfile::tempdir().unwrap();
        let ok = dir.path().join("ok.udf");
        std::fs::write(&ok, b"PK\x03\x04rest of the container").unwrap();
        assert!(ensure_udf(&ok).is_ok());
    }

    #[test]
    fn test_is_udf_bytes() {
        assert!(is_udf_bytes(b"PK\x03\x04rest"));
        assert!(is_udf_bytes(b"PK\x05\x06"));
        assert!(!is_udf_bytes(b"PK\x01\x02"));
        assert!(!is_udf_bytes(b"%PDF-1.7"));
        assert!(!is_udf_bytes(b""));
        assert!(!is_udf_bytes(b"PK"));
    }
}
