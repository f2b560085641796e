//! Error types for the udf2pdf library.

use std::io;
use thiserror::Error;

/// Result type alias for udf2pdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during UDF conversion.
///
/// Every pipeline stage fails fast with one of these kinds; the conversion
/// orchestrator propagates the first failure unchanged after releasing its
/// scratch workspace. All failures are deterministic for a given input, so
/// there is no retry machinery.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the source, writing the workspace, or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source file is not a ZIP-compatible archive at all.
    #[error("Not a UDF archive: {0}")]
    ArchiveUnreadable(String),

    /// The source looks like an archive but its structure cannot be decoded.
    #[error("Corrupted archive: {0}")]
    ArchiveCorrupt(String),

    /// The designated markup member is absent from the extracted archive.
    #[error("Archive contains no member named '{0}'")]
    MemberNotFound(String),

    /// The markup member exists but is not well-formed.
    #[error("Malformed markup: {0}")]
    MarkupMalformed(String),

    /// The markup is well-formed but the designated payload element is absent.
    #[error("Markup contains no '{0}' element")]
    ElementMissing(String),

    /// PDF serialization failed.
    #[error("PDF write error: {0}")]
    PdfWrite(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            other => Error::ArchiveCorrupt(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MarkupMalformed(err.to_string())
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::PdfWrite(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MemberNotFound("content.xml".to_string());
        assert_eq!(
            err.to_string(),
            "Archive contains no member named 'content.xml'"
        );

        let err = Error::ElementMissing("content".to_string());
        assert_eq!(err.to_string(), "Markup contains no 'content' element");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_zip_error_conversion() {
        let zip_err = zip::result::ZipError::InvalidArchive("bad central directory".into());
        let err: Error = zip_err.into();
        assert!(matches!(err, Error::ArchiveCorrupt(_)));
    }
}
