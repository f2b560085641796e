//! # udf2pdf
//!
//! Convert UDF document archives to paginated, monospaced PDF files.
//!
//! A UDF archive is a ZIP container holding a `content.xml` member whose
//! `content` element carries the document body, usually as a CDATA section.
//! This library runs a strictly left-to-right pipeline over it:
//!
//! archive extraction → member location → payload extraction →
//! pagination → PDF serialization
//!
//! Each conversion owns a uniquely named scratch workspace that is removed
//! on every exit path, so concurrent conversions never collide and failures
//! never leak extracted files.
//!
//! ## Quick Start
//!
//! ```no_run
//! fn main() -> udf2pdf::Result<()> {
//!     // One call: UDF in, PDF out.
//!     udf2pdf::convert_to_pdf("document.udf", "document.pdf")?;
//!
//!     // Or keep the laid-out document for inspection first.
//!     let doc = udf2pdf::convert_file("document.udf")?;
//!     println!("{} pages", doc.page_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Scope
//!
//! The input schema is fixed (one `content.xml`, one `content` element) and
//! so is the output geometry (A4, fixed monospaced metrics). This is not a
//! general ZIP or XML library and makes no attempt to preserve rich
//! formatting beyond monospaced text reflow.

pub mod archive;
pub mod convert;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod payload;
pub mod render;

// Re-export commonly used types
pub use convert::{ConvertOptions, Workspace, CONTENT_MEMBER};
pub use error::{Error, Result};
pub use layout::{FontMetrics, PageGeometry};
pub use model::{Document, Metadata, Page};
pub use payload::PAYLOAD_TAG;

use std::path::Path;

/// Convert a UDF archive into a laid-out [`Document`].
///
/// # Example
///
/// ```no_run
/// let doc = udf2pdf::convert_file("document.udf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    convert::convert(path)
}

/// Convert a UDF archive into a laid-out document with custom options.
pub fn convert_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> Result<Document> {
    convert::convert_with_options(path, options)
}

/// Convert a UDF archive and write the resulting PDF to `dest`.
///
/// # Example
///
/// ```no_run
/// udf2pdf::convert_to_pdf("document.udf", "document.pdf").unwrap();
/// ```
pub fn convert_to_pdf<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dest: Q) -> Result<()> {
    convert::convert_to_file(src, dest)?;
    Ok(())
}

/// Extract the raw payload text from a UDF archive without laying it out.
///
/// # Example
///
/// ```no_run
/// let text = udf2pdf::extract_text("document.udf").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    convert::extract_text(path)
}

/// Convert a UDF archive into PDF bytes without touching the filesystem
/// for output.
pub fn convert_to_bytes<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let options = ConvertOptions::default();
    let doc = convert::convert_with_options(path, &options)?;
    render::to_pdf(&doc, &options.geometry, &options.metrics)
}
