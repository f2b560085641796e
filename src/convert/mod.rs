//! Conversion orchestration.
//!
//! `convert` sequences the pipeline (extract the archive into a fresh
//! scratch workspace, locate the markup member, pull out the payload text,
//! paginate) and guarantees the workspace is gone on every exit path. Each
//! step runs only if the previous one succeeded; the first failure
//! short-circuits out with its original classification. There are no
//! retries: every failure is deterministic for a given input.

use crate::archive;
use crate::error::{Error, Result};
use crate::layout::{self, FontMetrics, PageGeometry};
use crate::model::{Document, Metadata};
use crate::payload;
use crate::render;
use chrono::Utc;
use log::{debug, info};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// File name of the designated markup member inside a UDF archive.
pub const CONTENT_MEMBER: &str = "content.xml";

/// Options for UDF conversion.
///
/// Defaults are the fixed UDF constants; overriding them is mostly useful
/// in tests and for salvaging slightly nonstandard archives.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Name of the markup member to locate inside the archive
    pub member_name: String,

    /// Tag name of the payload element inside the markup
    pub payload_tag: String,

    /// Output page geometry
    pub geometry: PageGeometry,

    /// Monospaced layout metrics
    pub metrics: FontMetrics,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            member_name: CONTENT_MEMBER.to_string(),
            payload_tag: payload::PAYLOAD_TAG.to_string(),
            geometry: PageGeometry::default(),
            metrics: FontMetrics::default(),
        }
    }
}

impl ConvertOptions {
    /// Create new conversion options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the markup member name.
    pub fn with_member_name(mut self, name: impl Into<String>) -> Self {
        self.member_name = name.into();
        self
    }

    /// Set the payload element tag.
    pub fn with_payload_tag(mut self, tag: impl Into<String>) -> Self {
        self.payload_tag = tag.into();
        self
    }

    /// Set the page geometry.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Set the font metrics.
    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }
}

/// A per-conversion scratch directory.
///
/// Every conversion gets a uniquely named directory, so concurrent
/// conversions never collide. The directory and its contents are removed
/// when the workspace is dropped; success and failure take the same path
/// out, so no exit leaks extracted archive contents.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Allocate a fresh uniquely named workspace.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("udf2pdf-").tempdir()?;
        debug!("workspace created at '{}'", dir.path().display());
        Ok(Self { dir })
    }

    /// Root path of the workspace.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }
}

/// Run the input half of the pipeline: extract, locate, pull the payload.
///
/// The workspace lives for exactly the duration of this call; dropping it on
/// any exit path removes the extracted tree.
fn extract_payload_text(archive_path: &Path, options: &ConvertOptions) -> Result<String> {
    crate::detect::ensure_udf(archive_path)?;

    let workspace = Workspace::create()?;

    archive::extract(archive_path, workspace.root())?;

    let member = archive::locate_member(workspace.root(), &options.member_name)?
        .ok_or_else(|| Error::MemberNotFound(options.member_name.clone()))?;
    debug!("located markup member at '{}'", member.display());

    payload::extract_payload_tagged(&member, &options.payload_tag)
}

/// Extract the payload text from a UDF archive without laying it out.
pub fn extract_text<P: AsRef<Path>>(archive_path: P) -> Result<String> {
    extract_payload_text(archive_path.as_ref(), &ConvertOptions::default())
}

/// Convert the UDF archive at `archive_path` into a laid-out document.
pub fn convert<P: AsRef<Path>>(archive_path: P) -> Result<Document> {
    convert_with_options(archive_path, &ConvertOptions::default())
}

/// Convert with explicit options.
pub fn convert_with_options<P: AsRef<Path>>(
    archive_path: P,
    options: &ConvertOptions,
) -> Result<Document> {
    let archive_path = archive_path.as_ref();
    info!("converting '{}'", archive_path.display());

    let text = extract_payload_text(archive_path, options)?;

    let mut doc = Document::new();
    doc.pages = layout::paginate(&text, &options.geometry, &options.metrics);
    doc.metadata = Metadata {
        title: archive_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned()),
        producer: Some(concat!("udf2pdf ", env!("CARGO_PKG_VERSION")).to_string()),
        created: Some(Utc::now()),
        page_count: doc.pages.len() as u32,
    };

    info!(
        "converted '{}' into {} pages",
        archive_path.display(),
        doc.page_count()
    );
    Ok(doc)
}

/// Convert a UDF archive and write the PDF to `dest_path`.
pub fn convert_to_file<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest_path: Q,
) -> Result<PathBuf> {
    convert_to_file_with_options(archive_path, dest_path, &ConvertOptions::default())
}

/// Convert a UDF archive to a PDF file with explicit options.
pub fn convert_to_file_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest_path: Q,
    options: &ConvertOptions,
) -> Result<PathBuf> {
    let doc = convert_with_options(archive_path, options)?;
    let dest_path = dest_path.as_ref();
    render::write_pdf(&doc, &options.geometry, &options.metrics, dest_path)?;
    Ok(dest_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ConvertOptions::new()
            .with_member_name("document.xml")
            .with_payload_tag("body");

        assert_eq!(options.member_name, "document.xml");
        assert_eq!(options.payload_tag, "body");
        assert_eq!(options.geometry, PageGeometry::default());
    }

    #[test]
    fn test_default_options_use_udf_constants() {
        let options = ConvertOptions::default();
        assert_eq!(options.member_name, "content.xml");
        assert_eq!(options.payload_tag, "content");
    }

    #[test]
    fn test_workspace_is_unique_and_removed_on_drop() {
        let first = Workspace::create().unwrap();
        let second = Workspace::create().unwrap();
        assert_ne!(first.root(), second.root());

        let path = first.root().to_path_buf();
        assert!(path.exists());
        drop(first);
        assert!(!path.exists());
    }
}
