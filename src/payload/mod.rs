//! Payload extraction from the UDF markup member.
//!
//! The markup member carries the document body inside a single `content`
//! element, usually as a CDATA section. The extractor streams over the XML,
//! collects the text of the first matching element found at any depth (the
//! schema nests it one level under the root, but the depth is not assumed),
//! and preserves all internal whitespace and line breaks verbatim. Only the
//! outer edges of the result are trimmed.

use crate::error::{Error, Result};
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::Path;
use std::str;

/// Tag name of the designated payload element.
pub const PAYLOAD_TAG: &str = "content";

/// Extract the payload text from the markup file at `path`.
///
/// # Errors
/// * `Error::Io` - the file cannot be read
/// * `Error::MarkupMalformed` - the bytes are not well-formed XML
/// * `Error::ElementMissing` - the document parses but holds no payload element
pub fn extract_payload<P: AsRef<Path>>(path: P) -> Result<String> {
    extract_payload_tagged(path, PAYLOAD_TAG)
}

/// Extract the text of the first element named `tag` from the file at `path`.
pub fn extract_payload_tagged<P: AsRef<Path>>(path: P, tag: &str) -> Result<String> {
    let bytes = fs::read(path.as_ref())?;
    let xml = str::from_utf8(&bytes)
        .map_err(|_| Error::MarkupMalformed("markup member is not valid UTF-8".to_string()))?;
    let payload = payload_from_str(xml, tag)?;
    debug!(
        "extracted {} payload characters from '{}'",
        payload.chars().count(),
        path.as_ref().display()
    );
    Ok(payload)
}

/// Extract the text of the first element named `tag` from an XML string.
///
/// Matching is by local name, so namespace prefixes on the payload element do
/// not matter. Text and CDATA nodes inside the element are concatenated in
/// document order; markup nested inside the element contributes its text too.
pub fn payload_from_str(xml: &str, tag: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);

    let mut depth: usize = 0;
    // Depth of the payload element while we are inside it.
    let mut payload_depth: Option<usize> = None;
    let mut saw_root = false;
    let mut found = false;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                saw_root = true;
                if !found && e.local_name().as_ref() == tag.as_bytes() {
                    payload_depth = Some(depth);
                    found = true;
                }
            }
            Event::End(_) => {
                if payload_depth == Some(depth) {
                    payload_depth = None;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Empty(e) => {
                saw_root = true;
                // <content/> is a present-but-empty payload, not a missing one.
                if !found && e.local_name().as_ref() == tag.as_bytes() {
                    found = true;
                }
            }
            Event::Text(e) => {
                if payload_depth.is_some() {
                    text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if payload_depth.is_some() {
                    let raw = str::from_utf8(&e.into_inner())
                        .map_err(|_| Error::MarkupMalformed("CDATA is not valid UTF-8".to_string()))?
                        .to_string();
                    text.push_str(&raw);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    // quick-xml reports mismatched end tags itself, but a truncated document
    // simply runs out of events with elements still open.
    if depth != 0 {
        return Err(Error::MarkupMalformed(
            "unexpected end of document inside an open element".to_string(),
        ));
    }
    if !saw_root {
        return Err(Error::MarkupMalformed(
            "document contains no root element".to_string(),
        ));
    }
    if !found {
        return Err(Error::ElementMissing(tag.to_string()));
    }

    Ok(text.trim().to_string())
}
