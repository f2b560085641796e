//! Page-level types.

use serde::{Deserialize, Serialize};

/// A single fixed-size page holding laid-out text lines.
///
/// Lines are already wrapped to the page's column capacity; no line crosses
/// a page boundary. The struct is serialization-agnostic: the PDF renderer
/// consumes it, but it can be inspected or serialized as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in layout units (1 unit = 1/72 inch)
    pub width: f32,

    /// Page height in layout units
    pub height: f32,

    /// Laid-out text lines, top to bottom
    pub lines: Vec<String>,
}

impl Page {
    /// Create a new empty page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            lines: Vec::new(),
        }
    }

    /// Create a new page with ISO A4 size (210 x 297 mm at 72 units/inch).
    pub fn a4(number: u32) -> Self {
        Self::new(number, 595.0, 842.0)
    }

    /// Append a line to the page.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Get the number of lines on the page.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the page holds no text.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    /// Get the plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.lines.join("\n")
    }

    /// Get page dimensions as a (width, height) tuple.
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::a4(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_dimensions() {
        let page = Page::a4(1);
        assert_eq!(page.dimensions(), (595.0, 842.0));
    }

    #[test]
    fn test_push_line_and_plain_text() {
        let mut page = Page::a4(1);
        assert!(page.is_empty());

        page.push_line("first");
        page.push_line("second");

        assert_eq!(page.line_count(), 2);
        assert_eq!(page.plain_text(), "first\nsecond");
        assert!(!page.is_empty());
    }

    #[test]
    fn test_page_with_single_blank_line_is_empty() {
        let mut page = Page::a4(1);
        page.push_line("");
        assert!(page.is_empty());
        assert_eq!(page.line_count(), 1);
    }
}
