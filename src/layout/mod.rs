//! Monospaced text layout and pagination.
//!
//! The layout model is deliberately simple and fully deterministic: every
//! glyph occupies one fixed advance width and every line one fixed leading.
//! Payload text is split on hard breaks first, each logical line is greedily
//! wrapped to the page's column capacity, and the wrapped lines are packed
//! into fixed-size pages top to bottom. No page ever holds more than
//! `floor(usable_height / leading)` lines.

use crate::model::Page;
use serde::{Deserialize, Serialize};

/// Fixed metrics of the monospaced layout font.
///
/// Defaults describe a 10-unit Courier-style face: a 0.6 em advance and a
/// 1.2 em leading. These are constants of the output format, not tunables
/// read from the input; reproducibility beats configurability here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontMetrics {
    /// Glyph size in layout units
    pub size: f32,

    /// Horizontal advance of every glyph
    pub advance: f32,

    /// Vertical distance between consecutive baselines
    pub leading: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            size: 10.0,
            advance: 6.0,
            leading: 12.0,
        }
    }
}

/// Fixed page geometry in layout units (1 unit = 1/72 inch).
///
/// The default is ISO A4 with a 56-unit margin on all sides, which together
/// with [`FontMetrics::default`] yields 80 columns and 60 lines per page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page width
    pub width: f32,

    /// Page height
    pub height: f32,

    /// Margin applied on all four sides
    pub margin: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 595.0,
            height: 842.0,
            margin: 56.0,
        }
    }
}

impl PageGeometry {
    /// Width available to text after margins.
    pub fn usable_width(&self) -> f32 {
        (self.width - 2.0 * self.margin).max(0.0)
    }

    /// Height available to text after margins.
    pub fn usable_height(&self) -> f32 {
        (self.height - 2.0 * self.margin).max(0.0)
    }

    /// Number of glyph columns that fit on one line. Never below 1.
    pub fn columns(&self, metrics: &FontMetrics) -> usize {
        ((self.usable_width() / metrics.advance) as usize).max(1)
    }

    /// Number of text lines that fit on one page. Never below 1.
    pub fn lines_per_page(&self, metrics: &FontMetrics) -> usize {
        ((self.usable_height() / metrics.leading) as usize).max(1)
    }
}

/// Split text into logical lines on hard breaks.
///
/// A trailing `\r` is stripped from each line so CRLF-authored payloads lay
/// out identically to LF ones. Empty lines are preserved.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Wrap one logical line to at most `max_cols` glyphs per visual line.
///
/// Wrapping is greedy: the break goes at the last blank within the window,
/// and that single blank is consumed by the break. A token wider than the
/// window is hard-broken at the column limit, so no character is ever
/// dropped; concatenating the fragments of a hard-broken token reproduces
/// it exactly.
pub fn wrap_line(line: &str, max_cols: usize) -> Vec<String> {
    debug_assert!(max_cols > 0);
    let chars: Vec<char> = line.chars().collect();
    if chars.len() <= max_cols {
        return vec![line.to_string()];
    }

    let mut wrapped = Vec::new();
    let mut start = 0;
    while chars.len() - start > max_cols {
        let window_end = start + max_cols;
        let break_at = (start + 1..=window_end)
            .rev()
            .find(|&i| chars[i] == ' ' || chars[i] == '\t');
        match break_at {
            Some(i) => {
                wrapped.push(chars[start..i].iter().collect());
                start = i + 1;
            }
            None => {
                // Oversized token: hard break at the page edge.
                wrapped.push(chars[start..window_end].iter().collect());
                start = window_end;
            }
        }
    }
    // A break at the very end of the line consumes its blank and leaves no
    // remainder; pushing it anyway would fabricate an empty visual line.
    if start < chars.len() {
        wrapped.push(chars[start..].iter().collect());
    }
    wrapped
}

/// Lay out payload text into fixed-size pages.
///
/// Pages come out in strict source order. Empty input produces exactly one
/// empty page so downstream consumers always have a renderable page.
pub fn paginate(text: &str, geometry: &PageGeometry, metrics: &FontMetrics) -> Vec<Page> {
    let max_cols = geometry.columns(metrics);
    let max_lines = geometry.lines_per_page(metrics);

    let mut pages = Vec::new();
    let mut current = Page::new(1, geometry.width, geometry.height);

    for logical in split_lines(text) {
        for visual in wrap_line(logical, max_cols) {
            if current.line_count() >= max_lines {
                let number = current.number;
                pages.push(std::mem::replace(
                    &mut current,
                    Page::new(number + 1, geometry.width, geometry.height),
                ));
            }
            current.push_line(visual);
        }
    }
    pages.push(current);
    pages
}
