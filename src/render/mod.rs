//! Rendering module for serializing laid-out documents.

mod pdf;

pub use pdf::{to_pdf, write_pdf};
