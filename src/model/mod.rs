//! Document model types.

mod document;
mod page;

pub use document::{Document, Metadata};
pub use page::Page;
