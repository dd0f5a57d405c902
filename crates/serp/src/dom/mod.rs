// ABOUTME: Document tree construction and the structural query layer used by every extractor.
// ABOUTME: Wraps scraper's HTML tree with positional, XPath-like step queries.

//! DOM utilities for results-page extraction.
//!
//! - `tree`: builds a read-only [`Document`] from raw markup.
//! - `query`: compiles selectors into positional step queries.

pub mod query;
pub mod tree;

pub use query::{own_text, text_content, Axis, Query};
pub use tree::{build, Document};
