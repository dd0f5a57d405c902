// ABOUTME: Main library entry point for the SERP extraction engine.
// ABOUTME: Re-exports the public API: SerpParser, ResultRecord, ExtractError, Options and the normalizers.

//! Structured data extraction from search-engine results pages.
//!
//! Given the rendered markup of a results page, this crate extracts the
//! estimated result count, organic results, the featured snippet, the
//! knowledge panel and horizontally-scrolling widget sections into one
//! [`ResultRecord`]. Fetching the page and storing the record are left to
//! the caller.
//!
//! # Example
//!
//! ```no_run
//! use digests_serp::{ExtractError, Profile, SerpParser};
//!
//! fn main() -> Result<(), ExtractError> {
//!     let html = std::fs::read_to_string("page.html").unwrap_or_default();
//!     let parser = SerpParser::builder().profile(Profile::Desktop).build();
//!     let record = parser.parse(&html)?;
//!     for result in &record.organic_results {
//!         println!("{} - {}", result.title, result.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod dom;
pub mod error;
pub mod extractors;
pub mod normalize;
pub mod options;
pub mod parser;
pub mod result;

pub use crate::dom::{build, Document, Query};
pub use crate::error::{ErrorCode, ExtractError, Result};
pub use crate::normalize::{clean, clean_opt, normalize_dict_key};
pub use crate::options::{FieldSet, Options, ParserBuilder, Presence, Profile, UnknownProfile};
pub use crate::parser::{assemble, assemble_with, SerpParser};
pub use crate::result::{
    FeaturedSnippet, FieldValue, KnowledgeCard, ListEntry, MoreInfoEntry, OrganicResult,
    ResultRecord, ScrollingEntry, ScrollingSection, TitledItem,
};

/// Parse markup under `profile` with default options.
pub fn parse(markup: &str, profile: Profile) -> Result<ResultRecord> {
    SerpParser::builder().profile(profile).build().parse(markup)
}
