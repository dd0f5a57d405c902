// ABOUTME: The five field extractors run against a results-page Document.
// ABOUTME: Each extractor is independent; the assembler decides which ones a profile runs.

//! Field extraction.
//!
//! Submodules:
//! - `patterns`: structural query definitions shared by the extractors.
//! - `links`: href resolution, including redirect unwrapping.
//! - `stats`: estimated result count.
//! - `organic`: standard listings with snippet/rich-snippet disambiguation.
//! - `featured`: the highlighted-answer block.
//! - `knowledge`: the entity panel and its heading-keyed attributes.
//! - `scrolling`: horizontally-paged widget groups.

pub mod featured;
pub mod knowledge;
pub mod links;
pub mod organic;
pub mod patterns;
pub mod scrolling;
pub mod stats;
