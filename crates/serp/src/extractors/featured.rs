// ABOUTME: Featured snippet extraction from the highlighted-answer block.
// ABOUTME: Absent or incomplete blocks resolve to None; the last link in the block is the source.

use crate::dom::{text_content, Document};
use crate::extractors::links::resolve_href;
use crate::extractors::patterns::{FEATURED_BLOCK, FEATURED_HEADING, FEATURED_LINKS};
use crate::normalize::clean;
use crate::options::Options;
use crate::result::FeaturedSnippet;

/// Extract the featured snippet, if the page has one.
///
/// The block may hold internal links (e.g. "more results") before the
/// canonical source link, so the last link wins.
pub fn extract(doc: &Document, opts: &Options) -> Option<FeaturedSnippet> {
    let block = doc.select_first(&FEATURED_BLOCK)?;

    let title = FEATURED_HEADING
        .first(block)
        .map(|h| clean(&text_content(h)))
        .filter(|t| !t.is_empty())?;

    let url = FEATURED_LINKS
        .select(block)
        .into_iter()
        .filter_map(|a| a.value().attr("href"))
        .map(|href| resolve_href(href, opts.unwrap_redirects))
        .filter(|u| !u.is_empty())
        .last()?;

    Some(FeaturedSnippet { title, url })
}
