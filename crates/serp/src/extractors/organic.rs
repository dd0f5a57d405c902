// ABOUTME: Organic result extraction: url, title, snippet and rich snippet per result container.
// ABOUTME: Malformed containers are skipped so one broken block never aborts the page.

use scraper::ElementRef;

use crate::dom::{text_content, Document};
use crate::error::{ExtractError, Result};
use crate::extractors::links::resolve_href;
use crate::extractors::patterns::{
    ORGANIC_CONTAINER, RESULT_HEADING, RESULT_LINK, SNIPPET_CANDIDATES, SNIPPET_MARKERS,
};
use crate::normalize::clean;
use crate::options::Options;
use crate::result::OrganicResult;

/// Rich annotations (ratings, prices) carry at least this many inline markers.
const RICH_MARKER_THRESHOLD: usize = 2;

/// Extract every well-formed organic result in document order.
pub fn extract(doc: &Document, opts: &Options) -> Vec<OrganicResult> {
    let containers = doc.select(&ORGANIC_CONTAINER);
    let mut results = Vec::with_capacity(containers.len());
    for (index, container) in containers.into_iter().enumerate() {
        match extract_one(container, opts) {
            Ok(result) => results.push(result),
            Err(err) => tracing::debug!(index, error = %err, "skipping malformed organic result"),
        }
    }
    results
}

/// Extract a single result container.
///
/// The url is the first non-empty `href` in the container. Fails with
/// `MissingField` when the container has no usable link or no title.
pub fn extract_one(container: ElementRef<'_>, opts: &Options) -> Result<OrganicResult> {
    let url = RESULT_LINK
        .select(container)
        .into_iter()
        .filter_map(|el| el.value().attr("href"))
        .map(|href| resolve_href(href, opts.unwrap_redirects))
        .find(|url| !url.is_empty())
        .ok_or_else(|| ExtractError::missing_field("organic_results.url", None))?;

    let title = RESULT_HEADING
        .first(container)
        .map(|h| clean(&text_content(h)))
        .filter(|title| !title.is_empty())
        .ok_or_else(|| ExtractError::missing_field("organic_results.title", None))?;

    let candidates = SNIPPET_CANDIDATES.select(container);
    let (snippet, rich_snippet) = split_snippets(&candidates);

    Ok(OrganicResult {
        url,
        title,
        snippet,
        rich_snippet,
    })
}

/// Decide which description candidate is the snippet and which the rich snippet.
///
/// A lone candidate is the snippet. With two, the first is the snippet unless it
/// is dense with inline markers, in which case it is the rich annotation.
fn split_snippets(candidates: &[ElementRef<'_>]) -> (String, Option<String>) {
    match candidates {
        [] => (String::new(), None),
        [only] => (clean(&text_content(*only)), None),
        [first, second, ..] => {
            let (snippet, rich) = if SNIPPET_MARKERS.count(*first) < RICH_MARKER_THRESHOLD {
                (first, second)
            } else {
                (second, first)
            };
            let rich = clean(&text_content(*rich));
            (
                clean(&text_content(*snippet)),
                Some(rich).filter(|r| !r.is_empty()),
            )
        }
    }
}
