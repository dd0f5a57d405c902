// ABOUTME: Scrolling section extraction for horizontally-paged widget groups (carousels).
// ABOUTME: Best-effort: each carousel becomes one section of text/link/image entries; never errors.

use std::collections::HashSet;

use ego_tree::NodeId;
use scraper::ElementRef;

use crate::dom::{Document, Query};
use crate::extractors::links::resolve_href;
use crate::extractors::patterns::{CAROUSEL_CARD, CAROUSEL_IMAGE, CAROUSEL_LINK, SCROLLING_CAROUSEL};
use crate::normalize::clean;
use crate::options::Options;
use crate::result::{ScrollingEntry, ScrollingSection};

/// One section per carousel, in document order.
pub fn extract(doc: &Document, opts: &Options) -> Vec<ScrollingSection> {
    doc.select(&SCROLLING_CAROUSEL)
        .into_iter()
        .map(|carousel| ScrollingSection {
            entries: entries(carousel, opts),
        })
        .collect()
}

fn entries(carousel: ElementRef<'_>, opts: &Options) -> Vec<ScrollingEntry> {
    let mut nodes = outermost(CAROUSEL_CARD.select(carousel));
    if nodes.is_empty() {
        nodes = outermost(CAROUSEL_LINK.select(carousel));
    }
    nodes
        .into_iter()
        .filter_map(|node| entry(node, opts))
        .collect()
}

/// Drop matches nested inside another match.
fn outermost(nodes: Vec<ElementRef<'_>>) -> Vec<ElementRef<'_>> {
    let ids: HashSet<NodeId> = nodes.iter().map(|n| n.id()).collect();
    nodes
        .into_iter()
        .filter(|n| !n.ancestors().any(|a| ids.contains(&a.id())))
        .collect()
}

fn entry(node: ElementRef<'_>, opts: &Options) -> Option<ScrollingEntry> {
    // Cards stack block elements, so text runs are joined with spaces.
    let text = clean(&node.text().collect::<Vec<_>>().join(" "));

    let url = node
        .value()
        .attr("href")
        .or_else(|| first_attr(node, &CAROUSEL_LINK, &["href"]))
        .map(|href| resolve_href(href, opts.unwrap_redirects))
        .filter(|u| !u.is_empty());

    let image = first_attr(node, &CAROUSEL_IMAGE, &["data-src", "src"])
        .map(clean)
        .filter(|src| !src.is_empty());

    if text.is_empty() && url.is_none() {
        return None;
    }
    Some(ScrollingEntry { text, url, image })
}

/// The first of `attrs` found on the elements matched by `query`, in document order.
fn first_attr<'a>(scope: ElementRef<'a>, query: &Query, attrs: &[&str]) -> Option<&'a str> {
    query
        .select(scope)
        .into_iter()
        .find_map(|el| attrs.iter().find_map(|name| el.value().attr(name)))
}
