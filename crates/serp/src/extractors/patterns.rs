// ABOUTME: Structural query definitions for every region of a results page.
// ABOUTME: Markup drift is absorbed here; extractors only refer to these names.

use once_cell::sync::Lazy;

use crate::dom::Query;

// Estimated result count.
pub static RESULT_STATS: Lazy<Query> = Lazy::new(|| Query::descendants("#result-stats"));

// Organic results. The container class is matched exactly, not as a token.
pub static ORGANIC_CONTAINER: Lazy<Query> = Lazy::new(|| Query::descendants(r#"div[class="g"]"#));
pub static RESULT_LINK: Lazy<Query> = Lazy::new(|| Query::descendants("[href]"));
pub static RESULT_HEADING: Lazy<Query> = Lazy::new(|| Query::descendants("h3"));
/// `.//div/div/div[2]/div` relative to the container.
pub static SNIPPET_CANDIDATES: Lazy<Query> = Lazy::new(|| {
    Query::descendants("div")
        .child("div")
        .nth_child("div", 2)
        .child("div")
});
pub static SNIPPET_MARKERS: Lazy<Query> = Lazy::new(|| Query::descendants("span"));

// Featured snippet.
pub static FEATURED_BLOCK: Lazy<Query> = Lazy::new(|| Query::descendants("div.kp-blk"));
pub static FEATURED_HEADING: Lazy<Query> = Lazy::new(|| Query::descendants("h3"));
pub static FEATURED_LINKS: Lazy<Query> = Lazy::new(|| Query::descendants("a[href]"));

// Knowledge panel.
pub static KNOWLEDGE_PANEL: Lazy<Query> = Lazy::new(|| Query::descendants("div.kp-wholepage"));
pub static PANEL_TITLE: Lazy<Query> = Lazy::new(|| Query::descendants("h2").child("span"));
pub static PANEL_SUBTITLE: Lazy<Query> =
    Lazy::new(|| Query::descendants(r#"div[data-attrid*="subtitle"]"#));
pub static PANEL_DESCRIPTION: Lazy<Query> =
    Lazy::new(|| Query::descendants(r#"div[class="kno-rdesc"]"#).child("span"));
/// Attribute rows carry a namespaced id such as `kc:/people/person:born`.
pub static PANEL_ATTRIBUTE: Lazy<Query> =
    Lazy::new(|| Query::descendants(r#"div[data-attrid*=":/"]"#));
pub static ATTRIBUTE_SPANS: Lazy<Query> = Lazy::new(|| Query::descendants("span"));
pub static ROLE_HEADING: Lazy<Query> = Lazy::new(|| Query::descendants(r#"div[role="heading"]"#));
pub static HEADING_ANCHOR: Lazy<Query> = Lazy::new(|| Query::descendants("a"));
pub static LIST_ITEM_HEADINGS: Lazy<Query> = Lazy::new(|| {
    Query::descendants(r#"div[role="list"]"#).descendant(r#"div[role="heading"]"#)
});
pub static ITEM_TITLE: Lazy<Query> = Lazy::new(|| Query::descendants(r#"div[class="title"]"#));
pub static SIDEWAYS_RELATION: Lazy<Query> =
    Lazy::new(|| Query::descendants(r#"div[data-reltype="sideways"]"#));

// Scrolling sections.
pub static SCROLLING_CAROUSEL: Lazy<Query> = Lazy::new(|| Query::descendants("g-scrolling-carousel"));
pub static CAROUSEL_CARD: Lazy<Query> =
    Lazy::new(|| Query::descendants(r#"g-inner-card, [role="listitem"]"#));
pub static CAROUSEL_LINK: Lazy<Query> = Lazy::new(|| Query::descendants("a[href]"));
pub static CAROUSEL_IMAGE: Lazy<Query> = Lazy::new(|| Query::descendants("img"));

/// Reserved key whose list also collects sideways-related entity names.
pub const PEOPLE_ALSO_SEARCH_FOR: &str = "people_also_search_for";
