// ABOUTME: Declarative step queries over the document tree: axis + node test + optional position.
// ABOUTME: Mirrors the XPath subset the extractors need while keeping matching on scraper selectors.

//! Structural queries.
//!
//! A [`Query`] is a chain of steps evaluated left to right, each one mapping
//! the current context nodes to a new, de-duplicated, document-ordered set:
//!
//! - `Axis::Descendant` matches any element strictly below a context node
//!   (XPath `.//tag`).
//! - `Axis::Child` matches direct element children (XPath `tag`).
//!
//! The node test is a single compound CSS selector (`div[class="g"]`,
//! `div[data-attrid*=":/"]`). A 1-based position selects the n-th matching
//! child of each parent, the way `div[2]` does in XPath.

use std::collections::HashSet;

use ego_tree::NodeId;
use scraper::{ElementRef, Selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone)]
struct Step {
    axis: Axis,
    selector: Option<Selector>,
    position: Option<usize>,
}

impl Step {
    fn new(axis: Axis, css: &str, position: Option<usize>) -> Self {
        let selector = match Selector::parse(css) {
            Ok(sel) => Some(sel),
            Err(err) => {
                tracing::warn!(selector = css, error = %err, "invalid selector in query step");
                None
            }
        };
        Self {
            axis,
            selector,
            position,
        }
    }

    fn collect<'a>(&self, context: ElementRef<'a>, selector: &Selector, out: &mut HashSet<NodeId>) {
        match (self.axis, self.position) {
            (Axis::Child, None) => {
                out.extend(child_elements(context).filter(|el| selector.matches(el)).map(|el| el.id()));
            }
            (Axis::Child, Some(n)) => {
                out.extend(nth_matching_child(context, selector, n).map(|el| el.id()));
            }
            (Axis::Descendant, None) => {
                out.extend(
                    context
                        .descendants()
                        .skip(1)
                        .filter_map(ElementRef::wrap)
                        .filter(|el| selector.matches(el))
                        .map(|el| el.id()),
                );
            }
            (Axis::Descendant, Some(n)) => {
                for parent in context.descendants().filter_map(ElementRef::wrap) {
                    out.extend(nth_matching_child(parent, selector, n).map(|el| el.id()));
                }
            }
        }
    }
}

fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

fn nth_matching_child<'a>(parent: ElementRef<'a>, selector: &Selector, n: usize) -> Option<ElementRef<'a>> {
    if n == 0 {
        return None;
    }
    child_elements(parent).filter(|el| selector.matches(el)).nth(n - 1)
}

/// A chain of structural steps, evaluated relative to a scope element.
#[derive(Debug, Clone, Default)]
pub struct Query {
    steps: Vec<Step>,
}

impl Query {
    /// Start a query matching descendants of the scope (XPath `.//css`).
    pub fn descendants(css: &str) -> Self {
        Self::default().descendant(css)
    }

    /// Start a query matching direct children of the scope.
    pub fn children(css: &str) -> Self {
        Self::default().child(css)
    }

    pub fn descendant(mut self, css: &str) -> Self {
        self.steps.push(Step::new(Axis::Descendant, css, None));
        self
    }

    pub fn child(mut self, css: &str) -> Self {
        self.steps.push(Step::new(Axis::Child, css, None));
        self
    }

    /// Add a descendant step keeping, for every parent below the scope, only its
    /// `position`-th (1-based) matching child (XPath `.//css[n]`).
    pub fn nth_descendant(mut self, css: &str, position: usize) -> Self {
        self.steps.push(Step::new(Axis::Descendant, css, Some(position)));
        self
    }

    /// Add a child step keeping only the `position`-th (1-based) match per parent.
    pub fn nth_child(mut self, css: &str, position: usize) -> Self {
        self.steps.push(Step::new(Axis::Child, css, Some(position)));
        self
    }

    /// All matches in document order, without duplicates.
    pub fn select<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        if self.steps.is_empty() {
            return Vec::new();
        }
        let mut context = vec![scope];
        for step in &self.steps {
            let Some(selector) = step.selector.as_ref() else {
                return Vec::new();
            };
            let mut matched = HashSet::new();
            for node in &context {
                step.collect(*node, selector, &mut matched);
            }
            if matched.is_empty() {
                return Vec::new();
            }
            context = in_document_order(scope, &matched);
        }
        context
    }

    pub fn first<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.select(scope).into_iter().next()
    }

    pub fn last<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.select(scope).pop()
    }

    pub fn count(&self, scope: ElementRef<'_>) -> usize {
        self.select(scope).len()
    }

    pub fn exists(&self, scope: ElementRef<'_>) -> bool {
        !self.select(scope).is_empty()
    }
}

fn in_document_order<'a>(scope: ElementRef<'a>, ids: &HashSet<NodeId>) -> Vec<ElementRef<'a>> {
    scope
        .descendants()
        .filter(|node| ids.contains(&node.id()))
        .filter_map(ElementRef::wrap)
        .collect()
}

/// Concatenated text of the element and all of its descendants.
pub fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Text of the element's own text-node children, ignoring nested elements.
pub fn own_text(el: ElementRef<'_>) -> String {
    el.children()
        .filter_map(|node| node.value().as_text().map(|t| &**t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    const NESTED_HTML: &str = r#"
        <html><body>
        <div id="outer">
            <div class="a">
                <div><span>one</span></div>
                <div><span>two</span><span>three</span></div>
            </div>
            <div class="a b">
                <p>first</p>
                <div><em>x</em></div>
                <p>second</p>
            </div>
        </div>
        </body></html>
    "#;

    fn texts(els: &[ElementRef<'_>]) -> Vec<String> {
        els.iter().map(|el| text_content(*el).split_whitespace().collect::<Vec<_>>().join(" ")).collect()
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc = Html::parse_document(NESTED_HTML);
        let spans = Query::descendants("span").select(doc.root_element());
        assert_eq!(texts(&spans), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_exact_class_versus_token() {
        let doc = Html::parse_document(NESTED_HTML);
        let root = doc.root_element();
        assert_eq!(Query::descendants(r#"div[class="a"]"#).count(root), 1);
        assert_eq!(Query::descendants("div.a").count(root), 2);
    }

    #[test]
    fn test_positional_child_step() {
        let doc = Html::parse_document(NESTED_HTML);
        let second = Query::descendants(r#"div[class="a"]"#)
            .nth_child("div", 2)
            .select(doc.root_element());
        assert_eq!(texts(&second), vec!["twothree"]);
    }

    #[test]
    fn test_positional_counts_only_matching_siblings() {
        let doc = Html::parse_document(NESTED_HTML);
        let root = doc.root_element();
        let p2 = Query::descendants(r#"div[class="a b"]"#).nth_child("p", 2).select(root);
        assert_eq!(texts(&p2), vec!["second"]);
        assert!(Query::descendants(r#"div[class="a b"]"#).nth_child("div", 2).select(root).is_empty());
    }

    #[test]
    fn test_positional_descendant_step() {
        let doc = Html::parse_document(NESTED_HTML);
        let outer = Query::descendants("#outer").first(doc.root_element()).unwrap();
        let second_divs = Query::default().nth_descendant("div", 2).select(outer);
        assert_eq!(texts(&second_divs), vec!["twothree", "first x second"]);
        assert!(Query::default().nth_descendant("div", 3).select(outer).is_empty());
    }

    #[test]
    fn test_distinct_runtime_selectors_each_compile() {
        let html: String = (0..200).map(|i| format!(r#"<p id="r{i}">{i}</p>"#)).collect();
        let doc = Html::parse_document(&html);
        for i in 0..200 {
            let matched = Query::descendants(&format!("#r{i}")).select(doc.root_element());
            assert_eq!(texts(&matched), vec![i.to_string()]);
        }
    }

    #[test]
    fn test_descendant_step_excludes_scope() {
        let doc = Html::parse_document(NESTED_HTML);
        let outer = Query::descendants("#outer").first(doc.root_element()).unwrap();
        let divs = Query::descendants("div").select(outer);
        assert!(divs.iter().all(|d| d.id() != outer.id()));
        assert_eq!(divs.len(), 5);
    }

    #[test]
    fn test_overlapping_contexts_are_deduplicated() {
        let doc = Html::parse_document(NESTED_HTML);
        let spans = Query::descendants("div").descendant("span").select(doc.root_element());
        assert_eq!(spans.len(), 3);
    }

    #[test]
    fn test_invalid_step_matches_nothing() {
        let doc = Html::parse_document(NESTED_HTML);
        assert!(Query::descendants("[[[invalid").select(doc.root_element()).is_empty());
        assert!(Query::default().select(doc.root_element()).is_empty());
    }

    #[test]
    fn test_first_and_last() {
        let doc = Html::parse_document(NESTED_HTML);
        let q = Query::descendants("p");
        assert_eq!(text_content(q.first(doc.root_element()).unwrap()), "first");
        assert_eq!(text_content(q.last(doc.root_element()).unwrap()), "second");
    }

    #[test]
    fn test_own_text_skips_nested_elements() {
        let doc = Html::parse_document(r#"<div id="s">About 1,234 results<nobr> (0.4 seconds)</nobr></div>"#);
        let el = Query::descendants("#s").first(doc.root_element()).unwrap();
        assert_eq!(own_text(el), "About 1,234 results");
        assert_eq!(text_content(el), "About 1,234 results (0.4 seconds)");
    }
}
