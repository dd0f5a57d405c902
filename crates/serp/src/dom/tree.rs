// ABOUTME: Tree Builder: turns a raw results-page markup string into a read-only Document.
// ABOUTME: Parsing is permissive; only blank or tag-free input is rejected as malformed.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

use super::query::Query;
use crate::error::{ExtractError, Result};

static TAG_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"<\s*[A-Za-z!?/]").unwrap());

/// A parsed results page.
///
/// Immutable for its whole lifetime; every extractor reads the same tree.
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse markup into a tree.
    ///
    /// Unclosed tags, implicit closing and stray text are recovered the way a
    /// browser would. Fails with `MalformedInput` only when the input is blank
    /// or contains no markup at all.
    pub fn parse(markup: &str) -> Result<Self> {
        if markup.trim().is_empty() {
            return Err(ExtractError::malformed_input(
                "build",
                Some(anyhow::anyhow!("markup is empty")),
            ));
        }
        if !TAG_OPEN.is_match(markup) {
            return Err(ExtractError::malformed_input(
                "build",
                Some(anyhow::anyhow!("input contains no markup tags")),
            ));
        }

        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            tracing::debug!(errors = html.errors.len(), "recovered from markup parse errors");
        }
        Ok(Self { html })
    }

    /// The `<html>` element.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// Run a query against the whole document.
    pub fn select(&self, query: &Query) -> Vec<ElementRef<'_>> {
        query.select(self.root())
    }

    pub fn select_first(&self, query: &Query) -> Option<ElementRef<'_>> {
        query.first(self.root())
    }

    /// The underlying scraper tree.
    pub fn html(&self) -> &Html {
        &self.html
    }
}

/// Build a document tree from markup. See [`Document::parse`].
pub fn build(markup: &str) -> Result<Document> {
    Document::parse(markup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::query::text_content;

    #[test]
    fn test_blank_input_is_malformed() {
        assert!(build("").unwrap_err().is_malformed_input());
        assert!(build("   \n\t").unwrap_err().is_malformed_input());
    }

    #[test]
    fn test_plain_text_is_malformed() {
        let err = build("just some words, no tags").unwrap_err();
        assert!(err.is_malformed_input());
        assert!(err.to_string().contains("no markup tags"));
    }

    #[test]
    fn test_unclosed_tags_are_recovered() {
        let doc = build("<div class=g><a href='http://x.test'><h3>Title<p>text").unwrap();
        let h3 = doc.select_first(&Query::descendants("h3")).unwrap();
        assert!(text_content(h3).starts_with("Title"));
        assert_eq!(doc.select(&Query::descendants("a[href]")).len(), 1);
    }

    #[test]
    fn test_fragment_gets_document_root() {
        let doc = build("<p>hello</p>").unwrap();
        assert_eq!(doc.root().value().name(), "html");
    }

    #[test]
    fn test_doctype_only_is_accepted() {
        assert!(build("<!DOCTYPE html>").is_ok());
    }
}
