// ABOUTME: The SerpParser and the Result Assembler that runs the field extractors for a profile.
// ABOUTME: Optional sections degrade to absent; a missing mandatory anchor fails the whole call.

use crate::dom::Document;
use crate::error::Result;
use crate::extractors::{featured, knowledge, organic, scrolling, stats};
use crate::options::{Options, ParserBuilder, Presence, Profile};
use crate::result::ResultRecord;

/// Extracts structured data from results-page markup.
///
/// Holds configuration only; each call builds and owns its own tree, so one
/// parser can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct SerpParser {
    opts: Options,
}

impl SerpParser {
    pub fn new(opts: Options) -> Self {
        Self { opts }
    }

    pub fn builder() -> ParserBuilder {
        ParserBuilder::new()
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Parse markup and extract every field the profile declares.
    pub fn parse(&self, markup: &str) -> Result<ResultRecord> {
        let doc = Document::parse(markup)?;
        self.extract(&doc)
    }

    /// Extract from an already-built document.
    pub fn extract(&self, doc: &Document) -> Result<ResultRecord> {
        assemble_with(doc, &self.opts)
    }
}

/// Assemble a record under `profile` with otherwise default options.
pub fn assemble(doc: &Document, profile: Profile) -> Result<ResultRecord> {
    let opts = Options {
        profile,
        ..Options::default()
    };
    assemble_with(doc, &opts)
}

/// Run the extractors the profile declares and combine their output.
pub fn assemble_with(doc: &Document, opts: &Options) -> Result<ResultRecord> {
    let fields = opts.profile.fields();
    let mut record = ResultRecord::new(opts.profile);

    record.estimated_results = match fields.estimated_results {
        Presence::Required => Some(stats::extract(doc)?),
        Presence::Optional => match stats::extract(doc) {
            Ok(count) => Some(count),
            Err(err) => {
                tracing::debug!(error = %err, "estimated result count unavailable");
                None
            }
        },
        Presence::Skipped => None,
    };

    if fields.organic_results.is_attempted() {
        record.organic_results = organic::extract(doc, opts);
    }

    if fields.featured_snippet.is_attempted() {
        record.featured_snippet = featured::extract(doc, opts);
    }

    if fields.knowledge_card.is_attempted() {
        record.knowledge_card = match knowledge::extract(doc) {
            Ok(card) => card,
            Err(err) if opts.strict || fields.knowledge_card == Presence::Required => {
                return Err(err)
            }
            Err(err) => {
                tracing::warn!(error = %err, "dropping incomplete knowledge panel");
                None
            }
        };
    }

    if fields.scrolling_sections.is_attempted() {
        record.scrolling_sections = scrolling::extract(doc, opts);
    }

    tracing::debug!(
        profile = %opts.profile,
        organic = record.organic_results.len(),
        featured_snippet = record.featured_snippet.is_some(),
        knowledge_card = record.knowledge_card.is_some(),
        scrolling_sections = record.scrolling_sections.len(),
        "assembled results page"
    );
    Ok(record)
}
