// ABOUTME: Estimated result count extraction from the result-stats node.
// ABOUTME: A missing or unparsable count means the document is not a results page.

use crate::dom::{own_text, text_content, Document};
use crate::error::{ExtractError, Result};
use crate::extractors::patterns::RESULT_STATS;

const OP: &str = "estimated_results";

/// Characters used as thousands separators across locales.
const THOUSANDS_SEPARATORS: &[char] = &[',', '.', '\''];

/// Extract the estimated result count.
///
/// Reads the stats node's own text (`About 2,430,000,000 results`), ignoring
/// nested annotations such as the elapsed time.
pub fn extract(doc: &Document) -> Result<u64> {
    let node = doc.select_first(&RESULT_STATS).ok_or_else(|| {
        ExtractError::invalid_document(OP, Some(anyhow::anyhow!("no result-stats node")))
    })?;

    let mut text = own_text(node);
    if text.trim().is_empty() {
        text = text_content(node);
    }
    parse_count(&text)
}

/// Parse the second whitespace-delimited token of a stats line as a count.
pub fn parse_count(text: &str) -> Result<u64> {
    let token = text.split_whitespace().nth(1).ok_or_else(|| {
        ExtractError::invalid_document(OP, Some(anyhow::anyhow!("stats text {:?} has no count token", text)))
    })?;
    let digits: String = token
        .chars()
        .filter(|c| !THOUSANDS_SEPARATORS.contains(c))
        .collect();
    digits.parse::<u64>().map_err(|err| {
        ExtractError::invalid_document(
            OP,
            Some(anyhow::Error::new(err).context(format!("count token {:?} is not numeric", token))),
        )
    })
}
