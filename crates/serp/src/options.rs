// ABOUTME: Configuration for SERP extraction: extraction profiles, field-presence tables and Options.
// ABOUTME: ParserBuilder provides a fluent API for constructing SerpParser instances with custom settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::parser::SerpParser;

/// The markup variant a page was retrieved as.
///
/// Each profile declares which fields are attempted; see [`Profile::fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    #[default]
    Desktop,
    Mobile,
    Reduced,
}

impl Profile {
    /// The declared field-presence table for this profile.
    pub fn fields(self) -> FieldSet {
        use Presence::*;
        match self {
            Profile::Desktop => FieldSet {
                estimated_results: Required,
                organic_results: Required,
                featured_snippet: Optional,
                knowledge_card: Optional,
                scrolling_sections: Optional,
            },
            Profile::Mobile => FieldSet {
                estimated_results: Optional,
                organic_results: Required,
                featured_snippet: Skipped,
                knowledge_card: Skipped,
                scrolling_sections: Skipped,
            },
            Profile::Reduced => FieldSet {
                estimated_results: Skipped,
                organic_results: Required,
                featured_snippet: Skipped,
                knowledge_card: Skipped,
                scrolling_sections: Skipped,
            },
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Profile::Desktop => "desktop",
            Profile::Mobile => "mobile",
            Profile::Reduced => "reduced",
        };
        write!(f, "{}", s)
    }
}

/// Lenient conversion: anything unrecognised is treated as desktop markup.
impl From<&str> for Profile {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "mobile" => Profile::Mobile,
            "reduced" | "basic" => Profile::Reduced,
            _ => Profile::Desktop,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown extraction profile: {0}")]
pub struct UnknownProfile(pub String);

impl FromStr for Profile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "desktop" => Ok(Profile::Desktop),
            "mobile" => Ok(Profile::Mobile),
            "reduced" | "basic" => Ok(Profile::Reduced),
            _ => Err(UnknownProfile(s.to_string())),
        }
    }
}

/// Whether a profile attempts a field, and how a miss is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Attempted; a miss aborts the extraction.
    Required,
    /// Attempted; a miss leaves the field absent.
    Optional,
    /// Not attempted and not emitted.
    Skipped,
}

impl Presence {
    pub fn is_attempted(self) -> bool {
        self != Presence::Skipped
    }
}

/// Field-presence table for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSet {
    pub estimated_results: Presence,
    pub organic_results: Presence,
    pub featured_snippet: Presence,
    pub knowledge_card: Presence,
    pub scrolling_sections: Presence,
}

/// Configuration options for a SerpParser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub profile: Profile,
    /// Propagate a matched-but-incomplete knowledge card as an error instead of dropping it.
    pub strict: bool,
    /// Resolve `/url?q=...` redirect links to their target.
    pub unwrap_redirects: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            profile: Profile::Desktop,
            strict: false,
            unwrap_redirects: true,
        }
    }
}

/// Builder for constructing SerpParser instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ParserBuilder {
    opts: Options,
}

impl ParserBuilder {
    /// Create a new ParserBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the extraction profile.
    pub fn profile(mut self, profile: Profile) -> Self {
        self.opts.profile = profile;
        self
    }

    /// Enable or disable strict knowledge-card handling.
    pub fn strict(mut self, strict: bool) -> Self {
        self.opts.strict = strict;
        self
    }

    /// Enable or disable redirect-link unwrapping.
    pub fn unwrap_redirects(mut self, unwrap: bool) -> Self {
        self.opts.unwrap_redirects = unwrap;
        self
    }

    /// Build the SerpParser with the configured options.
    pub fn build(self) -> SerpParser {
        SerpParser::new(self.opts)
    }
}

impl Default for ParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}
