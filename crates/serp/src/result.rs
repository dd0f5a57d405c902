// ABOUTME: Record types produced by one extraction call: ResultRecord and its per-section values.
// ABOUTME: ResultRecord serializes only the fields declared by the active extraction profile.

use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::options::{Presence, Profile};

/// One standard, non-paid listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OrganicResult {
    pub url: String,
    pub title: String,
    pub snippet: String,
    pub rich_snippet: Option<String>,
}

impl OrganicResult {
    /// Returns true if the listing carries a secondary annotation block.
    pub fn has_rich_snippet(&self) -> bool {
        self.rich_snippet.as_ref().is_some_and(|s| !s.is_empty())
    }
}

/// The highlighted-answer block promoted above the listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FeaturedSnippet {
    pub title: String,
    pub url: String,
}

/// A `{title, subtitle}` pair from a list-style knowledge-card attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TitledItem {
    pub title: String,
    pub subtitle: String,
}

/// One entry of a list-style attribute: a titled item or a bare entity name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListEntry {
    Item(TitledItem),
    Name(String),
}

/// Value of a knowledge-card attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<ListEntry>),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ListEntry]> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::List(items) => Some(items),
        }
    }
}

/// A single heading-derived attribute of a knowledge card.
///
/// Serialized as a one-key object (`{"born": "..."}`) so that a sequence of
/// entries keeps document order and repeated headings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoreInfoEntry {
    pub key: String,
    pub value: FieldValue,
}

impl MoreInfoEntry {
    pub fn new(key: impl Into<String>, value: FieldValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl Serialize for MoreInfoEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for MoreInfoEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, FieldValue>::deserialize(deserializer)?;
        if map.len() != 1 {
            return Err(de::Error::invalid_length(map.len(), &"an object with exactly one key"));
        }
        let (key, value) = map.into_iter().next().ok_or_else(|| de::Error::custom("empty entry"))?;
        Ok(MoreInfoEntry { key, value })
    }
}

/// The entity-summary panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KnowledgeCard {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub more_info: Vec<MoreInfoEntry>,
}

impl KnowledgeCard {
    /// All values recorded under `key`, in document order.
    pub fn values_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a FieldValue> + 'a {
        self.more_info
            .iter()
            .filter(move |e| e.key == key)
            .map(|e| &e.value)
    }
}

/// One card of a horizontally-paged widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScrollingEntry {
    pub text: String,
    pub url: Option<String>,
    pub image: Option<String>,
}

/// A horizontally-paged widget group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScrollingSection {
    pub entries: Vec<ScrollingEntry>,
}

/// The output of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultRecord {
    pub profile: Profile,
    pub estimated_results: Option<u64>,
    pub organic_results: Vec<OrganicResult>,
    pub featured_snippet: Option<FeaturedSnippet>,
    pub knowledge_card: Option<KnowledgeCard>,
    pub scrolling_sections: Vec<ScrollingSection>,
}

impl ResultRecord {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            ..Default::default()
        }
    }

    /// Returns true if nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        self.estimated_results.unwrap_or(0) == 0
            && self.organic_results.is_empty()
            && self.featured_snippet.is_none()
            && self.knowledge_card.is_none()
            && self.scrolling_sections.is_empty()
    }

    pub fn has_featured_snippet(&self) -> bool {
        self.featured_snippet.is_some()
    }

    pub fn has_knowledge_card(&self) -> bool {
        self.knowledge_card.is_some()
    }

    /// Render the record as a JSON value, keyed by field name.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl Serialize for ResultRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.profile.fields();
        let mut map = serializer.serialize_map(None)?;
        if fields.estimated_results.is_attempted() {
            map.serialize_entry("estimated_results", &self.estimated_results)?;
        }
        if fields.featured_snippet.is_attempted() {
            map.serialize_entry("featured_snippet", &self.featured_snippet)?;
        }
        if fields.organic_results != Presence::Skipped {
            map.serialize_entry("organic_results", &self.organic_results)?;
        }
        if fields.knowledge_card.is_attempted() {
            map.serialize_entry("knowledge_card", &self.knowledge_card)?;
        }
        if fields.scrolling_sections.is_attempted() {
            map.serialize_entry("scrolling_sections", &self.scrolling_sections)?;
        }
        map.end()
    }
}
