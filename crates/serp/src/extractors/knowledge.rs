// ABOUTME: Knowledge panel extraction: title, subtitle, description and heading-keyed attributes.
// ABOUTME: A matched panel missing its title, subtitle or description is an InvalidDocument error.

use scraper::ElementRef;

use crate::dom::{text_content, Document, Query};
use crate::error::{ExtractError, Result};
use crate::extractors::patterns::{
    ATTRIBUTE_SPANS, HEADING_ANCHOR, ITEM_TITLE, KNOWLEDGE_PANEL, LIST_ITEM_HEADINGS,
    PANEL_ATTRIBUTE, PANEL_DESCRIPTION, PANEL_SUBTITLE, PANEL_TITLE, PEOPLE_ALSO_SEARCH_FOR,
    ROLE_HEADING, SIDEWAYS_RELATION,
};
use crate::normalize::{clean, normalize_dict_key};
use crate::result::{FieldValue, KnowledgeCard, ListEntry, MoreInfoEntry, TitledItem};

/// Extract the knowledge panel.
///
/// `Ok(None)` when the page has no panel; `Err` when a panel matched but is
/// missing one of its mandatory parts.
pub fn extract(doc: &Document) -> Result<Option<KnowledgeCard>> {
    let Some(panel) = doc.select_first(&KNOWLEDGE_PANEL) else {
        return Ok(None);
    };

    let title = required_text(panel, &PANEL_TITLE, "title")?;
    if title.is_empty() {
        return Err(ExtractError::invalid_document(
            "knowledge_card.title",
            Some(anyhow::anyhow!("knowledge panel title is empty")),
        ));
    }
    let subtitle = required_text(panel, &PANEL_SUBTITLE, "subtitle")?;
    let description = required_text(panel, &PANEL_DESCRIPTION, "description")?;

    let more_info = PANEL_ATTRIBUTE
        .select(panel)
        .into_iter()
        .filter_map(attribute_entry)
        .collect();

    Ok(Some(KnowledgeCard {
        title,
        subtitle,
        description,
        more_info,
    }))
}

fn required_text(panel: ElementRef<'_>, query: &Query, field: &str) -> Result<String> {
    query
        .first(panel)
        .map(|el| clean(&text_content(el)))
        .ok_or_else(|| {
            ExtractError::invalid_document(
                format!("knowledge_card.{}", field),
                Some(anyhow::anyhow!("knowledge panel has no {} node", field)),
            )
        })
}

/// Turn one attribute row into an entry, or skip it when it has neither shape.
fn attribute_entry(row: ElementRef<'_>) -> Option<MoreInfoEntry> {
    let spans = ATTRIBUTE_SPANS.select(row);
    if let [key, value] = spans.as_slice() {
        return Some(MoreInfoEntry::new(
            normalize_dict_key(&clean(&text_content(*key))),
            FieldValue::Text(clean(&text_content(*value))),
        ));
    }

    let heading = ROLE_HEADING.first(row)?;
    let anchor = HEADING_ANCHOR.first(heading)?;
    let key = normalize_dict_key(&clean(&text_content(anchor)));

    let mut items: Vec<ListEntry> = LIST_ITEM_HEADINGS
        .select(row)
        .into_iter()
        .filter_map(list_item)
        .map(ListEntry::Item)
        .collect();

    if key == PEOPLE_ALSO_SEARCH_FOR {
        items.extend(
            SIDEWAYS_RELATION
                .select(row)
                .into_iter()
                .map(|el| clean(&text_content(el)))
                .filter(|name| !name.is_empty())
                .map(ListEntry::Name),
        );
    }

    Some(MoreInfoEntry::new(key, FieldValue::List(items)))
}

/// A list item is a heading-role node whose title node is followed by its subtitle.
fn list_item(item: ElementRef<'_>) -> Option<TitledItem> {
    item.children().find_map(ElementRef::wrap)?;
    let title = ITEM_TITLE.first(item)?;
    let subtitle = title
        .next_siblings()
        .find_map(ElementRef::wrap)
        .map(|el| clean(&text_content(el)))
        .unwrap_or_default();
    Some(TitledItem {
        title: clean(&text_content(title)),
        subtitle,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PANEL_HEAD: &str = r#"
        <h2 data-attrid="title"><span>Elon Musk</span></h2>
        <div data-attrid="subtitle"><span>CEO of Tesla</span></div>
        <div class="kno-rdesc"><span>Elon Reeve Musk is an entrepreneur and business magnate.</span></div>
    "#;

    fn panel(body: &str) -> String {
        format!(r#"<html><body><div class="kp-wholepage ss6qqb">{PANEL_HEAD}{body}</div></body></html>"#)
    }

    fn run(html: &str) -> Result<Option<KnowledgeCard>> {
        extract(&Document::parse(html).unwrap())
    }

    #[test]
    fn test_no_panel_is_absent() {
        assert_eq!(run("<div class='g'></div>").unwrap(), None);
    }

    #[test]
    fn test_head_fields() {
        let card = run(&panel("")).unwrap().unwrap();
        assert_eq!(card.title, "Elon Musk");
        assert_eq!(card.subtitle, "CEO of Tesla");
        assert_eq!(card.description, "Elon Reeve Musk is an entrepreneur and business magnate.");
        assert!(card.more_info.is_empty());
    }

    #[test]
    fn test_incomplete_panel_is_invalid_document() {
        let no_title = r#"<div class="kp-wholepage"><div data-attrid="subtitle">S</div>
            <div class="kno-rdesc"><span>D</span></div></div>"#;
        let err = run(no_title).unwrap_err();
        assert!(err.is_invalid_document());
        assert_eq!(err.op, "knowledge_card.title");

        let no_description = r#"<div class="kp-wholepage"><h2><span>T</span></h2>
            <div data-attrid="subtitle">S</div></div>"#;
        let err = run(no_description).unwrap_err();
        assert_eq!(err.op, "knowledge_card.description");
    }

    #[test]
    fn test_duplicate_simple_attributes_keep_order() {
        let html = panel(
            r#"<div data-attrid="kc:/people/person:born"><span>Born: </span><span>June 28, 1971</span></div>
               <div data-attrid="kc:/people/person:spouse"><span>Spouse</span><span>None</span></div>
               <div data-attrid="kc:/people/person:born"><span>Born</span><span>Pretoria, South Africa</span></div>"#,
        );
        let card = run(&html).unwrap().unwrap();
        assert_eq!(
            card.more_info,
            vec![
                MoreInfoEntry::new("born", FieldValue::Text("June 28, 1971".to_string())),
                MoreInfoEntry::new("spouse", FieldValue::Text("None".to_string())),
                MoreInfoEntry::new("born", FieldValue::Text("Pretoria, South Africa".to_string())),
            ]
        );
    }

    #[test]
    fn test_list_attribute() {
        let html = panel(
            r#"<div data-attrid="kc:/people/person:children">
                 <div role="heading"><a href="/search?q=children">Children</a></div>
                 <div role="list">
                   <div role="heading"><div class="title">X Æ A-12</div><div>Son</div></div>
                   <div role="heading"><div class="title">Vivian</div><div>Daughter</div></div>
                   <div role="heading"></div>
                 </div>
               </div>"#,
        );
        let card = run(&html).unwrap().unwrap();
        assert_eq!(
            card.more_info,
            vec![MoreInfoEntry::new(
                "children",
                FieldValue::List(vec![
                    ListEntry::Item(TitledItem {
                        title: "X A-12".to_string(),
                        subtitle: "Son".to_string()
                    }),
                    ListEntry::Item(TitledItem {
                        title: "Vivian".to_string(),
                        subtitle: "Daughter".to_string()
                    }),
                ])
            )]
        );
    }

    #[test]
    fn test_people_also_search_for_collects_sideways_relations() {
        let html = panel(
            r#"<div data-attrid="kc:/people/person:people also search for">
                 <div role="heading"><a href="/search?q=pasf">People also search for:</a></div>
                 <div role="list">
                   <div role="heading"><div class="title">Kimbal Musk</div><div>Brother</div></div>
                 </div>
                 <div data-reltype="sideways"> Jeff   Bezos </div>
                 <div data-reltype="sideways">Bill Gates</div>
               </div>"#,
        );
        let card = run(&html).unwrap().unwrap();
        let value = card.values_for("people_also_search_for").next().unwrap();
        assert_eq!(
            value,
            &FieldValue::List(vec![
                ListEntry::Item(TitledItem {
                    title: "Kimbal Musk".to_string(),
                    subtitle: "Brother".to_string()
                }),
                ListEntry::Name("Jeff Bezos".to_string()),
                ListEntry::Name("Bill Gates".to_string()),
            ])
        );
    }

    #[test]
    fn test_sideways_relations_ignored_for_other_keys() {
        let html = panel(
            r#"<div data-attrid="kc:/people/person:siblings">
                 <div role="heading"><a>Siblings</a></div>
                 <div data-reltype="sideways">Tosca Musk</div>
               </div>"#,
        );
        let card = run(&html).unwrap().unwrap();
        assert_eq!(card.more_info, vec![MoreInfoEntry::new("siblings", FieldValue::List(vec![]))]);
    }

    #[test]
    fn test_rows_without_shape_are_skipped() {
        let html = panel(
            r#"<div data-attrid="kc:/people/person:quote"><span>only one span</span></div>
               <div data-attrid="kc:/people/person:awards"><div role="heading">No anchor</div></div>
               <div data-attrid="hw:/collection/films">no spans, no heading</div>"#,
        );
        let card = run(&html).unwrap().unwrap();
        assert!(card.more_info.is_empty());
    }

    #[test]
    fn test_rows_outside_namespace_are_ignored() {
        let html = panel(r#"<div data-attrid="description"><span>A</span><span>B</span></div>"#);
        assert!(run(&html).unwrap().unwrap().more_info.is_empty());
    }
}
