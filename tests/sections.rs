mod common;

use std::sync::Arc;

use common::{item, reader};
use trellis::construct::ContentNode;
use trellis::datatype::DetailValue;
use trellis::element::Element;
use trellis::journal::ReadingJournal;
use trellis::sections::{SectionDecoder, SectionRegistry};
use trellis::settings::ReaderConfig;
use trellis::{ReadError, Result};

fn detail(name: &str, type_name: &str, value: &str) -> Element {
    Element::new("detail")
        .attr("name", name)
        .attr("typeName", type_name)
        .text(value)
}

#[test]
fn details_are_typed() {
    let reader = reader(ReaderConfig::strict());
    let details = Element::new("details")
        .child(detail("Text", "System.String", "<p>Hello</p>"))
        .child(detail("Count", "System.Int32", "12"))
        .child(detail("Featured", "System.Boolean", "True"))
        .child(detail("Ratio", "System.Double", "0.25"))
        .child(detail("Shown", "System.DateTime", "03/04/2020 05:06:07"))
        .child(detail("Related", "N2.ContentItem", "9"))
        .child(detail("Blob", "System.Object", "AAEAAAD/////"))
        .child(Element::new("detail").attr("name", "Plain").text("no type"));
    let journal = reader.read([item(1).child(details)]).expect("read ok");
    let node = journal.find(1).expect("node");
    assert_eq!(node.detail("Text"), Some(&DetailValue::String("<p>Hello</p>".into())));
    assert_eq!(node.detail("Count"), Some(&DetailValue::Integer(12)));
    assert_eq!(node.detail("Featured"), Some(&DetailValue::Boolean(true)));
    assert_eq!(node.detail("Ratio"), Some(&DetailValue::Double(0.25)));
    assert!(matches!(node.detail("Shown"), Some(DetailValue::Timestamp(_))));
    assert_eq!(node.detail("Related"), Some(&DetailValue::Link(9)));
    assert_eq!(node.detail("Blob"), Some(&DetailValue::Object("AAEAAAD/////".into())));
    assert_eq!(node.detail("Plain"), Some(&DetailValue::String("no type".into())));
    assert!(journal.errors().is_empty());
}

#[test]
fn detail_meta_is_kept() {
    let reader = reader(ReaderConfig::strict());
    let details = Element::new("details").child(detail("Image", "String", "/a.png").attr("meta", "crop"));
    let journal = reader.read([item(1).child(details)]).expect("read ok");
    let node = journal.find(1).expect("node");
    assert_eq!(node.fields.details["Image"].meta.as_deref(), Some("crop"));
}

#[test]
fn unknown_value_type_is_recorded_and_kept_as_text() {
    let reader = reader(ReaderConfig::strict());
    let details = Element::new("details").child(detail("Geo", "Acme.GeoPoint", "1,2"));
    let journal = reader.read([item(1).child(details)]).expect("read ok");
    let node = journal.find(1).expect("node");
    assert_eq!(node.detail("Geo"), Some(&DetailValue::String("1,2".into())));
    assert_eq!(journal.errors().len(), 1);
    assert!(matches!(
        journal.errors()[0].error,
        ReadError::SectionDecodeFailure { ref section, .. } if section == "details"
    ));
    assert_eq!(journal.errors()[0].attributes.get("name"), Some("Geo"));
}

#[test]
fn malformed_detail_value_is_fatal() {
    let reader = reader(ReaderConfig::tolerant());
    let details = Element::new("details").child(detail("Count", "Int32", "many"));
    let err = reader
        .read([item(1).child(details)])
        .expect_err("malformed detail fails");
    assert!(matches!(err, ReadError::SectionDecodeFailure { .. }));
}

#[test]
fn nameless_detail_is_fatal() {
    let reader = reader(ReaderConfig::tolerant());
    let details = Element::new("details").child(Element::new("detail").text("orphan"));
    let err = reader
        .read([item(1).child(details)])
        .expect_err("nameless detail fails");
    assert!(matches!(err, ReadError::SectionDecodeFailure { .. }));
}

#[test]
fn detail_collections_keep_order() {
    let reader = reader(ReaderConfig::strict());
    let collections = Element::new("detailCollections").child(
        Element::new("collection")
            .attr("name", "Tags")
            .child(Element::new("detail").attr("typeName", "String").text("rust"))
            .child(Element::new("detail").attr("typeName", "String").text("cms"))
            .child(Element::new("detail").attr("typeName", "Int32").text("3")),
    );
    let journal = reader.read([item(1).child(collections)]).expect("read ok");
    let node = journal.find(1).expect("node");
    assert_eq!(
        node.fields.detail_collections["Tags"],
        vec![
            DetailValue::String("rust".into()),
            DetailValue::String("cms".into()),
            DetailValue::Integer(3),
        ]
    );
}

#[test]
fn authorizations_properties_and_attachments() {
    let reader = reader(ReaderConfig::strict());
    let node = item(1)
        .child(
            Element::new("authorizations")
                .child(Element::new("role").text("Editors"))
                .child(Element::new("role").text("Administrators"))
                .child(Element::new("role").text("Editors")),
        )
        .child(
            Element::new("properties").child(
                Element::new("property")
                    .attr("name", "ShowTitle")
                    .attr("typeName", "System.Boolean")
                    .text("false"),
            ),
        )
        .child(
            Element::new("attachments").child(
                Element::new("attachment")
                    .attr("name", "ImageUrl")
                    .attr("url", "/upload/logo.png")
                    .attr("mimeType", "image/png")
                    .attr("encoding", "base64")
                    .text("iVBORw0KGgo="),
            ),
        );
    let journal = reader.read([node]).expect("read ok");
    let node = journal.find(1).expect("node");
    assert_eq!(node.fields.authorized_roles, vec!["Editors", "Administrators"]);
    assert_eq!(node.fields.properties["ShowTitle"], DetailValue::Boolean(false));
    let attachment = &node.fields.attachments[0];
    assert_eq!(attachment.name, "ImageUrl");
    assert_eq!(attachment.url.as_deref(), Some("/upload/logo.png"));
    assert_eq!(attachment.mime_type.as_deref(), Some("image/png"));
    assert_eq!(attachment.encoding.as_deref(), Some("base64"));
    assert_eq!(attachment.payload.as_deref(), Some("iVBORw0KGgo="));
}

#[test]
fn unknown_sections_are_skipped() {
    let reader = reader(ReaderConfig::strict());
    let node = item(1)
        .child(Element::new("children").child(item(2)))
        .child(Element::new("futureSection").attr("x", "y"));
    let journal = reader.read([node]).expect("read ok");
    assert_eq!(journal.len(), 1);
    assert!(journal.errors().is_empty());
}

struct Counter;

impl SectionDecoder for Counter {
    fn decode_section(
        &self,
        element: &Element,
        node: &mut ContentNode,
        _journal: &mut ReadingJournal,
        _config: &ReaderConfig,
    ) -> Result<()> {
        let count = element.children().count() as i32;
        node.fields
            .properties
            .insert("Comments".to_string(), DetailValue::Integer(count));
        Ok(())
    }
}

#[test]
fn custom_section_decoder() {
    let mut reader = reader(ReaderConfig::strict());
    reader.register_section("comments", Arc::new(Counter));
    let node = item(1).child(
        Element::new("comments")
            .child(Element::new("comment"))
            .child(Element::new("comment")),
    );
    let journal = reader.read([node]).expect("read ok");
    assert_eq!(
        journal.find(1).expect("node").fields.properties["Comments"],
        DetailValue::Integer(2)
    );
}

#[test]
fn sections_can_be_left_out() {
    let mut sections = SectionRegistry::with_defaults();
    assert!(sections.unregister("details"));
    assert!(!sections.contains("details"));
    let reader = reader(ReaderConfig::strict()).with_sections(sections);
    let details = Element::new("details").child(detail("Count", "Int32", "many"));
    let journal = reader.read([item(1).child(details)]).expect("read ok");
    assert!(journal.find(1).expect("node").fields.details.is_empty());
}

#[test]
fn json_fixture_document() {
    let text = include_str!("fixtures/export.json");
    let root: Element = serde_json::from_str(text).expect("fixture parses");
    let reader = reader(ReaderConfig::tolerant());
    let journal = reader.read_document(&root).expect("read ok");
    assert_eq!(journal.len(), 3);
    assert_eq!(journal.errors().len(), 1);
    let start = journal.find(1).expect("start page");
    let titles: Vec<_> = journal.children(start).map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["News", "About"]);
    let news = journal.find_by_version_key("news-v1").expect("keyed");
    assert_eq!(news.id, 2);
}
