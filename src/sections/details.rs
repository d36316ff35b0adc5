use crate::construct::{ContentNode, Detail};
use crate::datatype::{parse_boolean, parse_double, parse_integer, parse_timestamp, DetailValue};
use crate::element::{AttributeBag, Element};
use crate::error::Result;
use crate::journal::ReadingJournal;
use crate::settings::ReaderConfig;

use super::{section_failure, SectionDecoder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueType {
    String,
    Integer,
    Boolean,
    Double,
    Timestamp,
    Link,
    Object,
}

impl ValueType {
    /// Type names may carry a namespace, only the last segment counts.
    fn from_name(type_name: &str) -> Option<Self> {
        let short = type_name.rsplit('.').next().unwrap_or(type_name).trim();
        let known = [
            ("string", Self::String),
            ("int32", Self::Integer),
            ("boolean", Self::Boolean),
            ("double", Self::Double),
            ("datetime", Self::Timestamp),
            ("contentitem", Self::Link),
            ("link", Self::Link),
            ("object", Self::Object),
        ];
        known
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(short))
            .map(|(_, t)| t)
    }
}

/// Decodes the typed value carried by a `detail` or `property` element. A
/// missing `typeName` means a string. An unknown one is recorded in the
/// journal and the text kept as a string; a malformed value is fatal.
pub fn decode_value(
    section: &str,
    element: &Element,
    config: &ReaderConfig,
    journal: &mut ReadingJournal,
) -> Result<DetailValue> {
    let text = element.text_content().unwrap_or_default();
    let type_name = element.attribute("typeName").unwrap_or("String");
    let Some(value_type) = ValueType::from_name(type_name) else {
        journal.error(
            section_failure(section, format!("unknown value type '{type_name}'")),
            AttributeBag::from_element(element),
        );
        return Ok(DetailValue::String(text.to_owned()));
    };
    let malformed = || section_failure(section, format!("'{text}' is not a valid {type_name}"));
    let value = match value_type {
        ValueType::String => DetailValue::String(text.to_owned()),
        ValueType::Object => DetailValue::Object(text.to_owned()),
        ValueType::Integer => DetailValue::Integer(parse_integer(text).ok_or_else(malformed)?),
        ValueType::Boolean => DetailValue::Boolean(parse_boolean(text).ok_or_else(malformed)?),
        ValueType::Double => DetailValue::Double(parse_double(text).ok_or_else(malformed)?),
        ValueType::Link => DetailValue::Link(parse_integer(text).ok_or_else(malformed)?),
        ValueType::Timestamp => DetailValue::Timestamp(
            parse_timestamp(text, &config.timestamp_format).ok_or_else(malformed)?,
        ),
    };
    Ok(value)
}

fn required_name<'e>(section: &str, element: &'e Element) -> Result<&'e str> {
    element
        .attribute("name")
        .filter(|n| !n.is_empty())
        .ok_or_else(|| section_failure(section, format!("<{}> without a name", element.name())))
}

// ------------- details -------------
#[derive(Debug, Default, Clone, Copy)]
pub struct DetailDecoder;

impl SectionDecoder for DetailDecoder {
    fn decode_section(
        &self,
        element: &Element,
        node: &mut ContentNode,
        journal: &mut ReadingJournal,
        config: &ReaderConfig,
    ) -> Result<()> {
        for detail in element.children_named("detail") {
            let name = required_name("details", detail)?;
            let value = decode_value("details", detail, config, journal)?;
            let meta = detail.attribute("meta").map(str::to_owned);
            node.fields
                .details
                .insert(name.to_owned(), Detail { value, meta });
        }
        Ok(())
    }
}

// ------------- detailCollections -------------
#[derive(Debug, Default, Clone, Copy)]
pub struct DetailCollectionDecoder;

impl SectionDecoder for DetailCollectionDecoder {
    fn decode_section(
        &self,
        element: &Element,
        node: &mut ContentNode,
        journal: &mut ReadingJournal,
        config: &ReaderConfig,
    ) -> Result<()> {
        for collection in element.children_named("collection") {
            let name = required_name("detailCollections", collection)?;
            let mut values = Vec::new();
            for detail in collection.children_named("detail") {
                values.push(decode_value("detailCollections", detail, config, journal)?);
            }
            node.fields
                .detail_collections
                .entry(name.to_owned())
                .or_default()
                .extend(values);
        }
        Ok(())
    }
}

// ------------- properties -------------
#[derive(Debug, Default, Clone, Copy)]
pub struct PropertyDecoder;

impl SectionDecoder for PropertyDecoder {
    fn decode_section(
        &self,
        element: &Element,
        node: &mut ContentNode,
        journal: &mut ReadingJournal,
        config: &ReaderConfig,
    ) -> Result<()> {
        for property in element.children_named("property") {
            let name = required_name("properties", property)?;
            let value = decode_value("properties", property, config, journal)?;
            node.fields.properties.insert(name.to_owned(), value);
        }
        Ok(())
    }
}
