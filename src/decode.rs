//! Decoding of the fixed attributes every item carries.

use chrono::{DateTime, Local};

use crate::construct::{ContentNode, NodeId, ParentRef};
use crate::datatype::{
    parse_boolean, parse_integer, parse_timestamp, CollectionState, ContentState, Permission,
};
use crate::element::AttributeBag;
use crate::error::{ReadError, Result};
use crate::settings::ReaderConfig;
use crate::state::{infer_state, Clock};

// ------------- Required fields -------------
fn required_integer(attributes: &AttributeBag, field: &'static str) -> Result<i32> {
    let raw = attributes.require(field)?;
    parse_integer(raw).ok_or_else(|| malformed_required(field, raw))
}

fn required_boolean(attributes: &AttributeBag, field: &'static str) -> Result<bool> {
    let raw = attributes.require(field)?;
    parse_boolean(raw).ok_or_else(|| malformed_required(field, raw))
}

fn required_timestamp(
    attributes: &AttributeBag,
    field: &'static str,
    format: &str,
) -> Result<DateTime<Local>> {
    let raw = attributes.require(field)?;
    parse_timestamp(raw, format).ok_or_else(|| malformed_required(field, raw))
}

fn malformed_required(field: &'static str, raw: &str) -> ReadError {
    ReadError::MalformedRequiredField {
        field,
        value: Some(raw.to_owned()),
    }
}

// ------------- Optional fields -------------
fn optional_integer(attributes: &AttributeBag, field: &'static str) -> Result<Option<i32>> {
    attributes
        .get(field)
        .map(|raw| parse_integer(raw).ok_or_else(|| malformed(field, raw)))
        .transpose()
}

fn optional_non_empty_integer(
    attributes: &AttributeBag,
    field: &'static str,
) -> Result<Option<i32>> {
    attributes
        .get_non_empty(field)
        .map(|raw| parse_integer(raw).ok_or_else(|| malformed(field, raw)))
        .transpose()
}

fn optional_timestamp(
    attributes: &AttributeBag,
    field: &'static str,
    format: &str,
) -> Result<Option<DateTime<Local>>> {
    attributes
        .get_non_empty(field)
        .map(|raw| parse_timestamp(raw, format).ok_or_else(|| malformed(field, raw)))
        .transpose()
}

fn optional_string(attributes: &AttributeBag, field: &str) -> Option<String> {
    attributes.get(field).map(str::to_owned)
}

fn non_empty_string(attributes: &AttributeBag, field: &str) -> Option<String> {
    attributes.get_non_empty(field).map(str::to_owned)
}

fn malformed(field: &'static str, raw: &str) -> ReadError {
    ReadError::MalformedField {
        field,
        value: raw.to_owned(),
    }
}

// ------------- Decoder -------------
/// Fills the scalar fields of `node` from the item's attributes, including
/// the declared parent reference and the publication state.
pub fn decode_scalars(
    attributes: &AttributeBag,
    node: &mut ContentNode,
    config: &ReaderConfig,
    clock: &dyn Clock,
) -> Result<()> {
    let format = config.timestamp_format.as_str();

    node.id = required_integer(attributes, "id")?;
    node.created = required_timestamp(attributes, "created", format)?;
    node.updated = required_timestamp(attributes, "updated", format)?;
    node.sort_order = required_integer(attributes, "sortOrder")?;
    node.visible = required_boolean(attributes, "visible")?;

    node.name = non_empty_string(attributes, "name").filter(|name| *name != node.id.to_string());
    node.title = optional_string(attributes, "title").unwrap_or_default();
    node.published = optional_timestamp(attributes, "published", format)?;
    node.expires = optional_timestamp(attributes, "expires", format)?;
    node.saved_by = optional_string(attributes, "savedBy");
    // an empty zone must read as no zone at all
    node.zone_name = non_empty_string(attributes, "zoneName");
    node.template_key = non_empty_string(attributes, "templateKey");
    node.translation_key = optional_non_empty_integer(attributes, "translationKey")?;
    node.ancestral_trail = optional_string(attributes, "ancestralTrail");
    node.altered_permissions =
        optional_integer(attributes, "alteredPermissions")?.map(Permission::from_bits_retain);
    node.child_state =
        optional_integer(attributes, "childState")?.map(CollectionState::from_bits_retain);
    node.version_index = optional_integer(attributes, "versionIndex")?;
    node.version_of = optional_integer(attributes, "versionOf")?;

    node.parent_ref = parent_ref(attributes);
    node.state = decode_state(attributes, node, clock);
    Ok(())
}

/// The parent a node points at. A non-numeric or zero `parent` means none.
pub fn parent_ref(attributes: &AttributeBag) -> ParentRef {
    ParentRef {
        id: attributes
            .get("parent")
            .and_then(parse_integer)
            .filter(|id: &NodeId| *id != 0),
        version_key: non_empty_string(attributes, "parentVersionKey"),
    }
}

fn decode_state(attributes: &AttributeBag, node: &ContentNode, clock: &dyn Clock) -> ContentState {
    attributes
        .get_non_empty("state")
        .and_then(ContentState::parse_lenient)
        .unwrap_or_else(|| infer_state(node.published, node.expires, clock.now()))
}
