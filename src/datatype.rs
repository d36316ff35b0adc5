// used for timestamps on nodes and detail values
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
// used for the permission and child-state masks
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

// used to print out readable forms of a data type
use std::fmt;
// used when parsing a state name
use std::str::FromStr;

use crate::construct::NodeId;

/// The canonical, culture-invariant textual form of a timestamp.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

// ------------- Publication state -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContentState {
    #[default]
    None,
    New,
    Draft,
    Waiting,
    Published,
    Unpublished,
    Deleted,
}

impl ContentState {
    pub const ALL: [ContentState; 7] = [
        Self::None,
        Self::New,
        Self::Draft,
        Self::Waiting,
        Self::Published,
        Self::Unpublished,
        Self::Deleted,
    ];

    pub fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::New => 1,
            Self::Draft => 2,
            Self::Waiting => 4,
            Self::Published => 16,
            Self::Unpublished => 32,
            Self::Deleted => 64,
        }
    }
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.code() == code)
    }
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::New => "New",
            Self::Draft => "Draft",
            Self::Waiting => "Waiting",
            Self::Published => "Published",
            Self::Unpublished => "Unpublished",
            Self::Deleted => "Deleted",
        }
    }
    /// Reads either the numeric code or the case-insensitive name. Older
    /// documents carry the code, newer ones the name.
    pub fn parse_lenient(text: &str) -> Option<Self> {
        let text = text.trim();
        match text.parse::<i32>() {
            Ok(code) => Self::from_code(code),
            Err(_) => text.parse().ok(),
        }
    }
}

impl FromStr for ContentState {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

impl fmt::Display for ContentState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ------------- Masks -------------
bitflags! {
    /// Permissions that differ from the ones inherited from the parent.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Permission: i32 {
        const READ = 1;
        const WRITE = 2;
        const PUBLISH = 4;
        const ADMINISTER = 8;
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
        const FULL = Self::READ.bits() | Self::WRITE.bits() | Self::PUBLISH.bits() | Self::ADMINISTER.bits();
    }
}

bitflags! {
    /// Aggregated facts about a node's children, precomputed for listings.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CollectionState: i32 {
        const IS_EMPTY = 1;
        const CONTAINS_VISIBLE_PUBLIC_PAGES = 2;
        const CONTAINS_HIDDEN_PUBLIC_PAGES = 4;
        const CONTAINS_VISIBLE_SECURED_PAGES = 8;
        const CONTAINS_HIDDEN_SECURED_PAGES = 16;
        const CONTAINS_PUBLIC_PARTS = 32;
        const CONTAINS_SECURED_PARTS = 64;
    }
}

// ------------- Detail values -------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DetailValue {
    String(String),
    Integer(i32),
    Boolean(bool),
    Double(f64),
    Timestamp(DateTime<Local>),
    /// Reference to another item by id; left for the consumer to resolve.
    Link(NodeId),
    /// Opaque payload kept exactly as read.
    Object(String),
}

impl DetailValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
    pub fn data_type(&self) -> &'static str {
        match self {
            Self::String(_) => "String",
            Self::Integer(_) => "Int32",
            Self::Boolean(_) => "Boolean",
            Self::Double(_) => "Double",
            Self::Timestamp(_) => "DateTime",
            Self::Link(_) => "ContentItem",
            Self::Object(_) => "Object",
        }
    }
}

impl fmt::Display for DetailValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::String(s) | Self::Object(s) => write!(f, "{s}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::Timestamp(t) => write!(f, "{t}"),
            Self::Link(id) => write!(f, "#{id}"),
        }
    }
}

// ------------- Textual conversions -------------
// All return None on failure; callers attach the field name to the error.

pub fn parse_integer(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

pub fn parse_boolean(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

pub fn parse_double(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

/// Timestamps are written in universal time and handed out in local time.
pub fn parse_timestamp(text: &str, format: &str) -> Option<DateTime<Local>> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), format).ok()?;
    Some(Utc.from_utc_datetime(&naive).with_timezone(&Local))
}
