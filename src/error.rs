use thiserror::Error;

use crate::construct::NodeId;
use crate::element::AttributeBag;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadError {
    #[error("No definition found for '{}' with name '{}' and discriminator '{}'",
        .title.as_deref().unwrap_or(""),
        .name.as_deref().unwrap_or(""),
        .discriminator.as_deref().unwrap_or(""))]
    UnknownType {
        discriminator: Option<String>,
        title: Option<String>,
        name: Option<String>,
        attributes: AttributeBag,
    },
    #[error("Required field '{field}' is malformed: {}", describe(.value))]
    MalformedRequiredField { field: &'static str, value: Option<String> },
    #[error("Field '{field}' has an unparsable value '{value}'")]
    MalformedField { field: &'static str, value: String },
    #[error("Section '{section}' could not be decoded: {message}")]
    SectionDecodeFailure { section: String, message: String },
    #[error("Expected element '{expected}' but was '{found}'")]
    UnexpectedElement { expected: &'static str, found: String },
    #[error("Item id {0} was already read")]
    DuplicateId(NodeId),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ReadError>;

impl ReadError {
    /// Whether the reader may skip past this error when configured to
    /// ignore missing types.
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, Self::UnknownType { .. })
    }
}

fn describe(value: &Option<String>) -> String {
    match value {
        Some(v) => format!("unparsable value '{v}'"),
        None => "missing".to_string(),
    }
}

// Helper conversions
impl From<::config::ConfigError> for ReadError {
    fn from(e: ::config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

/// A non-fatal error kept by the journal together with the raw attributes of
/// the element it came from, so the caller can report or retry it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedError {
    pub error: ReadError,
    pub attributes: AttributeBag,
}

impl RecordedError {
    pub fn new(error: ReadError, attributes: AttributeBag) -> Self {
        Self { error, attributes }
    }
}
