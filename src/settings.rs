//! Reader settings.
//!
//! The reader only ever receives a resolved [`ReaderConfig`]. Loading from a
//! file or the environment is a convenience for the host application.

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::datatype::DEFAULT_TIMESTAMP_FORMAT;
use crate::error::Result;

pub const ENV_PREFIX: &str = "TRELLIS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Record items of unknown type and continue instead of aborting.
    pub ignore_missing_types: bool,
    /// chrono format string for every timestamp attribute and value.
    pub timestamp_format: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            ignore_missing_types: false,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl ReaderConfig {
    /// Strict reading: an unknown type aborts the read.
    pub fn strict() -> Self {
        Self::default()
    }
    /// Tolerant reading: unknown types are recorded and skipped.
    pub fn tolerant() -> Self {
        Self {
            ignore_missing_types: true,
            ..Self::default()
        }
    }
    /// Layers an optional config file and `TRELLIS_*` environment variables
    /// over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }
        let config = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }
    /// Parses settings from an inline document, without environment overrides.
    pub fn parse(text: &str, format: FileFormat) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(text, format))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
