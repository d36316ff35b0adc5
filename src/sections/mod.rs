//! Per-section decoding of an item's sub-elements.
//!
//! Each sub-element of an item is handed whole to the decoder registered for
//! its name. Names nobody registered are skipped, so documents written by a
//! newer version still read.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::catalog::DefinitionHasher;
use crate::construct::ContentNode;
use crate::element::Element;
use crate::error::{ReadError, Result};
use crate::journal::ReadingJournal;
use crate::settings::ReaderConfig;

mod attachments;
mod authorizations;
mod details;

pub use attachments::AttachmentDecoder;
pub use authorizations::AuthorizationDecoder;
pub use details::{decode_value, DetailCollectionDecoder, DetailDecoder, PropertyDecoder};

pub trait SectionDecoder: Send + Sync {
    /// Populates `node` from one section element. Problems worth reporting
    /// but not worth aborting for go to `journal`.
    fn decode_section(
        &self,
        element: &Element,
        node: &mut ContentNode,
        journal: &mut ReadingJournal,
        config: &ReaderConfig,
    ) -> Result<()>;
}

// ------------- Registry -------------
#[derive(Clone, Default)]
pub struct SectionRegistry {
    decoders: HashMap<String, Arc<dyn SectionDecoder>, DefinitionHasher>,
}

impl SectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
    /// The sections every exported item may carry.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("details", Arc::new(DetailDecoder));
        registry.register("detailCollections", Arc::new(DetailCollectionDecoder));
        registry.register("authorizations", Arc::new(AuthorizationDecoder));
        registry.register("properties", Arc::new(PropertyDecoder));
        registry.register("attachments", Arc::new(AttachmentDecoder));
        registry
    }
    /// Registers a decoder, replacing any previous one for the same section.
    pub fn register(&mut self, section: impl Into<String>, decoder: Arc<dyn SectionDecoder>) {
        self.decoders.insert(section.into(), decoder);
    }
    pub fn unregister(&mut self, section: &str) -> bool {
        self.decoders.remove(section).is_some()
    }
    pub fn contains(&self, section: &str) -> bool {
        self.decoders.contains_key(section)
    }
    pub fn len(&self) -> usize {
        self.decoders.len()
    }
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Routes every sub-element of `item` to its decoder.
    pub fn dispatch(
        &self,
        item: &Element,
        node: &mut ContentNode,
        journal: &mut ReadingJournal,
        config: &ReaderConfig,
    ) -> Result<()> {
        for section in item.children() {
            match self.decoders.get(section.name()) {
                Some(decoder) => decoder.decode_section(section, node, journal, config)?,
                None => trace!(section = section.name(), "skipping unknown section"),
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for SectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.decoders.keys().collect();
        names.sort();
        f.debug_struct("SectionRegistry")
            .field("sections", &names)
            .finish()
    }
}

pub(crate) fn section_failure(section: &str, message: impl Into<String>) -> ReadError {
    ReadError::SectionDecodeFailure {
        section: section.to_owned(),
        message: message.into(),
    }
}
