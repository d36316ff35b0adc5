//! The top-level reader.
//!
//! A read walks the item elements in document order. Each one is resolved
//! to a type, instantiated, decoded, and reported to the journal, which
//! wires it into the tree. Items of an unknown type are recorded and, when
//! the reader ignores missing types, skipped; every other error ends the read.
//!
//! ```
//! use trellis::catalog::Definitions;
//! use trellis::element::Element;
//! use trellis::reader::Reader;
//!
//! let reader = Reader::with_definitions(Definitions::new().with("Page", "Page"));
//! let item = |id: &str| {
//!     Element::new("item")
//!         .attr("id", id)
//!         .attr("discriminator", "Page")
//!         .attr("created", "01/01/2020 00:00:00")
//!         .attr("updated", "01/01/2020 00:00:00")
//!         .attr("sortOrder", "0")
//!         .attr("visible", "True")
//! };
//! let journal = reader.read([item("2").attr("parent", "1"), item("1")]).unwrap();
//! let root = journal.find(1).unwrap();
//! assert_eq!(journal.children(root).count(), 1);
//! ```

use std::borrow::Borrow;
use std::sync::Arc;

use tracing::{debug_span, warn, Span};

use crate::catalog::{resolve, DefaultFactory, Definitions, InstanceFactory, TypeCatalog};
use crate::construct::{ContentNode, NodeIndex};
use crate::decode::decode_scalars;
use crate::element::{AttributeBag, Element};
use crate::error::{ReadError, Result};
use crate::journal::ReadingJournal;
use crate::sections::{SectionDecoder, SectionRegistry};
use crate::settings::ReaderConfig;
use crate::state::{Clock, SystemClock};

pub const ITEM_ELEMENT: &str = "item";

// ------------- Reader -------------
pub struct Reader {
    catalog: Arc<dyn TypeCatalog>,
    factory: Arc<dyn InstanceFactory>,
    sections: SectionRegistry,
    config: ReaderConfig,
    clock: Arc<dyn Clock>,
}

impl Reader {
    /// A strict reader with the default sections and the system clock.
    pub fn new(catalog: Arc<dyn TypeCatalog>, factory: Arc<dyn InstanceFactory>) -> Self {
        Self {
            catalog,
            factory,
            sections: SectionRegistry::with_defaults(),
            config: ReaderConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }
    pub fn with_definitions(definitions: Definitions) -> Self {
        Self::new(Arc::new(definitions), Arc::new(DefaultFactory))
    }
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
    pub fn with_sections(mut self, sections: SectionRegistry) -> Self {
        self.sections = sections;
        self
    }
    pub fn register_section(&mut self, section: impl Into<String>, decoder: Arc<dyn SectionDecoder>) {
        self.sections.register(section, decoder);
    }
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }
    pub fn sections(&self) -> &SectionRegistry {
        &self.sections
    }
    pub fn ignore_missing_types(&self) -> bool {
        self.config.ignore_missing_types
    }
    pub fn set_ignore_missing_types(&mut self, ignore: bool) {
        self.config.ignore_missing_types = ignore;
    }

    /// Builds one node from one item element. The node is not reported to
    /// the journal, though section decoders may record errors there.
    pub fn read_single_item(
        &self,
        element: &Element,
        journal: &mut ReadingJournal,
    ) -> Result<ContentNode> {
        if element.name() != ITEM_ELEMENT {
            return Err(ReadError::UnexpectedElement {
                expected: ITEM_ELEMENT,
                found: element.name().to_owned(),
            });
        }
        let attributes = AttributeBag::from_element(element);
        let descriptor = resolve(&attributes, self.catalog.as_ref())?;
        let mut node = self.factory.create_instance(&descriptor);
        decode_scalars(&attributes, &mut node, &self.config, self.clock.as_ref())?;
        self.sections
            .dispatch(element, &mut node, journal, &self.config)?;
        Ok(node)
    }

    /// Starts a read that the caller drives one item at a time.
    pub fn session<I>(&self, elements: I) -> ReadSession<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<Element>,
    {
        ReadSession {
            reader: self,
            elements: elements.into_iter(),
            journal: ReadingJournal::new(),
            failed: false,
            span: debug_span!("read", ignore_missing_types = self.config.ignore_missing_types),
        }
    }

    /// Reads every item, returning the journal or the first fatal error.
    pub fn read<I>(&self, elements: I) -> Result<ReadingJournal>
    where
        I: IntoIterator,
        I::Item: Borrow<Element>,
    {
        let mut session = self.session(elements);
        for outcome in session.by_ref() {
            outcome?;
        }
        Ok(session.finish())
    }

    /// Reads the item children of a document root.
    pub fn read_document(&self, root: &Element) -> Result<ReadingJournal> {
        self.read(root.children())
    }

    fn step(&self, element: &Element, journal: &mut ReadingJournal) -> Result<ItemOutcome> {
        match self.read_single_item(element, journal) {
            Ok(node) => journal.report(node).map(ItemOutcome::Read),
            Err(error) if error.is_unknown_type() => {
                journal.error(error.clone(), AttributeBag::from_element(element));
                if self.config.ignore_missing_types {
                    warn!(%error, "skipping item");
                    Ok(ItemOutcome::Skipped)
                } else {
                    Err(error)
                }
            }
            Err(error) => Err(error),
        }
    }
}

// ------------- ReadSession -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The item was decoded and reported at this index.
    Read(NodeIndex),
    /// The item's type is unknown and the reader ignores missing types.
    Skipped,
}

/// A read in progress. Yields one outcome per element and stops after the
/// first error; the journal stays available either way.
pub struct ReadSession<'r, I> {
    reader: &'r Reader,
    elements: I,
    journal: ReadingJournal,
    failed: bool,
    span: Span,
}

impl<I> ReadSession<'_, I> {
    pub fn journal(&self) -> &ReadingJournal {
        &self.journal
    }
    pub fn has_failed(&self) -> bool {
        self.failed
    }
    /// Ends the read, dropping relations whose parent never appeared.
    pub fn finish(mut self) -> ReadingJournal {
        let _entered = self.span.enter();
        self.journal.close();
        self.journal
    }
}

impl<I> Iterator for ReadSession<'_, I>
where
    I: Iterator,
    I::Item: Borrow<Element>,
{
    type Item = Result<ItemOutcome>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let element = self.elements.next()?;
        let _entered = self.span.clone().entered();
        let outcome = self.reader.step(Borrow::<Element>::borrow(&element), &mut self.journal);
        self.failed = outcome.is_err();
        Some(outcome)
    }
}
