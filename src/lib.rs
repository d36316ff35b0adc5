//! Trellis – rebuilds a tree of content items from a flat sequence of
//! serialized item elements.
//!
//! An export lists items one after another, each naming its parent by id or
//! by version key. Nothing guarantees a parent comes before its children, so
//! the reader keeps every item it has built in a [`journal::ReadingJournal`]
//! and parks relations whose parent has not shown up yet. When the parent
//! arrives the parked children are attached to it. Relations still parked
//! at the end are dropped, which lets partial or filtered exports load.
//!
//! ## Modules
//! * [`reader`] – Drives a read: type lookup, instantiation, decoding, reporting.
//! * [`journal`] – The per-read arena of nodes, their indexes and pending relations.
//! * [`decode`] – The fixed attributes every item carries.
//! * [`state`] – Publication state inference and the injectable clock.
//! * [`sections`] – Pluggable decoders for an item's sub-elements.
//! * [`catalog`] – Type lookup and instance construction seams.
//! * [`construct`] – [`construct::ContentNode`] and its parts.
//! * [`datatype`] – States, permission masks, detail values and textual conversions.
//! * [`element`] – The element tree the reader navigates.
//! * [`settings`] – [`settings::ReaderConfig`] and its loading.
//!
//! ## Tolerance
//! An item whose discriminator the catalog does not know is version skew,
//! not corruption. With `ignore_missing_types` set it is recorded in the
//! journal and skipped. Malformed required fields always end the read.

pub mod catalog;
pub mod construct;
pub mod datatype;
pub mod decode;
pub mod element;
pub mod error;
pub mod journal;
pub mod reader;
pub mod sections;
pub mod settings;
pub mod state;

pub use error::{ReadError, RecordedError, Result};
