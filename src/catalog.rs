//! Type lookup and instance construction.
//!
//! Both seams are traits so the host system can plug in its own definition
//! registry. [`Definitions`] and [`DefaultFactory`] cover the common case.

use core::hash::BuildHasherDefault;
use std::collections::HashMap;

use seahash::SeaHasher;
use serde::Serialize;

use crate::construct::ContentNode;
use crate::element::AttributeBag;
use crate::error::{ReadError, Result};

pub type DefinitionHasher = BuildHasherDefault<SeaHasher>;

// ------------- TypeDescriptor -------------
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeDescriptor {
    discriminator: String,
    title: String,
}

impl TypeDescriptor {
    pub fn new(discriminator: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            title: title.into(),
        }
    }
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }
    pub fn title(&self) -> &str {
        &self.title
    }
}

// ------------- Seams -------------
pub trait TypeCatalog: Send + Sync {
    fn definition(&self, discriminator: &str) -> Option<TypeDescriptor>;
}

pub trait InstanceFactory: Send + Sync {
    /// Allocates an empty node of the described type.
    fn create_instance(&self, descriptor: &TypeDescriptor) -> ContentNode;
}

// ------------- Definitions -------------
#[derive(Debug, Default)]
pub struct Definitions {
    kept: HashMap<String, TypeDescriptor, DefinitionHasher>,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }
    /// Registers a descriptor, returning true if one with the same
    /// discriminator was already kept (it is replaced).
    pub fn keep(&mut self, descriptor: TypeDescriptor) -> bool {
        self.kept
            .insert(descriptor.discriminator().to_owned(), descriptor)
            .is_some()
    }
    pub fn with(mut self, discriminator: &str, title: &str) -> Self {
        self.keep(TypeDescriptor::new(discriminator, title));
        self
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

impl TypeCatalog for Definitions {
    fn definition(&self, discriminator: &str) -> Option<TypeDescriptor> {
        self.kept.get(discriminator).cloned()
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFactory;

impl InstanceFactory for DefaultFactory {
    fn create_instance(&self, descriptor: &TypeDescriptor) -> ContentNode {
        ContentNode::new(descriptor.clone())
    }
}

// ------------- Resolution -------------
pub fn resolve(attributes: &AttributeBag, catalog: &dyn TypeCatalog) -> Result<TypeDescriptor> {
    let discriminator = attributes.get("discriminator");
    if let Some(descriptor) = discriminator.and_then(|d| catalog.definition(d)) {
        return Ok(descriptor);
    }
    Err(ReadError::UnknownType {
        discriminator: discriminator.map(str::to_owned),
        title: attributes.get("title").map(str::to_owned),
        name: attributes.get("name").map(str::to_owned),
        attributes: attributes.clone(),
    })
}
