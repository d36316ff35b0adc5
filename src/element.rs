//! A minimal owned tree of elements standing in for whatever DOM the caller
//! already has. Callers adapt their parsed document into [`Element`] values;
//! the reader only navigates them.

use core::hash::BuildHasherDefault;
use std::collections::HashMap;

use seahash::SeaHasher;
use serde::{Deserialize, Serialize};

use crate::error::{ReadError, Result};

pub type AttributeHasher = BuildHasherDefault<SeaHasher>;

// ------------- Element -------------
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    name: String,
    #[serde(default)]
    attributes: Vec<(String, String)>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
    /// The first value of the named attribute, if any.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }
    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }
    pub fn children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter()
    }
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }
}

// ------------- AttributeBag -------------
/// The attributes of one element keyed by name. Built once per item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeBag {
    values: HashMap<String, String, AttributeHasher>,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn from_element(element: &Element) -> Self {
        let mut bag = Self::new();
        for (name, value) in element.attributes() {
            bag.insert(name, value);
        }
        bag
    }
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
    /// Like [`get`](Self::get), but an empty value counts as absent.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }
    pub fn require(&self, name: &'static str) -> Result<&str> {
        self.get(name).ok_or(ReadError::MalformedRequiredField {
            field: name,
            value: None,
        })
    }
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
