// ordered maps keep detail and property listings deterministic
use std::collections::BTreeMap;

// used for the always-present and optional timestamps
use chrono::{DateTime, Local};
use serde::Serialize;

// our own stuff that we need
use crate::catalog::TypeDescriptor;
use crate::datatype::{CollectionState, ContentState, DetailValue, Permission};

// ------------- Identity -------------
pub type NodeId = i32;

/// Position of a node in the journal's arena. Only meaningful for the journal
/// that handed it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Name of the detail holding a node's version key.
pub const VERSION_KEY_DETAIL: &str = "VersionKey";

// ------------- Parent reference -------------
/// The parent a node declared while being decoded. The journal turns this
/// into an actual link, either on report or later when the parent shows up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParentRef {
    pub id: Option<NodeId>,
    pub version_key: Option<String>,
}

impl ParentRef {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.version_key.is_none()
    }
}

// ------------- Section fields -------------
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail {
    pub value: DetailValue,
    pub meta: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attachment {
    pub name: String,
    pub url: Option<String>,
    pub mime_type: Option<String>,
    pub encoding: Option<String>,
    pub payload: Option<String>,
}

/// Everything the section decoders populate.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Fields {
    pub details: BTreeMap<String, Detail>,
    pub detail_collections: BTreeMap<String, Vec<DetailValue>>,
    pub authorized_roles: Vec<String>,
    pub properties: BTreeMap<String, DetailValue>,
    pub attachments: Vec<Attachment>,
}

// ------------- ContentNode -------------
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentNode {
    pub(crate) descriptor: TypeDescriptor,
    pub id: NodeId,
    pub name: Option<String>,
    pub title: String,
    pub sort_order: i32,
    pub visible: bool,
    pub created: DateTime<Local>,
    pub updated: DateTime<Local>,
    pub published: Option<DateTime<Local>>,
    pub expires: Option<DateTime<Local>>,
    pub saved_by: Option<String>,
    pub zone_name: Option<String>,
    pub template_key: Option<String>,
    pub translation_key: Option<i32>,
    pub ancestral_trail: Option<String>,
    pub altered_permissions: Option<Permission>,
    pub child_state: Option<CollectionState>,
    pub version_index: Option<i32>,
    /// The master version this node is a version of. Not resolved here.
    pub version_of: Option<NodeId>,
    pub state: ContentState,
    pub parent_ref: ParentRef,
    pub fields: Fields,
    // links owned by the journal
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) children: Vec<NodeIndex>,
}

impl ContentNode {
    /// An empty node of the given type. Everything but the type is defaulted
    /// and expected to be filled in by the decoders.
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            id: 0,
            name: None,
            title: String::new(),
            sort_order: 0,
            visible: false,
            created: DateTime::<Local>::default(),
            updated: DateTime::<Local>::default(),
            published: None,
            expires: None,
            saved_by: None,
            zone_name: None,
            template_key: None,
            translation_key: None,
            ancestral_trail: None,
            altered_permissions: None,
            child_state: None,
            version_index: None,
            version_of: None,
            state: ContentState::None,
            parent_ref: ParentRef::default(),
            fields: Fields::default(),
            parent: None,
            children: Vec::new(),
        }
    }
    pub fn descriptor(&self) -> &TypeDescriptor {
        &self.descriptor
    }
    pub fn discriminator(&self) -> &str {
        self.descriptor.discriminator()
    }
    /// The key other nodes use in `parentVersionKey` to point at this one.
    pub fn version_key(&self) -> Option<&str> {
        self.fields
            .details
            .get(VERSION_KEY_DETAIL)
            .and_then(|d| d.value.as_str())
            .filter(|k| !k.is_empty())
    }
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }
    pub fn detail(&self, name: &str) -> Option<&DetailValue> {
        self.fields.details.get(name).map(|d| &d.value)
    }
}
