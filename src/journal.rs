// the indexes use the same fast hasher throughout
use core::hash::{BuildHasher, BuildHasherDefault};
use std::collections::hash_map::{Entry, RandomState};
use std::collections::HashMap;
use std::hash::Hash;

use seahash::SeaHasher;
use tracing::{debug, trace, warn};

use crate::construct::{ContentNode, NodeId, NodeIndex};
use crate::element::AttributeBag;
use crate::error::{ReadError, RecordedError, Result};

pub type IdHasher = BuildHasherDefault<SeaHasher>;
pub type KeyHasher = BuildHasherDefault<SeaHasher>;

// ------------- Pending relations -------------
/// Children waiting for a parent, keyed by whatever identifies the parent.
/// Values keep the order they were registered in.
#[derive(Debug)]
pub struct Pending<K, V, H = RandomState> {
    index: HashMap<K, Vec<V>, H>,
}
impl<K: Eq + Hash, V, H: BuildHasher + Default> Pending<K, V, H> {
    pub fn new() -> Self {
        Self {
            index: HashMap::<K, Vec<V>, H>::default(),
        }
    }
    pub fn insert(&mut self, key: K, value: V) {
        self.index.entry(key).or_default().push(value);
    }
    /// Removes and returns everything waiting on `key`.
    pub fn take(&mut self, key: &K) -> Vec<V> {
        self.index.remove(key).unwrap_or_default()
    }
    pub fn len(&self) -> usize {
        self.index.values().map(Vec::len).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
    pub fn clear(&mut self) {
        self.index.clear();
    }
}
impl<K: Eq + Hash, V, H: BuildHasher + Default> Default for Pending<K, V, H> {
    fn default() -> Self {
        Self::new()
    }
}

// ------------- ReadingJournal -------------
/// Everything one read produces: the nodes in the order they were read, the
/// indexes used to wire them together, relations still waiting for their
/// parent, and the errors that were recorded rather than raised.
#[derive(Debug, Default)]
pub struct ReadingJournal {
    nodes: Vec<ContentNode>,
    by_id: HashMap<NodeId, NodeIndex, IdHasher>,
    by_version_key: HashMap<String, NodeIndex, KeyHasher>,
    pending_by_id: Pending<NodeId, NodeIndex, IdHasher>,
    pending_by_version_key: Pending<String, NodeIndex, KeyHasher>,
    errors: Vec<RecordedError>,
}

impl ReadingJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a fully decoded node: indexes it, wires its
    /// declared parent (now or later), and attaches every child that was
    /// waiting for it.
    pub fn report(&mut self, node: ContentNode) -> Result<NodeIndex> {
        let index = NodeIndex(self.nodes.len());
        match self.by_id.entry(node.id) {
            Entry::Occupied(_) => return Err(ReadError::DuplicateId(node.id)),
            Entry::Vacant(e) => {
                e.insert(index);
            }
        }
        if let Some(key) = node.version_key() {
            self.by_version_key.insert(key.to_owned(), index);
        }
        let parent_ref = node.parent_ref.clone();
        let id = node.id;
        let version_key = node.version_key().map(str::to_owned);
        self.nodes.push(node);
        trace!(id, index = index.0, "item reported");

        // its own parent, id first so a resolved version key wins
        if let Some(parent_id) = parent_ref.id {
            match self.by_id.get(&parent_id) {
                Some(&parent) => self.attach(index, parent),
                None => self.pending_by_id.insert(parent_id, index),
            }
        }
        if let Some(key) = parent_ref.version_key {
            match self.by_version_key.get(&key) {
                Some(&parent) => self.attach(index, parent),
                None => self.pending_by_version_key.insert(key, index),
            }
        }

        // children that arrived before it
        for child in self.pending_by_id.take(&id) {
            self.attach(child, index);
        }
        if let Some(key) = version_key {
            for child in self.pending_by_version_key.take(&key) {
                self.attach(child, index);
            }
        }
        Ok(index)
    }

    /// Makes `parent` the parent of `child`, moving it out of any previous
    /// parent's children.
    pub fn attach(&mut self, child: NodeIndex, parent: NodeIndex) {
        if child == parent {
            warn!(id = self.nodes[child.0].id, "ignoring item declared as its own parent");
            return;
        }
        if let Some(previous) = self.nodes[child.0].parent {
            if previous == parent {
                return;
            }
            self.nodes[previous.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        trace!(
            child = self.nodes[child.0].id,
            parent = self.nodes[parent.0].id,
            "attached"
        );
    }

    pub fn error(&mut self, error: ReadError, attributes: AttributeBag) {
        self.errors.push(RecordedError::new(error, attributes));
    }

    /// Drops relations whose parent never appeared. Those children stay
    /// unattached.
    pub fn close(&mut self) {
        let unresolved = self.pending_count();
        if unresolved > 0 {
            debug!(unresolved, "dropping unresolved parent relations");
        }
        self.pending_by_id.clear();
        self.pending_by_version_key.clear();
    }

    // ------------- Queries -------------
    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }
    pub fn node(&self, index: NodeIndex) -> &ContentNode {
        &self.nodes[index.0]
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.by_id.get(&id).copied()
    }
    pub fn find(&self, id: NodeId) -> Option<&ContentNode> {
        self.index_of(id).map(|i| self.node(i))
    }
    pub fn find_by_version_key(&self, key: &str) -> Option<&ContentNode> {
        self.by_version_key.get(key).map(|&i| self.node(i))
    }
    /// The first item read, which in an exported document is the top of the
    /// exported branch.
    pub fn root(&self) -> Option<&ContentNode> {
        self.nodes.first()
    }
    /// Items that ended up without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &ContentNode> {
        self.nodes.iter().filter(|n| n.parent.is_none())
    }
    pub fn parent(&self, node: &ContentNode) -> Option<&ContentNode> {
        node.parent.map(|i| self.node(i))
    }
    pub fn children<'a>(&'a self, node: &'a ContentNode) -> impl Iterator<Item = &'a ContentNode> {
        node.children.iter().map(|&i| self.node(i))
    }
    pub fn pending_count(&self) -> usize {
        self.pending_by_id.len() + self.pending_by_version_key.len()
    }
    pub fn errors(&self) -> &[RecordedError] {
        &self.errors
    }
    pub fn into_parts(self) -> (Vec<ContentNode>, Vec<RecordedError>) {
        (self.nodes, self.errors)
    }
}
