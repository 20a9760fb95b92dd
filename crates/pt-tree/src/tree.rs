//! Path tree of site resources.
//!
//! # Architecture
//!
//! Nodes live in an arena owned by [`PathTree`] and are addressed by
//! [`NodeId`]. Each node stores its parent as a `NodeId` and its children as
//! an ordered list plus a name index, so:
//! - child lookup by segment name is O(1)
//! - `add` and lookups are O(d) where d is the path depth
//! - upward traversal needs no reference counting
//!
//! The root is stored outside the arena and can never be pruned. Freed slots
//! are reused with a bumped generation, so a [`NodeId`] of a removed node
//! never resolves again.

use std::collections::HashMap;

use crate::formats::{FormatSet, FormatVariant};
use crate::token::{DELIMITER, TokenizedPath};
use crate::traverse::{Ancestors, Resources};

/// Handle to a node of a [`PathTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    const ROOT: Self = Self {
        index: usize::MAX,
        generation: 0,
    };
}

/// Outcome of [`PathTree::remove`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Removal {
    /// The node was a leaf and has been deleted from its parent.
    Pruned,
    /// The node has children (or is the root); only its formats were cleared.
    Cleared,
    /// The id does not refer to a live node.
    Missing,
}

#[derive(Debug)]
pub(crate) struct NodeData<A> {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    child_index: HashMap<String, NodeId>,
    pub(crate) formats: FormatSet<A>,
}

impl<A> NodeData<A> {
    fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            child_index: HashMap::new(),
            formats: FormatSet::new(),
        }
    }
}

#[derive(Debug)]
struct Slot<A> {
    generation: u32,
    data: Option<NodeData<A>>,
}

/// Hierarchy of resources keyed by path segments.
///
/// `A` is the opaque asset type; the tree stores and returns it but never
/// looks inside.
///
/// ```
/// use pt_tree::PathTree;
///
/// let mut tree = PathTree::new();
/// tree.add("/blog/posts/hello.html", "body");
///
/// let resource = tree.get_resource("/blog/posts/hello.html").unwrap();
/// assert_eq!(*resource.asset(), "body");
/// assert_eq!(resource.request_path(), "/blog/posts/hello.html");
/// ```
#[derive(Debug)]
pub struct PathTree<A> {
    root: NodeData<A>,
    slots: Vec<Slot<A>>,
    free: Vec<usize>,
    live: usize,
}

impl<A> Default for PathTree<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> PathTree<A> {
    /// Create a tree holding only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: NodeData::new(String::new(), None),
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }

    /// Id of the root node.
    #[must_use]
    pub fn root_id(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> Node<'_, A> {
        Node {
            tree: self,
            id: NodeId::ROOT,
            data: &self.root,
        }
    }

    /// Number of live nodes, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.live + 1
    }

    /// Resolve an id to a node handle.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<Node<'_, A>> {
        self.data(id).map(|data| Node {
            tree: self,
            id,
            data,
        })
    }

    pub(crate) fn data(&self, id: NodeId) -> Option<&NodeData<A>> {
        if id == NodeId::ROOT {
            return Some(&self.root);
        }
        let slot = self.slots.get(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.data.as_ref()
    }

    fn data_mut(&mut self, id: NodeId) -> Option<&mut NodeData<A>> {
        if id == NodeId::ROOT {
            return Some(&mut self.root);
        }
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.data.as_mut()
    }

    fn alloc(&mut self, data: NodeData<A>) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.data = Some(data);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            data: Some(data),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.index)
            && slot.generation == id.generation
            && slot.data.take().is_some()
        {
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index);
            self.live -= 1;
        }
    }

    /// Return the child of `parent` named `name`, creating it if missing.
    ///
    /// Returns `None` if `parent` is not a live node, or if `name` is empty
    /// or contains the delimiter, since such a node could never be reached
    /// by a path lookup.
    pub fn child_or_insert(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        if name.is_empty() || name.contains(DELIMITER) {
            return None;
        }
        self.insert_child(parent, name)
    }

    /// Get-or-create without name checks. Path descent uses this for the
    /// empty name of a dotfile's node.
    fn insert_child(&mut self, parent: NodeId, name: &str) -> Option<NodeId> {
        if let Some(&existing) = self.data(parent)?.child_index.get(name) {
            return Some(existing);
        }

        let id = self.alloc(NodeData::new(name.to_owned(), Some(parent)));
        let parent_data = self.data_mut(parent)?;
        parent_data.children.push(id);
        parent_data.child_index.insert(name.to_owned(), id);

        tracing::debug!(name, "Created node");
        Some(id)
    }

    /// Register `asset` at `path`, creating intermediate nodes as needed.
    ///
    /// Replaces any asset previously stored under the same path and
    /// extension. Returns the id of the node holding the asset.
    pub fn add(&mut self, path: &str, asset: A) -> NodeId {
        self.add_tokens(NodeId::ROOT, &TokenizedPath::parse(path), asset)
            .unwrap_or(NodeId::ROOT)
    }

    /// Like [`add`](Self::add), descending from `start` instead of the root.
    ///
    /// Returns `None` (and stores nothing) if `start` is not a live node.
    pub fn add_at(&mut self, start: NodeId, path: &str, asset: A) -> Option<NodeId> {
        self.add_tokens(start, &TokenizedPath::parse(path), asset)
    }

    /// Register `asset` using a pre-tokenized path.
    pub fn add_tokens(
        &mut self,
        start: NodeId,
        tokens: &TokenizedPath<'_>,
        asset: A,
    ) -> Option<NodeId> {
        self.data(start)?;

        let mut current = start;
        for segment in tokens.descent() {
            current = self.insert_child(current, segment)?;
        }

        let extension = tokens.extension();
        let data = self.data_mut(current)?;
        if data.formats.add(asset, extension).is_some() {
            tracing::debug!(node = %data.name, extension, "Replaced format variant");
        }

        Some(current)
    }

    /// Find the node for `path`. The extension is ignored.
    ///
    /// Never creates nodes; returns `None` if any segment is missing.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<Node<'_, A>> {
        self.get_at(NodeId::ROOT, path)
    }

    /// Like [`get`](Self::get), relative to `start`.
    #[must_use]
    pub fn get_at(&self, start: NodeId, path: &str) -> Option<Node<'_, A>> {
        self.walk(start, TokenizedPath::parse(path).descent())
    }

    /// Walk pre-split segments from `start`. Empty segments are skipped.
    #[must_use]
    pub fn get_segments(&self, start: NodeId, segments: &[&str]) -> Option<Node<'_, A>> {
        self.walk(start, segments.iter().copied().filter(|s| !s.is_empty()))
    }

    fn walk<'s>(
        &self,
        start: NodeId,
        segments: impl Iterator<Item = &'s str>,
    ) -> Option<Node<'_, A>> {
        let mut current = start;
        let mut data = self.data(start)?;
        for segment in segments {
            current = *data.child_index.get(segment)?;
            data = self.data(current)?;
        }

        Some(Node {
            tree: self,
            id: current,
            data,
        })
    }

    /// Find the format variant for `path`, matching its extension exactly.
    #[must_use]
    pub fn get_resource(&self, path: &str) -> Option<Resource<'_, A>> {
        self.get_resource_at(NodeId::ROOT, path)
    }

    /// Like [`get_resource`](Self::get_resource), relative to `start`.
    #[must_use]
    pub fn get_resource_at(&self, start: NodeId, path: &str) -> Option<Resource<'_, A>> {
        self.get_resource_tokens(start, &TokenizedPath::parse(path))
    }

    /// Find a format variant using a pre-tokenized path.
    #[must_use]
    pub fn get_resource_tokens(
        &self,
        start: NodeId,
        tokens: &TokenizedPath<'_>,
    ) -> Option<Resource<'_, A>> {
        let node = self.walk(start, tokens.descent())?;
        node.resource(tokens.extension())
    }

    /// Remove a node.
    ///
    /// A leaf is deleted from its parent. A node with children keeps its
    /// place and only loses its formats. The root is never deleted. Parents
    /// left empty by a prune are not removed.
    pub fn remove(&mut self, id: NodeId) -> Removal {
        let Some(data) = self.data(id) else {
            return Removal::Missing;
        };

        match data.parent {
            Some(parent) if data.children.is_empty() => {
                let name = data.name.clone();
                self.delete_child(parent, &name);
                tracing::debug!(name = %name, "Pruned leaf node");
                Removal::Pruned
            }
            _ => {
                if let Some(data) = self.data_mut(id) {
                    data.formats.clear();
                    tracing::debug!(name = %data.name, "Cleared node formats");
                }
                Removal::Cleared
            }
        }
    }

    /// Resolve `path` with [`get`](Self::get) and [`remove`](Self::remove) it.
    pub fn remove_path(&mut self, path: &str) -> Removal {
        match self.get(path).map(|node| node.id()) {
            Some(id) => self.remove(id),
            None => Removal::Missing,
        }
    }

    /// Drop the child named `name` from `parent` and free its slot.
    fn delete_child(&mut self, parent: NodeId, name: &str) {
        let Some(parent_data) = self.data_mut(parent) else {
            return;
        };
        let Some(child) = parent_data.child_index.remove(name) else {
            return;
        };
        parent_data.children.retain(|&id| id != child);
        self.release(child);
    }
}

/// Borrowed view of one node.
pub struct Node<'a, A> {
    tree: &'a PathTree<A>,
    id: NodeId,
    data: &'a NodeData<A>,
}

impl<A> Clone for Node<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Node<'_, A> {}

impl<A> std::fmt::Debug for Node<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("path", &self.path())
            .finish_non_exhaustive()
    }
}

impl<A> PartialEq for Node<'_, A> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<A> Eq for Node<'_, A> {}

impl<'a, A> Node<'a, A> {
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Segment name; empty for the root.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.data.name
    }

    #[must_use]
    pub fn formats(&self) -> &'a FormatSet<A> {
        &self.data.formats
    }

    #[must_use]
    pub fn parent(&self) -> Option<Node<'a, A>> {
        self.tree.node(self.data.parent?)
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.data.parent.is_none()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.data.children.is_empty()
    }

    /// Direct children in insertion order.
    pub fn children(self) -> impl Iterator<Item = Node<'a, A>> + 'a {
        let tree = self.tree;
        self.data.children.iter().filter_map(move |&id| tree.node(id))
    }

    /// Direct child named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<Node<'a, A>> {
        self.tree.node(*self.data.child_index.get(name)?)
    }

    /// Parent's other children, in the parent's child order. Empty at the root.
    pub fn siblings(self) -> impl Iterator<Item = Node<'a, A>> + 'a {
        let id = self.id;
        self.parent()
            .into_iter()
            .flat_map(|parent| parent.children())
            .filter(move |sibling| sibling.id != id)
    }

    /// Ancestors, nearest first, ending with the root. Empty at the root.
    #[must_use]
    pub fn parents(&self) -> Ancestors<'a, A> {
        Ancestors::new(self.parent())
    }

    /// Lazy pre-order traversal of every format variant in this subtree.
    ///
    /// Yields this node's own variants first, then each child's subtree in
    /// child order. Call again to restart.
    #[must_use]
    pub fn resources(&self) -> Resources<'a, A> {
        Resources::new(*self)
    }

    /// Format variant of this node for `extension`.
    #[must_use]
    pub fn resource(&self, extension: &str) -> Option<Resource<'a, A>> {
        let variant = self.data.formats.ext(extension)?;
        Some(Resource {
            node: *self,
            variant,
        })
    }

    /// Site-relative path of this node, without extension (`"/"` for root).
    #[must_use]
    pub fn path(&self) -> String {
        let mut names: Vec<&str> = self
            .parents()
            .filter(|node| !node.is_root())
            .map(|node| node.name())
            .collect();
        names.reverse();
        if !self.is_root() {
            names.push(self.name());
        }

        let mut path = String::new();
        for name in names {
            path.push(DELIMITER);
            path.push_str(name);
        }
        if path.is_empty() {
            path.push(DELIMITER);
        }
        path
    }
}

/// A format variant together with the node that owns it.
pub struct Resource<'a, A> {
    node: Node<'a, A>,
    variant: &'a FormatVariant<A>,
}

impl<A> Clone for Resource<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Resource<'_, A> {}

impl<A> std::fmt::Debug for Resource<'_, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("request_path", &self.request_path())
            .finish_non_exhaustive()
    }
}

impl<'a, A> Resource<'a, A> {
    pub(crate) fn new(node: Node<'a, A>, variant: &'a FormatVariant<A>) -> Self {
        Self { node, variant }
    }

    #[must_use]
    pub fn node(&self) -> Node<'a, A> {
        self.node
    }

    #[must_use]
    pub fn variant(&self) -> &'a FormatVariant<A> {
        self.variant
    }

    #[must_use]
    pub fn asset(&self) -> &'a A {
        self.variant.asset()
    }

    #[must_use]
    pub fn extension(&self) -> &'a str {
        self.variant.extension()
    }

    /// Full request path: node path plus extension.
    ///
    /// Computed from the ancestor chain on every call.
    #[must_use]
    pub fn request_path(&self) -> String {
        let mut path = self.node.path();
        path.push_str(self.variant.extension());
        path
    }
}
