//! Element tree for the Ladle HTML parser.
//!
//! This crate provides an arena-based tree of elements and text leaves, the
//! lazily built lookup indices used to answer tag, id and class queries, and
//! the [`Document`] that ties a parsed tree to its title.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Index
//! entries are plain [`NodeId`]s, so an index never owns or copies nodes.
//!
//! Every traversal in this crate (indexing, rendering, descendant iteration)
//! walks an explicit work-list rather than the call stack, so arbitrarily deep
//! markup cannot overflow it.

use std::collections::HashMap;

use index::{IndexKind, IndexStatus, ScopeIndex};

/// Whole-tree owner with title and document-scoped queries.
pub mod document;
/// Lazily built tag, id and class indices.
pub mod index;
/// Simple selector strings (`tag`, `#id`, `.class`).
pub mod query;
/// Indented markup reconstruction.
pub mod render;
/// `serde` view of a subtree.
pub mod serialize;

pub use document::Document;
pub use query::{Query, QueryError};
pub use serialize::SerializeNode;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// Tag name of the synthetic element every tree is rooted at.
///
/// The tokenizer never produces tag names starting with `#`, so markup can
/// neither open nor close this element.
pub const DOCUMENT_ROOT_TAG: &str = "#document";

/// A type-safe index into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The synthetic root element is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A node in the arena: an element or a text leaf.
#[derive(Debug, Clone)]
pub struct Node {
    /// What this node is.
    pub node_type: NodeType,

    /// The element this node was appended to, `None` for the root and for
    /// nodes that were allocated but never attached.
    pub parent: Option<NodeId>,

    /// Children in document order.
    pub children: Vec<NodeId>,

    /// Indices scoped to this node's subtree, built on first query.
    pub(crate) index: ScopeIndex,
}

/// The two kinds of node a parsed tree contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// An element with a tag name and attributes.
    Element(ElementData),
    /// A run of character data.
    Text(String),
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercased tag name as produced by the tokenizer.
    pub tag_name: String,
    /// Attribute list. Order is irrelevant.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create an element with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: AttributesMap::new(),
        }
    }

    /// Set an attribute, replacing any previous value.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the class attribute from an already tokenized class list.
    ///
    /// The tokens are stored space-separated, so [`ElementData::classes`]
    /// yields them back unchanged (minus duplicates).
    #[must_use]
    pub fn with_class_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = tokens
            .into_iter()
            .map(|token| token.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let _ = self.attrs.insert("class".to_string(), joined);
        self
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns the element's id attribute value if present and non-empty.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    /// Returns the distinct class tokens of the class attribute, in order of
    /// first appearance.
    ///
    /// The attribute is split on ASCII whitespace.
    #[must_use]
    pub fn classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = Vec::new();
        if let Some(classlist) = self.attr("class") {
            for token in classlist.split_ascii_whitespace() {
                if !classes.contains(&token) {
                    classes.push(token);
                }
            }
        }
        classes
    }
}

/// Arena-based tree with O(1) node access.
///
/// All nodes live in one vector and refer to each other by [`NodeId`]. The
/// synthetic root element is always at [`NodeId::ROOT`].
///
/// # Index caching
///
/// Every node carries its own set of lazily built indices (see
/// [`DomTree::get_by_tag`]). They are a snapshot: once built they are served
/// from cache and are NOT updated by [`DomTree::append_child`] or any other
/// mutation. Call [`DomTree::clear_indices`] after mutating a tree that has
/// already been queried.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new tree containing just the synthetic root element.
    #[must_use]
    pub fn new() -> Self {
        let mut tree = Self { nodes: Vec::new() };
        let _ = tree.alloc(NodeType::Element(ElementData::new(DOCUMENT_ROOT_TAG)));
        tree
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the arena (attached or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (never true: the root always exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            index: ScopeIndex::new(),
        });
        id
    }

    /// Allocate a detached element node.
    pub fn alloc_element(&mut self, data: ElementData) -> NodeId {
        self.alloc(NodeType::Element(data))
    }

    /// Allocate a detached text node.
    pub fn alloc_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeType::Text(text.into()))
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// Indices already built for `parent` or its ancestors are not updated.
    ///
    /// # Panics
    ///
    /// Panics if either ID does not belong to this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Text(_) => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            NodeType::Element(_) => None,
        })
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|e| e.tag_name.as_str())
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over `id` and everything below it in document order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_> {
        let pending = if self.get(id).is_some() {
            vec![id]
        } else {
            Vec::new()
        };
        DescendantIterator {
            tree: self,
            pending,
        }
    }

    /// All elements with tag `name` in the subtree of `scope`, `scope` itself
    /// included, in document order. `None` if there are none.
    ///
    /// The first call builds the tag index for `scope`; later calls are
    /// answered from that cache.
    #[must_use]
    pub fn get_by_tag(&self, scope: NodeId, name: &str) -> Option<&[NodeId]> {
        self.get(scope)?.index.get_by_tag(self, scope, name)
    }

    /// The first element in document order within the subtree of `scope`
    /// whose `id` attribute equals `name`.
    ///
    /// The first call builds the id index for `scope`.
    #[must_use]
    pub fn get_by_id(&self, scope: NodeId, name: &str) -> Option<NodeId> {
        self.get(scope)?.index.get_by_id(self, scope, name)
    }

    /// All elements within the subtree of `scope` whose class list contains
    /// the token `name`, in document order.
    ///
    /// The first call builds the class index for `scope`.
    #[must_use]
    pub fn get_by_class_name(&self, scope: NodeId, name: &str) -> Option<&[NodeId]> {
        self.get(scope)?.index.get_by_class_name(self, scope, name)
    }

    /// Whether the `kind` index for `scope` has been built yet.
    #[must_use]
    pub fn index_status(&self, scope: NodeId, kind: IndexKind) -> IndexStatus {
        self.get(scope)
            .map_or(IndexStatus::Unbuilt, |node| node.index.status(kind))
    }

    /// Drop every node-scoped index so the next query rescans the tree.
    pub fn clear_indices(&mut self) {
        for node in &mut self.nodes {
            node.index.clear();
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree, driven by an explicit stack.
pub struct DescendantIterator<'a> {
    tree: &'a DomTree,
    pending: Vec<NodeId>,
}

impl Iterator for DescendantIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.pending.pop()?;
        // Reversed so the first child is popped next.
        self.pending
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
