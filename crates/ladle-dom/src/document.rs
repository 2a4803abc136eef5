//! The parsed document: a tree, its title, and whole-tree queries.

use crate::index::{IndexKind, IndexStatus, ScopeIndex};
use crate::query::Query;
use crate::{DomTree, NodeId};

/// Owner of a parsed tree and the title derived while parsing it.
///
/// Queries here are scoped to the whole tree (the synthetic root included)
/// and use their own index cache, separate from the per-node caches of
/// [`DomTree`]. Querying the document never builds or reuses a node index and
/// vice versa.
///
/// Like the node caches, the document's index is a snapshot taken on first
/// query. After changing the tree through [`Document::tree_mut`], call
/// [`Document::clear_indices`] to have later queries see the change.
#[derive(Debug, Clone)]
pub struct Document {
    tree: DomTree,
    title: Option<String>,
    index: ScopeIndex,
}

impl Document {
    /// Wrap a tree and its title.
    #[must_use]
    pub fn new(tree: DomTree, title: Option<String>) -> Self {
        Self {
            tree,
            title,
            index: ScopeIndex::new(),
        }
    }

    /// The synthetic root every parsed tree hangs from.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The text of the first `title` element, if there was one with text.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The underlying tree, for node-scoped queries and navigation.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Mutable access to the tree. Already built indices are not refreshed.
    pub const fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    /// Give up the document, keeping only its tree.
    #[must_use]
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// All elements with tag `name`, in document order.
    #[must_use]
    pub fn get_by_tag(&self, name: &str) -> Option<&[NodeId]> {
        self.index.get_by_tag(&self.tree, NodeId::ROOT, name)
    }

    /// The first element in document order whose `id` is `name`.
    #[must_use]
    pub fn get_by_id(&self, name: &str) -> Option<NodeId> {
        self.index.get_by_id(&self.tree, NodeId::ROOT, name)
    }

    /// All elements whose class list contains `name`, in document order.
    #[must_use]
    pub fn get_by_class_name(&self, name: &str) -> Option<&[NodeId]> {
        self.index.get_by_class_name(&self.tree, NodeId::ROOT, name)
    }

    /// Run a parsed [`Query`] against the document-scoped indices.
    ///
    /// No match yields an empty vector.
    #[must_use]
    pub fn select(&self, query: &Query) -> Vec<NodeId> {
        match query {
            Query::Tag(name) => self.get_by_tag(name).map(<[NodeId]>::to_vec),
            Query::Id(name) => self.get_by_id(name).map(|id| vec![id]),
            Query::Class(name) => self.get_by_class_name(name).map(<[NodeId]>::to_vec),
        }
        .unwrap_or_default()
    }

    /// Whether the document-scoped `kind` index has been built yet.
    #[must_use]
    pub fn index_status(&self, kind: IndexKind) -> IndexStatus {
        self.index.status(kind)
    }

    /// Drop the document index and every node index.
    pub fn clear_indices(&mut self) {
        self.index.clear();
        self.tree.clear_indices();
    }

    /// Render the root's children one after another, so the synthetic root
    /// itself never shows up in the output.
    #[must_use]
    pub fn render(&self) -> String {
        self.tree
            .children(NodeId::ROOT)
            .iter()
            .map(|&child| self.tree.render(child, 0))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DomTree::new(), None)
    }
}
