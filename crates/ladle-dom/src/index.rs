//! Lookup indices by tag name, `id` attribute and class token.
//!
//! A [`ScopeIndex`] belongs to one owner (a node or a [`Document`]) and is
//! parameterized by the scan root passed in on each query. Each of its three
//! maps starts [`IndexStatus::Unbuilt`] and is filled by a single pre-order
//! walk of the scan root's subtree the first time it is queried. From then on
//! it is [`IndexStatus::Built`] and answers from cache, even if the tree has
//! changed since; [`ScopeIndex::clear`] is the only way back to `Unbuilt`.
//!
//! The scan root itself takes part in the walk, so a node's own tag, id and
//! classes appear in its own index.
//!
//! [`Document`]: crate::Document

use std::cell::OnceCell;
use std::collections::HashMap;

use strum_macros::{Display, EnumIter};

use crate::{DomTree, ElementData, NodeId, NodeType};

/// Tag name to every matching element, in document order.
pub type TagIndex = HashMap<String, Vec<NodeId>>;

/// `id` value to the first element carrying it, in document order.
pub type IdIndex = HashMap<String, NodeId>;

/// Class token to every element whose class list contains it, in document order.
pub type ClassIndex = HashMap<String, Vec<NodeId>>;

/// The three lookups an owner can cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum IndexKind {
    /// Tag name lookup.
    Tag,
    /// `id` attribute lookup.
    Id,
    /// Class token lookup.
    Class,
}

/// Cache state of one index kind for one owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IndexStatus {
    /// Not queried yet; the next query scans the subtree.
    Unbuilt,
    /// Scanned once; queries are answered from the snapshot.
    Built,
}

impl<T> From<&OnceCell<T>> for IndexStatus {
    fn from(cell: &OnceCell<T>) -> Self {
        if cell.get().is_some() {
            Self::Built
        } else {
            Self::Unbuilt
        }
    }
}

/// Lazily built tag, id and class maps for one owner.
#[derive(Debug, Clone, Default)]
pub struct ScopeIndex {
    tags: OnceCell<TagIndex>,
    ids: OnceCell<IdIndex>,
    classes: OnceCell<ClassIndex>,
}

impl ScopeIndex {
    /// An owner's index before any query: every kind unbuilt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache state of `kind`.
    #[must_use]
    pub fn status(&self, kind: IndexKind) -> IndexStatus {
        match kind {
            IndexKind::Tag => IndexStatus::from(&self.tags),
            IndexKind::Id => IndexStatus::from(&self.ids),
            IndexKind::Class => IndexStatus::from(&self.classes),
        }
    }

    /// Reset every kind to [`IndexStatus::Unbuilt`].
    pub fn clear(&mut self) {
        let _ = self.tags.take();
        let _ = self.ids.take();
        let _ = self.classes.take();
    }

    /// Elements below (and including) `scan_root` with tag `name`.
    #[must_use]
    pub fn get_by_tag(&self, tree: &DomTree, scan_root: NodeId, name: &str) -> Option<&[NodeId]> {
        self.tags
            .get_or_init(|| build_tag_index(tree, scan_root))
            .get(name)
            .map(Vec::as_slice)
    }

    /// First element below (and including) `scan_root` with `id == name`.
    #[must_use]
    pub fn get_by_id(&self, tree: &DomTree, scan_root: NodeId, name: &str) -> Option<NodeId> {
        self.ids
            .get_or_init(|| build_id_index(tree, scan_root))
            .get(name)
            .copied()
    }

    /// Elements below (and including) `scan_root` carrying class token `name`.
    #[must_use]
    pub fn get_by_class_name(
        &self,
        tree: &DomTree,
        scan_root: NodeId,
        name: &str,
    ) -> Option<&[NodeId]> {
        self.classes
            .get_or_init(|| build_class_index(tree, scan_root))
            .get(name)
            .map(Vec::as_slice)
    }
}

/// Walk `scan_root`'s subtree once, collecting every element by tag name.
#[must_use]
pub fn build_tag_index(tree: &DomTree, scan_root: NodeId) -> TagIndex {
    let mut index = TagIndex::new();
    for (id, element) in elements(tree, scan_root) {
        index.entry(element.tag_name.clone()).or_default().push(id);
    }
    index
}

/// Walk `scan_root`'s subtree once, keeping the first element for each
/// non-empty `id` value.
#[must_use]
pub fn build_id_index(tree: &DomTree, scan_root: NodeId) -> IdIndex {
    let mut index = IdIndex::new();
    for (id, element) in elements(tree, scan_root) {
        if let Some(value) = element.id() {
            let _ = index.entry(value.to_string()).or_insert(id);
        }
    }
    index
}

/// Walk `scan_root`'s subtree once, filing each element under each distinct
/// token of its class attribute.
#[must_use]
pub fn build_class_index(tree: &DomTree, scan_root: NodeId) -> ClassIndex {
    let mut index = ClassIndex::new();
    for (id, element) in elements(tree, scan_root) {
        for class in element.classes() {
            index.entry(class.to_string()).or_default().push(id);
        }
    }
    index
}

fn elements(
    tree: &DomTree,
    scan_root: NodeId,
) -> impl Iterator<Item = (NodeId, &ElementData)> {
    tree.descendants(scan_root)
        .filter_map(move |id| match tree.get(id).map(|node| &node.node_type) {
            Some(NodeType::Element(data)) => Some((id, data)),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let div = tree.alloc_element(ElementData::new("div").with_attribute("class", "box"));
        tree.append_child(NodeId::ROOT, div);
        let first = tree.alloc_element(
            ElementData::new("p")
                .with_attribute("id", "dup")
                .with_attribute("class", "x y x"),
        );
        tree.append_child(div, first);
        let text = tree.alloc_text("hello");
        tree.append_child(first, text);
        let second = tree.alloc_element(
            ElementData::new("p")
                .with_attribute("id", "dup")
                .with_attribute("class", "x"),
        );
        tree.append_child(div, second);
        (tree, div, first, second)
    }

    #[test]
    fn every_kind_starts_unbuilt() {
        let index = ScopeIndex::new();
        for kind in IndexKind::iter() {
            assert_eq!(index.status(kind), IndexStatus::Unbuilt);
        }
    }

    #[test]
    fn only_the_queried_kind_is_built() {
        let (tree, div, ..) = sample();
        let index = ScopeIndex::new();
        let _ = index.get_by_tag(&tree, div, "p");
        assert_eq!(index.status(IndexKind::Tag), IndexStatus::Built);
        assert_eq!(index.status(IndexKind::Id), IndexStatus::Unbuilt);
        assert_eq!(index.status(IndexKind::Class), IndexStatus::Unbuilt);
    }

    #[test]
    fn tag_index_includes_scan_root() {
        let (tree, div, first, second) = sample();
        let tags = build_tag_index(&tree, div);
        assert_eq!(tags["div"], vec![div]);
        assert_eq!(tags["p"], vec![first, second]);
        assert!(!tags.contains_key(crate::DOCUMENT_ROOT_TAG));
    }

    #[test]
    fn duplicate_ids_resolve_to_first_in_document_order() {
        let (tree, div, first, _) = sample();
        assert_eq!(build_id_index(&tree, div).get("dup"), Some(&first));
    }

    #[test]
    fn repeated_class_token_indexes_node_once() {
        let (tree, div, first, second) = sample();
        let classes = build_class_index(&tree, div);
        assert_eq!(classes["x"], vec![first, second]);
        assert_eq!(classes["y"], vec![first]);
        assert_eq!(classes["box"], vec![div]);
    }

    #[test]
    fn clear_returns_to_unbuilt() {
        let (tree, div, ..) = sample();
        let mut index = ScopeIndex::new();
        let _ = index.get_by_id(&tree, div, "dup");
        assert_eq!(index.status(IndexKind::Id), IndexStatus::Built);
        index.clear();
        assert_eq!(index.status(IndexKind::Id), IndexStatus::Unbuilt);
    }

    #[test]
    fn kinds_display_lowercase() {
        assert_eq!(IndexKind::Class.to_string(), "class");
        assert_eq!(IndexStatus::Built.to_string(), "Built");
    }
}
