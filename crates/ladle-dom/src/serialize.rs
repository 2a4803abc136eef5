//! `serde` view of a subtree.
//!
//! Elements serialize as
//! `{"type": "element", "tag": ..., "attributes": {...}, "children": [...]}`
//! and text leaves as `{"type": "text", "content": ...}`. Attributes are
//! emitted sorted by name so output is stable.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{DomTree, NodeId, NodeType};

/// Borrowed, serializable view of the subtree rooted at one node.
#[derive(Debug, Clone, Copy)]
pub struct SerializeNode<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

struct SerializeChildren<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl DomTree {
    /// A [`Serialize`] view of the subtree at `id`.
    #[must_use]
    pub const fn serializable(&self, id: NodeId) -> SerializeNode<'_> {
        SerializeNode { tree: self, id }
    }
}

impl Serialize for SerializeNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(node) = self.tree.get(self.id) else {
            return serializer.serialize_none();
        };
        match &node.node_type {
            NodeType::Element(data) => {
                let attributes: BTreeMap<&str, &str> = data
                    .attrs
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("type", "element")?;
                map.serialize_entry("tag", &data.tag_name)?;
                map.serialize_entry("attributes", &attributes)?;
                map.serialize_entry(
                    "children",
                    &SerializeChildren {
                        tree: self.tree,
                        id: self.id,
                    },
                )?;
                map.end()
            }
            NodeType::Text(text) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "text")?;
                map.serialize_entry("content", text)?;
                map.end()
            }
        }
    }
}

impl Serialize for SerializeChildren<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let children = self.tree.children(self.id);
        let mut seq = serializer.serialize_seq(Some(children.len()))?;
        for &child in children {
            seq.serialize_element(&self.tree.serializable(child))?;
        }
        seq.end()
    }
}
