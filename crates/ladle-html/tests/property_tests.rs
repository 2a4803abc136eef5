//! Property tests over randomly generated, well-formed markup.

#![allow(clippy::needless_pass_by_value)]

use ladle_dom::{Document, NodeId, NodeType};
use ladle_html::{VOID_TAGS, parse_document};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

const TAGS: &[&str] = &[
    "div", "p", "span", "ul", "li", "section", "a", "object", "param", "br", "img", "hr",
    "input",
];
const ATTR_NAMES: &[&str] = &["id", "class", "href", "data-k", "hidden", "=eq"];
const ATTR_VALUES: &[&str] = &[
    "a",
    "b",
    "x1",
    "b c",
    "card wide",
    "",
    "say \"hi\"",
    "it's b",
    "a\"b'c",
];
const WORDS: &[&str] = &["alpha", "beta", "gamma 1", "x", "Lorem ipsum"];
const MAX_DEPTH: usize = 4;

/// A fragment of markup with known structure.
#[derive(Debug, Clone)]
enum Item {
    Element {
        tag: &'static str,
        attrs: Vec<(&'static str, &'static str)>,
        children: Vec<Item>,
    },
    Text(&'static str),
}

/// A sequence of top-level items.
#[derive(Debug, Clone)]
struct Markup(Vec<Item>);

fn pick(g: &mut Gen, options: &'static [&'static str]) -> &'static str {
    g.choose(options).copied().unwrap_or_default()
}

fn arbitrary_items(g: &mut Gen, depth: usize) -> Vec<Item> {
    if depth >= MAX_DEPTH {
        return Vec::new();
    }
    let count = usize::arbitrary(g) % 4;
    (0..count).map(|_| arbitrary_item(g, depth)).collect()
}

fn arbitrary_item(g: &mut Gen, depth: usize) -> Item {
    if u8::arbitrary(g) % 4 == 0 {
        return Item::Text(pick(g, WORDS));
    }
    let tag = pick(g, TAGS);
    let mut attrs: Vec<(&'static str, &'static str)> = Vec::new();
    for _ in 0..usize::arbitrary(g) % 3 {
        let name = pick(g, ATTR_NAMES);
        if attrs.iter().all(|(existing, _)| *existing != name) {
            attrs.push((name, pick(g, ATTR_VALUES)));
        }
    }
    let children = if VOID_TAGS.contains(&tag) {
        Vec::new()
    } else {
        arbitrary_items(g, depth + 1)
    };
    Item::Element {
        tag,
        attrs,
        children,
    }
}

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        Self(arbitrary_items(g, 0))
    }
}

impl Markup {
    fn to_html(&self) -> String {
        let mut out = String::new();
        write_items(&self.0, &mut out);
        out
    }

    /// Tags of every element in document order.
    fn tags(&self) -> Vec<&'static str> {
        let mut tags = Vec::new();
        let mut pending: Vec<&Item> = self.0.iter().rev().collect();
        while let Some(item) = pending.pop() {
            if let Item::Element { tag, children, .. } = item {
                tags.push(*tag);
                pending.extend(children.iter().rev());
            }
        }
        tags
    }

    /// Same shape as [`element_shape`], read off the generated items.
    fn shape(&self) -> Vec<(String, Vec<(String, String)>, usize)> {
        let mut shape = Vec::new();
        let mut pending: Vec<(&Item, usize)> = self.0.iter().rev().map(|item| (item, 1)).collect();
        while let Some((item, depth)) = pending.pop() {
            if let Item::Element {
                tag,
                attrs,
                children,
            } = item
            {
                let mut attrs: Vec<(String, String)> = attrs
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                    .collect();
                attrs.sort();
                shape.push(((*tag).to_string(), attrs, depth));
                pending.extend(children.iter().rev().map(|child| (child, depth + 1)));
            }
        }
        shape
    }
}

fn write_items(items: &[Item], out: &mut String) {
    for item in items {
        match item {
            Item::Text(text) => out.push_str(text),
            Item::Element {
                tag,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push_str(&format!(" {name}={}", quoted(value)));
                }
                out.push('>');
                if !VOID_TAGS.contains(tag) {
                    write_items(children, out);
                    out.push_str(&format!("</{tag}>"));
                }
            }
        }
    }
}

/// Quote `value` so the tokenizer reads it back unchanged.
fn quoted(value: &str) -> String {
    match (value.contains('"'), value.contains('\'')) {
        (true, true) => value.to_string(),
        (true, false) => format!("'{value}'"),
        _ => format!("\"{value}\""),
    }
}

/// (tag, sorted attributes, depth) for every element below the root.
fn element_shape(doc: &Document) -> Vec<(String, Vec<(String, String)>, usize)> {
    let tree = doc.tree();
    tree.descendants(NodeId::ROOT)
        .skip(1)
        .filter_map(|id| {
            let data = tree.as_element(id)?;
            let mut attrs: Vec<(String, String)> = data
                .attrs
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();
            attrs.sort();
            Some((data.tag_name.clone(), attrs, tree.ancestors(id).count()))
        })
        .collect()
}

#[quickcheck]
fn void_elements_are_childless(markup: Markup) -> bool {
    let doc = parse_document(&markup.to_html());
    VOID_TAGS.iter().all(|tag| {
        doc.get_by_tag(tag)
            .unwrap_or_default()
            .iter()
            .all(|&id| doc.tree().children(id).is_empty())
    })
}

#[quickcheck]
fn tag_index_matches_preorder_scan(markup: Markup) -> bool {
    let doc = parse_document(&markup.to_html());
    let tree = doc.tree();
    let expected_tags = markup.tags();
    TAGS.iter().all(|tag| {
        let scanned: Vec<NodeId> = tree
            .descendants(NodeId::ROOT)
            .filter(|&id| tree.tag_name(id) == Some(*tag))
            .collect();
        let indexed = doc.get_by_tag(tag).unwrap_or_default();
        let count = expected_tags.iter().filter(|t| *t == tag).count();
        indexed == scanned.as_slice() && indexed.len() == count
    })
}

#[quickcheck]
fn node_index_agrees_with_document_index(markup: Markup) -> bool {
    let doc = parse_document(&markup.to_html());
    TAGS.iter()
        .all(|tag| doc.get_by_tag(tag) == doc.tree().get_by_tag(NodeId::ROOT, tag))
}

#[quickcheck]
fn class_index_holds_each_node_once_per_token(markup: Markup) -> bool {
    let doc = parse_document(&markup.to_html());
    ["a", "b", "c", "card", "wide", "x1", "\"hi\"", "it's"].iter().all(|class| {
        let found = doc.get_by_class_name(class).unwrap_or_default();
        let mut deduped = found.to_vec();
        deduped.dedup();
        deduped.len() == found.len()
            && found.iter().all(|&id| {
                doc.tree()
                    .as_element(id)
                    .is_some_and(|data| data.classes().contains(class))
            })
    })
}

#[quickcheck]
fn parse_reproduces_generated_structure(markup: Markup) -> bool {
    let doc = parse_document(&markup.to_html());
    element_shape(&doc) == markup.shape()
}

#[quickcheck]
fn render_then_reparse_preserves_elements(markup: Markup) -> bool {
    let doc = parse_document(&markup.to_html());
    let reparsed = parse_document(&doc.render());
    element_shape(&doc) == element_shape(&reparsed)
}

#[quickcheck]
fn text_leaves_hang_off_elements(markup: Markup) -> bool {
    let doc = parse_document(&markup.to_html());
    let tree = doc.tree();
    tree.descendants(NodeId::ROOT).all(|id| match tree.get(id) {
        Some(node) => match node.node_type {
            NodeType::Text(_) => {
                node.children.is_empty()
                    && node.parent.is_some_and(|parent| tree.as_element(parent).is_some())
            }
            NodeType::Element(_) => true,
        },
        None => false,
    })
}
