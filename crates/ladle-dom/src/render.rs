//! Human-readable markup reconstruction.
//!
//! Output is meant for debugging and inspection: each element becomes an
//! open tag line, its children one level (two spaces) deeper, and a matching
//! close tag line. Re-parsing the output preserves tag names, attributes and
//! child element order, but not text whitespace.

use core::fmt;

use crate::{DomTree, ElementData, NodeId, NodeType};

const INDENT: &str = "  ";

enum Step<'a> {
    Enter(NodeId, usize),
    Close(&'a str, usize),
}

/// Whether `value` survives being written without quotes: the tokenizer
/// ends an unquoted value at whitespace or `>`, and a leading quote would
/// open a quoted one.
fn can_write_unquoted(value: &str) -> bool {
    !value.starts_with(['"', '\''])
        && !value
            .chars()
            .any(|c| matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r' | '>'))
}

impl fmt::Display for ElementData {
    /// Writes the open tag, attributes sorted by name.
    ///
    /// Empty values are written as bare names. A value containing `"` is
    /// single-quoted, and one containing both quote kinds is written
    /// unquoted. Every value the tokenizer produces fits one of these forms.
    /// A value built by hand that fits none (both quotes plus whitespace) is
    /// double-quoted with `"` written as `&quot;`; since references are not
    /// decoded, such a value does not survive re-parsing unchanged.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag_name)?;
        let mut attrs: Vec<(&String, &String)> = self.attrs.iter().collect();
        attrs.sort_unstable();
        for (name, value) in attrs {
            let double = value.contains('"');
            let single = value.contains('\'');
            if value.is_empty() {
                write!(f, " {name}")?;
            } else if double && !single {
                write!(f, " {name}='{value}'")?;
            } else if double && can_write_unquoted(value) {
                write!(f, " {name}={value}")?;
            } else if double {
                write!(f, " {name}=\"{}\"", value.replace('"', "&quot;"))?;
            } else {
                write!(f, " {name}=\"{value}\"")?;
            }
        }
        write!(f, ">")
    }
}

impl DomTree {
    /// Render the subtree at `id`, starting `indent` levels deep.
    ///
    /// Text leaves are written verbatim on their own line. An unknown `id`
    /// renders as the empty string.
    #[must_use]
    pub fn render(&self, id: NodeId, indent: usize) -> String {
        let mut lines = Vec::new();
        let mut work = vec![Step::Enter(id, indent)];

        while let Some(step) = work.pop() {
            match step {
                Step::Enter(id, depth) => match self.get(id).map(|node| &node.node_type) {
                    Some(NodeType::Text(text)) => {
                        lines.push(format!("{}{text}", INDENT.repeat(depth)));
                    }
                    Some(NodeType::Element(data)) => {
                        lines.push(format!("{}{data}", INDENT.repeat(depth)));
                        work.push(Step::Close(&data.tag_name, depth));
                        work.extend(
                            self.children(id)
                                .iter()
                                .rev()
                                .map(|&child| Step::Enter(child, depth + 1)),
                        );
                    }
                    None => {}
                },
                Step::Close(tag, depth) => {
                    lines.push(format!("{}</{tag}>", INDENT.repeat(depth)));
                }
            }
        }

        lines.join("\n")
    }

    /// Concatenate the rendered form of `id`'s immediate children.
    ///
    /// This is shallow: element children contribute their full markup (as
    /// [`DomTree::render`] at indent 0), not just their text.
    #[must_use]
    pub fn inner_text(&self, id: NodeId) -> String {
        self.children(id)
            .iter()
            .map(|&child| match self.as_text(child) {
                Some(text) => text.to_string(),
                None => self.render(child, 0),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(tree: &mut DomTree) -> NodeId {
        let p = tree.alloc_element(
            ElementData::new("p")
                .with_attribute("id", "a")
                .with_attribute("class", "x y"),
        );
        tree.append_child(NodeId::ROOT, p);
        let text = tree.alloc_text("Hello");
        tree.append_child(p, text);
        let br = tree.alloc_element(ElementData::new("br"));
        tree.append_child(p, br);
        p
    }

    #[test]
    fn render_indents_children() {
        let mut tree = DomTree::new();
        let p = paragraph(&mut tree);
        assert_eq!(
            tree.render(p, 0),
            "<p class=\"x y\" id=\"a\">\n  Hello\n  <br>\n  </br>\n</p>"
        );
    }

    #[test]
    fn render_honors_starting_indent() {
        let mut tree = DomTree::new();
        let p = paragraph(&mut tree);
        let rendered = tree.render(p, 2);
        assert!(rendered.starts_with("    <p "));
        assert!(rendered.ends_with("\n    </p>"));
    }

    #[test]
    fn attribute_quoting() {
        let data = ElementData::new("input")
            .with_attribute("disabled", "")
            .with_attribute("title", "say \"hi\"");
        assert_eq!(data.to_string(), "<input disabled title='say \"hi\"'>");
    }

    #[test]
    fn mixed_quotes_are_written_unquoted() {
        let data = ElementData::new("p").with_attribute("title", "a\"b'c");
        assert_eq!(data.to_string(), "<p title=a\"b'c>");
    }

    #[test]
    fn unrepresentable_value_escapes_double_quotes() {
        let data = ElementData::new("p").with_attribute("title", "it's \"x\"");
        assert_eq!(data.to_string(), "<p title=\"it's &quot;x&quot;\">");
        let leading = ElementData::new("p").with_attribute("title", "'a\"");
        assert_eq!(leading.to_string(), "<p title=\"'a&quot;\">");
    }

    #[test]
    fn inner_text_is_shallow() {
        let mut tree = DomTree::new();
        let p = paragraph(&mut tree);
        assert_eq!(tree.inner_text(p), "Hello<br>\n</br>");
    }
}
