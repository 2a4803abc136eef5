use strum_macros::{Display, IntoStaticStr};

use ladle_dom::{AttributesMap, Document, DomTree, ElementData, NodeId, NodeType};

use crate::tokenizer::{Attribute, Token};

/// Elements that never have children. Their start tag is never pushed onto
/// the stack of open elements.
pub const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// What kind of recoverable irregularity a [`ParseIssue`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum ParseIssueKind {
    /// An end tag that did not match the current element and was ignored.
    UnmatchedEndTag,
    /// An element still open when the input ended.
    UnclosedElement,
}

/// A recoverable irregularity met while building the tree.
///
/// Issues never change the outcome of a parse; they are only collected for
/// [`HTMLParser::run_with_issues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// Human readable description.
    pub message: String,
    /// Index into the token stream where this issue was encountered.
    pub token_index: usize,
    /// The category of the issue.
    pub kind: ParseIssueKind,
}

/// Builds a tree from a stream of tokens.
///
/// The builder keeps a stack of open elements whose bottom is always the
/// synthetic root. Start tags append an element to the top of the stack and,
/// unless void, become the new top. An end tag closes the top element only
/// when the names match; anything else is ignored, so the tree is never
/// restructured to recover from misnesting.
pub struct HTMLParser {
    /// Stack of open elements. `stack_of_open_elements[0]` is `NodeId::ROOT`.
    stack_of_open_elements: Vec<NodeId>,

    tree: DomTree,

    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Current position in token stream.
    token_index: usize,

    title: Option<String>,
    capture_title: bool,

    issues: Vec<ParseIssue>,
}

impl HTMLParser {
    /// Create a new parser from a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            stack_of_open_elements: vec![NodeId::ROOT],
            tree: DomTree::new(),
            tokens,
            token_index: 0,
            title: None,
            capture_title: true,
            issues: Vec::new(),
        }
    }

    /// Turn title capture on or off. On by default; when off the resulting
    /// document has no title.
    #[must_use]
    pub const fn with_title_capture(mut self, enabled: bool) -> Self {
        self.capture_title = enabled;
        self
    }

    /// Run the parser and return the document.
    ///
    /// # Panics
    ///
    /// Panics if the synthetic root is no longer at the bottom of the stack of
    /// open elements, which would be a bug in the builder.
    #[must_use]
    pub fn run(self) -> Document {
        self.run_with_issues().0
    }

    /// Run the parser and return the document along with every issue met.
    ///
    /// # Panics
    ///
    /// Same as [`HTMLParser::run`].
    #[must_use]
    pub fn run_with_issues(mut self) -> (Document, Vec<ParseIssue>) {
        let tokens = std::mem::take(&mut self.tokens);
        for (index, token) in tokens.into_iter().enumerate() {
            self.token_index = index;
            if token.is_eof() {
                break;
            }
            self.process_token(token);
        }
        self.finish();

        let document = Document::new(self.tree, self.title);
        (document, self.issues)
    }

    fn process_token(&mut self, token: Token) {
        match token {
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                self.handle_start_tag(&name, attributes);
                if self_closing {
                    self.handle_end_tag(&name);
                }
            }
            Token::EndTag { name } => self.handle_end_tag(&name),
            Token::Text { data } => self.handle_text(data),
            // Comments, declarations and references leave no trace in the tree.
            Token::Comment { .. }
            | Token::CharacterReference { .. }
            | Token::EntityReference { .. }
            | Token::Declaration { .. }
            | Token::EndOfFile => {}
        }
    }

    fn handle_start_tag(&mut self, name: &str, attributes: Vec<Attribute>) {
        let mut attrs = AttributesMap::with_capacity(attributes.len());
        for attr in attributes {
            let _ = attrs.insert(attr.name, attr.value);
        }
        let element = self.tree.alloc(NodeType::Element(ElementData {
            tag_name: name.to_string(),
            attrs,
        }));
        let parent = self.current_node();
        self.tree.append_child(parent, element);

        if !VOID_TAGS.contains(&name) {
            self.stack_of_open_elements.push(element);
        }
    }

    fn handle_end_tag(&mut self, name: &str) {
        if self.stack_of_open_elements.len() > 1
            && self.tree.tag_name(self.current_node()) == Some(name)
        {
            let _ = self.stack_of_open_elements.pop();
        } else if !VOID_TAGS.contains(&name) {
            // The end tag of a void element pairs with nothing and is not an issue.
            let open = self.tree.tag_name(self.current_node()).unwrap_or_default();
            let message = format!("ignored </{name}> while <{open}> is open");
            self.record_issue(ParseIssueKind::UnmatchedEndTag, message);
        }
    }

    fn handle_text(&mut self, data: String) {
        let current = self.current_node();
        if self.capture_title && self.title.is_none() && self.tree.tag_name(current) == Some("title")
        {
            self.title = Some(data.clone());
        }
        let text = self.tree.alloc_text(data);
        self.tree.append_child(current, text);
    }

    /// End of input: whatever is still open stays open.
    fn finish(&mut self) {
        assert_eq!(
            self.stack_of_open_elements.first(),
            Some(&NodeId::ROOT),
            "synthetic root must stay at the bottom of the stack of open elements"
        );
        let unclosed: Vec<NodeId> = self.stack_of_open_elements.drain(1..).collect();
        for id in unclosed {
            let name = self.tree.tag_name(id).unwrap_or_default().to_string();
            self.record_issue(
                ParseIssueKind::UnclosedElement,
                format!("<{name}> was never closed"),
            );
        }
    }

    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    fn record_issue(&mut self, kind: ParseIssueKind, message: String) {
        self.issues.push(ParseIssue {
            message,
            token_index: self.token_index,
            kind,
        });
    }
}

/// Print a structural dump of the subtree at `id` to stdout.
///
/// Elements show their attributes sorted by name, text leaves are quoted with
/// newlines escaped and spaces shown as `·`.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let mut stack = vec![(id, indent)];
    while let Some((id, depth)) = stack.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        let prefix = "  ".repeat(depth);
        match &node.node_type {
            NodeType::Element(data) => {
                if data.attrs.is_empty() {
                    println!("{prefix}<{}>", data.tag_name);
                } else {
                    let mut attrs: Vec<String> = data
                        .attrs
                        .iter()
                        .map(|(k, v)| {
                            if v.is_empty() {
                                k.clone()
                            } else {
                                format!("{k}=\"{v}\"")
                            }
                        })
                        .collect();
                    attrs.sort();
                    println!("{prefix}<{} {}>", data.tag_name, attrs.join(" "));
                }
            }
            NodeType::Text(data) => {
                let display = data.replace('\n', "\\n").replace(' ', "\u{00B7}");
                println!("{prefix}\"{display}\"");
            }
        }
        stack.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
    }
}
