//! Permissive HTML tokenizer and tree builder for Ladle.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tokenizer**: a character state machine producing start tags, end tags,
//!   text runs, comments, declarations and character/entity references
//! - **Tree builder**: a stack of open elements rooted at a synthetic root,
//!   with void-element handling and title capture
//!
//! Malformed markup never fails a parse. Unmatched end tags are ignored and
//! elements left open at the end of input simply stay where they are.
//!
//! # Not Implemented
//!
//! - Character reference decoding (references are recognized and dropped)
//! - Implied tags, misnesting recovery and insertion modes
//! - Raw text handling for `<script>` and `<style>`
//!
//! # Example
//!
//! ```
//! let doc = ladle_html::parse_document("<title>Hi</title><p id=a>one</p>");
//! assert_eq!(doc.title(), Some("Hi"));
//! assert!(doc.get_by_id("a").is_some());
//! ```

/// Tree construction.
pub mod parser;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

use ladle_dom::Document;

pub use parser::{HTMLParser, ParseIssue, ParseIssueKind, VOID_TAGS, print_tree};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerState, tokenize};

/// Parse `source` into a [`Document`]. Never fails.
#[must_use]
pub fn parse_document(source: &str) -> Document {
    HTMLParser::new(tokenize(source)).run()
}
