//! HTML parser module for tree construction.

/// Stack-driven tree builder.
pub mod builder;

pub use builder::{HTMLParser, ParseIssue, ParseIssueKind, VOID_TAGS, print_tree};
