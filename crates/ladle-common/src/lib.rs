//! Common utilities for the Ladle HTML parser.
//!
//! This crate provides shared infrastructure used by the parser crates and the CLI:
//! - **Warning System** - colored, deduplicated stderr output for behavior the
//!   parser deliberately does not support (such as decoding character references)

pub mod warning;
