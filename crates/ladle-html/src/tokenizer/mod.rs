//! HTML tokenizer module.
//!
//! The tokenizer is a character-at-a-time state machine. States live in
//! [`machine`], the shared consume/emit plumbing in [`helpers`], and the
//! token type in [`token`].

/// Input, transition and emission helpers shared by the state handlers.
pub mod helpers;
/// The state machine and its main loop.
pub mod machine;
/// Token types.
pub mod token;

pub use machine::{HTMLTokenizer, TokenizerState};
pub use token::{Attribute, Token};

/// Tokenize `input` in one go.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = HTMLTokenizer::new(input.to_string());
    tokenizer.run();
    tokenizer.into_tokens()
}
