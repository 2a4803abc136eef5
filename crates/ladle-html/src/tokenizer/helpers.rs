//! Helper functions for the HTML tokenizer.
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling ("Consume the next input character")
//! - Token emission, including buffering of text runs

use ladle_common::warning::warn_once;

use super::machine::{HTMLTokenizer, TokenizerState};
use super::token::Token;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Returns the character at the current position and advances the position.
    /// Returns None if we've reached the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Check if the characters after the current one match `target` exactly.
    #[must_use]
    pub fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// Consume the given string from the input.
    /// Caller must have already verified the characters are present.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// Tab, line feed, form feed, carriage return or space.
    ///
    /// Carriage returns are included because input is not newline-normalized.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C' | '\r')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl HTMLTokenizer {
    /// Add a character to the pending text run. Runs are emitted as a single
    /// `Text` token as soon as any other token is emitted.
    pub(super) fn emit_character(&mut self, c: char) {
        self.text_buffer.push(c);
    }

    /// Add a whole string to the pending text run.
    pub(super) fn emit_characters(&mut self, s: &str) {
        self.text_buffer.push_str(s);
    }

    /// Emit the pending text run, if any.
    pub(super) fn flush_text(&mut self) {
        if !self.text_buffer.is_empty() {
            let data = std::mem::take(&mut self.text_buffer);
            self.token_stream.push(Token::Text { data });
        }
    }

    /// Emit `token` after any pending text run.
    pub(super) fn emit(&mut self, token: Token) {
        self.flush_text();
        self.token_stream.push(token);
    }

    /// Emit the current tag token.
    pub(super) fn emit_current_token(&mut self) {
        if let Some(mut token) = self.current_token.take() {
            token.remove_duplicate_attributes();
            self.emit(token);
        }
    }

    /// Drop the current tag token without emitting it (end of input inside a tag).
    pub(super) fn discard_current_token(&mut self) {
        self.current_token = None;
    }

    /// Emit the collected comment or declaration data as the token `make` builds.
    pub(super) fn emit_temporary_buffer_as(&mut self, make: fn(String) -> Token) {
        let data = std::mem::take(&mut self.temporary_buffer);
        self.emit(make(data));
    }

    /// Emit the reference held in the temporary buffer (which starts with `&`).
    pub(super) fn emit_reference(&mut self) {
        let _ = warn_once(
            "Tokenizer",
            "character references are recognized but not decoded; their text is dropped",
        );
        let raw = std::mem::take(&mut self.temporary_buffer);
        let body = raw.strip_prefix('&').unwrap_or(&raw).to_string();
        let token = if body.starts_with('#') {
            Token::CharacterReference { raw: body }
        } else {
            Token::EntityReference { name: body }
        };
        self.emit(token);
    }

    /// Give up on a reference: its characters were ordinary text after all.
    pub(super) fn flush_temporary_buffer_as_text(&mut self) {
        let buffered = std::mem::take(&mut self.temporary_buffer);
        self.emit_characters(&buffered);
    }

    /// Emit an end-of-file token after any pending text, and stop the main loop.
    pub(super) fn emit_eof_token(&mut self) {
        self.emit(Token::EndOfFile);
        self.at_eof = true;
    }
}
