use strum_macros::Display;

use super::token::Token;

/// The tokenizer state machine. Every state handler is called with the
/// character just consumed (`None` at end of input).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Character data between tags.
    Data,
    /// After `<`.
    TagOpen,
    /// After `</`.
    EndTagOpen,
    /// Reading a start or end tag name.
    TagName,
    /// Whitespace before an attribute name.
    BeforeAttributeName,
    /// Reading an attribute name.
    AttributeName,
    /// After an attribute name, before `=` or the next attribute.
    AfterAttributeName,
    /// After `=`, before the value.
    BeforeAttributeValue,
    /// Inside `"..."`.
    AttributeValueDoubleQuoted,
    /// Inside `'...'`.
    AttributeValueSingleQuoted,
    /// An unquoted value.
    AttributeValueUnquoted,
    /// Just after a closing quote.
    AfterAttributeValueQuoted,
    /// After `/` inside a tag.
    SelfClosingStartTag,
    /// After `<!`.
    MarkupDeclarationOpen,
    /// Inside `<!-- ... -->`.
    Comment,
    /// Inside `<!DOCTYPE ...>` or another `<!...>` declaration.
    Declaration,
    /// Inside `<![CDATA[ ... ]]>`.
    CdataSection,
    /// Inside `<? ... >` or other malformed markup, up to `>`.
    BogusComment,
    /// After `&`.
    CharacterReference,
    /// Reading `&name`.
    NamedCharacterReference,
    /// After `&#`.
    NumericCharacterReference,
    /// After `&#x`.
    HexadecimalCharacterReferenceStart,
    /// Reading hex digits of `&#x...`.
    HexadecimalCharacterReference,
    /// Reading decimal digits of `&#...`.
    DecimalCharacterReference,
}

/// Permissive HTML tokenizer.
///
/// Turns markup into a flat list of [`Token`]s. It never fails: malformed
/// markup degrades to text, comments or dropped constructs, and scanning
/// resumes at the next plausible boundary.
///
/// There is no raw-text handling: `<script>` and `<style>` contents are
/// tokenized like any other markup.
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) current_token: Option<Token>,
    pub(super) at_eof: bool,
    pub(super) token_stream: Vec<Token>,
    // When true, the next iteration of the main loop will not consume a new character.
    pub(super) reconsume: bool,

    /// Characters of the text run being accumulated.
    pub(super) text_buffer: String,

    /// Comment, declaration or reference characters collected so far.
    pub(super) temporary_buffer: String,
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input, starting in the data state.
    #[must_use]
    pub const fn new(input: String) -> Self {
        Self {
            state: TokenizerState::Data,
            input,
            current_pos: 0,
            current_input_character: None,
            current_token: None,
            at_eof: false,
            token_stream: Vec::new(),
            reconsume: false,
            text_buffer: String::new(),
            temporary_buffer: String::new(),
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after `run()` to get the tokens for the parser.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// The state the machine is currently in.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Run the tokenizer to completion.
    ///
    /// Processes the input and populates the token stream, which always ends
    /// with [`Token::EndOfFile`].
    pub fn run(&mut self) {
        while !self.at_eof {
            // Each state begins by consuming the next input character,
            // unless we're reconsuming from a previous state transition.
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }

            match self.state {
                TokenizerState::Data => self.handle_data_state(),
                TokenizerState::TagOpen => self.handle_tag_open_state(),
                TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
                TokenizerState::TagName => self.handle_tag_name_state(),
                TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
                TokenizerState::AttributeName => self.handle_attribute_name_state(),
                TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
                TokenizerState::BeforeAttributeValue => {
                    self.handle_before_attribute_value_state();
                }
                TokenizerState::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_quoted_state('"');
                }
                TokenizerState::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_quoted_state('\'');
                }
                TokenizerState::AttributeValueUnquoted => {
                    self.handle_attribute_value_unquoted_state();
                }
                TokenizerState::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state();
                }
                TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
                TokenizerState::MarkupDeclarationOpen => {
                    self.handle_markup_declaration_open_state();
                }
                TokenizerState::Comment => self.handle_comment_state(),
                TokenizerState::Declaration => self.handle_declaration_state(),
                TokenizerState::CdataSection => self.handle_cdata_section_state(),
                TokenizerState::BogusComment => self.handle_bogus_comment_state(),
                TokenizerState::CharacterReference => self.handle_character_reference_state(),
                TokenizerState::NamedCharacterReference => {
                    self.handle_named_character_reference_state();
                }
                TokenizerState::NumericCharacterReference => {
                    self.handle_numeric_character_reference_state();
                }
                TokenizerState::HexadecimalCharacterReferenceStart => {
                    self.handle_hexadecimal_character_reference_start_state();
                }
                TokenizerState::HexadecimalCharacterReference => {
                    self.handle_digits_state(16);
                }
                TokenizerState::DecimalCharacterReference => self.handle_digits_state(10),
            }
        }
    }

    fn handle_data_state(&mut self) {
        match self.current_input_character {
            Some('&') => {
                self.temporary_buffer.clear();
                self.temporary_buffer.push('&');
                self.switch_to(TokenizerState::CharacterReference);
            }
            Some('<') => self.switch_to(TokenizerState::TagOpen),
            None => self.emit_eof_token(),
            Some(c) => self.emit_character(c),
        }
    }

    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            Some('!') => self.switch_to(TokenizerState::MarkupDeclarationOpen),
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_start_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // "<?xml ...>" and friends become comments.
            Some('?') => {
                self.temporary_buffer.clear();
                self.reconsume_in(TokenizerState::BogusComment);
            }
            // A lone "<" is text.
            _ => {
                self.emit_character('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // "</>" is dropped entirely.
            Some('>') => self.switch_to(TokenizerState::Data),
            None => {
                self.emit_characters("</");
                self.reconsume_in(TokenizerState::Data);
            }
            Some(_) => {
                self.temporary_buffer.clear();
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.abandon_tag(),
            Some(c) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
            }
        }
    }

    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            Some(_) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.start_new_attribute();
                }
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            Some('=') if self.current_attribute_has_name() => {
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some(c) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_current_attribute_name(c.to_ascii_lowercase());
                }
            }
        }
    }

    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.abandon_tag(),
            Some(_) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.start_new_attribute();
                }
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            _ => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    fn handle_attribute_value_quoted_state(&mut self, quote: char) {
        match self.current_input_character {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            None => self.abandon_tag(),
            Some(c) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_current_attribute_value(c);
                }
            }
        }
    }

    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.abandon_tag(),
            Some(c) => {
                if let Some(token) = self.current_token.as_mut() {
                    token.append_to_current_attribute_value(c);
                }
            }
        }
    }

    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.abandon_tag(),
            Some(_) => self.reconsume_in(TokenizerState::BeforeAttributeName),
        }
    }

    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                if let Some(token) = self.current_token.as_mut() {
                    token.set_self_closing();
                }
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => self.abandon_tag(),
            Some(_) => self.reconsume_in(TokenizerState::BeforeAttributeName),
        }
    }

    fn handle_markup_declaration_open_state(&mut self) {
        self.temporary_buffer.clear();
        match self.current_input_character {
            Some('-') if self.next_few_characters_are("-") => {
                self.consume_string("-");
                self.switch_to(TokenizerState::Comment);
            }
            Some('[') if self.next_few_characters_are("CDATA[") => {
                self.consume_string("CDATA[");
                self.switch_to(TokenizerState::CdataSection);
            }
            Some(c) if c.is_ascii_alphabetic() => {
                self.reconsume_in(TokenizerState::Declaration);
            }
            None => self.reconsume_in(TokenizerState::Data),
            Some(_) => self.reconsume_in(TokenizerState::BogusComment),
        }
    }

    fn handle_comment_state(&mut self) {
        match self.current_input_character {
            Some('-') if self.next_few_characters_are("->") => {
                self.consume_string("->");
                self.switch_to(TokenizerState::Data);
                self.emit_temporary_buffer_as(|data| Token::Comment { data });
            }
            // "<!-->" closes an empty comment.
            Some('>') if self.temporary_buffer.is_empty() => {
                self.switch_to(TokenizerState::Data);
                self.emit_temporary_buffer_as(|data| Token::Comment { data });
            }
            None => self.abandon_buffered_markup(),
            Some(c) => self.temporary_buffer.push(c),
        }
    }

    fn handle_declaration_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_temporary_buffer_as(|data| Token::Declaration { data });
            }
            None => self.abandon_buffered_markup(),
            Some(c) => self.temporary_buffer.push(c),
        }
    }

    fn handle_cdata_section_state(&mut self) {
        match self.current_input_character {
            Some(']') if self.next_few_characters_are("]>") => {
                self.consume_string("]>");
                self.switch_to(TokenizerState::Data);
                self.emit_temporary_buffer_as(|data| Token::Declaration {
                    data: format!("[CDATA[{data}]]"),
                });
            }
            None => self.abandon_buffered_markup(),
            Some(c) => self.temporary_buffer.push(c),
        }
    }

    fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_temporary_buffer_as(|data| Token::Comment { data });
            }
            None => self.abandon_buffered_markup(),
            Some(c) => self.temporary_buffer.push(c),
        }
    }

    fn handle_character_reference_state(&mut self) {
        match self.current_input_character {
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            Some(c) if c.is_ascii_alphabetic() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            _ => {
                self.flush_temporary_buffer_as_text();
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    fn handle_named_character_reference_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphanumeric() || c == '-' || c == '.' => {
                self.temporary_buffer.push(c);
            }
            Some(';') => {
                self.emit_reference();
                self.switch_to(TokenizerState::Data);
            }
            _ => {
                self.emit_reference();
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    fn handle_numeric_character_reference_state(&mut self) {
        match self.current_input_character {
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            Some(c) if c.is_ascii_digit() => {
                self.reconsume_in(TokenizerState::DecimalCharacterReference);
            }
            _ => {
                self.flush_temporary_buffer_as_text();
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    fn handle_hexadecimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_hexdigit() => {
                self.reconsume_in(TokenizerState::HexadecimalCharacterReference);
            }
            _ => {
                self.flush_temporary_buffer_as_text();
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// Shared by the decimal and hexadecimal digit states.
    fn handle_digits_state(&mut self, radix: u32) {
        match self.current_input_character {
            Some(c) if c.is_digit(radix) => self.temporary_buffer.push(c),
            Some(';') => {
                self.emit_reference();
                self.switch_to(TokenizerState::Data);
            }
            _ => {
                self.emit_reference();
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    fn current_attribute_has_name(&self) -> bool {
        match &self.current_token {
            Some(Token::StartTag { attributes, .. }) => {
                attributes.last().is_some_and(|attr| !attr.name.is_empty())
            }
            // End tags keep no attributes, so any `=` ends the name.
            _ => true,
        }
    }

    /// End of input inside a tag: the unfinished tag is dropped.
    fn abandon_tag(&mut self) {
        self.discard_current_token();
        self.reconsume_in(TokenizerState::Data);
    }

    /// End of input inside a comment or declaration: it is dropped.
    fn abandon_buffered_markup(&mut self) {
        self.temporary_buffer.clear();
        self.reconsume_in(TokenizerState::Data);
    }
}
