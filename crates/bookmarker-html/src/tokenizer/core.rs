use strum_macros::Display;

use super::error::TokenizerError;
use super::token::Token;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine. Each state corresponds to a section in
/// § 13.2.5. This is the subset of the WHATWG machine a bookmark export
/// document can reach: data, tag, attribute, comment, and doctype states.
/// RCDATA/RAWTEXT/script states are not needed (exports carry no `<script>`
/// or `<style>` content) and CDATA only occurs in foreign content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    CommentStart,
    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    CommentStartDash,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    CommentEndDash,
    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    CommentEnd,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    ///
    /// Collapsed: the payload is collected verbatim up to `>` rather than
    /// split into name/public/system identifiers. Consumers of this
    /// tokenizer never inspect the doctype beyond its presence.
    Doctype,
}

/// A step of the state machine: either a finished token to hand to the
/// caller, or nothing yet (keep stepping).
type Step = Result<Option<Token>, TokenizerError>;

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to
/// tokenize HTML."
///
/// A pull-based tokenizer: callers repeatedly ask for the next token with
/// [`HTMLTokenizer::next_token`] until it yields [`Token::EndOfFile`] or an
/// error. Character data is buffered and handed out as maximal
/// [`Token::Text`] runs.
pub struct HTMLTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) current_token: Option<Token>,
    pub(super) text_buffer: String,
    // When true, the next iteration of the pull loop will not consume a new
    // character. "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,
}

impl HTMLTokenizer {
    /// Create a new tokenizer for the given input.
    ///
    /// "The tokenizer state machine consists of the states defined in the
    /// following subsections. The initial state is the data state."
    #[must_use]
    pub fn new(input: String) -> Self {
        Self {
            state: TokenizerState::Data,
            input,
            current_pos: 0,
            current_input_character: None,
            current_token: None,
            text_buffer: String::new(),
            reconsume: false,
        }
    }

    /// Pull the next token from the input.
    ///
    /// Returns [`Token::EndOfFile`] once the input is cleanly exhausted
    /// (and on every call thereafter).
    ///
    /// # Errors
    ///
    /// Returns a [`TokenizerError`] when the input ends inside an open
    /// markup construct. The tokenizer should not be used further after an
    /// error.
    pub fn next_token(&mut self) -> Result<Token, TokenizerError> {
        loop {
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }

            let step = match self.state {
                TokenizerState::Data => self.handle_data_state(),
                TokenizerState::TagOpen => self.handle_tag_open_state(),
                TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
                TokenizerState::TagName => self.handle_tag_name_state(),
                TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
                TokenizerState::AttributeName => self.handle_attribute_name_state(),
                TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
                TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
                TokenizerState::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_quoted_state('"')
                }
                TokenizerState::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_quoted_state('\'')
                }
                TokenizerState::AttributeValueUnquoted => {
                    self.handle_attribute_value_unquoted_state()
                }
                TokenizerState::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state()
                }
                TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
                TokenizerState::BogusComment => self.handle_bogus_comment_state(),
                TokenizerState::MarkupDeclarationOpen => {
                    self.handle_markup_declaration_open_state()
                }
                TokenizerState::CommentStart => self.handle_comment_start_state(),
                TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
                TokenizerState::Comment => self.handle_comment_state(),
                TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
                TokenizerState::CommentEnd => self.handle_comment_end_state(),
                TokenizerState::Doctype => self.handle_doctype_state(),
            };

            if let Some(token) = step? {
                return Ok(token);
            }
        }
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&) - Set the return state to the data state.
            // Switch to the character reference state."
            // The character reference is resolved inline by lookahead.
            Some('&') => {
                let resolved = self.consume_character_reference();
                self.text_buffer.push_str(&resolved);
                Ok(None)
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            // Any buffered text run ends here and is emitted first.
            Some('<') => {
                self.switch_to(TokenizerState::TagOpen);
                Ok(self.flush_text())
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error.
            // Emit the current input character as a character token."
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.text_buffer.push('\0');
                Ok(None)
            }
            // "EOF - Emit an end-of-file token." Pending text goes out first;
            // the next pull lands here again with an empty buffer.
            None => Ok(Some(
                self.flush_text().unwrap_or(Token::EndOfFile),
            )),
            // "Anything else - Emit the current input character as a
            // character token."
            Some(c) => {
                self.text_buffer.push(c);
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!) - Switch to the markup declaration
            // open state."
            // NOTE: reconsume so that MarkupDeclarationOpen can peek ahead
            // without the pull loop consuming a character first.
            Some('!') => {
                self.reconsume_in(TokenizerState::MarkupDeclarationOpen);
                Ok(None)
            }
            // "U+002F SOLIDUS (/) - Switch to the end tag open state."
            Some('/') => {
                self.switch_to(TokenizerState::EndTagOpen);
                Ok(None)
            }
            // "ASCII alpha - Create a new start tag token, set its tag name
            // to the empty string. Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_start_tag());
                self.reconsume_in(TokenizerState::TagName);
                Ok(None)
            }
            // "U+003F QUESTION MARK (?) - This is an
            // unexpected-question-mark-instead-of-tag-name parse error.
            // Create a comment token whose data is the empty string.
            // Reconsume in the bogus comment state."
            Some('?') => {
                self.log_parse_error("unexpected-question-mark-instead-of-tag-name");
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
                Ok(None)
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a
            // U+003C LESS-THAN SIGN character token and an end-of-file
            // token." A trailing lone `<` is text, not a truncated tag.
            None => {
                self.log_parse_error("eof-before-tag-name");
                self.text_buffer.push('<');
                self.reconsume_in(TokenizerState::Data);
                Ok(None)
            }
            // "Anything else - This is an invalid-first-character-of-tag-name
            // parse error. Emit a U+003C LESS-THAN SIGN character token.
            // Reconsume in the data state."
            Some(_) => {
                self.log_parse_error("invalid-first-character-of-tag-name");
                self.text_buffer.push('<');
                self.reconsume_in(TokenizerState::Data);
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) -> Step {
        match self.current_input_character {
            // "ASCII alpha - Create a new end tag token, set its tag name to
            // the empty string. Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::TagName);
                Ok(None)
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-end-tag-name
            // parse error. Switch to the data state."
            Some('>') => {
                self.log_parse_error("missing-end-tag-name");
                self.switch_to(TokenizerState::Data);
                Ok(None)
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a
            // U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS
            // character token and an end-of-file token."
            None => {
                self.log_parse_error("eof-before-tag-name");
                self.text_buffer.push_str("</");
                self.reconsume_in(TokenizerState::Data);
                Ok(None)
            }
            // "Anything else - This is an invalid-first-character-of-tag-name
            // parse error. Create a comment token whose data is the empty
            // string. Reconsume in the bogus comment state."
            Some(_) => {
                self.log_parse_error("invalid-first-character-of-tag-name");
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM
            // FEED, U+0020 SPACE - Switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
                Ok(None)
            }
            // "U+002F SOLIDUS (/) - Switch to the self-closing start tag state."
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
                Ok(None)
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit
            // the current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                Ok(self.take_current_token())
            }
            // "ASCII upper alpha - Append the lowercase version of the
            // current input character to the current tag token's tag name."
            Some(c) if c.is_ascii_uppercase() => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
                Ok(None)
            }
            // "U+0000 NULL - This is an unexpected-null-character parse
            // error. Append a U+FFFD REPLACEMENT CHARACTER to the current tag
            // token's tag name."
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name('\u{FFFD}');
                }
                Ok(None)
            }
            // "EOF - This is an eof-in-tag parse error." Fatal here: the
            // document was cut off inside a tag.
            None => Err(TokenizerError::EofInTag {
                position: self.current_pos,
            }),
            // "Anything else - Append the current input character to the
            // current tag token's tag name."
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name(c);
                }
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM
            // FEED, U+0020 SPACE - Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => Ok(None),
            // "U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>), EOF -
            // Reconsume in the after attribute name state."
            Some('/' | '>') | None => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
                Ok(None)
            }
            // "U+003D EQUALS SIGN (=) - This is an
            // unexpected-equals-sign-before-attribute-name parse error.
            // Start a new attribute in the current tag token. Set that
            // attribute's name to the current input character."
            Some('=') => {
                self.log_parse_error("unexpected-equals-sign-before-attribute-name");
                if let Some(ref mut token) = self.current_token {
                    token.start_new_attribute();
                    token.append_to_current_attribute_name('=');
                }
                self.switch_to(TokenizerState::AttributeName);
                Ok(None)
            }
            // "Anything else - Start a new attribute in the current tag
            // token. Reconsume in the attribute name state."
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.start_new_attribute();
                }
                self.reconsume_in(TokenizerState::AttributeName);
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM
            // FEED, U+0020 SPACE, U+002F SOLIDUS (/), U+003E GREATER-THAN
            // SIGN (>), EOF - Reconsume in the after attribute name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.report_duplicate_attribute();
                self.reconsume_in(TokenizerState::AfterAttributeName);
                Ok(None)
            }
            Some('/' | '>') | None => {
                self.report_duplicate_attribute();
                self.reconsume_in(TokenizerState::AfterAttributeName);
                Ok(None)
            }
            // "U+003D EQUALS SIGN (=) - Switch to the before attribute value
            // state."
            Some('=') => {
                self.report_duplicate_attribute();
                self.switch_to(TokenizerState::BeforeAttributeValue);
                Ok(None)
            }
            // "ASCII upper alpha - Append the lowercase version of the
            // current input character to the current attribute's name."
            Some(c) if c.is_ascii_uppercase() => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name(c.to_ascii_lowercase());
                }
                Ok(None)
            }
            // "U+0000 NULL - This is an unexpected-null-character parse
            // error. Append a U+FFFD REPLACEMENT CHARACTER to the current
            // attribute's name."
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name('\u{FFFD}');
                }
                Ok(None)
            }
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C
            // LESS-THAN SIGN (<) - This is an
            // unexpected-character-in-attribute-name parse error. Treat it as
            // per the 'anything else' entry below."
            Some(c @ ('"' | '\'' | '<')) => {
                self.log_parse_error("unexpected-character-in-attribute-name");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name(c);
                }
                Ok(None)
            }
            // "Anything else - Append the current input character to the
            // current attribute's name."
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name(c);
                }
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM
            // FEED, U+0020 SPACE - Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => Ok(None),
            // "U+002F SOLIDUS (/) - Switch to the self-closing start tag state."
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
                Ok(None)
            }
            // "U+003D EQUALS SIGN (=) - Switch to the before attribute value
            // state."
            Some('=') => {
                self.switch_to(TokenizerState::BeforeAttributeValue);
                Ok(None)
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit
            // the current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                Ok(self.take_current_token())
            }
            // "EOF - This is an eof-in-tag parse error."
            None => Err(TokenizerError::EofInTag {
                position: self.current_pos,
            }),
            // "Anything else - Start a new attribute in the current tag
            // token. Reconsume in the attribute name state."
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.start_new_attribute();
                }
                self.reconsume_in(TokenizerState::AttributeName);
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM
            // FEED, U+0020 SPACE - Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => Ok(None),
            // "U+0022 QUOTATION MARK (") - Switch to the attribute value
            // (double-quoted) state."
            Some('"') => {
                self.switch_to(TokenizerState::AttributeValueDoubleQuoted);
                Ok(None)
            }
            // "U+0027 APOSTROPHE (') - Switch to the attribute value
            // (single-quoted) state."
            Some('\'') => {
                self.switch_to(TokenizerState::AttributeValueSingleQuoted);
                Ok(None)
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a
            // missing-attribute-value parse error. Switch to the data state.
            // Emit the current tag token."
            Some('>') => {
                self.log_parse_error("missing-attribute-value");
                self.switch_to(TokenizerState::Data);
                Ok(self.take_current_token())
            }
            // "Anything else - Reconsume in the attribute value (unquoted)
            // state." (EOF is handled there.)
            _ => {
                self.reconsume_in(TokenizerState::AttributeValueUnquoted);
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    ///
    /// The two quoted-value states differ only in their closing quote.
    fn handle_attribute_value_quoted_state(&mut self, quote: char) -> Step {
        match self.current_input_character {
            // "U+0022 QUOTATION MARK (") / U+0027 APOSTROPHE (') - Switch to
            // the after attribute value (quoted) state."
            Some(c) if c == quote => {
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
                Ok(None)
            }
            // "U+0026 AMPERSAND (&) - Set the return state... Switch to the
            // character reference state." Resolved inline by lookahead.
            Some('&') => {
                let resolved = self.consume_character_reference();
                if let Some(ref mut token) = self.current_token {
                    token.append_str_to_current_attribute_value(&resolved);
                }
                Ok(None)
            }
            // "U+0000 NULL - This is an unexpected-null-character parse
            // error. Append a U+FFFD REPLACEMENT CHARACTER to the current
            // attribute's value."
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value('\u{FFFD}');
                }
                Ok(None)
            }
            // "EOF - This is an eof-in-tag parse error." Fatal, and flagged
            // as the unterminated-value case specifically.
            None => Err(TokenizerError::EofInAttributeValue {
                position: self.current_pos,
            }),
            // "Anything else - Append the current input character to the
            // current attribute's value."
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value(c);
                }
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM
            // FEED, U+0020 SPACE - Switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
                Ok(None)
            }
            // "U+0026 AMPERSAND (&) - Set the return state... Switch to the
            // character reference state." Resolved inline by lookahead.
            Some('&') => {
                let resolved = self.consume_character_reference();
                if let Some(ref mut token) = self.current_token {
                    token.append_str_to_current_attribute_value(&resolved);
                }
                Ok(None)
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit
            // the current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                Ok(self.take_current_token())
            }
            // "U+0000 NULL - This is an unexpected-null-character parse
            // error. Append a U+FFFD REPLACEMENT CHARACTER to the current
            // attribute's value."
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value('\u{FFFD}');
                }
                Ok(None)
            }
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C
            // LESS-THAN SIGN (<), U+003D EQUALS SIGN (=), U+0060 GRAVE ACCENT
            // (`) - This is an unexpected-character-in-unquoted-attribute-value
            // parse error. Treat it as per the 'anything else' entry below."
            Some(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                self.log_parse_error("unexpected-character-in-unquoted-attribute-value");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value(c);
                }
                Ok(None)
            }
            // "EOF - This is an eof-in-tag parse error."
            None => Err(TokenizerError::EofInTag {
                position: self.current_pos,
            }),
            // "Anything else - Append the current input character to the
            // current attribute's value."
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value(c);
                }
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+0009 CHARACTER TABULATION, U+000A LINE FEED, U+000C FORM
            // FEED, U+0020 SPACE - Switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
                Ok(None)
            }
            // "U+002F SOLIDUS (/) - Switch to the self-closing start tag state."
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
                Ok(None)
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit
            // the current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                Ok(self.take_current_token())
            }
            // "EOF - This is an eof-in-tag parse error."
            None => Err(TokenizerError::EofInTag {
                position: self.current_pos,
            }),
            // "Anything else - This is a
            // missing-whitespace-between-attributes parse error. Reconsume in
            // the before attribute name state."
            Some(_) => {
                self.log_parse_error("missing-whitespace-between-attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Set the self-closing flag of
            // the current tag token. Switch to the data state. Emit the
            // current tag token."
            Some('>') => {
                if let Some(ref mut token) = self.current_token {
                    token.set_self_closing();
                }
                self.switch_to(TokenizerState::Data);
                Ok(self.take_current_token())
            }
            // "EOF - This is an eof-in-tag parse error."
            None => Err(TokenizerError::EofInTag {
                position: self.current_pos,
            }),
            // "Anything else - This is an unexpected-solidus-in-tag parse
            // error. Reconsume in the before attribute name state."
            Some(_) => {
                self.log_parse_error("unexpected-solidus-in-tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    fn handle_bogus_comment_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit
            // the current comment token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                Ok(self.take_current_token())
            }
            // "EOF - Emit the comment. Emit an end-of-file token." A bogus
            // comment running to end of input is not fatal.
            None => {
                self.reconsume_in(TokenizerState::Data);
                Ok(self.take_current_token())
            }
            // "U+0000 NULL - This is an unexpected-null-character parse
            // error. Append a U+FFFD REPLACEMENT CHARACTER to the comment
            // token's data."
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment('\u{FFFD}');
                }
                Ok(None)
            }
            // "Anything else - Append the current input character to the
            // comment token's data."
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment(c);
                }
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Entered by reconsuming the `!`, so the lookahead helpers peek at the
    /// characters following `<!`.
    fn handle_markup_declaration_open_state(&mut self) -> Step {
        // "If the next two characters are both U+002D HYPHEN-MINUS characters
        // (-), consume those two characters, create a comment token whose
        // data is the empty string, and switch to the comment start state."
        if self.next_few_characters_are("--") {
            self.consume_string("--");
            self.current_token = Some(Token::new_comment());
            self.switch_to(TokenizerState::CommentStart);
        }
        // "Otherwise, if the next seven characters are an ASCII
        // case-insensitive match for the word 'DOCTYPE', consume those
        // characters and switch to the DOCTYPE state."
        else if self.next_few_characters_are_case_insensitive("DOCTYPE") {
            self.consume_string("DOCTYPE");
            self.current_token = Some(Token::new_doctype());
            self.switch_to(TokenizerState::Doctype);
        }
        // "Otherwise, this is an incorrectly-opened-comment parse error.
        // Create a comment token whose data is the empty string. Switch to
        // the bogus comment state."
        else {
            self.log_parse_error("incorrectly-opened-comment");
            self.current_token = Some(Token::new_comment());
            self.switch_to(TokenizerState::BogusComment);
        }
        Ok(None)
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    fn handle_comment_start_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment start dash state."
            Some('-') => {
                self.switch_to(TokenizerState::CommentStartDash);
                Ok(None)
            }
            // "U+003E GREATER-THAN SIGN (>) - This is an
            // abrupt-closing-of-empty-comment parse error. Switch to the data
            // state. Emit the current comment token."
            Some('>') => {
                self.log_parse_error("abrupt-closing-of-empty-comment");
                self.switch_to(TokenizerState::Data);
                Ok(self.take_current_token())
            }
            // "Anything else - Reconsume in the comment state."
            _ => {
                self.reconsume_in(TokenizerState::Comment);
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    fn handle_comment_start_dash_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment end state."
            Some('-') => {
                self.switch_to(TokenizerState::CommentEnd);
                Ok(None)
            }
            // "U+003E GREATER-THAN SIGN (>) - This is an
            // abrupt-closing-of-empty-comment parse error. Switch to the data
            // state. Emit the current comment token."
            Some('>') => {
                self.log_parse_error("abrupt-closing-of-empty-comment");
                self.switch_to(TokenizerState::Data);
                Ok(self.take_current_token())
            }
            // "EOF - This is an eof-in-comment parse error."
            None => Err(TokenizerError::EofInComment {
                position: self.current_pos,
            }),
            // "Anything else - Append a U+002D HYPHEN-MINUS character (-) to
            // the comment token's data. Reconsume in the comment state."
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment('-');
                }
                self.reconsume_in(TokenizerState::Comment);
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    fn handle_comment_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment end dash state."
            Some('-') => {
                self.switch_to(TokenizerState::CommentEndDash);
                Ok(None)
            }
            // "U+0000 NULL - This is an unexpected-null-character parse
            // error. Append a U+FFFD REPLACEMENT CHARACTER to the comment
            // token's data."
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment('\u{FFFD}');
                }
                Ok(None)
            }
            // "EOF - This is an eof-in-comment parse error."
            None => Err(TokenizerError::EofInComment {
                position: self.current_pos,
            }),
            // "Anything else - Append the current input character to the
            // comment token's data."
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment(c);
                }
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    fn handle_comment_end_dash_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+002D HYPHEN-MINUS (-) - Switch to the comment end state."
            Some('-') => {
                self.switch_to(TokenizerState::CommentEnd);
                Ok(None)
            }
            // "EOF - This is an eof-in-comment parse error."
            None => Err(TokenizerError::EofInComment {
                position: self.current_pos,
            }),
            // "Anything else - Append a U+002D HYPHEN-MINUS character (-) to
            // the comment token's data. Reconsume in the comment state."
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment('-');
                }
                self.reconsume_in(TokenizerState::Comment);
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    fn handle_comment_end_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit
            // the current comment token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                Ok(self.take_current_token())
            }
            // "U+002D HYPHEN-MINUS (-) - Append a U+002D HYPHEN-MINUS
            // character (-) to the comment token's data."
            Some('-') => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment('-');
                }
                Ok(None)
            }
            // "EOF - This is an eof-in-comment parse error."
            None => Err(TokenizerError::EofInComment {
                position: self.current_pos,
            }),
            // "Anything else - Append two U+002D HYPHEN-MINUS characters (--)
            // to the comment token's data. Reconsume in the comment state."
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_str_to_comment("--");
                }
                self.reconsume_in(TokenizerState::Comment);
                Ok(None)
            }
        }
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    ///
    /// Collapsed subset: the payload up to `>` is collected verbatim with
    /// leading whitespace stripped. Bookmark exports open with
    /// `<!DOCTYPE NETSCAPE-Bookmark-file-1>` and the walker ignores it
    /// either way.
    fn handle_doctype_state(&mut self) -> Step {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - ... Emit the current DOCTYPE
            // token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                Ok(self.take_current_token())
            }
            // "EOF - This is an eof-in-doctype parse error."
            None => Err(TokenizerError::EofInDoctype {
                position: self.current_pos,
            }),
            // Leading whitespace between the keyword and the payload is not
            // part of the payload.
            Some(c) if Self::is_whitespace_char(c) => {
                if let Some(Token::Doctype { data }) = self.current_token.as_mut()
                    && !data.is_empty()
                {
                    data.push(c);
                }
                Ok(None)
            }
            // Anything else is payload.
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_doctype(c);
                }
                Ok(None)
            }
        }
    }
}
