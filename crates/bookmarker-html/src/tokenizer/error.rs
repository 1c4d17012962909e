//! Fatal tokenizer errors.
//!
//! Most WHATWG "parse errors" are recoverable and only reported through the
//! warning channel. The errors in this module are not: the input ended while
//! a markup construct was still open, so the document is truncated and the
//! token stream cannot be trusted. Callers receive these through
//! [`HTMLTokenizer::next_token`](super::HTMLTokenizer::next_token) and are
//! expected to discard whatever they accumulated.

use thiserror::Error;

/// A malformed-document condition that aborts tokenization.
///
/// Each variant carries the byte offset into the input at which the end of
/// input was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenizerError {
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    ///
    /// "EOF - This is an eof-in-tag parse error."
    #[error("unexpected end of input inside a tag at byte {position}")]
    EofInTag {
        /// Byte offset of the end of input.
        position: usize,
    },

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    ///
    /// "EOF - This is an eof-in-tag parse error." Reported separately from
    /// [`Self::EofInTag`] because an unterminated quoted value is by far the
    /// most common way a hand-edited export file breaks.
    #[error("unexpected end of input inside an attribute value at byte {position}")]
    EofInAttributeValue {
        /// Byte offset of the end of input.
        position: usize,
    },

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    ///
    /// "EOF - This is an eof-in-comment parse error."
    #[error("unexpected end of input inside a comment at byte {position}")]
    EofInComment {
        /// Byte offset of the end of input.
        position: usize,
    },

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    ///
    /// "EOF - This is an eof-in-doctype parse error."
    #[error("unexpected end of input inside a DOCTYPE at byte {position}")]
    EofInDoctype {
        /// Byte offset of the end of input.
        position: usize,
    },
}
