//! HTML tokenizer module.
//!
//! Implements the subset of [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard reachable from a bookmark export
//! document, exposed as a pull-based token source.

/// Character reference resolution per § 13.2.5.72 (scoped subset).
pub mod character_reference;
/// HTML tokenizer state machine implementation.
pub mod core;
/// Fatal (malformed-document) tokenizer errors.
pub mod error;
/// Helper methods for tokenizer state transitions and input handling.
pub mod helpers;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{HTMLTokenizer, TokenizerState};
pub use error::TokenizerError;
pub use token::{Attribute, Token};
