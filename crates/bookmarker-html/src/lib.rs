//! HTML tokenizer and bookmark walker for Google Bookmarks exports.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data and tag states, attribute parsing
//!   - Comment and collapsed DOCTYPE handling
//!   - Scoped character reference resolution
//!   - Pull-based: tokens are produced one `next_token` call at a time
//!
//! - **Bookmark Walker** - a single forward pass over the token stream that
//!   folds `<H3>` headings and `<A HREF=...>` anchors into a mapping from
//!   category name to bookmarks, per the Netscape bookmark file format
//!   Google Bookmarks exports use
//!
//! # Not Implemented
//!
//! - Tree construction (no DOM is built; the walker consumes tokens directly)
//! - RCDATA/RAWTEXT/script data states (unreachable from export documents)
//! - The full named character reference table
//! - Folder nesting (categories are flat, matching the export's one level)

/// Bookmark extraction from the token stream.
pub mod bookmarks;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use bookmarks::{Bookmark, parse_exported_google_bookmarks};
pub use tokenizer::{Attribute, HTMLTokenizer, Token, TokenizerError};
