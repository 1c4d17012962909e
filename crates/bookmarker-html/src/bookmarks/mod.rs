//! Bookmark extraction from exported Google Bookmarks documents.
//!
//! The export format is the Netscape bookmark file format: a nested HTML
//! list where `<H3>` headings name folders and `<A HREF=...>` anchors are
//! the bookmarks themselves. This module walks the token stream and folds
//! it into a flat category-to-bookmarks mapping.

/// The token walker and its public entry point.
pub mod core;

pub use self::core::{Bookmark, parse_exported_google_bookmarks};
