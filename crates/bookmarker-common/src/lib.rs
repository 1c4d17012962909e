//! Common utilities for the bookmarker parser.
//!
//! This crate provides shared infrastructure used by the parsing components:
//! - **Warning System** - colored terminal output for recoverable parse errors

pub mod warning;
