//! Built-in rule tables
//!
//! This module provides the default pattern rules for markdown
//! notes with inlined HTML.

mod markdown;

pub use markdown::markdown_rules;
