//! Syntax highlighting module
//!
//! This module provides line-by-line classification of markdown notes
//! with inlined HTML:
//! - Ordered pattern rules where later rules override earlier ones
//! - Fenced code block and HTML comment tracking across lines
//! - Per-document caching with minimal re-highlighting on edits

mod block;
mod builtin;
mod classifier;
mod manager;
mod rules;
pub(crate) mod span;
mod tokens;

pub use block::{BlockState, COMMENT_BEGIN, COMMENT_END, FENCE};
pub use classifier::{LineClassifier, LineHighlight};
pub use manager::{Cursor, HighlightCache, NoteHighlighter};
pub use rules::{MatchMode, RuleEntry, RuleKind, RuleTable};
pub use span::{CharIndex, FormatBuffer, Span};
pub use tokens::TokenType;
