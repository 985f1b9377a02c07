//! notelight - incremental markdown/HTML highlighting for note editors
//!
//! Classifies a live-edited markdown document line by line into typed
//! spans, tracking fenced code blocks and HTML comments across lines,
//! and segments lines into words for spell-checking.
//!
//! ```
//! use notelight::{BlockState, LineClassifier, TokenType};
//!
//! let classifier = LineClassifier::markdown().unwrap();
//! let line = classifier.classify("some **bold** text", BlockState::NORMAL);
//! assert_eq!(line.spans[0].token, TokenType::Bolder);
//! assert!(line.exit_state.is_normal());
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod spelling;
pub mod syntax;

pub use config::Config;
pub use error::{HighlightError, Result};
pub use spelling::{check, SpellChecker, TokenizerOptions, Word, WordList, WordSpan};
pub use syntax::{
    BlockState, Cursor, HighlightCache, LineClassifier, LineHighlight, MatchMode,
    NoteHighlighter, RuleKind, RuleTable, Span, TokenType,
};
