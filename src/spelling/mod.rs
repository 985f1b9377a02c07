//! Spell-check support
//!
//! The word tokenizer segments a line into checkable words; the actual
//! spelling decision comes from an injected [`SpellChecker`].

mod dictionary;
mod tokenizer;

pub use dictionary::{SpellChecker, WordList};
pub use tokenizer::{
    check, misspellings, normalize_apostrophes, TokenizerOptions, Word, WordSpan, Words,
};
