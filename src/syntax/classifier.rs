//! Per-line classification
//!
//! This module provides the [`LineClassifier`] that combines the
//! fenced code tracker, the rule table and the HTML comment tracker
//! into a single pass over one line.

use std::sync::Arc;

use super::block::{self, BlockState};
use super::rules::RuleTable;
use super::span::{CharIndex, FormatBuffer, Span};
use crate::spelling::WordSpan;

/// Result of highlighting a single line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineHighlight {
    /// Typed spans, ordered by offset and non-overlapping
    pub spans: Vec<Span>,
    /// State at end of line (entry state of the next line)
    pub exit_state: BlockState,
    /// Whether the line belongs to a fenced code block
    pub fenced: bool,
    /// Misspelled words, if spell-checking ran on this line
    pub misspellings: Vec<WordSpan>,
}

/// Classifies lines against a shared rule table
#[derive(Debug, Clone)]
pub struct LineClassifier {
    rules: Arc<RuleTable>,
}

impl LineClassifier {
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules }
    }

    /// Classifier over the built-in markdown table
    pub fn markdown() -> crate::error::Result<Self> {
        Ok(Self::new(Arc::new(RuleTable::markdown()?)))
    }

    pub fn rules(&self) -> &Arc<RuleTable> {
        &self.rules
    }

    /// Classify one line given the exit state of the line before it
    ///
    /// A line consumed by fenced code skips the rule table and comment
    /// tracking entirely.
    pub fn classify(&self, text: &str, entry: BlockState) -> LineHighlight {
        let index = CharIndex::new(text);
        let mut buf = FormatBuffer::new(index.len());

        if let Some(exit_state) = block::fenced_code(text, &index, entry, &mut buf) {
            return LineHighlight {
                spans: buf.spans(),
                exit_state,
                fenced: true,
                misspellings: Vec::new(),
            };
        }

        if !text.is_empty() {
            self.rules.apply(text, &index, &mut buf);
        }
        let exit_state = block::html_comment(text, &index, entry, &mut buf);

        LineHighlight {
            spans: buf.spans(),
            exit_state,
            fenced: false,
            misspellings: Vec::new(),
        }
    }
}
