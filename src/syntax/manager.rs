//! Note highlighting manager
//!
//! This module provides the [`NoteHighlighter`] that an editor view
//! calls for every changed line, and the per-document
//! [`HighlightCache`] that keeps entry/exit states chained and only
//! re-highlights as far as a state change ripples.

use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

use super::block::BlockState;
use super::classifier::{LineClassifier, LineHighlight};
use super::rules::RuleTable;
use crate::config::Config;
use crate::error::Result;
use crate::spelling::{self, SpellChecker, TokenizerOptions, WordList};

/// Cursor position in a document, in code points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

/// Editor-facing highlighter: classification plus live spell-check
pub struct NoteHighlighter {
    classifier: LineClassifier,
    dictionary: Option<Box<dyn SpellChecker>>,
    options: TokenizerOptions,
    /// Whether highlighting is enabled
    pub enabled: bool,
    /// Whether lines are spell-checked as they are highlighted
    pub live_spell_check: bool,
    typing_paused: bool,
}

impl NoteHighlighter {
    /// Create a highlighter with no dictionary
    pub fn new(classifier: LineClassifier) -> Self {
        Self {
            classifier,
            dictionary: None,
            options: TokenizerOptions::default(),
            enabled: true,
            live_spell_check: true,
            typing_paused: false,
        }
    }

    /// Build from configuration
    ///
    /// A bad rule table is an error. A missing dictionary only
    /// disables spell-checking.
    pub fn from_config(config: &Config) -> Result<Self> {
        let rules = match &config.rules {
            Some(path) => RuleTable::from_path(path)?,
            None => RuleTable::markdown()?,
        };
        let mut highlighter = Self::new(LineClassifier::new(Arc::new(rules)));
        highlighter.enabled = config.highlighting;
        highlighter.live_spell_check = config.live_spell_check;
        highlighter.options = config.tokenizer_options();
        highlighter.dictionary = match &config.dictionary {
            Some(path) => load_dictionary(path),
            None => {
                tracing::debug!("No dictionary configured, spell-check disabled");
                None
            }
        };
        Ok(highlighter)
    }

    /// Attach a dictionary
    pub fn with_dictionary(mut self, dictionary: Box<dyn SpellChecker>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn set_dictionary(&mut self, dictionary: Option<Box<dyn SpellChecker>>) {
        self.dictionary = dictionary;
    }

    pub fn dictionary(&self) -> Option<&dyn SpellChecker> {
        self.dictionary.as_deref()
    }

    /// Mutable dictionary access for personal and session additions
    pub fn dictionary_mut(&mut self) -> Option<&mut (dyn SpellChecker + 'static)> {
        self.dictionary.as_deref_mut()
    }

    pub fn set_options(&mut self, options: TokenizerOptions) {
        self.options = options;
    }

    pub fn options(&self) -> TokenizerOptions {
        self.options
    }

    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Whether a misspelling under the cursor is reported while typing
    pub fn set_typing_paused(&mut self, paused: bool) {
        self.typing_paused = paused;
    }

    /// Toggle highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Highlight one line
    ///
    /// `cursor_column` is the cursor position if it is on this line.
    /// While typing, a misspelled word ending right at the cursor is
    /// not reported yet.
    pub fn highlight_line(
        &self,
        text: &str,
        entry: BlockState,
        cursor_column: Option<usize>,
    ) -> LineHighlight {
        if !self.enabled {
            return LineHighlight {
                exit_state: entry,
                ..LineHighlight::default()
            };
        }

        let mut result = self.classifier.classify(text, entry);

        if self.live_spell_check && !result.fenced && !text.is_empty() {
            if let Some(dictionary) = self.dictionary.as_deref() {
                result.misspellings = spelling::misspellings(text, self.options, |word| {
                    dictionary.spell(word)
                })
                .into_iter()
                .filter(|word| self.typing_paused || cursor_column != Some(word.end()))
                .collect();
            }
        }

        result
    }
}

fn load_dictionary(path: &Path) -> Option<Box<dyn SpellChecker>> {
    match WordList::from_path(path) {
        Ok(list) => Some(Box::new(list)),
        Err(e) => {
            tracing::warn!(
                "Dictionary {} unavailable, spell-check disabled: {}",
                path.display(),
                e
            );
            None
        }
    }
}

/// Per-document highlighting cache
#[derive(Debug, Clone, Default)]
pub struct HighlightCache {
    /// Cached result per line (None = not computed)
    lines: Vec<Option<LineHighlight>>,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cached highlight of a line
    pub fn line(&self, index: usize) -> Option<&LineHighlight> {
        self.lines.get(index).and_then(|l| l.as_ref())
    }

    /// Cached exit state of a line
    pub fn exit_state(&self, index: usize) -> Option<BlockState> {
        self.line(index).map(|l| l.exit_state)
    }

    /// Entry state of a line, from its predecessor's exit state
    fn entry_state(&self, index: usize) -> BlockState {
        match index {
            0 => BlockState::NORMAL,
            _ => self.exit_state(index - 1).unwrap_or_default(),
        }
    }

    /// Invalidate entire cache
    pub fn invalidate_all(&mut self) {
        self.lines.clear();
    }

    /// Make room for lines inserted at `at`
    ///
    /// Follow up with [`edit_line`](Self::edit_line) at `at`.
    pub fn insert_lines(&mut self, at: usize, count: usize) {
        let at = at.min(self.lines.len());
        self.lines.splice(at..at, std::iter::repeat(None).take(count));
    }

    /// Drop the cache entries of removed lines
    ///
    /// Follow up with [`edit_line`](Self::edit_line) at `at`.
    pub fn remove_lines(&mut self, at: usize, count: usize) {
        let start = at.min(self.lines.len());
        let end = at.saturating_add(count).min(self.lines.len());
        self.lines.drain(start..end);
    }

    /// Highlight a whole document from scratch
    pub fn highlight_all<S: AsRef<str>>(
        &mut self,
        highlighter: &NoteHighlighter,
        lines: &[S],
        cursor: Option<Cursor>,
    ) -> Range<usize> {
        self.lines = vec![None; lines.len()];
        self.edit_line(highlighter, lines, 0, cursor)
    }

    /// Re-highlight an edited line and ripple forward
    ///
    /// Continues to the following line for as long as a line's new
    /// exit state differs from its cached one. Returns the range of
    /// lines that were re-highlighted.
    pub fn edit_line<S: AsRef<str>>(
        &mut self,
        highlighter: &NoteHighlighter,
        lines: &[S],
        index: usize,
        cursor: Option<Cursor>,
    ) -> Range<usize> {
        self.lines.resize(lines.len(), None);

        let mut current = index;
        while current < lines.len() {
            let entry = self.entry_state(current);
            let column = cursor.filter(|c| c.line == current).map(|c| c.column);
            let result = highlighter.highlight_line(lines[current].as_ref(), entry, column);

            let previous = self.exit_state(current);
            let exit = result.exit_state;
            self.lines[current] = Some(result);
            current += 1;

            if previous == Some(exit) {
                break;
            }
            tracing::trace!(line = current - 1, ?previous, ?exit, "exit state changed");
        }

        index.min(current)..current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spelling::WordSpan;
    use crate::syntax::span::Span;
    use crate::syntax::tokens::TokenType;

    fn highlighter() -> NoteHighlighter {
        NoteHighlighter::new(LineClassifier::markdown().unwrap())
    }

    fn with_words(words: &[&str]) -> NoteHighlighter {
        highlighter().with_dictionary(Box::new(WordList::from_words(words.iter())))
    }

    #[test]
    fn test_disabled_passes_state_through() {
        let mut hl = highlighter();
        hl.toggle();
        let result = hl.highlight_line("```", BlockState::IN_COMMENT, None);
        assert!(result.spans.is_empty());
        assert_eq!(result.exit_state, BlockState::IN_COMMENT);
    }

    #[test]
    fn test_no_dictionary_no_misspellings() {
        let result = highlighter().highlight_line("qwzx vbnm", BlockState::NORMAL, None);
        assert!(result.misspellings.is_empty());
    }

    #[test]
    fn test_misspellings_reported() {
        let hl = with_words(&["some", "text"]);
        let result = hl.highlight_line("some txet here", BlockState::NORMAL, None);
        assert_eq!(
            result.misspellings,
            vec![
                WordSpan { offset: 5, length: 4 },
                WordSpan { offset: 10, length: 4 },
            ]
        );
    }

    #[test]
    fn test_spell_check_skipped_in_code() {
        let hl = with_words(&[]);
        let result = hl.highlight_line("qwzx", BlockState::IN_CODE, None);
        assert!(result.fenced);
        assert!(result.misspellings.is_empty());
    }

    #[test]
    fn test_word_at_cursor_not_reported_while_typing() {
        let mut hl = with_words(&["hello"]);
        let result = hl.highlight_line("hello wor", BlockState::NORMAL, Some(9));
        assert!(result.misspellings.is_empty());

        hl.set_typing_paused(true);
        let result = hl.highlight_line("hello wor", BlockState::NORMAL, Some(9));
        assert_eq!(result.misspellings, vec![WordSpan { offset: 6, length: 3 }]);
    }

    #[test]
    fn test_live_spell_check_off() {
        let mut hl = with_words(&[]);
        hl.live_spell_check = false;
        let result = hl.highlight_line("qwzx", BlockState::NORMAL, None);
        assert!(result.misspellings.is_empty());
    }

    #[test]
    fn test_dictionary_session_additions() {
        let mut hl = with_words(&[]);
        hl.dictionary_mut()
            .unwrap()
            .add_to_session(&["zettel".to_string()]);
        let result = hl.highlight_line("zettel", BlockState::NORMAL, None);
        assert!(result.misspellings.is_empty());
    }

    #[test]
    fn test_highlight_all_chains_states() {
        let hl = highlighter();
        let lines = ["```", "code", "```", "*ab*"];
        let mut cache = HighlightCache::new();
        assert_eq!(cache.highlight_all(&hl, &lines, None), 0..4);
        assert_eq!(cache.exit_state(0), Some(BlockState::IN_CODE));
        assert_eq!(cache.exit_state(1), Some(BlockState::IN_CODE));
        assert_eq!(cache.exit_state(2), Some(BlockState::NORMAL));
        assert_eq!(
            cache.line(3).unwrap().spans,
            vec![Span::new(TokenType::Bold, 0, 4)]
        );
    }

    #[test]
    fn test_edit_without_state_change_stops() {
        let hl = highlighter();
        let mut lines = vec!["a", "b", "c", "d"];
        let mut cache = HighlightCache::new();
        cache.highlight_all(&hl, &lines, None);

        lines[1] = "*b*";
        assert_eq!(cache.edit_line(&hl, &lines, 1, None), 1..2);
    }

    #[test]
    fn test_edit_opening_fence_ripples_to_end() {
        let hl = highlighter();
        let mut lines = vec!["intro", "a", "b", "c"];
        let mut cache = HighlightCache::new();
        cache.highlight_all(&hl, &lines, None);

        lines[0] = "```";
        assert_eq!(cache.edit_line(&hl, &lines, 0, None), 0..4);
        assert_eq!(cache.exit_state(3), Some(BlockState::IN_CODE));

        lines[0] = "intro";
        assert_eq!(cache.edit_line(&hl, &lines, 0, None), 0..4);
        assert_eq!(cache.exit_state(3), Some(BlockState::NORMAL));
    }

    #[test]
    fn test_ripple_stops_at_fixed_point() {
        let hl = highlighter();
        let mut lines = vec!["x", "<!-- a", "b -->", "c", "d"];
        let mut cache = HighlightCache::new();
        cache.highlight_all(&hl, &lines, None);

        // closing the comment one line early only touches two lines
        lines[1] = "<!-- a -->";
        assert_eq!(cache.edit_line(&hl, &lines, 1, None), 1..3);
        assert_eq!(cache.exit_state(2), Some(BlockState::NORMAL));
    }

    #[test]
    fn test_insert_and_remove_lines() {
        let hl = highlighter();
        let mut lines = vec!["a", "b"];
        let mut cache = HighlightCache::new();
        cache.highlight_all(&hl, &lines, None);

        lines.insert(1, "```");
        cache.insert_lines(1, 1);
        assert_eq!(cache.edit_line(&hl, &lines, 1, None), 1..3);
        assert_eq!(cache.exit_state(2), Some(BlockState::IN_CODE));
        assert_eq!(
            cache.line(2).unwrap().spans,
            vec![Span::new(TokenType::CodeSpan, 0, 1)]
        );

        lines.remove(1);
        cache.remove_lines(1, 1);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.edit_line(&hl, &lines, 1, None), 1..2);
        assert!(cache.line(1).unwrap().spans.is_empty());
    }

    #[test]
    fn test_cursor_only_applies_to_its_line() {
        let hl = with_words(&[]);
        let lines = ["zz", "zz"];
        let mut cache = HighlightCache::new();
        cache.highlight_all(&hl, &lines, Some(Cursor { line: 1, column: 2 }));
        assert_eq!(cache.line(0).unwrap().misspellings.len(), 1);
        assert!(cache.line(1).unwrap().misspellings.is_empty());
    }
}
