//! Spell-checker capability and an in-memory word list
//!
//! The highlighter only ever talks to a [`SpellChecker`]. A real
//! editor plugs in its dictionary engine; [`WordList`] covers plain
//! word lists plus personal and session additions.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use super::tokenizer::normalize_apostrophes;
use crate::error::Result;

/// Maximum edit distance for a suggestion
const MAX_SUGGESTION_DISTANCE: usize = 2;
/// Maximum number of suggestions returned
const MAX_SUGGESTIONS: usize = 10;

/// Dictionary operations consumed by the highlighter
pub trait SpellChecker {
    /// Whether `word` is spelled correctly
    fn spell(&self, word: &str) -> bool;

    /// Replacement candidates for `word`, best first
    fn suggestions(&self, word: &str) -> Vec<String>;

    /// Permanently accept `word`
    fn add_personal(&mut self, word: &str);

    /// Accept `words` until removed or the session ends
    fn add_to_session(&mut self, words: &[String]);

    /// Stop accepting session `words`
    fn remove_from_session(&mut self, words: &[String]);
}

/// Word list backed dictionary
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
    personal: HashSet<String>,
    session: HashSet<String>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an iterator of accepted words
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| normalize_apostrophes(w.as_ref()).into_owned())
                .collect(),
            ..Self::default()
        }
    }

    /// Parse one word per line, skipping blanks and `#` comments
    pub fn parse(text: &str) -> Self {
        Self::from_words(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Load a word list file
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let list = Self::parse(&text);
        tracing::info!(words = list.len(), "Loaded word list from {}", path.display());
        Ok(list)
    }

    /// Number of base words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn known(&self) -> impl Iterator<Item = &String> {
        self.words
            .iter()
            .chain(self.personal.iter())
            .chain(self.session.iter())
    }

    fn contains(&self, word: &str) -> bool {
        self.words.contains(word) || self.personal.contains(word) || self.session.contains(word)
    }
}

impl SpellChecker for WordList {
    fn spell(&self, word: &str) -> bool {
        let word = normalize_apostrophes(word);
        if self.contains(&word) {
            return true;
        }
        let lower = word.to_lowercase();
        lower != *word && self.contains(&lower)
    }

    fn suggestions(&self, word: &str) -> Vec<String> {
        let target = normalize_apostrophes(word).to_lowercase();
        let mut ranked: BTreeSet<(usize, &String)> = BTreeSet::new();
        for candidate in self.known() {
            let distance = edit_distance(&target, &candidate.to_lowercase());
            if distance > 0 && distance <= MAX_SUGGESTION_DISTANCE {
                ranked.insert((distance, candidate));
            }
        }
        ranked
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, candidate)| candidate.clone())
            .collect()
    }

    fn add_personal(&mut self, word: &str) {
        self.personal.insert(normalize_apostrophes(word).into_owned());
    }

    fn add_to_session(&mut self, words: &[String]) {
        for word in words {
            self.session.insert(normalize_apostrophes(word).into_owned());
        }
    }

    fn remove_from_session(&mut self, words: &[String]) {
        for word in words {
            self.session.remove(&*normalize_apostrophes(word));
        }
    }
}

/// Levenshtein distance over code points
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ca != cb);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diag + cost);
            diag = above;
        }
    }
    row[b.len()]
}
