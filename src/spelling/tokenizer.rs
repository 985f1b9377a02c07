//! Word segmentation for spell-checking
//!
//! Letters, digits and combining marks build words. A single `-`, `.`
//! or `'` between word characters keeps the word together, so
//! `well-known`, `e.g` and `don't` are one word each, while `--` or any
//! other punctuation splits. All offsets are code points.

use std::borrow::Cow;
use std::ops::Range;

use unicode_normalization::char::is_combining_mark;

use crate::syntax::span::CharIndex;

/// Separators allowed inside a word, one at a time
const INTERIOR_SEPARATORS: [char; 3] = ['-', '.', '\''];

/// Which words are exempt from checking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Skip words containing a digit
    pub skip_numeric: bool,
    /// Skip words with no lowercase letter
    pub skip_uppercase: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            skip_numeric: false,
            skip_uppercase: true,
        }
    }
}

/// Location of a word within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordSpan {
    pub offset: usize,
    pub length: usize,
}

impl WordSpan {
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// A candidate word for spell-checking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Code point offset in the line
    pub offset: usize,
    /// Length in code points
    pub length: usize,
    /// Contains a digit and numeric words are skipped
    pub is_numeric: bool,
    /// Has no lowercase letter and uppercase words are skipped
    pub is_uppercase_only: bool,
    bytes: Range<usize>,
}

impl Word {
    /// The word's text within its line
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.bytes.clone()]
    }

    /// Whether the word is exempt from checking
    pub fn is_skipped(&self) -> bool {
        self.is_numeric || self.is_uppercase_only
    }

    pub fn span(&self) -> WordSpan {
        WordSpan {
            offset: self.offset,
            length: self.length,
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || is_combining_mark(c)
}

/// Iterator over the words of a line from a starting offset
pub struct Words {
    index: CharIndex,
    chars: Vec<char>,
    pos: usize,
    options: TokenizerOptions,
}

impl Words {
    pub fn new(line: &str, start_offset: usize, options: TokenizerOptions) -> Self {
        let index = CharIndex::new(line);
        let chars: Vec<char> = line.chars().collect();
        Self {
            pos: start_offset.min(chars.len()),
            index,
            chars,
            options,
        }
    }

    fn word(&self, offset: usize, length: usize, numeric: bool, upper: bool) -> Word {
        Word {
            offset,
            length,
            is_numeric: numeric,
            is_uppercase_only: upper,
            bytes: self.index.byte_at(offset)..self.index.byte_at(offset + length),
        }
    }
}

impl Iterator for Words {
    type Item = Word;

    fn next(&mut self) -> Option<Word> {
        let mut in_word = false;
        let mut separators = 0usize;
        let mut length = 0usize;
        let mut start: Option<usize> = None;
        let mut numeric = false;
        let mut upper = self.options.skip_uppercase;

        while self.pos < self.chars.len() {
            let c = self.chars[self.pos];
            let i = self.pos;
            self.pos += 1;
            let mut done = false;

            if is_word_char(c) {
                in_word = true;
                separators = 0;
                length += 1;
                start.get_or_insert(i);
                if c.is_numeric() {
                    numeric = self.options.skip_numeric;
                } else if c.is_lowercase() {
                    upper = false;
                }
            } else if c.is_whitespace() && in_word {
                in_word = false;
                done = true;
                if separators > 0 {
                    length -= 1;
                }
            } else {
                // `--` splits words while `well-known` stays whole
                separators += 1;
                if in_word {
                    if separators == 1 && !INTERIOR_SEPARATORS.contains(&c) {
                        in_word = false;
                        done = true;
                    } else if separators > 1 {
                        in_word = false;
                        done = true;
                        length -= 1;
                    } else {
                        length += 1;
                    }
                }
            }

            if in_word && self.pos == self.chars.len() {
                done = true;
                if separators > 0 {
                    length -= 1;
                }
            }

            if done {
                if let Some(offset) = start {
                    return Some(self.word(offset, length, numeric, upper));
                }
            }
        }
        None
    }
}

/// Replace typographic right single quotes with ASCII apostrophes
pub fn normalize_apostrophes(word: &str) -> Cow<'_, str> {
    if word.contains('\u{2019}') {
        Cow::Owned(word.replace('\u{2019}', "'"))
    } else {
        Cow::Borrowed(word)
    }
}

/// Find the first misspelled word at or after `start_offset`
///
/// Words flagged as numeric or uppercase-only are never reported.
pub fn check<F>(
    line: &str,
    start_offset: usize,
    options: TokenizerOptions,
    spell: F,
) -> Option<WordSpan>
where
    F: Fn(&str) -> bool,
{
    Words::new(line, start_offset, options)
        .filter(|word| !word.is_skipped())
        .find(|word| !spell(&*normalize_apostrophes(word.text(line))))
        .map(|word| word.span())
}

/// Every misspelled word on a line, in order
pub fn misspellings<F>(line: &str, options: TokenizerOptions, spell: F) -> Vec<WordSpan>
where
    F: Fn(&str) -> bool,
{
    let mut found = Vec::new();
    let mut start = 0;
    while let Some(span) = check(line, start, options, &spell) {
        start = span.end();
        found.push(span);
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str, options: TokenizerOptions) -> Vec<String> {
        Words::new(line, 0, options)
            .map(|w| w.text(line).to_string())
            .collect()
    }

    fn plain() -> TokenizerOptions {
        TokenizerOptions {
            skip_numeric: false,
            skip_uppercase: false,
        }
    }

    #[test]
    fn test_interior_separators_keep_word() {
        assert_eq!(
            words("well-known e.g don't", plain()),
            vec!["well-known", "e.g", "don't"]
        );
    }

    #[test]
    fn test_double_separator_splits() {
        assert_eq!(words("word--other", plain()), vec!["word", "other"]);
        assert_eq!(words("a-.b", plain()), vec!["a", "b"]);
    }

    #[test]
    fn test_other_punctuation_splits() {
        assert_eq!(words("one,two (three)", plain()), vec!["one", "two", "three"]);
        assert_eq!(words("don\u{2019}t", plain()), vec!["don", "t"]);
    }

    #[test]
    fn test_trailing_separator_excluded() {
        assert_eq!(words("end. next-", plain()), vec!["end", "next"]);
        let all: Vec<Word> = Words::new("hi.", 0, plain()).collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].offset, 0);
        assert_eq!(all[0].length, 2);
    }

    #[test]
    fn test_offsets_are_code_points() {
        let line = "über naïve";
        let all: Vec<Word> = Words::new(line, 0, plain()).collect();
        assert_eq!(all[1].offset, 5);
        assert_eq!(all[1].length, 5);
        assert_eq!(all[1].text(line), "naïve");
    }

    #[test]
    fn test_combining_mark_extends_word() {
        let line = "cafe\u{301} ok";
        assert_eq!(words(line, plain()), vec!["cafe\u{301}", "ok"]);
    }

    #[test]
    fn test_flags() {
        let options = TokenizerOptions {
            skip_numeric: true,
            skip_uppercase: true,
        };
        let all: Vec<Word> = Words::new("word123 ALLCAPS Mixed 42", 0, options).collect();
        assert!(all[0].is_numeric);
        assert!(!all[0].is_uppercase_only);
        assert!(all[1].is_uppercase_only);
        assert!(!all[2].is_skipped());
        assert!(all[3].is_numeric);
    }

    #[test]
    fn test_flags_disabled() {
        let all: Vec<Word> = Words::new("word123 ALLCAPS", 0, plain()).collect();
        assert!(!all[0].is_skipped());
        assert!(!all[1].is_skipped());
    }

    #[test]
    fn test_check_skips_flagged_words() {
        let options = TokenizerOptions {
            skip_numeric: true,
            skip_uppercase: true,
        };
        let spell = |w: &str| w == "well-known" || w == "don't";
        assert_eq!(check("well-known word123 ALLCAPS don't", 0, options, spell), None);
    }

    #[test]
    fn test_check_reports_first_invalid() {
        let spell = |w: &str| w != "teh" && w != "wrod";
        let line = "a teh b wrod";
        assert_eq!(
            check(line, 0, plain(), spell),
            Some(WordSpan { offset: 2, length: 3 })
        );
        assert_eq!(
            check(line, 5, plain(), spell),
            Some(WordSpan { offset: 8, length: 4 })
        );
        assert_eq!(
            misspellings(line, plain(), spell),
            vec![
                WordSpan { offset: 2, length: 3 },
                WordSpan { offset: 8, length: 4 },
            ]
        );
    }

    #[test]
    fn test_normalize_apostrophes() {
        assert_eq!(normalize_apostrophes("it\u{2019}s"), "it's");
        assert!(matches!(normalize_apostrophes("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_start_past_end() {
        assert_eq!(check("abc", 10, plain(), |_| false), None);
        assert_eq!(check("", 0, plain(), |_| false), None);
    }
}
