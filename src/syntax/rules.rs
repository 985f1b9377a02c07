//! Pattern rules for note highlighting
//!
//! A [`RuleTable`] is an ordered list of compiled patterns. Every rule
//! is scanned over the whole line in table order, and a later rule
//! overwrites whatever an earlier rule assigned to the same offsets.
//! The order is therefore the override priority: HTML rules come first
//! so markdown emphasis around inline HTML can restyle it.

use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;

use super::span::{CharIndex, FormatBuffer, Span};
use super::tokens::TokenType;
use crate::error::{HighlightError, Result};

/// Quantifier greediness for a rule's pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Longest match, quantifiers as written
    Greedy,
    /// Shortest match, every quantifier made lazy
    #[default]
    Minimal,
}

/// What a rule does with its match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Assign the whole match to one token type
    Token(TokenType),
    /// Split `name="value"` into a name span and an unquoted value span
    ///
    /// The value is capture group 2 and must include its quotes.
    HtmlAttribute,
}

impl RuleKind {
    /// Name used in rule table files and error messages
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Token(token) => token.name(),
            RuleKind::HtmlAttribute => "HtmlAttribute",
        }
    }

    /// Parse a rule kind from its name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HtmlAttribute" => Some(RuleKind::HtmlAttribute),
            _ => TokenType::from_name(name).map(RuleKind::Token),
        }
    }
}

impl From<TokenType> for RuleKind {
    fn from(token: TokenType) -> Self {
        RuleKind::Token(token)
    }
}

/// A single compiled pattern rule
#[derive(Debug, Clone)]
pub struct RuleEntry {
    /// Match handler
    pub kind: RuleKind,
    /// Compiled pattern, with greediness already applied
    pub pattern: Regex,
    /// Greediness the pattern was compiled with
    pub mode: MatchMode,
}

impl RuleEntry {
    /// Compile a rule, failing if the pattern is invalid
    pub fn new(kind: impl Into<RuleKind>, pattern: &str, mode: MatchMode) -> Result<Self> {
        let kind = kind.into();
        let regex = RegexBuilder::new(pattern)
            .swap_greed(mode == MatchMode::Minimal)
            .build()
            .map_err(|source| HighlightError::InvalidPattern {
                token: kind.name(),
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            kind,
            pattern: regex,
            mode,
        })
    }

    /// Find the first match at or after a byte position
    ///
    /// `^` still only matches at the start of the line.
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        if start > text.len() {
            return None;
        }
        self.pattern.find_at(text, start).map(|m| (m.start(), m.end()))
    }

    /// Scan the whole line, formatting every match
    fn apply(&self, text: &str, index: &CharIndex, buf: &mut FormatBuffer) {
        let mut pos = 0;
        while pos <= text.len() {
            let (start, end) = match self.kind {
                RuleKind::Token(token) => {
                    let Some((start, end)) = self.find_at(text, pos) else {
                        break;
                    };
                    let offset = index.char_at(start);
                    buf.set(offset, index.char_at(end) - offset, token);
                    (start, end)
                }
                RuleKind::HtmlAttribute => {
                    let Some(caps) = self.pattern.captures_at(text, pos) else {
                        break;
                    };
                    let Some(whole) = caps.get(0) else { break };
                    let offset = index.char_at(whole.start());
                    match caps.get(2) {
                        Some(value) => {
                            let value_start = index.char_at(value.start());
                            let value_len = index.char_at(value.end()) - value_start;
                            buf.set(
                                offset,
                                value_start.saturating_sub(offset + 1),
                                TokenType::HtmlAttributeName,
                            );
                            buf.set(
                                value_start + 1,
                                value_len.saturating_sub(2),
                                TokenType::HtmlAttributeValue,
                            );
                        }
                        None => {
                            let len = index.char_at(whole.end()) - offset;
                            buf.set(offset, len, TokenType::HtmlAttributeName);
                        }
                    }
                    (whole.start(), whole.end())
                }
            };

            if end > start {
                pos = end;
            } else if end >= text.len() {
                break;
            } else {
                // empty match, step over one char
                pos = index.byte_at(index.char_at(end) + 1);
            }
        }
    }
}

#[derive(Deserialize)]
struct RuleFile {
    #[serde(default, rename = "rule")]
    rules: Vec<RuleSpec>,
}

#[derive(Deserialize)]
struct RuleSpec {
    token: String,
    pattern: String,
    #[serde(default)]
    mode: MatchMode,
}

/// Immutable, ordered set of pattern rules
#[derive(Debug, Clone)]
pub struct RuleTable {
    entries: Vec<RuleEntry>,
}

impl RuleTable {
    /// Compile an ordered list of rules
    ///
    /// Any invalid pattern fails the whole table.
    pub fn new<'a, K, I>(rules: I) -> Result<Self>
    where
        K: Into<RuleKind>,
        I: IntoIterator<Item = (K, &'a str, MatchMode)>,
    {
        let entries = rules
            .into_iter()
            .map(|(kind, pattern, mode)| RuleEntry::new(kind, pattern, mode))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(rules = entries.len(), "compiled rule table");
        Ok(Self { entries })
    }

    /// The built-in markdown + inline HTML table
    pub fn markdown() -> Result<Self> {
        Self::new(super::builtin::markdown_rules())
    }

    /// Parse a table from TOML `[[rule]]` entries
    ///
    /// ```toml
    /// [[rule]]
    /// token = "HtmlTag"
    /// pattern = '<\w+'
    /// mode = "greedy"
    /// ```
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: RuleFile = toml::from_str(text).map_err(HighlightError::RuleTable)?;
        let mut rules = Vec::with_capacity(file.rules.len());
        for rule in &file.rules {
            let kind = RuleKind::from_name(&rule.token)
                .ok_or_else(|| HighlightError::UnknownToken(rule.token.clone()))?;
            rules.push((kind, rule.pattern.as_str(), rule.mode));
        }
        Self::new(rules)
    }

    /// Load a TOML rule table from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        tracing::info!("Loading rule table from {}", path.display());
        Self::from_toml(&text)
    }

    /// Rules in priority order (later overrides earlier)
    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every rule in table order to a line's format buffer
    pub fn apply(&self, text: &str, index: &CharIndex, buf: &mut FormatBuffer) {
        for entry in &self.entries {
            entry.apply(text, index, buf);
        }
    }

    /// Classify a single line with no block state
    pub fn classify(&self, text: &str) -> Vec<Span> {
        let index = CharIndex::new(text);
        let mut buf = FormatBuffer::new(index.len());
        self.apply(text, &index, &mut buf);
        buf.spans()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_rule() {
        let rule = RuleEntry::new(TokenType::MathSpan, r"\d+", MatchMode::Greedy).unwrap();
        assert_eq!(rule.find_at("abc 123 def", 0), Some((4, 7)));
        assert_eq!(rule.find_at("abc 123 def", 5), Some((5, 7)));
        assert_eq!(rule.find_at("no numbers", 0), None);
    }

    #[test]
    fn test_anchor_only_at_line_start() {
        let rule = RuleEntry::new(TokenType::UnorderedList, r"^- ", MatchMode::Minimal).unwrap();
        assert_eq!(rule.find_at("- a - b", 0), Some((0, 2)));
        assert_eq!(rule.find_at("- a - b", 1), None);
    }

    #[test]
    fn test_minimal_vs_greedy() {
        let table = RuleTable::new([(TokenType::CodeSpan, "`.+`", MatchMode::Minimal)]).unwrap();
        assert_eq!(
            table.classify("`a` and `b`"),
            vec![
                Span::new(TokenType::CodeSpan, 0, 3),
                Span::new(TokenType::CodeSpan, 8, 3),
            ]
        );

        let table = RuleTable::new([(TokenType::CodeSpan, "`.+`", MatchMode::Greedy)]).unwrap();
        assert_eq!(
            table.classify("`a` and `b`"),
            vec![Span::new(TokenType::CodeSpan, 0, 11)]
        );
    }

    #[test]
    fn test_invalid_pattern_fails_table() {
        let result = RuleTable::new([
            (TokenType::Bold, r"\*\S+\*", MatchMode::Minimal),
            (TokenType::Link, r"[unclosed", MatchMode::Minimal),
        ]);
        match result {
            Err(HighlightError::InvalidPattern { token, pattern, .. }) => {
                assert_eq!(token, "Link");
                assert_eq!(pattern, "[unclosed");
            }
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_later_rule_overrides() {
        let table = RuleTable::new([
            (TokenType::HtmlTag, r"<\w+>", MatchMode::Greedy),
            (TokenType::Bolder, r"\*\*.+\*\*", MatchMode::Minimal),
        ])
        .unwrap();
        assert_eq!(
            table.classify("<b>**x**"),
            vec![
                Span::new(TokenType::HtmlTag, 0, 3),
                Span::new(TokenType::Bolder, 3, 5),
            ]
        );
        assert_eq!(
            table.classify("**<b>**"),
            vec![Span::new(TokenType::Bolder, 0, 7)]
        );
    }

    #[test]
    fn test_html_attribute_split() {
        let table = RuleTable::new([(
            RuleKind::HtmlAttribute,
            r#"(\w+(?::\w+)?)=("[^"]+"|'[^']+')"#,
            MatchMode::Minimal,
        )])
        .unwrap();
        // <a href="x.md">
        // 0123456789012345
        assert_eq!(
            table.classify(r#"<a href="x.md">"#),
            vec![
                Span::new(TokenType::HtmlAttributeName, 3, 4),
                Span::new(TokenType::HtmlAttributeValue, 9, 4),
            ]
        );
    }

    #[test]
    fn test_empty_matches_terminate() {
        let table = RuleTable::new([(TokenType::Bold, r"x*", MatchMode::Greedy)]).unwrap();
        assert_eq!(
            table.classify("axxb"),
            vec![Span::new(TokenType::Bold, 1, 2)]
        );
    }

    #[test]
    fn test_offsets_in_code_points() {
        let table = RuleTable::new([(TokenType::CodeSpan, "`[^`]+`", MatchMode::Greedy)]).unwrap();
        assert_eq!(
            table.classify("héé `ç`"),
            vec![Span::new(TokenType::CodeSpan, 4, 3)]
        );
    }

    #[test]
    fn test_from_toml() {
        let text = r#"
[[rule]]
token = "HtmlTag"
pattern = '<\w+'
mode = "greedy"

[[rule]]
token = "Bolder"
pattern = '\*\*.+\*\*'
"#;
        let table = RuleTable::from_toml(text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].kind, RuleKind::Token(TokenType::HtmlTag));
        assert_eq!(table.entries()[0].mode, MatchMode::Greedy);
        assert_eq!(table.entries()[1].mode, MatchMode::Minimal);
    }

    #[test]
    fn test_from_toml_unknown_token() {
        let text = r#"
[[rule]]
token = "Heading"
pattern = '^#'
"#;
        assert!(matches!(
            RuleTable::from_toml(text),
            Err(HighlightError::UnknownToken(name)) if name == "Heading"
        ));
    }

    #[test]
    fn test_rule_kind_names() {
        assert_eq!(RuleKind::from_name("HtmlAttribute"), Some(RuleKind::HtmlAttribute));
        assert_eq!(
            RuleKind::from_name("TaskWip"),
            Some(RuleKind::Token(TokenType::TaskWip))
        );
        assert_eq!(RuleKind::from_name("Nope"), None);
    }
}
