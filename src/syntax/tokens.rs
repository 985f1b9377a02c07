//! Token types for note highlighting
//!
//! This module defines the semantic token types recognized in
//! markdown notes with inlined HTML. Mapping a token type to a
//! visual style is left to the embedding editor's theme.

/// Semantic token types for markdown and inline HTML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// `*emphasis*`
    Bold,
    /// `**strong**`
    Bolder,
    /// `_emphasis_`
    Italic,
    /// `__strong emphasis__`
    Italicer,
    /// `~~struck~~`
    Strikethrough,
    /// `[text](url)`
    Link,
    /// Bare `http://` or `https://` URLs
    Autolink,
    /// Inline code and fenced code block lines
    CodeSpan,
    /// `$math$`
    MathSpan,
    /// `- item`, `* item`, `+ item`
    UnorderedList,
    /// `1. item`
    OrderedList,
    /// `- [x] done`
    TaskDone,
    /// `- [w] in progress`
    TaskWip,
    /// `- [ ] todo`
    TaskTodo,
    /// `<tag`, `</tag>`, `>`
    HtmlTag,
    /// Attribute name in `name="value"`
    HtmlAttributeName,
    /// Attribute value in `name="value"`, without quotes
    HtmlAttributeValue,
    /// `&amp;`, `&#38;`
    HtmlEntity,
    /// `<!-- ... -->`, possibly spanning lines
    HtmlComment,
}

impl TokenType {
    /// Every token type, in declaration order
    pub const ALL: [TokenType; 19] = [
        TokenType::Bold,
        TokenType::Bolder,
        TokenType::Italic,
        TokenType::Italicer,
        TokenType::Strikethrough,
        TokenType::Link,
        TokenType::Autolink,
        TokenType::CodeSpan,
        TokenType::MathSpan,
        TokenType::UnorderedList,
        TokenType::OrderedList,
        TokenType::TaskDone,
        TokenType::TaskWip,
        TokenType::TaskTodo,
        TokenType::HtmlTag,
        TokenType::HtmlAttributeName,
        TokenType::HtmlAttributeValue,
        TokenType::HtmlEntity,
        TokenType::HtmlComment,
    ];

    /// Get a human-readable name for this token type
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Bold => "Bold",
            TokenType::Bolder => "Bolder",
            TokenType::Italic => "Italic",
            TokenType::Italicer => "Italicer",
            TokenType::Strikethrough => "Strikethrough",
            TokenType::Link => "Link",
            TokenType::Autolink => "Autolink",
            TokenType::CodeSpan => "CodeSpan",
            TokenType::MathSpan => "MathSpan",
            TokenType::UnorderedList => "UnorderedList",
            TokenType::OrderedList => "OrderedList",
            TokenType::TaskDone => "TaskDone",
            TokenType::TaskWip => "TaskWip",
            TokenType::TaskTodo => "TaskTodo",
            TokenType::HtmlTag => "HtmlTag",
            TokenType::HtmlAttributeName => "HtmlAttributeName",
            TokenType::HtmlAttributeValue => "HtmlAttributeValue",
            TokenType::HtmlEntity => "HtmlEntity",
            TokenType::HtmlComment => "HtmlComment",
        }
    }

    /// Parse a token type from a string name (for TOML loading)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    /// Whether this token belongs to inlined HTML rather than markdown
    pub fn is_html(&self) -> bool {
        matches!(
            self,
            TokenType::HtmlTag
                | TokenType::HtmlAttributeName
                | TokenType::HtmlAttributeValue
                | TokenType::HtmlEntity
                | TokenType::HtmlComment
        )
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_roundtrip() {
        for token_type in TokenType::ALL {
            assert_eq!(TokenType::from_name(token_type.name()), Some(token_type));
        }
    }

    #[test]
    fn test_from_name_invalid() {
        assert_eq!(TokenType::from_name("InvalidType"), None);
        assert_eq!(TokenType::from_name("bold"), None);
        assert_eq!(TokenType::from_name(""), None);
    }

    #[test]
    fn test_html_tokens() {
        assert!(TokenType::HtmlComment.is_html());
        assert!(TokenType::HtmlAttributeValue.is_html());
        assert!(!TokenType::CodeSpan.is_html());
        assert!(!TokenType::TaskTodo.is_html());
    }
}
