//! Markdown + inline HTML rule definitions

use crate::syntax::rules::{MatchMode, RuleKind};
use crate::syntax::tokens::TokenType;

use MatchMode::{Greedy, Minimal};

/// Default rules in override order
///
/// HTML goes first so that its formatting can be rewritten by markdown.
pub fn markdown_rules() -> Vec<(RuleKind, &'static str, MatchMode)> {
    let tok = RuleKind::Token;
    vec![
        // HTML inlined in markdown
        (tok(TokenType::HtmlTag), r"<[!?]?\w+(?:/>)?", Greedy),
        (tok(TokenType::HtmlTag), r"(?:</\w+)?[?]?>", Minimal),
        (tok(TokenType::HtmlEntity), r"&(?:#\d+|\w+);", Minimal),
        // single-line comments; multi-line ones are tracked per block
        (tok(TokenType::HtmlComment), r"<!--.*-->", Minimal),
        (RuleKind::HtmlAttribute, r#"(\w+(?::\w+)?)=("[^"]+"|'[^']+')"#, Minimal),
        // Markdown
        (tok(TokenType::Bold), r"\*\S[\S\s]+\*", Minimal),
        (tok(TokenType::Bolder), r"\*\*[\S\s]+\*\*", Minimal),
        (tok(TokenType::Italic), r"_[\S\s]+_", Minimal),
        (tok(TokenType::Italicer), r"__[\S\s]+__", Minimal),
        (tok(TokenType::Strikethrough), r"~~[\S\s]+~~", Minimal),
        (tok(TokenType::Link), r"\[[\S\s]+\]\([\S\s]+\)", Minimal),
        (tok(TokenType::Autolink), r"https?://\S+", Greedy),
        (tok(TokenType::CodeSpan), r"`[\S\s]+`", Minimal),
        (tok(TokenType::MathSpan), r"\$[\S\s]+\$", Minimal),
        (tok(TokenType::UnorderedList), r"^(?:    )*[*+-] ", Minimal),
        (tok(TokenType::OrderedList), r"^(?:    )*\d\d?\. ", Minimal),
        (tok(TokenType::TaskDone), r"^(?:    )*[*+-] \[x\]", Minimal),
        (tok(TokenType::TaskWip), r"^(?:    )*[*+-] \[w\]", Minimal),
        (tok(TokenType::TaskTodo), r"^(?:    )*[*+-] \[ \]", Minimal),
    ]
}
