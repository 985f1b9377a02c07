//! Cross-line block state
//!
//! Fenced code blocks and HTML comments can span lines. Each line
//! receives the exit state of its predecessor as its entry state and
//! computes its own exit state from that and its text alone.

use bitflags::bitflags;

use super::span::{CharIndex, FormatBuffer};
use super::tokens::TokenType;

/// Delimiter line opening and closing a fenced code block
pub const FENCE: &str = "```";
/// Opens an HTML comment
pub const COMMENT_BEGIN: &str = "<!--";
/// Closes an HTML comment
pub const COMMENT_END: &str = "-->";

bitflags! {
    /// Open blocks at a line boundary
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BlockState: u8 {
        /// Inside a fenced code block
        const IN_CODE = 1;
        /// Inside an HTML comment
        const IN_COMMENT = 2;
    }
}

impl BlockState {
    /// No open block
    pub const NORMAL: Self = Self::empty();

    /// Check if no block is open
    pub fn is_normal(&self) -> bool {
        self.is_empty()
    }
}

impl Default for BlockState {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Fenced code handling
///
/// Returns the exit state if the line was consumed by the fence logic,
/// in which case nothing else may classify it. `None` means the line is
/// outside any code block and the code dimension of its exit is normal.
pub fn fenced_code(
    text: &str,
    index: &CharIndex,
    entry: BlockState,
    buf: &mut FormatBuffer,
) -> Option<BlockState> {
    if entry.contains(BlockState::IN_CODE) {
        if text.trim() == FENCE {
            let lead = text.len() - text.trim_start().len();
            buf.set(index.char_at(lead), FENCE.len(), TokenType::CodeSpan);
            Some(BlockState::NORMAL)
        } else {
            buf.set(0, index.len(), TokenType::CodeSpan);
            Some(BlockState::IN_CODE)
        }
    } else if text.starts_with(FENCE) {
        buf.set(0, index.len(), TokenType::CodeSpan);
        Some(BlockState::IN_CODE)
    } else {
        None
    }
}

/// Multi-line HTML comment handling
///
/// Runs after the rule table so comment formatting wins. A line may
/// close a comment from a previous line and open a new one later on.
pub fn html_comment(
    text: &str,
    index: &CharIndex,
    entry: BlockState,
    buf: &mut FormatBuffer,
) -> BlockState {
    if entry.contains(BlockState::IN_COMMENT) {
        match text.find(COMMENT_END) {
            None => {
                buf.set(0, index.len(), TokenType::HtmlComment);
                return BlockState::IN_COMMENT;
            }
            Some(end) => {
                let through = index.char_at(end + COMMENT_END.len());
                buf.set(0, through, TokenType::HtmlComment);
            }
        }
    }

    let mut exit = BlockState::NORMAL;
    if let Some(start) = text.rfind(COMMENT_BEGIN) {
        let closed = text.rfind(COMMENT_END).is_some_and(|end| end >= start);
        if !closed {
            buf.set(index.char_at(start), usize::MAX, TokenType::HtmlComment);
            exit |= BlockState::IN_COMMENT;
        }
    }
    exit
}
