//! Typed spans and the per-line format buffer
//!
//! Offsets and lengths are counted in Unicode code points, not bytes.
//! Pattern matching works on byte offsets, so each line carries a
//! [`CharIndex`] to translate between the two.

use super::tokens::TokenType;

/// A typed span of text within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Token type assigned to this span
    pub token: TokenType,
    /// Code point offset where this span starts
    pub offset: usize,
    /// Number of code points covered
    pub length: usize,
}

impl Span {
    /// Create a new span
    pub fn new(token: TokenType, offset: usize, length: usize) -> Self {
        Self {
            token,
            offset,
            length,
        }
    }

    /// Code point offset one past the end of this span
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Check if this span contains a code point position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.offset && pos < self.end()
    }
}

/// Byte offset <-> code point offset mapping for one line
#[derive(Debug, Clone)]
pub struct CharIndex {
    /// Byte offset of every char, followed by the line's byte length
    starts: Vec<usize>,
}

impl CharIndex {
    pub fn new(text: &str) -> Self {
        let mut starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        starts.push(text.len());
        Self { starts }
    }

    /// Number of code points in the line
    pub fn len(&self) -> usize {
        self.starts.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Code point offset of a byte offset (rounded down to a char boundary)
    pub fn char_at(&self, byte: usize) -> usize {
        match self.starts.binary_search(&byte) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        }
    }

    /// Byte offset of a code point offset (clamped to the line end)
    pub fn byte_at(&self, ch: usize) -> usize {
        self.starts[ch.min(self.len())]
    }
}

/// Per-code-point token assignment for a single line
///
/// Writes overwrite whatever an earlier write put over the same
/// offsets, so the order of writes is the override priority.
#[derive(Debug, Clone)]
pub struct FormatBuffer {
    cells: Vec<Option<TokenType>>,
}

impl FormatBuffer {
    /// Create an unformatted buffer for a line of `len` code points
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Assign `token` to `length` code points starting at `offset`
    ///
    /// Ranges reaching past the line end are clamped.
    pub fn set(&mut self, offset: usize, length: usize, token: TokenType) {
        let start = offset.min(self.cells.len());
        let end = offset.saturating_add(length).min(self.cells.len());
        for cell in &mut self.cells[start..end] {
            *cell = Some(token);
        }
    }

    /// Token assigned at a code point offset
    pub fn get(&self, offset: usize) -> Option<TokenType> {
        self.cells.get(offset).copied().flatten()
    }

    /// Collapse the buffer into ordered, non-overlapping spans
    pub fn spans(&self) -> Vec<Span> {
        let mut spans: Vec<Span> = Vec::new();
        for (pos, cell) in self.cells.iter().enumerate() {
            let Some(token) = *cell else { continue };
            match spans.last_mut() {
                Some(last) if last.token == token && last.end() == pos => last.length += 1,
                _ => spans.push(Span::new(token, pos, 1)),
            }
        }
        spans
    }
}
