//! Position-tracking views over source text.
//!
//! A [`Cursor`] is an immutable window into a shared source string: advancing
//! produces a new cursor, never mutates the old one. Line/column information
//! is derived on demand from a newline index built lazily once per distinct
//! source string.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::context::ParseContext;

/// End-of-input sentinel returned by [`Cursor::first`], so single-character
/// lookahead never needs an `Option`.
pub const EOI: char = '\0';

/// A source string shared by every cursor produced during a parse, plus the
/// newline index used to turn byte offsets into line/column positions.
#[derive(Debug)]
pub struct SourceText {
    name: String,
    text: String,
    newlines: OnceCell<Vec<usize>>,
}

impl SourceText {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            text: text.into(),
            newlines: OnceCell::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte offsets of every `'\n'`, built on first use and cached.
    fn newline_index(&self) -> &[usize] {
        self.newlines.get_or_init(|| {
            self.text
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i)
                .collect()
        })
    }

    /// 1-based line and column for a byte offset.
    fn line_col(&self, offset: usize) -> (usize, usize) {
        let index = self.newline_index();
        let line = index.partition_point(|&nl| nl < offset);
        let line_start = if line == 0 { 0 } else { index[line - 1] + 1 };
        (line + 1, offset - line_start + 1)
    }

    /// The literal text of the line containing `offset`, without its newline.
    fn line_text(&self, offset: usize) -> &str {
        let index = self.newline_index();
        let line = index.partition_point(|&nl| nl < offset);
        let start = if line == 0 { 0 } else { index[line - 1] + 1 };
        let end = index.get(line).copied().unwrap_or(self.text.len());
        &self.text[start..end]
    }
}

/// A position in some source, ordered by raw offset within one source and by
/// line/column across distinct sources (embedded sub-parses).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
    source_id: usize,
}

impl Position {
    /// Total "is strictly before" ordering used to pick the farther of two
    /// failures. Within one source this agrees with raw offset ordering.
    pub fn is_before(&self, other: &Position) -> bool {
        if self.source_id == other.source_id {
            self.offset < other.offset
        } else {
            (self.line, self.column) < (other.line, other.column)
        }
    }
}

/// An immutable view over source text at a byte offset, carrying the parse
/// context (whitespace policy and leaf callback).
///
/// Invariant: `0 <= offset <= source.len()`.
#[derive(Debug, Clone)]
pub struct Cursor {
    source: Arc<SourceText>,
    offset: usize,
    context: ParseContext,
}

impl Cursor {
    pub fn new(source: Arc<SourceText>, offset: usize, context: ParseContext) -> Self {
        let offset = offset.min(source.len());
        Self {
            source,
            offset,
            context,
        }
    }

    pub fn source(&self) -> &Arc<SourceText> {
        &self.source
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn context(&self) -> &ParseContext {
        &self.context
    }

    /// The character at the cursor, or [`EOI`] at end-of-input.
    pub fn first(&self) -> char {
        self.source.text[self.offset..].chars().next().unwrap_or(EOI)
    }

    /// The unconsumed remainder of the source.
    pub fn remaining(&self) -> &str {
        &self.source.text[self.offset..]
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// A cursor advanced past the current character. Advancing past
    /// end-of-input is a no-op, not an error.
    pub fn rest(&self) -> Cursor {
        let step = self.first().len_utf8();
        if self.at_end() {
            self.clone()
        } else {
            self.advance(step)
        }
    }

    /// A cursor advanced by `n` bytes, clamped at end-of-input. Callers pass
    /// match lengths, so `n` always lands on a character boundary.
    pub fn advance(&self, n: usize) -> Cursor {
        Self {
            source: Arc::clone(&self.source),
            offset: (self.offset + n).min(self.source.len()),
            context: self.context.clone(),
        }
    }

    /// A cursor past any leading whitespace, per the context's skip pattern.
    pub fn skip_whitespace(&self) -> Cursor {
        let skipped = self.context.whitespace_len(self.remaining());
        self.advance(skipped)
    }

    pub fn position(&self) -> Position {
        let (line, column) = self.source.line_col(self.offset);
        Position {
            line,
            column,
            offset: self.offset,
            source_id: Arc::as_ptr(&self.source) as usize,
        }
    }

    /// The literal text of the line the cursor is on.
    pub fn line_text(&self) -> &str {
        self.source.line_text(self.offset)
    }
}
