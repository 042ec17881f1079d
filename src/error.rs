//! User-facing diagnostics.
//!
//! Syntax errors surface the farthest recoverable failure seen during the
//! whole parse attempt: its reason string, a 1-based line/column, and the
//! literal text of the offending source line. Grammar defects are a separate
//! channel; they indicate a bug in the grammar, not a property of the input.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

use crate::cursor::{Cursor, SourceText};
use crate::state::Farthest;

/// A diagnosed syntax error, ready for direct display.
#[derive(Debug, Error)]
#[error("syntax error: {message} at line {line}, column {column}: {line_text}")]
pub struct SyntaxError {
    pub message: String,
    /// 1-based.
    pub line: usize,
    /// 1-based.
    pub column: usize,
    /// The literal text of the offending source line.
    pub line_text: String,
    source_code: Arc<NamedSource<String>>,
    span: SourceSpan,
}

impl SyntaxError {
    pub(crate) fn from_farthest(farthest: Farthest, source: &Arc<SourceText>) -> Self {
        Self {
            message: farthest.message,
            line: farthest.position.line,
            column: farthest.position.column,
            line_text: farthest.line_text,
            source_code: Arc::new(NamedSource::new(
                farthest.source_name,
                source.text().to_string(),
            )),
            span: SourceSpan::from(farthest.position.offset..farthest.position.offset),
        }
    }

    pub(crate) fn at_cursor(message: impl Into<String>, at: &Cursor) -> Self {
        let position = at.position();
        Self {
            message: message.into(),
            line: position.line,
            column: position.column,
            line_text: at.line_text().to_string(),
            source_code: Arc::new(NamedSource::new(
                at.source().name().to_string(),
                at.source().text().to_string(),
            )),
            span: SourceSpan::from(position.offset..position.offset),
        }
    }
}

impl Diagnostic for SyntaxError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("xyparse::syntax"))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.message.clone()),
            self.span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_code)
    }
}

/// A structural mismatch during grammar construction or AST assembly: a
/// programming error, never caught by alternation and never a statement
/// about the input.
#[derive(Debug, Error)]
#[error("grammar defect: {message}")]
pub struct GrammarDefect {
    pub message: String,
}

impl GrammarDefect {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Everything a parse entry point can report.
#[derive(Debug, Error)]
pub enum XyError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Defect(#[from] GrammarDefect),
}

impl Diagnostic for XyError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            XyError::Syntax(err) => err.code(),
            XyError::Defect(_) => Some(Box::new("xyparse::defect")),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            XyError::Syntax(err) => err.labels(),
            XyError::Defect(_) => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            XyError::Syntax(err) => err.source_code(),
            XyError::Defect(_) => None,
        }
    }
}
