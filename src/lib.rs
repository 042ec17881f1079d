//! Backtracking parser combinators and the Xy-pic diagram-language grammar.
//!
//! The [`combinator`] layer is a general-purpose engine: [`Parser<T>`]
//! values compose into grammars with ordered choice, committed errors and
//! farthest-failure diagnostics. The [`grammar`] and [`ast`] layers use it
//! to parse diagram bodies into an immutable tree whose `pretty()` output
//! re-parses to an equal tree.

pub use crate::combinator::{parse, parse_all, parse_all_text, parse_text, ParseOk, Parser};
pub use crate::context::{ParseContext, TextLeaf};
pub use crate::cursor::{Cursor, Position, SourceText};
pub use crate::error::{GrammarDefect, SyntaxError, XyError};
pub use crate::grammar::Grammar;
pub use crate::result::ParseResult;
pub use crate::state::ParseState;

pub mod ast;
pub mod combinator;
pub mod context;
pub mod cursor;
pub mod error;
pub mod grammar;
pub mod result;
pub mod state;
