//! The three-way outcome of an attempted parse and its combination rules.
//!
//! `Failure` is recoverable (alternation may try another branch); `Error` is
//! committed (alternation must not). Internal grammar-construction defects
//! travel as `Error { defect: true }`, which `or` can never catch and the
//! entry points surface as a distinct error channel from syntax errors.

use crate::cursor::Cursor;
use crate::state::ParseState;

#[derive(Debug, Clone)]
pub enum ParseResult<T> {
    Success {
        value: T,
        next: Cursor,
    },
    Failure {
        message: String,
        at: Cursor,
    },
    Error {
        message: String,
        at: Cursor,
        defect: bool,
    },
}

impl<T> ParseResult<T> {
    pub fn success(value: T, next: Cursor) -> Self {
        ParseResult::Success { value, next }
    }

    /// Construct a recoverable failure, updating the farthest-failure record.
    pub fn failure(state: &mut ParseState, message: impl Into<String>, at: &Cursor) -> Self {
        let message = message.into();
        state.record(&message, at);
        ParseResult::Failure {
            message,
            at: at.clone(),
        }
    }

    /// Construct a committed error, updating the farthest-failure record.
    pub fn error(state: &mut ParseState, message: impl Into<String>, at: &Cursor) -> Self {
        let message = message.into();
        state.record(&message, at);
        ParseResult::Error {
            message,
            at: at.clone(),
            defect: false,
        }
    }

    /// Construct a grammar-defect error: a bug in the grammar or AST
    /// assembly, not a property of the input.
    pub fn grammar_defect(state: &mut ParseState, message: impl Into<String>, at: &Cursor) -> Self {
        let message = message.into();
        state.record(&message, at);
        ParseResult::Error {
            message,
            at: at.clone(),
            defect: true,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }

    /// Transform the value of a success; failures are inert.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParseResult<U> {
        match self {
            ParseResult::Success { value, next } => ParseResult::Success {
                value: f(value),
                next,
            },
            ParseResult::Failure { message, at } => ParseResult::Failure { message, at },
            ParseResult::Error {
                message,
                at,
                defect,
            } => ParseResult::Error {
                message,
                at,
                defect,
            },
        }
    }

    /// Apply a value-level partial transform: `Err(value)` means the parsed
    /// value did not satisfy the semantic predicate, which becomes an
    /// ordinary recoverable failure carrying `on_mismatch(&value)`.
    pub fn map_partial<U>(
        self,
        state: &mut ParseState,
        f: impl FnOnce(T) -> Result<U, T>,
        on_mismatch: impl FnOnce(&T) -> String,
    ) -> ParseResult<U> {
        match self {
            ParseResult::Success { value, next } => match f(value) {
                Ok(mapped) => ParseResult::Success {
                    value: mapped,
                    next,
                },
                Err(original) => {
                    // The mismatch is reported at the position where the
                    // rejected value started to matter: the cursor after it.
                    ParseResult::failure(state, on_mismatch(&original), &next)
                }
            },
            ParseResult::Failure { message, at } => ParseResult::Failure { message, at },
            ParseResult::Error {
                message,
                at,
                defect,
            } => ParseResult::Error {
                message,
                at,
                defect,
            },
        }
    }

    /// Combine with the outcome of an alternative branch:
    /// success and committed errors short-circuit; two recoverable failures
    /// keep whichever sits at the farther position.
    pub fn append(self, alternative: ParseResult<T>) -> ParseResult<T> {
        match self {
            ParseResult::Success { .. } | ParseResult::Error { .. } => self,
            ParseResult::Failure {
                message: first_message,
                at: first_at,
            } => match alternative {
                ParseResult::Success { .. } | ParseResult::Error { .. } => alternative,
                ParseResult::Failure { message, at } => {
                    if first_at.position().is_before(&at.position()) {
                        ParseResult::Failure { message, at }
                    } else {
                        ParseResult::Failure {
                            message: first_message,
                            at: first_at,
                        }
                    }
                }
            },
        }
    }

    /// Promote a recoverable failure to a committed error (the "cut").
    pub fn commit(self) -> ParseResult<T> {
        match self {
            ParseResult::Failure { message, at } => ParseResult::Error {
                message,
                at,
                defect: false,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ParseContext;
    use crate::cursor::SourceText;

    fn cursor(text: &str, offset: usize) -> Cursor {
        Cursor::new(SourceText::new("test", text), offset, ParseContext::new())
    }

    #[test]
    fn map_is_inert_on_failure() {
        let mut state = ParseState::new();
        let result: ParseResult<i32> = ParseResult::failure(&mut state, "nope", &cursor("ab", 0));
        match result.map(|n| n + 1) {
            ParseResult::Failure { message, .. } => assert_eq!(message, "nope"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn append_picks_the_farther_failure() {
        let mut state = ParseState::new();
        let near: ParseResult<()> = ParseResult::failure(&mut state, "near", &cursor("abcd", 1));
        let far: ParseResult<()> = ParseResult::failure(&mut state, "far", &cursor("abcd", 3));
        match near.append(far) {
            ParseResult::Failure { message, .. } => assert_eq!(message, "far"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn append_never_overrides_a_committed_error() {
        let mut state = ParseState::new();
        let committed: ParseResult<()> = ParseResult::error(&mut state, "hard", &cursor("ab", 0));
        let success = ParseResult::success((), cursor("ab", 1));
        match committed.append(success) {
            ParseResult::Error { message, .. } => assert_eq!(message, "hard"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn construction_updates_the_farthest_record() {
        let mut state = ParseState::new();
        let _: ParseResult<()> = ParseResult::failure(&mut state, "first", &cursor("abcd", 2));
        assert_eq!(state.farthest().unwrap().position.offset, 2);
    }

    #[test]
    fn commit_promotes_failure_only() {
        let mut state = ParseState::new();
        let failed: ParseResult<()> = ParseResult::failure(&mut state, "soft", &cursor("ab", 0));
        assert!(matches!(
            failed.commit(),
            ParseResult::Error { defect: false, .. }
        ));
        let ok = ParseResult::success(7, cursor("ab", 1));
        assert!(ok.commit().is_success());
    }
}
