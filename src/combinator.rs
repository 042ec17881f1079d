//! Primitive and derived parser combinators.
//!
//! A [`Parser<T>`] is a pure function from a cursor (plus the threaded parse
//! state) to a [`ParseResult<T>`]. Combinators build new parsers out of
//! existing ones; nothing here has mutable state of its own, so parsers are
//! cheap to clone and safe to reuse across parses.

use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use once_cell::unsync::OnceCell;
use regex::Regex;

use crate::context::ParseContext;
use crate::cursor::{Cursor, SourceText};
use crate::error::{GrammarDefect, SyntaxError, XyError};
use crate::result::ParseResult;
use crate::state::ParseState;

/// A backtracking parser producing values of type `T`.
pub struct Parser<T> {
    run: Rc<dyn Fn(&Cursor, &mut ParseState) -> ParseResult<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            run: Rc::clone(&self.run),
        }
    }
}

impl<T: 'static> Parser<T> {
    pub fn new(f: impl Fn(&Cursor, &mut ParseState) -> ParseResult<T> + 'static) -> Self {
        Self { run: Rc::new(f) }
    }

    pub fn run(&self, cursor: &Cursor, state: &mut ParseState) -> ParseResult<T> {
        (self.run)(cursor, state)
    }

    /// A parser whose body is built on first invocation and cached. This is
    /// what lets mutually-recursive rules reference each other without
    /// infinite construction-time recursion: only construction is memoized,
    /// invocation recurses normally.
    pub fn lazy(thunk: impl Fn() -> Parser<T> + 'static) -> Self {
        let cell: OnceCell<Parser<T>> = OnceCell::new();
        Parser::new(move |cursor, state| cell.get_or_init(&thunk).run(cursor, state))
    }

    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Parser<U> {
        Parser::new(move |cursor, state| self.run(cursor, state).map(&f))
    }

    /// Monadic bind: the next parser depends on the parsed value.
    pub fn flat_map<U: 'static>(self, f: impl Fn(T) -> Parser<U> + 'static) -> Parser<U> {
        Parser::new(move |cursor, state| match self.run(cursor, state) {
            ParseResult::Success { value, next } => f(value).run(&next, state),
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
        })
    }

    /// Value-level partial transform; `Err(value)` becomes a recoverable
    /// failure carrying `on_mismatch(&value)`.
    pub fn map_partial<U: 'static>(
        self,
        f: impl Fn(T) -> Result<U, T> + 'static,
        on_mismatch: impl Fn(&T) -> String + 'static,
    ) -> Parser<U> {
        Parser::new(move |cursor, state| {
            self.run(cursor, state)
                .map_partial(state, &f, &on_mismatch)
        })
    }

    /// Sequence two parsers, keeping both values.
    pub fn and_then<U: 'static>(self, other: Parser<U>) -> Parser<(T, U)> {
        Parser::new(move |cursor, state| match self.run(cursor, state) {
            ParseResult::Success { value: a, next } => {
                other.run(&next, state).map(|b| (a, b))
            }
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
        })
    }

    pub fn keep_left<U: 'static>(self, other: Parser<U>) -> Parser<T> {
        self.and_then(other).map(|(a, _)| a)
    }

    pub fn keep_right<U: 'static>(self, other: Parser<U>) -> Parser<U> {
        self.and_then(other).map(|(_, b)| b)
    }

    /// Ordered choice. The right branch only runs after a recoverable
    /// failure of the left; two failures keep the farther one.
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        Parser::new(move |cursor, state| {
            let first = self.run(cursor, state);
            match first {
                ParseResult::Success { .. } | ParseResult::Error { .. } => first,
                ParseResult::Failure { .. } => first.append(other.run(cursor, state)),
            }
        })
    }

    /// True longest-match choice: both branches run, and of two successes
    /// the one with the further-advanced cursor wins (ties prefer the left).
    /// The diagram grammar resolves its overlaps with ordered choice and
    /// anchored tokens; this is engine surface for embedded grammars.
    pub fn longest_or(self, other: Parser<T>) -> Parser<T> {
        Parser::new(move |cursor, state| {
            let left = self.run(cursor, state);
            if matches!(left, ParseResult::Error { .. }) {
                return left;
            }
            let right = other.run(cursor, state);
            match (left, right) {
                (
                    ParseResult::Success {
                        value: lv,
                        next: ln,
                    },
                    ParseResult::Success {
                        value: rv,
                        next: rn,
                    },
                ) => {
                    if rn.offset() > ln.offset() {
                        ParseResult::success(rv, rn)
                    } else {
                        ParseResult::success(lv, ln)
                    }
                }
                (left @ ParseResult::Success { .. }, ParseResult::Failure { .. }) => left,
                (ParseResult::Failure { .. }, right @ ParseResult::Success { .. }) => right,
                (left, right) => left.append(right),
            }
        })
    }

    /// Zero or more repetitions. Stops at the first failing attempt and
    /// never backtracks into already-consumed repetitions. A repetition that
    /// succeeds without advancing stops the loop (zero-width guard).
    pub fn many(self) -> Parser<Vec<T>> {
        Parser::new(move |cursor, state| {
            let mut values = Vec::new();
            let mut current = cursor.clone();
            loop {
                match self.run(&current, state) {
                    ParseResult::Success { value, next } => {
                        let progressed = next.offset() > current.offset();
                        values.push(value);
                        current = next;
                        if !progressed {
                            break;
                        }
                    }
                    ParseResult::Failure { .. } => break,
                    ParseResult::Error {
                        message,
                        at,
                        defect,
                    } => {
                        return ParseResult::Error {
                            message,
                            at,
                            defect,
                        }
                    }
                }
            }
            ParseResult::success(values, current)
        })
    }

    pub fn many1(self) -> Parser<Vec<T>> {
        self.clone().and_then(self.many()).map(|(head, mut tail)| {
            tail.insert(0, head);
            tail
        })
    }

    /// Exactly `n` repetitions; fewer is a failure.
    pub fn exactly(self, n: usize) -> Parser<Vec<T>> {
        Parser::new(move |cursor, state| {
            let mut values = Vec::with_capacity(n);
            let mut current = cursor.clone();
            for _ in 0..n {
                match self.run(&current, state) {
                    ParseResult::Success { value, next } => {
                        values.push(value);
                        current = next;
                    }
                    ParseResult::Failure { message, at } => {
                        return ParseResult::Failure { message, at }
                    }
                    ParseResult::Error {
                        message,
                        at,
                        defect,
                    } => {
                        return ParseResult::Error {
                            message,
                            at,
                            defect,
                        }
                    }
                }
            }
            ParseResult::success(values, current)
        })
    }

    /// One or more repetitions interleaved with a separator whose value is
    /// discarded.
    pub fn sep_by1<S: 'static>(self, separator: Parser<S>) -> Parser<Vec<T>> {
        self.clone()
            .and_then(separator.keep_right(self).many())
            .map(|(head, mut tail)| {
                tail.insert(0, head);
                tail
            })
    }

    /// Zero or more repetitions interleaved with a separator.
    pub fn sep_by<S: 'static>(self, separator: Parser<S>) -> Parser<Vec<T>> {
        self.sep_by1(separator).or(succeed_with(Vec::new))
    }

    /// Optional parse; always succeeds.
    pub fn opt(self) -> Parser<Option<T>> {
        Parser::new(move |cursor, state| match self.run(cursor, state) {
            ParseResult::Success { value, next } => ParseResult::success(Some(value), next),
            ParseResult::Failure { .. } => ParseResult::success(None, cursor.clone()),
            ParseResult::Error {
                message,
                at,
                defect,
            } => ParseResult::Error {
                message,
                at,
                defect,
            },
        })
    }

    /// Positive lookahead: succeeds with the value but consumes nothing.
    pub fn peek(self) -> Parser<T> {
        Parser::new(move |cursor, state| self.run(cursor, state).and_keep_cursor(cursor))
    }

    /// The cut: a recoverable failure of this parser becomes a committed
    /// error, aborting the whole enclosing alternation chain.
    pub fn commit(self) -> Parser<T> {
        Parser::new(move |cursor, state| self.run(cursor, state).commit())
    }
}

impl<T> ParseResult<T> {
    fn and_keep_cursor(self, cursor: &Cursor) -> ParseResult<T> {
        match self {
            ParseResult::Success { value, .. } => ParseResult::success(value, cursor.clone()),
            other => other,
        }
    }
}

/// Negative lookahead: succeeds (consuming nothing) iff `p` fails. Probing
/// runs against a scratch state so speculative failures never pollute the
/// farthest-failure record.
pub fn not<T: 'static>(p: Parser<T>) -> Parser<()> {
    Parser::new(move |cursor, state| {
        let mut scratch = ParseState::new();
        match p.run(cursor, &mut scratch) {
            ParseResult::Success { .. } => {
                ParseResult::failure(state, "unexpected input", cursor)
            }
            ParseResult::Error { defect: true, .. } => {
                ParseResult::grammar_defect(state, "defect inside negative lookahead", cursor)
            }
            _ => ParseResult::success((), cursor.clone()),
        }
    })
}

/// Left-associative operator chain: `first (operator operand)*`, folding
/// each matched operator function over the accumulated value. The operator
/// and its operand succeed or backtrack as a unit.
pub fn chain_left<T: 'static, O: 'static>(
    first: Parser<T>,
    operand: Parser<O>,
    operator: Parser<Rc<dyn Fn(T, O) -> T>>,
) -> Parser<T> {
    Parser::new(move |cursor, state| {
        let (mut acc, mut current) = match first.run(cursor, state) {
            ParseResult::Success { value, next } => (value, next),
            ParseResult::Failure { message, at } => return ParseResult::Failure { message, at },
            ParseResult::Error {
                message,
                at,
                defect,
            } => {
                return ParseResult::Error {
                    message,
                    at,
                    defect,
                }
            }
        };
        loop {
            match operator.run(&current, state) {
                ParseResult::Success { value: apply, next } => {
                    match operand.run(&next, state) {
                        ParseResult::Success {
                            value: arg,
                            next: after,
                        } => {
                            acc = apply(acc, arg);
                            current = after;
                        }
                        // The operator/operand pair backtracks as a unit.
                        ParseResult::Failure { .. } => break,
                        ParseResult::Error {
                            message,
                            at,
                            defect,
                        } => {
                            return ParseResult::Error {
                                message,
                                at,
                                defect,
                            }
                        }
                    }
                }
                ParseResult::Failure { .. } => break,
                ParseResult::Error {
                    message,
                    at,
                    defect,
                } => {
                    return ParseResult::Error {
                        message,
                        at,
                        defect,
                    }
                }
            }
        }
        ParseResult::success(acc, current)
    })
}

/// Constant success.
pub fn succeed<T: Clone + 'static>(value: T) -> Parser<T> {
    Parser::new(move |cursor, _| ParseResult::success(value.clone(), cursor.clone()))
}

/// Constant success built from a factory (for non-`Clone` values).
pub fn succeed_with<T: 'static>(f: impl Fn() -> T + 'static) -> Parser<T> {
    Parser::new(move |cursor, _| ParseResult::success(f(), cursor.clone()))
}

/// Constant recoverable failure.
pub fn fail<T: 'static>(message: impl Into<String>) -> Parser<T> {
    let message = message.into();
    Parser::new(move |cursor, state| ParseResult::failure(state, message.clone(), cursor))
}

/// Constant committed error. The diagram grammar raises its hard errors
/// through [`Parser::commit`]; this is the direct form for embedded
/// grammars.
pub fn hard_error<T: 'static>(message: impl Into<String>) -> Parser<T> {
    let message = message.into();
    Parser::new(move |cursor, state| ParseResult::error(state, message.clone(), cursor))
}

/// Match an exact string, skipping leading whitespace first.
pub fn literal(expected: &'static str) -> Parser<&'static str> {
    Parser::new(move |cursor, state| {
        let here = cursor.skip_whitespace();
        if here.remaining().starts_with(expected) {
            ParseResult::success(expected, here.advance(expected.len()))
        } else {
            ParseResult::failure(state, format!("expected `{expected}`"), &here)
        }
    })
}

static REGEX_CACHE: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(|| Mutex::new(HashMap::new()));

fn compiled(pattern: &str) -> Regex {
    let mut cache = REGEX_CACHE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    cache
        .entry(pattern.to_string())
        .or_insert_with(|| {
            // Grammar patterns are static strings; a bad one is a defect
            // caught the first time the rule runs in any test.
            Regex::new(&format!("^(?:{pattern})"))
                .unwrap_or_else(|err| panic!("invalid grammar pattern {pattern:?}: {err}"))
        })
        .clone()
}

/// Match an anchored regular expression, skipping leading whitespace first.
pub fn regex(pattern: &'static str) -> Parser<String> {
    let re = compiled(pattern);
    Parser::new(move |cursor, state| {
        let here = cursor.skip_whitespace();
        match re.find(here.remaining()) {
            Some(m) => ParseResult::success(m.as_str().to_string(), here.advance(m.end())),
            None => ParseResult::failure(state, format!("expected /{pattern}/"), &here),
        }
    })
}

/// Match an anchored regular expression at the raw position, without
/// skipping whitespace (for tokens where whitespace is significant).
pub fn regex_literal(pattern: &'static str) -> Parser<String> {
    let re = compiled(pattern);
    Parser::new(move |cursor, state| match re.find(cursor.remaining()) {
        Some(m) => ParseResult::success(m.as_str().to_string(), cursor.advance(m.end())),
        None => ParseResult::failure(state, format!("expected /{pattern}/"), cursor),
    })
}

/// Match a `{`-delimited group with balanced nested braces, yielding the
/// raw inner text. Backslash escapes protect braces from the depth count.
/// Nesting is beyond a regular pattern, so this is scanned by hand.
pub fn balanced_braces() -> Parser<String> {
    Parser::new(|cursor, state| {
        let here = cursor.skip_whitespace();
        let rest = here.remaining();
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, '{')) => {}
            _ => return ParseResult::failure(state, "expected `{`", &here),
        }
        let mut depth = 1usize;
        let mut escaped = false;
        for (idx, ch) in chars {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '\\' => escaped = true,
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let inner = rest[1..idx].to_string();
                        return ParseResult::success(inner, here.advance(idx + 1));
                    }
                }
                _ => {}
            }
        }
        ParseResult::failure(state, "unclosed `{`", &here.advance(rest.len()))
    })
}

/// A successful parse: the value plus the byte offset immediately after the
/// consumed text, so a host can continue with the remainder of its input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOk<T> {
    pub value: T,
    pub end: usize,
}

/// Attempt one rule against a shared source, starting at `offset`.
pub fn parse_text<T: 'static>(
    parser: &Parser<T>,
    source: &Arc<SourceText>,
    offset: usize,
    context: ParseContext,
) -> Result<ParseOk<T>, XyError> {
    let cursor = Cursor::new(Arc::clone(source), offset, context);
    let mut state = ParseState::new();
    finish(parser.run(&cursor, &mut state), &mut state, source)
}

/// Attempt one rule against `source`, starting at `offset`.
pub fn parse<T: 'static>(
    parser: &Parser<T>,
    source: &str,
    offset: usize,
    context: ParseContext,
) -> Result<ParseOk<T>, XyError> {
    parse_text(parser, &SourceText::new("input", source), offset, context)
}

/// As [`parse`], but additionally requires end-of-input after the rule
/// succeeds (skipping trailing whitespace).
pub fn parse_all_text<T: 'static>(
    parser: &Parser<T>,
    source: &Arc<SourceText>,
    offset: usize,
    context: ParseContext,
) -> Result<ParseOk<T>, XyError> {
    let cursor = Cursor::new(Arc::clone(source), offset, context);
    let mut state = ParseState::new();
    let result = match parser.run(&cursor, &mut state) {
        ParseResult::Success { value, next } => {
            let after = next.skip_whitespace();
            if after.at_end() {
                ParseResult::success(value, after)
            } else {
                ParseResult::failure(&mut state, "expected end of input", &after)
            }
        }
        other => other,
    };
    finish(result, &mut state, source)
}

pub fn parse_all<T: 'static>(
    parser: &Parser<T>,
    source: &str,
    offset: usize,
    context: ParseContext,
) -> Result<ParseOk<T>, XyError> {
    parse_all_text(parser, &SourceText::new("input", source), offset, context)
}

fn finish<T>(
    result: ParseResult<T>,
    state: &mut ParseState,
    source: &Arc<SourceText>,
) -> Result<ParseOk<T>, XyError> {
    match result {
        ParseResult::Success { value, next } => Ok(ParseOk {
            value,
            end: next.offset(),
        }),
        ParseResult::Error {
            message,
            defect: true,
            ..
        } => Err(XyError::Defect(GrammarDefect::new(message))),
        ParseResult::Failure { message, at } | ParseResult::Error { message, at, .. } => {
            // The farthest failure accumulated over the whole attempt is
            // more informative than whichever branch happened to run last.
            let error = match state.take_farthest() {
                Some(farthest) => SyntaxError::from_farthest(farthest, source),
                None => SyntaxError::at_cursor(message, &at),
            };
            Err(XyError::Syntax(error))
        }
    }
}
