//! Per-parse mutable state, threaded explicitly through every combinator
//! call so independent (possibly re-entrant) parses never interfere.

use crate::cursor::{Cursor, Position};

/// The farthest recoverable failure seen during an entire parse attempt.
/// The last alternative tried is frequently the least informative one; the
/// rightmost failure is what gets surfaced to the user.
#[derive(Debug, Clone)]
pub struct Farthest {
    pub message: String,
    pub position: Position,
    pub line_text: String,
    pub source_name: String,
}

/// State carried alongside the cursor for the duration of one parse attempt.
#[derive(Debug, Default)]
pub struct ParseState {
    farthest: Option<Farthest>,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn farthest(&self) -> Option<&Farthest> {
        self.farthest.as_ref()
    }

    pub fn take_farthest(&mut self) -> Option<Farthest> {
        self.farthest.take()
    }

    /// Record a failure unless its position is before the one already
    /// recorded. Ties update, so the most recent equally-far message wins.
    pub fn record(&mut self, message: &str, at: &Cursor) {
        let position = at.position();
        if let Some(existing) = &self.farthest {
            if position.is_before(&existing.position) {
                return;
            }
        }
        self.farthest = Some(Farthest {
            message: message.to_string(),
            position,
            line_text: at.line_text().to_string(),
            source_name: at.source().name().to_string(),
        });
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
    fn farthest_position_is_monotonic() {
        let mut state = ParseState::new();
        state.record("late", &cursor("abcdef", 4));
        state.record("early", &cursor("abcdef", 1));
        let kept = state.farthest().unwrap();
        assert_eq!(kept.message, "late");
        assert_eq!(kept.position.offset, 4);
    }

    #[test]
    fn equal_positions_keep_the_latest_message() {
        let mut state = ParseState::new();
        state.record("first", &cursor("abc", 2));
        state.record("second", &cursor("abc", 2));
        assert_eq!(state.farthest().unwrap().message, "second");
    }
}
