//! Matrices: setup switches, rows, and the loose-entry text scanner.

use crate::ast::{Axis, Entry, GridFix, Matrix, Row, SetupSwitch, SpacingOp};
use crate::combinator::{literal, regex_literal, Parser};
use crate::context::TextLeaf;
use crate::result::ParseResult;

use super::primitives::{diag, dimen, id};
use super::{is_decor_keyword, Grammar};

pub fn build_matrix(g: Grammar) -> Parser<Matrix> {
    let rows = entry(&g)
        .sep_by1(literal("&"))
        .map(Row)
        .sep_by1(literal("\\\\"));

    setup_switch(&g)
        .many()
        .keep_left(literal("{"))
        .and_then(rows)
        .keep_left(literal("}"))
        .map(|(setup, mut rows)| {
            // `A \\` leaves a trailing row holding one empty entry; that row
            // is a notational artifact, not a row of the grid.
            if rows.len() > 1 && rows.last().is_some_and(|row| row.0 == [Entry::Empty]) {
                rows.pop();
            }
            Matrix { setup, rows }
        })
}

fn setup_switch(g: &Grammar) -> Parser<SetupSwitch> {
    let prefix = id().map(SetupSwitch::Prefix);

    let grid_fix = literal("@!0")
        .map(|_| GridFix::Zero)
        .or(literal("@!R").map(|_| GridFix::Rows))
        .or(literal("@!C").map(|_| GridFix::Columns))
        .or(literal("@!").map(|_| GridFix::All))
        .map(SetupSwitch::GridFix);

    let default_modifier = literal("@*")
        .keep_right(g.modifier())
        .map(SetupSwitch::DefaultModifier);

    let axis = regex_literal(r"[RCMWHL]?").map(|text| match text.as_str() {
        "R" => Axis::Row,
        "C" => Axis::Column,
        "M" => Axis::Margin,
        "W" => Axis::Width,
        "H" => Axis::Height,
        "L" => Axis::LabelSep,
        _ => Axis::Both,
    });
    let op = regex_literal(r"\+=|-=|\+|-|=").map(|text| match text.as_str() {
        "+" => SpacingOp::Grow,
        "+=" => SpacingOp::GrowTo,
        "-" => SpacingOp::Shrink,
        "-=" => SpacingOp::ShrinkTo,
        _ => SpacingOp::Set,
    });
    let spacing = literal("@")
        .keep_right(axis)
        .and_then(op)
        .and_then(dimen())
        .map(|((axis, op), amount)| SetupSwitch::Spacing { axis, op, amount });

    let entry_style = literal("@")
        .keep_right(regex_literal(r"[0-9]"))
        .map_partial(
            |text| text.parse::<u8>().map_err(|_| text),
            |text| format!("invalid entry style `{text}`"),
        )
        .map(SetupSwitch::EntryStyle);

    let orientation = literal("@").keep_right(diag()).map(SetupSwitch::Orientation);

    grid_fix
        .or(default_modifier)
        .or(spacing)
        .or(entry_style)
        .or(orientation)
        .or(prefix)
}

fn entry(g: &Grammar) -> Parser<Entry> {
    let explicit = literal("*")
        .keep_right(g.object())
        .and_then(g.pos_op().many())
        .and_then(g.decor())
        .map(|((object, pos_ops), decor)| Entry::Explicit {
            object,
            pos_ops,
            decor,
        });

    let loose = loose_text()
        .and_then(g.decor())
        .map(|(text, decor)| {
            if text.raw().trim().is_empty() && decor.is_empty() {
                Entry::Empty
            } else {
                Entry::Loose { text, decor }
            }
        });

    explicit.or(loose)
}

/// Verbatim entry text, ending in front of `}`, `&`, `%`, the row
/// separator, or a control word the decor sublanguage claims. Balanced
/// brace groups and unclaimed control sequences pass through verbatim.
fn loose_text() -> Parser<TextLeaf> {
    Parser::new(|cursor, _state| {
        let rest = cursor.remaining();
        let mut idx = 0;
        while idx < rest.len() {
            let ch = match rest[idx..].chars().next() {
                Some(ch) => ch,
                None => break,
            };
            match ch {
                '}' | '&' | '%' => break,
                '\\' => {
                    let after = &rest[idx + 1..];
                    if after.starts_with('\\') {
                        break;
                    }
                    let word_len = after
                        .char_indices()
                        .take_while(|(_, c)| c.is_ascii_alphabetic())
                        .count();
                    if word_len > 0 {
                        if is_decor_keyword(&after[..word_len]) {
                            break;
                        }
                        idx += 1 + word_len;
                    } else {
                        // Backslash plus one non-letter char, e.g. `\;`.
                        let step = after.chars().next().map(char::len_utf8).unwrap_or(0);
                        idx += 1 + step;
                    }
                }
                '{' => match balanced_group_len(&rest[idx..]) {
                    Some(group) => idx += group,
                    None => break,
                },
                _ => idx += ch.len_utf8(),
            }
        }
        let leaf = cursor.context().create_leaf(&rest[..idx]);
        ParseResult::success(leaf, cursor.advance(idx))
    })
}

/// Byte length of the balanced `{...}` group at the start of `text`, or
/// `None` when the group never closes.
fn balanced_group_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (idx, ch) in text.char_indices() {
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
                    return Some(idx + 1);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Command;
    use crate::combinator::parse_all;
    use crate::context::ParseContext;

    fn matrix(input: &str) -> Matrix {
        parse_all(&Grammar::new().matrix(), input, 0, ParseContext::new())
            .unwrap()
            .value
    }

    #[test]
    fn rows_and_entries_split_on_separators() {
        let parsed = matrix("{A & B \\\\ C & D}");
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].0.len(), 2);
        match &parsed.rows[0].0[0] {
            Entry::Loose { text, .. } => assert_eq!(text.raw(), "A "),
            other => panic!("expected loose entry, got {other:?}"),
        }
    }

    #[test]
    fn trailing_empty_row_is_elided() {
        let parsed = matrix("{A & B \\\\}");
        assert_eq!(parsed.rows.len(), 1);
    }

    #[test]
    fn entry_decor_starts_at_a_command() {
        let parsed = matrix("{A \\ar[r] & B}");
        match &parsed.rows[0].0[0] {
            Entry::Loose { text, decor } => {
                assert_eq!(text.raw(), "A ");
                assert!(matches!(decor.0[0], Command::Ar(_)));
            }
            other => panic!("expected loose entry, got {other:?}"),
        }
    }

    #[test]
    fn loose_text_keeps_groups_and_plain_control_sequences() {
        let parsed = matrix("{A_{i} \\otimes B & C}");
        match &parsed.rows[0].0[0] {
            Entry::Loose { text, .. } => assert_eq!(text.raw(), "A_{i} \\otimes B "),
            other => panic!("expected loose entry, got {other:?}"),
        }
    }

    #[test]
    fn explicit_entries_take_an_object() {
        let parsed = matrix("{*+[o]{x} & y}");
        assert!(matches!(parsed.rows[0].0[0], Entry::Explicit { .. }));
    }

    #[test]
    fn empty_cells_are_empty() {
        let parsed = matrix("{A & & B}");
        assert_eq!(parsed.rows[0].0[1], Entry::Empty);
    }

    #[test]
    fn setup_switches() {
        let parsed = matrix("@R+1em@!C{A}");
        assert_eq!(
            parsed.setup,
            vec![
                SetupSwitch::Spacing {
                    axis: Axis::Row,
                    op: SpacingOp::Grow,
                    amount: crate::ast::Dimen::new(1.0, "em"),
                },
                SetupSwitch::GridFix(GridFix::Columns),
            ]
        );
    }

    #[test]
    fn round_trip_through_pretty() {
        for input in ["{A&B\\\\C&D}", "@=0pt{A&B}", "{A\\ar[r]&B}"] {
            let parsed = matrix(input);
            let printed = parsed.pretty();
            let tail = printed.trim_start_matches("\\xymatrix");
            assert_eq!(matrix(tail), parsed, "input {input:?}");
        }
    }
}
