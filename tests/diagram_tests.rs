//! End-to-end parses of whole diagram bodies.

use xyparse::ast::{Command, Coord, Entry, ObjectBox, PathElement, PosOp};
use xyparse::{parse_all, Grammar, ParseContext, XyError};

fn diagram(input: &str) -> (xyparse::ast::Pos, xyparse::ast::Decor) {
    let grammar = Grammar::new();
    parse_all(&grammar.diagram(), input, 0, ParseContext::new())
        .unwrap_or_else(|err| panic!("parse of {input:?} failed: {err}"))
        .value
}

fn diagram_err(input: &str) -> XyError {
    let grammar = Grammar::new();
    match parse_all(&grammar.diagram(), input, 0, ParseContext::new()) {
        Ok(ok) => panic!("parse of {input:?} unexpectedly succeeded: {:?}", ok.value),
        Err(err) => err,
    }
}

#[test]
fn drop_and_connect_along_a_position() {
    let (pos, decor) = diagram("(0,0)*{A};(10,0)*{B}**\\dir{-}");
    assert!(matches!(pos.coord, Coord::Vector(_)));
    assert_eq!(pos.ops.len(), 4);
    assert!(matches!(pos.ops[0], PosOp::Drop(_)));
    assert!(matches!(pos.ops[1], PosOp::Swap(_)));
    assert!(matches!(pos.ops[3], PosOp::Connect(_)));
    assert!(decor.is_empty());
}

#[test]
fn whitespace_is_insignificant_between_tokens() {
    let compact = diagram("(0,0)*{A};(10,0)*{B}**\\dir{-}");
    let spaced = diagram("(0,0) * {A} ; (10,0) * {B} ** \\dir{-}");
    assert_eq!(compact, spaced);
}

#[test]
fn matrix_with_arrows_between_entries() {
    let (_, decor) = diagram("\\xymatrix{A \\ar[r]^f & B \\\\ C \\ar[ur]_g & }");
    let matrix = match &decor.0[0] {
        Command::Drop(obj) => match &obj.body {
            ObjectBox::Matrix(m) => m.clone(),
            other => panic!("expected matrix, got {other:?}"),
        },
        other => panic!("expected drop, got {other:?}"),
    };
    assert_eq!(matrix.rows.len(), 2);
    match &matrix.rows[0].0[0] {
        Entry::Loose { text, decor } => {
            assert_eq!(text.raw(), "A ");
            match &decor.0[0] {
                Command::Ar(arrow) => match &arrow.path.0[0] {
                    PathElement::Segment(seg) => {
                        assert_eq!(seg.pos.coord, Coord::Hops("r".to_string()));
                        assert_eq!(seg.labels.len(), 1);
                    }
                    other => panic!("expected segment, got {other:?}"),
                },
                other => panic!("expected arrow, got {other:?}"),
            }
        }
        other => panic!("expected loose entry, got {other:?}"),
    }
    assert_eq!(matrix.rows[1].0[1], Entry::Empty);
}

#[test]
fn diagnostics_carry_the_farthest_failure() {
    let err = diagram_err("(0,0)*{A};(10,0)**\\dir{-}*{unclosed");
    match err {
        XyError::Syntax(err) => {
            // The report points at the unclosed brace deep in the input,
            // not at whichever early alternative failed last.
            assert!(err.column > 30, "column {} too early", err.column);
            assert_eq!(err.line, 1);
            assert!(err.message.contains('{'), "message {:?}", err.message);
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn committed_errors_stop_alternation() {
    // After `\afterPOS` the braced decor is mandatory; the failure must
    // not degrade into "expected end of input" at the control word.
    let err = diagram_err("c\\afterPOS[r]");
    match err {
        XyError::Syntax(err) => assert!(err.message.contains('{')),
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn save_restore_pairs() {
    let (_, decor) = diagram("\\save(1,0)*{x}\\restore\\drop{y}");
    assert!(matches!(decor.0[0], Command::Save(_)));
    assert!(matches!(decor.0[1], Command::Restore));
    assert!(matches!(decor.0[2], Command::Drop(_)));
}

#[test]
fn parse_reports_the_consumed_length() {
    let grammar = Grammar::new();
    let ok = xyparse::parse(&grammar.pos(), "(1,0)*{A} trailing", 0, ParseContext::new())
        .expect("prefix parse");
    assert_eq!(ok.end, 9);
}

#[test]
fn custom_whitespace_policy_applies_everywhere() {
    let grammar = Grammar::new();
    let context = ParseContext::new().with_whitespace(r"[ ]*");
    // Newlines are no longer skippable, so a line break splits the parse.
    assert!(parse_all(&grammar.diagram(), "(0,0)\n*{A}", 0, context.clone()).is_err());
    assert!(parse_all(&grammar.diagram(), "(0,0) *{A}", 0, context).is_ok());
}

#[test]
fn leaf_maker_sees_every_text_fragment() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let context = ParseContext::new().with_leaf_maker(move |raw| {
        sink.borrow_mut().push(raw.to_string());
        xyparse::TextLeaf::new(raw)
    });

    let grammar = Grammar::new();
    parse_all(&grammar.diagram(), "(0,0)*{A};(1,0)*{B}", 0, context).expect("parse");
    assert_eq!(*seen.borrow(), vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn round_trip_whole_diagrams() {
    let inputs = [
        "(0,0)*{A};(10,0)*{B}**\\dir{-}",
        "c\\save\\drop{x}\\restore",
        "\\POS(1,0)?(0.5)*\\dir{>}",
        "\\PATH'(1,0)^f(2,0)_g",
        "\\xymatrix{A\\ar[r]^f&B\\\\C&D}",
        "\\ar@{>->}@<1ex>[dr]|h",
        "\\rtwocell^f_g{\\omit}",
        "\\connect\\crv~pc{(1,1)&(2,0)}",
    ];
    for input in inputs {
        let parsed = diagram(input);
        let printed = format!("{}{}", parsed.0.pretty(), parsed.1.pretty());
        assert_eq!(diagram(&printed), parsed, "input {input:?}");
    }
}

#[test]
fn serde_round_trip_preserves_the_tree() {
    let parsed = diagram("(0,0)*{A}\\ar@/^1pc/[r]^f");
    let json = serde_json::to_string(&parsed).expect("serialize");
    let back: (xyparse::ast::Pos, xyparse::ast::Decor) =
        serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, parsed);
}
