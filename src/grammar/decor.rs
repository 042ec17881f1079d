//! Decorations: the command dispatch behind every `\word`.

use crate::ast::{Command, Decor, Object, ObjectBox, Pos, Twocell, TwocellKind};
use crate::combinator::{fail, literal, regex, succeed, Parser};

use super::primitives::control_word;
use super::Grammar;

pub fn build_decor(g: Grammar) -> Parser<Decor> {
    g.command().many().map(Decor)
}

/// One command. The control word is parsed first; an unrecognized word is a
/// recoverable failure (it may be literal text to an enclosing rule), while
/// a malformed argument after a recognized word is a committed error.
pub fn build_command(g: Grammar) -> Parser<Command> {
    control_word().flat_map(move |word| match word.as_str() {
        "save" => g.pos().commit().map(Command::Save),
        "restore" => succeed(Command::Restore),
        "POS" => g.pos().commit().map(Command::Pos),
        "afterPOS" => braced_decor(&g)
            .and_then(g.pos())
            .commit()
            .map(|(decor, pos)| Command::AfterPos(decor, pos)),
        "drop" => g.object().commit().map(Command::Drop),
        "connect" => g.object().commit().map(Command::Connect),
        "PATH" => g.path().commit().map(Command::Path),
        "afterPATH" => braced_decor(&g)
            .and_then(g.path())
            .commit()
            .map(|(decor, path)| Command::AfterPath(decor, path)),
        "ar" => g.arrow().commit().map(Command::Ar),
        "xymatrix" => g
            .matrix()
            .commit()
            .map(|m| Command::Drop(Object::plain(ObjectBox::Matrix(Box::new(m))))),
        "xyignore" => braced_pos_decor(&g)
            .map(|(pos, decor)| Command::Ignore(pos, decor)),
        "xyshowAST" => braced_pos_decor(&g)
            .map(|(pos, decor)| Command::ShowAst(pos, decor)),
        "utwocell" => twocell(&g, TwocellKind::U),
        "dtwocell" => twocell(&g, TwocellKind::D),
        "ltwocell" => twocell(&g, TwocellKind::L),
        "rtwocell" => twocell(&g, TwocellKind::R),
        "ultwocell" => twocell(&g, TwocellKind::UL),
        "urtwocell" => twocell(&g, TwocellKind::UR),
        "dltwocell" => twocell(&g, TwocellKind::DL),
        "drtwocell" => twocell(&g, TwocellKind::DR),
        "xtwocell" => {
            let hops = regex(r"\[[lrud]*\]").map(|text| text[1..text.len() - 1].to_string());
            let g = g.clone();
            hops.commit()
                .flat_map(move |hops| twocell(&g, TwocellKind::X { hops }))
        }
        _ => fail(format!("unknown command `\\{word}`")),
    })
}

fn braced_decor(g: &Grammar) -> Parser<Decor> {
    literal("{")
        .keep_right(g.decor())
        .keep_left(literal("}"))
}

fn braced_pos_decor(g: &Grammar) -> Parser<(Pos, Decor)> {
    literal("{")
        .commit()
        .keep_right(g.pos())
        .and_then(g.decor())
        .keep_left(literal("}").commit())
}

fn twocell(g: &Grammar, kind: TwocellKind) -> Parser<Command> {
    g.twocell_tail().map(move |(switches, arrow)| {
        Command::Twocell(Twocell {
            kind: kind.clone(),
            switches,
            arrow,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::parse_all;
    use crate::context::ParseContext;
    use crate::error::XyError;

    fn decor(input: &str) -> Decor {
        parse_all(&Grammar::new().decor(), input, 0, ParseContext::new())
            .unwrap()
            .value
    }

    #[test]
    fn commands_accumulate_in_order() {
        let parsed = decor("\\save\\drop{x}\\restore");
        assert_eq!(parsed.0.len(), 3);
        assert!(matches!(parsed.0[0], Command::Save(_)));
        assert!(matches!(parsed.0[1], Command::Drop(_)));
        assert!(matches!(parsed.0[2], Command::Restore));
    }

    #[test]
    fn unknown_control_word_stops_the_decor() {
        // `\alpha` is not a command; an empty decor parses with the word
        // left unconsumed, so requiring end-of-input fails.
        assert!(parse_all(&Grammar::new().decor(), "\\alpha", 0, ParseContext::new()).is_err());
        assert_eq!(decor("").0.len(), 0);
    }

    #[test]
    fn malformed_argument_after_keyword_is_committed() {
        // `\afterPOS` without its braced decor must not backtrack into
        // "unknown command" territory.
        let err = parse_all(
            &Grammar::new().decor(),
            "\\afterPOS(1,0)",
            0,
            ParseContext::new(),
        )
        .unwrap_err();
        assert!(matches!(err, XyError::Syntax(_)));
    }

    #[test]
    fn after_pos_carries_decor_and_target() {
        let parsed = decor("\\afterPOS{\\drop{x}}(1,0)");
        match &parsed.0[0] {
            Command::AfterPos(inner, pos) => {
                assert_eq!(inner.0.len(), 1);
                assert_eq!(pos.pretty(), "(1,0)");
            }
            other => panic!("expected afterPOS, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_through_pretty() {
        for input in [
            "\\save\\restore",
            "\\POS(1,0)",
            "\\drop{x}\\connect\\dir{-}",
            "\\xyignore{(1,0)\\drop{y}}",
        ] {
            let parsed = decor(input);
            assert_eq!(decor(&parsed.pretty()), parsed, "input {input:?}");
        }
    }
}
