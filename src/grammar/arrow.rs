//! Arrows: `\ar` form prefixes and their target path.

use crate::ast::{Arrow, ArrowForm};
use crate::combinator::{literal, regex_literal, Parser};

use super::object::variant_of;
use super::pos::nonempty_place;
use super::primitives::dimen;
use super::vector::direction_or_default;
use super::Grammar;

pub fn build_arrow(g: Grammar) -> Parser<Arrow> {
    arrow_form(&g)
        .many()
        .and_then(g.path())
        .map(|(forms, path)| Arrow { forms, path })
}

fn arrow_form(g: &Grammar) -> Parser<ArrowForm> {
    let curve_dir = literal("/")
        .keep_right(direction_or_default(g))
        .and_then(dimen().opt())
        .keep_left(literal("/"))
        .map(|(dir, amount)| ArrowForm::CurveDir { dir, amount });

    let curve_in_out = literal("(")
        .keep_right(g.direction())
        .keep_left(literal(","))
        .and_then(g.direction())
        .keep_left(literal(")"))
        .map(|(out, into)| ArrowForm::CurveInOut { out, into });

    let curve_via = literal("`")
        .keep_right(literal("{"))
        .keep_right(g.nonempty_coord().sep_by1(literal(",")))
        .keep_left(literal("}"))
        .map(ArrowForm::CurveVia);

    let shape = literal("[")
        .keep_right(super::object::shape_body(g))
        .keep_left(literal("]"))
        .map(ArrowForm::Shape);

    let modifiers = literal("*")
        .keep_right(literal("{"))
        .keep_right(g.modifier().many())
        .keep_left(literal("}"))
        .map(ArrowForm::Modifiers);

    let slide = literal("<")
        .keep_right(dimen())
        .keep_left(literal(">"))
        .map(ArrowForm::Slide);

    let default_place = literal("?")
        .keep_right(nonempty_place(g))
        .map(ArrowForm::DefaultPlace);

    let mode = regex_literal(r"[\^_0123]?")
        .map(variant_of)
        .and_then(mode_body())
        .map(|(variant, (tail, stem, head))| ArrowForm::Mode {
            variant,
            tail,
            stem,
            head,
        });

    let variant_only = regex_literal(r"[\^_0123]")
        .map(variant_of)
        .map(ArrowForm::VariantOnly);

    literal("@").keep_right(
        curve_dir
            .or(curve_in_out)
            .or(curve_via)
            .or(shape)
            .or(modifiers)
            .or(slide)
            .or(default_place)
            .or(mode)
            .or(variant_only),
    )
}

/// The `{tail stem head}` body of a mode form. A run of tip characters only
/// counts as the tail when a stem character follows it.
fn mode_body() -> Parser<(String, String, String)> {
    let tail = regex_literal(r"[<>|ox+/()]+")
        .keep_left(regex_literal(r"[-=.~:]").peek())
        .opt()
        .map(Option::unwrap_or_default);
    let stem = regex_literal(r"[-=.~:]*");
    let head = regex_literal(r"[<>|ox+/()]*");

    literal("{")
        .keep_right(tail)
        .and_then(stem)
        .and_then(head)
        .keep_left(literal("}"))
        .map(|((tail, stem), head)| (tail, stem, head))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Coord, PathElement, Variant};
    use crate::combinator::parse_all;
    use crate::context::ParseContext;

    fn arrow(input: &str) -> Arrow {
        parse_all(&Grammar::new().arrow(), input, 0, ParseContext::new())
            .unwrap()
            .value
    }

    #[test]
    fn mode_splits_tail_stem_head() {
        let parsed = arrow("@{>->}[r]");
        assert_eq!(
            parsed.forms,
            vec![ArrowForm::Mode {
                variant: Variant::Default,
                tail: ">".to_string(),
                stem: "-".to_string(),
                head: ">".to_string(),
            }]
        );
    }

    #[test]
    fn head_without_stem_is_a_head() {
        let parsed = arrow("@{>}[r]");
        match &parsed.forms[0] {
            ArrowForm::Mode { tail, stem, head, .. } => {
                assert_eq!(tail, "");
                assert_eq!(stem, "");
                assert_eq!(head, ">");
            }
            other => panic!("expected mode, got {other:?}"),
        }
    }

    #[test]
    fn variant_only_form_never_swallows_the_path() {
        // `@` followed by `[r]` is a shape form, not a bare variant in
        // front of a hop target; the bare variant requires a variant char.
        let parsed = arrow("@2[r]");
        assert_eq!(parsed.forms, vec![ArrowForm::VariantOnly(Variant::Double)]);
        assert!(matches!(parsed.path.0[0], PathElement::Segment(_)));
    }

    #[test]
    fn forms_accumulate_before_the_path() {
        let parsed = arrow("@/^1pc/@<1ex>[dr]^f");
        assert_eq!(parsed.forms.len(), 2);
        assert!(matches!(parsed.forms[0], ArrowForm::CurveDir { .. }));
        assert!(matches!(parsed.forms[1], ArrowForm::Slide(_)));
        assert_eq!(parsed.path.0.len(), 1);
    }

    #[test]
    fn curve_via_control_points() {
        let parsed = arrow("@`{(1,0),(2,1)}[r]");
        match &parsed.forms[0] {
            ArrowForm::CurveVia(coords) => {
                assert_eq!(coords.len(), 2);
                assert!(matches!(coords[0], Coord::Vector(_)));
            }
            other => panic!("expected curve-via, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_through_pretty() {
        for input in [
            "\\ar@{>->}[r]",
            "\\ar@2{->}[u]^f",
            "\\ar@/_1pc/[d]",
            "\\ar@(r,d)[l]",
            "\\ar@<1ex>@[F][r]",
        ] {
            let parsed = parse_all(
                &Grammar::new().decor(),
                input,
                0,
                ParseContext::new(),
            )
            .unwrap()
            .value;
            let reparsed = parse_all(
                &Grammar::new().decor(),
                &parsed.pretty(),
                0,
                ParseContext::new(),
            )
            .unwrap()
            .value;
            assert_eq!(reparsed, parsed, "input {input:?}");
        }
    }
}
