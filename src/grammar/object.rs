//! Objects, modifiers, shapes and the object-box alternatives.

use crate::ast::{
    Cir, CirArc, Curve, CurveOption, CurvePosItem, Diag, Dir, Frame, FrameRefinement, Modifier,
    Object, ObjectBox, Orient, Shape, Variant,
};
use crate::combinator::{balanced_braces, fail, literal, regex, regex_literal, succeed, Parser};

use super::primitives::{control_word, diag, leaf_of};
use super::{is_decor_keyword, Grammar};

pub fn build_object(g: Grammar) -> Parser<Object> {
    g.modifier()
        .many()
        .and_then(g.object_box())
        .map(|(modifiers, body)| Object { modifiers, body })
}

pub fn build_modifier(g: Grammar) -> Parser<Modifier> {
    let skew = literal("!").keep_right(g.vector().opt()).map(|v| match v {
        Some(v) => Modifier::Vector(v),
        None => Modifier::ResetRef,
    });
    let grow = literal("+").keep_right(g.vector().opt()).map(Modifier::Grow);
    let shrink = literal("-")
        .keep_right(g.vector().opt())
        .map(Modifier::Shrink);
    let set = literal("=").keep_right(g.vector().opt()).map(Modifier::Set);
    let shape = literal("[")
        .keep_right(shape_body(&g))
        .keep_left(literal("]"))
        .map(Modifier::Shape);
    let invisible = literal("i").map(|_| Modifier::Invisible);
    let hidden = literal("h").map(|_| Modifier::Hidden);
    let tilt = g.direction().map(Modifier::Direction);

    skew.or(grow)
        .or(shrink)
        .or(set)
        .or(shape)
        .or(invisible)
        .or(hidden)
        .or(tilt)
}

pub(super) fn shape_body(g: &Grammar) -> Parser<Shape> {
    let point = literal(".").map(|_| Shape::Point);

    let refinement = literal(":").keep_right(
        g.vector()
            .map(FrameRefinement::Radius)
            .or(regex(r"[a-zA-Z]+").map(FrameRefinement::Color)),
    );
    let frame = regex(r"F[-=o.]*")
        .and_then(refinement.many())
        .map(|(style, refinements)| Shape::Frame { style, refinements });

    let named = regex(r"[a-zA-Z]+").map(Shape::Named);

    point.or(frame).or(named).or(succeed(Shape::Rect))
}

pub fn build_object_box(g: Grammar) -> Parser<ObjectBox> {
    let text = leaf_of(balanced_braces()).map(ObjectBox::Text);

    let keyword = control_word().flat_map(move |word| match word.as_str() {
        "dir" => dir_tail(),
        "cir" => cir_tail(&g),
        "frm" => frm_tail(&g),
        "object" => g.object().map(|obj| ObjectBox::Wrap(Box::new(obj))),
        "composite" => composite_tail(&g),
        "xybox" => xybox_tail(&g),
        "xymatrix" => g.matrix().map(|m| ObjectBox::Matrix(Box::new(m))),
        "crv" => curve_tail(&g),
        _ if is_decor_keyword(&word) => fail(format!("`\\{word}` is not an object")),
        _ => texbox_tail(word),
    });

    text.or(keyword)
}

fn dir_tail() -> Parser<ObjectBox> {
    let variant = regex_literal(r"[\^_0123]?").map(variant_of);
    variant
        .and_then(balanced_braces())
        .map(|(variant, main)| ObjectBox::Dir(Dir { variant, main }))
}

pub(super) fn variant_of(text: String) -> Variant {
    match text.as_str() {
        "^" => Variant::Upper,
        "_" => Variant::Lower,
        "0" => Variant::Plain,
        "1" => Variant::Single,
        "2" => Variant::Double,
        "3" => Variant::Triple,
        _ => Variant::Default,
    }
}

fn cir_tail(g: &Grammar) -> Parser<ObjectBox> {
    let orient = literal("^")
        .map(|_| Orient::Ccw)
        .or(literal("_").map(|_| Orient::Cw));
    let arc = diag()
        .opt()
        .map(|d| d.unwrap_or(Diag::Default))
        .and_then(orient)
        .and_then(diag().opt().map(|d| d.unwrap_or(Diag::Default)))
        .map(|((start, orient), end)| CirArc { start, orient, end });

    g.vector()
        .opt()
        .keep_left(literal("{"))
        .and_then(arc.opt())
        .keep_left(literal("}"))
        .map(|(radius, arc)| ObjectBox::Cir(Cir { radius, arc }))
}

fn frm_tail(g: &Grammar) -> Parser<ObjectBox> {
    g.vector()
        .opt()
        .and_then(balanced_braces())
        .map(|(radius, main)| ObjectBox::Frame(Frame { radius, main }))
}

fn composite_tail(g: &Grammar) -> Parser<ObjectBox> {
    literal("{")
        .keep_right(g.object().sep_by1(literal("*")))
        .keep_left(literal("}"))
        .map(ObjectBox::Composite)
}

fn xybox_tail(g: &Grammar) -> Parser<ObjectBox> {
    literal("{")
        .keep_right(g.pos())
        .and_then(g.decor())
        .keep_left(literal("}"))
        .map(|(pos, decor)| ObjectBox::Xybox(Box::new(pos), decor))
}

fn curve_tail(g: &Grammar) -> Parser<ObjectBox> {
    let option = literal("~").keep_right(
        literal("**")
            .keep_right(g.object())
            .map(CurveOption::Connect)
            .or(literal("*").keep_right(g.object()).map(CurveOption::Drop))
            .or(regex(r"[a-zA-Z]+").map(CurveOption::Style)),
    );

    let item = literal("~@")
        .map(|_| CurvePosItem::Stack)
        .or(g.nonempty_pos().map(CurvePosItem::Pos))
        .or(succeed(CurvePosItem::Current));

    option
        .many()
        .keep_left(literal("{"))
        .and_then(item.sep_by1(literal("&")))
        .keep_left(literal("}"))
        .map(|(options, poslist)| ObjectBox::Curve(Curve { options, poslist }))
}

fn texbox_tail(name: String) -> Parser<ObjectBox> {
    leaf_of(balanced_braces())
        .opt()
        .map(move |body| ObjectBox::TexBox {
            name: name.clone(),
            body,
        })
}

/// Labels allow a bare alphanumeric character as a one-character text box.
pub fn build_label_object(g: Grammar) -> Parser<Object> {
    let short = leaf_of(regex(r"[A-Za-z0-9]"))
        .map(|leaf| Object::plain(ObjectBox::Text(leaf)));
    g.object().or(short)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinator::parse_all;
    use crate::context::ParseContext;

    fn object(input: &str) -> Object {
        parse_all(&Grammar::new().object(), input, 0, ParseContext::new())
            .unwrap()
            .value
    }

    #[test]
    fn text_box_preserves_raw_content() {
        let parsed = object("{A \\otimes B}");
        match &parsed.body {
            ObjectBox::Text(leaf) => assert_eq!(leaf.raw(), "A \\otimes B"),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn modifiers_accumulate_in_order() {
        let parsed = object("+[o][F-]{x}");
        assert_eq!(parsed.modifiers.len(), 3);
        assert!(matches!(parsed.modifiers[0], Modifier::Grow(None)));
        assert!(matches!(
            parsed.modifiers[1],
            Modifier::Shape(Shape::Named(_))
        ));
        assert!(matches!(
            parsed.modifiers[2],
            Modifier::Shape(Shape::Frame { .. })
        ));
    }

    #[test]
    fn dir_variants() {
        let parsed = object("\\dir^{>}");
        match &parsed.body {
            ObjectBox::Dir(dir) => {
                assert_eq!(dir.variant, Variant::Upper);
                assert_eq!(dir.main, ">");
            }
            other => panic!("expected dir, got {other:?}"),
        }
    }

    #[test]
    fn unknown_control_word_is_a_tex_box() {
        let parsed = object("\\alpha");
        assert_eq!(
            parsed.body,
            ObjectBox::TexBox {
                name: "alpha".to_string(),
                body: None
            }
        );
    }

    #[test]
    fn reserved_control_words_are_rejected() {
        assert!(parse_all(&Grammar::new().object(), "\\ar", 0, ParseContext::new()).is_err());
    }

    #[test]
    fn composite_objects() {
        let parsed = object("\\composite{{a}*{b}}");
        match &parsed.body {
            ObjectBox::Composite(parts) => assert_eq!(parts.len(), 2),
            other => panic!("expected composite, got {other:?}"),
        }
    }

    #[test]
    fn curve_with_style_and_poslist() {
        let parsed = object("\\crv~pc{(1,1)&(2,0)}");
        match &parsed.body {
            ObjectBox::Curve(curve) => {
                assert_eq!(curve.options, vec![CurveOption::Style("pc".to_string())]);
                assert_eq!(curve.poslist.len(), 2);
            }
            other => panic!("expected curve, got {other:?}"),
        }
    }

    #[test]
    fn curve_sub_objects() {
        let parsed = object("\\crv~*{.}{(1,1)&(2,0)}");
        match &parsed.body {
            ObjectBox::Curve(curve) => {
                assert!(matches!(curve.options[0], CurveOption::Drop(_)));
            }
            other => panic!("expected curve, got {other:?}"),
        }
        let parsed = object("\\crv~**\\dir{-}{(1,1)&(2,0)}");
        match &parsed.body {
            ObjectBox::Curve(curve) => {
                assert!(matches!(curve.options[0], CurveOption::Connect(_)));
            }
            other => panic!("expected curve, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_through_pretty() {
        for input in [
            "{x}",
            "+<2pt>[F-:<3pt>]{y}",
            "\\dir2{>}",
            "\\cir<4pt>{l^r}",
            "\\frm{-}",
            "\\object!{z}",
            "\\xybox{(1,0)*{a}}",
            "\\crv~*{.}{(1,1)&(2,0)}",
            "\\crv~**\\dir{-}{~@&(2,0)}",
        ] {
            let parsed = object(input);
            assert_eq!(object(&parsed.pretty()), parsed, "input {input:?}");
        }
    }
}
