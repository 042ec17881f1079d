//! Paths: via points, turns, labels, and the failure continuation.
//!
//! A path is parsed against a continuation: the elements to append when the
//! input runs out of path tokens. `~{...}` parses a sub-path with an empty
//! continuation and splices it in front of the remainder; `~={...}` rebinds
//! the continuation for the remainder. The returned tree is already
//! flattened, so stringification never reprints the `~` forms.

use std::rc::Rc;

use crate::ast::{Anchor, Diag, Label, LabelSide, Path, PathElement, Segment, Turn};
use crate::combinator::{literal, succeed_with, Parser};

use super::pos::nonempty_place;
use super::primitives::{diag, dimen};
use super::Grammar;

pub fn build_path(g: Grammar) -> Parser<Path> {
    path_with_continuation(&g, Rc::new(Vec::new())).map(Path)
}

/// A path parser with an explicit failure continuation.
pub fn path_with_continuation(
    g: &Grammar,
    cont: Rc<Vec<PathElement>>,
) -> Parser<Vec<PathElement>> {
    let rest = {
        let g = g.clone();
        let cont = Rc::clone(&cont);
        Parser::lazy(move || path_with_continuation(&g, Rc::clone(&cont)))
    };

    let sub_path = {
        let g = g.clone();
        Parser::lazy(move || path_with_continuation(&g, Rc::new(Vec::new())))
    };

    let rebind = literal("~")
        .keep_right(literal("="))
        .keep_right(literal("{"))
        .keep_right(sub_path.clone())
        .keep_left(literal("}"))
        .flat_map({
            let g = g.clone();
            move |new_cont| path_with_continuation(&g, Rc::new(new_cont))
        });

    let splice = literal("~")
        .keep_right(literal("{"))
        .keep_right(sub_path)
        .keep_left(literal("}"))
        .and_then(rest.clone())
        .map(|(mut inner, mut tail)| {
            inner.append(&mut tail);
            inner
        });

    let via = literal("'")
        .keep_right(segment(g))
        .and_then(rest.clone())
        .map(|(seg, tail)| prepend(PathElement::Via(seg), tail));

    let turn = literal("`")
        .keep_right(diag().opt().map(|d| d.unwrap_or(Diag::Default)))
        .and_then(literal("/").keep_right(dimen()).opt())
        .map(|(diag, radius)| Turn { diag, radius })
        .and_then(rest)
        .map(|(turn, tail)| prepend(PathElement::Turn(turn), tail));

    let last = segment(g).map(|seg| vec![PathElement::Segment(seg)]);

    let finish = {
        let cont = cont;
        succeed_with(move || (*cont).clone())
    };

    rebind.or(splice).or(via).or(turn).or(last).or(finish)
}

fn prepend(head: PathElement, mut tail: Vec<PathElement>) -> Vec<PathElement> {
    tail.insert(0, head);
    tail
}

fn segment(g: &Grammar) -> Parser<Segment> {
    let slide = literal("<")
        .keep_right(dimen())
        .keep_left(literal(">"))
        .opt();
    g.nonempty_pos()
        .and_then(slide)
        .and_then(label(g).many())
        .map(|((pos, slide), labels)| Segment { pos, slide, labels })
}

fn label(g: &Grammar) -> Parser<Label> {
    let side = literal("^")
        .map(|_| LabelSide::Above)
        .or(literal("_").map(|_| LabelSide::Below))
        .or(literal("|").map(|_| LabelSide::Inline));

    let anchor = literal("-")
        .map(|_| Anchor::Minus)
        .or(nonempty_place(g).map(Anchor::Place))
        .opt();

    side.and_then(anchor)
        .and_then(g.label_object())
        .map(|((side, anchor), object)| Label {
            side,
            anchor,
            object,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Coord;
    use crate::combinator::parse_all;
    use crate::context::ParseContext;

    fn path(input: &str) -> Path {
        parse_all(&Grammar::new().path(), input, 0, ParseContext::new())
            .unwrap()
            .value
    }

    #[test]
    fn simple_segment_with_labels() {
        let parsed = path("[r]^f_g");
        assert_eq!(parsed.0.len(), 1);
        match &parsed.0[0] {
            PathElement::Segment(seg) => {
                assert_eq!(seg.pos.coord, Coord::Hops("r".to_string()));
                assert_eq!(seg.labels.len(), 2);
                assert_eq!(seg.labels[0].side, LabelSide::Above);
                assert_eq!(seg.labels[1].side, LabelSide::Below);
            }
            other => panic!("expected segment, got {other:?}"),
        }
    }

    #[test]
    fn via_points_precede_the_final_segment() {
        let parsed = path("'(1,0)'(2,0)(3,0)");
        assert_eq!(parsed.0.len(), 3);
        assert!(matches!(parsed.0[0], PathElement::Via(_)));
        assert!(matches!(parsed.0[1], PathElement::Via(_)));
        assert!(matches!(parsed.0[2], PathElement::Segment(_)));
    }

    #[test]
    fn turns_carry_diagonal_and_radius() {
        let parsed = path("`d/4pt[r]");
        match &parsed.0[0] {
            PathElement::Turn(turn) => {
                assert_eq!(turn.diag, Diag::D);
                assert!(turn.radius.is_some());
            }
            other => panic!("expected turn, got {other:?}"),
        }
        assert!(matches!(parsed.0[1], PathElement::Segment(_)));
    }

    #[test]
    fn splice_flattens_the_inner_path() {
        // The spliced sub-path contributes its elements in place; the
        // printed form has no trace of the `~{...}`.
        let parsed = path("~{'(1,0)}(2,0)");
        assert_eq!(parsed.0.len(), 2);
        assert!(matches!(parsed.0[0], PathElement::Via(_)));
        assert!(matches!(parsed.0[1], PathElement::Segment(_)));
        assert_eq!(parsed.pretty(), "'(1,0)(2,0)");
    }

    #[test]
    fn rebound_continuation_applies_when_the_path_ends() {
        let parsed = path("~={(9,9)}'(1,0)");
        assert_eq!(parsed.0.len(), 2);
        assert!(matches!(parsed.0[0], PathElement::Via(_)));
        match &parsed.0[1] {
            PathElement::Segment(seg) => assert_eq!(seg.pos.pretty(), "(9,9)"),
            other => panic!("expected segment from continuation, got {other:?}"),
        }
    }

    #[test]
    fn empty_path_yields_no_elements() {
        assert_eq!(path("").0.len(), 0);
    }

    #[test]
    fn labels_with_anchors() {
        let parsed = path("[r]^-f|(0.3){g}");
        match &parsed.0[0] {
            PathElement::Segment(seg) => {
                assert_eq!(seg.labels[0].anchor, Some(Anchor::Minus));
                assert!(matches!(seg.labels[1].anchor, Some(Anchor::Place(_))));
            }
            other => panic!("expected segment, got {other:?}"),
        }
    }

    #[test]
    fn round_trip_through_pretty() {
        for input in ["[r]^f", "'(1,0)<2pt>(2,0)_g", "`r[u]"] {
            let parsed = path(input);
            assert_eq!(path(&parsed.pretty()), parsed, "input {input:?}");
        }
    }
}
