//! Two-cells: refinement switches and the arrow block.

use crate::ast::{TwocellArrow, TwocellArrowKind, TwocellSwitch};
use crate::combinator::{literal, succeed, Parser};

use super::primitives::factor;
use super::Grammar;

pub fn build_twocell_tail(
    g: Grammar,
) -> Parser<(Vec<TwocellSwitch>, Option<TwocellArrow>)> {
    switch(&g).many().and_then(arrow_block(&g).opt())
}

fn switch(g: &Grammar) -> Parser<TwocellSwitch> {
    let upper = literal("^")
        .keep_right(g.label_object())
        .map(TwocellSwitch::UpperLabel);
    let lower = literal("_")
        .keep_right(g.label_object())
        .map(TwocellSwitch::LowerLabel);
    let omit = literal("\\omit").map(|_| TwocellSwitch::Omit);
    let curvature = literal("~(")
        .keep_right(factor())
        .keep_left(literal(")"))
        .map(TwocellSwitch::Curvature);
    let tail = literal("~`")
        .keep_right(g.label_object())
        .map(TwocellSwitch::Tail);
    let head = literal("~'")
        .keep_right(g.label_object())
        .map(TwocellSwitch::Head);
    let curve_obj = literal("~*")
        .keep_right(g.label_object())
        .map(TwocellSwitch::CurveObj);

    upper
        .or(lower)
        .or(omit)
        .or(curvature)
        .or(tail)
        .or(head)
        .or(curve_obj)
}

fn arrow_block(g: &Grammar) -> Parser<TwocellArrow> {
    let kind = literal("^")
        .map(|_| TwocellArrowKind::Above)
        .or(literal("_").map(|_| TwocellArrowKind::Below))
        .or(literal("=").map(|_| TwocellArrowKind::Equal))
        .or(literal("\\omit").map(|_| TwocellArrowKind::Omit))
        .or(succeed(TwocellArrowKind::Default));

    literal("{")
        .keep_right(factor().opt())
        .and_then(kind)
        .and_then(g.label_object().opt())
        .keep_left(literal("}"))
        .map(|((nudge, kind), label)| TwocellArrow { nudge, kind, label })
}
