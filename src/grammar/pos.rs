//! Positions, coordinates, position operations and places.

use crate::ast::{Coord, Place, PlaceMod, Pos, PosOp};
use crate::combinator::{literal, regex, succeed_with, Parser};

use super::primitives::{dimen, factor, id};
use super::Grammar;

pub fn build_pos(g: Grammar) -> Parser<Pos> {
    g.nonempty_pos()
        .or(succeed_with(|| Pos::new(Coord::Current)))
}

/// A position consuming at least one token: a nonempty coordinate with any
/// operations, or an omitted coordinate with at least one operation.
pub fn build_nonempty_pos(g: Grammar) -> Parser<Pos> {
    let with_coord = g
        .nonempty_coord()
        .and_then(g.pos_op().many())
        .map(|(coord, ops)| Pos { coord, ops });
    let ops_only = g.pos_op().many1().map(|ops| Pos {
        coord: Coord::Current,
        ops,
    });
    with_coord.or(ops_only)
}

pub fn build_coord(g: Grammar) -> Parser<Coord> {
    g.nonempty_coord().or(succeed_with(|| Coord::Current))
}

pub fn build_nonempty_coord(g: Grammar) -> Parser<Coord> {
    let vector = g.vector().map(Coord::Vector);

    let current = literal("c").map(|_| Coord::Current);

    let named = id().map(Coord::Id);

    let stack = regex(r"s(?:[0-9]|\{[0-9]+\})").map_partial(
        |text| {
            let digits = text.trim_start_matches('s').trim_matches(|ch| ch == '{' || ch == '}');
            digits.parse::<usize>().map_err(|_| text)
        },
        |text| format!("invalid stack position `{text}`"),
    );
    let stack = stack.map(Coord::StackPos);

    let hops = regex(r"\[[lrud]*\]").map(|text| Coord::Hops(text[1..text.len() - 1].to_string()));

    let group = literal("{")
        .keep_right(g.pos())
        .and_then(g.decor())
        .keep_left(literal("}"))
        .map(|(pos, decor)| Coord::Group(Box::new(pos), decor));

    vector.or(current).or(named).or(stack).or(hops).or(group)
}

pub fn build_pos_op(g: Grammar) -> Parser<PosOp> {
    let coord_op = |token: &'static str, wrap: fn(Coord) -> PosOp| {
        literal(token).keep_right(g.coord()).map(wrap)
    };

    let connect = literal("**").keep_right(g.object()).map(PosOp::Connect);
    let drop = literal("*").keep_right(g.object()).map(PosOp::Drop);
    let place = literal("?").keep_right(g.place()).map(PosOp::Place);

    let save_macro = literal("=:").keep_right(id()).map(PosOp::SaveMacro);
    let save_stack = literal("=@").keep_right(id()).map(PosOp::SaveStack);
    let save_pos = literal("=").keep_right(id()).map(PosOp::SavePos);

    let stack_init = literal("@i").map(|_| PosOp::StackInit);
    let frame_enter = literal("@(").map(|_| PosOp::FrameEnter);
    let frame_leave = literal("@)").map(|_| PosOp::FrameLeave);

    connect
        .or(drop)
        .or(coord_op("+", PosOp::Plus))
        .or(coord_op("-", PosOp::Minus))
        .or(coord_op("!", PosOp::Skew))
        .or(coord_op(".", PosOp::Cover))
        .or(coord_op(",", PosOp::Then))
        .or(coord_op(";", PosOp::Swap))
        .or(coord_op("::", PosOp::AltBase))
        .or(coord_op(":", PosOp::Base))
        .or(place)
        .or(stack_init)
        .or(frame_enter)
        .or(frame_leave)
        .or(coord_op("@+", PosOp::StackPush))
        .or(coord_op("@-", PosOp::StackPop))
        .or(coord_op("@=", PosOp::StackLoad))
        .or(coord_op("@@", PosOp::StackEach))
        .or(save_macro)
        .or(save_stack)
        .or(save_pos)
}

pub fn build_place(_g: Grammar) -> Parser<Place> {
    let shave_left = literal("<").map(|_| PlaceMod::ShaveLeft);
    let shave_right = literal(">").map(|_| PlaceMod::ShaveRight);
    let at_factor = literal("(")
        .keep_right(factor())
        .keep_left(literal(")"))
        .map(PlaceMod::Factor);
    let place_mod = shave_left.or(shave_right).or(at_factor);

    let slide = literal("/")
        .keep_right(dimen())
        .keep_left(literal("/"))
        .opt();

    place_mod
        .many()
        .and_then(slide)
        .map(|(mods, slide)| Place { mods, slide })
}

/// A place that must consume at least one token, as label anchors require.
pub fn nonempty_place(g: &Grammar) -> Parser<Place> {
    g.place().map_partial(
        |place| {
            if place.is_empty() {
                Err(place)
            } else {
                Ok(place)
            }
        },
        |_| "expected a place".to_string(),
    )
}
