//! Vectors, corners, directions and rotations.

use std::rc::Rc;

use crate::ast::{Corner, Diag, Direction, Rotation, Vector};
use crate::combinator::{chain_left, literal, regex, succeed, Parser};

use super::primitives::{diag, dimen, factor, number};
use super::Grammar;

pub fn build_vector(g: Grammar) -> Parser<Vector> {
    let in_cur_base = literal("(")
        .keep_right(factor())
        .keep_left(literal(","))
        .and_then(factor())
        .keep_left(literal(")"))
        .map(|(x, y)| Vector::InCurBase(x, y));

    let abs_pair = literal("<")
        .keep_right(dimen())
        .keep_left(literal(","))
        .and_then(dimen())
        .keep_left(literal(">"))
        .map(|(dx, dy)| Vector::Abs(dx, dy));

    let abs_len = literal("<")
        .keep_right(dimen())
        .keep_left(literal(">"))
        .map(Vector::AbsLen);

    let angle = literal("a")
        .keep_right(literal("("))
        .keep_right(number())
        .keep_left(literal(")"))
        .map(Vector::Angle);

    let along = literal("/")
        .keep_right(direction_or_default(&g))
        .and_then(dimen())
        .keep_left(literal("/"))
        .map(|(dir, d)| Vector::Dir(dir, d));

    let corner_vector = corner()
        .and_then(
            literal("(")
                .keep_right(factor())
                .keep_left(literal(")"))
                .opt(),
        )
        .map(|(c, f)| Vector::Corner(c, f));

    let zero = literal("0").map(|_| Vector::Zero);

    in_cur_base
        .or(abs_pair)
        .or(abs_len)
        .or(angle)
        .or(along)
        .or(corner_vector)
        .or(zero)
}

/// A corner of the reference object. Two-letter forms accept either letter
/// order and are matched before the single letters.
pub fn corner() -> Parser<Corner> {
    regex(r"CL|LC|CR|RC|CD|DC|CU|UC|LD|DL|RD|DR|LU|UL|RU|UR|L|R|D|U|E").map(
        |text| match text.as_str() {
            "CL" | "LC" => Corner::CL,
            "CR" | "RC" => Corner::CR,
            "CD" | "DC" => Corner::CD,
            "CU" | "UC" => Corner::CU,
            "LD" | "DL" => Corner::LD,
            "RD" | "DR" => Corner::RD,
            "LU" | "UL" => Corner::LU,
            "RU" | "UR" => Corner::RU,
            "L" => Corner::L,
            "R" => Corner::R,
            "D" => Corner::D,
            "U" => Corner::U,
            _ => Corner::E,
        },
    )
}

/// A direction consuming at least one token: a base (vector or diagonal)
/// with rotation suffixes, or rotations applied to the default base.
pub fn build_direction(g: Grammar) -> Parser<Direction> {
    let base = literal("v")
        .keep_right(g.vector())
        .map(|v| Direction::Vector(Box::new(v)))
        .or(diag().map(Direction::Diag));

    let first = base.or(rotation()
        .map(|rot| Direction::Rotated(Box::new(Direction::Diag(Diag::Default)), rot)));

    let rotate: Parser<Rc<dyn Fn(Direction, ()) -> Direction>> = rotation().map(|rot| {
        Rc::new(move |dir, ()| Direction::Rotated(Box::new(dir), rot.clone()))
            as Rc<dyn Fn(Direction, ()) -> Direction>
    });

    chain_left(first, succeed(()), rotate)
}

/// A direction where omission means "the direction of the last connection".
pub fn direction_or_default(g: &Grammar) -> Parser<Direction> {
    g.direction()
        .opt()
        .map(|dir| dir.unwrap_or(Direction::Diag(Diag::Default)))
}

fn rotation() -> Parser<Rotation> {
    let ccw = literal("^").map(|_| Rotation::Ccw);
    let cw = literal("_").map(|_| Rotation::Cw);
    let angle = literal(":")
        .keep_right(literal("a"))
        .keep_right(literal("("))
        .keep_right(number())
        .keep_left(literal(")"))
        .map(Rotation::Angle);
    ccw.or(cw).or(angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Dimen, Factor};
    use crate::combinator::parse_all;
    use crate::context::ParseContext;

    fn vector(input: &str) -> Vector {
        parse_all(&Grammar::new().vector(), input, 0, ParseContext::new())
            .unwrap()
            .value
    }

    fn direction(input: &str) -> Direction {
        parse_all(&Grammar::new().direction(), input, 0, ParseContext::new())
            .unwrap()
            .value
    }

    #[test]
    fn vector_notations() {
        assert_eq!(
            vector("(1,0.5)"),
            Vector::InCurBase(Factor(1.0), Factor(0.5))
        );
        assert_eq!(
            vector("<1pt,2pt>"),
            Vector::Abs(Dimen::new(1.0, "pt"), Dimen::new(2.0, "pt"))
        );
        assert_eq!(vector("<3em>"), Vector::AbsLen(Dimen::new(3.0, "em")));
        assert_eq!(vector("a(45)"), Vector::Angle(45.0));
        assert_eq!(vector("0"), Vector::Zero);
    }

    #[test]
    fn corner_letter_order_is_canonicalized() {
        assert_eq!(vector("LD"), Vector::Corner(Corner::LD, None));
        assert_eq!(vector("DL"), Vector::Corner(Corner::LD, None));
        assert_eq!(
            vector("U(2)"),
            Vector::Corner(Corner::U, Some(Factor(2.0)))
        );
    }

    #[test]
    fn two_letter_corner_wins_over_single_letter() {
        // `LD` must not parse as the corner `L` with `D` left unconsumed.
        assert_eq!(vector("LD"), Vector::Corner(Corner::LD, None));
    }

    #[test]
    fn direction_rotations_fold_left() {
        assert_eq!(
            direction("r^"),
            Direction::Rotated(Box::new(Direction::Diag(Diag::R)), Rotation::Ccw)
        );
        assert_eq!(
            direction("^"),
            Direction::Rotated(Box::new(Direction::Diag(Diag::Default)), Rotation::Ccw)
        );
        assert_eq!(
            direction("ld:a(30)"),
            Direction::Rotated(
                Box::new(Direction::Diag(Diag::LD)),
                Rotation::Angle(30.0)
            )
        );
    }

    #[test]
    fn direction_length_vector() {
        assert_eq!(
            vector("/r2pc/"),
            Vector::Dir(Direction::Diag(Diag::R), Dimen::new(2.0, "pc"))
        );
        assert_eq!(
            vector("/1ex/"),
            Vector::Dir(Direction::Diag(Diag::Default), Dimen::new(1.0, "ex"))
        );
    }
}
