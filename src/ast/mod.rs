//! The immutable syntax tree produced by the grammar.
//!
//! Every node is a plain value: cloneable, comparable, serde-serializable.
//! Each node knows how to stringify itself via `pretty()`, and the printed
//! form re-parses to an equal tree.

mod arrow;
mod decor;
mod matrix;
mod object;
mod path;
mod pos;
mod twocell;

pub use arrow::{Arrow, ArrowForm, Variant};
pub use decor::{Command, Decor};
pub use matrix::{Axis, Entry, GridFix, Matrix, Row, SetupSwitch, SpacingOp};
pub use object::{
    Cir, CirArc, Curve, CurveOption, CurvePosItem, Dir, Frame, FrameRefinement, Modifier, Object,
    ObjectBox, Orient, Shape,
};
pub use path::{Anchor, Label, LabelSide, Path, PathElement, Segment, Turn};
pub use pos::{Coord, Corner, Diag, Direction, Place, PlaceMod, Pos, PosOp, Rotation, Vector};
pub use twocell::{Twocell, TwocellArrow, TwocellArrowKind, TwocellKind, TwocellSwitch};

use std::fmt;

use serde::{Deserialize, Serialize};

/// A dimensionless scale factor, e.g. the `0.5` in `?(0.5)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Factor(pub f64);

impl Factor {
    pub fn pretty(&self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A TeX-style length: a decimal number with a mandatory unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimen {
    pub value: f64,
    pub unit: String,
}

impl Dimen {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    pub fn pretty(&self) -> String {
        format!("{}{}", self.value, self.unit)
    }
}

impl fmt::Display for Dimen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_prints_without_trailing_zeroes() {
        assert_eq!(Factor(1.0).pretty(), "1");
        assert_eq!(Factor(0.5).pretty(), "0.5");
        assert_eq!(Factor(-2.0).pretty(), "-2");
    }

    #[test]
    fn dimen_prints_value_and_unit() {
        assert_eq!(Dimen::new(10.0, "pt").pretty(), "10pt");
        assert_eq!(Dimen::new(1.5, "em").pretty(), "1.5em");
    }
}
