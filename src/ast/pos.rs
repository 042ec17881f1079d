//! Positions: the coordinate sublanguage everything else builds on.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::decor::Decor;
use super::object::Object;
use super::{Dimen, Factor};

/// A coordinate followed by zero or more position operations, applied left
/// to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pos {
    pub coord: Coord,
    pub ops: Vec<PosOp>,
}

impl Pos {
    pub fn new(coord: Coord) -> Self {
        Self { coord, ops: Vec::new() }
    }

    pub fn pretty(&self) -> String {
        let mut out = self.coord.pretty();
        for op in &self.ops {
            out.push_str(&op.pretty());
        }
        out
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

/// The head of a position. An omitted coordinate means "stay where you are",
/// which parses as `Current`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Coord {
    /// `c`: the current position.
    Current,
    /// A vector offset interpreted in the current base.
    Vector(Vector),
    /// `"name"`: a position saved earlier under this name.
    Id(String),
    /// `s0`, `s{12}`: a stack entry, counted from the top.
    StackPos(usize),
    /// `[r]`, `[dl]`: hops between matrix entries, relative to this one.
    Hops(String),
    /// `{pos decor}`: a grouped position evaluated in its own scope.
    Group(Box<Pos>, Decor),
}

impl Coord {
    pub fn pretty(&self) -> String {
        match self {
            Coord::Current => "c".to_string(),
            Coord::Vector(v) => v.pretty(),
            Coord::Id(name) => format!("\"{name}\""),
            Coord::StackPos(n) => {
                if *n < 10 {
                    format!("s{n}")
                } else {
                    format!("s{{{n}}}")
                }
            }
            Coord::Hops(hops) => format!("[{hops}]"),
            Coord::Group(pos, decor) => format!("{{{}{}}}", pos.pretty(), decor.pretty()),
        }
    }
}

/// One step in a position expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PosOp {
    /// `+c'`: move and stretch the base.
    Plus(Coord),
    /// `-c'`.
    Minus(Coord),
    /// `!c'`: skew, moving c without moving the reference point.
    Skew(Coord),
    /// `.c'`: extend the edge to cover c'.
    Cover(Coord),
    /// `,c'`: evaluate c' and discard it, keeping the current position.
    Then(Coord),
    /// `;c'`: swap the current position with c'.
    Swap(Coord),
    /// `:c'`: set the base from the current position and c'.
    Base(Coord),
    /// `::c'`: set only the up-vector of the base.
    AltBase(Coord),
    /// `*obj`: drop an object at the current position.
    Drop(Object),
    /// `**obj`: connect from the previous to the current position.
    Connect(Object),
    /// `?place`: pick a place along the last connection.
    Place(Place),
    /// `@+c'`: push c' onto the stack.
    StackPush(Coord),
    /// `@-c'`: set c' and pop.
    StackPop(Coord),
    /// `@=c'`: load the stack from c'.
    StackLoad(Coord),
    /// `@@c'`: apply c' to every stack entry.
    StackEach(Coord),
    /// `@i`: initialise the stack.
    StackInit,
    /// `@(`: enter a new frame.
    FrameEnter,
    /// `@)`: leave the frame.
    FrameLeave,
    /// `="name"`: save the current position under a name.
    SavePos(String),
    /// `=:"name"`: save as a macro.
    SaveMacro(String),
    /// `=@"name"`: save the whole stack.
    SaveStack(String),
}

impl PosOp {
    pub fn pretty(&self) -> String {
        match self {
            PosOp::Plus(c) => format!("+{}", c.pretty()),
            PosOp::Minus(c) => format!("-{}", c.pretty()),
            PosOp::Skew(c) => format!("!{}", c.pretty()),
            PosOp::Cover(c) => format!(".{}", c.pretty()),
            PosOp::Then(c) => format!(",{}", c.pretty()),
            PosOp::Swap(c) => format!(";{}", c.pretty()),
            PosOp::Base(c) => format!(":{}", c.pretty()),
            PosOp::AltBase(c) => format!("::{}", c.pretty()),
            PosOp::Drop(obj) => format!("*{}", obj.pretty()),
            PosOp::Connect(obj) => format!("**{}", obj.pretty()),
            PosOp::Place(place) => format!("?{}", place.pretty()),
            PosOp::StackPush(c) => format!("@+{}", c.pretty()),
            PosOp::StackPop(c) => format!("@-{}", c.pretty()),
            PosOp::StackLoad(c) => format!("@={}", c.pretty()),
            PosOp::StackEach(c) => format!("@@{}", c.pretty()),
            PosOp::StackInit => "@i".to_string(),
            PosOp::FrameEnter => "@(".to_string(),
            PosOp::FrameLeave => "@)".to_string(),
            PosOp::SavePos(name) => format!("=\"{name}\""),
            PosOp::SaveMacro(name) => format!("=:\"{name}\""),
            PosOp::SaveStack(name) => format!("=@\"{name}\""),
        }
    }
}

/// A vector in one of Xy-pic's coordinate notations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Vector {
    /// `0`: the zero vector.
    Zero,
    /// `(x,y)`: factors of the current basis vectors.
    InCurBase(Factor, Factor),
    /// `<dx,dy>`: absolute lengths.
    Abs(Dimen, Dimen),
    /// `<d>`: an absolute length along the base direction.
    AbsLen(Dimen),
    /// `a(45)`: a unit vector at the given angle in degrees.
    Angle(f64),
    /// `/dir d/`: a length along an arbitrary direction.
    Dir(Direction, Dimen),
    /// `xyc`-style corner offsets of the last dropped object, with an
    /// optional multiplier: `LD`, `U(2)`, `E`.
    Corner(Corner, Option<Factor>),
}

impl Vector {
    pub fn pretty(&self) -> String {
        match self {
            Vector::Zero => "0".to_string(),
            Vector::InCurBase(x, y) => format!("({x},{y})"),
            Vector::Abs(dx, dy) => format!("<{dx},{dy}>"),
            Vector::AbsLen(d) => format!("<{d}>"),
            Vector::Angle(degrees) => format!("a({degrees})"),
            Vector::Dir(dir, d) => format!("/{}{}/", dir.pretty(), d),
            Vector::Corner(corner, factor) => match factor {
                Some(f) => format!("{}({f})", corner.pretty()),
                None => corner.pretty(),
            },
        }
    }
}

/// Reference-object corners. The two-letter forms accept either letter
/// order in the source; printing uses the canonical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Corner {
    L,
    R,
    D,
    U,
    CL,
    CR,
    CD,
    CU,
    LD,
    RD,
    LU,
    RU,
    /// `E`: the nearest edge point.
    E,
}

impl Corner {
    pub fn pretty(&self) -> String {
        match self {
            Corner::L => "L",
            Corner::R => "R",
            Corner::D => "D",
            Corner::U => "U",
            Corner::CL => "CL",
            Corner::CR => "CR",
            Corner::CD => "CD",
            Corner::CU => "CU",
            Corner::LD => "LD",
            Corner::RD => "RD",
            Corner::LU => "LU",
            Corner::RU => "RU",
            Corner::E => "E",
        }
        .to_string()
    }
}

/// A direction: a diagonal base, a vector, or a base with rotation
/// refinements applied left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Diag(Diag),
    /// `v<vector>`: the direction of a vector.
    Vector(Box<Vector>),
    Rotated(Box<Direction>, Rotation),
}

impl Direction {
    pub fn pretty(&self) -> String {
        match self {
            Direction::Diag(diag) => diag.pretty(),
            Direction::Vector(v) => format!("v{}", v.pretty()),
            Direction::Rotated(base, rot) => format!("{}{}", base.pretty(), rot.pretty()),
        }
    }
}

/// A single rotation refinement on a direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Rotation {
    /// `^`: a quarter turn counterclockwise.
    Ccw,
    /// `_`: a quarter turn clockwise.
    Cw,
    /// `:a(n)`: rotate by n degrees.
    Angle(f64),
}

impl Rotation {
    pub fn pretty(&self) -> String {
        match self {
            Rotation::Ccw => "^".to_string(),
            Rotation::Cw => "_".to_string(),
            Rotation::Angle(degrees) => format!(":a({degrees})"),
        }
    }
}

/// A compass diagonal. `Default` is the omitted diagonal, meaning "the
/// direction of the last connection".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diag {
    Default,
    L,
    R,
    U,
    D,
    LD,
    RD,
    LU,
    RU,
}

impl Diag {
    pub fn pretty(&self) -> String {
        match self {
            Diag::Default => "",
            Diag::L => "l",
            Diag::R => "r",
            Diag::U => "u",
            Diag::D => "d",
            Diag::LD => "ld",
            Diag::RD => "rd",
            Diag::LU => "lu",
            Diag::RU => "ru",
        }
        .to_string()
    }
}

/// A place along a connection: shave/factor modifiers, then an optional
/// slide perpendicular to the connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub mods: Vec<PlaceMod>,
    pub slide: Option<Dimen>,
}

impl Place {
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        for m in &self.mods {
            out.push_str(&m.pretty());
        }
        if let Some(slide) = &self.slide {
            out.push_str(&format!("/{slide}/"));
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty() && self.slide.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaceMod {
    /// `<`: shave at the source end.
    ShaveLeft,
    /// `>`: shave at the target end.
    ShaveRight,
    /// `(f)`: pick the point at fraction f.
    Factor(Factor),
}

impl PlaceMod {
    pub fn pretty(&self) -> String {
        match self {
            PlaceMod::ShaveLeft => "<".to_string(),
            PlaceMod::ShaveRight => ">".to_string(),
            PlaceMod::Factor(f) => format!("({f})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_concatenates_ops_in_order() {
        let pos = Pos {
            coord: Coord::Current,
            ops: vec![
                PosOp::Plus(Coord::Vector(Vector::InCurBase(Factor(1.0), Factor(0.0)))),
                PosOp::Swap(Coord::Current),
            ],
        };
        assert_eq!(pos.pretty(), "c+(1,0);c");
    }

    #[test]
    fn stack_positions_brace_two_digit_indices() {
        assert_eq!(Coord::StackPos(3).pretty(), "s3");
        assert_eq!(Coord::StackPos(12).pretty(), "s{12}");
    }

    #[test]
    fn directions_print_rotations_in_application_order() {
        let dir = Direction::Rotated(
            Box::new(Direction::Rotated(
                Box::new(Direction::Diag(Diag::R)),
                Rotation::Ccw,
            )),
            Rotation::Angle(30.0),
        );
        assert_eq!(dir.pretty(), "r^:a(30)");
    }

    #[test]
    fn corner_vectors_carry_optional_multipliers() {
        assert_eq!(Vector::Corner(Corner::LD, None).pretty(), "LD");
        assert_eq!(
            Vector::Corner(Corner::U, Some(Factor(2.0))).pretty(),
            "U(2)"
        );
    }
}
