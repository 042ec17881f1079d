//! Objects: the things dropped at and connected between positions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::TextLeaf;

use super::decor::Decor;
use super::matrix::Matrix;
use super::pos::{Diag, Direction, Pos, Vector};
use super::Factor;

/// An object: modifiers applied around an object box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub modifiers: Vec<Modifier>,
    pub body: ObjectBox,
}

impl Object {
    pub fn plain(body: ObjectBox) -> Self {
        Self {
            modifiers: Vec::new(),
            body,
        }
    }

    pub fn pretty(&self) -> String {
        let mut out = String::new();
        for m in &self.modifiers {
            out.push_str(&m.pretty());
        }
        out.push_str(&self.body.pretty());
        out
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

/// A single object modifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Modifier {
    /// `!<vector>`: shift the reference point.
    Vector(Vector),
    /// `!`: reset the reference point to the center.
    ResetRef,
    /// `+` / `+<vector>`: grow by the default or given amount.
    Grow(Option<Vector>),
    /// `-` / `-<vector>`: shrink.
    Shrink(Option<Vector>),
    /// `=` / `=<vector>`: set the size outright.
    Set(Option<Vector>),
    /// `[shape]`.
    Shape(Shape),
    /// `i`: invisible, but still takes up space.
    Invisible,
    /// `h`: hidden from extent computation.
    Hidden,
    /// A direction used as a modifier (tilts the object).
    Direction(Direction),
}

impl Modifier {
    pub fn pretty(&self) -> String {
        fn opt_vector(prefix: &str, v: &Option<Vector>) -> String {
            match v {
                Some(v) => format!("{prefix}{}", v.pretty()),
                None => prefix.to_string(),
            }
        }
        match self {
            Modifier::Vector(v) => format!("!{}", v.pretty()),
            Modifier::ResetRef => "!".to_string(),
            Modifier::Grow(v) => opt_vector("+", v),
            Modifier::Shrink(v) => opt_vector("-", v),
            Modifier::Set(v) => opt_vector("=", v),
            Modifier::Shape(shape) => format!("[{}]", shape.pretty()),
            Modifier::Invisible => "i".to_string(),
            Modifier::Hidden => "h".to_string(),
            Modifier::Direction(dir) => dir.pretty(),
        }
    }
}

/// The `[...]` shape/style modifier payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// `[.]`: collapse to a point.
    Point,
    /// `[]`: the default rectangle.
    Rect,
    /// `[o]`, `[red]`, `[left]`: a named shape or style.
    Named(String),
    /// `[F-:<3pt>]`: a frame style with optional refinements.
    Frame {
        style: String,
        refinements: Vec<FrameRefinement>,
    },
}

impl Shape {
    pub fn pretty(&self) -> String {
        match self {
            Shape::Point => ".".to_string(),
            Shape::Rect => String::new(),
            Shape::Named(name) => name.clone(),
            Shape::Frame { style, refinements } => {
                let mut out = style.clone();
                for r in refinements {
                    out.push_str(&r.pretty());
                }
                out
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrameRefinement {
    /// `:<vector>`: corner radius.
    Radius(Vector),
    /// `:color`.
    Color(String),
}

impl FrameRefinement {
    pub fn pretty(&self) -> String {
        match self {
            FrameRefinement::Radius(v) => format!(":{}", v.pretty()),
            FrameRefinement::Color(name) => format!(":{name}"),
        }
    }
}

/// The box at the heart of an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObjectBox {
    /// `{text}`: host-formatted text, kept opaque.
    Text(TextLeaf),
    /// `\dir...{...}`: a directional.
    Dir(Dir),
    /// `\cir...{...}`: a circle segment.
    Cir(Cir),
    /// `\frm...{...}`: a frame around the last object.
    Frame(Frame),
    /// `\object obj`: re-wrap a finished object as a box.
    Wrap(Box<Object>),
    /// `\composite{o1 * o2 * ...}`.
    Composite(Vec<Object>),
    /// `\xybox{pos decor}`: a whole nested picture.
    Xybox(Box<Pos>, Decor),
    /// `\xymatrix...{...}`.
    Matrix(Box<Matrix>),
    /// `\crv...{...}`: a curve through control points.
    Curve(Curve),
    /// Any other control sequence, with an optional braced argument,
    /// passed through to the host.
    TexBox {
        name: String,
        body: Option<TextLeaf>,
    },
}

impl ObjectBox {
    pub fn pretty(&self) -> String {
        match self {
            ObjectBox::Text(leaf) => format!("{{{}}}", leaf.raw()),
            ObjectBox::Dir(dir) => dir.pretty(),
            ObjectBox::Cir(cir) => cir.pretty(),
            ObjectBox::Frame(frame) => frame.pretty(),
            ObjectBox::Wrap(obj) => format!("\\object{}", obj.pretty()),
            ObjectBox::Composite(objects) => {
                let parts: Vec<String> = objects.iter().map(Object::pretty).collect();
                format!("\\composite{{{}}}", parts.join("*"))
            }
            ObjectBox::Xybox(pos, decor) => {
                format!("\\xybox{{{}{}}}", pos.pretty(), decor.pretty())
            }
            ObjectBox::Matrix(matrix) => matrix.pretty(),
            ObjectBox::Curve(curve) => curve.pretty(),
            ObjectBox::TexBox { name, body } => match body {
                Some(leaf) => format!("\\{name}{{{}}}", leaf.raw()),
                None => format!("\\{name}"),
            },
        }
    }
}

/// A directional: `\dir^{>}`, `\dir{-}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dir {
    pub variant: Variant,
    pub main: String,
}

impl Dir {
    pub fn pretty(&self) -> String {
        format!("\\dir{}{{{}}}", self.variant.pretty(), self.main)
    }
}

/// The variant selector shared by directionals and arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    Default,
    /// `^`.
    Upper,
    /// `_`.
    Lower,
    /// `0`.
    Plain,
    /// `1`.
    Single,
    /// `2`.
    Double,
    /// `3`.
    Triple,
}

impl Variant {
    pub fn pretty(&self) -> String {
        match self {
            Variant::Default => "",
            Variant::Upper => "^",
            Variant::Lower => "_",
            Variant::Plain => "0",
            Variant::Single => "1",
            Variant::Double => "2",
            Variant::Triple => "3",
        }
        .to_string()
    }
}

/// A circle segment: `\cir<4pt>{l^r}`, `\cir{}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cir {
    pub radius: Option<Vector>,
    pub arc: Option<CirArc>,
}

impl Cir {
    pub fn pretty(&self) -> String {
        let radius = match &self.radius {
            Some(v) => v.pretty(),
            None => String::new(),
        };
        let arc = match &self.arc {
            Some(arc) => arc.pretty(),
            None => String::new(),
        };
        format!("\\cir{radius}{{{arc}}}")
    }
}

/// The arc selector inside a `\cir` body: start diagonal, orientation,
/// end diagonal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirArc {
    pub start: Diag,
    pub orient: Orient,
    pub end: Diag,
}

impl CirArc {
    pub fn pretty(&self) -> String {
        format!(
            "{}{}{}",
            self.start.pretty(),
            self.orient.pretty(),
            self.end.pretty()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orient {
    /// `^`: counterclockwise.
    Ccw,
    /// `_`: clockwise.
    Cw,
}

impl Orient {
    pub fn pretty(&self) -> String {
        match self {
            Orient::Ccw => "^",
            Orient::Cw => "_",
        }
        .to_string()
    }
}

/// A frame box: `\frm<3pt>{-}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub radius: Option<Vector>,
    pub main: String,
}

impl Frame {
    pub fn pretty(&self) -> String {
        let radius = match &self.radius {
            Some(v) => v.pretty(),
            None => String::new(),
        };
        format!("\\frm{radius}{{{}}}", self.main)
    }
}

/// A curve box: `\crv~pc{(10,10)&(20,0)}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub options: Vec<CurveOption>,
    pub poslist: Vec<CurvePosItem>,
}

impl Curve {
    pub fn pretty(&self) -> String {
        let mut out = "\\crv".to_string();
        for opt in &self.options {
            out.push_str(&opt.pretty());
        }
        let items: Vec<String> = self.poslist.iter().map(CurvePosItem::pretty).collect();
        out.push_str(&format!("{{{}}}", items.join("&")));
        out
    }
}

/// Curve options, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurveOption {
    /// `~pc`, `~lc`, `~cC`: a style selector.
    Style(String),
    /// `~*obj`: drop obj along the curve.
    Drop(Object),
    /// `~**obj`: connect with obj along the curve.
    Connect(Object),
}

impl CurveOption {
    pub fn pretty(&self) -> String {
        match self {
            CurveOption::Style(name) => format!("~{name}"),
            CurveOption::Drop(obj) => format!("~*{}", obj.pretty()),
            CurveOption::Connect(obj) => format!("~**{}", obj.pretty()),
        }
    }
}

/// One control point of a curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CurvePosItem {
    Pos(Pos),
    /// `~@`: splice in the current stack.
    Stack,
    /// Empty item: the current position.
    Current,
}

impl CurvePosItem {
    pub fn pretty(&self) -> String {
        match self {
            CurvePosItem::Pos(pos) => pos.pretty(),
            CurvePosItem::Stack => "~@".to_string(),
            CurvePosItem::Current => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_print_before_the_body() {
        let obj = Object {
            modifiers: vec![Modifier::Grow(None), Modifier::Shape(Shape::Named("o".into()))],
            body: ObjectBox::Text(TextLeaf::new("x")),
        };
        assert_eq!(obj.pretty(), "+[o]{x}");
    }

    #[test]
    fn composite_joins_with_asterisks() {
        let a = Object::plain(ObjectBox::Text(TextLeaf::new("a")));
        let b = Object::plain(ObjectBox::Text(TextLeaf::new("b")));
        assert_eq!(
            ObjectBox::Composite(vec![a, b]).pretty(),
            "\\composite{{a}*{b}}"
        );
    }

    #[test]
    fn cir_prints_radius_and_arc() {
        let cir = Cir {
            radius: Some(Vector::AbsLen(crate::ast::Dimen::new(4.0, "pt"))),
            arc: Some(CirArc {
                start: Diag::L,
                orient: Orient::Ccw,
                end: Diag::R,
            }),
        };
        assert_eq!(cir.pretty(), "\\cir<4pt>{l^r}");
    }
}
