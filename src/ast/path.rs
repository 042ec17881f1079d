//! Paths: segment chains with labels, turns, and splice points.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::object::Object;
use super::pos::{Diag, Place, Pos};
use super::Dimen;

/// A fully-expanded path: splices and continuation rebinds have already
/// been flattened away by the parser.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path(pub Vec<PathElement>);

impl Path {
    pub fn pretty(&self) -> String {
        self.0.iter().map(PathElement::pretty).collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathElement {
    /// A straight segment to the segment's target.
    Segment(Segment),
    /// `'segment`: a via point, connected but not final.
    Via(Segment),
    /// `` `d radius ``: a turn in the given diagonal.
    Turn(Turn),
}

impl PathElement {
    pub fn pretty(&self) -> String {
        match self {
            PathElement::Segment(seg) => seg.pretty(),
            PathElement::Via(seg) => format!("'{}", seg.pretty()),
            PathElement::Turn(turn) => turn.pretty(),
        }
    }
}

/// One segment: target position, optional slide, then labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub pos: Pos,
    /// `<d>`: slide the whole segment sideways.
    pub slide: Option<Dimen>,
    pub labels: Vec<Label>,
}

impl Segment {
    pub fn pretty(&self) -> String {
        let mut out = self.pos.pretty();
        if let Some(slide) = &self.slide {
            out.push_str(&format!("<{slide}>"));
        }
        for label in &self.labels {
            out.push_str(&label.pretty());
        }
        out
    }
}

/// A label attached to a segment: `^f`, `_-{g}`, `|(0.3){h}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub side: LabelSide,
    pub anchor: Option<Anchor>,
    pub object: Object,
}

impl Label {
    pub fn pretty(&self) -> String {
        let anchor = match &self.anchor {
            Some(a) => a.pretty(),
            None => String::new(),
        };
        format!("{}{}{}", self.side.pretty(), anchor, self.object.pretty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelSide {
    /// `^`.
    Above,
    /// `_`.
    Below,
    /// `|`: on the connection itself.
    Inline,
}

impl LabelSide {
    pub fn pretty(&self) -> String {
        match self {
            LabelSide::Above => "^",
            LabelSide::Below => "_",
            LabelSide::Inline => "|",
        }
        .to_string()
    }
}

/// Where along the segment the label sits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Anchor {
    /// `-`: the default label position.
    Minus,
    /// A nonempty place, e.g. `(0.3)` or `<`.
    Place(Place),
}

impl Anchor {
    pub fn pretty(&self) -> String {
        match self {
            Anchor::Minus => "-".to_string(),
            Anchor::Place(place) => place.pretty(),
        }
    }
}

/// A turn: `` `r ``, `` `d/4pt ``.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub diag: Diag,
    pub radius: Option<Dimen>,
}

impl Turn {
    pub fn pretty(&self) -> String {
        let radius = match &self.radius {
            Some(d) => format!("/{d}"),
            None => String::new(),
        };
        format!("`{}{}", self.diag.pretty(), radius)
    }
}
