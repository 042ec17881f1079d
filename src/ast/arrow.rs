//! Arrows: the `\ar` command, its form prefixes, and its target path.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::object::{Modifier, Shape};
use super::path::Path;
use super::pos::{Coord, Direction, Place};
use super::Dimen;

pub use super::object::Variant;

/// `\ar form* path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub forms: Vec<ArrowForm>,
    pub path: Path,
}

impl Arrow {
    pub fn pretty(&self) -> String {
        let mut out = "\\ar".to_string();
        for form in &self.forms {
            out.push_str(&form.pretty());
        }
        out.push_str(&self.path.pretty());
        out
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

/// One `@...` form prefix. Forms accumulate left to right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArrowForm {
    /// `@{>->}`, `@2{->}`: select tail, stem and head outright.
    Mode {
        variant: Variant,
        tail: String,
        stem: String,
        head: String,
    },
    /// `@^`, `@2`: change only the variant. Never `Variant::Default`.
    VariantOnly(Variant),
    /// `@/^1pc/`: curve toward a direction by an optional amount.
    CurveDir {
        dir: Direction,
        amount: Option<Dimen>,
    },
    /// `@(out,in)`: curve with explicit exit and entry directions.
    CurveInOut { out: Direction, into: Direction },
    /// `` @`{c,c'} ``: curve through explicit control points.
    CurveVia(Vec<Coord>),
    /// `@[red]`: apply a shape/style to the whole arrow.
    Shape(Shape),
    /// `@*{...}`: apply object modifiers to the whole arrow.
    Modifiers(Vec<Modifier>),
    /// `@<1ex>`: slide the arrow sideways.
    Slide(Dimen),
    /// `@?<`: change the default label place.
    DefaultPlace(Place),
}

impl ArrowForm {
    pub fn pretty(&self) -> String {
        match self {
            ArrowForm::Mode {
                variant,
                tail,
                stem,
                head,
            } => format!("@{}{{{tail}{stem}{head}}}", variant.pretty()),
            ArrowForm::VariantOnly(variant) => format!("@{}", variant.pretty()),
            ArrowForm::CurveDir { dir, amount } => {
                let amount = match amount {
                    Some(d) => d.pretty(),
                    None => String::new(),
                };
                format!("@/{}{amount}/", dir.pretty())
            }
            ArrowForm::CurveInOut { out, into } => {
                format!("@({},{})", out.pretty(), into.pretty())
            }
            ArrowForm::CurveVia(coords) => {
                let parts: Vec<String> = coords.iter().map(Coord::pretty).collect();
                format!("@`{{{}}}", parts.join(","))
            }
            ArrowForm::Shape(shape) => format!("@[{}]", shape.pretty()),
            ArrowForm::Modifiers(mods) => {
                let parts: String = mods.iter().map(Modifier::pretty).collect();
                format!("@*{{{parts}}}")
            }
            ArrowForm::Slide(d) => format!("@<{d}>"),
            ArrowForm::DefaultPlace(place) => format!("@?{}", place.pretty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_form_prints_tail_stem_head() {
        let form = ArrowForm::Mode {
            variant: Variant::Double,
            tail: String::new(),
            stem: "-".to_string(),
            head: ">".to_string(),
        };
        assert_eq!(form.pretty(), "@2{->}");
    }

    #[test]
    fn arrow_prints_forms_then_path() {
        let arrow = Arrow {
            forms: vec![ArrowForm::Slide(Dimen::new(1.0, "ex"))],
            path: Path(vec![]),
        };
        assert_eq!(arrow.pretty(), "\\ar@<1ex>");
    }
}
