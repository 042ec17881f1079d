//! Matrices: the `\xymatrix` grid notation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::context::TextLeaf;

use super::decor::Decor;
use super::object::{Modifier, Object};
use super::pos::{Diag, PosOp};
use super::Dimen;

/// `\xymatrix setup* { rows }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub setup: Vec<SetupSwitch>,
    pub rows: Vec<Row>,
}

impl Matrix {
    pub fn pretty(&self) -> String {
        let mut out = "\\xymatrix".to_string();
        for switch in &self.setup {
            out.push_str(&switch.pretty());
        }
        let rows: Vec<String> = self.rows.iter().map(Row::pretty).collect();
        out.push_str(&format!("{{{}}}", rows.join("\\\\")));
        out
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

/// One setup switch before the matrix body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SetupSwitch {
    /// `"prefix"`: name this matrix so entries can be targeted from outside.
    Prefix(String),
    /// `@R+1em`, `@=0pt`: adjust a spacing parameter.
    Spacing {
        axis: Axis,
        op: SpacingOp,
        amount: Dimen,
    },
    /// `@!`, `@!0`, `@!R`, `@!C`: force equal spacing.
    GridFix(GridFix),
    /// `@1`: select a numbered entry style.
    EntryStyle(u8),
    /// `@dr`: rotate the whole matrix toward a diagonal.
    Orientation(Diag),
    /// `@*[F]`: a modifier applied to every entry.
    DefaultModifier(Modifier),
}

impl SetupSwitch {
    pub fn pretty(&self) -> String {
        match self {
            SetupSwitch::Prefix(name) => format!("\"{name}\""),
            SetupSwitch::Spacing { axis, op, amount } => {
                format!("@{}{}{}", axis.pretty(), op.pretty(), amount)
            }
            SetupSwitch::GridFix(fix) => fix.pretty(),
            SetupSwitch::EntryStyle(n) => format!("@{n}"),
            SetupSwitch::Orientation(diag) => format!("@{}", diag.pretty()),
            SetupSwitch::DefaultModifier(m) => format!("@*{}", m.pretty()),
        }
    }
}

/// Which spacing parameter a `@...` switch adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    /// Both row and column spacing.
    Both,
    /// `R`: row spacing.
    Row,
    /// `C`: column spacing.
    Column,
    /// `M`: entry margins.
    Margin,
    /// `W`: entry width.
    Width,
    /// `H`: entry height.
    Height,
    /// `L`: label separation.
    LabelSep,
}

impl Axis {
    pub fn pretty(&self) -> String {
        match self {
            Axis::Both => "",
            Axis::Row => "R",
            Axis::Column => "C",
            Axis::Margin => "M",
            Axis::Width => "W",
            Axis::Height => "H",
            Axis::LabelSep => "L",
        }
        .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpacingOp {
    /// `+`.
    Grow,
    /// `+=`.
    GrowTo,
    /// `-`.
    Shrink,
    /// `-=`.
    ShrinkTo,
    /// `=`.
    Set,
}

impl SpacingOp {
    pub fn pretty(&self) -> String {
        match self {
            SpacingOp::Grow => "+",
            SpacingOp::GrowTo => "+=",
            SpacingOp::Shrink => "-",
            SpacingOp::ShrinkTo => "-=",
            SpacingOp::Set => "=",
        }
        .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridFix {
    /// `@!`: equal spacing in both directions.
    All,
    /// `@!0`: equal spacing, collapsed to zero.
    Zero,
    /// `@!R`.
    Rows,
    /// `@!C`.
    Columns,
}

impl GridFix {
    pub fn pretty(&self) -> String {
        match self {
            GridFix::All => "@!",
            GridFix::Zero => "@!0",
            GridFix::Rows => "@!R",
            GridFix::Columns => "@!C",
        }
        .to_string()
    }
}

/// One matrix row: entries separated by `&`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row(pub Vec<Entry>);

impl Row {
    pub fn pretty(&self) -> String {
        let entries: Vec<String> = self.0.iter().map(Entry::pretty).collect();
        entries.join("&")
    }
}

/// One matrix entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entry {
    /// `*obj ops decor`: an explicit object entry, exempt from the entry
    /// modifiers of the surrounding matrix.
    Explicit {
        object: Object,
        pos_ops: Vec<PosOp>,
        decor: Decor,
    },
    /// Plain entry text, kept verbatim, with trailing commands.
    Loose { text: TextLeaf, decor: Decor },
    /// A completely empty cell.
    Empty,
}

impl Entry {
    pub fn pretty(&self) -> String {
        match self {
            Entry::Explicit {
                object,
                pos_ops,
                decor,
            } => {
                let mut out = format!("*{}", object.pretty());
                for op in pos_ops {
                    out.push_str(&op.pretty());
                }
                out.push_str(&decor.pretty());
                out
            }
            Entry::Loose { text, decor } => format!("{}{}", text.raw(), decor.pretty()),
            Entry::Empty => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ObjectBox;

    #[test]
    fn rows_join_with_double_backslash() {
        let matrix = Matrix {
            setup: vec![],
            rows: vec![
                Row(vec![
                    Entry::Loose {
                        text: TextLeaf::new("A"),
                        decor: Decor::empty(),
                    },
                    Entry::Loose {
                        text: TextLeaf::new("B"),
                        decor: Decor::empty(),
                    },
                ]),
                Row(vec![Entry::Explicit {
                    object: Object::plain(ObjectBox::Text(TextLeaf::new("C"))),
                    pos_ops: vec![],
                    decor: Decor::empty(),
                }]),
            ],
        };
        assert_eq!(matrix.pretty(), "\\xymatrix{A&B\\\\*{C}}");
    }

    #[test]
    fn spacing_switch_prints_axis_op_amount() {
        let switch = SetupSwitch::Spacing {
            axis: Axis::Row,
            op: SpacingOp::Grow,
            amount: Dimen::new(1.0, "em"),
        };
        assert_eq!(switch.pretty(), "@R+1em");
    }
}
