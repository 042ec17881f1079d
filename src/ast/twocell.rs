//! Two-cells: the `\rtwocell` family from the 2-cell feature.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::object::Object;
use super::Factor;

/// One two-cell command: kind, switches, then the arrow block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Twocell {
    pub kind: TwocellKind,
    pub switches: Vec<TwocellSwitch>,
    pub arrow: Option<TwocellArrow>,
}

impl Twocell {
    pub fn pretty(&self) -> String {
        let mut out = self.kind.pretty();
        for switch in &self.switches {
            out.push_str(&switch.pretty());
        }
        if let Some(arrow) = &self.arrow {
            out.push_str(&arrow.pretty());
        }
        out
    }
}

impl fmt::Display for Twocell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TwocellKind {
    U,
    D,
    L,
    R,
    UL,
    UR,
    DL,
    DR,
    /// `\xtwocell[hops]`: an explicit-target two-cell.
    X { hops: String },
}

impl TwocellKind {
    pub fn pretty(&self) -> String {
        match self {
            TwocellKind::U => "\\utwocell".to_string(),
            TwocellKind::D => "\\dtwocell".to_string(),
            TwocellKind::L => "\\ltwocell".to_string(),
            TwocellKind::R => "\\rtwocell".to_string(),
            TwocellKind::UL => "\\ultwocell".to_string(),
            TwocellKind::UR => "\\urtwocell".to_string(),
            TwocellKind::DL => "\\dltwocell".to_string(),
            TwocellKind::DR => "\\drtwocell".to_string(),
            TwocellKind::X { hops } => format!("\\xtwocell[{hops}]"),
        }
    }
}

/// A refinement switch between the kind and the arrow block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TwocellSwitch {
    /// `^obj`: the label above.
    UpperLabel(Object),
    /// `_obj`: the label below.
    LowerLabel(Object),
    /// `\omit`: draw no cell arrow.
    Omit,
    /// `` ~`obj ``: override the tail object.
    Tail(Object),
    /// `~'obj`: override the head object.
    Head(Object),
    /// `~*obj`: override the object dropped along the cell.
    CurveObj(Object),
    /// `~(f)`: set the curvature.
    Curvature(Factor),
}

impl TwocellSwitch {
    pub fn pretty(&self) -> String {
        match self {
            TwocellSwitch::UpperLabel(obj) => format!("^{}", obj.pretty()),
            TwocellSwitch::LowerLabel(obj) => format!("_{}", obj.pretty()),
            TwocellSwitch::Omit => "\\omit".to_string(),
            TwocellSwitch::Tail(obj) => format!("~`{}", obj.pretty()),
            TwocellSwitch::Head(obj) => format!("~'{}", obj.pretty()),
            TwocellSwitch::CurveObj(obj) => format!("~*{}", obj.pretty()),
            TwocellSwitch::Curvature(f) => format!("~({f})"),
        }
    }
}

/// The final `{...}` block: nudge, arrow kind, label object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwocellArrow {
    pub nudge: Option<Factor>,
    pub kind: TwocellArrowKind,
    pub label: Option<Object>,
}

impl TwocellArrow {
    pub fn pretty(&self) -> String {
        let nudge = match &self.nudge {
            Some(f) => f.pretty(),
            None => String::new(),
        };
        let label = match &self.label {
            Some(obj) => obj.pretty(),
            None => String::new(),
        };
        format!("{{{nudge}{}{label}}}", self.kind.pretty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TwocellArrowKind {
    /// The plain cell arrow.
    Default,
    /// `^`: above the cell.
    Above,
    /// `_`: below the cell.
    Below,
    /// `=`: an identity cell.
    Equal,
    /// `\omit`: no arrow, label only.
    Omit,
}

impl TwocellArrowKind {
    pub fn pretty(&self) -> String {
        match self {
            TwocellArrowKind::Default => "",
            TwocellArrowKind::Above => "^",
            TwocellArrowKind::Below => "_",
            TwocellArrowKind::Equal => "=",
            TwocellArrowKind::Omit => "\\omit",
        }
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ObjectBox;
    use crate::context::TextLeaf;

    #[test]
    fn twocell_prints_kind_switches_arrow() {
        let label = Object::plain(ObjectBox::Text(TextLeaf::new("\\alpha")));
        let cell = Twocell {
            kind: TwocellKind::R,
            switches: vec![TwocellSwitch::UpperLabel(Object::plain(ObjectBox::Text(
                TextLeaf::new("f"),
            )))],
            arrow: Some(TwocellArrow {
                nudge: None,
                kind: TwocellArrowKind::Default,
                label: Some(label),
            }),
        };
        assert_eq!(cell.pretty(), "\\rtwocell^{f}{{\\alpha}}");
    }
}
