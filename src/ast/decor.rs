//! Decorations: the command list that follows a position.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::arrow::Arrow;
use super::object::Object;
use super::path::Path;
use super::pos::Pos;
use super::twocell::Twocell;

/// A possibly-empty sequence of commands.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Decor(pub Vec<Command>);

impl Decor {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pretty(&self) -> String {
        self.0.iter().map(Command::pretty).collect()
    }
}

impl fmt::Display for Decor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}

/// One decoration command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// `\save pos`: save the graphics state, then move.
    Save(Pos),
    /// `\restore`.
    Restore,
    /// `\POS pos`.
    Pos(Pos),
    /// `\afterPOS{decor} pos`: run decor once pos is reached.
    AfterPos(Decor, Pos),
    /// `\drop obj`.
    Drop(Object),
    /// `\connect obj`.
    Connect(Object),
    /// `\PATH path`.
    Path(Path),
    /// `\afterPATH{decor} path`.
    AfterPath(Decor, Path),
    /// `\ar ...`: the arrow feature.
    Ar(Arrow),
    /// A two-cell command from the 2-cell feature.
    Twocell(Twocell),
    /// `\xyignore{pos decor}`: parse but contribute nothing.
    Ignore(Pos, Decor),
    /// `\xyshowAST{pos decor}`: parse and dump the tree.
    ShowAst(Pos, Decor),
}

impl Command {
    pub fn pretty(&self) -> String {
        match self {
            Command::Save(pos) => format!("\\save{}", pos.pretty()),
            Command::Restore => "\\restore".to_string(),
            Command::Pos(pos) => format!("\\POS{}", pos.pretty()),
            Command::AfterPos(decor, pos) => {
                format!("\\afterPOS{{{}}}{}", decor.pretty(), pos.pretty())
            }
            Command::Drop(obj) => format!("\\drop{}", obj.pretty()),
            Command::Connect(obj) => format!("\\connect{}", obj.pretty()),
            Command::Path(path) => format!("\\PATH{}", path.pretty()),
            Command::AfterPath(decor, path) => {
                format!("\\afterPATH{{{}}}{}", decor.pretty(), path.pretty())
            }
            Command::Ar(arrow) => arrow.pretty(),
            Command::Twocell(twocell) => twocell.pretty(),
            Command::Ignore(pos, decor) => {
                format!("\\xyignore{{{}{}}}", pos.pretty(), decor.pretty())
            }
            Command::ShowAst(pos, decor) => {
                format!("\\xyshowAST{{{}{}}}", pos.pretty(), decor.pretty())
            }
        }
    }
}
