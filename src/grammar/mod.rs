//! The diagram-language grammar: one lazily-built parser per production.
//!
//! Rules are mutually recursive, so each lives in a [`OnceCell`] and is
//! wrapped in [`Parser::lazy`]: accessing a rule never builds another rule
//! synchronously, only a thunk that builds on first invocation. The whole
//! registry is one `Rc`, cloned freely into rule bodies.

mod arrow;
mod decor;
mod matrix;
mod object;
mod path;
mod pos;
mod primitives;
mod twocell;
mod vector;

use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::ast::{
    Arrow, Command, Coord, Decor, Direction, Matrix, Modifier, Object, ObjectBox, Path, Place,
    Pos, PosOp, TwocellArrow, TwocellSwitch, Vector,
};
use crate::combinator::Parser;

pub use path::path_with_continuation;

/// Control words claimed by the decor sublanguage. Loose matrix-entry text
/// stops in front of these; any other control sequence is literal text.
pub const DECOR_KEYWORDS: &[&str] = &[
    "ar",
    "save",
    "restore",
    "POS",
    "afterPOS",
    "drop",
    "connect",
    "PATH",
    "afterPATH",
    "xyignore",
    "xyshowAST",
    "xymatrix",
    "xybox",
    "composite",
    "object",
    "dir",
    "cir",
    "frm",
    "crv",
    "omit",
    "rtwocell",
    "ltwocell",
    "utwocell",
    "dtwocell",
    "ultwocell",
    "urtwocell",
    "dltwocell",
    "drtwocell",
    "xtwocell",
];

pub fn is_decor_keyword(word: &str) -> bool {
    DECOR_KEYWORDS.contains(&word)
}

#[derive(Default)]
struct Cells {
    diagram: OnceCell<Parser<(Pos, Decor)>>,
    pos: OnceCell<Parser<Pos>>,
    nonempty_pos: OnceCell<Parser<Pos>>,
    coord: OnceCell<Parser<Coord>>,
    nonempty_coord: OnceCell<Parser<Coord>>,
    pos_op: OnceCell<Parser<PosOp>>,
    place: OnceCell<Parser<Place>>,
    vector: OnceCell<Parser<Vector>>,
    direction: OnceCell<Parser<Direction>>,
    object: OnceCell<Parser<Object>>,
    modifier: OnceCell<Parser<Modifier>>,
    object_box: OnceCell<Parser<ObjectBox>>,
    label_object: OnceCell<Parser<Object>>,
    decor: OnceCell<Parser<Decor>>,
    command: OnceCell<Parser<Command>>,
    path: OnceCell<Parser<Path>>,
    arrow: OnceCell<Parser<Arrow>>,
    matrix: OnceCell<Parser<Matrix>>,
    twocell_tail: OnceCell<Parser<(Vec<TwocellSwitch>, Option<TwocellArrow>)>>,
}

/// The rule registry. Cloning is cheap and shares every memoized rule.
#[derive(Clone, Default)]
pub struct Grammar {
    cells: Rc<Cells>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    fn rule<T: 'static>(
        &self,
        cell: &OnceCell<Parser<T>>,
        build: fn(Grammar) -> Parser<T>,
    ) -> Parser<T> {
        cell.get_or_init(|| {
            let grammar = self.clone();
            Parser::lazy(move || build(grammar.clone()))
        })
        .clone()
    }

    /// A whole diagram body: a position followed by decoration commands.
    pub fn diagram(&self) -> Parser<(Pos, Decor)> {
        self.rule(&self.cells.diagram, |g| {
            g.pos().and_then(g.decor())
        })
    }

    /// A position, possibly empty (the empty position is "stay here").
    pub fn pos(&self) -> Parser<Pos> {
        self.rule(&self.cells.pos, pos::build_pos)
    }

    /// A position that must consume at least one token.
    pub fn nonempty_pos(&self) -> Parser<Pos> {
        self.rule(&self.cells.nonempty_pos, pos::build_nonempty_pos)
    }

    /// A coordinate, defaulting to the current position when absent.
    pub fn coord(&self) -> Parser<Coord> {
        self.rule(&self.cells.coord, pos::build_coord)
    }

    pub fn nonempty_coord(&self) -> Parser<Coord> {
        self.rule(&self.cells.nonempty_coord, pos::build_nonempty_coord)
    }

    pub fn pos_op(&self) -> Parser<PosOp> {
        self.rule(&self.cells.pos_op, pos::build_pos_op)
    }

    /// A place along a connection (possibly empty).
    pub fn place(&self) -> Parser<Place> {
        self.rule(&self.cells.place, pos::build_place)
    }

    pub fn vector(&self) -> Parser<Vector> {
        self.rule(&self.cells.vector, vector::build_vector)
    }

    /// A direction that consumes at least one token. Call sites where the
    /// direction may be omitted wrap this in `opt`.
    pub fn direction(&self) -> Parser<Direction> {
        self.rule(&self.cells.direction, vector::build_direction)
    }

    pub fn object(&self) -> Parser<Object> {
        self.rule(&self.cells.object, object::build_object)
    }

    pub fn modifier(&self) -> Parser<Modifier> {
        self.rule(&self.cells.modifier, object::build_modifier)
    }

    pub fn object_box(&self) -> Parser<ObjectBox> {
        self.rule(&self.cells.object_box, object::build_object_box)
    }

    /// The object of a label: a full object, or a bare alphanumeric
    /// character as shorthand for a one-character text box.
    pub fn label_object(&self) -> Parser<Object> {
        self.rule(&self.cells.label_object, object::build_label_object)
    }

    pub fn decor(&self) -> Parser<Decor> {
        self.rule(&self.cells.decor, decor::build_decor)
    }

    pub fn command(&self) -> Parser<Command> {
        self.rule(&self.cells.command, decor::build_command)
    }

    /// A path with an empty failure continuation.
    pub fn path(&self) -> Parser<Path> {
        self.rule(&self.cells.path, path::build_path)
    }

    /// The `\ar` arrow: form prefixes followed by a path.
    pub fn arrow(&self) -> Parser<Arrow> {
        self.rule(&self.cells.arrow, arrow::build_arrow)
    }

    /// The part of `\xymatrix` after the control word: setup switches and
    /// the braced row list.
    pub fn matrix(&self) -> Parser<Matrix> {
        self.rule(&self.cells.matrix, matrix::build_matrix)
    }

    /// The part of a two-cell command after its control word and target:
    /// refinement switches, then the optional arrow block.
    pub fn twocell_tail(&self) -> Parser<(Vec<TwocellSwitch>, Option<TwocellArrow>)> {
        self.rule(&self.cells.twocell_tail, twocell::build_twocell_tail)
    }
}
