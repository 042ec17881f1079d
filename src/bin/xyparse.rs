//! Command-line front end: parse diagram code, print trees or diagnostics.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand};
use miette::Report;

use xyparse::ast::{Decor, Pos};
use xyparse::{parse_all, Grammar, ParseContext};

#[derive(Debug, Parser)]
#[command(
    name = "xyparse",
    version,
    about = "Parse Xy-pic diagram code into a syntax tree."
)]
struct XyparseArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the syntax tree of a diagram.
    Ast {
        /// The path to the file holding the diagram body.
        #[arg(required = true)]
        file: PathBuf,
        /// Emit the tree as JSON instead of the debug form.
        #[arg(long)]
        json: bool,
    },
    /// Parse a diagram and report errors, producing no output on success.
    Check {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Reprint a diagram in canonical form.
    Print {
        #[arg(required = true)]
        file: PathBuf,
    },
}

fn main() {
    let args = XyparseArgs::parse();

    let result = match args.command {
        Command::Ast { file, json } => handle_ast(&file, json),
        Command::Check { file } => parse_diagram(&file).map(|_| ()),
        Command::Print { file } => handle_print(&file),
    };

    if let Err(report) = result {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

fn handle_ast(path: &Path, json: bool) -> Result<(), Report> {
    let diagram = parse_diagram(path)?;
    if json {
        let rendered = serde_json::to_string_pretty(&diagram)
            .map_err(|err| miette::miette!("cannot render tree: {err}"))?;
        println!("{rendered}");
    } else {
        println!("{diagram:#?}");
    }
    Ok(())
}

fn handle_print(path: &Path) -> Result<(), Report> {
    let (pos, decor) = parse_diagram(path)?;
    println!("{}{}", pos.pretty(), decor.pretty());
    Ok(())
}

fn parse_diagram(path: &Path) -> Result<(Pos, Decor), Report> {
    let source = fs::read_to_string(path)
        .map_err(|err| miette::miette!("cannot read {}: {err}", path.display()))?;
    let grammar = Grammar::new();
    let ok = parse_all(&grammar.diagram(), &source, 0, ParseContext::new())
        .map_err(Report::new)?;
    Ok(ok.value)
}
