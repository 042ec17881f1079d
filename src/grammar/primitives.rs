//! Token-level parsers shared across the grammar.

use crate::ast::{Diag, Dimen, Factor};
use crate::combinator::{regex, Parser};
use crate::context::TextLeaf;
use crate::result::ParseResult;

/// A signed decimal number.
pub fn number() -> Parser<f64> {
    regex(r"[+-]?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)").map_partial(
        |text| text.parse::<f64>().map_err(|_| text),
        |text| format!("invalid number `{text}`"),
    )
}

pub fn factor() -> Parser<Factor> {
    number().map(Factor)
}

/// A TeX length: number plus a two-letter unit.
pub fn dimen() -> Parser<Dimen> {
    regex(r"[+-]?(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)(?:pt|mm|cm|pc|in|em|ex|sp|bp|dd|cc)")
        .map_partial(
            |text| {
                let split = text.len() - 2;
                match text[..split].parse::<f64>() {
                    Ok(value) => Ok(Dimen::new(value, &text[split..])),
                    Err(_) => Err(text),
                }
            },
            |text| format!("invalid dimension `{text}`"),
        )
}

/// A double-quoted identifier, yielding the text between the quotes.
pub fn id() -> Parser<String> {
    regex(r#""[^"]*""#).map(|quoted| quoted[1..quoted.len() - 1].to_string())
}

/// A control sequence `\word`, yielding the word without its backslash.
pub fn control_word() -> Parser<String> {
    regex(r"\\[a-zA-Z]+").map(|word| word[1..].to_string())
}

/// A nonempty compass diagonal. Two-letter forms are matched first and
/// either letter order is accepted.
pub fn diag() -> Parser<Diag> {
    regex(r"ld|dl|rd|dr|lu|ul|ru|ur|l|r|u|d").map(|text| match text.as_str() {
        "ld" | "dl" => Diag::LD,
        "rd" | "dr" => Diag::RD,
        "lu" | "ul" => Diag::LU,
        "ru" | "ur" => Diag::RU,
        "l" => Diag::L,
        "r" => Diag::R,
        "u" => Diag::U,
        _ => Diag::D,
    })
}

/// Turn a raw-text parser into a leaf parser, routing the text through the
/// context's leaf callback.
pub fn leaf_of(raw: Parser<String>) -> Parser<TextLeaf> {
    Parser::new(move |cursor, state| match raw.run(cursor, state) {
        ParseResult::Success { value, next } => {
            let leaf = next.context().create_leaf(&value);
            ParseResult::success(leaf, next)
        }
        ParseResult::Failure { message, at } => ParseResult::Failure { message, at },
        ParseResult::Error {
            message,
            at,
            defect,
        } => ParseResult::Error {
            message,
            at,
            defect,
        },
    })
}
