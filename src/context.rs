//! Host-supplied parse configuration.
//!
//! The host owns two policies the grammar must not hard-code: which
//! characters count as skippable whitespace, and how embedded text fragments
//! (math material inside `{...}` boxes) become opaque AST leaves.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// An opaque handle to a host-formatted text fragment. The grammar never
/// inspects the host's rendering of the fragment; it only carries the handle
/// (and the raw text, which stringification needs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLeaf {
    raw: Arc<str>,
}

impl TextLeaf {
    pub fn new(raw: impl Into<Arc<str>>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

impl fmt::Display for TextLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

type LeafMaker = Rc<dyn Fn(&str) -> TextLeaf>;

/// Whitespace policy plus the leaf-construction callback, cloned into every
/// cursor so the combinators can reach both without extra plumbing.
#[derive(Clone)]
pub struct ParseContext {
    whitespace: Regex,
    leaf_maker: LeafMaker,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whitespace-skip pattern. The pattern is matched anchored
    /// at the cursor; everything it consumes is skipped before token
    /// primitives run.
    pub fn with_whitespace(mut self, pattern: &str) -> Self {
        self.whitespace = anchored(pattern);
        self
    }

    /// Replace the callback used to turn embedded raw text into opaque
    /// leaves.
    pub fn with_leaf_maker(mut self, f: impl Fn(&str) -> TextLeaf + 'static) -> Self {
        self.leaf_maker = Rc::new(f);
        self
    }

    pub fn create_leaf(&self, raw: &str) -> TextLeaf {
        (self.leaf_maker)(raw)
    }

    /// Length in bytes of the whitespace prefix of `rest`.
    pub fn whitespace_len(&self, rest: &str) -> usize {
        self.whitespace.find(rest).map(|m| m.end()).unwrap_or(0)
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self {
            whitespace: anchored(r"[ \t\r\n]*"),
            leaf_maker: Rc::new(|raw| TextLeaf::new(raw)),
        }
    }
}

impl fmt::Debug for ParseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseContext")
            .field("whitespace", &self.whitespace.as_str())
            .finish_non_exhaustive()
    }
}

fn anchored(pattern: &str) -> Regex {
    // The pattern is validated at context-construction time; a bad pattern
    // is a caller bug, reported eagerly.
    match Regex::new(&format!("^(?:{pattern})")) {
        Ok(re) => re,
        Err(err) => panic!("invalid whitespace pattern {pattern:?}: {err}"),
    }
}
