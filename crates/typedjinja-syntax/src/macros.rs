//! `@typedmacro` block parser.
//!
//! Every block in the document is decoded independently:
//!
//! ```text
//! {# @typedmacro
//!    addone(x: int) -> int
//!    Add one to x.
//! #}
//! ```
//!
//! The first non-empty line is the call signature; the remaining lines are
//! joined with single spaces into the docstring. Blocks whose first line is
//! not `identifier(...)` are dropped without a diagnostic.

use crate::lines::split_lines;
use crate::model::MacroSignature;
use regex::Regex;
use std::sync::LazyLock;

static RE_MACRO_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{#\s*@typedmacro(.*?)#\}").unwrap());

// Greedy interior: captures up to the last `)` on the line.
static RE_SIGNATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\((.*)\)").unwrap());

/// Decode all `@typedmacro` blocks of a document, in document order.
pub fn parse_macro_blocks(document: &str) -> Vec<MacroSignature> {
    RE_MACRO_BLOCK
        .captures_iter(document)
        .filter_map(|caps| caps.get(1))
        .filter_map(|interior| decode_block(interior.as_str()))
        .collect()
}

fn decode_block(interior: &str) -> Option<MacroSignature> {
    let mut lines = split_lines(interior)
        .into_iter()
        .map(str::trim)
        .filter(|l| !l.is_empty());

    let signature = lines.next()?;
    let Some(caps) = RE_SIGNATURE.captures(signature) else {
        tracing::debug!(signature, "skipping @typedmacro block without a call signature");
        return None;
    };

    let rest: Vec<&str> = lines.collect();
    let docstring = if rest.is_empty() {
        None
    } else {
        Some(rest.join(" "))
    };

    Some(MacroSignature {
        name: caps[1].to_string(),
        params: caps[2].to_string(),
        docstring,
    })
}
