//! Synthetic Python source assembled from a stub.
//!
//! Imports come first, then every annotation with its doc comment cut off,
//! then an assignment that ends exactly where the engine should look:
//!
//! ```text
//! import datetime
//! when: datetime.datetime
//! __typedjinja_target__ = when.
//! ```

use crate::Mode;
use typedjinja_syntax::split_lines;

/// Name bound to the queried expression in the synthetic source.
pub const TARGET: &str = "__typedjinja_target__";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthetic {
    pub source: String,
    /// End of the last line
    pub cursor: Cursor,
}

pub fn synthesize(stub: &str, expr: &str, mode: Mode) -> Synthetic {
    let trigger = match mode {
        Mode::Signature => '(',
        _ => '.',
    };

    let stub_lines = split_lines(stub);
    let imports = stub_lines
        .iter()
        .copied()
        .filter(|l| l.starts_with("import ") || l.starts_with("from "));
    let vars = stub_lines
        .iter()
        .copied()
        .filter(|l| l.contains(':') && !l.starts_with("import") && !l.starts_with("from"))
        .map(|l| l.split('#').next().unwrap_or(l).trim());

    let mut lines: Vec<String> = imports.chain(vars).map(str::to_string).collect();
    lines.push(format!("{TARGET} = {expr}{trigger}"));

    let cursor = Cursor {
        line: lines.len(),
        column: lines.last().map_or(0, |l| l.chars().count()),
    };
    Synthetic {
        source: lines.join("\n"),
        cursor,
    }
}
