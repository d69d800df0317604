//! `.pyi` stub rendering and reading.
//!
//! A stub is the imports of a `@types` block, a blank line when there are
//! any, then one `name: type` line per annotation.

use crate::error::StubError;
use crate::lines::split_lines;
use crate::model::{Annotations, StubEntry};
use crate::types::parse_types_block;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

static RE_STUB_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*:\s*([^#]+?)(?:\s*#\s*(.*))?$").unwrap()
});

/// Render imports and annotations into stub text with a trailing newline.
pub fn generate_stub(imports: &[String], annotations: &Annotations) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(imports.len() + annotations.len() + 1);
    if !imports.is_empty() {
        lines.extend(imports.iter().cloned());
        lines.push(String::new());
    }
    for (name, ty) in annotations.iter() {
        lines.push(format!("{name}: {ty}"));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Parse a template and render its stub, refusing templates whose
/// `@types` block has malformed lines.
pub fn render_template(document: &str) -> Result<String, StubError> {
    let block = parse_types_block(document);
    if !block.malformed.is_empty() {
        return Err(StubError::Malformed(block.malformed));
    }
    Ok(generate_stub(&block.imports, &block.annotations))
}

/// Read a template, render its stub and write it to `stub_path`,
/// replacing any existing file. Nothing is written on error.
pub fn write_stub(template_path: &Path, stub_path: &Path) -> Result<(), StubError> {
    let content = fs::read_to_string(template_path).map_err(|source| StubError::Read {
        path: template_path.to_path_buf(),
        source,
    })?;

    let stub = render_template(&content)?;

    fs::write(stub_path, stub).map_err(|source| StubError::Write {
        path: stub_path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        template = %template_path.display(),
        stub = %stub_path.display(),
        "wrote stub"
    );
    Ok(())
}

/// Read the `name: type  # doc` lines of a stub, in file order.
///
/// Imports, blank lines and anything else that is not an annotation are
/// skipped. A later line for the same name wins.
pub fn parse_stub(stub: &str) -> Vec<(String, StubEntry)> {
    let mut entries: Vec<(String, StubEntry)> = Vec::new();
    for line in split_lines(stub) {
        let Some(caps) = RE_STUB_LINE.captures(line) else {
            continue;
        };
        let name = caps[1].to_string();
        let entry = StubEntry {
            ty: caps[2].trim().to_string(),
            doc: caps
                .get(3)
                .map(|m| m.as_str().trim())
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        };
        match entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = entry,
            None => entries.push((name, entry)),
        }
    }
    entries
}

/// Look up a single name in a stub.
pub fn lookup(stub: &str, name: &str) -> Option<StubEntry> {
    parse_stub(stub)
        .into_iter()
        .find(|(n, _)| n == name)
        .map(|(_, entry)| entry)
}
