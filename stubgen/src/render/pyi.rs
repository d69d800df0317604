//! `.pyi` stub renderer — the only format that refuses malformed blocks.

use crate::render::Renderer;
use anyhow::Result;
use std::path::Path;

pub struct PyiRenderer;

impl Renderer for PyiRenderer {
    fn render(&self, document: &str) -> Result<String> {
        Ok(typedjinja_syntax::render_template(document)?)
    }

    fn file_extension(&self) -> &str {
        "pyi"
    }

    fn write(&self, template: &Path, out: &Path) -> Result<()> {
        Ok(typedjinja_syntax::write_stub(template, out)?)
    }
}
