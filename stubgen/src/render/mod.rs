//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod pyi;

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

/// Trait for rendering a template's annotations into an output format.
pub trait Renderer {
    fn render(&self, document: &str) -> Result<String>;

    fn file_extension(&self) -> &str;

    /// Render `template` into `out`, replacing it. Nothing is written when
    /// rendering fails.
    fn write(&self, template: &Path, out: &Path) -> Result<()> {
        let content = fs::read_to_string(template)
            .with_context(|| format!("failed to read {}", template.display()))?;
        let rendered = self.render(&content)?;
        fs::write(out, rendered).with_context(|| format!("failed to write {}", out.display()))
    }
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "pyi" | "stub" => Ok(Box::new(pyi::PyiRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use pyi or json", format)),
    }
}
