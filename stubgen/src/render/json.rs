//! JSON renderer — structured output for tooling integration.
//!
//! Unlike the stub, malformed lines are reported in the output instead of
//! failing the template, and `@typedmacro` signatures are included.

use crate::render::Renderer;
use anyhow::{Context, Result};
use serde::Serialize;
use typedjinja_syntax::{parse_macro_blocks, parse_types_block, MacroSignature};

pub struct JsonRenderer;

#[derive(Serialize)]
struct TemplateJson<'a> {
    imports: &'a [String],
    /// A list rather than an object so order survives
    annotations: Vec<AnnotationJson<'a>>,
    malformed: &'a [String],
    macros: Vec<MacroJson<'a>>,
}

#[derive(Serialize)]
struct AnnotationJson<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    ty: &'a str,
}

#[derive(Serialize)]
struct MacroJson<'a> {
    name: &'a str,
    params: &'a str,
    docstring: Option<&'a str>,
}

impl<'a> From<&'a MacroSignature> for MacroJson<'a> {
    fn from(m: &'a MacroSignature) -> Self {
        MacroJson {
            name: &m.name,
            params: &m.params,
            docstring: m.docstring.as_deref(),
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, document: &str) -> Result<String> {
        let block = parse_types_block(document);
        let macros = parse_macro_blocks(document);

        let view = TemplateJson {
            imports: &block.imports,
            annotations: block
                .annotations
                .iter()
                .map(|(name, ty)| AnnotationJson { name, ty })
                .collect(),
            malformed: &block.malformed,
            macros: macros.iter().map(MacroJson::from).collect(),
        };

        let mut out =
            serde_json::to_string_pretty(&view).context("failed to serialize template")?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn json_lists_everything() {
        let doc = "{# @types\nimport os\nz: int\na: str\nbad\n#}\n{# @typedmacro\nf(x)\nDoes f.\n#}";
        let out = JsonRenderer.render(doc).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!({
                "imports": ["import os"],
                "annotations": [
                    { "name": "z", "type": "int" },
                    { "name": "a", "type": "str" }
                ],
                "malformed": ["bad"],
                "macros": [{ "name": "f", "params": "x", "docstring": "Does f." }]
            })
        );
    }

    #[test]
    fn json_without_blocks() {
        let out = JsonRenderer.render("<p>plain</p>").unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["annotations"], json!([]));
        assert_eq!(value["macros"], json!([]));
    }
}
