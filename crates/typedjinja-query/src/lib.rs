//! typedjinja query layer — completion, signature help and hover for
//! template variables, driven by a generated `.pyi` stub.
//!
//! Complete and signature queries assemble a small synthetic Python module
//! from the stub ([`synth`]) and hand it to a code-intelligence [`Engine`].
//! Engine failures never reach the caller: they degrade to an empty list.

pub mod engine;
pub mod jedi;
pub mod synth;

pub use engine::{Completion, Engine, EngineError, Parameter};
pub use jedi::JediEngine;
pub use synth::{synthesize, Cursor, Synthetic};

use serde_json::{json, Value};

/// Query kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Attribute completion after `expr.`
    Complete,
    /// Call-signature parameters after `expr(`
    Signature,
    /// Type and docstring of a stub variable
    Hover,
}

/// Answer one query against a stub as a JSON value.
///
/// - hover: `{"type": ..., "doc": ...}` or `{}` for unknown names
/// - complete: list of [`Completion`]
/// - signature: list of [`Parameter`]
pub fn run_query(
    mode: Mode,
    stub: &str,
    expr: &str,
    engine: &dyn Engine,
) -> serde_json::Result<Value> {
    if mode == Mode::Hover {
        return Ok(match typedjinja_syntax::lookup(stub, expr) {
            Some(entry) => json!({ "type": entry.ty, "doc": entry.doc }),
            None => json!({}),
        });
    }

    let synthetic = synthesize(stub, expr, mode);
    tracing::debug!(
        line = synthetic.cursor.line,
        column = synthetic.cursor.column,
        source = %synthetic.source,
        "querying engine"
    );

    match mode {
        Mode::Signature => {
            let params = engine
                .signatures(&synthetic.source, synthetic.cursor)
                .unwrap_or_else(|err| {
                    tracing::warn!("signature lookup failed: {err}");
                    Vec::new()
                });
            serde_json::to_value(params)
        }
        _ => {
            let completions = engine
                .complete(&synthetic.source, synthetic.cursor)
                .unwrap_or_else(|err| {
                    tracing::warn!("completion failed: {err}");
                    Vec::new()
                });
            serde_json::to_value(completions)
        }
    }
}
