//! Code-intelligence engine interface.

use crate::synth::Cursor;
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// A completion candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub name: String,
    /// Engine-specific kind, e.g. `function`, `instance`, `module`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub docstring: String,
}

/// One parameter of the first matching call signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub annotation: String,
    /// Docstring of the whole signature, repeated on every parameter
    #[serde(default)]
    pub docstring: String,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("engine I/O failed")]
    Io(#[from] io::Error),

    #[error("engine failed ({})", describe_failure(.status, .stderr))]
    Failed { status: Option<i32>, stderr: String },

    #[error("engine returned malformed output")]
    Decode(#[from] serde_json::Error),
}

fn describe_failure(status: &Option<i32>, stderr: &str) -> String {
    let status = match status {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    };
    match stderr.trim() {
        "" => status,
        detail => format!("{status}: {detail}"),
    }
}

/// Answers queries about a Python source text at a cursor position.
///
/// `cursor.line` is 1-based; `cursor.column` counts characters before the
/// cursor on that line.
pub trait Engine {
    fn complete(&self, source: &str, cursor: Cursor) -> Result<Vec<Completion>, EngineError>;

    fn signatures(&self, source: &str, cursor: Cursor) -> Result<Vec<Parameter>, EngineError>;
}
