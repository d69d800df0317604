//! Engine backed by the `jedi` Python library.
//!
//! A short helper program runs under the configured interpreter, reads the
//! synthetic source on stdin and prints a JSON list on stdout. Any Python
//! exception is reported on stderr as `JEDI_ERROR:<traceback>` with exit
//! status 1.

use crate::engine::{Completion, Engine, EngineError, Parameter};
use crate::synth::Cursor;
use serde::de::DeserializeOwned;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

const HELPER: &str = r#"
import json
import sys
import traceback


def _text(value):
    return "" if value is None else str(value)


def _default(param):
    getter = getattr(param, "get_default", None)
    value = getter() if callable(getter) else None
    return None if value is None else str(value)


def _annotation(param):
    getter = getattr(param, "annotation_string", None)
    return _text(getter() if callable(getter) else None)


def main():
    try:
        import jedi

        mode, path = sys.argv[1], sys.argv[2]
        line, column = int(sys.argv[3]), int(sys.argv[4])
        script = jedi.Script(sys.stdin.read(), path=path)
        out = []
        if mode == "signature":
            signatures = script.get_signatures(line, column)
            if signatures:
                sig = signatures[0]
                for param in sig.params:
                    out.append(
                        {
                            "name": param.name,
                            "kind": _text(getattr(param, "kind", "")),
                            "default": _default(param),
                            "annotation": _annotation(param),
                            "docstring": sig.docstring(),
                        }
                    )
        else:
            for c in script.complete(line, column):
                out.append({"name": c.name, "type": c.type, "docstring": c.docstring()})
        print(json.dumps(out))
    except Exception:
        print("JEDI_ERROR:" + traceback.format_exc(), file=sys.stderr)
        sys.exit(1)


main()
"#;

/// Runs [`HELPER`] in a fresh interpreter per query.
#[derive(Debug, Clone)]
pub struct JediEngine {
    python: String,
    /// Path reported to jedi for the synthetic module; relative imports
    /// resolve from its directory.
    path: PathBuf,
}

impl JediEngine {
    pub fn new(python: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            python: python.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    fn query<T: DeserializeOwned>(
        &self,
        mode: &str,
        source: &str,
        cursor: Cursor,
    ) -> Result<Vec<T>, EngineError> {
        let mut child = Command::new(&self.python)
            .arg("-c")
            .arg(HELPER)
            .arg(mode)
            .arg(&self.path)
            .arg(cursor.line.to_string())
            .arg(cursor.column.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: self.python.clone(),
                source,
            })?;

        // Dropping stdin closes the pipe so the helper sees EOF. A helper
        // that exits early breaks the pipe; it is still reaped below and its
        // own failure takes precedence over the write error.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(source.as_bytes()),
            None => Ok(()),
        };
        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(EngineError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        written?;
        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

impl Engine for JediEngine {
    fn complete(&self, source: &str, cursor: Cursor) -> Result<Vec<Completion>, EngineError> {
        self.query("complete", source, cursor)
    }

    fn signatures(&self, source: &str, cursor: Cursor) -> Result<Vec<Parameter>, EngineError> {
        self.query("signature", source, cursor)
    }
}
