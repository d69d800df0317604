use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of the write-stub operation.
#[derive(Debug, Error)]
pub enum StubError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The `@types` block contains lines that are neither imports,
    /// docstrings nor annotations. Carries every offending line.
    #[error("malformed type annotation lines: {0:?}")]
    Malformed(Vec<String>),
}
