//! CLI error types.

use std::io;

use quill_app::ConfigError;
use thiserror::Error;

/// Errors surfaced by the `quill` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Config or font catalog could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Script file or output stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A script line is not a valid step.
    #[error("script line {line}: {source}")]
    Script {
        /// 1-based line number.
        line: usize,
        /// Underlying parse error.
        source: serde_json::Error,
    },
}
