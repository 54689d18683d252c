//! Script replay for the composer runtime.
//!
//! Feeds a JSON-lines event script through the same [`quill_app::Runtime`]
//! a device host uses and writes every envelope posted to the editing
//! surface as one JSON line.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod replay;
mod script;

use std::{io::Write, path::Path};

pub use error::CliError;
use quill_app::{ComposerConfig, FontCatalog, Runtime};
pub use replay::ReplayDriver;
pub use script::{ScriptPanel, Step, load as load_script, parse as parse_script};

/// Load the optional config and font catalog files.
pub fn load_inputs(
    config: Option<&Path>,
    fonts: Option<&Path>,
) -> Result<(ComposerConfig, FontCatalog), CliError> {
    let config = match config {
        Some(path) => ComposerConfig::load(path)?,
        None => ComposerConfig::default(),
    };
    let fonts = match fonts {
        Some(path) => FontCatalog::load(path)?,
        None => FontCatalog::default(),
    };
    Ok((config, fonts))
}

/// Replay `steps` and write posted envelopes to `out`.
pub async fn replay<W: Write + Send>(
    steps: Vec<Step>,
    config: &ComposerConfig,
    fonts: FontCatalog,
    out: W,
) -> Result<(), CliError> {
    tracing::info!(steps = steps.len(), fonts = fonts.len(), "replaying script");
    let driver = ReplayDriver::new(steps, out);
    Runtime::new(driver, config, fonts).run().await
}
