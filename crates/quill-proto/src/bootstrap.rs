//! One-time startup configuration for the editing surface.
//!
//! Injected before the surface loads its content. Not part of the
//! steady-state envelope protocol.

use crate::{FontDescriptor, Result};

/// Startup globals handed to the surface.
#[derive(Debug, Clone, Copy)]
pub struct Bootstrap<'a> {
    /// Tells the surface it is hosted natively (`window.ENV_RN`).
    pub environment_flag: bool,
    /// Full font catalog (`window.__Editor_Fonts`).
    pub fonts: &'a [FontDescriptor],
}

impl<'a> Bootstrap<'a> {
    /// Bootstrap for a native host with the given catalog.
    pub fn new(fonts: &'a [FontDescriptor]) -> Self {
        Self { environment_flag: true, fonts }
    }

    /// Script assigning the startup globals.
    pub fn script(&self) -> Result<String> {
        let fonts = serde_json::to_string(self.fonts)?;
        Ok(format!(
            "window.ENV_RN = {};\nwindow.__Editor_Fonts = {fonts};\n",
            self.environment_flag
        ))
    }
}
