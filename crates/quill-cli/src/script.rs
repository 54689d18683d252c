//! JSON-lines event scripts.
//!
//! One step per line, tagged by `step`. Blank lines and lines starting with
//! `#` are skipped.
//!
//! ```text
//! {"step":"panel_layout","panel":"emoji","height":320}
//! {"step":"tap","command":"change-font"}
//! {"step":"select_font","name":"LXGW"}
//! {"step":"editor_message","message":{"messageType":"richEditor","type":"SHOW_TOOLBAR"}}
//! {"step":"wait","ms":300}
//! {"step":"close"}
//! ```

use std::{fs, path::Path};

use quill_app::AppEvent;
use quill_core::{KeyboardInsets, PanelId};
use quill_proto::Command;
use serde::Deserialize;
use serde_json::Value;

use crate::CliError;

/// Panel names accepted in scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptPanel {
    /// Emoji/font panel.
    Emoji,
    /// Tool tray.
    ToolTray,
}

impl From<ScriptPanel> for PanelId {
    fn from(panel: ScriptPanel) -> Self {
        match panel {
            ScriptPanel::Emoji => Self::Emoji,
            ScriptPanel::ToolTray => Self::ToolTray,
        }
    }
}

/// One scripted host or surface input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Tap an action-bar entry.
    Tap {
        /// Wire identifier of the entry's command.
        command: Command,
    },
    /// Deliver an envelope from the surface. A JSON string is delivered
    /// verbatim; any other value is serialized first.
    EditorMessage {
        /// Envelope body.
        message: Value,
    },
    /// Keyboard observer report.
    KeyboardInsets {
        /// Covered height.
        bottom: f32,
    },
    /// Panel layout pass.
    PanelLayout {
        /// Which panel.
        panel: ScriptPanel,
        /// Rendered height.
        height: f32,
    },
    /// Mount or unmount the bound input.
    InputMounted {
        /// New state.
        mounted: bool,
    },
    /// Change the global font.
    SelectFont {
        /// Font `scriptName`.
        name: String,
    },
    /// Let animations run, then tick.
    Wait {
        /// Milliseconds to sleep.
        ms: u64,
    },
    /// Close the screen.
    Close,
}

impl Step {
    /// Event delivered to the runtime. `None` for [`Step::Wait`], which the
    /// driver handles itself.
    pub fn into_event(self) -> Option<AppEvent> {
        Some(match self {
            Self::Tap { command } => AppEvent::Tap(command),
            Self::EditorMessage { message: Value::String(raw) } => AppEvent::SurfaceMessage(raw),
            Self::EditorMessage { message } => AppEvent::SurfaceMessage(message.to_string()),
            Self::KeyboardInsets { bottom } => AppEvent::KeyboardInsets(KeyboardInsets::bottom(bottom)),
            Self::PanelLayout { panel, height } => {
                AppEvent::PanelLayout { panel: panel.into(), height }
            },
            Self::InputMounted { mounted } => AppEvent::InputMounted(mounted),
            Self::SelectFont { name } => AppEvent::FontSelected(name),
            Self::Wait { .. } => return None,
            Self::Close => AppEvent::Close,
        })
    }
}

/// Parse a whole script, reporting the first bad line.
pub fn parse(raw: &str) -> Result<Vec<Step>, CliError> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| CliError::Script { line: index + 1, source })
        })
        .collect()
}

/// Read and parse a script file.
pub fn load(path: &Path) -> Result<Vec<Step>, CliError> {
    let raw = fs::read_to_string(path)?;
    parse(&raw)
}
