//! Observable screen state.
//!
//! [`Selection`] mirrors the editing surface's cursor context. It is written
//! only by inbound selection updates and read by the action bar to decide
//! which entries to highlight.

use quill_proto::{Command, SelectionUpdate};

/// Native mirror of the surface's cursor context.
///
/// Identifiers are stored as received. Unknown ones are kept but never
/// highlight anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Block type at the cursor. Empty before the first update.
    pub block: String,
    /// Inline styles active at the cursor.
    pub style: Vec<String>,
}

impl Selection {
    /// Shallow merge: fields carried by the update replace ours, absent
    /// fields keep their previous value.
    pub fn merge(&mut self, update: SelectionUpdate) {
        if let Some(block) = update.block {
            self.block = block;
        }
        if let Some(style) = update.style {
            self.style = style;
        }
    }

    /// Whether `command` is the current block type or an active style.
    pub fn is_active(&self, command: Command) -> bool {
        let id = command.as_str();
        self.block == id || self.style.iter().any(|style| style == id)
    }

    /// Known commands active at the cursor, block first.
    pub fn commands(&self) -> Vec<Command> {
        std::iter::once(&self.block)
            .chain(&self.style)
            .filter_map(|id| Command::from_wire(id))
            .collect()
    }
}
