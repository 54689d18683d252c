//! Selection-state updates reported by the editing surface.
//!
//! Any inbound envelope that is not a toolbar or content event is a
//! selection update. The surface owns this vocabulary and may grow it, so the
//! update keeps unknown fields instead of rejecting them. Only `block` and
//! `style` are interpreted.

use serde_json::{Map, Value};

use crate::Command;

/// Cursor context carried by a selection update.
///
/// Fields are optional: an update replaces only what it carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionUpdate {
    /// Block type at the cursor, e.g. `unordered-list-item`.
    pub block: Option<String>,
    /// Inline styles active at the cursor, e.g. `BOLD`.
    pub style: Option<Vec<String>>,
    /// Remaining fields, kept verbatim.
    pub extra: Map<String, Value>,
    /// Names of fields that were present but had an unusable shape
    /// (non-string `block`, non-array `style`). Reported so the receiver
    /// can log them; the values themselves are discarded.
    pub ignored: Vec<String>,
}

impl SelectionUpdate {
    /// Build an update from the envelope body (discriminators removed).
    ///
    /// Never fails. Shape mismatches in `block` / `style` end up in
    /// [`SelectionUpdate::ignored`], and non-string entries inside `style`
    /// are skipped.
    pub fn from_fields(mut fields: Map<String, Value>) -> Self {
        let mut ignored = Vec::new();

        let block = match fields.remove("block") {
            None => None,
            Some(Value::String(block)) => Some(block),
            Some(_) => {
                ignored.push("block".to_owned());
                None
            },
        };

        let style = match fields.remove("style") {
            None => None,
            Some(Value::Array(entries)) => Some(
                entries
                    .into_iter()
                    .filter_map(|entry| match entry {
                        Value::String(style) => Some(style),
                        _ => None,
                    })
                    .collect(),
            ),
            Some(_) => {
                ignored.push("style".to_owned());
                None
            },
        };

        Self { block, style, extra: fields, ignored }
    }

    /// Update carrying a block type and styles.
    pub fn new(block: impl Into<String>, style: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            block: Some(block.into()),
            style: Some(style.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Known commands named by this update, block first.
    pub fn commands(&self) -> Vec<Command> {
        self.block
            .iter()
            .chain(self.style.iter().flatten())
            .filter_map(|id| Command::from_wire(id))
            .collect()
    }
}
