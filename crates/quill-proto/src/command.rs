//! Action vocabulary shared by the action bar and the editing surface.
//!
//! A [`Command`] identifier is what the surface reports back in a selection
//! update (`block` / `style`) and what the shell forwards in a
//! `DOCUMENT_COMMAND`. The wire strings are fixed by the surface, so inline
//! styles are upper-case (`BOLD`) while block types are kebab-case
//! (`unordered-list-item`).

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Known command identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Toggle bold inline style.
    #[serde(rename = "BOLD")]
    Bold,
    /// Toggle italic inline style.
    #[serde(rename = "ITALIC")]
    Italic,
    /// Turn the current block into a bulleted list item.
    #[serde(rename = "unordered-list-item")]
    UnorderedList,
    /// Turn the current block into a numbered list item.
    #[serde(rename = "ordered-list-item")]
    OrderedList,
    /// Turn the current block into a quote.
    #[serde(rename = "blockquote")]
    Blockquote,
    /// Insert an image at the cursor.
    #[serde(rename = "insert-image")]
    InsertImage,
    /// Open the camera and insert the capture.
    #[serde(rename = "open-camera")]
    OpenCamera,
    /// Change the composition font.
    #[serde(rename = "change-font")]
    ChangeFont,
}

impl Command {
    /// Every known command, in action-bar order.
    pub const ALL: [Self; 8] = [
        Self::Bold,
        Self::Italic,
        Self::UnorderedList,
        Self::OrderedList,
        Self::Blockquote,
        Self::InsertImage,
        Self::OpenCamera,
        Self::ChangeFont,
    ];

    /// Wire identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bold => "BOLD",
            Self::Italic => "ITALIC",
            Self::UnorderedList => "unordered-list-item",
            Self::OrderedList => "ordered-list-item",
            Self::Blockquote => "blockquote",
            Self::InsertImage => "insert-image",
            Self::OpenCamera => "open-camera",
            Self::ChangeFont => "change-font",
        }
    }

    /// Look up a wire identifier. `None` for identifiers outside the
    /// vocabulary.
    pub fn from_wire(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.as_str() == id)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s).ok_or_else(|| ProtocolError::UnknownCommand(s.to_owned()))
    }
}

/// An action-bar entry as forwarded to the surface.
///
/// `DOCUMENT_COMMAND` spreads the whole entry into the envelope, so the
/// surface sees the label and icon alongside the command. Flags are omitted
/// from the wire when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    /// Human-readable label.
    pub label: String,
    /// Command applied at the cursor.
    pub command: Command,
    /// Icon name rendered on the action bar.
    pub text_icon: String,
    /// Inline style toggle.
    #[serde(default, skip_serializing_if = "is_false")]
    pub inline: bool,
    /// Block type change.
    #[serde(default, skip_serializing_if = "is_false")]
    pub block: bool,
    /// Entry leads to another screen.
    #[serde(default, skip_serializing_if = "is_false")]
    pub navigation: bool,
}

impl ActionDescriptor {
    /// Entry toggling an inline style.
    pub fn inline(label: &str, command: Command, text_icon: &str) -> Self {
        Self {
            label: label.to_owned(),
            command,
            text_icon: text_icon.to_owned(),
            inline: true,
            block: false,
            navigation: false,
        }
    }

    /// Entry changing the block type.
    pub fn block(label: &str, command: Command, text_icon: &str) -> Self {
        Self {
            label: label.to_owned(),
            command,
            text_icon: text_icon.to_owned(),
            inline: false,
            block: true,
            navigation: false,
        }
    }

    /// Mark the entry as navigating away.
    #[must_use]
    pub fn with_navigation(mut self) -> Self {
        self.navigation = true;
        self
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(flag: &bool) -> bool {
    !*flag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_ids_round_trip_through_lookup() {
        for command in Command::ALL {
            assert_eq!(Command::from_wire(command.as_str()), Some(command));
        }
    }

    #[test]
    fn unknown_id_is_rejected_by_from_str() {
        let err = "STRIKETHROUGH".parse::<Command>().unwrap_err();
        assert!(matches!(err, ProtocolError::UnknownCommand(id) if id == "STRIKETHROUGH"));
    }

    #[test]
    fn serde_uses_wire_ids() {
        let json = serde_json::to_string(&Command::UnorderedList).unwrap();
        assert_eq!(json, "\"unordered-list-item\"");
    }

    #[test]
    fn descriptor_omits_unset_flags() {
        let entry = ActionDescriptor::inline("Bold", Command::Bold, "format-bold");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "label": "Bold",
                "command": "BOLD",
                "textIcon": "format-bold",
                "inline": true,
            })
        );
    }
}
