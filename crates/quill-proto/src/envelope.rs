//! JSON envelopes exchanged with the editing surface.
//!
//! Wire shape: `{ "messageType": "richEditor", "type": <EventType>, ...fields }`.
//!
//! # Invariants
//!
//! - Every encoded [`Outbound`] carries [`CHANNEL`] as its `messageType`.
//! - Decoding rejects any envelope whose `messageType` is not [`CHANNEL`],
//!   before looking at anything else in the body.
//! - [`Inbound::decode`] never rejects an envelope on the right channel for
//!   its event type: unknown types become [`Inbound::Selection`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{ActionDescriptor, FontDescriptor, ProtocolError, Result, SelectionUpdate};

/// Channel discriminator separating editor traffic from other bridge users.
pub const CHANNEL: &str = "richEditor";

const MESSAGE_TYPE: &str = "messageType";
const EVENT_TYPE: &str = "type";

/// Messages posted from the native shell to the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outbound {
    /// Replace the whole document.
    SetContent {
        /// New document content.
        content: String,
    },

    /// Switch the composition font.
    EnableFont {
        /// Catalog entry of the selected font.
        data: FontDescriptor,
    },

    /// Apply an action at the current cursor or selection.
    DocumentCommand(ActionDescriptor),

    /// Show the in-document toolbar. Sent once per keyboard rising edge.
    ShowToolbar,
}

impl Outbound {
    /// Wire event type.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SetContent { .. } => "SET_CONTENT",
            Self::EnableFont { .. } => "ENABLE_FONT",
            Self::DocumentCommand(_) => "DOCUMENT_COMMAND",
            Self::ShowToolbar => "SHOW_TOOLBAR",
        }
    }

    /// Encode into a complete envelope.
    pub fn encode(&self) -> Result<String> {
        let mut fields = match serde_json::to_value(self)? {
            Value::Object(fields) => fields,
            _ => return Err(ProtocolError::NotAnObject),
        };
        fields.insert(MESSAGE_TYPE.to_owned(), Value::String(CHANNEL.to_owned()));
        Ok(serde_json::to_string(&fields)?)
    }

    /// Decode an envelope produced by [`Outbound::encode`].
    ///
    /// Used by simulated surfaces; the shell itself never receives these.
    pub fn decode(raw: &str) -> Result<Self> {
        let fields = open(raw)?;
        Ok(serde_json::from_value(Value::Object(fields))?)
    }
}

/// Events posted from the surface to the native shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Surface wants the action bar shown.
    ShowToolbar,

    /// Surface wants the action bar hidden.
    HideToolbar,

    /// Content echo. Observed only, never persisted by the shell.
    GetContent(Map<String, Value>),

    /// Anything else: the cursor context changed.
    Selection(SelectionUpdate),
}

impl Inbound {
    /// Decode a raw envelope.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::Malformed`] if the body is not JSON.
    /// - [`ProtocolError::NotAnObject`] if the body is JSON but not an object.
    /// - [`ProtocolError::ForeignChannel`] if `messageType` is missing or
    ///   differs from [`CHANNEL`].
    pub fn decode(raw: &str) -> Result<Self> {
        let mut fields = open(raw)?;
        let event_type = match fields.remove(EVENT_TYPE) {
            Some(Value::String(event_type)) => Some(event_type),
            Some(other) => {
                // Not a dispatchable type; keep it with the rest of the body.
                fields.insert(EVENT_TYPE.to_owned(), other);
                None
            },
            None => None,
        };

        Ok(match event_type.as_deref() {
            Some("SHOW_TOOLBAR") => Self::ShowToolbar,
            Some("HIDE_TOOLBAR") => Self::HideToolbar,
            Some("GET_CONTENT") => Self::GetContent(fields),
            Some(other) => {
                let mut update = SelectionUpdate::from_fields(fields);
                update.extra.insert(EVENT_TYPE.to_owned(), Value::String(other.to_owned()));
                Self::Selection(update)
            },
            None => Self::Selection(SelectionUpdate::from_fields(fields)),
        })
    }

    /// Wire event type, or `None` for selection updates without one.
    pub fn event_type(&self) -> Option<&str> {
        match self {
            Self::ShowToolbar => Some("SHOW_TOOLBAR"),
            Self::HideToolbar => Some("HIDE_TOOLBAR"),
            Self::GetContent(_) => Some("GET_CONTENT"),
            Self::Selection(update) => update.extra.get(EVENT_TYPE).and_then(Value::as_str),
        }
    }
}

/// Parse an envelope and strip its channel discriminator.
fn open(raw: &str) -> Result<Map<String, Value>> {
    let Value::Object(mut fields) = serde_json::from_str::<Value>(raw)? else {
        return Err(ProtocolError::NotAnObject);
    };

    match fields.remove(MESSAGE_TYPE) {
        Some(Value::String(channel)) if channel == CHANNEL => Ok(fields),
        Some(Value::String(channel)) => {
            Err(ProtocolError::ForeignChannel { expected: CHANNEL, found: Some(channel) })
        },
        Some(other) => Err(ProtocolError::ForeignChannel {
            expected: CHANNEL,
            found: Some(other.to_string()),
        }),
        None => Err(ProtocolError::ForeignChannel { expected: CHANNEL, found: None }),
    }
}
