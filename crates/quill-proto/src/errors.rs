//! Protocol error types.
//!
//! None of these are fatal to the screen. Callers on the receiving side drop
//! the offending envelope and keep their current state.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while encoding or decoding envelopes.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Body is not valid JSON, or does not match the expected shape.
    #[error("malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Body parsed, but the top-level value is not a JSON object.
    #[error("envelope is not a JSON object")]
    NotAnObject,

    /// Envelope belongs to unrelated bridge traffic.
    #[error("foreign channel: expected messageType {expected:?}, found {found:?}")]
    ForeignChannel {
        /// Discriminator this protocol expects.
        expected: &'static str,
        /// Discriminator carried by the envelope, if any.
        found: Option<String>,
    },

    /// Command identifier outside the known action vocabulary.
    #[error("unknown command identifier: {0}")]
    UnknownCommand(String),
}

impl ProtocolError {
    /// Returns true if the envelope was well-formed but addressed elsewhere.
    ///
    /// Foreign traffic is expected on a shared bridge and is not worth more
    /// than a trace line; malformed bodies point at a broken peer.
    pub fn is_foreign(&self) -> bool {
        matches!(self, Self::ForeignChannel { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreign_channel_is_foreign() {
        let err = ProtocolError::ForeignChannel { expected: "richEditor", found: None };
        assert!(err.is_foreign());
        assert!(!ProtocolError::NotAnObject.is_foreign());
    }

    #[test]
    fn display_names_both_channels() {
        let err = ProtocolError::ForeignChannel {
            expected: "richEditor",
            found: Some("analytics".into()),
        };
        let text = err.to_string();
        assert!(text.contains("richEditor"));
        assert!(text.contains("analytics"));
    }
}
