//! Editing-surface message bridge.
//!
//! The [`Bridge`] is the only code that touches envelope bytes.
//!
//! # Responsibilities
//!
//! - Encodes [`Outbound`] messages and queues them for the driver to post in
//!   the next I/O cycle. Posting is fire-and-forget; no acknowledgement is
//!   tracked.
//! - Decodes raw inbound envelopes and dispatches them by event type into
//!   [`AppEvent`]s for the [`crate::Composer`].
//! - Drops foreign and malformed envelopes without surfacing an error.
//! - Produces the one-time bootstrap script injected before the surface
//!   loads.

use quill_proto::{Bootstrap, Inbound, Outbound};

use crate::{AppEvent, FontCatalog};

/// Envelope codec and dispatcher.
#[derive(Debug, Default)]
pub struct Bridge {
    outgoing: Vec<String>,
    /// Inbound envelopes dropped since creation.
    dropped: u64,
}

impl Bridge {
    /// Create an empty bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode and queue an outbound message.
    pub fn send(&mut self, message: &Outbound) {
        match message.encode() {
            Ok(raw) => {
                tracing::debug!(event_type = message.event_type(), "queue envelope");
                self.outgoing.push(raw);
            },
            Err(e) => {
                tracing::warn!(event_type = message.event_type(), error = %e, "failed to encode envelope");
            },
        }
    }

    /// Take pending outgoing envelopes.
    pub fn take_outgoing(&mut self) -> Vec<String> {
        std::mem::take(&mut self.outgoing)
    }

    /// Decode a raw inbound envelope into App events.
    ///
    /// Returns no events for anything that cannot be decoded.
    pub fn handle_message(&mut self, raw: &str) -> Vec<AppEvent> {
        match Inbound::decode(raw) {
            Ok(inbound) => vec![Self::dispatch(inbound)],
            Err(e) => {
                self.dropped += 1;
                if e.is_foreign() {
                    tracing::trace!(error = %e, "ignoring foreign envelope");
                } else {
                    tracing::debug!(error = %e, "dropping malformed envelope");
                }
                Vec::new()
            },
        }
    }

    /// Inbound envelopes dropped so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Startup script for the surface. `None` if the catalog cannot be
    /// serialized, in which case the surface starts without fonts.
    pub fn bootstrap(fonts: &FontCatalog, environment_flag: bool) -> Option<String> {
        let bootstrap = Bootstrap { environment_flag, fonts: fonts.fonts() };
        match bootstrap.script() {
            Ok(script) => Some(script),
            Err(e) => {
                tracing::warn!(error = %e, "failed to build surface bootstrap");
                None
            },
        }
    }

    fn dispatch(inbound: Inbound) -> AppEvent {
        match inbound {
            Inbound::ShowToolbar => AppEvent::ToolbarShown,
            Inbound::HideToolbar => AppEvent::ToolbarHidden,
            Inbound::GetContent(fields) => AppEvent::ContentObserved(fields),
            Inbound::Selection(update) => AppEvent::SelectionChanged(update),
        }
    }
}
