//! Envelope protocol for the embedded editing surface.
//!
//! Every message exchanged with the editing surface is a JSON object carrying
//! the channel discriminator `messageType: "richEditor"` and an event `type`.
//! This crate owns both vocabularies:
//!
//! - [`Outbound`]: commands the native shell posts to the surface
//!   (`SET_CONTENT`, `ENABLE_FONT`, `DOCUMENT_COMMAND`, `SHOW_TOOLBAR`).
//! - [`Inbound`]: events the surface posts back (`SHOW_TOOLBAR`,
//!   `HIDE_TOOLBAR`, `GET_CONTENT`, and anything else as a selection update).
//!
//! Decoding is strict about the envelope and permissive about the body: an
//! envelope on a foreign channel is an error, an unknown event type is a
//! [`SelectionUpdate`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bootstrap;
mod command;
mod envelope;
mod errors;
mod font;
mod selection;

pub use bootstrap::Bootstrap;
pub use command::{ActionDescriptor, Command};
pub use envelope::{CHANNEL, Inbound, Outbound};
pub use errors::{ProtocolError, Result};
pub use font::FontDescriptor;
pub use selection::SelectionUpdate;
