//! Application layer for the composer screen.
//!
//! Pure state machines and a generic runtime wiring the coordination core to
//! the embedded editing surface, so the same orchestration code runs on a
//! device host and in deterministic simulation.
//!
//! # Components
//!
//! - [`Composer`]: screen controller (tap routing, font sync, selection
//!   mirror, toolbar flag)
//! - [`Bridge`]: envelope codec and inbound dispatch for the editing surface
//! - [`Driver`]: trait for host-specific I/O
//! - [`Runtime`]: generic orchestration loop using a Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod action_bar;
mod app;
mod bridge;
mod config;
mod driver;
mod event;
mod runtime;
mod state;
mod view;

pub use action::{AppAction, Route};
pub use action_bar::ActionBar;
pub use app::Composer;
pub use bridge::Bridge;
pub use config::{AnimationSettings, ComposerConfig, ConfigError, EasingSetting, FontCatalog};
pub use driver::Driver;
pub use event::AppEvent;
pub use runtime::Runtime;
pub use state::Selection;
pub use view::{ComposerView, EntryView, PanelView};
