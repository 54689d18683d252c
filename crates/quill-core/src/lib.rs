//! Coordination core for the composer screen.
//!
//! At most one of {emoji/font panel, tool tray, keyboard} may be anchored to
//! the bottom of the screen at any instant. This crate holds the state
//! machines that enforce that, with no UI or platform dependencies.
//!
//! # Components
//!
//! - [`CoordinationContext`]: the single-owner active-driver slot, the last
//!   keyboard inset, and the animated composer offset.
//! - [`PanelDriver`]: one overlay panel (parametrized by [`PanelId`]).
//! - [`KeyboardDriver`]: maps platform keyboard insets onto the same slot.
//! - [`Coordinator`]: owns all three drivers and sequences hand-offs so the
//!   previous holder is hidden before the next one claims the slot.
//! - [`AnimatedValue`]: time-eased value driving offsets.
//!
//! State transitions are synchronous and complete before any animation
//! starts; animations are sampled with [`AnimatedValue::value_at`] and can be
//! retargeted at any time.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod context;
mod coordinator;
mod effect;
pub mod env;
mod keyboard;
mod panel;

pub use animation::{AnimatedValue, AnimationConfig, Easing};
pub use context::{CoordinationContext, DriverId, PanelId};
pub use coordinator::Coordinator;
pub use effect::DriverEffect;
pub use env::{Environment, SystemEnv};
pub use keyboard::{InsetEdge, KeyboardDriver, KeyboardInsets};
pub use panel::PanelDriver;
