//! Deterministic simulation harness for the composer screen.
//!
//! Virtual-clock implementations of the Environment and Driver traits for
//! deterministic, reproducible testing of panel/keyboard coordination and
//! the editing-surface protocol.
//!
//! # Slot checks
//!
//! [`SimDriver`] can carry an [`InvariantRegistry`]; every render is then
//! checked for keyboard/panel exclusivity and the violations are recorded
//! for the test to inspect.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_driver;
pub mod sim_env;

pub use invariants::{
    ActiveDriverVisible, ComposerLiftMatchesActive, ComposerSnapshot, HiddenPanelsParked,
    Invariant, InvariantRegistry, InvariantResult, PanelSnapshot, SingleActiveDriver, Violation,
};
pub use sim_driver::{SimDriver, SimDriverError};
pub use sim_env::SimEnv;
