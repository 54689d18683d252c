//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::Composer`] state machine for the runtime to
//! execute.

use quill_proto::Outbound;

/// Screens reachable from the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Font selection list.
    FontList,
}

/// Actions produced by the Composer state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Render the screen.
    Render,

    /// Close the screen.
    Quit,

    /// Post an envelope to the editing surface. Fire-and-forget.
    Post(Outbound),

    /// Navigate to another screen. Fire-and-forget.
    Navigate(Route),

    /// Focus the bound text input (raises the keyboard).
    FocusInput,

    /// Blur the bound text input (drops the keyboard).
    BlurInput,
}
