//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::Composer`] state machine.
//!
//! Events originate from two sources:
//! - The host: taps, keyboard insets, layout passes, font selection, ticks.
//! - The editing surface: raw envelopes, decoded by the [`crate::Bridge`]
//!   into the toolbar, content and selection events below.

use quill_core::{KeyboardInsets, PanelId};
use quill_proto::{Command, SelectionUpdate};
use serde_json::{Map, Value};

/// Events processed by the Composer state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick (animation frame).
    Tick,

    /// Action-bar entry tapped.
    Tap(Command),

    /// Raw envelope from the editing surface, not yet decoded.
    SurfaceMessage(String),

    /// Surface asked for the action bar.
    ToolbarShown,

    /// Surface asked to hide the action bar.
    ToolbarHidden,

    /// Surface echoed its content.
    ContentObserved(Map<String, Value>),

    /// Surface reported a new cursor context.
    SelectionChanged(SelectionUpdate),

    /// Platform keyboard observer reported insets.
    KeyboardInsets(KeyboardInsets),

    /// A panel finished a layout pass.
    PanelLayout {
        /// Which panel.
        panel: PanelId,
        /// Rendered height.
        height: f32,
    },

    /// The bound text input was mounted or unmounted.
    InputMounted(bool),

    /// Global font selection changed.
    FontSelected(String),

    /// Host is closing the screen.
    Close,
}
