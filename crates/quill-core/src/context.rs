//! Shared coordination state.
//!
//! One [`CoordinationContext`] exists per screen session and is passed by
//! reference into every driver operation. Its `active` slot is the only place
//! exclusivity is recorded: drivers never inspect each other, they claim and
//! release the slot.

use std::{fmt, ops::Sub, time::Duration};

use crate::{AnimatedValue, AnimationConfig};

/// Identity of an overlay panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    /// Emoji and font picker.
    Emoji,
    /// Tool tray (image, camera, attachments).
    ToolTray,
}

impl PanelId {
    /// Both panels.
    pub const ALL: [Self; 2] = [Self::Emoji, Self::ToolTray];

    /// Stable name for logs and scripts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Emoji => "emoji",
            Self::ToolTray => "tool_tray",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can hold the bottom of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverId {
    /// One of the overlay panels.
    Panel(PanelId),
    /// The platform keyboard.
    Keyboard,
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panel(panel) => write!(f, "panel:{panel}"),
            Self::Keyboard => f.write_str("keyboard"),
        }
    }
}

/// Mutable snapshot shared by all drivers of one screen.
///
/// # Invariants
///
/// - At most one driver holds `active` at any time. Claiming overwrites the
///   previous holder; callers are expected to have hidden it first.
/// - `translate_y` targets `-height` of the active panel, or `0` otherwise.
#[derive(Debug, Clone)]
pub struct CoordinationContext<I> {
    /// Last keyboard inset reported by the platform.
    bottom_inset: f32,
    /// Current holder of the bottom of the screen.
    active: Option<DriverId>,
    /// Vertical translation of the whole composer (surface + action bar).
    translate_y: AnimatedValue<I>,
}

impl<I> CoordinationContext<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Context with nothing active and the composer at rest.
    pub fn new(config: AnimationConfig) -> Self {
        Self { bottom_inset: 0.0, active: None, translate_y: AnimatedValue::new(0.0, config) }
    }

    /// Current holder of the slot.
    pub fn active_driver(&self) -> Option<DriverId> {
        self.active
    }

    /// True if `id` holds the slot.
    pub fn is_active(&self, id: DriverId) -> bool {
        self.active == Some(id)
    }

    /// Single setter for the slot. Returns the previous holder.
    ///
    /// Setting `Some(id)` implicitly releases whoever held it before.
    pub fn set_active_driver(&mut self, id: Option<DriverId>) -> Option<DriverId> {
        let previous = std::mem::replace(&mut self.active, id);
        if previous != id {
            tracing::debug!(from = ?previous, to = ?id, "active driver changed");
        }
        previous
    }

    /// Claim the slot for `id`.
    pub fn claim(&mut self, id: DriverId) -> Option<DriverId> {
        let previous = self.set_active_driver(Some(id));
        if let Some(previous) = previous
            && previous != id
        {
            tracing::debug!(%previous, claimant = %id, "slot taken over without release");
        }
        previous
    }

    /// Release the slot if `id` holds it. Returns whether it did.
    pub fn release(&mut self, id: DriverId) -> bool {
        if self.is_active(id) {
            self.set_active_driver(None);
            true
        } else {
            false
        }
    }

    /// Last keyboard inset.
    pub fn bottom_inset(&self) -> f32 {
        self.bottom_inset
    }

    /// Record a keyboard inset. Negative and non-finite values read as zero.
    pub fn set_bottom_inset(&mut self, bottom: f32) {
        self.bottom_inset = if bottom.is_finite() { bottom.max(0.0) } else { 0.0 };
    }

    /// Composer translation animation.
    pub fn translate_y(&self) -> &AnimatedValue<I> {
        &self.translate_y
    }

    /// Composer translation sampled at `now`.
    pub fn composer_offset(&self, now: I) -> f32 {
        self.translate_y.value_at(now)
    }

    /// Raise the composer by `height` so it sits above a panel.
    pub fn lift_composer(&mut self, height: f32, now: I) {
        self.translate_y.animate_to(-height, now);
    }

    /// Return the composer to rest.
    pub fn lower_composer(&mut self, now: I) {
        self.translate_y.animate_to(0.0, now);
    }
}
