//! Keyboard driver.
//!
//! The platform owns the keyboard; this driver only observes its insets and
//! asks for focus changes on the bound text input. A keyboard crossing its
//! rising edge claims the same context slot the panels use, and fires the
//! one-shot [`DriverEffect::KeyboardShown`] notification.

use std::{ops::Sub, time::Duration};

use crate::{CoordinationContext, DriverEffect, DriverId};

/// Inset geometry reported by the platform keyboard observer.
///
/// Only `bottom` is read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyboardInsets {
    /// Height the keyboard currently covers at the bottom of the screen.
    pub bottom: f32,
}

impl KeyboardInsets {
    /// Insets with the given bottom.
    pub fn bottom(bottom: f32) -> Self {
        Self { bottom }
    }

    /// Whether these insets describe a keyboard on screen.
    pub fn is_up(&self) -> bool {
        self.bottom.is_finite() && self.bottom > 0.0
    }
}

/// Classification of an inset report against the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsetEdge {
    /// Hidden to shown.
    Rising,
    /// Shown to hidden.
    Falling,
    /// No visibility change (may still be a resize).
    Steady,
}

impl InsetEdge {
    /// Compare a new inset with the previous one. Non-positive and
    /// non-finite insets count as hidden.
    pub fn classify(previous: f32, current: f32) -> Self {
        match (KeyboardInsets::bottom(previous).is_up(), KeyboardInsets::bottom(current).is_up()) {
            (false, true) => Self::Rising,
            (true, false) => Self::Falling,
            _ => Self::Steady,
        }
    }
}

/// Keyboard state machine for one bound text input.
#[derive(Debug, Clone, Default)]
pub struct KeyboardDriver {
    /// Whether the bound text input is mounted and can take focus.
    input_mounted: bool,
    /// Whether the keyboard is up (and not pre-empted by a panel).
    shown: bool,
    /// One-shot guard for [`DriverEffect::KeyboardShown`].
    pending_show_notified: bool,
}

impl KeyboardDriver {
    /// Driver whose input is not mounted yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether the bound input is mounted.
    pub fn set_input_mounted(&mut self, mounted: bool) {
        self.input_mounted = mounted;
    }

    /// Whether the bound input is mounted.
    pub fn is_input_mounted(&self) -> bool {
        self.input_mounted
    }

    /// Whether the keyboard is shown.
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Whether the current rising edge has already been notified.
    pub fn pending_show_notified(&self) -> bool {
        self.pending_show_notified
    }

    /// Ask the platform to raise the keyboard by focusing the input.
    ///
    /// The state change happens later, when the rising-edge insets arrive.
    /// Silent no-op while the input is unmounted.
    pub fn show(&self) -> Vec<DriverEffect> {
        if !self.input_mounted {
            tracing::debug!("keyboard show requested with no mounted input");
            return Vec::new();
        }
        vec![DriverEffect::FocusInput]
    }

    /// Release the slot and ask the platform to drop the keyboard.
    ///
    /// No-op if the keyboard is neither shown nor holding the slot.
    pub fn hide<I>(&mut self, ctx: &mut CoordinationContext<I>, _now: I) -> Vec<DriverEffect>
    where
        I: Copy + Ord + Sub<Output = Duration>,
    {
        if !self.shown && !ctx.is_active(DriverId::Keyboard) {
            return Vec::new();
        }

        self.shown = false;
        ctx.release(DriverId::Keyboard);
        tracing::debug!("keyboard hidden");

        if self.input_mounted { vec![DriverEffect::BlurInput] } else { Vec::new() }
    }

    /// Apply an inset report from the platform observer.
    ///
    /// On the rising edge the keyboard claims the slot and, once per edge,
    /// emits [`DriverEffect::KeyboardShown`]. On the falling edge it releases
    /// the slot if it still holds it and re-arms the notification. Callers
    /// hide any other slot holder before passing a rising edge in.
    pub fn on_insets<I>(
        &mut self,
        insets: KeyboardInsets,
        ctx: &mut CoordinationContext<I>,
        now: I,
    ) -> Vec<DriverEffect>
    where
        I: Copy + Ord + Sub<Output = Duration>,
    {
        let edge = InsetEdge::classify(ctx.bottom_inset(), insets.bottom);
        ctx.set_bottom_inset(insets.bottom);

        match edge {
            InsetEdge::Rising => {
                tracing::debug!(bottom = insets.bottom, "keyboard rising edge");
                self.claim(ctx, now)
            },
            InsetEdge::Falling => {
                self.shown = false;
                self.pending_show_notified = false;
                ctx.release(DriverId::Keyboard);
                tracing::debug!("keyboard falling edge");
                Vec::new()
            },
            InsetEdge::Steady => Vec::new(),
        }
    }

    /// Take the slot for a keyboard that is on screen.
    ///
    /// Emits [`DriverEffect::KeyboardShown`] only if the current edge has not
    /// been notified yet. Callers hide any other slot holder first.
    pub(crate) fn claim<I>(
        &mut self,
        ctx: &mut CoordinationContext<I>,
        now: I,
    ) -> Vec<DriverEffect>
    where
        I: Copy + Ord + Sub<Output = Duration>,
    {
        ctx.claim(DriverId::Keyboard);
        ctx.lower_composer(now);
        self.shown = true;

        if self.pending_show_notified {
            Vec::new()
        } else {
            self.pending_show_notified = true;
            vec![DriverEffect::KeyboardShown]
        }
    }
}
