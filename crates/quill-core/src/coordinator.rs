//! Exclusivity resolution across all drivers of a screen.
//!
//! The [`Coordinator`] owns the context and every driver, and is the only
//! place hand-offs are sequenced: before a driver claims the slot, whoever
//! holds it is hidden. This keeps two panels from ever animating into the
//! same space, and lets the keyboard win over a panel when text input takes
//! focus.

use std::{ops::Sub, time::Duration};

use crate::{
    AnimationConfig, CoordinationContext, DriverEffect, DriverId, InsetEdge, KeyboardDriver,
    KeyboardInsets, PanelDriver, PanelId,
};

/// Owner of the coordination context and the three drivers.
#[derive(Debug, Clone)]
pub struct Coordinator<I> {
    ctx: CoordinationContext<I>,
    emoji: PanelDriver<I>,
    tool_tray: PanelDriver<I>,
    keyboard: KeyboardDriver,
}

impl<I> Coordinator<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Create a coordinator with both panels hidden and nothing active.
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            ctx: CoordinationContext::new(config),
            emoji: PanelDriver::new(PanelId::Emoji, config),
            tool_tray: PanelDriver::new(PanelId::ToolTray, config),
            keyboard: KeyboardDriver::new(),
        }
    }

    /// Shared context.
    pub fn context(&self) -> &CoordinationContext<I> {
        &self.ctx
    }

    /// Current slot holder.
    pub fn active_driver(&self) -> Option<DriverId> {
        self.ctx.active_driver()
    }

    /// Panel driver by identity.
    pub fn panel(&self, id: PanelId) -> &PanelDriver<I> {
        match id {
            PanelId::Emoji => &self.emoji,
            PanelId::ToolTray => &self.tool_tray,
        }
    }

    /// Keyboard driver.
    pub fn keyboard(&self) -> &KeyboardDriver {
        &self.keyboard
    }

    /// Whether `id` reports itself shown.
    pub fn is_shown(&self, id: DriverId) -> bool {
        match id {
            DriverId::Panel(panel) => self.panel(panel).is_shown(),
            DriverId::Keyboard => self.keyboard.is_shown(),
        }
    }

    /// Record whether the keyboard's bound input is mounted.
    pub fn set_input_mounted(&mut self, mounted: bool) {
        self.keyboard.set_input_mounted(mounted);
    }

    /// Show a driver, hiding the current holder first.
    ///
    /// For the keyboard this only requests focus; the slot changes hands
    /// when the platform reports the rising edge. If the keyboard is still
    /// on screen from before a pre-emption, no rising edge will follow, so
    /// it takes the slot back immediately.
    pub fn show(&mut self, id: DriverId, now: I) -> Vec<DriverEffect> {
        match id {
            DriverId::Panel(panel) => {
                let effects = self.preempt(id, now);
                let (driver, ctx) = self.split(panel);
                driver.show(ctx, now);
                effects
            },
            DriverId::Keyboard => {
                let focus = self.keyboard.show();
                let still_up = KeyboardInsets::bottom(self.ctx.bottom_inset()).is_up();
                if focus.is_empty() || self.keyboard.is_shown() || !still_up {
                    return focus;
                }

                tracing::debug!("keyboard refocused before falling edge");
                let mut effects = self.preempt(id, now);
                effects.extend(self.keyboard.claim(&mut self.ctx, now));
                effects.extend(focus);
                effects
            },
        }
    }

    /// Hide a driver. No-op if it is not shown.
    pub fn hide(&mut self, id: DriverId, now: I) -> Vec<DriverEffect> {
        match id {
            DriverId::Panel(panel) => {
                let (driver, ctx) = self.split(panel);
                driver.hide(ctx, now);
                Vec::new()
            },
            DriverId::Keyboard => self.keyboard.hide(&mut self.ctx, now),
        }
    }

    /// Hide `id` if it holds the slot, otherwise show it.
    pub fn toggle(&mut self, id: DriverId, now: I) -> Vec<DriverEffect> {
        if self.ctx.is_active(id) { self.hide(id, now) } else { self.show(id, now) }
    }

    /// Show a panel.
    pub fn show_panel(&mut self, id: PanelId, now: I) -> Vec<DriverEffect> {
        self.show(DriverId::Panel(id), now)
    }

    /// Hide a panel.
    pub fn hide_panel(&mut self, id: PanelId, now: I) {
        self.hide(DriverId::Panel(id), now);
    }

    /// Toggle a panel.
    pub fn toggle_panel(&mut self, id: PanelId, now: I) -> Vec<DriverEffect> {
        self.toggle(DriverId::Panel(id), now)
    }

    /// Request the keyboard.
    pub fn show_keyboard(&mut self, now: I) -> Vec<DriverEffect> {
        self.show(DriverId::Keyboard, now)
    }

    /// Platform keyboard observer callback.
    ///
    /// A rising edge hides whichever panel holds the slot before the
    /// keyboard claims it.
    pub fn on_keyboard_insets(&mut self, insets: KeyboardInsets, now: I) -> Vec<DriverEffect> {
        let mut effects = Vec::new();
        if InsetEdge::classify(self.ctx.bottom_inset(), insets.bottom) == InsetEdge::Rising {
            effects.extend(self.preempt(DriverId::Keyboard, now));
        }
        effects.extend(self.keyboard.on_insets(insets, &mut self.ctx, now));
        effects
    }

    /// Panel layout callback. Returns `true` if the height changed.
    pub fn on_panel_layout(&mut self, id: PanelId, height: f32, now: I) -> bool {
        let (driver, ctx) = self.split(id);
        driver.on_layout(height, ctx, now)
    }

    /// Composer translation sampled at `now`.
    pub fn composer_offset(&self, now: I) -> f32 {
        self.ctx.composer_offset(now)
    }

    /// Hide the current holder unless it is `claimant`.
    fn preempt(&mut self, claimant: DriverId, now: I) -> Vec<DriverEffect> {
        match self.ctx.active_driver() {
            Some(holder) if holder != claimant => {
                tracing::debug!(%holder, %claimant, "pre-empting slot holder");
                self.hide(holder, now)
            },
            _ => Vec::new(),
        }
    }

    fn split(&mut self, id: PanelId) -> (&mut PanelDriver<I>, &mut CoordinationContext<I>) {
        let driver = match id {
            PanelId::Emoji => &mut self.emoji,
            PanelId::ToolTray => &mut self.tool_tray,
        };
        (driver, &mut self.ctx)
    }
}
