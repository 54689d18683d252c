//! Overlay panel driver.
//!
//! A panel lives pinned to the bottom of the screen and is parked off-screen
//! by translating it down by its own measured height. Showing it slides the
//! offset to zero and lifts the composer by the same height so the action bar
//! stays just above the panel.
//!
//! Both overlay panels share this one state machine; they differ only in
//! their [`PanelId`].

use std::{ops::Sub, time::Duration};

use crate::{AnimatedValue, AnimationConfig, CoordinationContext, DriverId, PanelId};

/// State machine for one overlay panel.
///
/// # Invariants
///
/// - `visible` implies this panel holds the context slot, as long as every
///   hand-off goes through [`crate::Coordinator`].
/// - While hidden, the offset targets `measured_height` (parked).
/// - While visible, the offset targets `0`.
#[derive(Debug, Clone)]
pub struct PanelDriver<I> {
    id: PanelId,
    visible: bool,
    /// Rendered height. `0` until the first layout pass.
    measured_height: f32,
    /// Downward translation of the panel. `measured_height` means parked.
    offset: AnimatedValue<I>,
}

impl<I> PanelDriver<I>
where
    I: Copy + Ord + Sub<Output = Duration>,
{
    /// Create a hidden, unmeasured panel.
    pub fn new(id: PanelId, config: AnimationConfig) -> Self {
        Self { id, visible: false, measured_height: 0.0, offset: AnimatedValue::new(0.0, config) }
    }

    /// Panel identity.
    pub fn id(&self) -> PanelId {
        self.id
    }

    /// Identity in the context slot.
    pub fn driver_id(&self) -> DriverId {
        DriverId::Panel(self.id)
    }

    /// Whether the panel is shown (or animating in).
    pub fn is_shown(&self) -> bool {
        self.visible
    }

    /// Last measured height.
    pub fn measured_height(&self) -> f32 {
        self.measured_height
    }

    /// Offset animation.
    pub fn offset(&self) -> &AnimatedValue<I> {
        &self.offset
    }

    /// Offset sampled at `now`.
    pub fn offset_at(&self, now: I) -> f32 {
        self.offset.value_at(now)
    }

    /// Claim the slot and slide in.
    ///
    /// The caller must already have hidden any other holder of the slot;
    /// [`crate::Coordinator`] does this. If another holder is still recorded,
    /// the claim overrides it.
    ///
    /// With an unmeasured panel this is a no-distance reveal: the panel is
    /// flush with the bottom and the composer does not move until the first
    /// [`PanelDriver::on_layout`].
    pub fn show(&mut self, ctx: &mut CoordinationContext<I>, now: I) {
        ctx.claim(self.driver_id());
        self.visible = true;
        self.offset.animate_to(0.0, now);
        ctx.lift_composer(self.measured_height, now);
        tracing::debug!(panel = %self.id, height = self.measured_height, "panel shown");
    }

    /// Slide out and release the slot. No-op if already hidden.
    pub fn hide(&mut self, ctx: &mut CoordinationContext<I>, now: I) {
        if !self.visible {
            return;
        }

        self.visible = false;
        self.offset.animate_to(self.measured_height, now);
        if ctx.release(self.driver_id()) {
            ctx.lower_composer(now);
        }
        tracing::debug!(panel = %self.id, "panel hidden");
    }

    /// Hide if this panel holds the slot, otherwise show.
    pub fn toggle(&mut self, ctx: &mut CoordinationContext<I>, now: I) {
        if ctx.is_active(self.driver_id()) {
            self.hide(ctx, now);
        } else {
            self.show(ctx, now);
        }
    }

    /// Record the rendered height.
    ///
    /// Safe before any `show`. A hidden panel at rest re-parks at the new
    /// height without a tween, one still sliding out retargets its slide; a
    /// shown panel keeps its offset and retargets the composer lift. Returns `true` if the height changed. Non-finite or
    /// negative heights are ignored.
    pub fn on_layout(&mut self, height: f32, ctx: &mut CoordinationContext<I>, now: I) -> bool {
        if !height.is_finite() || height < 0.0 || height == self.measured_height {
            return false;
        }

        tracing::trace!(panel = %self.id, from = self.measured_height, to = height, "measured");
        self.measured_height = height;
        if self.visible {
            if ctx.is_active(self.driver_id()) {
                ctx.lift_composer(height, now);
            }
        } else if self.offset.is_settled(now) {
            self.offset.snap_to(height);
        } else {
            self.offset.animate_to(height, now);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Ctx = CoordinationContext<Duration>;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn linear() -> AnimationConfig {
        AnimationConfig { duration: ms(100), easing: crate::Easing::Linear }
    }

    fn measured(height: f32, ctx: &mut Ctx) -> PanelDriver<Duration> {
        let mut panel = PanelDriver::new(PanelId::Emoji, linear());
        panel.on_layout(height, ctx, ms(0));
        panel
    }

    #[test]
    fn layout_parks_hidden_panel() {
        let mut ctx = Ctx::new(linear());
        let panel = measured(300.0, &mut ctx);

        assert!(!panel.is_shown());
        assert_eq!(panel.offset_at(ms(0)), 300.0);
        assert_eq!(ctx.active_driver(), None);
    }

    #[test]
    fn show_slides_in_and_lifts_composer() {
        let mut ctx = Ctx::new(linear());
        let mut panel = measured(300.0, &mut ctx);

        panel.show(&mut ctx, ms(0));

        assert!(panel.is_shown());
        assert!(ctx.is_active(DriverId::Panel(PanelId::Emoji)));
        assert_eq!(panel.offset_at(ms(50)), 150.0);
        assert_eq!(panel.offset_at(ms(100)), 0.0);
        assert_eq!(ctx.composer_offset(ms(100)), -300.0);
    }

    #[test]
    fn hide_reverses_and_releases() {
        let mut ctx = Ctx::new(linear());
        let mut panel = measured(300.0, &mut ctx);
        panel.show(&mut ctx, ms(0));
        panel.hide(&mut ctx, ms(100));

        assert!(!panel.is_shown());
        assert_eq!(ctx.active_driver(), None);
        assert_eq!(panel.offset_at(ms(200)), 300.0);
        assert_eq!(ctx.composer_offset(ms(200)), 0.0);
    }

    #[test]
    fn hide_when_hidden_is_noop() {
        let mut ctx = Ctx::new(linear());
        let mut panel = measured(300.0, &mut ctx);
        ctx.claim(DriverId::Keyboard);

        panel.hide(&mut ctx, ms(0));

        assert_eq!(ctx.active_driver(), Some(DriverId::Keyboard));
        assert_eq!(ctx.translate_y().target(), 0.0);
    }

    #[test]
    fn toggle_alternates() {
        let mut ctx = Ctx::new(linear());
        let mut panel = measured(200.0, &mut ctx);

        panel.toggle(&mut ctx, ms(0));
        assert!(panel.is_shown());
        panel.toggle(&mut ctx, ms(10));
        assert!(!panel.is_shown());
        assert_eq!(ctx.active_driver(), None);
    }

    #[test]
    fn unmeasured_show_is_zero_distance_then_corrects() {
        let mut ctx = Ctx::new(linear());
        let mut panel = PanelDriver::new(PanelId::ToolTray, linear());

        panel.show(&mut ctx, ms(0));
        assert_eq!(panel.offset_at(ms(0)), 0.0);
        assert_eq!(ctx.composer_offset(ms(0)), 0.0);

        assert!(panel.on_layout(200.0, &mut ctx, ms(10)));
        // Panel stays flush with the bottom, composer eases up from rest.
        assert_eq!(panel.offset_at(ms(10)), 0.0);
        assert_eq!(ctx.composer_offset(ms(10)), 0.0);
        assert_eq!(ctx.composer_offset(ms(110)), -200.0);
    }

    #[test]
    fn layout_while_sliding_out_continues_from_current_offset() {
        let mut ctx = Ctx::new(linear());
        let mut panel = measured(300.0, &mut ctx);
        panel.show(&mut ctx, ms(0));
        panel.hide(&mut ctx, ms(100));
        assert_eq!(panel.offset_at(ms(150)), 150.0);

        assert!(panel.on_layout(320.0, &mut ctx, ms(150)));

        assert_eq!(panel.offset_at(ms(150)), 150.0);
        assert_eq!(panel.offset_at(ms(200)), 235.0);
        assert_eq!(panel.offset_at(ms(250)), 320.0);
        assert_eq!(panel.offset().target(), 320.0);
    }

    #[test]
    fn invalid_layout_is_ignored() {
        let mut ctx = Ctx::new(linear());
        let mut panel = measured(300.0, &mut ctx);

        assert!(!panel.on_layout(f32::NAN, &mut ctx, ms(0)));
        assert!(!panel.on_layout(-1.0, &mut ctx, ms(0)));
        assert!(!panel.on_layout(300.0, &mut ctx, ms(0)));
        assert_eq!(panel.measured_height(), 300.0);
    }
}
