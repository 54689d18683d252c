//! Fuzz target for panel/keyboard coordination
//!
//! Ensure at most one driver holds the bottom of the screen (HIGH priority)
//!
//! # Strategy
//!
//! - Arbitrary show/hide/toggle calls on all three drivers
//! - Keyboard inset reports, including NaN and negative values
//! - Layout passes with arbitrary heights
//! - Clock jumps mid-animation
//!
//! # Invariants
//!
//! - At most one driver is shown
//! - A driver is shown exactly when it holds the slot
//! - Panel offsets target 0 when shown and their height when hidden

#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quill_core::{AnimationConfig, Coordinator, DriverId, KeyboardInsets, PanelId};

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Target {
    Emoji,
    ToolTray,
    Keyboard,
}

impl Target {
    fn id(self) -> DriverId {
        match self {
            Self::Emoji => DriverId::Panel(PanelId::Emoji),
            Self::ToolTray => DriverId::Panel(PanelId::ToolTray),
            Self::Keyboard => DriverId::Keyboard,
        }
    }
}

#[derive(Debug, Clone, Arbitrary)]
enum DriverOp {
    Show(Target),
    Hide(Target),
    Toggle(Target),
    Insets(f32),
    Layout { tray: bool, height: f32 },
    InputMounted(bool),
    Advance(u16),
}

fuzz_target!(|ops: Vec<DriverOp>| {
    let mut coordinator: Coordinator<Duration> = Coordinator::new(AnimationConfig::default());
    let mut now = Duration::ZERO;

    for op in ops {
        match op {
            DriverOp::Show(target) => {
                let _ = coordinator.show(target.id(), now);
            },
            DriverOp::Hide(target) => {
                let _ = coordinator.hide(target.id(), now);
            },
            DriverOp::Toggle(target) => {
                let _ = coordinator.toggle(target.id(), now);
            },
            DriverOp::Insets(bottom) => {
                let _ = coordinator.on_keyboard_insets(KeyboardInsets::bottom(bottom), now);
            },
            DriverOp::Layout { tray, height } => {
                let id = if tray { PanelId::ToolTray } else { PanelId::Emoji };
                let _ = coordinator.on_panel_layout(id, height, now);
            },
            DriverOp::InputMounted(mounted) => coordinator.set_input_mounted(mounted),
            DriverOp::Advance(ms) => now += Duration::from_millis(u64::from(ms)),
        }

        let ids = [DriverId::Panel(PanelId::Emoji), DriverId::Panel(PanelId::ToolTray), DriverId::Keyboard];
        let shown = ids.iter().filter(|id| coordinator.is_shown(**id)).count();
        assert!(shown <= 1, "{shown} drivers shown");
        for id in ids {
            assert_eq!(coordinator.is_shown(id), coordinator.active_driver() == Some(id), "{id}");
        }
        for panel in PanelId::ALL {
            let driver = coordinator.panel(panel);
            let parked = if driver.is_shown() { 0.0 } else { driver.measured_height() };
            assert_eq!(driver.offset().target(), parked, "panel {panel}");
            assert!(driver.offset_at(now).is_finite());
        }
        assert!(coordinator.composer_offset(now).is_finite());
    }
});
