//! Frozen view of the composer's slot state.
//!
//! Holds animation targets only, so a frame taken mid-slide compares equal
//! to the frame the slide settles into.

use std::{ops::Sub, time::Duration};

use quill_app::Composer;
use quill_core::{DriverId, PanelId};

/// Snapshot of the composer's coordination state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposerSnapshot {
    /// Current slot holder.
    pub active_driver: Option<DriverId>,
    /// Whether the keyboard driver considers itself shown.
    pub keyboard_shown: bool,
    /// Per-panel state, in [`PanelId::ALL`] order.
    pub panels: Vec<PanelSnapshot>,
    /// Target of the composer's vertical translation.
    pub lift_target: f32,
    /// Action bar flag.
    pub toolbar_visible: bool,
}

impl ComposerSnapshot {
    /// Extract a snapshot from a live composer.
    pub fn from_composer<I>(composer: &Composer<I>) -> Self
    where
        I: Copy + Ord + Sub<Output = Duration>,
    {
        let coordinator = composer.coordinator();
        let panels = PanelId::ALL
            .into_iter()
            .map(|id| {
                let panel = coordinator.panel(id);
                PanelSnapshot {
                    id,
                    shown: panel.is_shown(),
                    measured_height: panel.measured_height(),
                    offset_target: panel.offset().target(),
                }
            })
            .collect();

        Self {
            active_driver: coordinator.active_driver(),
            keyboard_shown: coordinator.keyboard().is_shown(),
            panels,
            lift_target: coordinator.context().translate_y().target(),
            toolbar_visible: composer.toolbar_visible(),
        }
    }

    /// Every driver that reports itself shown.
    pub fn shown_drivers(&self) -> Vec<DriverId> {
        self.panels
            .iter()
            .filter(|panel| panel.shown)
            .map(|panel| DriverId::Panel(panel.id))
            .chain(self.keyboard_shown.then_some(DriverId::Keyboard))
            .collect()
    }

    /// Panel by identity.
    pub fn panel(&self, id: PanelId) -> Option<&PanelSnapshot> {
        self.panels.iter().find(|panel| panel.id == id)
    }
}

/// Snapshot of one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSnapshot {
    /// Which panel.
    pub id: PanelId,
    /// Visible flag.
    pub shown: bool,
    /// Last measured height.
    pub measured_height: f32,
    /// Target of the panel's offset tween.
    pub offset_target: f32,
}
