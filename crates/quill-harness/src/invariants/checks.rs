//! Slot checks registered by [`InvariantRegistry::standard`].
//!
//! [`InvariantRegistry::standard`]: super::InvariantRegistry::standard

use quill_core::DriverId;

use super::{ComposerSnapshot, Invariant, InvariantResult, Violation};

/// At most one driver is shown.
///
/// Two panels, or a panel and the keyboard, on screen together means the
/// exclusivity protocol was bypassed.
pub struct SingleActiveDriver;

impl Invariant for SingleActiveDriver {
    fn name(&self) -> &'static str {
        "SingleActiveDriver"
    }

    fn check(&self, state: &ComposerSnapshot) -> InvariantResult {
        let shown = state.shown_drivers();
        if shown.len() > 1 {
            return Err(Violation {
                invariant: self.name(),
                message: format!("{} drivers shown: {shown:?}", shown.len()),
            });
        }
        Ok(())
    }
}

/// A driver is shown exactly when it holds the slot.
///
/// A shown driver outside the slot would never be preempted; a slot holder
/// that is hidden would block the others for nothing.
pub struct ActiveDriverVisible;

impl Invariant for ActiveDriverVisible {
    fn name(&self) -> &'static str {
        "ActiveDriverVisible"
    }

    fn check(&self, state: &ComposerSnapshot) -> InvariantResult {
        let shown = state.shown_drivers();
        match (state.active_driver, shown.as_slice()) {
            (None, []) => Ok(()),
            (Some(active), [only]) if active == *only => Ok(()),
            (active, shown) => Err(Violation {
                invariant: self.name(),
                message: format!("slot holder {active:?} but shown {shown:?}"),
            }),
        }
    }
}

/// The composer is lifted by the active panel's height, and rests otherwise.
pub struct ComposerLiftMatchesActive;

impl Invariant for ComposerLiftMatchesActive {
    fn name(&self) -> &'static str {
        "ComposerLiftMatchesActive"
    }

    fn check(&self, state: &ComposerSnapshot) -> InvariantResult {
        let expected = match state.active_driver {
            Some(DriverId::Panel(id)) => match state.panel(id) {
                Some(panel) => -panel.measured_height,
                None => {
                    return Err(Violation {
                        invariant: self.name(),
                        message: format!("active panel {id} missing from snapshot"),
                    });
                },
            },
            Some(DriverId::Keyboard) | None => 0.0,
        };

        if state.lift_target != expected {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "lift target {} for {:?}, expected {expected}",
                    state.lift_target, state.active_driver
                ),
            });
        }
        Ok(())
    }
}

/// Shown panels target offset 0; hidden panels target their own height.
pub struct HiddenPanelsParked;

impl Invariant for HiddenPanelsParked {
    fn name(&self) -> &'static str {
        "HiddenPanelsParked"
    }

    fn check(&self, state: &ComposerSnapshot) -> InvariantResult {
        for panel in &state.panels {
            let expected = if panel.shown { 0.0 } else { panel.measured_height };
            if panel.offset_target != expected {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!(
                        "panel {} (shown={}) targets {}, expected {expected}",
                        panel.id, panel.shown, panel.offset_target
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quill_core::PanelId;

    use super::*;
    use crate::PanelSnapshot;

    fn panel(id: PanelId, shown: bool, height: f32, target: f32) -> PanelSnapshot {
        PanelSnapshot { id, shown, measured_height: height, offset_target: target }
    }

    #[test]
    fn two_shown_drivers_violate_exclusivity() {
        let snapshot = ComposerSnapshot {
            active_driver: Some(DriverId::Keyboard),
            keyboard_shown: true,
            panels: vec![panel(PanelId::Emoji, true, 300.0, 0.0)],
            ..Default::default()
        };

        assert!(SingleActiveDriver.check(&snapshot).is_err());
        assert!(ActiveDriverVisible.check(&snapshot).is_err());
    }

    #[test]
    fn hidden_slot_holder_is_violation() {
        let snapshot = ComposerSnapshot {
            active_driver: Some(DriverId::Panel(PanelId::ToolTray)),
            panels: vec![panel(PanelId::ToolTray, false, 200.0, 200.0)],
            lift_target: -200.0,
            ..Default::default()
        };

        let err = ActiveDriverVisible.check(&snapshot).unwrap_err();
        assert_eq!(err.invariant, "ActiveDriverVisible");
    }

    #[test]
    fn lift_must_follow_active_panel() {
        let mut snapshot = ComposerSnapshot {
            active_driver: Some(DriverId::Panel(PanelId::Emoji)),
            panels: vec![panel(PanelId::Emoji, true, 300.0, 0.0)],
            lift_target: -300.0,
            ..Default::default()
        };
        assert!(ComposerLiftMatchesActive.check(&snapshot).is_ok());

        snapshot.lift_target = 0.0;
        assert!(ComposerLiftMatchesActive.check(&snapshot).is_err());
    }

    #[test]
    fn hidden_panel_must_park_at_height() {
        let snapshot = ComposerSnapshot {
            panels: vec![panel(PanelId::Emoji, false, 300.0, 0.0)],
            ..Default::default()
        };
        assert!(HiddenPanelsParked.check(&snapshot).is_err());
    }
}
