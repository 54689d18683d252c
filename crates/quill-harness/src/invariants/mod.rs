//! Exclusivity checks for the composer screen.
//!
//! The keyboard, the emoji panel and the tool tray compete for one slot at
//! the bottom of the screen. After every rendered frame the harness freezes
//! the composer into a [`ComposerSnapshot`] and asks each registered
//! [`Invariant`] whether the frame is coherent:
//!
//! - no two drivers are up at once;
//! - the slot holder is the driver that reports itself shown;
//! - the composer is lifted by exactly the active panel's height;
//! - every hidden panel is heading for its parked offset.
//!
//! Checks see only targets, never sampled values, so they hold mid-animation.
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! registry.assert_all(&ComposerSnapshot::from_composer(&composer), "after tap");
//! ```

mod checks;
mod snapshot;

use std::fmt;

pub use checks::{
    ActiveDriverVisible, ComposerLiftMatchesActive, HiddenPanelsParked, SingleActiveDriver,
};
pub use snapshot::{ComposerSnapshot, PanelSnapshot};

/// Outcome of one check against one frame.
pub type InvariantResult = Result<(), Violation>;

/// A frame that broke a check.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Check that failed.
    pub invariant: &'static str,
    /// What the frame looked like.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property every composer frame must satisfy.
pub trait Invariant: Send + Sync {
    /// Short name used in violation reports.
    fn name(&self) -> &'static str;

    /// Inspect one frame.
    fn check(&self, state: &ComposerSnapshot) -> InvariantResult;
}

/// Ordered set of checks run against each frame.
#[derive(Default)]
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl fmt::Debug for InvariantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl InvariantRegistry {
    /// Registry with no checks.
    pub fn new() -> Self {
        Self::default()
    }

    /// The four slot checks: [`SingleActiveDriver`], [`ActiveDriverVisible`],
    /// [`ComposerLiftMatchesActive`] and [`HiddenPanelsParked`].
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(SingleActiveDriver);
        registry.add(ActiveDriverVisible);
        registry.add(ComposerLiftMatchesActive);
        registry.add(HiddenPanelsParked);
        registry
    }

    /// Register another check.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Names of the registered checks, in run order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.invariants.iter().map(|invariant| invariant.name())
    }

    /// Run every check. A frame can break several at once; all are reported.
    pub fn check_all(&self, state: &ComposerSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|invariant| invariant.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Run every check and fail the test with `context` on any violation.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &ComposerSnapshot, context: &str) {
        let Err(violations) = self.check_all(state) else {
            return;
        };
        let report: Vec<_> = violations.iter().map(ToString::to_string).collect();
        panic!(
            "composer frame {context} broke {} check(s):\n  {}",
            report.len(),
            report.join("\n  ")
        );
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Whether no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use quill_core::{DriverId, PanelId};

    use super::*;

    #[test]
    fn standard_registry_runs_slot_checks_in_order() {
        let registry = InvariantRegistry::standard();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names.len(), 4);
        assert_eq!(names[0], SingleActiveDriver.name());
    }

    #[test]
    fn resting_composer_passes() {
        let registry = InvariantRegistry::standard();
        assert!(registry.check_all(&ComposerSnapshot::default()).is_ok());
    }

    #[test]
    fn keyboard_and_panel_up_together_is_reported() {
        let snapshot = ComposerSnapshot {
            active_driver: Some(DriverId::Keyboard),
            keyboard_shown: true,
            panels: vec![PanelSnapshot {
                id: PanelId::Emoji,
                shown: true,
                measured_height: 300.0,
                offset_target: 0.0,
            }],
            ..ComposerSnapshot::default()
        };

        let violations = InvariantRegistry::standard().check_all(&snapshot).unwrap_err();
        let broken: Vec<_> = violations.iter().map(|v| v.invariant).collect();
        assert!(broken.contains(&SingleActiveDriver.name()));
        assert!(broken.contains(&ActiveDriverVisible.name()));
    }
}
