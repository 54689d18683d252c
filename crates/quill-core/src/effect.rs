//! Side effects requested by drivers.

/// Instructions a driver hands back to its host.
///
/// Drivers never touch the platform directly; the host executes these after
/// the synchronous state transition has completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverEffect {
    /// Focus the bound text input so the platform keyboard rises.
    FocusInput,

    /// Blur the bound text input so the platform keyboard falls.
    BlurInput,

    /// Keyboard crossed its rising edge. Fired once per edge.
    KeyboardShown,
}
