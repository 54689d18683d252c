//! Driver trait for abstracting host I/O.
//!
//! The [`Driver`] trait decouples the composer runtime from a specific host.
//! Each host implements the trait to provide platform-specific I/O (the
//! keyboard observer, the embedded surface, navigation), while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::{future::Future, ops::Sub, time::Duration};

use crate::{AppEvent, Composer, Route};

/// Abstracts host I/O for the composer runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs on a device host, in the replay CLI and
/// in simulation.
///
/// # Associated Types
///
/// - [`Error`](Driver::Error): Platform-specific error type
/// - [`Instant`](Driver::Instant): Time representation (real or virtual)
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Time instant type. Enables virtual time in simulation.
    type Instant: Copy + Ord + Send + Sync + Sub<Output = Duration>;

    /// Wait for the next input event.
    ///
    /// Returns `None` once the host has no more events and the screen should
    /// close.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Post one encoded envelope to the editing surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface is gone.
    fn post_message(&mut self, raw: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Inject the bootstrap script before the surface content loads.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects the script.
    fn inject_bootstrap(&mut self, script: String) -> Result<(), Self::Error>;

    /// Navigate to another screen. Fire-and-forget.
    fn navigate(&mut self, route: Route);

    /// Focus the bound text input.
    fn focus_input(&mut self);

    /// Blur the bound text input.
    fn blur_input(&mut self);

    /// Current time instant.
    fn now(&self) -> Self::Instant;

    /// Render the composer.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &Composer<Self::Instant>) -> Result<(), Self::Error>;

    /// Tear down the screen and release resources.
    fn stop(&mut self);
}
