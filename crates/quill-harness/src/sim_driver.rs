//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as a device host but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`quill_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! The driver stands in for the platform too: focusing the input raises a
//! keyboard of [`SimDriver::KEYBOARD_HEIGHT`] and blurring drops it, both
//! reported back as inset events ahead of anything already queued.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use quill_app::{AppEvent, Composer, ComposerView, Driver, Route};
use quill_core::{Environment, KeyboardInsets};
use quill_proto::Outbound;

use crate::{
    SimEnv,
    invariants::{ComposerSnapshot, InvariantRegistry, Violation},
};

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// Shared state for event injection and inspection.
///
/// This allows tests to inspect the driver after the runtime consumed it.
#[derive(Debug, Default)]
struct SharedState {
    pending_events: VecDeque<AppEvent>,
    posted: Vec<Outbound>,
    navigations: Vec<Route>,
    bootstrap: Option<String>,
    keyboard_up: bool,
    renders: usize,
    last_view: Option<ComposerView>,
    violations: Vec<Violation>,
    stopped: bool,
}

/// Simulation driver for deterministic testing.
///
/// Clones share the same state, so a test keeps one handle while the
/// runtime owns the other.
#[derive(Debug, Clone)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    env: SimEnv,
    frame: Duration,
    invariants: Option<Arc<InvariantRegistry>>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new(SimEnv::new())
    }
}

impl SimDriver {
    /// Keyboard height reported when the input gains focus.
    pub const KEYBOARD_HEIGHT: f32 = 280.0;

    /// Create a simulation driver on the given clock.
    pub fn new(env: SimEnv) -> Self {
        Self {
            state: Arc::new(Mutex::new(SharedState::default())),
            env,
            frame: Duration::ZERO,
            invariants: None,
        }
    }

    /// Advance the clock by `frame` before every polled event.
    #[must_use]
    pub fn with_frame(mut self, frame: Duration) -> Self {
        self.frame = frame;
        self
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    /// Inject an `AppEvent` for processing.
    pub fn inject_event(&self, event: AppEvent) {
        self.lock().pending_events.push_back(event);
    }

    /// Inject a raw envelope from the editing surface.
    pub fn inject_message(&self, raw: impl Into<String>) {
        self.inject_event(AppEvent::SurfaceMessage(raw.into()));
    }

    /// Check if there are pending events to process.
    pub fn has_pending(&self) -> bool {
        !self.lock().pending_events.is_empty()
    }

    /// Take all envelopes posted to the surface so far.
    pub fn take_posted(&self) -> Vec<Outbound> {
        std::mem::take(&mut self.lock().posted)
    }

    /// Navigations requested so far.
    pub fn navigations(&self) -> Vec<Route> {
        self.lock().navigations.clone()
    }

    /// Injected bootstrap script, if any.
    pub fn bootstrap(&self) -> Option<String> {
        self.lock().bootstrap.clone()
    }

    /// Whether the simulated keyboard is up.
    pub fn keyboard_up(&self) -> bool {
        self.lock().keyboard_up
    }

    /// Number of renders.
    pub fn renders(&self) -> usize {
        self.lock().renders
    }

    /// Frame from the most recent render.
    pub fn last_view(&self) -> Option<ComposerView> {
        self.lock().last_view.clone()
    }

    /// Invariant violations observed at render time.
    pub fn violations(&self) -> Vec<Violation> {
        self.lock().violations.clone()
    }

    /// Whether the runtime stopped the driver.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    /// Virtual clock.
    pub fn env(&self) -> &SimEnv {
        &self.env
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Report a keyboard transition ahead of queued events, as the platform
    /// would before delivering further input.
    fn set_keyboard(&self, up: bool) {
        let mut state = self.lock();
        if state.keyboard_up == up {
            return;
        }
        state.keyboard_up = up;
        let bottom = if up { Self::KEYBOARD_HEIGHT } else { 0.0 };
        state.pending_events.push_front(AppEvent::KeyboardInsets(KeyboardInsets::bottom(bottom)));
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;
    type Instant = Duration;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        self.env.advance(self.frame);
        Ok(self.lock().pending_events.pop_front())
    }

    async fn post_message(&mut self, raw: String) -> Result<(), Self::Error> {
        let message = Outbound::decode(&raw).map_err(|e| SimDriverError(e.to_string()))?;
        self.lock().posted.push(message);
        Ok(())
    }

    fn inject_bootstrap(&mut self, script: String) -> Result<(), Self::Error> {
        let mut state = self.lock();
        if state.bootstrap.is_some() {
            return Err(SimDriverError("bootstrap injected twice".into()));
        }
        state.bootstrap = Some(script);
        Ok(())
    }

    fn navigate(&mut self, route: Route) {
        self.lock().navigations.push(route);
    }

    fn focus_input(&mut self) {
        self.set_keyboard(true);
    }

    fn blur_input(&mut self) {
        self.set_keyboard(false);
    }

    fn now(&self) -> Self::Instant {
        self.env.now()
    }

    fn render(&mut self, app: &Composer<Duration>) -> Result<(), Self::Error> {
        let violations = match &self.invariants {
            Some(registry) => {
                registry.check_all(&ComposerSnapshot::from_composer(app)).err().unwrap_or_default()
            },
            None => Vec::new(),
        };

        let view = app.view(self.now());
        let mut state = self.lock();
        state.renders += 1;
        state.last_view = Some(view);
        for violation in violations {
            tracing::error!(%violation, "invariant violated");
            state.violations.push(violation);
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.lock().stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inject_event_queues_event() {
        let driver = SimDriver::default();
        driver.inject_event(AppEvent::Tick);

        assert!(driver.has_pending());
    }

    #[tokio::test]
    async fn focus_reports_keyboard_before_queued_events() {
        let mut driver = SimDriver::default();
        driver.inject_event(AppEvent::Tick);
        driver.focus_input();
        driver.focus_input();

        let first = driver.poll_event().await.unwrap();
        assert!(matches!(first, Some(AppEvent::KeyboardInsets(insets)) if insets.bottom == 280.0));
        assert!(matches!(driver.poll_event().await.unwrap(), Some(AppEvent::Tick)));
        assert!(driver.poll_event().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn post_message_decodes_envelope() {
        let mut driver = SimDriver::default();
        let raw = Outbound::ShowToolbar.encode().unwrap();

        driver.post_message(raw).await.unwrap();

        assert_eq!(driver.take_posted(), vec![Outbound::ShowToolbar]);
    }

    #[tokio::test]
    async fn frame_advances_clock_per_poll() {
        let mut driver = SimDriver::default().with_frame(Duration::from_millis(16));
        driver.inject_event(AppEvent::Tick);

        let _ = driver.poll_event().await.unwrap();
        assert_eq!(driver.now(), Duration::from_millis(16));
    }
}
