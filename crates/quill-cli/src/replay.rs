//! Replay driver.
//!
//! Implements the [`Driver`] trait over a parsed script on wall-clock time.
//! Every envelope posted to the surface is written to the output as one JSON
//! line; everything else goes to the log.

use std::{collections::VecDeque, io::Write, time::Duration};

use quill_app::{AppEvent, Composer, Driver, Route};
use quill_core::{Environment, KeyboardInsets, SystemEnv};

use crate::{CliError, Step};

/// Script-driven host.
///
/// Stands in for the platform keyboard: focus reports `keyboard_height`,
/// blur reports zero, both ahead of the remaining script.
pub struct ReplayDriver<W> {
    steps: VecDeque<Step>,
    injected: VecDeque<AppEvent>,
    out: W,
    env: SystemEnv,
    keyboard_height: f32,
    keyboard_up: bool,
}

impl<W: Write + Send> ReplayDriver<W> {
    /// Default emulated keyboard height.
    pub const DEFAULT_KEYBOARD_HEIGHT: f32 = 280.0;

    /// Driver replaying `steps`, writing envelopes to `out`.
    pub fn new(steps: Vec<Step>, out: W) -> Self {
        Self {
            steps: steps.into(),
            injected: VecDeque::new(),
            out,
            env: SystemEnv,
            keyboard_height: Self::DEFAULT_KEYBOARD_HEIGHT,
            keyboard_up: false,
        }
    }

    /// Override the emulated keyboard height.
    #[must_use]
    pub fn with_keyboard_height(mut self, height: f32) -> Self {
        self.keyboard_height = height;
        self
    }

    fn set_keyboard(&mut self, up: bool) {
        if self.keyboard_up == up {
            return;
        }
        self.keyboard_up = up;
        let bottom = if up { self.keyboard_height } else { 0.0 };
        self.injected.push_back(AppEvent::KeyboardInsets(KeyboardInsets::bottom(bottom)));
    }
}

impl<W: Write + Send> Driver for ReplayDriver<W> {
    type Error = CliError;
    type Instant = std::time::Instant;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        if let Some(event) = self.injected.pop_front() {
            return Ok(Some(event));
        }

        let Some(step) = self.steps.pop_front() else {
            return Ok(None);
        };
        if let Step::KeyboardInsets { bottom } = step {
            self.keyboard_up = bottom > 0.0;
        }
        match step {
            Step::Wait { ms } => {
                self.env.sleep(Duration::from_millis(ms)).await;
                Ok(Some(AppEvent::Tick))
            },
            step => Ok(step.into_event()),
        }
    }

    async fn post_message(&mut self, raw: String) -> Result<(), Self::Error> {
        writeln!(self.out, "{raw}")?;
        self.out.flush()?;
        Ok(())
    }

    fn inject_bootstrap(&mut self, script: String) -> Result<(), Self::Error> {
        tracing::debug!(bytes = script.len(), "bootstrap injected");
        Ok(())
    }

    fn navigate(&mut self, route: Route) {
        tracing::info!(?route, "navigate");
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

    fn render(&mut self, app: &Composer<Self::Instant>) -> Result<(), Self::Error> {
        let view = app.view(self.now());
        tracing::debug!(
            composer_offset = view.composer_offset,
            active = ?view.active_driver,
            toolbar = view.toolbar_visible,
            highlighted = ?view.highlighted(),
            "render"
        );
        Ok(())
    }

    fn stop(&mut self) {
        tracing::info!(remaining = self.steps.len(), "replay finished");
    }
}
