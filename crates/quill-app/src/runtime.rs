//! Generic runtime for composer orchestration.
//!
//! The Runtime drives the screen's event loop, coordinating between:
//! - [`Composer`]: screen state machine
//! - [`Bridge`]: envelope codec for the editing surface
//! - [`Driver`]: platform-specific I/O

use crate::{AppAction, AppEvent, Bridge, Composer, ComposerConfig, Driver, FontCatalog};

/// Generic runtime that orchestrates Composer, Bridge, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
pub struct Runtime<D>
where
    D: Driver,
{
    driver: D,
    app: Composer<D::Instant>,
    bridge: Bridge,
    bootstrap: Option<String>,
}

impl<D> Runtime<D>
where
    D: Driver,
{
    /// Create a new runtime with the given driver, config and font catalog.
    pub fn new(driver: D, config: &ComposerConfig, fonts: FontCatalog) -> Self {
        let bootstrap = Bridge::bootstrap(&fonts, config.environment_flag);
        let app = Composer::new(config, fonts);
        Self { driver, app, bridge: Bridge::new(), bootstrap }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Injects the bootstrap script and mounts the screen
    /// 2. Polls for input events from the driver
    /// 3. Decodes surface envelopes through the bridge
    /// 4. Executes the Composer's actions, posting envelopes through the
    ///    driver
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        if let Some(script) = self.bootstrap.take() {
            self.driver.inject_bootstrap(script)?;
        }
        let actions = self.app.mount();
        if self.process_actions(actions).await? {
            self.driver.stop();
            return Ok(());
        }

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the screen should close.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let Some(event) = self.driver.poll_event().await? else {
            tracing::debug!("host closed event stream");
            return Ok(true);
        };

        let events = match event {
            AppEvent::SurfaceMessage(raw) => self.bridge.handle_message(&raw),
            other => vec![other],
        };

        for event in events {
            let now = self.driver.now();
            let actions = self.app.handle(event, now);
            if self.process_actions(actions).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Execute actions returned by the Composer.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(true),
                AppAction::Post(message) => {
                    self.bridge.send(&message);
                    self.send_outgoing().await?;
                },
                AppAction::Navigate(route) => self.driver.navigate(route),
                AppAction::FocusInput => self.driver.focus_input(),
                AppAction::BlurInput => self.driver.blur_input(),
            }
        }
        Ok(false)
    }

    /// Post all pending envelopes to the surface.
    async fn send_outgoing(&mut self) -> Result<(), D::Error> {
        for raw in self.bridge.take_outgoing() {
            self.driver.post_message(raw).await?;
        }
        Ok(())
    }

    /// Get a reference to the Composer
    pub fn app(&self) -> &Composer<D::Instant> {
        &self.app
    }

    /// Get a mutable reference to the Composer
    pub fn app_mut(&mut self) -> &mut Composer<D::Instant> {
        &mut self.app
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Inbound envelopes dropped by the bridge so far.
    pub fn dropped_messages(&self) -> u64 {
        self.bridge.dropped()
    }
}
