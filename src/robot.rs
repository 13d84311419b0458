//! Competition lifecycle.
//!
//! [`Robot`] exposes one entry point per competition phase. The platform's
//! competition runtime calls them; `autonomous` and `opcontrol` run until
//! they finish or the runtime cancels them on a mode change.

use log::{error, info};

use crate::{
    auton::sequencer::Sequencer,
    config::{ConfigError, RobotConfig},
    display::Banner,
    hal::{Platform, TextDisplay},
    opcontrol::driver::OpControl,
};

/// A robot program bound to a platform.
pub struct Robot<P> {
    pub platform: P,
    config:       RobotConfig,
}

impl<P: Platform> Robot<P> {
    /// # Errors
    ///
    /// Returns the first problem [`RobotConfig::validate`] finds.
    pub fn new(platform: P, config: RobotConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Robot { platform, config })
    }

    pub const fn config(&self) -> &RobotConfig { &self.config }

    /// Runs once at program start, before any other mode.
    pub fn initialize<D: TextDisplay>(&self, display: D) -> Banner<D> {
        info!(
            "Robot initialized: {} channels, autonomous '{}'",
            self.config.bindings.len(),
            self.config.autonomous.name
        );
        let mut banner = Banner::new(display, self.config.title, self.config.toggle_text);
        banner.initialize();
        banner
    }

    /// Runs while the field has the robot disabled.
    pub fn disabled(&mut self) { info!("Disabled"); }

    /// Runs after initialization when connected to competition control.
    pub fn competition_initialize(&mut self) { info!("Connected to competition control"); }

    /// Runs the configured autonomous routine once.
    pub async fn autonomous(&mut self) {
        info!("Autonomous period started");
        let routine = &self.config.autonomous;
        match Sequencer::new(&mut self.platform, &self.config, routine) {
            Ok(mut sequencer) => sequencer.run().await,
            Err(e) => error!("Autonomous Setup Error: {}", e),
        }
    }

    /// Runs the operator control loop until the task is cancelled.
    pub async fn opcontrol(&mut self) {
        info!("Operator control started");
        match OpControl::new(&mut self.platform, &self.config) {
            Ok(mut opcontrol) => opcontrol.run().await,
            Err(e) => error!("Opcontrol Setup Error: {}", e),
        }
    }
}
