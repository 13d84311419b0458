use heapless::Vec;
use humantime::format_duration;
use log::{debug, info};
use snafu::OptionExt;

use super::routine::Routine;
use crate::{
    config::{ConfigError, MAX_BINDINGS, Mechanism, RobotConfig, UnboundMechanismSnafu},
    hal::{Actuator, Platform},
};

/// Runs a [`Routine`] one phase at a time on a single task.
///
/// The sequencer is built for one routine and claims a channel for every
/// mechanism it touches. The channels are released when it is dropped.
pub struct Sequencer<'a, P: Platform> {
    platform: &'a mut P,
    routine:  &'a Routine,
    channels: Vec<(Mechanism, P::Actuator), MAX_BINDINGS>,
}

impl<'a, P: Platform> Sequencer<'a, P> {
    /// # Errors
    ///
    /// Returns [`ConfigError::UnboundMechanism`] if `routine` writes to a
    /// mechanism that `config` does not bind to a port.
    pub fn new(
        platform: &'a mut P,
        config: &RobotConfig,
        routine: &'a Routine,
    ) -> Result<Self, ConfigError> {
        let mut channels = Vec::new();
        for mechanism in routine.mechanisms() {
            let binding = config
                .binding(mechanism)
                .context(UnboundMechanismSnafu { mechanism })?;
            if channels
                .push((mechanism, platform.actuator(binding)))
                .is_err()
            {
                return Err(ConfigError::CapacityExceeded {
                    what:     "channels in one routine",
                    capacity: MAX_BINDINGS,
                });
            }
        }
        Ok(Sequencer {
            platform,
            routine,
            channels,
        })
    }

    /// The routine this sequencer was built for.
    pub const fn routine(&self) -> &Routine { self.routine }

    /// Executes every phase in order and returns after the last.
    pub async fn run(&mut self) {
        let routine = self.routine;
        info!(
            "Autonomous routine '{}' started ({} phases, {})",
            routine.name,
            routine.phases().len(),
            format_duration(routine.total_duration())
        );

        for (index, phase) in routine.phases().iter().enumerate() {
            debug!(
                "Phase {}: {} writes, hold {}",
                index + 1,
                phase.writes.len(),
                format_duration(phase.hold)
            );
            for &(mechanism, command) in &phase.writes {
                // Every written mechanism was claimed in `new`.
                if let Some((_, channel)) = self
                    .channels
                    .iter_mut()
                    .find(|(claimed, _)| *claimed == mechanism)
                {
                    channel.command(command);
                }
            }
            if !phase.hold.is_zero() {
                self.platform.sleep(phase.hold).await;
            }
        }

        info!("Autonomous routine '{}' finished", routine.name);
    }
}
