//! The operator control loop.
//!
//! [`OpControl`] owns every channel it writes to. Each cycle it samples
//! the controller once, drives the chassis from the sticks, writes one
//! command to every mapped mechanism, and then sleeps for the configured
//! interval. It never exits on its own: the competition runtime cancels it
//! when the robot is disabled or switches mode, and nothing inside the
//! loop runs on the way out.

use core::time::Duration;

use heapless::Vec;
use log::{info, trace};
use snafu::OptionExt;

use crate::{
    config::{
        ConfigError, MAX_SIDE_MOTORS, Mechanism, RobotConfig, UnboundMechanismSnafu,
    },
    drivetrain::TankDrive,
    hal::{Actuator, InputSource, Platform},
    opcontrol::controller::{ControlTable, MAX_MAPPINGS},
    peripherals::controller::ButtonEdges,
};

/// A running opcontrol session.
pub struct OpControl<'p, P: Platform> {
    platform: &'p mut P,
    input:    P::Input,
    drive:    TankDrive<P::Actuator>,
    controls: ControlTable,
    /// One actuator per entry of `controls`, in the same order.
    channels: Vec<P::Actuator, MAX_MAPPINGS>,
    edges:    ButtonEdges,
    interval: Duration,
    cycles:   u64,
}

impl<'p, P: Platform> OpControl<'p, P> {
    /// Claims the controller and every channel `config` drives.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnboundMechanism`] if the drivetrain or a
    /// control mapping names a mechanism with no port binding.
    pub fn new(platform: &'p mut P, config: &RobotConfig) -> Result<Self, ConfigError> {
        let left = claim::<P, MAX_SIDE_MOTORS>(platform, config, &config.drive.left)?;
        let right = claim::<P, MAX_SIDE_MOTORS>(platform, config, &config.drive.right)?;

        let mapped: Vec<Mechanism, MAX_MAPPINGS> = config
            .controls
            .mappings()
            .iter()
            .map(|mapping| mapping.mechanism)
            .collect();
        let channels = claim::<P, MAX_MAPPINGS>(platform, config, &mapped)?;

        let input = platform.input();

        Ok(OpControl {
            platform,
            input,
            drive: TankDrive::new(left, right, config.drive.mode),
            controls: config.controls.clone(),
            channels,
            edges: ButtonEdges::new(),
            interval: config.loop_interval,
            cycles: 0,
        })
    }

    /// Number of completed cycles.
    pub const fn cycles(&self) -> u64 { self.cycles }

    /// Samples the controller and writes every channel once, without sleeping.
    pub fn step(&mut self) {
        let snapshot = self.input.snapshot();
        let edges = self.edges.update(&snapshot);

        self.drive.drive(&snapshot);

        for ((mechanism, command), channel) in self
            .controls
            .evaluate(&snapshot, &edges)
            .zip(self.channels.iter_mut())
        {
            trace!("{} <- {:?}", mechanism, command);
            channel.command(command);
        }

        self.cycles += 1;
    }

    /// One full iteration: [`step`](Self::step), then sleep.
    pub async fn cycle(&mut self) {
        self.step();
        self.platform.sleep(self.interval).await;
    }

    /// Runs until the task is cancelled.
    pub async fn run(&mut self) {
        info!(
            "opcontrol loop started ({} mechanisms, {:?} interval)",
            self.channels.len(),
            self.interval
        );
        loop {
            self.cycle().await;
        }
    }
}

fn claim<P: Platform, const N: usize>(
    platform: &mut P,
    config: &RobotConfig,
    mechanisms: &[Mechanism],
) -> Result<Vec<P::Actuator, N>, ConfigError> {
    let mut actuators = Vec::new();
    for &mechanism in mechanisms {
        let binding = config
            .binding(mechanism)
            .context(UnboundMechanismSnafu { mechanism })?;
        if actuators.push(platform.actuator(binding)).is_err() {
            return Err(ConfigError::CapacityExceeded {
                what:     "channels in one group",
                capacity: N,
            });
        }
    }
    Ok(actuators)
}
