//! Differential drivetrain control.
//!
//! This module provides [`TankDrive`] for controlling a robot with
//! separate left and right motor groups.
//!
//! # Supported Drive Modes
//!
//! - **Tank**: Each joystick's vertical axis directly drives one side of
//!   the drivetrain, unscaled.
//! - **Arcade**: Left stick for forward/backward, right stick for turning.
//!
//! # Example
//!
//! ```ignore
//! use spindlebot::drivetrain::{DriveMode, TankDrive};
//!
//! let mut drive = TankDrive::new(left_motors, right_motors, DriveMode::Tank);
//!
//! // In your control loop:
//! drive.drive(&input.snapshot());
//! ```

use heapless::Vec;
use log::trace;

use crate::{
    config::MAX_SIDE_MOTORS,
    hal::{Actuator, Command, MAX_POWER},
    peripherals::controller::{ControllerAxis, InputSnapshot},
};

/// How stick input is turned into left and right power.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DriveMode {
    /// Left stick Y drives the left side, right stick Y drives the right side.
    #[default]
    Tank,
    /// Left stick Y drives forward, right stick X turns.
    Arcade,
}

/// A differential drivetrain.
///
/// Owns the actuators on each side. Motors on opposite sides usually spin
/// in opposite directions to move the robot forward; configure that with
/// the channel's `reversed` flag rather than here.
pub struct TankDrive<A> {
    /// Motors on the left side of the drivetrain.
    pub left:  Vec<A, MAX_SIDE_MOTORS>,
    /// Motors on the right side of the drivetrain.
    pub right: Vec<A, MAX_SIDE_MOTORS>,
    pub mode:  DriveMode,
}

impl<A: Actuator> TankDrive<A> {
    pub fn new(
        left: Vec<A, MAX_SIDE_MOTORS>,
        right: Vec<A, MAX_SIDE_MOTORS>,
        mode: DriveMode,
    ) -> Self {
        Self { left, right, mode }
    }

    /// Drives with the configured [`DriveMode`].
    pub fn drive(&mut self, snapshot: &InputSnapshot) {
        match self.mode {
            DriveMode::Tank => self.tank(snapshot),
            DriveMode::Arcade => self.arcade(snapshot),
        }
    }

    /// Controls a tank-style drivetrain. Each side mirrors its stick's
    /// vertical axis with no curve or scaling applied.
    pub fn tank(&mut self, snapshot: &InputSnapshot) {
        let left_power = snapshot.axis(ControllerAxis::LeftY);
        let right_power = snapshot.axis(ControllerAxis::RightY);
        self.set_power(left_power, right_power);
    }

    /// Controls an arcade-style drivetrain. Left stick Y sets the forward
    /// power and right stick X is added to the left side and taken from the
    /// right, each side saturating at full scale.
    pub fn arcade(&mut self, snapshot: &InputSnapshot) {
        let fwd = snapshot.axis(ControllerAxis::LeftY);
        let turn = snapshot.axis(ControllerAxis::RightX);

        let left_power = (fwd + turn).clamp(-MAX_POWER, MAX_POWER);
        let right_power = (fwd - turn).clamp(-MAX_POWER, MAX_POWER);
        self.set_power(left_power, right_power);
    }

    /// Writes zero power to every drive motor.
    pub fn stop(&mut self) { self.set_power(0, 0); }

    fn set_power(&mut self, left_power: i32, right_power: i32) {
        trace!("drive power left {} right {}", left_power, right_power);
        for motor in &mut self.left {
            motor.command(Command::Power(left_power));
        }
        for motor in &mut self.right {
            motor.command(Command::Power(right_power));
        }
    }
}
