//! Hardware seams between the robot logic and the V5 platform.
//!
//! Everything the control code touches goes through the traits in this
//! module, so the opcontrol loop and the autonomous sequencer can run
//! against the real vexide devices on a brain or against the recording
//! doubles in [`mock`] on a host machine.
//!
//! # Commands
//!
//! Motors accept two kinds of open-loop command, mirroring the two ways
//! the robot drives its hardware:
//!
//! - [`Command::Power`]: raw power on the joystick scale (`-127..=127`).
//!   Used by the drivetrain, which passes stick values straight through.
//! - [`Command::Velocity`]: a target velocity in RPM. Used by mechanisms.

use core::{future::Future, time::Duration};

use crate::{config::ChannelBinding, peripherals::controller::InputSnapshot};

#[cfg(target_vendor = "vex")]
pub mod vex;

#[cfg(test)]
pub(crate) mod mock;

/// Full-scale value of a [`Command::Power`] command.
pub const MAX_POWER: i32 = 127;

/// A single open-loop write to an actuator channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Raw power on the joystick scale. Values beyond `±127` saturate.
    Power(i32),
    /// Target velocity in RPM.
    Velocity(i32),
}

impl Command {
    /// Stops a mechanism running under velocity control.
    pub const STOP: Command = Command::Velocity(0);

    /// Returns `true` if this command holds the actuator still.
    pub const fn is_stop(&self) -> bool {
        matches!(self, Command::Power(0) | Command::Velocity(0))
    }

    /// Converts a power command to motor volts, saturating at full scale.
    pub fn power_to_volts(power: i32, max_voltage: f64) -> f64 {
        f64::from(power.clamp(-MAX_POWER, MAX_POWER)) / f64::from(MAX_POWER) * max_voltage
    }
}

/// An addressable output, such as a motor, driven by signed commands.
///
/// Writes are fire-and-forget: implementations report device faults
/// through the logger and never back to the caller.
pub trait Actuator {
    /// Writes one command to the channel.
    fn command(&mut self, command: Command);
}

/// A source of controller input, sampled once per cycle.
pub trait InputSource {
    /// Reads the current state of every button and axis.
    fn snapshot(&mut self) -> InputSnapshot;
}

/// A line-oriented text display.
pub trait TextDisplay {
    /// Replaces the contents of `row` with `text`.
    fn set_line(&mut self, row: u8, text: &str);

    /// Blanks `row`.
    fn clear_line(&mut self, row: u8);
}

/// The platform a robot program runs on.
///
/// A platform hands out fresh device handles to each competition mode and
/// provides the cooperative sleep that every loop suspends on.
pub trait Platform {
    /// Actuator handle produced for a [`ChannelBinding`].
    type Actuator: Actuator;
    /// The operator's controller.
    type Input: InputSource;

    /// Builds a handle for the channel described by `binding`.
    fn actuator(&mut self, binding: ChannelBinding) -> Self::Actuator;

    /// Builds a handle for the primary controller.
    fn input(&mut self) -> Self::Input;

    /// Suspends the current task for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_detection() {
        assert!(Command::STOP.is_stop());
        assert!(Command::Power(0).is_stop());
        assert!(!Command::Velocity(-255).is_stop());
    }

    #[test]
    fn power_saturates_at_full_scale() {
        let tolerance = 1e-10;
        assert!((Command::power_to_volts(127, 12.0) - 12.0).abs() < tolerance);
        assert!((Command::power_to_volts(255, 12.0) - 12.0).abs() < tolerance);
        assert!((Command::power_to_volts(-300, 12.0) + 12.0).abs() < tolerance);
        assert!((Command::power_to_volts(0, 12.0)).abs() < tolerance);
    }
}
