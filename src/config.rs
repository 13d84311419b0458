//! Robot wiring and behaviour configuration.
//!
//! A [`RobotConfig`] describes everything that differs between robots:
//! which Smart Port each mechanism is plugged into, which way each motor
//! spins, how the sticks drive the chassis, which buttons run which
//! mechanism, and the autonomous routine. [`RobotConfig::competition`]
//! encodes the competition robot.
//!
//! # Example
//!
//! ```
//! use spindlebot::config::{ChannelBinding, Mechanism, RobotConfig};
//!
//! let mut config = RobotConfig::competition();
//! config.loop_interval = core::time::Duration::from_millis(10);
//! assert!(config.validate().is_ok());
//!
//! let spindle = config.binding(Mechanism::Spindle).unwrap();
//! assert_eq!(spindle, ChannelBinding::new(Mechanism::Spindle, 11));
//! ```

use core::{fmt, time::Duration};

use heapless::Vec;
use snafu::{Snafu, ensure};

use crate::{
    auton::routine::Routine,
    drivetrain::DriveMode,
    opcontrol::controller::ControlTable,
};

/// Number of Smart Ports on the V5 Brain.
pub const SMART_PORTS: u8 = 21;

/// Maximum number of channels a robot can bind.
pub const MAX_BINDINGS: usize = 16;

/// Maximum number of motors on one side of the drivetrain.
pub const MAX_SIDE_MOTORS: usize = 4;

/// The named actuators on the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mechanism {
    TopLeftWheel,
    TopRightWheel,
    BottomLeftWheel,
    BottomRightWheel,
    Spindle,
    Intake,
    Flywheel,
    Conveyor,
}

impl fmt::Display for Mechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mechanism::TopLeftWheel => "top left wheel",
            Mechanism::TopRightWheel => "top right wheel",
            Mechanism::BottomLeftWheel => "bottom left wheel",
            Mechanism::BottomRightWheel => "bottom right wheel",
            Mechanism::Spindle => "spindle",
            Mechanism::Intake => "intake",
            Mechanism::Flywheel => "flywheel",
            Mechanism::Conveyor => "conveyor",
        };
        f.write_str(name)
    }
}

/// Motor cartridge, which sets the top speed a velocity command can reach.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cartridge {
    /// 100 RPM.
    Red,
    /// 200 RPM.
    #[default]
    Green,
    /// 600 RPM.
    Blue,
}

/// A mechanism bound to one Smart Port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelBinding {
    pub mechanism: Mechanism,
    /// Smart Port number, `1..=21`.
    pub port:      u8,
    /// Whether positive commands spin the motor backwards.
    pub reversed:  bool,
    pub cartridge: Cartridge,
}

impl ChannelBinding {
    /// Binds `mechanism` to `port` with a green cartridge, spinning forward.
    pub const fn new(mechanism: Mechanism, port: u8) -> Self {
        ChannelBinding {
            mechanism,
            port,
            reversed: false,
            cartridge: Cartridge::Green,
        }
    }

    /// Inverts the direction of the channel.
    #[must_use]
    pub const fn reversed(mut self) -> Self {
        self.reversed = true;
        self
    }

    #[must_use]
    pub const fn with_cartridge(mut self, cartridge: Cartridge) -> Self {
        self.cartridge = cartridge;
        self
    }
}

/// Which mechanisms make up each side of the drivetrain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveConfig {
    pub left:  Vec<Mechanism, MAX_SIDE_MOTORS>,
    pub right: Vec<Mechanism, MAX_SIDE_MOTORS>,
    pub mode:  DriveMode,
}

/// Errors found while validating a [`RobotConfig`].
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(visibility(pub(crate)))]
pub enum ConfigError {
    /// A binding names a port the brain does not have.
    #[snafu(display("{mechanism} is bound to port {port}, outside 1..={SMART_PORTS}"))]
    PortOutOfRange { mechanism: Mechanism, port: u8 },

    /// Two bindings share a port.
    #[snafu(display("port {port} is bound to both {first} and {second}"))]
    DuplicatePort {
        port:   u8,
        first:  Mechanism,
        second: Mechanism,
    },

    /// A mechanism has more than one binding.
    #[snafu(display("{mechanism} is bound more than once"))]
    DuplicateBinding { mechanism: Mechanism },

    /// A mechanism is used without being bound to a port.
    #[snafu(display("{mechanism} is used but has no port binding"))]
    UnboundMechanism { mechanism: Mechanism },

    /// A mechanism appears in more than one control mapping.
    #[snafu(display("{mechanism} has more than one control mapping"))]
    DuplicateMapping { mechanism: Mechanism },

    /// A mechanism is driven both by the drivetrain and by a control mapping,
    /// or sits on both sides of the drivetrain.
    #[snafu(display("{mechanism} is already part of the drivetrain"))]
    DriveOverlap { mechanism: Mechanism },

    /// One side of the drivetrain has no motors.
    #[snafu(display("the {side} side of the drivetrain has no motors"))]
    EmptyDriveSide { side: &'static str },

    /// The opcontrol loop would never yield.
    #[snafu(display("the opcontrol loop interval must be greater than zero"))]
    ZeroLoopInterval,

    /// A fixed-capacity list is full.
    #[snafu(display("at most {capacity} {what} fit in one configuration"))]
    CapacityExceeded {
        what:     &'static str,
        capacity: usize,
    },
}

/// The complete configuration of a robot program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotConfig {
    /// Every channel the robot uses.
    pub bindings:      Vec<ChannelBinding, MAX_BINDINGS>,
    pub drive:         DriveConfig,
    /// Button mappings for the auxiliary mechanisms.
    pub controls:      ControlTable,
    /// Routine run during the autonomous period.
    pub autonomous:    Routine,
    /// Sleep at the end of every opcontrol cycle.
    pub loop_interval: Duration,
    /// Banner text shown on line 1 of the brain screen.
    pub title:         &'static str,
    /// Text toggled on line 2 by the screen button.
    pub toggle_text:   &'static str,
}

impl RobotConfig {
    /// Default sleep between opcontrol cycles.
    pub const LOOP_INTERVAL: Duration = Duration::from_millis(2);

    /// The competition robot.
    ///
    /// Four-wheel tank drive on ports 13 and 19 (left) and 20 and 12
    /// (right, reversed); spindle on 11, intake on 10, flywheel on 14 and
    /// conveyor on 15.
    pub fn competition() -> Self {
        let bindings = [
            ChannelBinding::new(Mechanism::TopLeftWheel, 13),
            ChannelBinding::new(Mechanism::TopRightWheel, 20).reversed(),
            ChannelBinding::new(Mechanism::BottomLeftWheel, 19),
            ChannelBinding::new(Mechanism::BottomRightWheel, 12).reversed(),
            ChannelBinding::new(Mechanism::Spindle, 11),
            ChannelBinding::new(Mechanism::Intake, 10),
            ChannelBinding::new(Mechanism::Flywheel, 14),
            ChannelBinding::new(Mechanism::Conveyor, 15),
        ];

        RobotConfig {
            bindings:      bindings.into_iter().collect(),
            drive:         DriveConfig {
                left:  [Mechanism::TopLeftWheel, Mechanism::BottomLeftWheel]
                    .into_iter()
                    .collect(),
                right: [Mechanism::TopRightWheel, Mechanism::BottomRightWheel]
                    .into_iter()
                    .collect(),
                mode:  DriveMode::Tank,
            },
            controls:      ControlTable::competition(),
            autonomous:    Routine::spindle_push(),
            loop_interval: Self::LOOP_INTERVAL,
            title:         "Matt sucks",
            toggle_text:   "funky monks are on the run",
        }
    }

    /// Looks up the binding for `mechanism`.
    pub fn binding(&self, mechanism: Mechanism) -> Option<ChannelBinding> {
        self.bindings
            .iter()
            .copied()
            .find(|binding| binding.mechanism == mechanism)
    }

    /// Adds or replaces the binding for a mechanism.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityExceeded`] if the binding list is full.
    pub fn bind(&mut self, binding: ChannelBinding) -> Result<(), ConfigError> {
        if let Some(existing) = self
            .bindings
            .iter_mut()
            .find(|existing| existing.mechanism == binding.mechanism)
        {
            *existing = binding;
            return Ok(());
        }
        self.bindings.push(binding).map_err(|_| ConfigError::CapacityExceeded {
            what:     "channel bindings",
            capacity: MAX_BINDINGS,
        })
    }

    /// Checks that the configuration describes a robot that can run.
    ///
    /// # Errors
    ///
    /// Returns the first problem found; see [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure!(!self.loop_interval.is_zero(), ZeroLoopIntervalSnafu);

        for (index, binding) in self.bindings.iter().enumerate() {
            ensure!(
                (1..=SMART_PORTS).contains(&binding.port),
                PortOutOfRangeSnafu {
                    mechanism: binding.mechanism,
                    port:      binding.port,
                }
            );
            for earlier in &self.bindings[..index] {
                ensure!(
                    earlier.mechanism != binding.mechanism,
                    DuplicateBindingSnafu {
                        mechanism: binding.mechanism,
                    }
                );
                ensure!(
                    earlier.port != binding.port,
                    DuplicatePortSnafu {
                        port:   binding.port,
                        first:  earlier.mechanism,
                        second: binding.mechanism,
                    }
                );
            }
        }

        ensure!(!self.drive.left.is_empty(), EmptyDriveSideSnafu { side: "left" });
        ensure!(!self.drive.right.is_empty(), EmptyDriveSideSnafu { side: "right" });

        let drive = self.drive.left.iter().chain(self.drive.right.iter());
        for (index, mechanism) in drive.clone().enumerate() {
            self.ensure_bound(*mechanism)?;
            ensure!(
                !drive.clone().take(index).any(|earlier| earlier == mechanism),
                DriveOverlapSnafu {
                    mechanism: *mechanism,
                }
            );
        }

        let mappings = self.controls.mappings();
        for (index, mapping) in mappings.iter().enumerate() {
            self.ensure_bound(mapping.mechanism)?;
            ensure!(
                !drive.clone().any(|wheel| *wheel == mapping.mechanism),
                DriveOverlapSnafu {
                    mechanism: mapping.mechanism,
                }
            );
            ensure!(
                !mappings[..index]
                    .iter()
                    .any(|earlier| earlier.mechanism == mapping.mechanism),
                DuplicateMappingSnafu {
                    mechanism: mapping.mechanism,
                }
            );
        }

        for mechanism in self.autonomous.mechanisms() {
            self.ensure_bound(mechanism)?;
        }

        Ok(())
    }

    fn ensure_bound(&self, mechanism: Mechanism) -> Result<(), ConfigError> {
        ensure!(
            self.binding(mechanism).is_some(),
            UnboundMechanismSnafu { mechanism }
        );
        Ok(())
    }
}

impl Default for RobotConfig {
    fn default() -> Self { Self::competition() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        hal::Command,
        opcontrol::controller::ControlMapping,
        peripherals::controller::ControllerButton,
    };

    #[test]
    fn competition_config_is_valid() {
        let config = RobotConfig::competition();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.bindings.len(), 8);
        assert_eq!(config.loop_interval, Duration::from_millis(2));
        assert!(config.binding(Mechanism::TopRightWheel).unwrap().reversed);
        assert!(!config.binding(Mechanism::TopLeftWheel).unwrap().reversed);
    }

    #[test]
    fn rebinding_replaces_cartridge() {
        let mut config = RobotConfig::competition();
        assert!(config.bindings.iter().all(|b| b.cartridge == Cartridge::Green));

        config
            .bind(ChannelBinding::new(Mechanism::Flywheel, 14).with_cartridge(Cartridge::Blue))
            .unwrap();
        assert_eq!(config.bindings.len(), 8);
        assert_eq!(config.binding(Mechanism::Flywheel).unwrap().cartridge, Cartridge::Blue);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_port_out_of_range() {
        let mut config = RobotConfig::competition();
        config
            .bind(ChannelBinding::new(Mechanism::Conveyor, 22))
            .unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::PortOutOfRange {
                mechanism: Mechanism::Conveyor,
                port:      22,
            })
        );

        config.bind(ChannelBinding::new(Mechanism::Conveyor, 0)).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PortOutOfRange { port: 0, .. })
        ));
    }

    #[test]
    fn rejects_shared_ports() {
        let mut config = RobotConfig::competition();
        config.bind(ChannelBinding::new(Mechanism::Intake, 11)).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicatePort {
                port:   11,
                first:  Mechanism::Spindle,
                second: Mechanism::Intake,
            })
        );
    }

    #[test]
    fn rejects_unbound_mechanisms() {
        let mut config = RobotConfig::competition();
        config
            .bindings
            .retain(|binding| binding.mechanism != Mechanism::Flywheel);
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnboundMechanism {
                mechanism: Mechanism::Flywheel,
            })
        );
    }

    #[test]
    fn rejects_double_mapping() {
        let mut config = RobotConfig::competition();
        config.controls = config
            .controls
            .with(ControlMapping::button(
                Mechanism::Spindle,
                ControllerButton::ButtonX,
                Command::Velocity(50),
                Command::STOP,
            ))
            .unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateMapping {
                mechanism: Mechanism::Spindle,
            })
        );
    }

    #[test]
    fn rejects_mapping_a_drive_wheel() {
        let mut config = RobotConfig::competition();
        config.controls = config
            .controls
            .with(ControlMapping::button(
                Mechanism::TopLeftWheel,
                ControllerButton::ButtonX,
                Command::Velocity(50),
                Command::STOP,
            ))
            .unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::DriveOverlap {
                mechanism: Mechanism::TopLeftWheel,
            })
        );
    }

    #[test]
    fn rejects_wheel_on_both_sides() {
        let mut config = RobotConfig::competition();
        config.drive.right.push(Mechanism::TopLeftWheel).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::DriveOverlap {
                mechanism: Mechanism::TopLeftWheel,
            })
        );
    }

    #[test]
    fn rejects_empty_drive_and_zero_interval() {
        let mut config = RobotConfig::competition();
        config.drive.left.clear();
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyDriveSide { side: "left" })
        );

        let mut config = RobotConfig::competition();
        config.loop_interval = Duration::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::ZeroLoopInterval));
    }

    #[test]
    fn errors_render_readably() {
        let err = ConfigError::DuplicatePort {
            port:   11,
            first:  Mechanism::Spindle,
            second: Mechanism::Intake,
        };
        assert_eq!(err.to_string(), "port 11 is bound to both spindle and intake");
    }
}
