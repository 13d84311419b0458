//! # spindlebot
//!
//! Competition program for a four-wheel tank-drive VEX V5 robot with a
//! spindle, intake, flywheel and conveyor, built on top of
//! [Vexide](https://vexide.dev).
//!
//! - **Operator Control**: Each stick drives one side of the chassis, and a
//!   declarative button table runs the mechanisms.
//! - **Autonomous**: A fixed list of timed phases, run one after another.
//! - **Display**: A banner on the Brain screen that toggles on touch.
//! - **Logging**: A file-based logger for debugging and telemetry.
//!
//! All hardware access goes through the traits in [`hal`]. On a V5 Brain
//! (`target_vendor = "vex"`) those are implemented with vexide devices;
//! elsewhere the control logic builds and tests without any hardware.
//!
//! ## Quick Start
//!
//! ```ignore
//! use spindlebot::{config::RobotConfig, hal::vex::VexPlatform, robot::Robot};
//! use vexide::prelude::*;
//!
//! #[vexide::main]
//! async fn main(_peripherals: Peripherals) {
//!     let robot = Robot::new(VexPlatform, RobotConfig::competition()).unwrap();
//!     robot.compete().await;
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Port bindings, controls and autonomous selection.
//! - [`drivetrain`]: Tank and arcade drive.
//! - [`opcontrol`]: Button mapping and the operator control loop.
//! - [`auton`]: Timed autonomous routines.
//! - [`display`]: The Brain screen banner.
//! - [`robot`]: Competition lifecycle hooks.
//! - [`fs`]: Filesystem utilities including logging.

/// Autonomous routines and the sequencer that runs them.
///
/// A routine is a list of phases; each phase writes fixed commands to a
/// set of mechanisms and then waits a fixed time.
pub mod auton;

/// Robot wiring and behaviour configuration.
pub mod config;

/// Brain screen banner with a touch-toggled second line.
pub mod display;

/// Differential drivetrain control module.
///
/// Provides [`TankDrive`](drivetrain::TankDrive) for robots with left and
/// right motor groups:
///
/// - **Tank**: Each joystick controls one side of the robot.
/// - **Arcade**: Left stick for forward/backward, right stick for turning.
pub mod drivetrain;

/// Filesystem utilities module.
///
/// Contains logging functionality for recording robot telemetry and debug
/// information to files on the V5 Brain's SD card.
pub mod fs;

/// Hardware traits and their implementations.
pub mod hal;

/// Operator control utilities module.
///
/// Maps controller input to drive and mechanism commands during driver
/// control, and runs the loop that applies them.
pub mod opcontrol;

/// Controller input types.
pub mod peripherals;

/// Competition lifecycle hooks.
pub mod robot;
