//! Operator control for the driver-controlled period.
//!
//! # Features
//!
//! - **Tank drive**: Each stick drives one side of the chassis.
//! - **Button-to-Motor mapping**: A declarative table of button rules per
//!   mechanism, evaluated first-match-wins.
//! - **Edge triggers**: Rules can fire on the cycle a button goes down or
//!   comes up, not only while it is held.
//!
//! # Example
//!
//! ```ignore
//! use spindlebot::{config::RobotConfig, opcontrol::driver::OpControl};
//!
//! let config = RobotConfig::competition();
//! let mut opcontrol = OpControl::new(&mut platform, &config)?;
//! opcontrol.run().await;
//! ```

/// Controller input mapping utilities.
///
/// Provides [`ControlTable`](controller::ControlTable) and
/// [`ControlMapping`](controller::ControlMapping) for mapping buttons to
/// mechanism commands.
pub mod controller;

/// The opcontrol loop itself.
pub mod driver;
