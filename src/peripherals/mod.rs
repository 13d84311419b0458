//! Operator input devices.
//!
//! The controller is read through [`InputSource`](crate::hal::InputSource)
//! into the plain-data types in [`controller`], which the opcontrol loop
//! evaluates without touching hardware.

/// Controller buttons, axes, snapshots and edge detection.
pub mod controller;
