//! Filesystem utilities for the V5 Brain.
//!
//! # Logging
//!
//! The `logger` submodule provides a file-based logger that writes to
//! `log.txt` on the SD card, alongside the console. This is useful for
//! reading back what happened during a match.
//!
//! # Example
//!
//! ```ignore
//! use spindlebot::fs::logger;
//! use log::{info, LevelFilter};
//!
//! logger::init(LevelFilter::Debug).expect("Failed to initialize logger");
//! info!("Robot initialized successfully");
//! ```

/// File-based logging for the V5 Brain.
pub mod logger;
