//! File-based logger implementation for the V5 Brain.
//!
//! This module implements the [`log`] crate's logging facade, writing log
//! messages to both the console (terminal/debug output) and a file on the
//! V5 Brain's SD card.
//!
//! # Usage
//!
//! Initialize the logger once at the start of your program:
//!
//! ```ignore
//! use spindlebot::fs::logger;
//! use log::{info, LevelFilter};
//!
//! #[vexide::main]
//! async fn main(peripherals: Peripherals) {
//!     logger::init(LevelFilter::Info).expect("Logger init failed");
//!     info!("Program started");
//! }
//! ```
//!
//! # Log Output
//!
//! Each entry carries the level, the time since program start, the module
//! path and the message:
//!
//! ```text
//! INFO [5s 123ms] spindlebot::auton::sequencer - Autonomous routine 'spindle push' started (2 phases, 300ms)
//! WARN [1m 2s 4ms] spindlebot::hal::vex - Controller State Error: Controller is offline
//! ```

use std::{
    fs::OpenOptions,
    io::{BufWriter, Write},
    sync::{Mutex, OnceLock},
    time::Duration,
};

use humantime::format_duration;
use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Where the log file is written, relative to the SD card root.
pub const LOG_FILE: &str = "log.txt";

/// A dual-output logger.
///
/// Writes log messages to both the console and a file. The file is
/// created/truncated when the logger is initialized.
pub struct RobotLogger {
    /// Buffered file writer for log output.
    ///
    /// `None` if the file could not be opened (e.g., no SD card present).
    file_writer: Mutex<Option<BufWriter<std::fs::File>>>,
}

impl RobotLogger {
    fn new(path: &str) -> Self {
        let file_writer = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .ok()
            .map(BufWriter::new);

        Self {
            file_writer: Mutex::new(file_writer),
        }
    }
}

impl log::Log for RobotLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let log_line = format_line(record, uptime());

            print!("{}", log_line);

            if let Ok(mut writer_guard) = self.file_writer.lock() {
                if let Some(writer) = writer_guard.as_mut() {
                    let _ = writer.write_all(log_line.as_bytes());
                }
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut writer_guard) = self.file_writer.lock() {
            if let Some(writer) = writer_guard.as_mut() {
                let _ = writer.flush();
            }
        }
    }
}

static LOGGER: OnceLock<RobotLogger> = OnceLock::new();

/// Initializes the logger, writing to [`LOG_FILE`].
///
/// Call once before any logging macros are used.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a logger has already been set.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RobotLogger::new(LOG_FILE));
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

fn format_line(record: &Record<'_>, elapsed: Duration) -> String {
    // Millisecond resolution keeps lines short.
    let elapsed = Duration::from_millis(elapsed.as_millis() as u64);
    format!(
        "{} [{}] {} - {}\n",
        record.level(),
        format_duration(elapsed),
        record.target(),
        record.args()
    )
}

/// Time since the user program started.
#[cfg(target_vendor = "vex")]
fn uptime() -> Duration { vexide::time::user_uptime() }

/// Time since the logger was first used; the host has no program uptime.
#[cfg(not(target_vendor = "vex"))]
fn uptime() -> Duration {
    static START: OnceLock<std::time::Instant> = OnceLock::new();
    START.get_or_init(std::time::Instant::now).elapsed()
}
