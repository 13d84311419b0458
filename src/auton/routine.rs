//! Autonomous routines as data.
//!
//! A [`Routine`] is an ordered list of [`Phase`]s. A phase writes a fixed
//! command to a set of mechanisms and then holds for a fixed time before
//! the next phase starts. There is no branching and no sensor feedback.

use core::time::Duration;

use heapless::Vec;

use crate::{
    config::{ConfigError, MAX_BINDINGS, Mechanism},
    hal::Command,
};

/// Maximum number of phases in a routine.
pub const MAX_PHASES: usize = 8;

/// Maximum number of writes in one phase.
pub const MAX_WRITES: usize = 8;

const DRIVE_WHEELS: [Mechanism; 4] = [
    Mechanism::TopLeftWheel,
    Mechanism::BottomLeftWheel,
    Mechanism::TopRightWheel,
    Mechanism::BottomRightWheel,
];

/// Commands written together, then held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub writes: Vec<(Mechanism, Command), MAX_WRITES>,
    /// Time to wait after the writes. A zero hold moves straight on.
    pub hold:   Duration,
}

impl Phase {
    /// A phase with no writes that just waits.
    pub const fn wait(hold: Duration) -> Self {
        Phase {
            writes: Vec::new(),
            hold,
        }
    }

    /// Adds a write to the phase.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityExceeded`] if the phase already
    /// holds [`MAX_WRITES`] writes.
    pub fn set(mut self, mechanism: Mechanism, command: Command) -> Result<Self, ConfigError> {
        self.writes
            .push((mechanism, command))
            .map_err(|_| ConfigError::CapacityExceeded {
                what:     "writes per phase",
                capacity: MAX_WRITES,
            })?;
        Ok(self)
    }

    fn from_writes(writes: impl IntoIterator<Item = (Mechanism, Command)>, hold: Duration) -> Self {
        Phase {
            writes: writes.into_iter().take(MAX_WRITES).collect(),
            hold,
        }
    }
}

/// A scripted sequence for the autonomous period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routine {
    pub name: &'static str,
    phases:   Vec<Phase, MAX_PHASES>,
}

impl Routine {
    /// A routine that does nothing.
    pub const fn none() -> Self {
        Routine {
            name:   "none",
            phases: Vec::new(),
        }
    }

    /// Drives all four wheels forward at full power while the spindle runs
    /// in reverse, for 300 ms, then stops all five.
    pub fn spindle_push() -> Self {
        let go = DRIVE_WHEELS
            .into_iter()
            .map(|wheel| (wheel, Command::Power(255)))
            .chain([(Mechanism::Spindle, Command::Velocity(-255))]);
        let stop = DRIVE_WHEELS
            .into_iter()
            .map(|wheel| (wheel, Command::Power(0)))
            .chain([(Mechanism::Spindle, Command::STOP)]);

        Routine {
            name:   "spindle push",
            phases: [
                Phase::from_writes(go, Duration::from_millis(300)),
                Phase::from_writes(stop, Duration::ZERO),
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Spins the flywheel up for five seconds, feeds it with the conveyor
    /// for two, then stops both.
    pub fn flywheel_feed() -> Self {
        Routine {
            name:   "flywheel feed",
            phases: [
                Phase::from_writes(
                    [(Mechanism::Flywheel, Command::Velocity(-255))],
                    Duration::from_secs(5),
                ),
                Phase::from_writes(
                    [(Mechanism::Conveyor, Command::Velocity(100))],
                    Duration::from_secs(2),
                ),
                Phase::from_writes(
                    [
                        (Mechanism::Conveyor, Command::STOP),
                        (Mechanism::Flywheel, Command::STOP),
                    ],
                    Duration::ZERO,
                ),
            ]
            .into_iter()
            .collect(),
        }
    }

    /// Appends a phase.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityExceeded`] if the routine already
    /// holds [`MAX_PHASES`] phases.
    pub fn then(mut self, phase: Phase) -> Result<Self, ConfigError> {
        self.phases
            .push(phase)
            .map_err(|_| ConfigError::CapacityExceeded {
                what:     "phases per routine",
                capacity: MAX_PHASES,
            })?;
        Ok(self)
    }

    pub fn phases(&self) -> &[Phase] { &self.phases }

    /// Sum of every phase's hold.
    pub fn total_duration(&self) -> Duration { self.phases.iter().map(|phase| phase.hold).sum() }

    /// Every mechanism the routine writes to, in order of first use.
    pub fn mechanisms(&self) -> Vec<Mechanism, MAX_BINDINGS> {
        let mut used: Vec<Mechanism, MAX_BINDINGS> = Vec::new();
        for (mechanism, _) in self.phases.iter().flat_map(|phase| phase.writes.iter()) {
            if !used.contains(mechanism) && used.push(*mechanism).is_err() {
                break;
            }
        }
        used
    }
}

impl Default for Routine {
    fn default() -> Self { Self::none() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spindle_push_shape() {
        let routine = Routine::spindle_push();
        assert_eq!(routine.phases().len(), 2);
        assert_eq!(routine.total_duration(), Duration::from_millis(300));
        assert_eq!(routine.mechanisms().as_slice(), &[
            Mechanism::TopLeftWheel,
            Mechanism::BottomLeftWheel,
            Mechanism::TopRightWheel,
            Mechanism::BottomRightWheel,
            Mechanism::Spindle,
        ]);
        assert!(
            routine.phases()[1]
                .writes
                .iter()
                .all(|(_, command)| command.is_stop())
        );
    }

    #[test]
    fn flywheel_feed_shape() {
        let routine = Routine::flywheel_feed();
        assert_eq!(routine.total_duration(), Duration::from_secs(7));
        assert_eq!(routine.mechanisms().as_slice(), &[
            Mechanism::Flywheel,
            Mechanism::Conveyor
        ]);
    }

    #[test]
    fn building_routines() {
        let routine = Routine::none()
            .then(
                Phase::wait(Duration::from_millis(100))
                    .set(Mechanism::Intake, Command::Velocity(200))
                    .unwrap(),
            )
            .unwrap()
            .then(Phase::wait(Duration::from_millis(50)))
            .unwrap();
        assert_eq!(routine.total_duration(), Duration::from_millis(150));
        assert_eq!(routine.mechanisms().as_slice(), &[Mechanism::Intake]);
        assert!(Routine::none().mechanisms().is_empty());
    }

    #[test]
    fn phase_capacity_is_enforced() {
        let mut routine = Routine::none();
        for _ in 0..MAX_PHASES {
            routine = routine.then(Phase::wait(Duration::ZERO)).unwrap();
        }
        assert!(matches!(
            routine.then(Phase::wait(Duration::ZERO)),
            Err(ConfigError::CapacityExceeded { capacity: MAX_PHASES, .. })
        ));
    }
}
