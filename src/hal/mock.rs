//! Recording test doubles for the hardware traits.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    future::{Future, pending},
    rc::Rc,
    time::Duration,
};

use super::{Actuator, Command, InputSource, Platform, TextDisplay};
use crate::{
    config::{ChannelBinding, Mechanism},
    peripherals::controller::InputSnapshot,
};

/// One recorded actuator write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Simulated time of the write.
    pub at:        Duration,
    pub mechanism: Mechanism,
    pub command:   Command,
}

/// Shared log of every write made by the actuators it hands out, stamped
/// with a simulated clock that only moves when something sleeps.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    entries: Rc<RefCell<Vec<Entry>>>,
    now:     Rc<Cell<Duration>>,
}

impl CommandLog {
    pub fn actuator(&self, mechanism: Mechanism) -> RecordingActuator {
        RecordingActuator {
            mechanism,
            log: self.clone(),
        }
    }

    pub fn entries(&self) -> Vec<Entry> { self.entries.borrow().clone() }

    pub fn len(&self) -> usize { self.entries.borrow().len() }

    pub fn clear(&self) { self.entries.borrow_mut().clear(); }

    pub fn now(&self) -> Duration { self.now.get() }

    pub fn advance(&self, duration: Duration) { self.now.set(self.now.get() + duration); }

    /// The last command written to `mechanism`.
    pub fn last(&self, mechanism: Mechanism) -> Option<Command> {
        self.entries
            .borrow()
            .iter()
            .rev()
            .find(|entry| entry.mechanism == mechanism)
            .map(|entry| entry.command)
    }

    /// Every command written to `mechanism`, oldest first.
    pub fn commands(&self, mechanism: Mechanism) -> Vec<Command> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.mechanism == mechanism)
            .map(|entry| entry.command)
            .collect()
    }

    fn record(&self, mechanism: Mechanism, command: Command) {
        self.entries.borrow_mut().push(Entry {
            at: self.now.get(),
            mechanism,
            command,
        });
    }
}

/// An actuator that appends its writes to a [`CommandLog`].
#[derive(Debug)]
pub struct RecordingActuator {
    mechanism: Mechanism,
    log:       CommandLog,
}

impl Actuator for RecordingActuator {
    fn command(&mut self, command: Command) { self.log.record(self.mechanism, command); }
}

/// Replays queued snapshots, repeating the last one once the queue runs dry.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: Rc<RefCell<VecDeque<InputSnapshot>>>,
    last:  Rc<Cell<InputSnapshot>>,
}

impl ScriptedInput {
    pub fn push(&self, snapshot: InputSnapshot) { self.queue.borrow_mut().push_back(snapshot); }
}

impl InputSource for ScriptedInput {
    fn snapshot(&mut self) -> InputSnapshot {
        if let Some(next) = self.queue.borrow_mut().pop_front() {
            self.last.set(next);
        }
        self.last.get()
    }
}

/// A platform whose devices are all recording doubles.
#[derive(Debug, Clone, Default)]
pub struct MockPlatform {
    pub log:          CommandLog,
    pub input:        ScriptedInput,
    pub sleeps:       Rc<RefCell<Vec<Duration>>>,
    /// Bindings handed out, in order.
    pub bindings:     Rc<RefCell<Vec<ChannelBinding>>>,
    /// When set, sleeps complete immediately this many times and then
    /// never complete, so an endless loop can be polled to a standstill.
    pub sleep_budget: Rc<Cell<Option<usize>>>,
}

impl Platform for MockPlatform {
    type Actuator = RecordingActuator;
    type Input = ScriptedInput;

    fn actuator(&mut self, binding: ChannelBinding) -> RecordingActuator {
        self.bindings.borrow_mut().push(binding);
        self.log.actuator(binding.mechanism)
    }

    fn input(&mut self) -> ScriptedInput { self.input.clone() }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        self.sleeps.borrow_mut().push(duration);
        self.log.advance(duration);
        let stall = match self.sleep_budget.get() {
            Some(0) => true,
            Some(remaining) => {
                self.sleep_budget.set(Some(remaining - 1));
                false
            }
            None => false,
        };
        async move {
            if stall {
                pending::<()>().await;
            }
        }
    }
}

/// A text display that keeps its lines in memory.
#[derive(Debug, Clone, Default)]
pub struct MockDisplay {
    pub lines:  [Option<String>; 8],
    pub writes: usize,
}

impl MockDisplay {
    pub fn line(&self, row: u8) -> Option<&str> { self.lines[row as usize].as_deref() }
}

impl TextDisplay for MockDisplay {
    fn set_line(&mut self, row: u8, text: &str) {
        self.lines[row as usize] = Some(text.to_owned());
        self.writes += 1;
    }

    fn clear_line(&mut self, row: u8) {
        self.lines[row as usize] = None;
        self.writes += 1;
    }
}
