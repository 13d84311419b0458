//! Controller input mapping for operator control.
//!
//! Button handling is a declarative table rather than a chain of `if`s.
//! Each [`ControlMapping`] names one mechanism and an ordered list of
//! [`Rule`]s. Every cycle the rules are tried in order; the first whose
//! [`Trigger`] matches supplies the mechanism's command, and if none
//! match the mapping's fallback is written instead. A mechanism therefore
//! gets exactly one command per cycle, and when two buttons of a pair are
//! held together the rule listed first wins.
//!
//! # Example
//!
//! ```
//! use spindlebot::{
//!     config::Mechanism,
//!     hal::Command,
//!     opcontrol::controller::ControlMapping,
//!     peripherals::controller::{ControllerButton, Edges, InputSnapshot},
//! };
//!
//! // R1 runs the spindle forward, R2 runs it backward.
//! let spindle = ControlMapping::dual_button(
//!     Mechanism::Spindle,
//!     ControllerButton::ButtonR1,
//!     ControllerButton::ButtonR2,
//!     Command::Velocity(255),
//!     Command::Velocity(-255),
//!     Command::STOP,
//! );
//!
//! let both = InputSnapshot::new()
//!     .with_button(ControllerButton::ButtonR1)
//!     .with_button(ControllerButton::ButtonR2);
//! assert_eq!(spindle.evaluate(&both, &Edges::default()), Command::Velocity(255));
//! ```

use heapless::Vec;

use crate::{
    config::{ConfigError, Mechanism},
    hal::Command,
    peripherals::controller::{ControllerButton, Edges, InputSnapshot},
};

/// Maximum number of rules in one mapping.
pub const MAX_RULES: usize = 4;

/// Maximum number of mappings in a table.
pub const MAX_MAPPINGS: usize = 8;

/// A condition on the controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The button is held this cycle.
    Held(ControllerButton),
    /// The button went down this cycle.
    Pressed(ControllerButton),
    /// The button came up this cycle.
    Released(ControllerButton),
}

impl Trigger {
    pub fn matches(&self, snapshot: &InputSnapshot, edges: &Edges) -> bool {
        match *self {
            Trigger::Held(button) => snapshot.is_held(button),
            Trigger::Pressed(button) => edges.pressed.contains(button),
            Trigger::Released(button) => edges.released.contains(button),
        }
    }
}

/// A trigger and the command it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub trigger: Trigger,
    pub command: Command,
}

impl Rule {
    pub const fn new(trigger: Trigger, command: Command) -> Self { Rule { trigger, command } }
}

/// The rules for one mechanism, evaluated first-match-wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlMapping {
    pub mechanism: Mechanism,
    pub rules:     Vec<Rule, MAX_RULES>,
    /// Written when no rule matches.
    pub fallback:  Command,
}

impl ControlMapping {
    /// A mapping with no rules, which always writes `fallback`.
    pub const fn new(mechanism: Mechanism, fallback: Command) -> Self {
        ControlMapping {
            mechanism,
            rules: Vec::new(),
            fallback,
        }
    }

    /// Appends a rule, checked after every rule already present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityExceeded`] if the mapping already
    /// holds [`MAX_RULES`] rules.
    pub fn when(mut self, trigger: Trigger, command: Command) -> Result<Self, ConfigError> {
        self.rules
            .push(Rule::new(trigger, command))
            .map_err(|_| ConfigError::CapacityExceeded {
                what:     "rules per mapping",
                capacity: MAX_RULES,
            })?;
        Ok(self)
    }

    /// Holding `button` writes `active`, otherwise `passive`.
    pub fn button(
        mechanism: Mechanism,
        button: ControllerButton,
        active: Command,
        passive: Command,
    ) -> Self {
        Self::from_rules(mechanism, [Rule::new(Trigger::Held(button), active)], passive)
    }

    /// Holding `button_high` writes `high`; otherwise holding `button_low`
    /// writes `low`; otherwise `passive`.
    pub fn dual_button(
        mechanism: Mechanism,
        button_high: ControllerButton,
        button_low: ControllerButton,
        high: Command,
        low: Command,
        passive: Command,
    ) -> Self {
        Self::from_rules(
            mechanism,
            [
                Rule::new(Trigger::Held(button_high), high),
                Rule::new(Trigger::Held(button_low), low),
            ],
            passive,
        )
    }

    fn from_rules<const N: usize>(
        mechanism: Mechanism,
        rules: [Rule; N],
        fallback: Command,
    ) -> Self {
        ControlMapping {
            mechanism,
            rules: rules.into_iter().take(MAX_RULES).collect(),
            fallback,
        }
    }

    /// Picks this cycle's command for the mechanism.
    pub fn evaluate(&self, snapshot: &InputSnapshot, edges: &Edges) -> Command {
        self.rules
            .iter()
            .find(|rule| rule.trigger.matches(snapshot, edges))
            .map_or(self.fallback, |rule| rule.command)
    }
}

/// The button mappings for every auxiliary mechanism.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlTable {
    mappings: Vec<ControlMapping, MAX_MAPPINGS>,
}

impl ControlTable {
    pub const fn new() -> Self {
        ControlTable {
            mappings: Vec::new(),
        }
    }

    /// The competition robot's controls.
    ///
    /// | Mechanism | First       | Second       | Otherwise |
    /// |-----------|-------------|--------------|-----------|
    /// | spindle   | R1 → +255   | R2 → −255    | stop      |
    /// | intake    | L1 → +255   | L2 → −255    | stop      |
    /// | flywheel  | B → −255    |              | stop      |
    /// | conveyor  | Up → +100   | Down → −100  | stop      |
    pub fn competition() -> Self {
        let mappings = [
            ControlMapping::dual_button(
                Mechanism::Spindle,
                ControllerButton::ButtonR1,
                ControllerButton::ButtonR2,
                Command::Velocity(255),
                Command::Velocity(-255),
                Command::STOP,
            ),
            ControlMapping::dual_button(
                Mechanism::Intake,
                ControllerButton::ButtonL1,
                ControllerButton::ButtonL2,
                Command::Velocity(255),
                Command::Velocity(-255),
                Command::STOP,
            ),
            ControlMapping::button(
                Mechanism::Flywheel,
                ControllerButton::ButtonB,
                Command::Velocity(-255),
                Command::STOP,
            ),
            ControlMapping::dual_button(
                Mechanism::Conveyor,
                ControllerButton::ButtonUp,
                ControllerButton::ButtonDown,
                Command::Velocity(100),
                Command::Velocity(-100),
                Command::STOP,
            ),
        ];

        ControlTable {
            mappings: mappings.into_iter().collect(),
        }
    }

    /// Appends a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CapacityExceeded`] if the table is full.
    pub fn with(mut self, mapping: ControlMapping) -> Result<Self, ConfigError> {
        self.mappings
            .push(mapping)
            .map_err(|_| ConfigError::CapacityExceeded {
                what:     "control mappings",
                capacity: MAX_MAPPINGS,
            })?;
        Ok(self)
    }

    pub fn mappings(&self) -> &[ControlMapping] { &self.mappings }

    /// Evaluates every mapping, in table order.
    pub fn evaluate<'a>(
        &'a self,
        snapshot: &'a InputSnapshot,
        edges: &'a Edges,
    ) -> impl Iterator<Item = (Mechanism, Command)> + 'a {
        self.mappings
            .iter()
            .map(move |mapping| (mapping.mechanism, mapping.evaluate(snapshot, edges)))
    }
}
