//! Controller input as plain data.
//!
//! The opcontrol loop never talks to the controller directly. Once per
//! cycle the platform's [`InputSource`](crate::hal::InputSource) produces
//! an [`InputSnapshot`], and [`ButtonEdges`] compares it against the
//! previous cycle to find buttons that were just pressed or released.
//!
//! # Example
//!
//! ```
//! use spindlebot::peripherals::controller::{
//!     ButtonEdges, ControllerAxis, ControllerButton, InputSnapshot,
//! };
//!
//! let mut edges = ButtonEdges::new();
//!
//! let snapshot = InputSnapshot::new()
//!     .with_button(ControllerButton::ButtonR1)
//!     .with_axis(ControllerAxis::LeftY, 127);
//!
//! let changes = edges.update(&snapshot);
//! assert!(changes.pressed.contains(ControllerButton::ButtonR1));
//! assert_eq!(snapshot.axis(ControllerAxis::LeftY), 127);
//! ```

/// Full deflection of an analog axis.
pub const AXIS_MAX: i32 = 127;

/// A list of Controller Buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerButton {
    ButtonA,
    ButtonB,
    ButtonX,
    ButtonY,
    ButtonUp,
    ButtonDown,
    ButtonLeft,
    ButtonRight,
    ButtonL1,
    ButtonL2,
    ButtonR1,
    ButtonR2,
}

impl ControllerButton {
    /// Every button, in bit order.
    pub const ALL: [ControllerButton; 12] = [
        ControllerButton::ButtonA,
        ControllerButton::ButtonB,
        ControllerButton::ButtonX,
        ControllerButton::ButtonY,
        ControllerButton::ButtonUp,
        ControllerButton::ButtonDown,
        ControllerButton::ButtonLeft,
        ControllerButton::ButtonRight,
        ControllerButton::ButtonL1,
        ControllerButton::ButtonL2,
        ControllerButton::ButtonR1,
        ControllerButton::ButtonR2,
    ];

    const fn bit(self) -> u16 { 1 << self as u16 }
}

/// The four analog stick axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

/// A set of controller buttons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSet(u16);

impl ButtonSet {
    /// The set with no buttons in it.
    pub const EMPTY: ButtonSet = ButtonSet(0);

    pub const fn contains(&self, button: ControllerButton) -> bool { self.0 & button.bit() != 0 }

    pub fn insert(&mut self, button: ControllerButton) { self.0 |= button.bit(); }

    pub fn remove(&mut self, button: ControllerButton) { self.0 &= !button.bit(); }

    pub const fn is_empty(&self) -> bool { self.0 == 0 }

    /// Iterates the buttons in the set in [`ControllerButton::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = ControllerButton> + '_ {
        ControllerButton::ALL
            .into_iter()
            .filter(move |button| self.contains(*button))
    }

    const fn difference(self, other: ButtonSet) -> ButtonSet { ButtonSet(self.0 & !other.0) }
}

impl FromIterator<ControllerButton> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = ControllerButton>>(iter: I) -> Self {
        let mut set = ButtonSet::EMPTY;
        for button in iter {
            set.insert(button);
        }
        set
    }
}

/// The instantaneous state of the controller, read once per cycle.
///
/// Axis values are raw stick positions in `-127..=127`. A default snapshot
/// has every button released and every stick centered, which is also what
/// the platform reports when the controller cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Buttons held down this cycle.
    pub held: ButtonSet,
    /// Raw axis values indexed by [`ControllerAxis`].
    axes:     [i32; 4],
}

impl InputSnapshot {
    /// A snapshot with nothing held and both sticks centered.
    pub const fn new() -> Self {
        InputSnapshot {
            held: ButtonSet::EMPTY,
            axes: [0; 4],
        }
    }

    /// Returns this snapshot with `button` held.
    #[must_use]
    pub fn with_button(mut self, button: ControllerButton) -> Self {
        self.held.insert(button);
        self
    }

    /// Returns this snapshot with `axis` at `value`, clamped to the stick range.
    #[must_use]
    pub fn with_axis(mut self, axis: ControllerAxis, value: i32) -> Self {
        self.set_axis(axis, value);
        self
    }

    pub fn set_axis(&mut self, axis: ControllerAxis, value: i32) {
        self.axes[axis as usize] = value.clamp(-AXIS_MAX, AXIS_MAX);
    }

    pub const fn axis(&self, axis: ControllerAxis) -> i32 { self.axes[axis as usize] }

    pub const fn is_held(&self, button: ControllerButton) -> bool { self.held.contains(button) }
}

/// Buttons whose state changed between two consecutive snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Edges {
    /// Held now, not held on the previous cycle.
    pub pressed:  ButtonSet,
    /// Held on the previous cycle, not held now.
    pub released: ButtonSet,
}

/// Per-button edge detection.
///
/// Remembers which buttons were held on the previous cycle. The state
/// starts with every button released, so a button already held when the
/// loop starts counts as pressed on the first cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonEdges {
    previous: ButtonSet,
}

impl ButtonEdges {
    pub const fn new() -> Self {
        ButtonEdges {
            previous: ButtonSet::EMPTY,
        }
    }

    /// Compares `snapshot` with the previous cycle and records it.
    pub fn update(&mut self, snapshot: &InputSnapshot) -> Edges {
        let edges = Edges {
            pressed:  snapshot.held.difference(self.previous),
            released: self.previous.difference(snapshot.held),
        };
        self.previous = snapshot.held;
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_fire_once() {
        let mut edges = ButtonEdges::new();
        let held = InputSnapshot::new().with_button(ControllerButton::ButtonB);

        let first = edges.update(&held);
        assert!(first.pressed.contains(ControllerButton::ButtonB));
        assert!(first.released.is_empty());

        let second = edges.update(&held);
        assert!(second.pressed.is_empty());
        assert!(second.released.is_empty());

        let third = edges.update(&InputSnapshot::new());
        assert!(third.pressed.is_empty());
        assert!(third.released.contains(ControllerButton::ButtonB));
    }

    #[test]
    fn independent_buttons() {
        let mut edges = ButtonEdges::new();
        edges.update(&InputSnapshot::new().with_button(ControllerButton::ButtonL1));

        let changes = edges.update(&InputSnapshot::new().with_button(ControllerButton::ButtonL2));
        assert_eq!(changes.pressed.iter().collect::<Vec<_>>(), vec![
            ControllerButton::ButtonL2
        ]);
        assert_eq!(changes.released.iter().collect::<Vec<_>>(), vec![
            ControllerButton::ButtonL1
        ]);
    }

    #[test]
    fn axes_clamp_to_stick_range() {
        let snapshot = InputSnapshot::new()
            .with_axis(ControllerAxis::LeftY, 400)
            .with_axis(ControllerAxis::RightY, -50);
        assert_eq!(snapshot.axis(ControllerAxis::LeftY), 127);
        assert_eq!(snapshot.axis(ControllerAxis::RightY), -50);
        assert_eq!(snapshot.axis(ControllerAxis::LeftX), 0);
    }

    #[test]
    fn button_set_roundtrip() {
        let set: ButtonSet = [ControllerButton::ButtonR2, ControllerButton::ButtonA]
            .into_iter()
            .collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![
            ControllerButton::ButtonA,
            ControllerButton::ButtonR2
        ]);
        let mut set = set;
        set.remove(ControllerButton::ButtonA);
        assert!(!set.contains(ControllerButton::ButtonA));
    }
}
