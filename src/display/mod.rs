//! Brain screen banner.
//!
//! Line 1 shows a fixed title. A press of the screen's primary button
//! toggles a second message on line 2. The toggle flag lives in the
//! [`Banner`] itself, so whichever task owns the banner owns its state.

use log::debug;

use crate::hal::TextDisplay;

/// Row of the title text.
pub const TITLE_ROW: u8 = 1;
/// Row of the toggled text.
pub const TOGGLE_ROW: u8 = 2;

/// Banner text on a [`TextDisplay`], with a press-to-toggle second line.
pub struct Banner<D> {
    display:     D,
    title:       &'static str,
    toggle_text: &'static str,
    shown:       bool,
    was_pressed: bool,
}

impl<D: TextDisplay> Banner<D> {
    pub const fn new(display: D, title: &'static str, toggle_text: &'static str) -> Self {
        Banner {
            display,
            title,
            toggle_text,
            shown: false,
            was_pressed: false,
        }
    }

    /// Writes the title line.
    pub fn initialize(&mut self) { self.display.set_line(TITLE_ROW, self.title); }

    /// Flips the second line between the toggle text and blank.
    pub fn on_primary_press(&mut self) {
        self.shown = !self.shown;
        debug!("Banner toggle {}", if self.shown { "on" } else { "off" });
        if self.shown {
            self.display.set_line(TOGGLE_ROW, self.toggle_text);
        } else {
            self.display.clear_line(TOGGLE_ROW);
        }
    }

    /// Feeds the button state in; toggles only on the cycle it goes down.
    pub fn poll(&mut self, pressed: bool) {
        if pressed && !self.was_pressed {
            self.on_primary_press();
        }
        self.was_pressed = pressed;
    }

    /// Whether line 2 is currently showing the toggle text.
    pub const fn is_shown(&self) -> bool { self.shown }

    pub fn display(&self) -> &D { &self.display }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::mock::MockDisplay;

    fn banner() -> Banner<MockDisplay> {
        Banner::new(MockDisplay::default(), "Matt sucks", "funky monks are on the run")
    }

    #[test]
    fn initialize_writes_title() {
        let mut banner = banner();
        banner.initialize();
        assert_eq!(banner.display().line(TITLE_ROW), Some("Matt sucks"));
        assert_eq!(banner.display().line(TOGGLE_ROW), None);
    }

    #[test]
    fn press_toggles_second_line() {
        let mut banner = banner();
        banner.on_primary_press();
        assert!(banner.is_shown());
        assert_eq!(
            banner.display().line(TOGGLE_ROW),
            Some("funky monks are on the run")
        );

        banner.on_primary_press();
        assert!(!banner.is_shown());
        assert_eq!(banner.display().line(TOGGLE_ROW), None);
    }

    #[test]
    fn holding_the_button_toggles_once() {
        let mut banner = banner();
        for pressed in [true, true, true, false, false, true, false] {
            banner.poll(pressed);
        }
        assert!(!banner.is_shown());
        assert_eq!(banner.display().writes, 2);
    }
}
