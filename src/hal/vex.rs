//! vexide-backed hardware for the V5 Brain.
//!
//! Each competition mode builds its own device handles from the robot's
//! [`ChannelBinding`]s. Only one mode task runs at a time and it drops its
//! handles when the competition runtime cancels it, so no two live
//! handles ever address the same port.

use core::time::Duration;

use log::warn;
use vexide::{
    color::Rgb,
    controller::{ControllerId, ControllerState},
    display::{Rect, Text, TextSize, TouchState},
    prelude::{Compete, Controller, Direction, Display, Gearset, Motor},
    smart::SmartPort,
    time::sleep,
};

use super::{Actuator, Command, InputSource, Platform, TextDisplay};
use crate::{
    config::{Cartridge, ChannelBinding, Mechanism},
    display::Banner,
    peripherals::controller::{ControllerAxis, ControllerButton, InputSnapshot},
    robot::Robot,
};

/// Full-scale motor voltage.
const MAX_VOLTAGE: f64 = 12.0;

/// Height of one line of banner text, in pixels.
const LINE_HEIGHT: u16 = 20;

/// How often the banner checks the touch screen.
const BANNER_POLL: Duration = Duration::from_millis(20);

/// A V5 Smart Motor bound to a mechanism.
pub struct VexMotor {
    mechanism: Mechanism,
    motor:     Motor,
}

impl Actuator for VexMotor {
    fn command(&mut self, command: Command) {
        let result = match command {
            Command::Power(power) => self
                .motor
                .set_voltage(Command::power_to_volts(power, MAX_VOLTAGE)),
            Command::Velocity(rpm) => self.motor.set_velocity(rpm),
        };
        result.unwrap_or_else(|e| {
            warn!("Motor Command Error ({}): {}", self.mechanism, e);
        });
    }
}

/// The primary V5 controller.
pub struct VexController {
    controller: Controller,
}

impl InputSource for VexController {
    fn snapshot(&mut self) -> InputSnapshot {
        let state = self.controller.state().unwrap_or_else(|e| {
            warn!("Controller State Error: {}", e);
            ControllerState::default()
        });

        let mut snapshot = InputSnapshot::new();
        for button in ControllerButton::ALL {
            let held = match button {
                ControllerButton::ButtonA => state.button_a.is_pressed(),
                ControllerButton::ButtonB => state.button_b.is_pressed(),
                ControllerButton::ButtonX => state.button_x.is_pressed(),
                ControllerButton::ButtonY => state.button_y.is_pressed(),
                ControllerButton::ButtonUp => state.button_up.is_pressed(),
                ControllerButton::ButtonDown => state.button_down.is_pressed(),
                ControllerButton::ButtonLeft => state.button_left.is_pressed(),
                ControllerButton::ButtonRight => state.button_right.is_pressed(),
                ControllerButton::ButtonL1 => state.button_l1.is_pressed(),
                ControllerButton::ButtonL2 => state.button_l2.is_pressed(),
                ControllerButton::ButtonR1 => state.button_r1.is_pressed(),
                ControllerButton::ButtonR2 => state.button_r2.is_pressed(),
            };
            if held {
                snapshot.held.insert(button);
            }
        }

        snapshot.set_axis(ControllerAxis::LeftX, i32::from(state.left_stick.x_raw()));
        snapshot.set_axis(ControllerAxis::LeftY, i32::from(state.left_stick.y_raw()));
        snapshot.set_axis(ControllerAxis::RightX, i32::from(state.right_stick.x_raw()));
        snapshot.set_axis(ControllerAxis::RightY, i32::from(state.right_stick.y_raw()));
        snapshot
    }
}

/// The Brain's touch screen, used as a line display with one big button.
pub struct BrainScreen {
    display: Display,
}

impl BrainScreen {
    pub const fn new(display: Display) -> Self { BrainScreen { display } }

    /// Whether the screen is being touched anywhere.
    pub fn is_touched(&self) -> bool {
        !matches!(self.display.touch_status().state, TouchState::Released)
    }

    fn row_origin(row: u8) -> [i16; 2] { [0, i16::from(row) * LINE_HEIGHT as i16] }
}

impl TextDisplay for BrainScreen {
    fn set_line(&mut self, row: u8, text: &str) {
        self.clear_line(row);
        self.display.fill(
            &Text::new(text, TextSize::Medium, Self::row_origin(row)),
            Rgb::new(255, 255, 255),
        );
    }

    fn clear_line(&mut self, row: u8) {
        self.display.fill(
            &Rect::from_dimensions(
                Self::row_origin(row),
                Display::HORIZONTAL_RESOLUTION as u16,
                LINE_HEIGHT,
            ),
            Rgb::new(0, 0, 0),
        );
    }
}

/// Polls the touch screen forever, toggling the banner on each new touch.
pub async fn watch_banner(mut banner: Banner<BrainScreen>) {
    loop {
        let touched = banner.display().is_touched();
        banner.poll(touched);
        sleep(BANNER_POLL).await;
    }
}

/// Devices on a V5 Brain.
#[derive(Debug, Default)]
pub struct VexPlatform;

impl Platform for VexPlatform {
    type Actuator = VexMotor;
    type Input = VexController;

    fn actuator(&mut self, binding: ChannelBinding) -> VexMotor {
        let gearset = match binding.cartridge {
            Cartridge::Red => Gearset::Red,
            Cartridge::Green => Gearset::Green,
            Cartridge::Blue => Gearset::Blue,
        };
        let direction = if binding.reversed {
            Direction::Reverse
        } else {
            Direction::Forward
        };

        // SAFETY: ports come from a validated config with no duplicates, and
        // the handles of the previous mode are dropped before the next starts.
        let port = unsafe { SmartPort::new(binding.port) };

        VexMotor {
            mechanism: binding.mechanism,
            motor:     Motor::new(port, gearset, direction),
        }
    }

    fn input(&mut self) -> VexController {
        // SAFETY: only the running mode task reads the controller.
        let controller = unsafe { Controller::new(ControllerId::Primary) };
        VexController { controller }
    }

    async fn sleep(&self, duration: Duration) { sleep(duration).await; }
}

impl Compete for Robot<VexPlatform> {
    async fn connected(&mut self) { self.competition_initialize(); }

    async fn disabled(&mut self) { Robot::disabled(self); }

    async fn autonomous(&mut self) { Robot::autonomous(self).await; }

    async fn driver(&mut self) { self.opcontrol().await; }
}
