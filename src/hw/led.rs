// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Status LED.

use crate::io::{write_level, OutputPin};

/// Whether the LED is driven active-high or active-low on the board wiring.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActiveLevel {
    High,
    Low,
}

/// LED that remembers its active level and only touches the pin on a state change, so it can be
/// refreshed from every main-loop pass.
pub struct Led<PIN: OutputPin> {
    pin: PIN,
    active: ActiveLevel,
    is_on: bool,
}

impl<PIN: OutputPin> Led<PIN> {
    /// Create an LED wrapper, initializing it to OFF.
    pub fn new(mut pin: PIN, active: ActiveLevel) -> Self {
        write_level(&mut pin, active == ActiveLevel::Low);
        Self {
            pin,
            active,
            is_on: false,
        }
    }

    pub fn active_low(pin: PIN) -> Self {
        Self::new(pin, ActiveLevel::Low)
    }

    /// Drive the LED logically ON (true) or OFF (false).
    pub fn set(&mut self, on: bool) {
        if on == self.is_on {
            return;
        }
        write_level(&mut self.pin, on == (self.active == ActiveLevel::High));
        self.is_on = on;
    }
}
