// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Host-side stand-ins for the clock, pins and PWM channels.

use core::cell::Cell;
use core::convert::Infallible;

use crate::io::{InputPin, OutputPin, PwmFrequency, PwmPin};
use crate::timing::MonotonicClock;

/// Manually driven microsecond clock. Optionally advances by a fixed step on every read.
pub struct FakeClock {
    now: Cell<u32>,
    step: u32,
}

impl FakeClock {
    pub fn at(now: u32) -> Self {
        Self {
            now: Cell::new(now),
            step: 0,
        }
    }

    pub fn auto_advance(start: u32, step: u32) -> Self {
        Self {
            now: Cell::new(start),
            step,
        }
    }

    pub fn set(&self, now: u32) {
        self.now.set(now);
    }

    pub fn peek(&self) -> u32 {
        self.now.get()
    }
}

impl MonotonicClock for FakeClock {
    fn now(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step));
        now
    }
}

/// Output pin that remembers its level and how often it was written.
#[derive(Debug, Default)]
pub struct MockOutput {
    pub high: bool,
    pub writes: usize,
}

impl OutputPin for MockOutput {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        self.writes += 1;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        self.writes += 1;
        Ok(())
    }
}

/// Input pin whose level is shared with the test body.
pub struct MockInput<'a> {
    level: &'a Cell<bool>,
}

impl<'a> MockInput<'a> {
    pub fn new(level: &'a Cell<bool>) -> Self {
        Self { level }
    }
}

impl InputPin for MockInput<'_> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.level.get())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.level.get())
    }
}

/// PWM channel that remembers its carrier, enable state and last raw duty.
#[derive(Debug)]
pub struct MockPwm {
    pub frequency_hz: Option<u32>,
    pub max_duty: u16,
    pub enabled: bool,
    pub duty: u16,
    pub writes: usize,
}

impl MockPwm {
    /// A channel whose raw duty range is `0..=max_duty`.
    pub fn with_max_duty(max_duty: u16) -> Self {
        Self {
            frequency_hz: None,
            max_duty,
            enabled: false,
            duty: 0,
            writes: 0,
        }
    }
}

impl Default for MockPwm {
    fn default() -> Self {
        Self::with_max_duty(u16::MAX)
    }
}

impl PwmPin for MockPwm {
    type Duty = u16;

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn get_duty(&self) -> u16 {
        self.duty
    }

    fn get_max_duty(&self) -> u16 {
        self.max_duty
    }

    fn set_duty(&mut self, duty: u16) {
        self.duty = duty;
        self.writes += 1;
    }
}

impl PwmFrequency for MockPwm {
    fn set_frequency(&mut self, frequency_hz: u32) {
        self.frequency_hz = Some(frequency_hz);
    }
}
