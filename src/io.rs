// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin and PWM interfaces consumed by the control core.
//!
//! Pins and PWM channels are plain `embedded-hal` traits, so HAL pins plug in directly and tests
//! use small mocks. The only thing `embedded-hal` does not cover is retuning a PWM carrier, which
//! [`PwmFrequency`] adds.
//!
//! Pin errors are dropped with `.ok()`: register writes are treated as infallible at this layer.

pub use embedded_hal::digital::v2::{InputPin, OutputPin};
pub use embedded_hal::PwmPin;

/// A PWM channel whose carrier frequency can be set at runtime.
pub trait PwmFrequency {
    /// Set the carrier frequency of the channel. May change `PwmPin::get_max_duty`.
    fn set_frequency(&mut self, frequency_hz: u32);
}

/// Drive `pin` to `high`, ignoring pin errors.
#[inline]
pub fn write_level<P: OutputPin>(pin: &mut P, high: bool) {
    if high {
        pin.set_high().ok();
    } else {
        pin.set_low().ok();
    }
}

/// Scale a duty on the 16-bit full scale (`0xFFFF` = 100 %) onto a channel's own `max_duty`.
#[inline]
pub fn scale_duty(duty: u16, channel_max: u16) -> u16 {
    ((duty as u32 * channel_max as u32) / u16::MAX as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockOutput;

    #[test]
    fn write_level_drives_pin() {
        let mut pin = MockOutput::default();
        write_level(&mut pin, true);
        assert!(pin.high);
        write_level(&mut pin, false);
        assert!(!pin.high);
        assert_eq!(pin.writes, 2);
    }

    #[test]
    fn duty_scales_onto_channel_resolution() {
        assert_eq!(scale_duty(0, 16_000), 0);
        assert_eq!(scale_duty(u16::MAX, 16_000), 16_000);
        assert_eq!(scale_duty(16_384, 16_000), 4_000);
        assert_eq!(scale_duty(12_345, u16::MAX), 12_345);
    }
}
