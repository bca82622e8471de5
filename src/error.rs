// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Configuration errors.
//!
//! These are only produced while the firmware wires channels and motors together at startup. The
//! control loop itself has no error path: a missing step signal is normal operation and ends in a
//! motor stop, not a fault.

use core::fmt;

/// Rejected configuration, reported before a motor is bound to any channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Brake mode other than `autobrake` or `coast`.
    InvalidBrakeMode,
    /// Direction multiplier other than `1` or `-1`.
    InvalidMultiplier(i8),
    /// PWM carrier frequency of 0 Hz.
    ZeroPwmFrequency,
    /// Duty ceiling of 0, which would pin the motor at standstill.
    ZeroMaxDuty,
    /// Step timeout of 0 or beyond the signed 32-bit tick range.
    TimeoutOutOfRange(u32),
    /// A channel binding whose motor is not armed by that channel's edge detector.
    UnboundMotor,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBrakeMode => {
                f.write_str("invalid brake mode, choose between 'autobrake' and 'coast'")
            }
            ConfigError::InvalidMultiplier(m) => {
                write!(f, "invalid direction multiplier {m}, expected 1 or -1")
            }
            ConfigError::ZeroPwmFrequency => f.write_str("PWM frequency must be non-zero"),
            ConfigError::ZeroMaxDuty => f.write_str("max duty must be non-zero"),
            ConfigError::TimeoutOutOfRange(us) => {
                write!(f, "step timeout of {us} us is out of range")
            }
            ConfigError::UnboundMotor => {
                f.write_str("motor is bound to a channel whose edge detector does not arm it")
            }
        }
    }
}
