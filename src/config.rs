// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Composition-time configuration.
//!
//! Everything here is decided once while the firmware wires channels to motors. The control loop
//! only ever sees validated values.

use core::str::FromStr;

use crate::error::ConfigError;

/// Step edges closer together than this (µs) are treated as bounce and dropped.
pub const DEBOUNCE_US: u32 = 200;

/// Upper bound of the PWM duty value (16-bit full scale).
pub const MAX_DUTY: u16 = 65_535;

/// PWM carrier frequency of the motor speed input.
pub const PWM_FREQUENCY_HZ: u32 = 1_000;

/// A motor stops when no step pulse has arrived for this long (µs).
pub const STEP_TIMEOUT_US: u32 = 50_000;

/// Idle gap between polling consecutive channels in the main loop (µs).
pub const CHANNEL_POLL_GAP_US: u32 = 10;

/// What the brake output does when a motor stops.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BrakeMode {
    /// Actively hold the shaft once stopped.
    AutoBrake,
    /// Let the shaft spin freely once stopped.
    Coast,
}

impl FromStr for BrakeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "autobrake" => Ok(BrakeMode::AutoBrake),
            "coast" => Ok(BrakeMode::Coast),
            _ => Err(ConfigError::InvalidBrakeMode),
        }
    }
}

/// Sign applied to the channel's direction line before it reaches a motor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DirectionMultiplier {
    /// `+1`: pass the direction line through.
    Forward,
    /// `-1`: invert the direction line (mirrored motor on the same axis).
    Reverse,
}

impl TryFrom<i8> for DirectionMultiplier {
    type Error = ConfigError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DirectionMultiplier::Forward),
            -1 => Ok(DirectionMultiplier::Reverse),
            other => Err(ConfigError::InvalidMultiplier(other)),
        }
    }
}

/// Per-motor speed/timeout/brake parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MotorConfig {
    pub pwm_frequency_hz: u32,
    pub max_duty: u16,
    pub timeout_us: u32,
    pub brake_mode: BrakeMode,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            pwm_frequency_hz: PWM_FREQUENCY_HZ,
            max_duty: MAX_DUTY,
            timeout_us: STEP_TIMEOUT_US,
            brake_mode: BrakeMode::AutoBrake,
        }
    }
}

impl MotorConfig {
    /// Set the brake policy.
    pub fn with_brake_mode(mut self, brake_mode: BrakeMode) -> Self {
        self.brake_mode = brake_mode;
        self
    }

    /// Set the no-pulse timeout.
    pub fn with_timeout_us(mut self, timeout_us: u32) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Set the duty ceiling.
    pub fn with_max_duty(mut self, max_duty: u16) -> Self {
        self.max_duty = max_duty;
        self
    }

    /// Set the PWM carrier frequency.
    pub fn with_pwm_frequency_hz(mut self, pwm_frequency_hz: u32) -> Self {
        self.pwm_frequency_hz = pwm_frequency_hz;
        self
    }

    /// Duty counts per Hz of step frequency, so that a step rate equal to the PWM frequency maps
    /// to `max_duty`.
    #[inline]
    pub fn duty_per_hz(&self) -> f32 {
        self.max_duty as f32 / self.pwm_frequency_hz as f32
    }

    /// Check the parameters the control loop relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pwm_frequency_hz == 0 {
            return Err(ConfigError::ZeroPwmFrequency);
        }
        if self.max_duty == 0 {
            return Err(ConfigError::ZeroMaxDuty);
        }
        if self.timeout_us == 0 || self.timeout_us > i32::MAX as u32 {
            return Err(ConfigError::TimeoutOutOfRange(self.timeout_us));
        }
        Ok(())
    }
}

/// Per-channel step input parameters.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ChannelConfig {
    pub debounce_us: u32,
}

impl ChannelConfig {
    pub const fn new(debounce_us: u32) -> Self {
        Self { debounce_us }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self::new(DEBOUNCE_US)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brake_mode_parses_known_names() {
        assert_eq!("autobrake".parse::<BrakeMode>(), Ok(BrakeMode::AutoBrake));
        assert_eq!("coast".parse::<BrakeMode>(), Ok(BrakeMode::Coast));
    }

    #[test]
    fn brake_mode_rejects_anything_else() {
        assert_eq!("brake".parse::<BrakeMode>(), Err(ConfigError::InvalidBrakeMode));
        assert_eq!("AutoBrake".parse::<BrakeMode>(), Err(ConfigError::InvalidBrakeMode));
        assert_eq!("".parse::<BrakeMode>(), Err(ConfigError::InvalidBrakeMode));
    }

    #[test]
    fn multiplier_accepts_only_unit_signs() {
        assert_eq!(DirectionMultiplier::try_from(1), Ok(DirectionMultiplier::Forward));
        assert_eq!(DirectionMultiplier::try_from(-1), Ok(DirectionMultiplier::Reverse));
        assert_eq!(
            DirectionMultiplier::try_from(0),
            Err(ConfigError::InvalidMultiplier(0))
        );
        assert_eq!(
            DirectionMultiplier::try_from(2),
            Err(ConfigError::InvalidMultiplier(2))
        );
    }

    #[test]
    fn defaults_match_board_constants() {
        let cfg = MotorConfig::default();
        assert_eq!(cfg.pwm_frequency_hz, 1_000);
        assert_eq!(cfg.max_duty, 65_535);
        assert_eq!(cfg.timeout_us, 50_000);
        assert_eq!(cfg.brake_mode, BrakeMode::AutoBrake);
        assert_eq!(ChannelConfig::default().debounce_us, 200);
        assert!((cfg.duty_per_hz() - 65.535).abs() < 1e-4);
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let cfg = MotorConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(
            cfg.with_pwm_frequency_hz(0).validate(),
            Err(ConfigError::ZeroPwmFrequency)
        );
        assert_eq!(cfg.with_max_duty(0).validate(), Err(ConfigError::ZeroMaxDuty));
        assert_eq!(
            cfg.with_timeout_us(0).validate(),
            Err(ConfigError::TimeoutOutOfRange(0))
        );
        assert_eq!(
            cfg.with_timeout_us(u32::MAX).validate(),
            Err(ConfigError::TimeoutOutOfRange(u32::MAX))
        );
    }
}
