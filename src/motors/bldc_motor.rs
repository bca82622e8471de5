// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Step-rate speed control for a BLDC motor behind an external driver.
//!
//! The driver takes a PWM speed input, a direction line and a brake line. This module turns the
//! time between step pulses into a duty value, stops the motor when pulses stop arriving, and keeps
//! the brake line consistent with the configured [`BrakeMode`]:
//!
//! | State | PWM | Brake (`AutoBrake`) | Brake (`Coast`) |
//! | ----- | --- | ------------------- | --------------- |
//! | Running | `min(round(f * duty_per_hz), max_duty)` | released | released |
//! | Stopped | 0 | engaged | released |
//!
//! The motor only enters Running through its [`RunFlag`], which the channel's edge detector sets
//! from interrupt context. It leaves Running through the step timeout or [`MotorController::stop`].

use crate::config::{BrakeMode, MotorConfig};
use crate::error::ConfigError;
use crate::io::{scale_duty, write_level, OutputPin, PwmFrequency, PwmPin};
use crate::motors::{Drive, MotorEvent};
use crate::stepdir::RunFlag;
use crate::timing::{duty_for_frequency, step_frequency_hz};

/// Speed/timeout/brake state machine for one motor.
pub struct MotorController<'a, PWM, DIR, BRK> {
    name: &'static str,
    pwm: PWM,
    dir_out: DIR,
    brake_out: BRK,
    run: &'a RunFlag,

    max_duty: u16,
    duty_per_hz: f32,
    timeout_us: i32,
    brake_mode: BrakeMode,

    /// Last duty written to `pwm`, on the 16-bit full scale
    duty: u16,
    /// Last level written to `dir_out`
    direction: bool,
    /// Last level written to `brake_out`
    brake_applied: bool,
}

impl<'a, PWM, DIR, BRK> MotorController<'a, PWM, DIR, BRK>
where
    PWM: PwmPin<Duty = u16> + PwmFrequency,
    DIR: OutputPin,
    BRK: OutputPin,
{
    /// Validate `config` and bring the outputs to the stopped state.
    ///
    /// The PWM carrier is configured and zeroed, and the brake line is set according to the brake
    /// mode, so the motor starts out stopped and, with `AutoBrake`, held.
    pub fn new(
        name: &'static str,
        mut pwm: PWM,
        dir_out: DIR,
        brake_out: BRK,
        run: &'a RunFlag,
        config: MotorConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        pwm.set_frequency(config.pwm_frequency_hz);
        pwm.set_duty(0);
        pwm.enable();

        let mut motor = Self {
            name,
            pwm,
            dir_out,
            brake_out,
            run,
            max_duty: config.max_duty,
            duty_per_hz: config.duty_per_hz(),
            timeout_us: config.timeout_us as i32,
            brake_mode: config.brake_mode,
            duty: 0,
            direction: false,
            brake_applied: false,
        };
        motor.apply_stopped_brake();
        Ok(motor)
    }

    /// Stop the motor: zero duty, clear the run flag, apply the brake policy.
    ///
    /// The motor runs again only after the next accepted step edge.
    pub fn stop(&mut self) {
        self.write_duty(0);
        self.run.clear();
        self.apply_stopped_brake();
    }

    /// Drive the PWM for a measured step frequency.
    fn set_speed(&mut self, frequency_hz: f32) {
        let duty = duty_for_frequency(frequency_hz, self.duty_per_hz, self.max_duty);
        self.write_duty(duty);
    }

    fn apply_stopped_brake(&mut self) {
        match self.brake_mode {
            BrakeMode::AutoBrake => self.set_brake(true),
            BrakeMode::Coast => self.set_brake(false),
        }
    }

    #[inline]
    fn write_duty(&mut self, duty: u16) {
        let raw = scale_duty(duty, self.pwm.get_max_duty());
        self.pwm.set_duty(raw);
        self.duty = duty;
    }

    #[inline]
    fn set_brake(&mut self, engaged: bool) {
        write_level(&mut self.brake_out, engaged);
        self.brake_applied = engaged;
    }

    #[inline]
    fn set_direction(&mut self, direction: bool) {
        write_level(&mut self.dir_out, direction);
        self.direction = direction;
    }

    /// Run one control pass. See [`Drive::update`].
    pub fn update(&mut self, elapsed_us: i32, direction: bool) -> Option<MotorEvent> {
        let mut event = None;

        if self.run.is_set() {
            if elapsed_us > self.timeout_us {
                self.stop();
                event = Some(MotorEvent::Stopped { motor: self.name });
            } else {
                // No usable interval yet (edge landed during this pass): keep the last duty.
                if let Some(frequency_hz) = step_frequency_hz(elapsed_us) {
                    self.set_speed(frequency_hz);
                }
                self.set_brake(false);
            }
        }

        // Latched even while stopped so the next pulse starts in the right direction.
        self.set_direction(direction);
        event
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.run.is_set()
    }

    /// Duty currently on the PWM output, on the 16-bit full scale.
    #[inline]
    pub fn duty(&self) -> u16 {
        self.duty
    }

    /// Level currently on the direction output.
    #[inline]
    pub fn direction(&self) -> bool {
        self.direction
    }

    #[inline]
    pub fn brake_applied(&self) -> bool {
        self.brake_applied
    }

    #[inline]
    pub fn brake_mode(&self) -> BrakeMode {
        self.brake_mode
    }

    /// Release the PWM, direction and brake outputs.
    pub fn free(self) -> (PWM, DIR, BRK) {
        (self.pwm, self.dir_out, self.brake_out)
    }
}

impl<PWM, DIR, BRK> Drive for MotorController<'_, PWM, DIR, BRK>
where
    PWM: PwmPin<Duty = u16> + PwmFrequency,
    DIR: OutputPin,
    BRK: OutputPin,
{
    fn run_flag(&self) -> &RunFlag {
        self.run
    }

    fn update(&mut self, elapsed_us: i32, direction: bool) -> Option<MotorEvent> {
        MotorController::update(self, elapsed_us, direction)
    }
}
