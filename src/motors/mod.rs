// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Motor Abstractions
//!
//! Motor-level logic that sits between a step/dir [`Channel`](crate::stepdir::Channel) and the
//! PWM/GPIO outputs of an external BLDC driver.
//!
//! ## Modules
//!
//! - [`bldc_motor`] - Step-rate to PWM speed controller with step timeout and brake policy.

pub mod bldc_motor;

pub use bldc_motor::MotorController;

use crate::stepdir::RunFlag;

/// Something a motor wants the firmware to know about. Reported from loop context only.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MotorEvent {
    /// Step pulses stopped arriving and the motor was stopped.
    Stopped { motor: &'static str },
}

/// The interface a [`Channel`](crate::stepdir::Channel) drives its bound motors through.
pub trait Drive {
    /// The flag the channel's edge detector sets when a step arrives.
    fn run_flag(&self) -> &RunFlag;

    /// Advance the motor by one control pass.
    ///
    /// `elapsed_us` is the signed time since the last accepted step edge, `direction` the level to
    /// put on the direction output.
    fn update(&mut self, elapsed_us: i32, direction: bool) -> Option<MotorEvent>;
}
