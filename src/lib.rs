// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Step/Dir BLDC Firmware
//!
//! This crate turns a step/direction motion command into a PWM speed command plus direction and
//! brake outputs for one or more brushless motor drivers ganged on a logical axis, targeting an
//! STM32F777 MCU.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`io`] | `embedded-hal` pin/PWM traits plus PWM carrier control |
//! | [`timing`] | Monotonic clock, wraparound-safe tick math, frequency/duty conversion |
//! | [`config`] | Composition-time constants, brake policy and motor/channel configuration |
//! | [`error`] | Configuration errors |
//! | [`stepdir`] | Step edge detection (interrupt side) and channel polling (loop side) |
//! | [`motors`] | Per-motor speed, timeout and brake state machine |
//! | `hw` | MCU-level wrappers around TIM2/TIM4, GPIO, USART (bare-metal targets only) |
//!
//! ## Data flow
//!
//! ```text
//! step edge -> EdgeDetector (debounce, timestamp, arm)
//!           -> Channel::poll (elapsed, direction, fan-out)
//!           -> MotorController::update (duty, timeout, brake)
//!           -> PWM / GPIO
//! ```
//!
//! ## Getting Started
//!
//! Run the host-side unit tests:
//!
//! ```bash
//! cargo test --lib
//! ```
//!
//! Build the firmware image:
//!
//! ```bash
//! cargo build --release --target thumbv7em-none-eabihf
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//! See the `LICENSE` file in the repository root for full terms.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod error;
pub mod io;
pub mod motors;
pub mod stepdir;
pub mod timing;

#[cfg(target_os = "none")]
pub mod hw;

#[cfg(test)]
pub(crate) mod testing;
