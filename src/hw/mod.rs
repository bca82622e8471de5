// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # MCU Wrappers
//!
//! STM32F7 implementations of the PWM and [`timing`](crate::timing) interfaces, plus the board pin
//! map, status LED and the debug console. HAL GPIO pins are used as `embedded-hal` pins directly.

pub mod clock;
pub mod led;
pub mod pins;
pub mod pwm;
pub mod step_input;
pub mod usart;

pub use clock::MicrosClock;
pub use led::Led;
pub use pins::BoardPins;
pub use pwm::{PwmChannel, Tim4Pwm};
pub use step_input::StepInput;
pub use usart::Usart;
