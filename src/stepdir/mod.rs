// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Step/Dir Input
//!
//! The two halves of a step/direction axis: the EXTI-side edge detector and the loop-side channel
//! that fans elapsed step time out to its motors.
//!
//! ## Modules
//!
//! - [`edge`] - Debounced step timestamping and motor run flags (interrupt context).
//! - [`channel`] - Per-axis polling, direction handling and motor bindings (loop context).

pub mod channel;
pub mod edge;

pub use channel::{effective_direction, Binding, Channel};
pub use edge::{EdgeDetector, RunFlag};
