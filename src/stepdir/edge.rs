// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Interrupt-side step pulse detection.
//!
//! [`EdgeDetector::on_rising_edge`] runs inside the step pin's EXTI handler. Every piece of state it
//! touches has exactly one writer:
//!
//! | Field | Written by | Read by |
//! | ----- | ---------- | ------- |
//! | `last_edge` | EXTI handler | `Channel::poll` |
//! | `last_interrupt` | EXTI handler | EXTI handler |
//! | `seen` | EXTI handler | EXTI handler |
//! | [`RunFlag`] set | EXTI handler | `MotorController::update` |
//! | [`RunFlag`] clear | `MotorController` (loop) | `MotorController` (loop) |
//!
//! All of it is word-sized atomics, so the loop sees a timestamp either before or after an edge,
//! never a torn value, and no lock is needed. Adding another writer to any of these (e.g. a stop
//! command from a second interrupt) needs a CAS or a critical section.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::config::ChannelConfig;

/// Per-motor "step pulses are arriving" flag.
///
/// Only the edge detector sets it; only the owning motor clears it.
#[derive(Debug)]
pub struct RunFlag(AtomicBool);

impl RunFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    /// Mark the motor as running. Interrupt context only.
    #[inline]
    pub fn arm(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Mark the motor as stopped. Loop context only.
    #[inline]
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}

/// Debounced rising-edge timestamping for one channel's step input.
///
/// `N` is the number of motors bound to the channel; every accepted edge arms all of them.
pub struct EdgeDetector<'a, const N: usize> {
    debounce_us: u32,
    last_edge: AtomicU32,
    last_interrupt: AtomicU32,
    /// Set by the first accepted edge; until then there is nothing to debounce against.
    seen: AtomicBool,
    motors: [&'a RunFlag; N],
}

impl<'a, const N: usize> EdgeDetector<'a, N> {
    /// Create a detector that arms `motors` on every accepted edge. Usable in a `static`.
    pub const fn new(debounce_us: u32, motors: [&'a RunFlag; N]) -> Self {
        Self {
            debounce_us,
            last_edge: AtomicU32::new(0),
            last_interrupt: AtomicU32::new(0),
            seen: AtomicBool::new(false),
            motors,
        }
    }

    /// Create a detector from a channel configuration. Usable in a `static`.
    pub const fn from_config(config: ChannelConfig, motors: [&'a RunFlag; N]) -> Self {
        Self::new(config.debounce_us, motors)
    }

    /// Handle a rising edge observed at `now` (µs). Returns `true` if the edge was accepted.
    ///
    /// Runs in interrupt context: bounded time, no blocking. The first edge after construction is
    /// always accepted.
    ///
    /// The debounce window is the unsigned forward distance from the last accepted edge, not a
    /// signed [`ticks_diff`](crate::timing::ticks_diff). The two agree inside 2^31 µs; past that the
    /// signed form would read a long idle gap as negative and drop the edge as bounce.
    pub fn on_rising_edge(&self, now: u32) -> bool {
        if self.seen.load(Ordering::Relaxed) {
            let since_last = now.wrapping_sub(self.last_interrupt.load(Ordering::Relaxed));
            if since_last <= self.debounce_us {
                return false;
            }
        }

        self.seen.store(true, Ordering::Relaxed);
        self.last_interrupt.store(now, Ordering::Relaxed);
        self.last_edge.store(now, Ordering::Release);
        for motor in self.motors.iter() {
            motor.arm();
        }
        true
    }

    /// Timestamp of the latest accepted edge. Loop context.
    #[inline]
    pub fn last_edge(&self) -> u32 {
        self.last_edge.load(Ordering::Acquire)
    }

    #[inline]
    pub fn debounce_us(&self) -> u32 {
        self.debounce_us
    }

    /// Whether `flag` is one of the motors this detector arms.
    pub fn arms(&self, flag: &RunFlag) -> bool {
        self.motors.iter().any(|m| core::ptr::eq(*m, flag))
    }
}
