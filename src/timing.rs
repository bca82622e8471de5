// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Microsecond time base and the tick/frequency/duty conversions shared by the edge detector and
//! the motor controllers.
//!
//! All timestamps are raw `u32` microsecond counts that wrap every ~71.6 minutes. Differences are
//! always taken with [`ticks_diff`], which stays correct across one wrap as long as the two
//! samples are less than 2^31 µs apart.

#[cfg(not(test))]
use micromath::F32Ext;

/// Microseconds per second, the numerator of the pulse-period to frequency conversion.
pub const MICROS_PER_SEC: f32 = 1_000_000.0;

/// Free-running microsecond counter.
pub trait MonotonicClock {
    /// Current counter value in microseconds.
    fn now(&self) -> u32;

    /// Signed `a - b`, correct across counter wraparound.
    #[inline]
    fn diff(&self, a: u32, b: u32) -> i32 {
        ticks_diff(a, b)
    }
}

impl<C: MonotonicClock + ?Sized> MonotonicClock for &C {
    #[inline]
    fn now(&self) -> u32 {
        (**self).now()
    }
}

/// Wraparound-safe signed difference `a - b` of two microsecond timestamps.
#[inline]
pub fn ticks_diff(a: u32, b: u32) -> i32 {
    a.wrapping_sub(b) as i32
}

/// Step frequency in Hz for a pulse period of `elapsed_us`.
///
/// Returns `None` when there is no valid measurement (`elapsed_us <= 0`). A negative period shows
/// up when an edge lands between sampling `now` and sampling the edge timestamp.
#[inline]
pub fn step_frequency_hz(elapsed_us: i32) -> Option<f32> {
    if elapsed_us <= 0 {
        return None;
    }
    Some(MICROS_PER_SEC / elapsed_us as f32)
}

/// Map a step frequency to a PWM duty value, rounded to nearest and capped at `max_duty`.
#[inline]
pub fn duty_for_frequency(frequency_hz: f32, duty_per_hz: f32, max_duty: u16) -> u16 {
    let duty = (frequency_hz * duty_per_hz).round();
    if duty >= max_duty as f32 {
        max_duty
    } else if duty > 0.0 {
        duty as u16
    } else {
        0
    }
}

/// Busy-wait for at least `us` microseconds on `clock`.
pub fn delay_us<C: MonotonicClock>(clock: &C, us: u32) {
    let start = clock.now();
    let us = us.min(i32::MAX as u32) as i32;
    while clock.diff(clock.now(), start) < us {
        core::hint::spin_loop();
    }
}
