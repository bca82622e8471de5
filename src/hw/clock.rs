// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Free-running microsecond time base on TIM2.
//!
//! TIM2 is 32 bits wide, so with a 1 MHz tick the raw counter is the monotonic clock directly and
//! wraps after 2^32 µs, which [`ticks_diff`](crate::timing::ticks_diff) handles.

use stm32f7xx_hal::pac;

use crate::timing::MonotonicClock;

/// Tick rate of the time base.
pub const TICK_HZ: u32 = 1_000_000;

/// Handle to the TIM2 microsecond counter.
///
/// Zero-sized and `Copy`: the main loop and the EXTI handler each hold one and only read the
/// counter register.
#[derive(Copy, Clone, Debug)]
pub struct MicrosClock {
    _private: (),
}

impl MicrosClock {
    /// Configure TIM2 as a 1 MHz up-counter with full 32-bit range and start it.
    ///
    /// `timer_clock_hz` is the TIM2 kernel clock (APB1 timer clock) and must be a multiple of 1 MHz.
    pub fn tim2(tim2: pac::TIM2, timer_clock_hz: u32) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());

        let tim = tim2;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        let psc = timer_clock_hz / TICK_HZ - 1;
        tim.psc.write(|w| unsafe { w.bits(psc) });

        // Auto-reload: max 32-bit
        tim.arr.write(|w| unsafe { w.bits(0xFFFF_FFFF) });

        // Latch the prescaler, then start from zero
        tim.egr.write(|w| w.ug().set_bit());
        tim.cnt.write(|w| unsafe { w.bits(0) });

        tim.cr1.modify(|_, w| w.cen().set_bit());

        Self { _private: () }
    }
}

impl MonotonicClock for MicrosClock {
    #[inline]
    fn now(&self) -> u32 {
        let tim = unsafe { &*pac::TIM2::ptr() };
        tim.cnt.read().bits()
    }
}
