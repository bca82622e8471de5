// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Edge-aligned PWM on TIM4 via direct PAC register access.
//!
//! TIM4 runs in PWM mode 1 on CH1 and CH2, which drive the speed inputs of motor A and motor B.
//! Both channels share the timer's prescaler and auto-reload, so they always run at the same
//! carrier frequency: calling [`PwmFrequency::set_frequency`] on either channel retunes both.
//!
//! Raw duty is the compare value, so `get_max_duty()` is `ARR + 1` (always high) and follows the
//! carrier frequency.

use stm32f7xx_hal::{
    gpio::{gpiod, Alternate},
    pac,
};

use crate::io::{PwmFrequency, PwmPin};

// CCMRx output-compare fields, per channel pair
const OCXM_PWM1: u32 = 0b110;
const OC_LOW_SHIFT: u32 = 4;
const OC_HIGH_SHIFT: u32 = 12;
const OCXPE_LOW: u32 = 1 << 3;
const OCXPE_HIGH: u32 = 1 << 11;

// CR1
const ARPE: u32 = 1 << 7;

/// TIM4 set up for PWM output.
pub struct Tim4Pwm;

impl Tim4Pwm {
    /// Enable TIM4, put CH1/CH2 in PWM mode 1 with preload and hand out one handle per channel.
    ///
    /// The timer is left running with both outputs disabled at 0 % duty.
    pub fn split(
        tim4: pac::TIM4,
        pins: (gpiod::PD12<Alternate<2>>, gpiod::PD13<Alternate<2>>),
        timer_clock_hz: u32,
    ) -> (
        PwmChannel<gpiod::PD12<Alternate<2>>, 1>,
        PwmChannel<gpiod::PD13<Alternate<2>>, 2>,
    ) {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim4en().set_bit());

        let tim = tim4;

        // Disable counter while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        // CH1 and CH2: PWM mode 1, preload enabled
        let ccmr = (OCXM_PWM1 << OC_LOW_SHIFT) | OCXPE_LOW | (OCXM_PWM1 << OC_HIGH_SHIFT) | OCXPE_HIGH;
        tim.ccmr1_output().write(|w| unsafe { w.bits(ccmr) });

        tim.ccr1.write(|w| unsafe { w.bits(0) });
        tim.ccr2.write(|w| unsafe { w.bits(0) });

        // Auto-reload preload, then start
        tim.cr1.modify(|r, w| unsafe { w.bits(r.bits() | ARPE) });
        tim.cr1.modify(|_, w| w.cen().set_bit());

        (
            PwmChannel::new(pins.0, timer_clock_hz),
            PwmChannel::new(pins.1, timer_clock_hz),
        )
    }
}

/// One TIM4 output-compare channel (`CH` in 1..=4) and the pin it drives.
pub struct PwmChannel<PIN, const CH: u8> {
    _pin: PIN,
    timer_clock_hz: u32,
}

impl<PIN, const CH: u8> PwmChannel<PIN, CH> {
    fn new(pin: PIN, timer_clock_hz: u32) -> Self {
        const { assert!(CH >= 1 && CH <= 4, "TIM4 has channels 1 to 4") };
        Self {
            _pin: pin,
            timer_clock_hz,
        }
    }

    #[inline]
    fn regs() -> &'static pac::tim3::RegisterBlock {
        unsafe { &*pac::TIM4::ptr() }
    }

    /// CCER enable bit of this channel.
    #[inline]
    fn ccer_mask() -> u32 {
        1 << (4 * (CH as u32 - 1))
    }
}

impl<PIN, const CH: u8> PwmPin for PwmChannel<PIN, CH> {
    type Duty = u16;

    fn disable(&mut self) {
        let tim = Self::regs();
        tim.ccer
            .modify(|r, w| unsafe { w.bits(r.bits() & !Self::ccer_mask()) });
    }

    fn enable(&mut self) {
        let tim = Self::regs();
        tim.ccer
            .modify(|r, w| unsafe { w.bits(r.bits() | Self::ccer_mask()) });
    }

    fn get_duty(&self) -> u16 {
        let tim = Self::regs();
        let ccr = match CH {
            1 => tim.ccr1.read().bits(),
            2 => tim.ccr2.read().bits(),
            3 => tim.ccr3.read().bits(),
            _ => tim.ccr4.read().bits(),
        };
        ccr as u16
    }

    fn get_max_duty(&self) -> u16 {
        // ARR + 1 <= 0xFFFF, see `set_frequency`
        (Self::regs().arr.read().bits() + 1) as u16
    }

    fn set_duty(&mut self, duty: u16) {
        let tim = Self::regs();
        let ccr = duty as u32;
        match CH {
            1 => tim.ccr1.write(|w| unsafe { w.bits(ccr) }),
            2 => tim.ccr2.write(|w| unsafe { w.bits(ccr) }),
            3 => tim.ccr3.write(|w| unsafe { w.bits(ccr) }),
            _ => tim.ccr4.write(|w| unsafe { w.bits(ccr) }),
        }
    }
}

impl<PIN, const CH: u8> PwmFrequency for PwmChannel<PIN, CH> {
    fn set_frequency(&mut self, frequency_hz: u32) {
        let tim = Self::regs();

        // Largest period (best duty resolution) with ARR + 1 still fitting in a u16 duty
        let ticks = (self.timer_clock_hz / frequency_hz.max(1)).max(2);
        let psc = (ticks - 1) / 0xFFFF;
        let arr = ticks / (psc + 1) - 1;

        tim.psc.write(|w| unsafe { w.bits(psc) });
        tim.arr.write(|w| unsafe { w.bits(arr) });
        tim.egr.write(|w| w.ug().set_bit());
    }
}
