// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the STM32F777 step/dir motor board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpioc, gpiod, Alternate, Input, Output, PullUp, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub leds: LedPins,
    pub usart1: Usart1Pins,
    pub x: StepDirPins,
    pub motor_a: MotorAPins,
    pub motor_b: MotorBPins,
}

pub struct LedPins {
    pub red: gpiod::PD8<Output<PushPull>>,
    pub green: gpiod::PD10<Output<PushPull>>,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

/// X axis step/dir inputs from the motion controller, pulled up.
pub struct StepDirPins {
    pub step: gpioc::PC0<Input<PullUp>>, // EXTI0
    pub dir: gpioc::PC1<Input<PullUp>>,
}

/// Motor A driver pins
pub struct MotorAPins {
    pub pwm: gpiod::PD12<Alternate<2>>, // TIM4_CH1
    pub dir: gpioa::PA3<Output<PushPull>>,
    pub brake: gpioa::PA4<Output<PushPull>>,
}

/// Motor B driver pins
pub struct MotorBPins {
    pub pwm: gpiod::PD13<Alternate<2>>, // TIM4_CH2
    pub dir: gpiod::PD1<Output<PushPull>>,
    pub brake: gpiod::PD2<Output<PushPull>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpioc: pac::GPIOC, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();

        Self {
            leds: LedPins {
                red: gpiod.pd8.into_push_pull_output(),
                green: gpiod.pd10.into_push_pull_output(),
            },

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            x: StepDirPins {
                step: gpioc.pc0.into_pull_up_input(),
                dir: gpioc.pc1.into_pull_up_input(),
            },

            motor_a: MotorAPins {
                pwm: gpiod.pd12.into_alternate::<2>(),
                dir: gpioa.pa3.into_push_pull_output(),
                brake: gpioa.pa4.into_push_pull_output(),
            },

            motor_b: MotorBPins {
                pwm: gpiod.pd13.into_alternate::<2>(),
                dir: gpiod.pd1.into_push_pull_output(),
                brake: gpiod.pd2.into_push_pull_output(),
            },
        }
    }
}
