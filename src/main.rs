// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Step/dir to BLDC speed firmware for the STM32F777 motor board.
//!
//! Channel X (step PC0, dir PC1) drives motor A (mirrored) and motor B. Step edges are timestamped
//! in the EXTI0 handler; everything else runs in the main loop.

#![cfg_attr(target_os = "none", no_main)]
#![cfg_attr(target_os = "none", no_std)]

#[cfg(target_os = "none")]
mod firmware {
    use core::cell::RefCell;
    use core::fmt::Write;

    use cortex_m::interrupt::{free, Mutex};
    use cortex_m::peripheral::NVIC;
    use cortex_m_rt::entry;
    use panic_halt as _;

    use hal::{
        gpio::{gpioc, gpiod, Input, Output, PullUp, PushPull},
        pac::{self, interrupt},
        prelude::*,
        serial::{Config, Serial},
    };
    use stm32f7xx_hal as hal;

    use stepdir_bldc::config::{
        BrakeMode, ChannelConfig, DirectionMultiplier, MotorConfig, CHANNEL_POLL_GAP_US,
        DEBOUNCE_US,
    };
    use stepdir_bldc::error::ConfigError;
    use stepdir_bldc::hw::{BoardPins, Led, MicrosClock, StepInput, Tim4Pwm, Usart};
    use stepdir_bldc::motors::MotorController;
    use stepdir_bldc::stepdir::{Binding, Channel, EdgeDetector, RunFlag};
    use stepdir_bldc::timing::{delay_us, MonotonicClock};

    /// TIM2/TIM4 kernel clock with the default RCC setup (16 MHz HSI, APB1 prescaler 1).
    const TIMER_CLOCK_HZ: u32 = 16_000_000;

    /// Brake policy of both motors on the X axis.
    const X_BRAKE_MODE: &str = "autobrake";

    static RUN_A: RunFlag = RunFlag::new();
    static RUN_B: RunFlag = RunFlag::new();

    static EDGES_X: EdgeDetector<'static, 2> =
        EdgeDetector::from_config(ChannelConfig::new(DEBOUNCE_US), [&RUN_A, &RUN_B]);

    /// Everything the EXTI0 handler needs besides `EDGES_X`.
    struct StepIrq {
        input: StepInput<gpioc::PC0<Input<PullUp>>>,
        clock: MicrosClock,
    }

    static STEP_X: Mutex<RefCell<Option<StepIrq>>> = Mutex::new(RefCell::new(None));

    #[interrupt]
    fn EXTI0() {
        free(|cs| {
            if let Some(irq) = STEP_X.borrow(cs).borrow_mut().as_mut() {
                let now = irq.clock.now();
                irq.input.acknowledge();
                EDGES_X.on_rising_edge(now);
            }
        });
    }

    type FaultLed = Led<gpiod::PD8<Output<PushPull>>>;

    /// Report a composition failure on the console and the fault LED, then halt.
    fn or_halt<T, U: hal::serial::Instance>(
        usart: &mut Usart<U>,
        fault: &mut FaultLed,
        result: Result<T, ConfigError>,
    ) -> T {
        match result {
            Ok(value) => value,
            Err(err) => {
                fault.set(true);
                usart.report_config_error(&err);
                loop {
                    cortex_m::asm::nop();
                }
            }
        }
    }

    #[entry]
    fn main() -> ! {
        // Peripherals
        let dp = pac::Peripherals::take().unwrap();

        // Clocks
        let rcc = dp.RCC.constrain();
        let clocks = rcc.cfgr.freeze();
        let mut apb2 = rcc.apb2;

        // GPIO
        let pins = BoardPins::new(dp.GPIOA, dp.GPIOC, dp.GPIOD);

        // USART1 (DBG)
        let usart_cfg = Config {
            baud_rate: 115_200.bps(),
            ..Default::default()
        };
        let serial = Serial::new(
            dp.USART1,
            (pins.usart1.tx, pins.usart1.rx),
            &clocks,
            usart_cfg,
        );
        let mut usart = Usart::new(serial);

        let mut status = Led::active_low(pins.leds.green);
        let mut fault = Led::active_low(pins.leds.red);

        // Time base and motor PWM
        let clock = MicrosClock::tim2(dp.TIM2, TIMER_CLOCK_HZ);
        let (pwm_a, pwm_b) = Tim4Pwm::split(
            dp.TIM4,
            (pins.motor_a.pwm, pins.motor_b.pwm),
            TIMER_CLOCK_HZ,
        );

        // Motors
        let brake_mode = or_halt(&mut usart, &mut fault, X_BRAKE_MODE.parse::<BrakeMode>());
        let motor_cfg = MotorConfig::default().with_brake_mode(brake_mode);

        let mut motor_a = or_halt(
            &mut usart,
            &mut fault,
            MotorController::new(
                "A",
                pwm_a,
                pins.motor_a.dir,
                pins.motor_a.brake,
                &RUN_A,
                motor_cfg,
            ),
        );
        let mut motor_b = or_halt(
            &mut usart,
            &mut fault,
            MotorController::new(
                "B",
                pwm_b,
                pins.motor_b.dir,
                pins.motor_b.brake,
                &RUN_B,
                motor_cfg,
            ),
        );

        // Channels
        let reverse = or_halt(&mut usart, &mut fault, DirectionMultiplier::try_from(-1));
        let channel_x = or_halt(
            &mut usart,
            &mut fault,
            Channel::new(
                "x",
                &EDGES_X,
                pins.x.dir,
                [
                    Binding::new(&mut motor_a, reverse),
                    Binding::new(&mut motor_b, DirectionMultiplier::Forward),
                ],
            ),
        );
        let mut channels = [channel_x];

        // Step interrupt, armed only once everything it touches exists
        let mut syscfg = dp.SYSCFG;
        let mut exti = dp.EXTI;
        let step_x = StepInput::rising_edge(pins.x.step, &mut syscfg, &mut exti, &mut apb2);
        free(|cs| {
            STEP_X.borrow(cs).replace(Some(StepIrq {
                input: step_x,
                clock,
            }));
        });
        unsafe { NVIC::unmask(pac::Interrupt::EXTI0) };

        for channel in channels.iter() {
            let _ = write!(usart, "channel {} ready\r\n", channel.name());
        }
        usart.println("Program is up and running, awaiting step/dir signals from the controller.");

        loop {
            let mut any_running = false;
            for channel in channels.iter_mut() {
                channel.poll(&clock, |event| usart.report(event));
                any_running |= channel.any_running();
                delay_us(&clock, CHANNEL_POLL_GAP_US);
            }
            status.set(any_running);
        }
    }
}

#[cfg(not(target_os = "none"))]
fn main() {
    eprintln!("stepdir-bldc is firmware: build it with --target thumbv7em-none-eabihf");
}
