// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Step pulse input on an EXTI line.
//!
//! Owns the step pin after it has been routed to its EXTI line and armed for rising edges. The
//! EXTI handler calls [`StepInput::acknowledge`] on every entry and then passes the timestamp on to
//! the channel's [`EdgeDetector`](crate::stepdir::EdgeDetector).

use stm32f7xx_hal::{
    gpio::{Edge, ExtiPin},
    pac::{EXTI, SYSCFG},
    rcc::APB2,
};

pub struct StepInput<PIN> {
    pin: PIN,
}

impl<PIN: ExtiPin> StepInput<PIN> {
    /// Route `pin` to its EXTI line and raise an interrupt on every rising edge.
    ///
    /// The NVIC line still has to be unmasked by the caller once the handler's state is in place.
    pub fn rising_edge(
        mut pin: PIN,
        syscfg: &mut SYSCFG,
        exti: &mut EXTI,
        apb2: &mut APB2,
    ) -> Self {
        pin.make_interrupt_source(syscfg, apb2);
        pin.trigger_on_edge(exti, Edge::Rising);
        pin.enable_interrupt(exti);
        Self { pin }
    }

    /// Clear the pending bit. Call from the EXTI handler.
    #[inline]
    pub fn acknowledge(&mut self) {
        self.pin.clear_interrupt_pending_bit();
    }
}
