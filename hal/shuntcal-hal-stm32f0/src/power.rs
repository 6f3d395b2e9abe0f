//! Event-driven standby for STM32F0
//!
//! The core sleeps with `WFE` and `SEVONPEND` set. The USART receive
//! interrupt is enabled in the peripheral but stays disabled in the NVIC,
//! so a received byte only raises a pending bit, which is enough to wake
//! the core without running a handler.

use cortex_m::peripheral::{NVIC, SCB};
use embassy_stm32::interrupt::Interrupt;
use embassy_stm32::pac::usart::Usart;
use shuntcal_hal::Standby;

/// Standby until the USART has data (or a latched receive error)
pub struct RxEventStandby {
    regs: Usart,
    irq: Interrupt,
}

impl RxEventStandby {
    /// Arm wake-on-receive for `regs`
    ///
    /// `irq` must be the NVIC line of that USART and must stay disabled.
    pub fn new(scb: &mut SCB, regs: Usart, irq: Interrupt) -> Self {
        scb.set_sevonpend();
        regs.cr1().modify(|w| w.set_rxneie(true));
        Self { regs, irq }
    }

    fn rx_ready(&self) -> bool {
        let isr = self.regs.isr().read();
        isr.rxne() || isr.ore() || isr.fe() || isr.pe()
    }
}

impl Standby for RxEventStandby {
    fn enter_standby(&mut self) {
        while !self.rx_ready() {
            cortex_m::asm::wfe();
        }
        NVIC::unpend(self.irq);
    }
}
