//! Shuntcal - Shunt Calibration Tag Firmware
//!
//! Firmware for the STM32F042K6 calibration tag. Holds one calibration
//! record for a current shunt and serves it over USART2 (PA2=TX, PA3=RX).
//! Factory mode writes and verifies the record; customer mode only reads it.

#![no_std]
#![no_main]

mod config;

use cortex_m_rt::entry;
use defmt::*;
use embassy_stm32::flash::Flash;
use embassy_stm32::interrupt::Interrupt;
use embassy_stm32::pac;
use embassy_stm32::usart::Uart;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use shuntcal_core::{Service, Step, Store};
use shuntcal_hal_stm32f0::{usart_config, EmulatedEeprom, RxEventStandby, SerialRx, SerialTx};

#[entry]
fn main() -> ! {
    info!("Shuntcal firmware starting...");

    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized, profile {}", config::PROFILE_NAME);

    let store = match EmulatedEeprom::new(Flash::new_blocking(p.FLASH)).and_then(Store::new) {
        Ok(store) => store,
        Err(e) => {
            error!("Persistent store unavailable: {:?}", e);
            halt();
        }
    };

    let uart = Uart::new_blocking(p.USART2, p.PA3, p.PA2, usart_config(&config::UART)).unwrap();
    let (tx, rx) = uart.split();
    info!("USART2 at {} baud", config::UART.baudrate);

    let mut core = cortex_m::Peripherals::take().unwrap();
    let mut standby = RxEventStandby::new(&mut core.SCB, pac::USART2, Interrupt::USART2);

    let mut service = Service::new(
        store,
        SerialTx::new(tx),
        SerialRx::new(rx, pac::USART2),
        Delay,
        config::DEVICE,
    );

    match service.boot() {
        Ok(boot) => {
            if boot.initialized {
                info!("Blank store initialized");
            }
            info!("Running in {:?}", boot.mode);
        }
        Err(fault) => {
            error!("Boot failed: {:?}", fault);
            halt();
        }
    }

    let fault = service.run(&mut standby, log_step);
    error!("Halted: {:?}", fault);
    halt();
}

/// Log one processed byte
fn log_step(step: &Step) {
    match step {
        Step::Pending => trace!("Byte buffered"),
        Step::Overflow => warn!("Line overflow, discarded"),
        Step::Dropped(kind) => warn!("Receive error {:?}, byte dropped", kind),
        Step::Handled(command) => debug!("Handled {}", command.name()),
        Step::Rejected => debug!("Line rejected"),
        Step::ModeChanged(mode) => info!("Mode changed to {:?}", mode),
    }
}

/// Park the core for good
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
