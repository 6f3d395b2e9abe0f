//! STM32F0-specific HAL for the Shuntcal firmware
//!
//! Implements the `shuntcal-hal` traits on top of embassy-stm32 blocking
//! drivers. Supported chips:
//!
//! - STM32F042K6 (calibration tag board)
//! - STM32F042F6
//!
//! # Features
//!
//! - `stm32f042k6` / `stm32f042f6` - Select the chip
//! - `defmt` - Enable debug formatting support

#![no_std]

pub mod flash;
pub mod power;
pub mod uart;

pub use flash::EmulatedEeprom;
pub use power::RxEventStandby;
pub use uart::{usart_config, SerialRx, SerialTx, UartBusError};
