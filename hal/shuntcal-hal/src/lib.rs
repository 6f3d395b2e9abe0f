//! Shuntcal Hardware Abstraction Layer
//!
//! This crate defines the collaborator traits the board-agnostic service
//! runs against. Chip-specific HALs implement them; host tests implement
//! them with in-memory mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (shuntcal-firmware)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  shuntcal-core (service, dispatcher)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  shuntcal-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           ┌───────────────────┐
//!           │ shuntcal-hal-     │
//!           │    stm32f0        │
//!           └───────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial transport
//! - [`eeprom::ByteStore`] - Byte-addressed persistent store
//! - [`power::Standby`] - Low-power wait for transport activity

#![no_std]
#![deny(unsafe_code)]

pub mod eeprom;
pub mod power;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use eeprom::{ByteStore, RamStore, StoreError, BLANK_BYTE};
pub use power::Standby;
pub use uart::{ReadError, RxErrorKind, UartRx, UartTx};
