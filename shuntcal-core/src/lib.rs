//! Board-agnostic core logic for the shunt calibration tag
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Persistent store layout (mode flag + calibration record)
//! - Line accumulation for the serial command line
//! - Mode-scoped command vocabulary and dispatcher
//! - Service state machine and the standby/read/dispatch loop
//! - Device profile configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod line;
pub mod service;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub use command::{Command, Dispatcher, Outcome, Rejected};
pub use config::DeviceConfig;
pub use line::{CommandLine, Feed, LineReader};
pub use service::{Boot, Fault, Service, State, Step};
pub use storage::{Mode, ModeFlag, Store};
