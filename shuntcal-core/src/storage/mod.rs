//! Persistent state
//!
//! The mode flag and the calibration record are the only state that
//! survives a power cycle.

pub mod mode;
pub mod store;

pub use mode::{Mode, ModeFlag};
pub use store::{Payload, Store, FLAG_ADDR, MAX_PAYLOAD_LEN, PAYLOAD_ADDR, STORE_WINDOW};
