//! Serial command service
//!
//! Owns the store, the transport and the line reader, and turns received
//! bytes into replies. The state machine is explicit: the service is
//! booting, running in one mode, or halted on a fatal fault.

pub mod machine;
pub mod runner;
pub mod step;

pub use machine::{Event, Fault, State};
pub use runner::Service;
pub use step::{Boot, Step};
