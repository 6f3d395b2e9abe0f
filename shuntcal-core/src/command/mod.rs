//! Mode-scoped command handling
//!
//! Each mode has its own vocabulary. A line is parsed against the active
//! vocabulary only, so commands of the other mode are plain errors.

pub mod dispatch;
pub mod reply;
pub mod vocabulary;

pub use dispatch::{Dispatcher, Outcome};
pub use vocabulary::{Command, Record, Rejected};
