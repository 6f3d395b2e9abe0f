//! Per-call reports for the caller to log

use shuntcal_hal::RxErrorKind;

use crate::command::Command;
use crate::storage::Mode;

/// Result of booting the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Boot {
    /// Blank store was zero-filled and set to factory mode
    pub initialized: bool,
    /// Mode the service runs in
    pub mode: Mode,
}

/// Result of processing one received byte
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Byte buffered, line not complete
    Pending,
    /// Line outgrew the buffer and was discarded
    Overflow,
    /// Byte discarded because of a non-fatal receive error
    Dropped(RxErrorKind),
    /// Command executed without changing mode
    Handled(Command),
    /// Line rejected with `Error`
    Rejected,
    /// `FINAL` or `RESET` switched the mode
    ModeChanged(Mode),
}
