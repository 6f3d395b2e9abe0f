//! Device profile configuration
//!
//! Two firmware revisions shipped with different command vocabularies and
//! reply pacing. Both are kept as explicit profiles.

/// Command line buffer size, including the terminator
pub const LINE_CAPACITY: usize = 57;

/// Length of a calibration record line
///
/// The only line length accepted as a payload write in factory mode.
pub const RECORD_LEN: usize = LINE_CAPACITY - 1;

/// Number of times `INIT` emits the stored record
pub const INIT_REPEATS: u8 = 4;

/// Delay after each `INIT` emission
pub const INIT_INTERVAL_MS: u32 = 500;

/// Delay after each reply on the polled revision
pub const RESPONSE_PACING_MS: u32 = 500;

/// Behavioural profile of the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    /// Accept `MODE` in both modes
    ///
    /// When false, `MODE` is rejected with `Error` in factory and
    /// customer mode alike.
    pub mode_query: bool,
    /// Delay after every reply except `INIT` (0 = none)
    pub response_pacing_ms: u32,
    /// How many times `INIT` emits the record
    pub init_repeats: u8,
    /// Delay after each `INIT` emission
    pub init_interval_ms: u32,
    /// Treat framing and parity errors as fatal
    ///
    /// When false, bytes with receive errors are discarded and
    /// accumulation continues.
    pub check_line_errors: bool,
}

impl DeviceConfig {
    /// Interrupt-driven revision: `MODE` in both modes, no pacing,
    /// no line error checks
    pub const fn interrupt_driven() -> Self {
        Self {
            mode_query: true,
            response_pacing_ms: 0,
            init_repeats: INIT_REPEATS,
            init_interval_ms: INIT_INTERVAL_MS,
            check_line_errors: false,
        }
    }

    /// Polled revision: no `MODE` in either mode, paced replies, fatal
    /// line errors
    pub const fn polled() -> Self {
        Self {
            mode_query: false,
            response_pacing_ms: RESPONSE_PACING_MS,
            init_repeats: INIT_REPEATS,
            init_interval_ms: INIT_INTERVAL_MS,
            check_line_errors: true,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::interrupt_driven()
    }
}
