//! Service state machine

use shuntcal_hal::{RxErrorKind, StoreError};

use crate::command::reply;
use crate::storage::Mode;

/// Service states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Store not read yet
    Boot,
    /// Accepting commands of one mode
    Running(Mode),
    /// Fatal fault; nothing is processed any more
    Halted(Fault),
}

/// Fatal faults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fault {
    /// Persistent store failed
    Store(StoreError),
    /// Reply could not be sent
    Transmit,
    /// Line error on receive (framing or parity)
    Line(RxErrorKind),
}

impl Fault {
    /// Message sent to the peer before halting, if any
    pub fn message(&self) -> Option<&'static [u8]> {
        match self {
            Fault::Line(RxErrorKind::Parity) => Some(reply::PARITY_ERROR),
            Fault::Line(RxErrorKind::Framing) => Some(reply::FRAMING_ERROR),
            _ => None,
        }
    }
}

impl From<StoreError> for Fault {
    fn from(err: StoreError) -> Self {
        Fault::Store(err)
    }
}

/// Events that trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Flag read (and store initialized if needed)
    Booted(Mode),
    /// `FINAL` or `RESET` committed the new flag
    ModeCommitted(Mode),
    /// Fatal fault detected
    FaultDetected(Fault),
}

impl State {
    /// Check if commands are being accepted
    pub fn is_running(&self) -> bool {
        matches!(self, State::Running(_))
    }

    /// Check if the service has halted
    pub fn is_halted(&self) -> bool {
        matches!(self, State::Halted(_))
    }

    /// Active mode, if running
    pub fn mode(&self) -> Option<Mode> {
        match self {
            State::Running(mode) => Some(*mode),
            _ => None,
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Boot, Booted(mode)) => Running(mode),
            (Running(_), ModeCommitted(mode)) => Running(mode),

            // Halted is terminal; the first fault wins
            (Halted(_), _) => self,
            (_, FaultDetected(fault)) => Halted(fault),

            _ => self,
        }
    }
}
