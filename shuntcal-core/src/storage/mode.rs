//! Operating mode and its persisted flag byte

use shuntcal_hal::BLANK_BYTE;

/// Flag byte for factory mode
pub const FLAG_FACTORY: u8 = 0x00;

/// Flag byte for customer mode
pub const FLAG_CUSTOMER: u8 = 0x01;

/// Operating mode
///
/// Selects which command vocabulary is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Configuration mode: record can be written and verified
    Factory,
    /// Read-only mode: record can only be queried
    Customer,
}

impl Mode {
    /// Label sent in reply to `MODE`
    pub fn label(self) -> &'static [u8] {
        match self {
            Mode::Factory => b"Factory Mode\n",
            Mode::Customer => b"Customer Mode\n",
        }
    }
}

/// Mode flag as stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeFlag {
    /// Blank store, never initialized
    Uninitialized,
    Factory,
    Customer,
}

impl ModeFlag {
    /// Decode a flag byte
    ///
    /// Only `0x01` means customer mode; any other non-blank value is
    /// treated as factory mode.
    pub fn from_byte(value: u8) -> Self {
        match value {
            BLANK_BYTE => ModeFlag::Uninitialized,
            FLAG_CUSTOMER => ModeFlag::Customer,
            _ => ModeFlag::Factory,
        }
    }

    /// The resolved mode, if the store has been initialized
    pub fn mode(self) -> Option<Mode> {
        match self {
            ModeFlag::Uninitialized => None,
            ModeFlag::Factory => Some(Mode::Factory),
            ModeFlag::Customer => Some(Mode::Customer),
        }
    }
}

impl From<Mode> for ModeFlag {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Factory => ModeFlag::Factory,
            Mode::Customer => ModeFlag::Customer,
        }
    }
}

impl From<Mode> for u8 {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Factory => FLAG_FACTORY,
            Mode::Customer => FLAG_CUSTOMER,
        }
    }
}
