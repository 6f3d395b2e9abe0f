//! Persistent store wrapper
//!
//! Layout of the byte-addressed store:
//!
//! ```text
//! ┌──────┬──────────────────────────────────────┐
//! │ 0    │ mode flag (00 factory, 01 customer,  │
//! │      │            FF blank)                 │
//! ├──────┼──────────────────────────────────────┤
//! │ 1..N │ NUL-terminated calibration record    │
//! └──────┴──────────────────────────────────────┘
//! ```

use heapless::Vec;
use shuntcal_hal::{ByteStore, StoreError};

use super::mode::{Mode, ModeFlag};
use crate::config::RECORD_LEN;

/// Address of the mode flag byte
pub const FLAG_ADDR: usize = 0;

/// Address of the first payload byte
pub const PAYLOAD_ADDR: usize = 1;

/// Largest region the wrapper addresses
///
/// Bigger stores only expose their first `STORE_WINDOW` bytes.
pub const STORE_WINDOW: usize = 256;

/// Largest payload that can be read back (region without terminator space)
pub const MAX_PAYLOAD_LEN: usize = STORE_WINDOW - PAYLOAD_ADDR;

/// Payload as read from the store, without terminator
pub type Payload = Vec<u8, MAX_PAYLOAD_LEN>;

/// Narrow interface over the raw store
pub struct Store<S> {
    backend: S,
    window: usize,
}

impl<S: ByteStore> Store<S> {
    /// Wrap a store
    ///
    /// Fails if the store cannot hold a flag byte, a full record and its
    /// terminator.
    pub fn new(backend: S) -> Result<Self, StoreError> {
        let window = backend.capacity().min(STORE_WINDOW);
        if window < PAYLOAD_ADDR + RECORD_LEN + 1 {
            return Err(StoreError::TooSmall);
        }
        Ok(Self { backend, window })
    }

    /// Bytes available to the payload, terminator included
    pub fn payload_capacity(&self) -> usize {
        self.window - PAYLOAD_ADDR
    }

    /// Read the mode flag
    pub fn read_flag(&mut self) -> Result<ModeFlag, StoreError> {
        self.backend.read_byte(FLAG_ADDR).map(ModeFlag::from_byte)
    }

    /// Write the mode flag
    pub fn write_flag(&mut self, mode: Mode) -> Result<(), StoreError> {
        self.backend.write_byte(FLAG_ADDR, mode.into())
    }

    /// Read the payload up to its terminator
    ///
    /// If no terminator is present the whole payload region is returned.
    pub fn read_payload(&mut self) -> Result<Payload, StoreError> {
        let mut region = [0u8; MAX_PAYLOAD_LEN];
        let region = &mut region[..self.payload_capacity()];
        self.backend.read(PAYLOAD_ADDR, region)?;

        let len = region.iter().position(|&b| b == 0).unwrap_or(region.len());
        // len <= MAX_PAYLOAD_LEN by construction
        Vec::from_slice(&region[..len]).map_err(|_| StoreError::OutOfBounds)
    }

    /// Stored payload bytes paired with their absolute addresses
    pub fn payload_cells(&mut self) -> Result<impl Iterator<Item = (usize, u8)>, StoreError> {
        let payload = self.read_payload()?;
        Ok(payload
            .into_iter()
            .enumerate()
            .map(|(offset, byte)| (PAYLOAD_ADDR + offset, byte)))
    }

    /// Overwrite the payload with `bytes` and a terminator
    ///
    /// Bytes after the terminator keep their old values.
    pub fn write_payload(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        if bytes.len() >= self.payload_capacity() {
            return Err(StoreError::PayloadTooLong);
        }

        let mut image: Vec<u8, MAX_PAYLOAD_LEN> = Vec::new();
        image
            .extend_from_slice(bytes)
            .map_err(|_| StoreError::PayloadTooLong)?;
        image.push(0).map_err(|_| StoreError::PayloadTooLong)?;

        self.backend.write(PAYLOAD_ADDR, &image)
    }

    /// Zero-fill the whole region, then mark it as factory mode
    pub fn initialize(&mut self) -> Result<(), StoreError> {
        let zeros = [0u8; STORE_WINDOW];
        self.backend.write(0, &zeros[..self.window])?;
        self.write_flag(Mode::Factory)
    }

    /// Read the flag, initializing a blank store first
    ///
    /// Returns the mode and whether initialization happened.
    pub fn resolve_mode(&mut self) -> Result<(Mode, bool), StoreError> {
        match self.read_flag()?.mode() {
            Some(mode) => Ok((mode, false)),
            None => {
                self.initialize()?;
                Ok((Mode::Factory, true))
            }
        }
    }

    /// Access the underlying store
    pub fn backend(&self) -> &S {
        &self.backend
    }
}
