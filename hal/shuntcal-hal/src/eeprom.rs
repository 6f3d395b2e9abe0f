//! Byte-addressed persistent storage abstractions
//!
//! Models a small EEPROM (or an emulation of one): every cell is
//! individually addressable and survives power loss.

/// Value of an erased cell
///
/// A store that has never been written reads back this value everywhere.
pub const BLANK_BYTE: u8 = 0xFF;

/// Errors from persistent store operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Access outside the store region
    OutOfBounds,
    /// The store region is too small for the record layout
    TooSmall,
    /// Payload does not fit the payload region
    PayloadTooLong,
    /// The underlying device failed to read, erase or program
    Device,
}

/// Byte-addressed persistent store
///
/// Implementations commit writes before returning. There is no journal:
/// a write interrupted by power loss may leave the region partially updated.
pub trait ByteStore {
    /// Size of the store region in bytes
    fn capacity(&self) -> usize;

    /// Read `buf.len()` bytes starting at `addr`
    fn read(&mut self, addr: usize, buf: &mut [u8]) -> Result<(), StoreError>;

    /// Write `data` starting at `addr`
    fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), StoreError>;

    /// Read a single byte
    fn read_byte(&mut self, addr: usize) -> Result<u8, StoreError> {
        let mut buf = [0u8; 1];
        self.read(addr, &mut buf)?;
        Ok(buf[0])
    }

    /// Write a single byte
    fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), StoreError> {
        self.write(addr, &[value])
    }
}

/// In-memory byte store
///
/// Starts out blank, like a factory-fresh EEPROM. Used as the RAM mirror of
/// flash-backed emulations and as a host-side stand-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RamStore<const N: usize> {
    cells: [u8; N],
}

impl<const N: usize> Default for RamStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RamStore<N> {
    /// Create a blank store
    pub const fn new() -> Self {
        Self {
            cells: [BLANK_BYTE; N],
        }
    }

    /// Create a store from an existing image
    pub const fn from_image(cells: [u8; N]) -> Self {
        Self { cells }
    }

    /// The whole region
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.cells
    }

    fn range(addr: usize, len: usize) -> Result<core::ops::Range<usize>, StoreError> {
        let end = addr.checked_add(len).ok_or(StoreError::OutOfBounds)?;
        if end > N {
            return Err(StoreError::OutOfBounds);
        }
        Ok(addr..end)
    }
}

impl<const N: usize> ByteStore for RamStore<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn read(&mut self, addr: usize, buf: &mut [u8]) -> Result<(), StoreError> {
        let range = Self::range(addr, buf.len())?;
        buf.copy_from_slice(&self.cells[range]);
        Ok(())
    }

    fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), StoreError> {
        let range = Self::range(addr, data.len())?;
        self.cells[range].copy_from_slice(data);
        Ok(())
    }
}
