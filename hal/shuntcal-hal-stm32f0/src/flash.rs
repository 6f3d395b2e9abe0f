//! Emulated EEPROM on STM32F0 flash
//!
//! The F042 has no data EEPROM. A 256-byte image is kept in RAM and the
//! last 1KB flash page holds its persistent copy: every write updates the
//! mirror, erases the page and programs the whole image back.
//!
//! Erased flash reads `0xFF`, so a never-programmed part presents a blank
//! store.

use embassy_stm32::flash::{Blocking, Flash};
use shuntcal_hal::{ByteStore, RamStore, StoreError};

/// Flash size of the STM32F042 parts
pub const FLASH_SIZE: usize = 32 * 1024;

/// Flash page size for STM32F0 series
pub const FLASH_PAGE_SIZE: usize = 1024;

/// Bytes exposed as EEPROM
pub const EEPROM_SIZE: usize = 256;

/// Offset of the page holding the image, relative to the flash base
pub const EEPROM_PAGE_OFFSET: u32 = (FLASH_SIZE - FLASH_PAGE_SIZE) as u32;

/// Flash-backed byte store
pub struct EmulatedEeprom<'d> {
    flash: Flash<'d, Blocking>,
    mirror: RamStore<EEPROM_SIZE>,
}

impl<'d> EmulatedEeprom<'d> {
    /// Load the image from flash
    pub fn new(mut flash: Flash<'d, Blocking>) -> Result<Self, StoreError> {
        let mut image = [0u8; EEPROM_SIZE];
        flash
            .blocking_read(EEPROM_PAGE_OFFSET, &mut image)
            .map_err(|_| StoreError::Device)?;

        Ok(Self {
            flash,
            mirror: RamStore::from_image(image),
        })
    }

    /// Program the mirror into the flash page
    fn commit(&mut self) -> Result<(), StoreError> {
        let end = EEPROM_PAGE_OFFSET + FLASH_PAGE_SIZE as u32;
        self.flash
            .blocking_erase(EEPROM_PAGE_OFFSET, end)
            .map_err(|_| StoreError::Device)?;
        self.flash
            .blocking_write(EEPROM_PAGE_OFFSET, self.mirror.as_bytes())
            .map_err(|_| StoreError::Device)
    }
}

impl ByteStore for EmulatedEeprom<'_> {
    fn capacity(&self) -> usize {
        EEPROM_SIZE
    }

    fn read(&mut self, addr: usize, buf: &mut [u8]) -> Result<(), StoreError> {
        self.mirror.read(addr, buf)
    }

    fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), StoreError> {
        let mut current = [0u8; EEPROM_SIZE];
        let current = current
            .get_mut(..data.len())
            .ok_or(StoreError::OutOfBounds)?;
        self.mirror.read(addr, current)?;
        if current == data {
            // Unchanged; skip the erase cycle
            return Ok(());
        }

        self.mirror.write(addr, data)?;
        self.commit()
    }
}
