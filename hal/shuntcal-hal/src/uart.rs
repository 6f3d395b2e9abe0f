//! UART serial communication abstractions
//!
//! Provides blocking traits for the serial transport that can be
//! implemented by chip-specific HALs.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Classification of a per-byte receive error
///
/// Mirrors the line status flags most USARTs latch alongside a received
/// data byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxErrorKind {
    /// Stop bit not found where expected
    Framing,
    /// Parity bit did not match
    Parity,
    /// Noise detected on the line while sampling
    Noise,
    /// A byte arrived before the previous one was read
    Overrun,
    /// Anything the peripheral reports that is not one of the above
    Other,
}

/// Receive errors that can be classified
pub trait ReadError: core::fmt::Debug {
    /// The line status this error represents
    fn kind(&self) -> RxErrorKind;
}

impl ReadError for RxErrorKind {
    fn kind(&self) -> RxErrorKind {
        *self
    }
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error: ReadError;

    /// Read a single byte from the UART
    ///
    /// Blocks until a byte is available. Line status errors latched for
    /// that byte are returned instead of the data.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Re-apply pin and peripheral configuration after a low-power wait
    ///
    /// Some parts drop pin direction or clock gating while in standby.
    fn restore_after_wake(&mut self) {}
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 9600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneShot(Option<u8>);

    impl UartRx for OneShot {
        type Error = RxErrorKind;

        fn read_byte(&mut self) -> Result<u8, Self::Error> {
            self.0.take().ok_or(RxErrorKind::Other)
        }
    }

    #[test]
    fn test_default_config_is_9600_8n1() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }

    #[test]
    fn test_error_kind_is_its_own_read_error() {
        assert_eq!(RxErrorKind::Parity.kind(), RxErrorKind::Parity);
        assert_eq!(RxErrorKind::Framing.kind(), RxErrorKind::Framing);
    }

    #[test]
    fn test_restore_after_wake_default_is_noop() {
        let mut rx = OneShot(Some(b'x'));
        rx.restore_after_wake();
        assert_eq!(rx.read_byte(), Ok(b'x'));
        assert_eq!(rx.read_byte(), Err(RxErrorKind::Other));
    }
}
