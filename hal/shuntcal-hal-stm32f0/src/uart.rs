//! USART transport for STM32F0
//!
//! Wraps the embassy-stm32 blocking USART halves in the `shuntcal-hal`
//! transport traits.

use embassy_stm32::mode::Blocking;
use embassy_stm32::pac::usart::Usart;
use embassy_stm32::usart::{self, Error as UsartError};
use shuntcal_hal::uart::{DataBits, Parity, StopBits, UartConfig};
use shuntcal_hal::{ReadError, RxErrorKind, UartRx, UartTx};

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Framing error
    Framing,
    /// Noise error
    Noise,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
    /// Other error
    Other,
}

impl From<UsartError> for UartBusError {
    fn from(e: UsartError) -> Self {
        match e {
            UsartError::Framing => UartBusError::Framing,
            UsartError::Noise => UartBusError::Noise,
            UsartError::Overrun => UartBusError::Overrun,
            UsartError::Parity => UartBusError::Parity,
            _ => UartBusError::Other,
        }
    }
}

impl ReadError for UartBusError {
    fn kind(&self) -> RxErrorKind {
        match self {
            UartBusError::Framing => RxErrorKind::Framing,
            UartBusError::Noise => RxErrorKind::Noise,
            UartBusError::Overrun => RxErrorKind::Overrun,
            UartBusError::Parity => RxErrorKind::Parity,
            UartBusError::Other => RxErrorKind::Other,
        }
    }
}

/// Build the embassy USART configuration for a transport configuration
pub fn usart_config(config: &UartConfig) -> usart::Config {
    let mut out = usart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Seven => usart::DataBits::DataBits7,
        DataBits::Eight => usart::DataBits::DataBits8,
        DataBits::Nine => usart::DataBits::DataBits9,
    };
    out.parity = match config.parity {
        Parity::None => usart::Parity::ParityNone,
        Parity::Even => usart::Parity::ParityEven,
        Parity::Odd => usart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => usart::StopBits::STOP1,
        StopBits::Two => usart::StopBits::STOP2,
    };
    out
}

/// Transmit half
pub struct SerialTx<'d> {
    inner: usart::UartTx<'d, Blocking>,
}

impl<'d> SerialTx<'d> {
    pub fn new(inner: usart::UartTx<'d, Blocking>) -> Self {
        Self { inner }
    }
}

impl UartTx for SerialTx<'_> {
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.blocking_write(data).map_err(Into::into)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.blocking_flush().map_err(Into::into)
    }
}

/// Receive half
///
/// The driver returns a latched framing, noise, overrun or parity flag as
/// an error and clears it, but leaves the received byte in RDR with RXNE
/// set. That byte is read out and discarded here, so an error replaces
/// the byte instead of preceding it.
pub struct SerialRx<'d> {
    inner: usart::UartRx<'d, Blocking>,
    regs: Usart,
}

impl<'d> SerialRx<'d> {
    /// `regs` must be the USART `inner` was split from
    pub fn new(inner: usart::UartRx<'d, Blocking>, regs: Usart) -> Self {
        Self { inner, regs }
    }

    fn discard_pending(&self) {
        if self.regs.isr().read().rxne() {
            let _ = self.regs.rdr().read();
        }
    }
}

impl UartRx for SerialRx<'_> {
    type Error = UartBusError;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        if let Err(e) = self.inner.blocking_read(&mut buf) {
            self.discard_pending();
            return Err(e.into());
        }
        Ok(buf[0])
    }
}
