//! Command dispatcher
//!
//! Executes one parsed line against the store and writes the reply to
//! the transport. Both modes share this code; only the vocabulary the
//! line is parsed against differs.

use embedded_hal::delay::DelayNs;
use shuntcal_hal::{ByteStore, UartTx};

use super::reply::{self, Decimal};
use super::vocabulary::Command;
use crate::config::DeviceConfig;
use crate::service::Fault;
use crate::storage::{Mode, Store};

/// Result of dispatching one line
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Command executed
    Handled(Command),
    /// Line not in the active vocabulary; `Error` sent, nothing changed
    Rejected,
}

/// Executes commands for the active mode
pub struct Dispatcher<T, D> {
    tx: T,
    delay: D,
    config: DeviceConfig,
}

impl<T: UartTx, D: DelayNs> Dispatcher<T, D> {
    /// Create a dispatcher writing replies to `tx`
    pub fn new(tx: T, delay: D, config: DeviceConfig) -> Self {
        Self { tx, delay, config }
    }

    /// Parse `line` against the vocabulary of `mode` and execute it
    pub fn execute<S: ByteStore>(
        &mut self,
        store: &mut Store<S>,
        mode: Mode,
        line: &[u8],
    ) -> Result<Outcome, Fault> {
        let command = match Command::parse(line, mode, self.config.mode_query) {
            Ok(command) => command,
            Err(_) => {
                self.send(reply::ERROR)?;
                self.pace();
                return Ok(Outcome::Rejected);
            }
        };

        match &command {
            Command::Init => {
                // Paces itself; no extra reply delay
                for _ in 0..self.config.init_repeats {
                    self.emit_payload(store)?;
                    self.delay.delay_ms(self.config.init_interval_ms);
                }
                return Ok(Outcome::Handled(command));
            }
            Command::Final => {
                store.write_flag(Mode::Customer)?;
                self.send(reply::ENTERED_CUSTOMER)?;
            }
            Command::Reset => {
                store.write_flag(Mode::Factory)?;
                self.send(reply::RESET_TO_FACTORY)?;
            }
            Command::Log => {
                self.send(reply::LOG_HEADER)?;
                self.dump_payload(store)?;
            }
            Command::Mode => self.send(mode.label())?,
            Command::Info => self.emit_payload(store)?,
            Command::WritePayload(record) => {
                self.send(record)?;
                self.send(b"\n")?;
                store.write_payload(record)?;
            }
        }

        self.pace();
        Ok(Outcome::Handled(command))
    }

    /// Send the stored payload followed by a newline
    fn emit_payload<S: ByteStore>(&mut self, store: &mut Store<S>) -> Result<(), Fault> {
        let payload = store.read_payload()?;
        self.send(&payload)?;
        self.send(b"\n")
    }

    /// Send one `EEPROM[addr]; byte` line per stored payload byte
    fn dump_payload<S: ByteStore>(&mut self, store: &mut Store<S>) -> Result<(), Fault> {
        for (addr, byte) in store.payload_cells()? {
            let addr = Decimal::new(addr as u16);
            self.send(b"EEPROM[")?;
            self.send(addr.as_bytes())?;
            self.send(b"]; ")?;
            self.send(&[byte, b'\n'])?;
        }
        self.send(b"\n")
    }

    fn send(&mut self, data: &[u8]) -> Result<(), Fault> {
        self.tx.write_blocking(data).map_err(|_| Fault::Transmit)
    }

    fn pace(&mut self) {
        if self.config.response_pacing_ms > 0 {
            self.delay.delay_ms(self.config.response_pacing_ms);
        }
    }

    /// Send a message outside of command handling
    pub fn notify(&mut self, message: &[u8]) -> Result<(), Fault> {
        self.send(message)?;
        self.tx.flush().map_err(|_| Fault::Transmit)
    }

    /// Transport replies are written to
    pub fn tx(&self) -> &T {
        &self.tx
    }

    /// Mutable access to the transport
    pub fn tx_mut(&mut self) -> &mut T {
        &mut self.tx
    }

    /// Delay provider
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Active profile
    pub(crate) fn config(&self) -> &DeviceConfig {
        &self.config
    }
}
