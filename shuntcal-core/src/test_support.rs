//! Host-side mocks for the hardware collaborators

use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use shuntcal_hal::{RamStore, RxErrorKind, Standby, UartRx, UartTx};

use crate::storage::{Mode, Store};

/// Calibration record used throughout the tests
pub const RECORD: &[u8] = b"2024032600001R24680n-0.000000349+0.000124909+0.996664588";

/// Blank 256-byte store
pub fn blank_store() -> Store<RamStore<256>> {
    Store::new(RamStore::new()).unwrap()
}

/// Initialized store with the flag set to `mode`
pub fn store_in_mode(mode: Mode) -> Store<RamStore<256>> {
    let mut store = blank_store();
    store.initialize().unwrap();
    store.write_flag(mode).unwrap();
    store
}

/// Receiver that replays a fixed script
///
/// Panics once the script runs out.
#[derive(Debug, Default)]
pub struct ScriptedRx {
    script: VecDeque<Result<u8, RxErrorKind>>,
    wakes: usize,
}

impl ScriptedRx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.script.extend(bytes.iter().map(|&b| Ok(b)));
    }

    pub fn push_error(&mut self, kind: RxErrorKind) {
        self.script.push_back(Err(kind));
    }

    /// Number of `restore_after_wake` calls
    pub fn wakes(&self) -> usize {
        self.wakes
    }
}

impl UartRx for ScriptedRx {
    type Error = RxErrorKind;

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        self.script.pop_front().expect("receive script exhausted")
    }

    fn restore_after_wake(&mut self) {
        self.wakes += 1;
    }
}

/// Transmitter that records everything written
#[derive(Debug, Default)]
pub struct CaptureTx {
    output: Vec<u8>,
    flushes: usize,
    /// Fail every write with `()` when set
    pub fail_writes: bool,
}

impl CaptureTx {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl UartTx for CaptureTx {
    type Error = ();

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(());
        }
        self.output.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

/// Delay that returns immediately and records what was asked for
#[derive(Debug, Default)]
pub struct RecordingDelay {
    ms: Vec<u32>,
    total_ns: u64,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `delay_ms` argument, in order
    pub fn ms_calls(&self) -> &[u32] {
        &self.ms
    }

    /// Sum of all requested delays
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

/// Standby that returns at once and counts entries
#[derive(Debug, Default)]
pub struct CountingStandby {
    entries: usize,
}

impl CountingStandby {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> usize {
        self.entries
    }
}

impl Standby for CountingStandby {
    fn enter_standby(&mut self) {
        self.entries += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_delay_totals() {
        let mut delay = RecordingDelay::new();
        delay.delay_ms(2);
        delay.delay_us(3);
        assert_eq!(delay.ms_calls(), &[2]);
        assert_eq!(delay.total_ns(), 2_003_000);
    }

    #[test]
    fn test_scripted_rx_replays_in_order() {
        let mut rx = ScriptedRx::new();
        rx.push_bytes(b"ab");
        rx.push_error(RxErrorKind::Noise);
        assert_eq!(rx.read_byte(), Ok(b'a'));
        assert_eq!(rx.read_byte(), Ok(b'b'));
        assert_eq!(rx.read_byte(), Err(RxErrorKind::Noise));
    }
}
