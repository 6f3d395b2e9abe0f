//! Service runner
//!
//! Single-threaded: one byte in, at most one command out. The loop is
//! standby, wake, read one byte, process it. Replies are written from the
//! same context.

use embedded_hal::delay::DelayNs;
use shuntcal_hal::{ByteStore, ReadError, RxErrorKind, Standby, UartRx, UartTx};

use super::machine::{Event, Fault, State};
use super::step::{Boot, Step};
use crate::command::{Dispatcher, Outcome};
use crate::config::DeviceConfig;
use crate::line::{Feed, LineReader};
use crate::storage::{Mode, Store};

/// Serial command service
pub struct Service<S, T, R, D> {
    store: Store<S>,
    dispatcher: Dispatcher<T, D>,
    rx: R,
    reader: LineReader,
    state: State,
}

impl<S, T, R, D> Service<S, T, R, D>
where
    S: ByteStore,
    T: UartTx,
    R: UartRx,
    D: DelayNs,
{
    /// Create a service; nothing is read until [`Service::boot`]
    pub fn new(store: Store<S>, tx: T, rx: R, delay: D, config: DeviceConfig) -> Self {
        Self {
            store,
            dispatcher: Dispatcher::new(tx, delay, config),
            rx,
            reader: LineReader::new(),
            state: State::Boot,
        }
    }

    /// Resolve the mode from the store
    ///
    /// A blank store is zero-filled and set to factory mode first. Calling
    /// this again once running reports the current mode without touching
    /// the store.
    pub fn boot(&mut self) -> Result<Boot, Fault> {
        match self.state {
            State::Halted(fault) => Err(fault),
            State::Running(mode) => Ok(Boot {
                initialized: false,
                mode,
            }),
            State::Boot => match self.store.resolve_mode() {
                Ok((mode, initialized)) => {
                    self.apply(Event::Booted(mode));
                    Ok(Boot { initialized, mode })
                }
                Err(err) => Err(self.halt(err.into())),
            },
        }
    }

    /// Process one receive result
    ///
    /// Boots first if needed. Once halted, every call returns the fault
    /// without doing anything.
    pub fn on_byte<E: ReadError>(&mut self, received: Result<u8, E>) -> Result<Step, Fault> {
        let mode = match self.state {
            State::Halted(fault) => return Err(fault),
            State::Running(mode) => mode,
            State::Boot => self.boot()?.mode,
        };

        let byte = match received {
            Ok(byte) => byte,
            Err(err) => return self.on_line_error(err.kind()),
        };

        match self.reader.feed(byte) {
            Feed::Pending => Ok(Step::Pending),
            Feed::Overflow => Ok(Step::Overflow),
            Feed::Line(line) => self.dispatch(mode, &line),
        }
    }

    /// Read one byte from the transport and process it
    pub fn poll(&mut self) -> Result<Step, Fault> {
        if let State::Halted(fault) = self.state {
            return Err(fault);
        }
        let received = self.rx.read_byte();
        self.on_byte(received)
    }

    /// Serve forever
    ///
    /// Every byte is preceded by a standby wait. `on_step` sees each
    /// processed byte. Returns only with the fault that halted the
    /// service.
    pub fn run<W, F>(&mut self, standby: &mut W, mut on_step: F) -> Fault
    where
        W: Standby,
        F: FnMut(&Step),
    {
        if let Err(fault) = self.boot() {
            return fault;
        }

        loop {
            standby.enter_standby();
            self.rx.restore_after_wake();
            match self.poll() {
                Ok(step) => on_step(&step),
                Err(fault) => return fault,
            }
        }
    }

    fn dispatch(&mut self, mode: Mode, line: &[u8]) -> Result<Step, Fault> {
        match self.dispatcher.execute(&mut self.store, mode, line) {
            Ok(Outcome::Rejected) => Ok(Step::Rejected),
            Ok(Outcome::Handled(command)) => match command.next_mode() {
                // Flag already committed by the dispatcher
                Some(next) => {
                    self.apply(Event::ModeCommitted(next));
                    Ok(Step::ModeChanged(next))
                }
                None => Ok(Step::Handled(command)),
            },
            Err(fault) => Err(self.halt(fault)),
        }
    }

    fn on_line_error(&mut self, kind: RxErrorKind) -> Result<Step, Fault> {
        let fatal = matches!(kind, RxErrorKind::Framing | RxErrorKind::Parity);
        if !(self.dispatcher.config().check_line_errors && fatal) {
            return Ok(Step::Dropped(kind));
        }

        let fault = Fault::Line(kind);
        if let Some(message) = fault.message() {
            // Halting regardless; a failed send changes nothing
            let _ = self.dispatcher.notify(message);
        }
        Err(self.halt(fault))
    }

    fn halt(&mut self, fault: Fault) -> Fault {
        self.apply(Event::FaultDetected(fault));
        fault
    }

    fn apply(&mut self, event: Event) {
        self.state = self.state.transition(event);
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Active mode, if running
    pub fn mode(&self) -> Option<Mode> {
        self.state.mode()
    }

    /// Persistent store
    pub fn store(&self) -> &Store<S> {
        &self.store
    }

    /// Mutable access to the persistent store
    pub fn store_mut(&mut self) -> &mut Store<S> {
        &mut self.store
    }

    /// Transport replies are written to
    pub fn tx(&self) -> &T {
        self.dispatcher.tx()
    }

    /// Transport bytes are read from
    pub fn rx(&self) -> &R {
        &self.rx
    }

    /// Delay provider
    pub fn delay(&self) -> &D {
        self.dispatcher.delay()
    }
}
