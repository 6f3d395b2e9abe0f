//! Power management abstractions

/// Low-power wait for transport activity
///
/// Wake is purely event driven: there is no timer source, so an
/// implementation returns only once a received byte is pending.
pub trait Standby {
    /// Enter standby and return after transport activity
    fn enter_standby(&mut self);
}
