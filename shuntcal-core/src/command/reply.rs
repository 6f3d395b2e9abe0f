//! Reply texts and number rendering

/// Reply to any line the active vocabulary rejects
pub const ERROR: &[u8] = b"Error\n";

/// Reply to `FINAL`
pub const ENTERED_CUSTOMER: &[u8] =
    b"Entered customer mode. Disconnect and reconnect, then input 'info' for shunt characteristics. \n";

/// Reply to `RESET`
pub const RESET_TO_FACTORY: &[u8] =
    b"Reset to factory mode. Disconnect and reconnect, then refer to documentation for instructions. \n";

/// Header of the `LOG` dump
pub const LOG_HEADER: &[u8] = b"Current bytes & respective positions: \n";

/// Sent before halting on a parity error
pub const PARITY_ERROR: &[u8] = b"USART Error: Parity\n";

/// Sent before halting on a framing error
pub const FRAMING_ERROR: &[u8] = b"USART Error: Frame\n";

/// Maximum digits of a `u16`
const MAX_DIGITS: usize = 5;

/// Decimal rendering of a number, most significant digit first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decimal {
    digits: [u8; MAX_DIGITS],
    len: usize,
}

impl Decimal {
    /// Render `value`
    ///
    /// Digits are produced least significant first onto a stack and
    /// popped into place.
    pub fn new(mut value: u16) -> Self {
        let mut stack = [0u8; MAX_DIGITS];
        let mut depth = 0;
        loop {
            stack[depth] = b'0' + (value % 10) as u8;
            depth += 1;
            value /= 10;
            if value == 0 {
                break;
            }
        }

        let len = depth;
        let mut digits = [0u8; MAX_DIGITS];
        for slot in digits.iter_mut().take(len) {
            depth -= 1;
            *slot = stack[depth];
        }

        Self { digits, len }
    }

    /// ASCII digits
    pub fn as_bytes(&self) -> &[u8] {
        &self.digits[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_digit() {
        assert_eq!(Decimal::new(0).as_bytes(), b"0");
        assert_eq!(Decimal::new(7).as_bytes(), b"7");
    }

    #[test]
    fn test_most_significant_digit_first() {
        assert_eq!(Decimal::new(10).as_bytes(), b"10");
        assert_eq!(Decimal::new(56).as_bytes(), b"56");
        assert_eq!(Decimal::new(255).as_bytes(), b"255");
        assert_eq!(Decimal::new(1002).as_bytes(), b"1002");
    }

    #[test]
    fn test_max_value() {
        assert_eq!(Decimal::new(u16::MAX).as_bytes(), b"65535");
    }

    #[test]
    fn test_texts_are_newline_terminated() {
        for text in [
            ERROR,
            ENTERED_CUSTOMER,
            RESET_TO_FACTORY,
            LOG_HEADER,
            PARITY_ERROR,
            FRAMING_ERROR,
        ] {
            assert_eq!(text.last(), Some(&b'\n'));
        }
    }
}
