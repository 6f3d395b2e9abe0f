//! Command vocabularies
//!
//! | Factory          | Customer               |
//! |------------------|------------------------|
//! | `INIT`           | `info`                 |
//! | `FINAL`          | `RESET`                |
//! | `LOG`            | `LOG`                  |
//! | `MODE` (gated)   | `MODE` (gated)         |
//! | 56-byte record   |                        |
//!
//! `MODE` is accepted only when the profile enables the mode query.

use heapless::Vec;

use crate::config::RECORD_LEN;
use crate::storage::Mode;

/// A calibration record line
pub type Record = Vec<u8, RECORD_LEN>;

/// Line did not match the active vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rejected;

/// Parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Emit the record repeatedly for verification (factory)
    Init,
    /// Switch to customer mode (factory)
    Final,
    /// Dump stored bytes with their addresses (both)
    Log,
    /// Report the current mode (both, where enabled)
    Mode,
    /// Emit the record (customer)
    Info,
    /// Switch back to factory mode (customer)
    Reset,
    /// Store a new record (factory)
    WritePayload(Record),
}

impl Command {
    /// Parse a line against the vocabulary of `mode`
    ///
    /// The line is read as a C string: anything after an embedded NUL
    /// is ignored. `mode_query` enables `MODE` in both modes.
    pub fn parse(line: &[u8], mode: Mode, mode_query: bool) -> Result<Self, Rejected> {
        let text = until_nul(line);
        if text == b"MODE" {
            return if mode_query {
                Ok(Command::Mode)
            } else {
                Err(Rejected)
            };
        }
        match mode {
            Mode::Factory => Self::parse_factory(text),
            Mode::Customer => Self::parse_customer(text),
        }
    }

    fn parse_factory(text: &[u8]) -> Result<Self, Rejected> {
        match text {
            b"INIT" => Ok(Command::Init),
            b"FINAL" => Ok(Command::Final),
            b"LOG" => Ok(Command::Log),
            record if record.len() == RECORD_LEN => Vec::from_slice(record)
                .map(Command::WritePayload)
                .map_err(|_| Rejected),
            _ => Err(Rejected),
        }
    }

    fn parse_customer(text: &[u8]) -> Result<Self, Rejected> {
        match text {
            b"info" => Ok(Command::Info),
            b"RESET" => Ok(Command::Reset),
            b"LOG" => Ok(Command::Log),
            _ => Err(Rejected),
        }
    }

    /// Mode the device is in after this command succeeds, if it changes
    pub fn next_mode(&self) -> Option<Mode> {
        match self {
            Command::Final => Some(Mode::Customer),
            Command::Reset => Some(Mode::Factory),
            _ => None,
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Init => "INIT",
            Command::Final => "FINAL",
            Command::Log => "LOG",
            Command::Mode => "MODE",
            Command::Info => "info",
            Command::Reset => "RESET",
            Command::WritePayload(_) => "<record>",
        }
    }
}

fn until_nul(line: &[u8]) -> &[u8] {
    match line.iter().position(|&b| b == 0) {
        Some(end) => &line[..end],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WITH: bool = true;
    const WITHOUT: bool = false;
    const RECORD: &[u8] = b"2024032600001R24680n-0.000000349+0.000124909+0.996664588";

    #[test]
    fn test_factory_keywords() {
        let cases: [(&[u8], Command); 4] = [
            (&b"INIT"[..], Command::Init),
            (&b"FINAL"[..], Command::Final),
            (&b"LOG"[..], Command::Log),
            (&b"MODE"[..], Command::Mode),
        ];
        for (line, expected) in cases {
            assert_eq!(Command::parse(line, Mode::Factory, WITH), Ok(expected));
        }
    }

    #[test]
    fn test_customer_keywords() {
        let cases: [(&[u8], Command); 4] = [
            (&b"info"[..], Command::Info),
            (&b"RESET"[..], Command::Reset),
            (&b"LOG"[..], Command::Log),
            (&b"MODE"[..], Command::Mode),
        ];
        for (line, expected) in cases {
            assert_eq!(Command::parse(line, Mode::Customer, WITH), Ok(expected));
        }
    }

    #[test]
    fn test_customer_mode_query_is_profile_gated() {
        assert_eq!(Command::parse(b"MODE", Mode::Customer, WITHOUT), Err(Rejected));
        assert_eq!(Command::parse(b"info", Mode::Customer, WITHOUT), Ok(Command::Info));
    }

    #[test]
    fn test_factory_mode_query_is_profile_gated() {
        assert_eq!(Command::parse(b"MODE", Mode::Factory, WITHOUT), Err(Rejected));
        for (line, expected) in [
            (&b"INIT"[..], Command::Init),
            (b"FINAL", Command::Final),
            (b"LOG", Command::Log),
        ] {
            assert_eq!(Command::parse(line, Mode::Factory, WITHOUT), Ok(expected));
        }
        assert!(matches!(
            Command::parse(RECORD, Mode::Factory, WITHOUT),
            Ok(Command::WritePayload(_))
        ));
    }

    #[test]
    fn test_other_mode_keywords_rejected() {
        for line in [&b"info"[..], b"RESET"] {
            assert_eq!(Command::parse(line, Mode::Factory, WITH), Err(Rejected));
        }
        for line in [&b"INIT"[..], b"FINAL"] {
            assert_eq!(Command::parse(line, Mode::Customer, WITH), Err(Rejected));
        }
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(Command::parse(b"init", Mode::Factory, WITH), Err(Rejected));
        assert_eq!(Command::parse(b"INFO", Mode::Customer, WITH), Err(Rejected));
        assert_eq!(Command::parse(b"LOG ", Mode::Factory, WITH), Err(Rejected));
    }

    #[test]
    fn test_record_accepted_only_at_exact_length() {
        assert_eq!(RECORD.len(), RECORD_LEN);
        match Command::parse(RECORD, Mode::Factory, WITH) {
            Ok(Command::WritePayload(record)) => assert_eq!(record.as_slice(), RECORD),
            other => panic!("Expected WritePayload, got {:?}", other),
        }

        assert_eq!(
            Command::parse(&RECORD[..RECORD_LEN - 1], Mode::Factory, WITH),
            Err(Rejected)
        );
        assert_eq!(Command::parse(b"", Mode::Factory, WITH), Err(Rejected));
    }

    #[test]
    fn test_record_not_accepted_in_customer_mode() {
        assert_eq!(Command::parse(RECORD, Mode::Customer, WITH), Err(Rejected));
    }

    #[test]
    fn test_embedded_nul_truncates_line() {
        assert_eq!(Command::parse(b"LOG\0junk", Mode::Factory, WITH), Ok(Command::Log));

        let mut padded = [b'x'; RECORD_LEN];
        padded[10] = 0;
        assert_eq!(Command::parse(&padded, Mode::Factory, WITH), Err(Rejected));
    }

    #[test]
    fn test_next_mode() {
        assert_eq!(Command::Final.next_mode(), Some(Mode::Customer));
        assert_eq!(Command::Reset.next_mode(), Some(Mode::Factory));
        assert_eq!(Command::Log.next_mode(), None);
        assert_eq!(Command::Init.next_mode(), None);
    }
}
