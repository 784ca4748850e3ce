//! Serial reconfiguration command: `WORK/PAUSE` in minutes, e.g. `30/5`.

use heapless::Vec;

use crate::controller::Durations;
use crate::error::Error;

/// Reply to any line that is not a valid command.
pub const USAGE_HINT: &str = "To set new duration, send WORK/PAUSE in minutes. E.g. 30/5";

/// Greeting printed when a terminal opens the port.
pub const BANNER: &str = "Starting Desk Pause Counter";

/// Prefix of the confirmation line; followed by `Durations` as `long/short`.
pub const DURATIONS_PREFIX: &str = "New durations in milliseconds WORK/PAUSE ";

/// Parse one command line into durations.
///
/// The separator must be present and not the first character. Each side is
/// read like C `atol`: leading digits count, anything else reads as zero.
pub fn parse_durations(line: &str) -> Result<Durations, Error> {
    let line = line.trim();
    let slash = match line.find('/') {
        Some(0) | None => return Err(Error::InvalidCommand),
        Some(index) => index,
    };

    let long_min = parse_minutes(&line[..slash]);
    let short_min = parse_minutes(&line[slash + 1..]);
    Durations::from_minutes(long_min, short_min).validate()
}

/// Leading-integer parse. Negative numbers clamp to zero, overflow saturates.
fn parse_minutes(text: &str) -> u32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: u32 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(u32::from(b - b'0'));
    }

    if negative {
        0
    } else {
        value
    }
}

/// Assembles serial bytes into command lines.
///
/// Either `\r` or `\n` ends a line, so CR-only, LF-only and CRLF terminals
/// all work. Empty lines are skipped. A line longer than `N` bytes is
/// reported as [`Error::BufferOverflow`] once its terminator arrives.
pub struct LineBuffer<const N: usize> {
    line: Vec<u8, N>,
    overflow: bool,
}

impl<const N: usize> LineBuffer<N> {
    pub const fn new() -> Self {
        Self {
            line: Vec::new(),
            overflow: false,
        }
    }

    /// Feed one byte; returns the parsed command when it completes a line.
    pub fn push(&mut self, byte: u8) -> Option<Result<Durations, Error>> {
        if byte == b'\r' || byte == b'\n' {
            return self.flush();
        }
        if self.line.push(byte).is_err() {
            self.overflow = true;
        }
        None
    }

    /// End the pending line without a terminator, e.g. after an idle timeout.
    pub fn flush(&mut self) -> Option<Result<Durations, Error>> {
        if self.line.is_empty() && !self.overflow {
            return None;
        }

        let parsed = if self.overflow {
            Err(Error::BufferOverflow)
        } else {
            core::str::from_utf8(&self.line)
                .map_err(|_| Error::InvalidCommand)
                .and_then(parse_durations)
        };
        self.line.clear();
        self.overflow = false;
        Some(parsed)
    }
}

impl<const N: usize> Default for LineBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
