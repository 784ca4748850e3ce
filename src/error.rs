//! Unified error type for deskpause.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Reconfiguration
    /// Command line has no `/` separator, or starts with it.
    InvalidCommand,

    /// Both requested durations are zero.
    InvalidDurations,

    // Storage
    /// Flash read/write/erase failed.
    Storage,

    // Display
    /// GPIO write to the TM1637 bus failed.
    Display,

    // USB
    /// The serial port was disconnected or the endpoint failed.
    Serial,

    // Generic
    /// Buffer too small for the requested operation.
    BufferOverflow,
}
