//! Fixed-layout duration record as stored in flash.
//!
//! Layout (12 bytes, little-endian):
//! ```text
//! Byte 0-3:  Signature (12345)
//! Byte 4-7:  Work interval (ms)
//! Byte 8-11: Pause interval (ms)
//! ```

use crate::controller::Durations;

/// Marks a record written by this firmware.
pub const RECORD_SIGNATURE: u32 = 12345;

/// Record size in bytes.
pub const RECORD_SIZE: usize = 12;

/// Serialise durations into a record.
pub fn encode(durations: &Durations) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    buf[0..4].copy_from_slice(&RECORD_SIGNATURE.to_le_bytes());
    buf[4..8].copy_from_slice(&durations.long_ms.to_le_bytes());
    buf[8..12].copy_from_slice(&durations.short_ms.to_le_bytes());
    buf
}

/// Parse a record. Returns `None` if it is short or the signature is wrong.
pub fn decode(data: &[u8]) -> Option<Durations> {
    if data.len() < RECORD_SIZE {
        return None;
    }
    let word = |at: usize| u32::from_le_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]]);
    if word(0) != RECORD_SIGNATURE {
        return None;
    }
    Some(Durations::new(word(4), word(8)))
}

/// Parse a record, falling back to the default durations.
///
/// The flag is `true` when the defaults were substituted.
pub fn decode_or_default(data: Option<&[u8]>) -> (Durations, bool) {
    match data.and_then(decode) {
        Some(durations) => (durations, false),
        None => (Durations::default(), true),
    }
}
