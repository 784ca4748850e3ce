//! 7-segment encoding for the TM1637 4-digit display.
//!
//! Bit layout per digit:
//! ```text
//!      A           bit 0 = A, bit 1 = B, bit 2 = C, bit 3 = D,
//!    F   B         bit 4 = E, bit 5 = F, bit 6 = G,
//!      G           bit 7 = colon (digit 1 only on 4-digit clock modules)
//!    E   C
//!      D
//! ```

use crate::display::projection::{Frame, Glyph};

pub const SEG_A: u8 = 0b0000_0001;
pub const SEG_B: u8 = 0b0000_0010;
pub const SEG_C: u8 = 0b0000_0100;
pub const SEG_D: u8 = 0b0000_1000;
pub const SEG_E: u8 = 0b0001_0000;
pub const SEG_F: u8 = 0b0010_0000;
pub const SEG_G: u8 = 0b0100_0000;
pub const SEG_COLON: u8 = 0b1000_0000;

/// Digits 0-9.
pub const DIGITS: [u8; 10] = [
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
    SEG_B | SEG_C,
    SEG_A | SEG_B | SEG_D | SEG_E | SEG_G,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_G,
    SEG_B | SEG_C | SEG_F | SEG_G,
    SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
    SEG_A | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
    SEG_A | SEG_B | SEG_C,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F | SEG_G,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_F | SEG_G,
];

/// "PAUS"
pub const PAUSE: [u8; 4] = [
    SEG_A | SEG_B | SEG_E | SEG_F | SEG_G,
    SEG_A | SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,
    SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
    SEG_A | SEG_C | SEG_D | SEG_F | SEG_G,
];

/// "WORK" - a 7-segment display has no W, so it is drawn as U.
pub const WORK: [u8; 4] = [
    SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
    SEG_A | SEG_B | SEG_C | SEG_D | SEG_E | SEG_F,
    SEG_A | SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,
    SEG_B | SEG_C | SEG_E | SEG_F | SEG_G,
];

pub const BLANK: [u8; 4] = [0; 4];

/// Segment bytes for one frame, left to right.
pub fn encode(frame: Frame) -> [u8; 4] {
    match frame {
        Frame::Time { minutes, seconds } => {
            let minutes = minutes.min(99);
            let seconds = seconds.min(59);
            let tens = if minutes >= 10 {
                DIGITS[usize::from(minutes / 10)]
            } else {
                0
            };
            [
                tens,
                DIGITS[usize::from(minutes % 10)] | SEG_COLON,
                DIGITS[usize::from(seconds / 10)],
                DIGITS[usize::from(seconds % 10)],
            ]
        }
        Frame::Glyphs(Glyph::Pause) => PAUSE,
        Frame::Glyphs(Glyph::Work) => WORK,
        Frame::Blank => BLANK,
    }
}
