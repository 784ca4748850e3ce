//! Maps the controller's display mode onto what the 4-digit display shows.

use crate::config::{BLINK_ON_AFTER_MS, BLINK_PERIOD_MS};
use crate::controller::DisplayMode;

/// Largest minute value the two left digits can show.
const MAX_MINUTES: u32 = 99;

/// Four-letter word shown in a done mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    Pause,
    Work,
}

/// Content of the display for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    Time { minutes: u8, seconds: u8 },
    Glyphs(Glyph),
    Blank,
}

/// Words blink with a 500 ms on / 500 ms off duty cycle.
pub fn blink_on(now: u32) -> bool {
    now % BLINK_PERIOD_MS > BLINK_ON_AFTER_MS
}

/// Compute the frame for `display` at wall-clock time `now`.
pub fn project(display: DisplayMode, remaining_ms: u32, now: u32) -> Frame {
    match display {
        DisplayMode::Countdown => {
            let total_secs = remaining_ms / 1000;
            Frame::Time {
                minutes: (total_secs / 60).min(MAX_MINUTES) as u8,
                seconds: (total_secs % 60) as u8,
            }
        }
        DisplayMode::Pause if blink_on(now) => Frame::Glyphs(Glyph::Pause),
        DisplayMode::Work if blink_on(now) => Frame::Glyphs(Glyph::Work),
        DisplayMode::Pause | DisplayMode::Work | DisplayMode::Off => Frame::Blank,
    }
}
