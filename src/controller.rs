//! Interval controller - the work/pause state machine.
//!
//! Owns the countdown, the current mode and the reminder melody.  The
//! main loop calls [`IntervalController::tick`] once per iteration with a
//! wrapping millisecond timestamp and at most one gesture:
//!
//! ```text
//!   CountdownLong  --done-->  CountdownLongDone  --Short-->  CountdownShort
//!   CountdownShort --done-->  CountdownShortDone --Short-->  CountdownLong
//!   CountdownLong  --Long-->  CountdownShort     --Long-->   CountdownLong
//!   any            --Double-> Off                --any-->    CountdownLong
//! ```
//!
//! Double press is only honoured when [`ControllerOptions::off_enabled`] is set.

use core::fmt;

use crate::audio::cue::{Cue, Melody};
use crate::config::{
    DEFAULT_DURATION_LONG_MIN, DEFAULT_DURATION_SHORT_MIN, DOUBLE_PRESS_ENABLED, MELODY_ENABLED,
    MS_PER_MINUTE,
};
use crate::error::Error;
use crate::ui::input_logic::Gesture;

/// The two configured interval lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Durations {
    /// Work interval (ms).
    pub long_ms: u32,
    /// Pause interval (ms).
    pub short_ms: u32,
}

impl Durations {
    pub const fn new(long_ms: u32, short_ms: u32) -> Self {
        Self { long_ms, short_ms }
    }

    /// Build from minutes, saturating on overflow.
    pub const fn from_minutes(long_min: u32, short_min: u32) -> Self {
        Self {
            long_ms: long_min.saturating_mul(MS_PER_MINUTE),
            short_ms: short_min.saturating_mul(MS_PER_MINUTE),
        }
    }

    /// Accept anything but an all-zero pair.
    pub fn validate(self) -> Result<Self, Error> {
        if self.long_ms > 0 || self.short_ms > 0 {
            Ok(self)
        } else {
            Err(Error::InvalidDurations)
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self::from_minutes(DEFAULT_DURATION_LONG_MIN, DEFAULT_DURATION_SHORT_MIN)
    }
}

/// Renders as `WORK/PAUSE` in milliseconds, e.g. `1800000/300000`.
impl fmt::Display for Durations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.long_ms, self.short_ms)
    }
}

/// Phase of the timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemMode {
    CountdownLong,
    CountdownLongDone,
    CountdownShort,
    CountdownShortDone,
    Off,
}

impl SystemMode {
    /// What the display shows in this mode.
    pub const fn display_mode(self) -> DisplayMode {
        match self {
            SystemMode::CountdownLong | SystemMode::CountdownShort => DisplayMode::Countdown,
            SystemMode::CountdownLongDone => DisplayMode::Pause,
            SystemMode::CountdownShortDone => DisplayMode::Work,
            SystemMode::Off => DisplayMode::Off,
        }
    }

    /// Modes that decrement the countdown.
    pub const fn is_counting(self) -> bool {
        matches!(self, SystemMode::CountdownLong | SystemMode::CountdownShort)
    }
}

/// Display content class, derived from [`SystemMode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    Countdown,
    Pause,
    Work,
    Off,
}

/// Build-variant switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Double press switches the timer off.
    pub off_enabled: bool,
    /// Play the reminder melody after a work interval.
    pub melody_enabled: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            off_enabled: DOUBLE_PRESS_ENABLED,
            melody_enabled: MELODY_ENABLED,
        }
    }
}

/// Output of one controller step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickResult {
    pub display: DisplayMode,
    /// Remaining countdown (ms); only meaningful for [`DisplayMode::Countdown`].
    pub remaining_ms: u32,
    /// The countdown reached zero during this step.
    pub counter_done: bool,
    /// Cue due at this step, if any.
    pub cue: Option<Cue>,
}

/// Returned by [`IntervalController::reconfigure`]: persist `durations`,
/// then restart the device to apply them.
#[must_use = "new durations must be persisted and applied by a restart"]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestartRequired {
    pub durations: Durations,
}

/// The interval state machine.
pub struct IntervalController {
    durations: Durations,
    options: ControllerOptions,
    mode: SystemMode,
    remaining_ms: u32,
    last_tick: u32,
    melody: Melody,
}

impl IntervalController {
    /// Start a work interval at `now`.
    pub fn new(durations: Durations, options: ControllerOptions, now: u32) -> Self {
        Self {
            durations,
            options,
            mode: SystemMode::CountdownLong,
            remaining_ms: durations.long_ms,
            last_tick: now,
            melody: Melody::new(),
        }
    }

    pub fn mode(&self) -> SystemMode {
        self.mode
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.mode.display_mode()
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    /// Position in the reminder melody.
    pub fn cue_step(&self) -> u8 {
        self.melody.step()
    }

    /// Timestamp of the next reminder note, `None` while disarmed.
    pub fn next_cue_at(&self) -> Option<u32> {
        self.melody.next_at()
    }

    /// One main-loop step: advance the clock, then apply `gesture`.
    ///
    /// A countdown finishing in this step switches mode first; the gesture
    /// is then evaluated against the new mode.
    pub fn tick(&mut self, now: u32, gesture: Gesture) -> TickResult {
        let advanced = self.advance(now);
        self.handle_gesture(gesture);
        TickResult {
            display: self.display_mode(),
            remaining_ms: self.remaining_ms,
            ..advanced
        }
    }

    /// Account for the time elapsed since the previous call.
    pub fn advance(&mut self, now: u32) -> TickResult {
        let elapsed = now.wrapping_sub(self.last_tick);
        self.last_tick = now;

        let mut counter_done = false;
        if self.mode.is_counting() {
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            counter_done = self.remaining_ms == 0;
        }

        if counter_done {
            self.mode = match self.mode {
                SystemMode::CountdownLong => SystemMode::CountdownLongDone,
                _ => SystemMode::CountdownShortDone,
            };
        }

        let cue = if self.mode == SystemMode::CountdownLongDone && self.options.melody_enabled {
            self.melody.poll(now)
        } else {
            None
        };

        TickResult {
            display: self.display_mode(),
            remaining_ms: self.remaining_ms,
            counter_done,
            cue,
        }
    }

    /// Apply a classified gesture. Gestures without a rule are ignored.
    pub fn handle_gesture(&mut self, gesture: Gesture) {
        if gesture == Gesture::None {
            return;
        }
        if gesture == Gesture::Double && self.options.off_enabled && self.mode != SystemMode::Off
        {
            self.enter(SystemMode::Off);
            return;
        }

        match (self.mode, gesture) {
            (SystemMode::Off, _) => self.enter(SystemMode::CountdownLong),
            (SystemMode::CountdownLong, Gesture::Long)
            | (SystemMode::CountdownLongDone, Gesture::Short) => {
                self.enter(SystemMode::CountdownShort)
            }
            (SystemMode::CountdownShort, Gesture::Long)
            | (SystemMode::CountdownShortDone, Gesture::Short) => {
                self.enter(SystemMode::CountdownLong)
            }
            _ => {}
        }
    }

    /// Replace the configured durations.
    ///
    /// The running countdown is left alone; the caller persists the
    /// returned durations and restarts, which begins a fresh work interval.
    pub fn reconfigure(&mut self, durations: Durations) -> Result<RestartRequired, Error> {
        let durations = durations.validate()?;
        self.durations = durations;
        Ok(RestartRequired { durations })
    }

    fn enter(&mut self, mode: SystemMode) {
        match mode {
            SystemMode::CountdownLong => self.remaining_ms = self.durations.long_ms,
            SystemMode::CountdownShort => self.remaining_ms = self.durations.short_ms,
            _ => {}
        }
        if self.mode == SystemMode::CountdownLongDone {
            self.melody.reset();
        }
        self.mode = mode;
    }
}
