//! Logical audio cues and the reminder melody schedule.

use crate::config::{
    CUE_DURATION_MS, CUE_HIGH_HZ, CUE_LOW_HZ, MELODY_NOTE_GAP_MS, MELODY_REPEAT_GAP_MS,
};

/// Pitch of a cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tone {
    High,
    Low,
}

impl Tone {
    /// Buzzer frequency in Hz.
    pub const fn frequency_hz(self) -> u32 {
        match self {
            Tone::High => CUE_HIGH_HZ,
            Tone::Low => CUE_LOW_HZ,
        }
    }
}

/// One audible feedback event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cue {
    pub tone: Tone,
    pub duration_ms: u32,
}

impl Cue {
    pub const fn new(tone: Tone) -> Self {
        Self {
            tone,
            duration_ms: CUE_DURATION_MS,
        }
    }
}

/// Three-note reminder: high, low, high, then a long pause.
pub struct Melody {
    step: u8,
    next_at: Option<u32>,
}

impl Melody {
    pub const fn new() -> Self {
        Self {
            step: 0,
            next_at: None,
        }
    }

    /// Current position in the three-note sequence.
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Timestamp of the next note, `None` while disarmed.
    pub fn next_at(&self) -> Option<u32> {
        self.next_at
    }

    /// Forget the schedule; the next `poll` re-arms without playing.
    pub fn reset(&mut self) {
        self.step = 0;
        self.next_at = None;
    }

    /// Advance the schedule to `now` and return the note that is due.
    ///
    /// The first call after a reset arms the schedule at `now` and stays
    /// silent, so the first note plays on the following call.
    pub fn poll(&mut self, now: u32) -> Option<Cue> {
        let Some(next_at) = self.next_at else {
            self.next_at = Some(now);
            return None;
        };
        if !is_due(now, next_at) {
            return None;
        }

        let (tone, gap, step) = match self.step {
            0 => (Tone::High, MELODY_NOTE_GAP_MS, 1),
            1 => (Tone::Low, MELODY_NOTE_GAP_MS, 2),
            _ => (Tone::High, MELODY_REPEAT_GAP_MS, 0),
        };
        self.step = step;
        self.next_at = Some(now.wrapping_add(gap));
        Some(Cue::new(tone))
    }
}

impl Default for Melody {
    fn default() -> Self {
        Self::new()
    }
}

/// `now` has reached `deadline`, treating the clock as wrapping.
fn is_due(now: u32, deadline: u32) -> bool {
    now.wrapping_sub(deadline) < u32::MAX / 2
}
