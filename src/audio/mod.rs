//! Audible feedback - piezo buzzer on a PWM pin.
//!
//! The controller decides *when* a cue is due (see [`cue::Melody`]); the
//! buzzer task turns queued cues into tones.

pub mod buzzer;
pub mod cue;
