//! Test-only library interface for deskpause.
//!
//! This module re-exports the pure logic modules that can be tested
//! on the host (no embedded hardware required).
//!
//! Usage: `cargo test --lib` (unit tests) or `cargo test --tests`.
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! This lib.rs provides a separate entry point for host-based testing.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod controller;
pub mod error;

// Internal module paths for the actual implementations
#[path = "audio/cue.rs"]
mod audio_cue_impl;
#[path = "display/projection.rs"]
mod display_projection_impl;
#[path = "display/segments.rs"]
mod display_segments_impl;
#[path = "storage/record.rs"]
mod storage_record_impl;
#[path = "ui/input_logic.rs"]
mod ui_input_logic_impl;
#[path = "usb/command.rs"]
mod usb_command_impl;

pub mod audio {
    pub mod cue {
        pub use crate::audio_cue_impl::*;
    }
}

pub mod display {
    pub mod projection {
        pub use crate::display_projection_impl::*;
    }
    pub mod segments {
        pub use crate::display_segments_impl::*;
    }
}

pub mod storage {
    pub mod record {
        pub use crate::storage_record_impl::*;
    }
}

pub mod ui {
    pub mod input_logic {
        pub use crate::ui_input_logic_impl::*;
    }
}

pub mod usb {
    pub mod command {
        pub use crate::usb_command_impl::*;
    }
}

pub use controller::{
    ControllerOptions, DisplayMode, Durations, IntervalController, SystemMode, TickResult,
};
pub use ui::input_logic::Gesture;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::audio::cue::{Cue, Melody, Tone};
    use super::controller::*;
    use super::display::projection::{blink_on, project, Frame, Glyph};
    use super::display::segments::{self, encode, DIGITS, SEG_COLON};
    use super::error::Error;
    use super::storage::record::{self, RECORD_SIGNATURE, RECORD_SIZE};
    use super::ui::input_logic::{Gesture, GestureClassifier};
    use super::usb::command::{parse_durations, LineBuffer};

    const BOTH: ControllerOptions = ControllerOptions {
        off_enabled: true,
        melody_enabled: true,
    };

    fn controller(long_ms: u32, short_ms: u32) -> IntervalController {
        IntervalController::new(Durations::new(long_ms, short_ms), BOTH, 0)
    }

    /// Run `long` out and land in CountdownLongDone at t = long.
    fn finished_work(long_ms: u32, short_ms: u32) -> IntervalController {
        let mut c = controller(long_ms, short_ms);
        c.advance(long_ms);
        assert_eq!(c.mode(), SystemMode::CountdownLongDone);
        c
    }

    // ════════════════════════════════════════════════════════════════════════
    // Controller: countdown
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn controller_starts_counting_long() {
        let c = controller(3000, 1000);
        assert_eq!(c.mode(), SystemMode::CountdownLong);
        assert_eq!(c.display_mode(), DisplayMode::Countdown);
        assert_eq!(c.remaining_ms(), 3000);
    }

    #[test]
    fn controller_advance_decrements_remaining() {
        let mut c = controller(3000, 1000);
        let r = c.advance(400);
        assert_eq!(r.remaining_ms, 2600);
        assert!(!r.counter_done);
        assert_eq!(r.display, DisplayMode::Countdown);
        assert_eq!(r.cue, None);
    }

    #[test]
    fn controller_remaining_clamps_at_zero() {
        for elapsed in [3000, 3001, 10_000, u32::MAX / 2] {
            let mut c = controller(3000, 1000);
            let r = c.advance(elapsed);
            assert_eq!(r.remaining_ms, 0);
            assert!(r.counter_done);
        }
    }

    #[test]
    fn controller_long_done_shows_pause_on_same_tick() {
        let mut c = controller(3000, 1000);
        assert!(!c.advance(1000).counter_done);
        assert!(!c.advance(2000).counter_done);
        let r = c.advance(3000);
        assert!(r.counter_done);
        assert_eq!(r.display, DisplayMode::Pause);
        assert_eq!(r.remaining_ms, 0);
        assert_eq!(c.mode(), SystemMode::CountdownLongDone);
    }

    #[test]
    fn controller_done_transition_happens_once() {
        let mut c = controller(1000, 500);
        let mut transitions = 0;
        for step in 1..=20u32 {
            if c.advance(step * 250).counter_done {
                transitions += 1;
            }
        }
        assert_eq!(transitions, 1);
        assert_eq!(c.mode(), SystemMode::CountdownLongDone);
    }

    #[test]
    fn controller_short_done_shows_work() {
        let mut c = controller(3000, 1000);
        c.handle_gesture(Gesture::Long);
        assert_eq!(c.mode(), SystemMode::CountdownShort);
        let r = c.advance(1000);
        assert!(r.counter_done);
        assert_eq!(r.display, DisplayMode::Work);
        assert_eq!(c.mode(), SystemMode::CountdownShortDone);
    }

    #[test]
    fn controller_done_modes_freeze_remaining() {
        let mut c = finished_work(1000, 500);
        let r = c.advance(5000);
        assert_eq!(r.remaining_ms, 0);
        assert!(!r.counter_done);
    }

    #[test]
    fn controller_handles_clock_wraparound() {
        let start = u32::MAX - 99;
        let mut c = IntervalController::new(Durations::new(1000, 500), BOTH, start);
        // 100 ms up to the wrap, then 200 ms past it.
        let r = c.advance(200);
        assert_eq!(r.remaining_ms, 700);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Controller: gestures
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn gesture_none_never_transitions() {
        let mut c = controller(3000, 1000);
        c.handle_gesture(Gesture::None);
        assert_eq!(c.mode(), SystemMode::CountdownLong);
        let mut c = finished_work(3000, 1000);
        c.handle_gesture(Gesture::None);
        assert_eq!(c.mode(), SystemMode::CountdownLongDone);
    }

    #[test]
    fn gesture_long_skips_to_other_countdown() {
        let mut c = controller(3000, 1000);
        c.advance(500);
        c.handle_gesture(Gesture::Long);
        assert_eq!(c.mode(), SystemMode::CountdownShort);
        assert_eq!(c.remaining_ms(), 1000);
        c.handle_gesture(Gesture::Long);
        assert_eq!(c.mode(), SystemMode::CountdownLong);
        assert_eq!(c.remaining_ms(), 3000);
    }

    #[test]
    fn gesture_short_ignored_while_counting() {
        let mut c = controller(3000, 1000);
        c.advance(500);
        c.handle_gesture(Gesture::Short);
        assert_eq!(c.mode(), SystemMode::CountdownLong);
        assert_eq!(c.remaining_ms(), 2500);
    }

    #[test]
    fn gesture_short_acknowledges_long_done() {
        let mut c = finished_work(3000, 1000);
        c.advance(3100);
        c.advance(3300);
        assert_ne!(c.cue_step(), 0);
        c.handle_gesture(Gesture::Short);
        assert_eq!(c.mode(), SystemMode::CountdownShort);
        assert_eq!(c.remaining_ms(), 1000);
        assert_eq!(c.cue_step(), 0);
        assert_eq!(c.next_cue_at(), None);
    }

    #[test]
    fn gesture_long_ignored_in_done_modes() {
        let mut c = finished_work(3000, 1000);
        c.handle_gesture(Gesture::Long);
        assert_eq!(c.mode(), SystemMode::CountdownLongDone);
    }

    #[test]
    fn gesture_short_acknowledges_short_done() {
        let mut c = controller(3000, 1000);
        c.handle_gesture(Gesture::Long);
        c.advance(1000);
        assert_eq!(c.mode(), SystemMode::CountdownShortDone);
        c.handle_gesture(Gesture::Short);
        assert_eq!(c.mode(), SystemMode::CountdownLong);
        assert_eq!(c.remaining_ms(), 3000);
    }

    #[test]
    fn gesture_double_turns_off_from_every_mode() {
        let mut counting = controller(3000, 1000);
        counting.handle_gesture(Gesture::Double);
        assert_eq!(counting.mode(), SystemMode::Off);
        assert_eq!(counting.display_mode(), DisplayMode::Off);

        let mut pause = controller(3000, 1000);
        pause.handle_gesture(Gesture::Long);
        pause.handle_gesture(Gesture::Double);
        assert_eq!(pause.mode(), SystemMode::Off);

        let mut done = finished_work(3000, 1000);
        done.advance(3100);
        done.handle_gesture(Gesture::Double);
        assert_eq!(done.mode(), SystemMode::Off);
        assert_eq!(done.cue_step(), 0);
        assert_eq!(done.next_cue_at(), None);

        let mut work = controller(3000, 1000);
        work.handle_gesture(Gesture::Long);
        work.advance(1000);
        assert_eq!(work.mode(), SystemMode::CountdownShortDone);
        work.handle_gesture(Gesture::Double);
        assert_eq!(work.mode(), SystemMode::Off);
        assert_eq!(work.display_mode(), DisplayMode::Off);
    }

    #[test]
    fn gesture_any_restarts_from_off() {
        for gesture in [Gesture::Short, Gesture::Long, Gesture::Double] {
            let mut c = controller(3000, 1000);
            c.advance(1200);
            c.handle_gesture(Gesture::Double);
            c.handle_gesture(gesture);
            assert_eq!(c.mode(), SystemMode::CountdownLong);
            assert_eq!(c.remaining_ms(), 3000);
        }
    }

    #[test]
    fn zero_length_work_ends_on_first_tick() {
        let mut c = controller(0, 1000);
        let r = c.advance(0);
        assert!(r.counter_done);
        assert_eq!(c.mode(), SystemMode::CountdownLongDone);
    }

    #[test]
    fn off_mode_does_not_count() {
        let mut c = controller(3000, 1000);
        c.handle_gesture(Gesture::Double);
        let r = c.advance(10_000);
        assert!(!r.counter_done);
        assert_eq!(r.display, DisplayMode::Off);
    }

    #[test]
    fn gesture_double_ignored_without_off_support() {
        let options = ControllerOptions {
            off_enabled: false,
            melody_enabled: true,
        };
        let mut c = IntervalController::new(Durations::new(3000, 1000), options, 0);
        c.handle_gesture(Gesture::Double);
        assert_eq!(c.mode(), SystemMode::CountdownLong);
    }

    #[test]
    fn tick_evaluates_gesture_against_post_done_mode() {
        // Long would skip to the pause countdown, but the countdown finishes
        // first and Long has no rule in CountdownLongDone.
        let mut c = controller(1000, 500);
        let r = c.tick(1000, Gesture::Long);
        assert!(r.counter_done);
        assert_eq!(c.mode(), SystemMode::CountdownLongDone);

        // Short is meaningless while counting, but acknowledges the new mode.
        let mut c = controller(1000, 500);
        let r = c.tick(1000, Gesture::Short);
        assert!(r.counter_done);
        assert_eq!(c.mode(), SystemMode::CountdownShort);
        assert_eq!(r.display, DisplayMode::Countdown);
        assert_eq!(r.remaining_ms, 500);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Controller: melody
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn melody_arms_silently_on_entry() {
        let mut c = controller(1000, 500);
        let r = c.advance(1000);
        assert_eq!(r.cue, None);
        assert_eq!(c.next_cue_at(), Some(1000));
    }

    #[test]
    fn melody_plays_high_low_before_long_gap() {
        let mut c = controller(1000, 500);
        c.advance(1000);
        let mut cues: heapless::Vec<Cue, 8> = heapless::Vec::new();
        let mut now = 1000;
        while now < 1400 {
            now += 50;
            if let Some(cue) = c.advance(now).cue {
                cues.push(cue).unwrap();
            }
        }
        assert_eq!(
            cues.as_slice(),
            &[Cue::new(Tone::High), Cue::new(Tone::Low)]
        );
    }

    #[test]
    fn melody_repeats_after_a_minute() {
        let mut m = Melody::new();
        assert_eq!(m.poll(0), None);
        assert_eq!(m.poll(0).map(|c| c.tone), Some(Tone::High));
        assert_eq!(m.poll(100), None);
        assert_eq!(m.poll(200).map(|c| c.tone), Some(Tone::Low));
        assert_eq!(m.poll(400).map(|c| c.tone), Some(Tone::High));
        assert_eq!(m.step(), 0);
        assert_eq!(m.poll(30_000), None);
        assert_eq!(m.poll(60_399), None);
        assert_eq!(m.poll(60_400).map(|c| c.tone), Some(Tone::High));
    }

    #[test]
    fn melody_schedule_survives_clock_wrap() {
        let mut m = Melody::new();
        let start = u32::MAX - 50;
        m.poll(start);
        assert!(m.poll(start).is_some());
        assert_eq!(m.poll(100), None);
        assert_eq!(m.poll(150).map(|c| c.tone), Some(Tone::Low));
    }

    #[test]
    fn melody_silent_when_disabled() {
        let options = ControllerOptions {
            off_enabled: true,
            melody_enabled: false,
        };
        let mut c = IntervalController::new(Durations::new(1000, 500), options, 0);
        for step in 1..=100u32 {
            assert_eq!(c.advance(step * 50).cue, None);
        }
    }

    #[test]
    fn melody_only_in_long_done() {
        let mut c = controller(1000, 500);
        c.handle_gesture(Gesture::Long);
        c.advance(500);
        assert_eq!(c.mode(), SystemMode::CountdownShortDone);
        for step in 1..=40u32 {
            assert_eq!(c.advance(500 + step * 50).cue, None);
        }
    }

    #[test]
    fn cue_durations_and_pitches() {
        assert_eq!(Cue::new(Tone::Low).duration_ms, 100);
        assert!(Tone::High.frequency_hz() > Tone::Low.frequency_hz());
    }

    // ════════════════════════════════════════════════════════════════════════
    // Controller: reconfiguration
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn reconfigure_accepts_one_nonzero_duration() {
        let mut c = controller(3000, 1000);
        let pending = c.reconfigure(Durations::new(0, 60_000)).unwrap();
        assert_eq!(pending.durations, Durations::new(0, 60_000));
        assert_eq!(c.durations(), Durations::new(0, 60_000));
    }

    #[test]
    fn reconfigure_rejects_all_zero() {
        let mut c = controller(3000, 1000);
        assert_eq!(
            c.reconfigure(Durations::new(0, 0)),
            Err(Error::InvalidDurations)
        );
        assert_eq!(c.durations(), Durations::new(3000, 1000));
    }

    #[test]
    fn reconfigure_keeps_running_countdown() {
        let mut c = controller(3000, 1000);
        c.advance(1000);
        let _ = c.reconfigure(Durations::new(60_000, 30_000)).unwrap();
        assert_eq!(c.mode(), SystemMode::CountdownLong);
        assert_eq!(c.remaining_ms(), 2000);
    }

    #[test]
    fn durations_default_is_thirty_and_five_minutes() {
        let d = Durations::default();
        assert_eq!(d.long_ms, 30 * 60 * 1000);
        assert_eq!(d.short_ms, 5 * 60 * 1000);
    }

    #[test]
    fn display_mode_projection_is_total() {
        assert_eq!(SystemMode::CountdownLong.display_mode(), DisplayMode::Countdown);
        assert_eq!(SystemMode::CountdownShort.display_mode(), DisplayMode::Countdown);
        assert_eq!(SystemMode::CountdownLongDone.display_mode(), DisplayMode::Pause);
        assert_eq!(SystemMode::CountdownShortDone.display_mode(), DisplayMode::Work);
        assert_eq!(SystemMode::Off.display_mode(), DisplayMode::Off);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Display
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn project_countdown_splits_minutes_and_seconds() {
        let frame = project(DisplayMode::Countdown, 25 * 60_000 + 7_999, 0);
        assert_eq!(
            frame,
            Frame::Time {
                minutes: 25,
                seconds: 7
            }
        );
    }

    #[test]
    fn project_countdown_never_blinks() {
        for now in [0, 250, 500, 501, 999] {
            assert!(matches!(
                project(DisplayMode::Countdown, 1000, now),
                Frame::Time { .. }
            ));
        }
    }

    #[test]
    fn project_countdown_clamps_to_99_minutes() {
        let frame = project(DisplayMode::Countdown, 120 * 60_000, 0);
        assert_eq!(
            frame,
            Frame::Time {
                minutes: 99,
                seconds: 0
            }
        );
    }

    #[test]
    fn project_done_modes_blink() {
        for now in (0..3000u32).step_by(7) {
            let expected_on = now % 1000 > 500;
            assert_eq!(blink_on(now), expected_on);
            let pause = project(DisplayMode::Pause, 0, now);
            let work = project(DisplayMode::Work, 0, now);
            if expected_on {
                assert_eq!(pause, Frame::Glyphs(Glyph::Pause));
                assert_eq!(work, Frame::Glyphs(Glyph::Work));
            } else {
                assert_eq!(pause, Frame::Blank);
                assert_eq!(work, Frame::Blank);
            }
        }
        assert_eq!(project(DisplayMode::Pause, 0, 500), Frame::Blank);
        assert_eq!(
            project(DisplayMode::Pause, 0, 501),
            Frame::Glyphs(Glyph::Pause)
        );
    }

    #[test]
    fn project_off_is_blank() {
        for now in [0, 501, 999] {
            assert_eq!(project(DisplayMode::Off, 1000, now), Frame::Blank);
        }
    }

    #[test]
    fn segments_time_has_colon_and_padded_seconds() {
        let bytes = encode(Frame::Time {
            minutes: 5,
            seconds: 7,
        });
        assert_eq!(bytes, [0, DIGITS[5] | SEG_COLON, DIGITS[0], DIGITS[7]]);

        let bytes = encode(Frame::Time {
            minutes: 30,
            seconds: 0,
        });
        assert_eq!(bytes, [DIGITS[3], DIGITS[0] | SEG_COLON, DIGITS[0], DIGITS[0]]);
    }

    #[test]
    fn segments_zero_minutes_shows_single_zero() {
        let bytes = encode(Frame::Time {
            minutes: 0,
            seconds: 42,
        });
        assert_eq!(bytes, [0, DIGITS[0] | SEG_COLON, DIGITS[4], DIGITS[2]]);
    }

    #[test]
    fn segments_glyphs_and_blank() {
        assert_eq!(encode(Frame::Glyphs(Glyph::Pause)), segments::PAUSE);
        assert_eq!(encode(Frame::Glyphs(Glyph::Work)), segments::WORK);
        assert_eq!(encode(Frame::Blank), [0; 4]);
        // "A" and "R" share a shape on seven segments.
        assert_eq!(segments::PAUSE[1], segments::WORK[2]);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Storage record
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn record_layout_is_signature_long_short() {
        let bytes = record::encode(&Durations::new(0x0102_0304, 0x0A0B_0C0D));
        assert_eq!(bytes.len(), RECORD_SIZE);
        assert_eq!(&bytes[0..4], &RECORD_SIGNATURE.to_le_bytes());
        assert_eq!(&bytes[4..8], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&bytes[8..12], &[0x0D, 0x0C, 0x0B, 0x0A]);
    }

    #[test]
    fn record_roundtrip_is_exact() {
        let durations = Durations::new(1_500_000, 420_000);
        let bytes = record::encode(&durations);
        assert_eq!(record::decode(&bytes), Some(durations));
    }

    #[test]
    fn record_bad_signature_falls_back_to_defaults() {
        let mut bytes = record::encode(&Durations::new(1, 2));
        bytes[0] ^= 0xFF;
        assert_eq!(record::decode(&bytes), None);
        let (durations, defaulted) = record::decode_or_default(Some(&bytes[..]));
        assert!(defaulted);
        assert_eq!(durations, Durations::from_minutes(30, 5));
    }

    #[test]
    fn record_missing_or_short_falls_back_to_defaults() {
        assert_eq!(
            record::decode_or_default(None),
            (Durations::default(), true)
        );
        let bytes = record::encode(&Durations::new(1, 2));
        assert_eq!(record::decode(&bytes[..11]), None);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Serial command
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn command_parses_minutes() {
        assert_eq!(
            parse_durations("30/5"),
            Ok(Durations::new(30 * 60_000, 5 * 60_000))
        );
        assert_eq!(
            parse_durations("  45/10\r"),
            Ok(Durations::new(45 * 60_000, 10 * 60_000))
        );
    }

    #[test]
    fn command_requires_separator_after_first_char() {
        assert_eq!(parse_durations("/5"), Err(Error::InvalidCommand));
        assert_eq!(parse_durations("305"), Err(Error::InvalidCommand));
        assert_eq!(parse_durations(""), Err(Error::InvalidCommand));
    }

    #[test]
    fn command_non_numeric_reads_as_zero() {
        assert_eq!(parse_durations("abc/5"), Ok(Durations::new(0, 5 * 60_000)));
        assert_eq!(parse_durations("25min/x"), Ok(Durations::new(25 * 60_000, 0)));
        assert_eq!(parse_durations("30/"), Ok(Durations::new(30 * 60_000, 0)));
    }

    #[test]
    fn command_rejects_both_zero() {
        assert_eq!(parse_durations("0/0"), Err(Error::InvalidDurations));
        assert_eq!(parse_durations("a/b"), Err(Error::InvalidDurations));
        assert_eq!(parse_durations("-3/0"), Err(Error::InvalidDurations));
    }

    #[test]
    fn command_saturates_huge_values() {
        let d = parse_durations("99999999999/1").unwrap();
        assert_eq!(d.long_ms, u32::MAX);
        assert_eq!(d.short_ms, 60_000);
    }

    /// Feed `bytes` into `line`, collecting every completed command.
    fn feed(
        line: &mut LineBuffer<64>,
        bytes: &[u8],
    ) -> heapless::Vec<Result<Durations, Error>, 4> {
        let mut out = heapless::Vec::new();
        for &b in bytes {
            if let Some(parsed) = line.push(b) {
                out.push(parsed).unwrap();
            }
        }
        out
    }

    const THIRTY_FIVE: Durations = Durations::from_minutes(30, 5);

    #[test]
    fn line_ends_on_carriage_return() {
        let mut line = LineBuffer::new();
        assert_eq!(feed(&mut line, b"30/5\r").as_slice(), &[Ok(THIRTY_FIVE)]);
        assert_eq!(line.flush(), None);
    }

    #[test]
    fn line_ends_on_newline() {
        let mut line = LineBuffer::new();
        assert_eq!(feed(&mut line, b"30/5\n").as_slice(), &[Ok(THIRTY_FIVE)]);
    }

    #[test]
    fn line_crlf_yields_one_command() {
        let mut line = LineBuffer::new();
        assert_eq!(feed(&mut line, b"30/5\r\n").as_slice(), &[Ok(THIRTY_FIVE)]);
        assert!(feed(&mut line, b"\r\n\n").is_empty());
    }

    #[test]
    fn line_cr_only_commands_do_not_pile_up() {
        let mut line = LineBuffer::new();
        let mut out = feed(&mut line, b"30/5\r");
        out.extend(feed(&mut line, b"45/10\r"));
        assert_eq!(
            out.as_slice(),
            &[Ok(THIRTY_FIVE), Ok(Durations::from_minutes(45, 10))]
        );
    }

    #[test]
    fn line_split_across_packets() {
        let mut line = LineBuffer::new();
        assert!(feed(&mut line, b"2").is_empty());
        assert!(feed(&mut line, b"5/").is_empty());
        assert_eq!(
            feed(&mut line, b"5\r\n").as_slice(),
            &[Ok(Durations::from_minutes(25, 5))]
        );
    }

    #[test]
    fn line_overflow_reports_then_recovers() {
        let mut line = LineBuffer::new();
        let mut long = [b'1'; 65];
        long[1] = b'/';
        assert!(feed(&mut line, &long).is_empty());
        assert_eq!(
            feed(&mut line, b"\r").as_slice(),
            &[Err(Error::BufferOverflow)]
        );
        assert_eq!(feed(&mut line, b"30/5\r").as_slice(), &[Ok(THIRTY_FIVE)]);
    }

    #[test]
    fn line_exactly_full_is_accepted() {
        let mut line = LineBuffer::new();
        let mut full = [b'0'; 64];
        full[62] = b'/';
        full[63] = b'5';
        let mut out = feed(&mut line, &full);
        out.extend(feed(&mut line, b"\n"));
        assert_eq!(out.as_slice(), &[Ok(Durations::from_minutes(0, 5))]);
    }

    #[test]
    fn line_rejects_garbage_and_non_utf8() {
        let mut line = LineBuffer::new();
        assert_eq!(
            feed(&mut line, b"hello\r").as_slice(),
            &[Err(Error::InvalidCommand)]
        );
        assert_eq!(
            feed(&mut line, &[0xFF, b'/', b'5', b'\n']).as_slice(),
            &[Err(Error::InvalidCommand)]
        );
    }

    #[test]
    fn line_flush_takes_unterminated_command() {
        let mut line: LineBuffer<64> = LineBuffer::new();
        assert!(feed(&mut line, b"30/5").is_empty());
        assert_eq!(line.flush(), Some(Ok(THIRTY_FIVE)));
        assert_eq!(line.flush(), None);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Gesture classification
    // ════════════════════════════════════════════════════════════════════════

    /// Feed `pressed` every 5 ms over `[from, to)`, collecting gestures.
    fn feed_button(
        classifier: &mut GestureClassifier,
        pressed: bool,
        from: u32,
        to: u32,
        out: &mut heapless::Vec<Gesture, 8>,
    ) {
        let mut now = from;
        while now < to {
            let g = classifier.update(pressed, now);
            if g != Gesture::None {
                out.push(g).unwrap();
            }
            now += 5;
        }
    }

    #[test]
    fn classifier_short_press_after_double_window() {
        let mut c = GestureClassifier::new(true);
        let mut out = heapless::Vec::new();
        feed_button(&mut c, true, 0, 100, &mut out);
        feed_button(&mut c, false, 100, 250, &mut out);
        assert!(out.is_empty());
        feed_button(&mut c, false, 250, 600, &mut out);
        assert_eq!(out.as_slice(), &[Gesture::Short]);
    }

    #[test]
    fn classifier_short_press_on_release_without_double() {
        let mut c = GestureClassifier::new(false);
        let mut out = heapless::Vec::new();
        feed_button(&mut c, true, 0, 100, &mut out);
        feed_button(&mut c, false, 100, 150, &mut out);
        assert_eq!(out.as_slice(), &[Gesture::Short]);
    }

    #[test]
    fn classifier_long_press_fires_while_held_once() {
        let mut c = GestureClassifier::new(true);
        let mut out = heapless::Vec::new();
        feed_button(&mut c, true, 0, 2000, &mut out);
        feed_button(&mut c, false, 2000, 2600, &mut out);
        assert_eq!(out.as_slice(), &[Gesture::Long]);
    }

    #[test]
    fn classifier_double_press() {
        let mut c = GestureClassifier::new(true);
        let mut out = heapless::Vec::new();
        feed_button(&mut c, true, 0, 80, &mut out);
        feed_button(&mut c, false, 80, 180, &mut out);
        feed_button(&mut c, true, 180, 260, &mut out);
        feed_button(&mut c, false, 260, 800, &mut out);
        assert_eq!(out.as_slice(), &[Gesture::Double]);
    }

    #[test]
    fn classifier_ignores_bounce() {
        let mut c = GestureClassifier::new(true);
        let mut out = heapless::Vec::new();
        // 10 ms glitches never outlast the debounce time.
        for i in 0..20u32 {
            let now = i * 10;
            let g = c.update(i % 2 == 0, now);
            assert_eq!(g, Gesture::None);
        }
        feed_button(&mut c, false, 200, 800, &mut out);
        assert!(out.is_empty());
    }
}
