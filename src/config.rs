//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and protocol
//! constants live here so they can be tuned in one place.

// Intervals

/// Default work interval (minutes) used when flash holds no valid record.
pub const DEFAULT_DURATION_LONG_MIN: u32 = 30;

/// Default pause interval (minutes) used when flash holds no valid record.
pub const DEFAULT_DURATION_SHORT_MIN: u32 = 5;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: u32 = 60 * 1000;

/// Main loop period (ms). Blink and melody timing tolerate < 100 ms jitter.
pub const LOOP_PERIOD_MS: u64 = 10;

// Build variants

/// Double press is recognised and switches the timer off / back on.
/// Disable for single-gesture inputs that cannot produce a double click.
pub const DOUBLE_PRESS_ENABLED: bool = true;

/// Play the reminder melody while a work interval is finished.
pub const MELODY_ENABLED: bool = true;

// Melody

/// Gap between the notes of the reminder melody (ms).
pub const MELODY_NOTE_GAP_MS: u32 = 200;

/// Silence after the last note before the melody repeats (ms).
pub const MELODY_REPEAT_GAP_MS: u32 = 60_000;

/// How long each cue tone sounds (ms).
pub const CUE_DURATION_MS: u32 = 100;

/// Buzzer frequency for the high cue (Hz).
pub const CUE_HIGH_HZ: u32 = 2_000;

/// Buzzer frequency for the low cue (Hz).
pub const CUE_LOW_HZ: u32 = 1_000;

// Display

/// Blink period for the PAUS / WORK glyphs (ms).
pub const BLINK_PERIOD_MS: u32 = 1_000;

/// Glyphs are lit when `now % BLINK_PERIOD_MS` is above this value.
pub const BLINK_ON_AFTER_MS: u32 = 500;

/// TM1637 brightness level (0..=7).
pub const DISPLAY_BRIGHTNESS: u8 = 2;

/// Half clock period of the TM1637 bit-banged bus (µs).
pub const DISPLAY_BIT_DELAY_US: u32 = 50;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the actual `embassy_nrf::peripherals::*` pins
// are picked in `main.rs`.  Adjust for your custom PCB.
//
//   Display CLK  → P0.03
//   Display DIO  → P0.04
//   Button       → P0.11
//   Buzzer       → P0.28

// Button

/// Stable time before a level change of the button is accepted (ms).
pub const BUTTON_DEBOUNCE_MS: u32 = 20;

/// Holding the button at least this long is a long press (ms).
pub const BUTTON_LONG_PRESS_MS: u32 = 300;

/// A second press starting within this window after release is a
/// double press (ms).
pub const BUTTON_DOUBLE_CLICK_MS: u32 = 250;

/// Button sampling period (ms).
pub const BUTTON_POLL_MS: u64 = 5;

// USB serial

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0001;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "deskpause";
pub const USB_PRODUCT: &str = "Desk Pause Counter";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// Longest accepted command line (bytes).
pub const SERIAL_LINE_CAPACITY: usize = 64;

/// CDC-ACM bulk endpoint packet size.
pub const SERIAL_PACKET_SIZE: u16 = 64;

/// A line still pending after this much serial silence is processed as-is.
pub const SERIAL_LINE_TIMEOUT_MS: u64 = 1000;

// Duration storage

/// Flash page index where duration storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 240;

/// Number of flash pages reserved for duration storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 4;
