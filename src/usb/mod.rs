//! USB Device subsystem - presents a CDC-ACM serial port to the host.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`.  A terminal on the host can send `WORK/PAUSE` lines
//! (minutes) to change the interval durations.
//!
//! The serial task parses each line and hands valid durations to the
//! main loop, which persists them and restarts the device.

pub mod command;
pub mod serial;
