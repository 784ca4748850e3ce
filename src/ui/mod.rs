//! User input subsystem - one push button.
//!
//! The button task samples the pin, classifies short / long / double
//! presses and queues them for the main loop, which applies at most one
//! gesture per tick.

pub mod buttons;
pub mod input_logic;

pub use input_logic::Gesture;
