//! Button gesture classification.
//!
//! Turns a sampled button level into discrete gestures. Pure logic, fed
//! with wrapping millisecond timestamps so it can be tested on the host.

use crate::config::{BUTTON_DEBOUNCE_MS, BUTTON_DOUBLE_CLICK_MS, BUTTON_LONG_PRESS_MS};

/// Classified input gesture consumed by the interval controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    None,
    Short,
    Long,
    Double,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PressState {
    Idle,
    Pressed { since: u32 },
    /// Long press already reported, waiting for release.
    Held,
    /// First click released, waiting to see if a second one follows.
    Released { at: u32 },
    SecondPress,
}

/// Debounced click / long-press / double-click detector.
pub struct GestureClassifier {
    double_press: bool,
    raw: bool,
    raw_changed_at: u32,
    stable: bool,
    state: PressState,
}

impl GestureClassifier {
    /// Create a classifier. With `double_press` disabled a short press is
    /// reported on release instead of after the double-click window.
    pub const fn new(double_press: bool) -> Self {
        Self {
            double_press,
            raw: false,
            raw_changed_at: 0,
            stable: false,
            state: PressState::Idle,
        }
    }

    /// Feed one sample of the button level (`true` = pressed) taken at `now`.
    pub fn update(&mut self, pressed: bool, now: u32) -> Gesture {
        if pressed != self.raw {
            self.raw = pressed;
            self.raw_changed_at = now;
        }
        if self.raw != self.stable && now.wrapping_sub(self.raw_changed_at) >= BUTTON_DEBOUNCE_MS {
            self.stable = self.raw;
        }

        let down = self.stable;
        match self.state {
            PressState::Idle => {
                if down {
                    self.state = PressState::Pressed { since: now };
                }
                Gesture::None
            }
            PressState::Pressed { since } => {
                if !down {
                    if self.double_press {
                        self.state = PressState::Released { at: now };
                        Gesture::None
                    } else {
                        self.state = PressState::Idle;
                        Gesture::Short
                    }
                } else if now.wrapping_sub(since) >= BUTTON_LONG_PRESS_MS {
                    self.state = PressState::Held;
                    Gesture::Long
                } else {
                    Gesture::None
                }
            }
            PressState::Held => {
                if !down {
                    self.state = PressState::Idle;
                }
                Gesture::None
            }
            PressState::Released { at } => {
                if down {
                    self.state = PressState::SecondPress;
                    Gesture::None
                } else if now.wrapping_sub(at) >= BUTTON_DOUBLE_CLICK_MS {
                    self.state = PressState::Idle;
                    Gesture::Short
                } else {
                    Gesture::None
                }
            }
            PressState::SecondPress => {
                if down {
                    Gesture::None
                } else {
                    self.state = PressState::Idle;
                    Gesture::Double
                }
            }
        }
    }
}
