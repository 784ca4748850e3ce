//! GPIO button input with polled debouncing.
//!
//! One physical button (active-low with internal pull-up).  The task
//! samples it every `BUTTON_POLL_MS`, runs the gesture classifier and
//! sends every recognised gesture to the main loop's channel.

use crate::config::{BUTTON_POLL_MS, DOUBLE_PRESS_ENABLED};
use crate::ui::input_logic::GestureClassifier;
use crate::ui::Gesture;
use defmt::{info, warn};
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Instant, Ticker};

/// Run the button polling loop.
///
/// Gestures are never awaited on: if the queue is full the gesture is
/// dropped so sampling keeps its period.
pub async fn button_task(
    pin: AnyPin,
    tx: Sender<'static, CriticalSectionRawMutex, Gesture, 4>,
) -> ! {
    let btn = Input::new(pin, Pull::Up);
    let mut classifier = GestureClassifier::new(DOUBLE_PRESS_ENABLED);
    let mut ticker = Ticker::every(Duration::from_millis(BUTTON_POLL_MS));

    loop {
        let now = Instant::now().as_millis() as u32;
        let gesture = classifier.update(btn.is_low(), now);

        if gesture != Gesture::None {
            info!("Button: {}", gesture);
            if tx.try_send(gesture).is_err() {
                warn!("Button: gesture queue full, dropping {}", gesture);
            }
        }

        ticker.next().await;
    }
}
