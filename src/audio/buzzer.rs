//! Passive piezo buzzer driven by `SimplePwm`.

use crate::audio::cue::Cue;
use defmt::debug;
use embassy_nrf::pwm::{Instance, Prescaler, SimplePwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Duration, Timer};

/// PWM counter clock with `Prescaler::Div16` (16 MHz / 16).
const PWM_CLOCK_HZ: u32 = 1_000_000;

/// The PWM counter top is 15 bits wide.
const MAX_TOP: u32 = 0x7FFF;

/// Play cues from the queue, one after the other.
pub async fn buzzer_task<T: Instance>(
    mut pwm: SimplePwm<'static, T>,
    rx: Receiver<'static, CriticalSectionRawMutex, Cue, 4>,
) -> ! {
    pwm.set_prescaler(Prescaler::Div16);
    pwm.disable();

    loop {
        let cue = rx.receive().await;
        debug!("Buzzer: {}", cue);

        // 50 % duty square wave at the cue's pitch.
        let top = (PWM_CLOCK_HZ / cue.tone.frequency_hz()).min(MAX_TOP) as u16;
        pwm.set_max_duty(top);
        pwm.set_duty(0, top / 2);
        pwm.enable();

        Timer::after(Duration::from_millis(u64::from(cue.duration_ms))).await;

        pwm.disable();
    }
}
