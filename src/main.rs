//! deskpause firmware - work/pause interval timer for nRF52840.
//!
//! Counts down a work interval on a TM1637 display, blinks PAUS when it
//! is over, counts down the pause, blinks WORK, and starts again.  One
//! button acknowledges / skips / switches off; a USB serial terminal
//! changes the two durations, which are kept in flash.

#![no_std]
#![no_main]

mod audio;
mod config;
mod controller;
mod display;
mod error;
mod storage;
mod ui;
mod usb;

use audio::cue::Cue;
use controller::{ControllerOptions, Durations, IntervalController};
use defmt::{debug, error, info, warn};
use display::projection::{self, Frame};
use display::tm1637::Tm1637;
use display::Renderer;
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_nrf::config::HfclkSource;
use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive, Pin};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::peripherals;
use embassy_nrf::pwm::SimplePwm;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Delay, Duration, Instant, Ticker};
use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::UsbDevice;
use storage::DurationStore;
use ui::Gesture;
use usb::serial::UsbDriver;
use {defmt_rtt as _, panic_probe as _};

/// Classified gestures, button task → main loop.
static GESTURES: Channel<CriticalSectionRawMutex, Gesture, 4> = Channel::new();

/// Due cues, main loop → buzzer task.
static CUES: Channel<CriticalSectionRawMutex, Cue, 4> = Channel::new();

/// Accepted reconfiguration commands, serial task → main loop.
static RECONFIGURE: Channel<CriticalSectionRawMutex, Durations, 1> = Channel::new();

#[embassy_executor::task]
async fn button(pin: AnyPin) -> ! {
    ui::buttons::button_task(pin, GESTURES.sender()).await
}

#[embassy_executor::task]
async fn buzzer(pwm: SimplePwm<'static, peripherals::PWM0>) -> ! {
    audio::buzzer::buzzer_task(pwm, CUES.receiver()).await
}

#[embassy_executor::task]
async fn usb_device(device: UsbDevice<'static, UsbDriver>) -> ! {
    usb::serial::run_usb_device(device).await
}

#[embassy_executor::task]
async fn serial(class: CdcAcmClass<'static, UsbDriver>, current: Durations) -> ! {
    usb::serial::serial_task(class, current, RECONFIGURE.sender()).await
}

/// Wrapping millisecond timestamp for the controller.
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut nrf_config = embassy_nrf::config::Config::default();
    // USB needs the crystal oscillator.
    nrf_config.hfclk_source = HfclkSource::ExternalXtal;
    let p = embassy_nrf::init(nrf_config);

    info!("Starting Desk Pause Counter");

    let mut store = DurationStore::new(BlockingAsync::new(Nvmc::new(p.NVMC)));
    let durations = store.load().await;

    let clk = Output::new(p.P0_03, Level::High, OutputDrive::Standard0Disconnect1);
    let dio = Output::new(p.P0_04, Level::High, OutputDrive::Standard0Disconnect1);
    let mut renderer = Renderer::new(Tm1637::new(
        clk,
        dio,
        Delay,
        config::DISPLAY_BIT_DELAY_US,
        config::DISPLAY_BRIGHTNESS,
    ));
    if let Err(e) = renderer.render(Frame::Time {
        minutes: 0,
        seconds: 0,
    }) {
        error!("Display init failed: {}", e);
    }

    let usb = usb::serial::init(p.USBD);

    spawner.must_spawn(button(p.P0_11.degrade()));
    if config::MELODY_ENABLED {
        spawner.must_spawn(buzzer(SimplePwm::new_1ch(p.PWM0, p.P0_28)));
    }
    spawner.must_spawn(usb_device(usb.device));
    spawner.must_spawn(serial(usb.class, durations));

    let mut controller = IntervalController::new(durations, ControllerOptions::default(), now_ms());
    info!("Durations: {}", controller.durations());
    let mut ticker = Ticker::every(Duration::from_millis(config::LOOP_PERIOD_MS));

    loop {
        let now = now_ms();
        let gesture = GESTURES.try_receive().unwrap_or(Gesture::None);

        let before = controller.mode();
        let result = controller.tick(now, gesture);
        if controller.mode() != before {
            info!("Mode: {} -> {}", before, controller.mode());
        }

        if let Some(cue) = result.cue {
            debug!(
                "Cue {} (step {}, next at {})",
                cue,
                controller.cue_step(),
                controller.next_cue_at()
            );
            if CUES.try_send(cue).is_err() {
                warn!("Cue queue full, dropping {}", cue);
            }
        }

        let frame = projection::project(result.display, result.remaining_ms, now);
        if let Err(e) = renderer.render(frame) {
            warn!("Display write failed: {}", e);
        }

        if let Ok(requested) = RECONFIGURE.try_receive() {
            apply_durations(&mut controller, &mut store, requested).await;
        }

        ticker.next().await;
    }
}

/// Persist new durations, then apply them by restarting; the next boot
/// starts a fresh work interval with them.
async fn apply_durations<F: embedded_storage_async::nor_flash::NorFlash>(
    controller: &mut IntervalController,
    store: &mut DurationStore<F>,
    requested: Durations,
) {
    let durations = match requested.validate() {
        Ok(durations) => durations,
        Err(e) => {
            warn!("Reconfiguration rejected: {}", e);
            return;
        }
    };

    if let Err(e) = store.save(&durations).await {
        error!("Could not persist durations: {}", e);
        return;
    }

    match controller.reconfigure(durations) {
        Ok(pending) => {
            info!("Restarting to apply {}", pending.durations);
            cortex_m::peripheral::SCB::sys_reset();
        }
        Err(e) => warn!("Reconfiguration rejected: {}", e),
    }
}
