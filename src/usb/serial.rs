//! USB CDC-ACM serial port for reconfiguration.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral and exposes one CDC-ACM interface.

use core::fmt::Write as _;

use crate::config;
use crate::controller::Durations;
use crate::error::Error;
use crate::usb::command::{LineBuffer, BANNER, DURATIONS_PREFIX, USAGE_HINT};
use defmt::{info, warn};
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{self, bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::driver::EndpointError;
use embassy_usb::{Builder, Config, UsbDevice};
use embassy_time::{with_timeout, Duration};
use heapless::String;
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

/// Concrete USB driver type.
pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

static CDC_STATE: StaticCell<State> = StaticCell::new();
static USB_CONFIG_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 256]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Build result containing the USB device runner and the serial class.
pub struct UsbSerial {
    pub device: UsbDevice<'static, UsbDriver>,
    pub class: CdcAcmClass<'static, UsbDriver>,
}

/// Initialise the USB stack and create the serial device.
///
/// Must be called exactly once.  All static buffers are consumed here.
pub fn init(usbd: peripherals::USBD) -> UsbSerial {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = 100; // mA
    usb_config.max_packet_size_0 = 64;

    // Interface association descriptors so Windows binds the CDC driver.
    usb_config.device_class = 0xEF;
    usb_config.device_sub_class = 0x02;
    usb_config.device_protocol = 0x01;
    usb_config.composite_with_iads = true;

    // Allocate static descriptor buffers.
    let config_desc = USB_CONFIG_DESC.init([0u8; 256]);
    let bos_desc = USB_BOS_DESC.init([0u8; 256]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 256]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; 64]);

    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    let state = CDC_STATE.init(State::new());
    let class = CdcAcmClass::new(&mut builder, state, config::SERIAL_PACKET_SIZE);

    let device = builder.build();

    info!("USB CDC-ACM serial initialised");

    UsbSerial { device, class }
}

/// Run the USB device stack - must be spawned as a dedicated Embassy task.
///
/// This handles USB enumeration, suspend/resume, and endpoint servicing.
pub async fn run_usb_device(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}

/// Serve terminal sessions forever.
///
/// `current` is echoed to every new session.  Valid commands are sent to
/// the main loop through `tx`.
pub async fn serial_task(
    mut class: CdcAcmClass<'static, UsbDriver>,
    current: Durations,
    tx: Sender<'static, CriticalSectionRawMutex, Durations, 1>,
) -> ! {
    loop {
        class.wait_connection().await;
        info!("Serial: terminal connected");
        if let Err(e) = session(&mut class, current, &tx).await {
            info!("Serial: session ended ({})", e);
        }
    }
}

async fn session(
    class: &mut CdcAcmClass<'static, UsbDriver>,
    current: Durations,
    tx: &Sender<'static, CriticalSectionRawMutex, Durations, 1>,
) -> Result<(), Error> {
    write_line(class, BANNER).await?;
    write_durations(class, &current).await?;

    let mut packet = [0u8; config::SERIAL_PACKET_SIZE as usize];
    let mut line: LineBuffer<{ config::SERIAL_LINE_CAPACITY }> = LineBuffer::new();
    let idle = Duration::from_millis(config::SERIAL_LINE_TIMEOUT_MS);

    loop {
        let n = match with_timeout(idle, class.read_packet(&mut packet)).await {
            Ok(read) => read.map_err(serial_error)?,
            Err(_) => {
                // Terminal sent no line ending; take what we have.
                if let Some(parsed) = line.flush() {
                    reply(class, tx, parsed).await?;
                }
                continue;
            }
        };

        for &byte in &packet[..n] {
            if let Some(parsed) = line.push(byte) {
                reply(class, tx, parsed).await?;
            }
        }
    }
}

/// Confirm and forward an accepted command, or print the usage hint.
async fn reply(
    class: &mut CdcAcmClass<'static, UsbDriver>,
    tx: &Sender<'static, CriticalSectionRawMutex, Durations, 1>,
    parsed: Result<Durations, Error>,
) -> Result<(), Error> {
    match parsed {
        Ok(durations) => {
            write_durations(class, &durations).await?;
            info!("Serial: new durations {}", durations);
            tx.send(durations).await;
            Ok(())
        }
        Err(e) => {
            warn!("Serial: rejected command ({})", e);
            write_line(class, USAGE_HINT).await
        }
    }
}

async fn write_durations(
    class: &mut CdcAcmClass<'static, UsbDriver>,
    durations: &Durations,
) -> Result<(), Error> {
    let mut text: String<96> = String::new();
    write!(text, "{}{}", DURATIONS_PREFIX, durations).map_err(|_| Error::BufferOverflow)?;
    write_line(class, &text).await
}

/// Write `text` followed by CRLF, split into endpoint-sized packets.
async fn write_line(class: &mut CdcAcmClass<'static, UsbDriver>, text: &str) -> Result<(), Error> {
    let max = usize::from(class.max_packet_size());
    for chunk in text.as_bytes().chunks(max) {
        class.write_packet(chunk).await.map_err(serial_error)?;
    }
    class.write_packet(b"\r\n").await.map_err(serial_error)
}

fn serial_error(e: EndpointError) -> Error {
    match e {
        EndpointError::BufferOverflow => Error::BufferOverflow,
        EndpointError::Disabled => Error::Serial,
    }
}
