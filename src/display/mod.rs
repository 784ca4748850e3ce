//! Display subsystem - TM1637 4-digit 7-segment module.
//!
//! ## Components
//!
//! - **projection**: which content the current mode shows (pure)
//! - **segments**: content → segment bytes (pure)
//! - **tm1637**: bit-banged two-wire driver

pub mod projection;
pub mod segments;
pub mod tm1637;

use crate::error::Error;
use defmt::debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use projection::Frame;
use tm1637::Tm1637;

/// Pushes frames to the display, skipping bus traffic when nothing changed.
pub struct Renderer<CLK, DIO, D> {
    driver: Tm1637<CLK, DIO, D>,
    shown: Option<[u8; 4]>,
}

impl<CLK, DIO, D> Renderer<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin,
    D: DelayNs,
{
    pub fn new(driver: Tm1637<CLK, DIO, D>) -> Self {
        Self {
            driver,
            shown: None,
        }
    }

    /// Show `frame`; writes to the bus only if the segments differ.
    pub fn render(&mut self, frame: Frame) -> Result<(), Error> {
        let bytes = segments::encode(frame);
        if self.shown == Some(bytes) {
            return Ok(());
        }
        debug!("Display: {}", frame);
        self.driver.write_segments(&bytes)?;
        self.shown = Some(bytes);
        Ok(())
    }
}
