//! Minimal TM1637 driver.
//!
//! The chip speaks a two-wire, I²C-like protocol without addressing,
//! LSB first, with an ACK clock after every byte.  Both lines must be
//! open-drain with pull-ups; the ACK itself is not read back.

use crate::error::Error;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Data command: write, auto-increment address.
const CMD_DATA_AUTO: u8 = 0x40;
/// Address command for digit 0.
const CMD_ADDRESS: u8 = 0xC0;
/// Display control: on, brightness in the low 3 bits.
const CMD_DISPLAY_ON: u8 = 0x88;

pub struct Tm1637<CLK, DIO, D> {
    clk: CLK,
    dio: DIO,
    delay: D,
    bit_delay_us: u32,
    brightness: u8,
}

impl<CLK, DIO, D> Tm1637<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin,
    D: DelayNs,
{
    pub fn new(clk: CLK, dio: DIO, delay: D, bit_delay_us: u32, brightness: u8) -> Self {
        Self {
            clk,
            dio,
            delay,
            bit_delay_us,
            brightness: brightness.min(7),
        }
    }

    /// Write all four digits and (re)apply the brightness.
    pub fn write_segments(&mut self, segments: &[u8; 4]) -> Result<(), Error> {
        self.command(&[CMD_DATA_AUTO])?;

        let mut frame = [0u8; 5];
        frame[0] = CMD_ADDRESS;
        frame[1..].copy_from_slice(segments);
        self.command(&frame)?;

        self.command(&[CMD_DISPLAY_ON | self.brightness])
    }

    fn command(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.start()?;
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        self.stop()
    }

    fn start(&mut self) -> Result<(), Error> {
        self.dio.set_high().map_err(|_| Error::Display)?;
        self.clk.set_high().map_err(|_| Error::Display)?;
        self.bit_delay();
        self.dio.set_low().map_err(|_| Error::Display)?;
        self.bit_delay();
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Error> {
        self.clk.set_low().map_err(|_| Error::Display)?;
        self.dio.set_low().map_err(|_| Error::Display)?;
        self.bit_delay();
        self.clk.set_high().map_err(|_| Error::Display)?;
        self.bit_delay();
        self.dio.set_high().map_err(|_| Error::Display)?;
        self.bit_delay();
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Error> {
        for bit in 0..8 {
            self.clk.set_low().map_err(|_| Error::Display)?;
            if byte & (1 << bit) != 0 {
                self.dio.set_high().map_err(|_| Error::Display)?;
            } else {
                self.dio.set_low().map_err(|_| Error::Display)?;
            }
            self.bit_delay();
            self.clk.set_high().map_err(|_| Error::Display)?;
            self.bit_delay();
        }

        // ACK clock: release DIO and let the chip pull it low.
        self.clk.set_low().map_err(|_| Error::Display)?;
        self.dio.set_high().map_err(|_| Error::Display)?;
        self.bit_delay();
        self.clk.set_high().map_err(|_| Error::Display)?;
        self.bit_delay();
        self.clk.set_low().map_err(|_| Error::Display)?;
        Ok(())
    }

    fn bit_delay(&mut self) {
        self.delay.delay_us(self.bit_delay_us);
    }
}
