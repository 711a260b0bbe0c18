//! SH1106 OLED driver
//!
//! Pushes a [`FrameBuffer`] to a 128x64 SH1106 panel over I2C. The
//! controller has 132 columns of RAM; the visible area starts at
//! column 2.

use embedded_hal_async::i2c::I2c;

use crate::framebuffer::{FrameBuffer, PAGES, WIDTH};

/// Default I2C address (0x3D on some modules)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// First visible RAM column
const COLUMN_OFFSET: u8 = 2;

/// Control byte: command stream follows
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte: data stream follows
const CONTROL_DATA: u8 = 0x40;

#[allow(dead_code)]
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80,
    cmd::SET_MUX_RATIO,
    0x3F,
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14,
    cmd::SET_SEG_REMAP,
    cmd::SET_COM_SCAN_DEC,
    cmd::SET_COM_PINS,
    0x12,
    cmd::SET_CONTRAST,
    0xCF,
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SH1106 panel on an I2C bus
pub struct Sh1106<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Sh1106<I2C> {
    /// Driver at [`DEFAULT_ADDRESS`]
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Run the power-up sequence
    pub async fn init(&mut self) -> Result<(), I2C::Error> {
        for &c in INIT_SEQUENCE {
            self.command(c).await?;
        }
        Ok(())
    }

    /// Copy the whole frame buffer to display RAM
    pub async fn flush(&mut self, frame: &FrameBuffer) -> Result<(), I2C::Error> {
        let mut data = [0u8; WIDTH + 1];
        data[0] = CONTROL_DATA;

        for page in 0..PAGES {
            self.command(cmd::SET_PAGE_ADDR | page as u8).await?;
            self.command(cmd::SET_LOW_COLUMN | (COLUMN_OFFSET & 0x0F)).await?;
            self.command(cmd::SET_HIGH_COLUMN | (COLUMN_OFFSET >> 4)).await?;

            if let Some(bytes) = frame.page(page) {
                data[1..].copy_from_slice(bytes);
            }
            self.i2c.write(self.address, &data).await?;
        }
        Ok(())
    }

    /// Set display contrast (0-255)
    pub async fn set_contrast(&mut self, contrast: u8) -> Result<(), I2C::Error> {
        self.command(cmd::SET_CONTRAST).await?;
        self.command(contrast).await
    }

    /// Turn the panel on or off; RAM is kept
    pub async fn set_display_on(&mut self, on: bool) -> Result<(), I2C::Error> {
        let c = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
        self.command(c).await
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    async fn command(&mut self, c: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, c]).await
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use embassy_futures::block_on;
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;
    use embedded_hal_async::i2c::{ErrorType, Operation};
    use std::vec::Vec;

    #[derive(Default)]
    struct RecordingBus {
        writes: Vec<(u8, Vec<u8>)>,
    }

    impl ErrorType for RecordingBus {
        type Error = Infallible;
    }

    impl I2c for RecordingBus {
        async fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_init_sends_commands() {
        let mut panel = Sh1106::new(RecordingBus::default());
        block_on(panel.init()).unwrap();

        let bus = panel.release();
        assert_eq!(bus.writes.len(), INIT_SEQUENCE.len());
        assert!(bus
            .writes
            .iter()
            .all(|(addr, bytes)| *addr == 0x3C && bytes.len() == 2 && bytes[0] == 0x00));
        assert_eq!(bus.writes.last().unwrap().1[1], cmd::DISPLAY_ON);
    }

    #[test]
    fn test_flush_writes_each_page_at_column_two() {
        let mut frame = FrameBuffer::new();
        frame
            .draw_iter([Pixel(Point::new(0, 8), BinaryColor::On)])
            .unwrap();

        let mut panel = Sh1106::with_address(RecordingBus::default(), 0x3D);
        block_on(panel.flush(&frame)).unwrap();
        let bus = panel.release();

        // 3 commands + 1 data write per page
        assert_eq!(bus.writes.len(), PAGES * 4);
        let page1: Vec<_> = bus.writes[4..8].iter().map(|(_, b)| b.clone()).collect();
        assert_eq!(page1[0], [0x00, 0xB1]);
        assert_eq!(page1[1], [0x00, 0x02]);
        assert_eq!(page1[2], [0x00, 0x10]);
        assert_eq!(page1[3].len(), WIDTH + 1);
        assert_eq!(page1[3][0], 0x40);
        assert_eq!(page1[3][1], 0x01);
        assert!(bus.writes.iter().all(|(addr, _)| *addr == 0x3D));
    }
}
