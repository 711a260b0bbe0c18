//! 1-bit frame buffer in SH1106 page order

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Panel width in pixels
pub const WIDTH: usize = 128;
/// Panel height in pixels
pub const HEIGHT: usize = 64;
/// Number of 8-pixel pages
pub const PAGES: usize = HEIGHT / 8;

/// Pixels organised as pages of vertical bytes, bit 0 at the top
pub struct FrameBuffer {
    pages: [[u8; WIDTH]; PAGES],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
        }
    }

    /// Turn every pixel off
    pub fn clear_all(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
    }

    /// Raw bytes of one page
    pub fn page(&self, page: usize) -> Option<&[u8; WIDTH]> {
        self.pages.get(page)
    }

    /// Read a pixel; out-of-range reads are off
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Number of lit pixels
    pub fn lit(&self) -> usize {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }

    fn set(&mut self, x: usize, y: usize, on: bool) {
        let mask = 1 << (y % 8);
        let byte = &mut self.pages[y / 8][x];
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x < WIDTH && y < HEIGHT {
                self.set(x, y, color.is_on());
            }
        }
        Ok(())
    }
}
