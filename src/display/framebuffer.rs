//! Bit-packed 128x64 monochrome framebuffer.
//!
//! The layout matches the SSD1306 graphic RAM: the screen is split into
//! [`PAGES`] horizontal strips of eight pixel rows. Byte `page * WIDTH + x`
//! holds column `x` of that strip, least significant bit on top.
//!
//! All drawing is clipped: anything that would land beyond the right edge or
//! below the last page is dropped without touching neighbouring bytes.

use core::fmt::{self, Write};

use heapless::String;

use super::font::{self, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Width in pixels.
pub const WIDTH: usize = 128;

/// Height in pixels.
pub const HEIGHT: usize = 64;

/// Number of 8-pixel pages.
pub const PAGES: usize = HEIGHT / 8;

/// Backing store size in bytes.
pub const BUFFER_SIZE: usize = WIDTH * HEIGHT / 8;

/// Capacity of the formatting scratch buffer used by [`Framebuffer::print_fmt`].
pub const PRINT_SCRATCH: usize = 64;

/// Rows touched by a glyph within its page.
const GLYPH_ROWS: u8 = (1 << GLYPH_HEIGHT) - 1;

/// Pixel memory for one panel.
#[derive(Clone)]
pub struct Framebuffer {
    buf: [u8; BUFFER_SIZE],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lit = self.buf.iter().filter(|b| **b != 0).count();
        f.debug_struct("Framebuffer")
            .field("non_zero_bytes", &lit)
            .finish()
    }
}

impl Framebuffer {
    /// Creates an all-dark framebuffer.
    pub const fn new() -> Self {
        Self {
            buf: [0; BUFFER_SIZE],
        }
    }

    /// Zeroes every pixel.
    pub fn clear(&mut self) {
        self.buf.fill(0);
    }

    /// Raw bytes in panel order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.buf
    }

    /// The `WIDTH` bytes of one page, or `None` past the last page.
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        let start = page.checked_mul(WIDTH)?;
        self.buf.get(start..start + WIDTH)
    }

    /// Returns whether the pixel at (`x`, `y`) is lit. Out of range is dark.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.buf[(y / 8) * WIDTH + x] & (1 << (y % 8)) != 0
    }

    /// Byte index of column `x` in `page`, if on screen.
    #[inline]
    fn index(x: usize, page: usize) -> Option<usize> {
        (x < WIDTH && page < PAGES).then(|| page * WIDTH + x)
    }

    /// Draws `c` with its top-left corner at column `x` of `page`.
    ///
    /// Glyph pixels are OR-ed in; the spacing column after the glyph has its
    /// seven glyph rows cleared.
    pub fn draw_glyph(&mut self, x: usize, page: usize, c: char) {
        for (col, bits) in font::glyph(c).into_iter().enumerate() {
            if let Some(i) = x.checked_add(col).and_then(|cx| Self::index(cx, page)) {
                self.buf[i] |= bits & GLYPH_ROWS;
            }
        }
        if let Some(i) = x
            .checked_add(GLYPH_WIDTH)
            .and_then(|cx| Self::index(cx, page))
        {
            self.buf[i] &= !GLYPH_ROWS;
        }
    }

    /// Draws `text` left to right starting at column `x` of `page`.
    ///
    /// No wrapping; characters past the right edge are clipped.
    pub fn draw_string(&mut self, x: usize, page: usize, text: &str) {
        let mut cx = x;
        for c in text.chars() {
            if cx >= WIDTH {
                break;
            }
            self.draw_glyph(cx, page, c);
            cx += GLYPH_ADVANCE;
        }
    }

    /// Formats `args` into a [`PRINT_SCRATCH`]-byte buffer and draws it.
    ///
    /// Output beyond the scratch capacity is silently dropped.
    ///
    /// ```
    /// use joydrive::display::Framebuffer;
    ///
    /// let mut fb = Framebuffer::new();
    /// fb.print_fmt(0, 1, format_args!("y {}", 200));
    /// assert!(fb.page(1).unwrap().iter().any(|b| *b != 0));
    /// ```
    pub fn print_fmt(&mut self, x: usize, page: usize, args: fmt::Arguments<'_>) {
        let mut scratch = Truncating::<PRINT_SCRATCH>::default();
        let _ = scratch.write_fmt(args);
        self.draw_string(x, page, &scratch.0);
    }
}

/// `fmt::Write` sink that keeps what fits and discards the rest.
#[derive(Default)]
struct Truncating<const N: usize>(String<N>);

impl<const N: usize> Write for Truncating<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(fb: &Framebuffer) -> usize {
        fb.as_bytes().iter().map(|b| b.count_ones() as usize).sum()
    }

    #[test]
    fn geometry() {
        assert_eq!(BUFFER_SIZE, 1024);
        assert_eq!(PAGES, 8);
    }

    #[test]
    fn glyph_lands_in_its_page() {
        let mut fb = Framebuffer::new();
        fb.draw_glyph(10, 2, 'A');
        assert_eq!(&fb.page(2).unwrap()[10..15], &[0x7E, 0x11, 0x11, 0x11, 0x7E]);
        assert!(fb.pixel(10, 17));
        assert!(!fb.pixel(10, 16));
        for page in (0..PAGES).filter(|p| *p != 2) {
            assert!(fb.page(page).unwrap().iter().all(|b| *b == 0));
        }
    }

    #[test]
    fn glyph_ors_into_existing_pixels() {
        let mut fb = Framebuffer::new();
        fb.draw_glyph(0, 0, 'l');
        fb.draw_glyph(0, 0, '.');
        assert_eq!(&fb.as_bytes()[0..5], &[0x00, 0x41 | 0x40, 0x7F | 0x60, 0x40, 0x00]);
    }

    #[test]
    fn spacing_column_cleared_except_bottom_row() {
        let mut fb = Framebuffer::new();
        fb.buf[5] = 0xFF;
        fb.draw_glyph(0, 0, 'A');
        assert_eq!(fb.as_bytes()[5], 0x80);
    }

    #[test]
    fn right_edge_is_clipped_for_every_x() {
        for x in 0..=WIDTH + 5 {
            let mut fb = Framebuffer::new();
            fb.draw_glyph(x, PAGES - 1, 'W');
            fb.draw_glyph(x, PAGES, 'W');
            for (i, b) in fb.as_bytes().iter().enumerate() {
                if *b != 0 {
                    assert!(i >= (PAGES - 1) * WIDTH + x, "x {x} wrote byte {i}");
                }
            }
        }
    }

    #[test]
    fn glyph_at_last_column_does_not_bleed_into_next_page() {
        let mut fb = Framebuffer::new();
        fb.draw_glyph(WIDTH - 1, 0, 'M');
        assert_eq!(fb.page(0).unwrap()[WIDTH - 1], 0x7F);
        assert!(fb.page(1).unwrap().iter().all(|b| *b == 0));
    }

    #[test]
    fn string_advances_six_columns() {
        let mut fb = Framebuffer::new();
        fb.draw_string(0, 0, "II");
        let page = fb.page(0).unwrap();
        assert_eq!(&page[0..5], &[0x00, 0x41, 0x7F, 0x41, 0x00]);
        assert_eq!(page[5], 0x00);
        assert_eq!(&page[6..11], &[0x00, 0x41, 0x7F, 0x41, 0x00]);
    }

    #[test]
    fn long_string_truncates_silently() {
        let mut fb = Framebuffer::new();
        fb.draw_string(0, 0, &"8".repeat(40));
        // 21 full glyphs and two columns of the 22nd
        let page = fb.page(0).unwrap();
        assert_eq!(page[126], 0x36);
        assert_eq!(page[127], 0x49);
        assert!(fb.page(1).unwrap().iter().all(|b| *b == 0));
    }

    #[test]
    fn unsupported_characters_leave_gaps() {
        let mut fb = Framebuffer::new();
        fb.draw_string(0, 0, "x = 5");
        let page = fb.page(0).unwrap();
        assert!(page[6..18].iter().all(|b| *b == 0));
        assert_ne!(page[24], 0);
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut fb = Framebuffer::new();
        fb.draw_string(0, 3, "Hello");
        assert!(lit(&fb) > 0);
        fb.clear();
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn print_fmt_matches_draw_string() {
        let mut a = Framebuffer::new();
        let mut b = Framebuffer::new();
        a.print_fmt(4, 3, format_args!("angle {:.2}", -12.5f32));
        b.draw_string(4, 3, "angle -12.50");
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn print_scratch_truncates_at_capacity() {
        let mut scratch = Truncating::<PRINT_SCRATCH>::default();
        let long = "z".repeat(100);
        write!(scratch, "{long}").unwrap();
        assert_eq!(scratch.0.len(), PRINT_SCRATCH);
    }
}
