//! SSD1306 128x64 OLED panel protocol.
//!
//! Every bus transaction starts with a control byte: `0x00` for a single
//! command byte, `0x40` for a run of display data. Initialization sends the
//! command list in [`INIT_SEQUENCE`] one command per transaction. A flush
//! walks the eight pages and for each sends
//!
//! ```text
//! [0x00, 0xB0 + page]   page select
//! [0x00, 0x00]          column start, low nibble
//! [0x00, 0x10]          column start, high nibble
//! [0x40, 128 bytes]     page data
//! ```
//!
//! A flush stops at the first failed transaction and reports it. Pages sent
//! before the failure stay on the glass, so a failed flush can leave the
//! panel partially updated; the framebuffer itself is never modified.

use embedded_hal::delay::DelayNs;
use heapless::Vec;

use super::framebuffer::{Framebuffer, PAGES, WIDTH};
use crate::traits::DisplayBus;

/// Control byte prefix for a command.
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte prefix for display data.
pub const CONTROL_DATA: u8 = 0x40;

/// Largest single transfer: control byte plus one page.
pub const MAX_TRANSFER: usize = WIDTH + 1;

/// Power-on command list, sent in order after the power-up delay.
#[rustfmt::skip]
pub const INIT_SEQUENCE: [u8; 28] = [
    0xAE,       // display off
    0x20, 0x00, // memory addressing mode: horizontal
    0xB0,       // page start address
    0xC8,       // COM scan direction remapped
    0x00,       // low column address
    0x10,       // high column address
    0x40,       // start line 0
    0x81, 0xFF, // contrast
    0xA1,       // segment remap
    0xA6,       // normal (not inverted)
    0xA8, 0x3F, // multiplex ratio 1/64
    0xA4,       // output follows RAM
    0xD3, 0x00, // display offset
    0xD5, 0xF0, // clock divide / oscillator
    0xD9, 0x22, // pre-charge period
    0xDA, 0x12, // COM pins configuration
    0xDB, 0x20, // VCOMH deselect level
    0x8D, 0x14, // charge pump on
    0xAF,       // display on
];

/// Panel operation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayError<E> {
    /// The bus transaction failed.
    Bus(E),
    /// The payload does not fit in one [`MAX_TRANSFER`]-byte transaction.
    Framing {
        /// Payload length that was requested.
        len: usize,
    },
}

impl<E: core::fmt::Debug> core::fmt::Display for DisplayError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::Bus(e) => write!(f, "display bus transfer failed: {:?}", e),
            DisplayError::Framing { len } => write!(
                f,
                "display payload of {} bytes exceeds {} byte transfer",
                len,
                MAX_TRANSFER - 1
            ),
        }
    }
}

#[cfg(feature = "std")]
impl<E: core::fmt::Debug> std::error::Error for DisplayError<E> {}

/// SSD1306 panel with its framebuffer.
///
/// The panel exclusively owns the framebuffer; callers draw through
/// [`framebuffer_mut`](Self::framebuffer_mut) and push pixels with
/// [`flush`](Self::flush).
///
/// # Example
///
/// ```rust
/// use joydrive::display::Ssd1306;
/// use joydrive::hal::{MockBus, MockDelay};
///
/// let mut panel = Ssd1306::new(MockBus::new());
/// panel.init(&mut MockDelay::new(), 100).unwrap();
///
/// panel.framebuffer_mut().draw_string(0, 0, "Ready");
/// panel.flush().unwrap();
///
/// // 28 init commands, then 8 pages of 3 commands and 1 data write
/// assert_eq!(panel.bus().writes.len(), 28 + 8 * 4);
/// ```
#[derive(Debug)]
pub struct Ssd1306<B> {
    bus: B,
    framebuffer: Framebuffer,
}

impl<B: DisplayBus> Ssd1306<B> {
    /// Wraps a bus. Nothing is sent until [`init`](Self::init).
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            framebuffer: Framebuffer::new(),
        }
    }

    /// Waits `power_up_delay_ms`, sends [`INIT_SEQUENCE`] and clears the framebuffer.
    pub fn init<D: DelayNs>(
        &mut self,
        delay: &mut D,
        power_up_delay_ms: u32,
    ) -> Result<(), DisplayError<B::Error>> {
        delay.delay_ms(power_up_delay_ms);
        for cmd in INIT_SEQUENCE {
            self.command(cmd)?;
        }
        self.framebuffer.clear();
        Ok(())
    }

    /// Sends one command byte.
    pub fn command(&mut self, cmd: u8) -> Result<(), DisplayError<B::Error>> {
        self.bus
            .write(&[CONTROL_COMMAND, cmd])
            .map_err(DisplayError::Bus)
    }

    /// Sends a run of display data as one transaction.
    pub fn data(&mut self, bytes: &[u8]) -> Result<(), DisplayError<B::Error>> {
        Self::send_data(&mut self.bus, bytes)
    }

    fn send_data(bus: &mut B, bytes: &[u8]) -> Result<(), DisplayError<B::Error>> {
        let mut frame: Vec<u8, MAX_TRANSFER> = Vec::new();
        let framed = frame.push(CONTROL_DATA).is_ok() && frame.extend_from_slice(bytes).is_ok();
        if !framed {
            return Err(DisplayError::Framing { len: bytes.len() });
        }
        bus.write(&frame).map_err(DisplayError::Bus)
    }

    /// Pushes every page of the framebuffer to the panel.
    pub fn flush(&mut self) -> Result<(), DisplayError<B::Error>> {
        for page in 0..PAGES {
            self.command(0xB0 + page as u8)?;
            self.command(0x00)?;
            self.command(0x10)?;
            let start = page * WIDTH;
            let bytes = &self.framebuffer.as_bytes()[start..start + WIDTH];
            Self::send_data(&mut self.bus, bytes)?;
        }
        Ok(())
    }

    /// Read access to the pixels.
    #[inline]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Drawing access to the pixels.
    #[inline]
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// The underlying bus.
    #[inline]
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the underlying bus.
    #[inline]
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }
}
