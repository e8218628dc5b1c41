//! Display bus abstraction for the status panel.
//!
//! This module defines the [`DisplayBus`] trait: the single primitive the
//! panel driver needs from the physical bus. One call is one complete bus
//! transaction (address, payload, stop). The transfer itself is assumed
//! reliable; failures are reported, never retried.
//!
//! [`I2cBus`] adapts any `embedded-hal` 1.0 I2C master to this trait, which
//! covers the ESP-IDF `I2cDriver` as well as desktop test doubles.

use embedded_hal::i2c::I2c;

/// Byte sink for display controller transactions.
///
/// Implementors provide hardware-specific transfer for displays like the
/// SSD1306 OLED, or record transactions for testing.
///
/// # Example
///
/// ```ignore
/// use joydrive::traits::DisplayBus;
///
/// struct MyBus { /* ... */ }
///
/// impl DisplayBus for MyBus {
///     type Error = ();
///
///     fn write(&mut self, bytes: &[u8]) -> Result<(), ()> {
///         // Start, address, bytes, stop
///         Ok(())
///     }
/// }
/// ```
pub trait DisplayBus {
    /// Error type for bus transfers.
    type Error: core::fmt::Debug;

    /// Writes `bytes` to the display controller as one transaction.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// [`DisplayBus`] over an `embedded-hal` I2C master at a fixed device address.
#[derive(Debug)]
pub struct I2cBus<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> I2cBus<I> {
    /// Wraps an I2C master; `address` is the 7-bit device address.
    pub fn new(i2c: I, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Returns the 7-bit device address.
    #[inline]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Releases the underlying I2C master.
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> DisplayBus for I2cBus<I> {
    type Error = I::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(self.address, bytes)
    }
}

/// Sink for whole-screen status messages.
///
/// The event supervisor uses this to put connectivity and provisioning
/// notices on the panel without reaching into the framebuffer itself.
pub trait StatusReporter {
    /// Replaces the panel contents with `screen` and flushes it.
    fn show_status(&mut self, screen: &crate::display::StatusScreen<'_>);
}
