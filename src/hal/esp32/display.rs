//! SSD1306 panel on the ESP32 I2C master.
//!
//! # Wiring
//!
//! - SDA → GPIO21
//! - SCL → GPIO22
//! - VCC → 3.3V
//! - GND → GND

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::InputPin;
use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::i2c::{I2c, I2cConfig, I2cDriver};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::prelude::*;

use crate::config::DisplayConfig;
use crate::display::Ssd1306;
use crate::traits::I2cBus;

/// Panel type produced by [`open_panel`].
pub type Esp32Panel<'d> = Ssd1306<I2cBus<I2cDriver<'d>>>;

/// Opens the I2C master and initializes the panel.
///
/// # Errors
///
/// Returns an error if the driver cannot be created or the init sequence
/// is not acknowledged.
pub fn open_panel<'d, I: I2c>(
    i2c: impl Peripheral<P = I> + 'd,
    sda: impl Peripheral<P = impl InputPin + OutputPin> + 'd,
    scl: impl Peripheral<P = impl InputPin + OutputPin> + 'd,
    config: &DisplayConfig,
) -> anyhow::Result<Esp32Panel<'d>> {
    let driver = I2cDriver::new(
        i2c,
        sda,
        scl,
        &I2cConfig::new().baudrate(config.i2c_hz.Hz()),
    )?;

    let mut panel = Ssd1306::new(I2cBus::new(driver, config.i2c_address));
    panel
        .init(&mut FreeRtos, config.power_up_delay_ms)
        .map_err(|e| anyhow::anyhow!("display init failed: {}", e))?;
    panel
        .flush()
        .map_err(|e| anyhow::anyhow!("display clear failed: {}", e))?;
    Ok(panel)
}
