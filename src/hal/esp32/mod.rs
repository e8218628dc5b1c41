//! ESP32 hardware abstraction layer for the joystick rover.
//!
//! This module provides hardware implementations for an ESP32 board driving
//! an H-bridge motor driver, a hobby steering servo and an SSD1306 panel.
//!
//! # Hardware Configuration
//!
//! - **Motor Driver**: H-bridge with one PWM enable and two direction inputs
//! - **Servo**: Standard 50 Hz hobby servo
//! - **Display**: SSD1306 128x64 OLED (I2C)
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments.

mod display;
mod motor;
mod servo;

pub use display::{open_panel, Esp32Panel};
pub use motor::Esp32Motor;
pub use servo::Esp32Servo;

#[cfg(feature = "wifi")]
mod wifi;
#[cfg(feature = "wifi")]
pub use wifi::Esp32Wifi;

/// Pin assignments.
///
/// - Motor PWM on GPIO5, direction on GPIO18/19
/// - Servo on GPIO13
/// - I2C display on GPIO21, 22
pub mod pins {
    // =========================================================================
    // Motor Control
    // =========================================================================

    /// Motor PWM enable (LEDC timer 0, channel 0)
    pub const MOTOR_PWM: i32 = 5;

    /// Forward direction-select output (RPWM on the driver board)
    pub const MOTOR_FORWARD: i32 = 18;

    /// Reverse direction-select output (LPWM on the driver board)
    pub const MOTOR_REVERSE: i32 = 19;

    // =========================================================================
    // Steering Servo
    // =========================================================================

    /// Servo signal (LEDC timer 1, channel 1)
    pub const SERVO: i32 = 13;

    // =========================================================================
    // I2C Display (SSD1306)
    // =========================================================================

    /// I2C data line
    pub const I2C_SDA: i32 = 21;

    /// I2C clock line
    pub const I2C_SCL: i32 = 22;

    /// Default I2C address for SSD1306 OLED
    pub const OLED_I2C_ADDR: u8 = 0x3C;
}
