//! H-bridge motor driver using ESP32 LEDC PWM and two GPIO outputs.
//!
//! One PWM channel sets the speed; two plain outputs select the direction:
//! - Forward: forward = 1, reverse = 0, PWM = duty
//! - Reverse: forward = 0, reverse = 1, PWM = duty
//! - Stop: both 0, PWM = 0

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};
use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::prelude::*;
use esp_idf_hal::sys::EspError;

use crate::actuator::motor_output;
use crate::config::MotorConfig;
use crate::traits::{Direction, MotorDriver};

/// H-bridge motor controller for ESP32.
///
/// Uses the LEDC peripheral for PWM generation with 10-bit resolution
/// (1024 duty steps) at the configured carrier frequency.
///
/// # Example
///
/// ```ignore
/// use esp_idf_hal::gpio::OutputPin;
/// use joydrive::hal::esp32::Esp32Motor;
/// use joydrive::traits::{Direction, MotorDriver};
///
/// let peripherals = Peripherals::take()?;
/// let mut motor = Esp32Motor::new(
///     peripherals.pins.gpio5,
///     peripherals.pins.gpio18.downgrade_output(),
///     peripherals.pins.gpio19.downgrade_output(),
///     peripherals.ledc.timer0,
///     peripherals.ledc.channel0,
///     &MotorConfig::default(),
/// )?;
///
/// motor.drive(Direction::Forward, 512)?; // half speed
/// ```
pub struct Esp32Motor<'d> {
    pwm: LedcDriver<'d>,
    forward: PinDriver<'d, AnyOutputPin, Output>,
    reverse: PinDriver<'d, AnyOutputPin, Output>,
}

impl<'d> Esp32Motor<'d> {
    /// Creates the motor driver and leaves it stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if PWM or GPIO initialization fails.
    pub fn new<T, TI, C, CI, P, PI>(
        pwm_pin: P,
        forward_pin: AnyOutputPin,
        reverse_pin: AnyOutputPin,
        timer: T,
        channel: C,
        config: &MotorConfig,
    ) -> Result<Self, EspError>
    where
        TI: esp_idf_hal::ledc::LedcTimer + 'd,
        T: Peripheral<P = TI> + 'd,
        CI: esp_idf_hal::ledc::LedcChannel<SpeedMode = TI::SpeedMode> + 'd,
        C: Peripheral<P = CI> + 'd,
        PI: esp_idf_hal::gpio::OutputPin + 'd,
        P: Peripheral<P = PI> + 'd,
    {
        let timer_config = TimerConfig::default()
            .frequency(config.pwm_hz.Hz())
            .resolution(Resolution::Bits10);
        let timer_driver = LedcTimerDriver::new(timer, &timer_config)?;
        let pwm = LedcDriver::new(channel, &timer_driver, pwm_pin)?;

        let mut motor = Self {
            pwm,
            forward: PinDriver::output(forward_pin)?,
            reverse: PinDriver::output(reverse_pin)?,
        };
        motor.stop()?;
        Ok(motor)
    }
}

impl MotorDriver for Esp32Motor<'_> {
    type Error = EspError;

    fn drive(&mut self, direction: Direction, duty: u32) -> Result<(), EspError> {
        let out = motor_output(direction, duty);
        // enable off while the direction pins change
        self.pwm.set_duty(0)?;
        self.forward.set_level(out.forward.into())?;
        self.reverse.set_level(out.reverse.into())?;
        self.pwm.set_duty(out.duty)
    }
}
