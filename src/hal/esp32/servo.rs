//! Steering servo on an ESP32 LEDC channel.

use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::prelude::*;
use esp_idf_hal::sys::EspError;

use crate::actuator::servo_duty;
use crate::config::ServoConfig;
use crate::traits::SteeringServo;

/// 50 Hz servo output with 10-bit duty.
///
/// ```ignore
/// let mut servo = Esp32Servo::new(
///     peripherals.pins.gpio13,
///     peripherals.ledc.timer1,
///     peripherals.ledc.channel1,
///     &ServoConfig::default(),
/// )?;
/// servo.set_angle(90)?;
/// ```
pub struct Esp32Servo<'d> {
    pwm: LedcDriver<'d>,
    duty_min: u32,
    duty_max: u32,
}

impl<'d> Esp32Servo<'d> {
    /// Configures the timer and channel and centers the servo.
    ///
    /// # Errors
    ///
    /// Returns an error if PWM initialization fails.
    pub fn new<T, TI, C, CI, P, PI>(
        pin: P,
        timer: T,
        channel: C,
        config: &ServoConfig,
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

        let mut servo = Self {
            pwm: LedcDriver::new(channel, &timer_driver, pin)?,
            duty_min: config.duty_min,
            duty_max: config.duty_max,
        };
        servo.set_angle(90)?;
        Ok(servo)
    }
}

impl SteeringServo for Esp32Servo<'_> {
    type Error = EspError;

    fn set_angle(&mut self, angle: u32) -> Result<(), EspError> {
        self.pwm
            .set_duty(servo_duty(angle, self.duty_min, self.duty_max))
    }
}
