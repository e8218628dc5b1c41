//! Duty-cycle arithmetic shared by every motor and servo implementation.
//!
//! The drivers in [`crate::hal`] only move numbers into peripheral
//! registers; what those numbers are is decided here.
//!
//! # Motor
//!
//! | Direction | forward pin | reverse pin | duty |
//! |-----------|-------------|-------------|------|
//! | Forward   | high        | low         | duty |
//! | Reverse   | low         | high        | duty |
//! | Stop      | low         | low         | 0    |
//!
//! # Servo
//!
//! At 50 Hz a period is 20 ms. A 1 ms pulse (5 % of full scale) is 0°, a
//! 2 ms pulse (10 %) is 180°; with 10-bit resolution that is 51..=102.

use crate::traits::Direction;

/// PWM resolution in bits for both channels.
pub const PWM_RESOLUTION_BITS: u32 = 10;

/// Largest duty register value at [`PWM_RESOLUTION_BITS`].
pub const MAX_DUTY: u32 = (1 << PWM_RESOLUTION_BITS) - 1;

/// Motor PWM carrier frequency in Hz.
pub const MOTOR_PWM_HZ: u32 = 1_000;

/// Servo frame rate in Hz.
pub const SERVO_PWM_HZ: u32 = 50;

/// Duty for a 1 ms pulse at 50 Hz (≈5 % of 1023).
pub const SERVO_DUTY_MIN: u32 = 51;

/// Duty for a 2 ms pulse at 50 Hz (≈10 % of 1023).
pub const SERVO_DUTY_MAX: u32 = 102;

/// Largest commandable servo angle in degrees.
pub const SERVO_MAX_ANGLE: u32 = 180;

/// Pin levels and duty for one motor update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MotorOutput {
    /// Forward direction-select output.
    pub forward: bool,
    /// Reverse direction-select output.
    pub reverse: bool,
    /// PWM duty register value.
    pub duty: u32,
}

/// Computes direction outputs and duty for the motor.
///
/// The two outputs are never asserted together. `Stop` ignores `duty`.
///
/// ```
/// use joydrive::actuator::motor_output;
/// use joydrive::Direction;
///
/// let out = motor_output(Direction::Reverse, 300);
/// assert!(!out.forward && out.reverse);
/// assert_eq!(out.duty, 300);
///
/// assert_eq!(motor_output(Direction::Stop, 300).duty, 0);
/// ```
pub fn motor_output(direction: Direction, duty: u32) -> MotorOutput {
    let duty = duty.min(MAX_DUTY);
    match direction {
        Direction::Forward => MotorOutput {
            forward: true,
            reverse: false,
            duty,
        },
        Direction::Reverse => MotorOutput {
            forward: false,
            reverse: true,
            duty,
        },
        Direction::Stop => MotorOutput::default(),
    }
}

/// Servo duty for `angle` degrees between `duty_min` (0°) and `duty_max` (180°).
///
/// Angles above 180° are clamped.
///
/// ```
/// use joydrive::actuator::{servo_duty, SERVO_DUTY_MAX, SERVO_DUTY_MIN};
///
/// assert_eq!(servo_duty(0, SERVO_DUTY_MIN, SERVO_DUTY_MAX), 51);
/// assert_eq!(servo_duty(180, SERVO_DUTY_MIN, SERVO_DUTY_MAX), 102);
/// assert_eq!(servo_duty(400, SERVO_DUTY_MIN, SERVO_DUTY_MAX), 102);
/// ```
pub fn servo_duty(angle: u32, duty_min: u32, duty_max: u32) -> u32 {
    let angle = angle.min(SERVO_MAX_ANGLE);
    duty_min + (duty_max.saturating_sub(duty_min) * angle) / SERVO_MAX_ANGLE
}
