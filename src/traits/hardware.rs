//! Hardware abstraction traits for the drive motor and the steering servo.
//!
//! This module defines the actuator interfaces that allow joydrive to
//! work across different platforms (ESP32, desktop mocks, etc.).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`MotorDriver`] | Direction outputs plus one PWM duty channel |
//! | [`SteeringServo`] | 50 Hz hobby servo positioned in degrees |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For ESP32 hardware, use the
//! implementations from `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use joydrive::traits::{Direction, MotorDriver, SteeringServo};
//! use joydrive::hal::{MockMotor, MockServo};
//!
//! let mut motor = MockMotor::new();
//! motor.drive(Direction::Forward, 512).unwrap();
//! assert!(motor.forward_pin);
//!
//! let mut servo = MockServo::new();
//! servo.set_angle(90).unwrap();
//! assert_eq!(servo.duty, 76);
//! ```

/// Drive direction selected from the joystick's vertical axis.
///
/// # Default
///
/// Defaults to [`Stop`](Self::Stop) for safety.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Stick pulled back.
    Reverse,
    /// Stick centered on the vertical axis. Neither direction output is asserted.
    #[default]
    Stop,
    /// Stick pushed forward.
    Forward,
}

impl Direction {
    /// Returns the direction as a lowercase string.
    ///
    /// # Examples
    ///
    /// ```
    /// use joydrive::Direction;
    ///
    /// assert_eq!(Direction::Forward.as_str(), "forward");
    /// assert_eq!(Direction::Reverse.as_str(), "reverse");
    /// assert_eq!(Direction::Stop.as_str(), "stop");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
            Direction::Stop => "stop",
        }
    }

    /// Selects a direction from the sign of the vertical stick axis.
    ///
    /// ```
    /// use joydrive::Direction;
    ///
    /// assert_eq!(Direction::from_axis(-1), Direction::Reverse);
    /// assert_eq!(Direction::from_axis(0), Direction::Stop);
    /// assert_eq!(Direction::from_axis(200), Direction::Forward);
    /// ```
    #[inline]
    pub const fn from_axis(y: i16) -> Self {
        if y > 0 {
            Direction::Forward
        } else if y < 0 {
            Direction::Reverse
        } else {
            Direction::Stop
        }
    }
}

/// Drive motor trait - H-bridge direction select plus PWM duty.
///
/// The motor driver has two direction-select outputs and a single PWM channel
/// with 10-bit resolution. Implementations should compute the pin levels and
/// the duty register value with [`crate::actuator::motor_output`] so that all
/// platforms share the same arithmetic.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use joydrive::actuator::motor_output;
/// use joydrive::traits::{Direction, MotorDriver};
///
/// struct MyMotor { /* hardware handles */ }
///
/// impl MotorDriver for MyMotor {
///     type Error = ();
///
///     fn drive(&mut self, direction: Direction, duty: u32) -> Result<(), ()> {
///         let out = motor_output(direction, duty);
///         // set pins from out.forward / out.reverse, write out.duty...
///         Ok(())
///     }
/// }
/// ```
pub trait MotorDriver {
    /// Error type for motor operations.
    type Error;

    /// Sets both direction outputs and the PWM duty in one call.
    ///
    /// `duty` is a raw register value; values above the 10-bit maximum are
    /// capped. [`Direction::Stop`] always writes a duty of zero.
    fn drive(&mut self, direction: Direction, duty: u32) -> Result<(), Self::Error>;

    /// Convenience method to stop the motor.
    fn stop(&mut self) -> Result<(), Self::Error> {
        self.drive(Direction::Stop, 0)
    }
}

/// Steering servo trait.
///
/// Positions a standard 50 Hz servo where 0° corresponds to a 1 ms pulse and
/// 180° to a 2 ms pulse. Angles above 180° are clamped.
pub trait SteeringServo {
    /// Error type for servo operations.
    type Error;

    /// Moves the servo to `angle` whole degrees.
    fn set_angle(&mut self, angle: u32) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_default_is_stop() {
        assert_eq!(Direction::default(), Direction::Stop);
    }

    #[test]
    fn direction_from_axis_sign() {
        assert_eq!(Direction::from_axis(i16::MIN), Direction::Reverse);
        assert_eq!(Direction::from_axis(-200), Direction::Reverse);
        assert_eq!(Direction::from_axis(0), Direction::Stop);
        assert_eq!(Direction::from_axis(1), Direction::Forward);
        assert_eq!(Direction::from_axis(i16::MAX), Direction::Forward);
    }

    #[test]
    fn direction_debug() {
        assert_eq!(format!("{:?}", Direction::Forward), "Forward");
        assert_eq!(format!("{:?}", Direction::Reverse), "Reverse");
        assert_eq!(format!("{:?}", Direction::Stop), "Stop");
    }

    #[test]
    fn direction_as_str() {
        assert_eq!(Direction::Forward.as_str(), "forward");
        assert_eq!(Direction::Reverse.as_str(), "reverse");
        assert_eq!(Direction::Stop.as_str(), "stop");
    }
}
