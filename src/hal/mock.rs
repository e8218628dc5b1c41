//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the actuator and display traits,
//! enabling development and testing on desktop without physical hardware.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockMotor`] | [`MotorDriver`] | Tracks pin levels, duty and call history |
//! | [`MockServo`] | [`SteeringServo`] | Tracks angle and computed duty |
//! | [`MockBus`] | [`DisplayBus`] | Records every transaction, optional failure injection |
//! | [`MockDelay`] | [`DelayNs`] | Sums requested delays instead of sleeping |
//!
//! # Example
//!
//! ```rust
//! use joydrive::control::ControlLoop;
//! use joydrive::display::Ssd1306;
//! use joydrive::hal::{MockBus, MockMotor, MockServo};
//! use joydrive::traits::FrameHandler;
//! use joydrive::{JoystickFrame, KinematicsConfig};
//!
//! let mut ctl = ControlLoop::new(
//!     MockMotor::new(),
//!     MockServo::new(),
//!     Ssd1306::new(MockBus::new()),
//!     KinematicsConfig::default(),
//! );
//! ctl.on_frame(&JoystickFrame::new(0, 100, 0));
//!
//! // Verify via the mocks
//! assert_eq!(ctl.motor().duty, 511);
//! assert!(!ctl.panel().bus().writes.is_empty());
//! ```
//!
//! [`MotorDriver`]: crate::traits::MotorDriver
//! [`SteeringServo`]: crate::traits::SteeringServo
//! [`DisplayBus`]: crate::traits::DisplayBus
//! [`DelayNs`]: embedded_hal::delay::DelayNs

extern crate alloc;
use alloc::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::actuator::{motor_output, servo_duty, SERVO_DUTY_MAX, SERVO_DUTY_MIN, SERVO_MAX_ANGLE};
use crate::traits::{Direction, DisplayBus, MotorDriver, SteeringServo};

// ============================================================================
// Actuator Mocks
// ============================================================================

/// Error returned by a mock configured to fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockFailure;

/// Mock motor driver for testing.
///
/// Records pin levels and duty exactly as a hardware driver would set them.
/// Use the public fields to inspect state after test operations.
///
/// # Example
///
/// ```rust
/// use joydrive::hal::MockMotor;
/// use joydrive::traits::{Direction, MotorDriver};
///
/// let mut motor = MockMotor::new();
/// motor.drive(Direction::Reverse, 300).unwrap();
/// assert!(motor.reverse_pin && !motor.forward_pin);
/// assert_eq!(motor.duty, 300);
///
/// motor.stop().unwrap();
/// assert_eq!(motor.duty, 0);
/// assert_eq!(motor.history.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockMotor {
    /// Last commanded direction.
    pub direction: Direction,
    /// Forward direction-select output level.
    pub forward_pin: bool,
    /// Reverse direction-select output level.
    pub reverse_pin: bool,
    /// Duty register value.
    pub duty: u32,
    /// Every successful `drive` call as `(direction, duty written)`.
    pub history: Vec<(Direction, u32)>,
    /// When set, `drive` fails without touching any output.
    pub fail: bool,
}

impl MockMotor {
    /// Creates a stopped mock motor.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MotorDriver for MockMotor {
    type Error = MockFailure;

    fn drive(&mut self, direction: Direction, duty: u32) -> Result<(), MockFailure> {
        if self.fail {
            return Err(MockFailure);
        }
        let out = motor_output(direction, duty);
        self.direction = direction;
        self.forward_pin = out.forward;
        self.reverse_pin = out.reverse;
        self.duty = out.duty;
        self.history.push((direction, out.duty));
        Ok(())
    }
}

/// Mock steering servo for testing.
///
/// ```rust
/// use joydrive::hal::MockServo;
/// use joydrive::traits::SteeringServo;
///
/// let mut servo = MockServo::new();
/// servo.set_angle(0).unwrap();
/// assert_eq!(servo.duty, 51);
/// servo.set_angle(500).unwrap();
/// assert_eq!((servo.angle, servo.duty), (180, 102));
/// ```
#[derive(Debug)]
pub struct MockServo {
    /// Last commanded angle, clamped to 180.
    pub angle: u32,
    /// Duty register value for `angle`.
    pub duty: u32,
    /// Duty at 0°.
    pub duty_min: u32,
    /// Duty at 180°.
    pub duty_max: u32,
    /// Number of `set_angle` calls.
    pub moves: usize,
    /// When set, `set_angle` fails without moving.
    pub fail: bool,
}

impl MockServo {
    /// Creates a centered servo with the standard 1 ms..2 ms duty range.
    pub fn new() -> Self {
        Self::with_duty_range(SERVO_DUTY_MIN, SERVO_DUTY_MAX)
    }

    /// Creates a centered servo with a custom duty range.
    pub fn with_duty_range(duty_min: u32, duty_max: u32) -> Self {
        Self {
            angle: 90,
            duty: servo_duty(90, duty_min, duty_max),
            duty_min,
            duty_max,
            moves: 0,
            fail: false,
        }
    }
}

impl Default for MockServo {
    fn default() -> Self {
        Self::new()
    }
}

impl SteeringServo for MockServo {
    type Error = MockFailure;

    fn set_angle(&mut self, angle: u32) -> Result<(), MockFailure> {
        if self.fail {
            return Err(MockFailure);
        }
        self.angle = angle.min(SERVO_MAX_ANGLE);
        self.duty = servo_duty(angle, self.duty_min, self.duty_max);
        self.moves += 1;
        Ok(())
    }
}

// ============================================================================
// Display Mocks
// ============================================================================

/// Recording display bus.
///
/// Each successful `write` is stored as one entry in [`writes`](Self::writes).
///
/// ```rust
/// use joydrive::hal::MockBus;
/// use joydrive::traits::DisplayBus;
///
/// let mut bus = MockBus::new();
/// bus.write(&[0x00, 0xAF]).unwrap();
/// bus.fail_after(1);
/// assert!(bus.write(&[0x00, 0xAE]).is_err());
/// assert_eq!(bus.writes, vec![vec![0x00, 0xAF]]);
/// ```
#[derive(Debug, Default)]
pub struct MockBus {
    /// Transactions written so far.
    pub writes: Vec<Vec<u8>>,
    /// Once this many transactions are recorded, every further write fails.
    pub fail_at: Option<usize>,
}

impl MockBus {
    /// Creates an empty, always-succeeding bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every write fail once `count` transactions have been recorded.
    pub fn fail_after(&mut self, count: usize) {
        self.fail_at = Some(count);
    }

    /// Transactions that carried display data (control byte `0x40`).
    pub fn data_writes(&self) -> impl Iterator<Item = &[u8]> {
        self.writes
            .iter()
            .filter(|w| w.first() == Some(&0x40))
            .map(|w| &w[1..])
    }
}

impl DisplayBus for MockBus {
    type Error = MockFailure;

    fn write(&mut self, bytes: &[u8]) -> Result<(), MockFailure> {
        if self.fail_at.is_some_and(|n| self.writes.len() >= n) {
            return Err(MockFailure);
        }
        self.writes.push(bytes.to_vec());
        Ok(())
    }
}

/// Delay provider that only counts.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Sum of all requested delays in nanoseconds.
    pub total_ns: u64,
}

impl MockDelay {
    /// Creates a delay with nothing counted.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}
