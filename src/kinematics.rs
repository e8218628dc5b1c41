//! Stick-to-actuator mapping.
//!
//! Converts one [`JoystickFrame`] into an [`ActuatorCommand`]:
//!
//! 1. **Angle**: `atan2(x, y)` in degrees, sign-inverted, then folded at
//!    ±[`MAX_ANGLE`] according to [`FoldMode`].
//! 2. **Normalization**: the deadzone is subtracted from the magnitude
//!    (floored at zero), the result is capped at the maximum swing, and the
//!    sign is restored. The servo is driven at `90 + normalized`.
//! 3. **Duty**: `|y| * speed_scale / MAX_AXIS`, capped at [`MAX_DUTY`].
//! 4. **Direction**: the sign of `y`.
//!
//! All functions are pure. The tunables live in [`KinematicsConfig`], which
//! ships two presets; see [`KinematicsConfig::narrow`] and
//! [`KinematicsConfig::wide`].
//!
//! # Example
//!
//! ```
//! use joydrive::{kinematics, Direction, JoystickFrame, KinematicsConfig};
//!
//! let frame = JoystickFrame::new(0, 200, 256);
//! let cmd = kinematics::map_frame(&frame, &KinematicsConfig::default());
//!
//! assert_eq!(cmd.direction, Direction::Forward);
//! assert_eq!(cmd.motor_duty, 1023);
//! assert_eq!(cmd.steer_angle, 90.0);
//! ```

use crate::actuator::MAX_DUTY;
use crate::config::KinematicsConfig;
use crate::frame::JoystickFrame;
use crate::traits::Direction;

/// Full-scale magnitude of either stick axis.
pub const MAX_AXIS: i16 = 200;

/// Fold threshold in degrees.
pub const MAX_ANGLE: f32 = 90.0;

/// Servo angle for straight ahead.
pub const SERVO_CENTER: f32 = 90.0;

/// How raw angles at or beyond ±[`MAX_ANGLE`] are folded.
///
/// Both variants exist in deployed firmware and disagree at the boundary.
/// Neither is a clamp: a folded value can still exceed the threshold and is
/// then limited by the normalization's maximum swing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FoldMode {
    /// `+90 -> 0`, `-90 -> 0`: subtract at the positive threshold, add at the
    /// negative one.
    #[default]
    Inward,
    /// `+90 -> 180`, `-90 -> -180`: add at the positive threshold, subtract at
    /// the negative one.
    Outward,
}

impl FoldMode {
    /// Applies the fold to an angle in degrees.
    ///
    /// ```
    /// use joydrive::kinematics::FoldMode;
    ///
    /// assert_eq!(FoldMode::Inward.fold(90.0), 0.0);
    /// assert_eq!(FoldMode::Outward.fold(90.0), 180.0);
    /// assert_eq!(FoldMode::Inward.fold(45.0), 45.0);
    /// ```
    pub fn fold(self, angle: f32) -> f32 {
        let wrap = match self {
            FoldMode::Inward => -MAX_ANGLE,
            FoldMode::Outward => MAX_ANGLE,
        };
        if angle >= MAX_ANGLE {
            angle + wrap
        } else if angle <= -MAX_ANGLE {
            angle - wrap
        } else {
            angle
        }
    }
}

/// Actuator setpoints derived from one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActuatorCommand {
    /// Drive direction.
    pub direction: Direction,
    /// Motor PWM duty register value, `0..=MAX_DUTY`.
    pub motor_duty: u32,
    /// Servo angle in degrees, already offset by [`SERVO_CENTER`].
    pub steer_angle: f32,
}

impl ActuatorCommand {
    /// Steering relative to straight ahead, in degrees.
    #[inline]
    pub fn steer_offset(&self) -> f32 {
        self.steer_angle - SERVO_CENTER
    }

    /// Servo angle in whole degrees. Negative angles saturate to 0.
    #[inline]
    pub fn servo_angle(&self) -> u32 {
        self.steer_angle as u32
    }
}

/// Sign-inverted `atan2(x, y)` in degrees, folded per `fold`.
pub fn raw_angle(x: i16, y: i16, fold: FoldMode) -> f32 {
    let degrees = libm::atan2(f64::from(x), f64::from(y)).to_degrees();
    fold.fold(-(degrees as f32))
}

/// Applies deadzone and maximum swing, keeping the sign of `angle`.
pub fn normalize_angle(angle: f32, config: &KinematicsConfig) -> f32 {
    let adjusted = (libm::fabsf(angle) - config.deadzone)
        .max(0.0)
        .min(config.max_swing);
    libm::copysignf(adjusted, angle)
}

/// Motor duty for vertical axis `y`.
pub fn drive_duty(y: i16, config: &KinematicsConfig) -> u32 {
    let magnitude = u32::from(y.unsigned_abs());
    (magnitude * config.speed_scale / MAX_AXIS as u32).min(MAX_DUTY)
}

/// Drive direction for vertical axis `y`.
#[inline]
pub fn direction_for(y: i16) -> Direction {
    Direction::from_axis(y)
}

/// Maps one frame to actuator setpoints.
pub fn map_frame(frame: &JoystickFrame, config: &KinematicsConfig) -> ActuatorCommand {
    let raw = raw_angle(frame.x, frame.y, config.fold);
    let normalized = normalize_angle(raw, config);
    ActuatorCommand {
        direction: direction_for(frame.y),
        motor_duty: drive_duty(frame.y, config),
        steer_angle: SERVO_CENTER + normalized,
    }
}
