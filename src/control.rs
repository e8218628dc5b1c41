//! Frame processing: map, actuate, echo.
//!
//! [`ControlLoop`] owns the motor, the servo and the panel. It is the
//! [`FrameHandler`] the receiving task drives and the [`StatusReporter`] the
//! supervisor draws through; both run under the same lock, so the panel is
//! never written from two contexts at once.
//!
//! Actuator and display failures are logged and the frame is otherwise
//! dropped. Nothing here can stop the receiving task.

use core::fmt::Debug;

use log::{debug, error, warn};

use crate::config::{Config, KinematicsConfig};
use crate::display::{Ssd1306, StatusScreen};
use crate::frame::JoystickFrame;
use crate::kinematics::{self, ActuatorCommand};
use crate::traits::{DisplayBus, FrameHandler, MotorDriver, StatusReporter, SteeringServo};

/// Per-frame controller tying the actuators to the status panel.
///
/// # Example
///
/// ```rust
/// use joydrive::control::ControlLoop;
/// use joydrive::display::Ssd1306;
/// use joydrive::hal::{MockBus, MockMotor, MockServo};
/// use joydrive::traits::FrameHandler;
/// use joydrive::{Direction, JoystickFrame, KinematicsConfig};
///
/// let mut ctl = ControlLoop::new(
///     MockMotor::new(),
///     MockServo::new(),
///     Ssd1306::new(MockBus::new()),
///     KinematicsConfig::narrow(),
/// );
///
/// ctl.on_frame(&JoystickFrame::new(0, -200, 0));
/// assert_eq!(ctl.motor().direction, Direction::Reverse);
/// // straight back folds to full steering lock under the narrow preset
/// assert_eq!(ctl.servo().angle, 50);
/// ```
#[derive(Debug)]
pub struct ControlLoop<M, S, B> {
    motor: M,
    servo: S,
    panel: Ssd1306<B>,
    kinematics: KinematicsConfig,
    halt_on_close: bool,
    last: Option<ActuatorCommand>,
    frames: u32,
}

impl<M, S, B> ControlLoop<M, S, B>
where
    M: MotorDriver,
    M::Error: Debug,
    S: SteeringServo,
    S::Error: Debug,
    B: DisplayBus,
{
    /// Creates a controller that halts the motor when the listener closes.
    pub fn new(motor: M, servo: S, panel: Ssd1306<B>, kinematics: KinematicsConfig) -> Self {
        Self {
            motor,
            servo,
            panel,
            kinematics,
            halt_on_close: true,
            last: None,
            frames: 0,
        }
    }

    /// Creates a controller using the kinematics and close behavior in `config`.
    pub fn from_config(motor: M, servo: S, panel: Ssd1306<B>, config: &Config) -> Self {
        Self::new(motor, servo, panel, config.kinematics.clone())
            .with_halt_on_close(config.network.halt_on_close)
    }

    /// Sets whether the motor is stopped when the receiving task exits.
    pub fn with_halt_on_close(mut self, halt: bool) -> Self {
        self.halt_on_close = halt;
        self
    }

    /// Maps `frame` and drives both actuators. Does not touch the display.
    pub fn actuate(&mut self, frame: &JoystickFrame) -> ActuatorCommand {
        let cmd = kinematics::map_frame(frame, &self.kinematics);
        if let Err(e) = self.motor.drive(cmd.direction, cmd.motor_duty) {
            error!("motor drive {} duty {} failed: {:?}", cmd.direction.as_str(), cmd.motor_duty, e);
        }
        if let Err(e) = self.servo.set_angle(cmd.servo_angle()) {
            error!("servo set {} failed: {:?}", cmd.servo_angle(), e);
        }
        self.last = Some(cmd);
        self.frames = self.frames.wrapping_add(1);
        cmd
    }

    fn present(&mut self, screen: &StatusScreen<'_>) {
        screen.render(self.panel.framebuffer_mut());
        if let Err(e) = self.panel.flush() {
            warn!("display flush failed: {}", e);
        }
    }

    /// The most recent command, if any frame has been handled.
    #[inline]
    pub fn last_command(&self) -> Option<ActuatorCommand> {
        self.last
    }

    /// Number of frames handled (wrapping).
    #[inline]
    pub fn frames_handled(&self) -> u32 {
        self.frames
    }

    /// Active kinematics tunables.
    #[inline]
    pub fn kinematics(&self) -> &KinematicsConfig {
        &self.kinematics
    }

    /// The motor driver.
    #[inline]
    pub fn motor(&self) -> &M {
        &self.motor
    }

    /// The steering servo.
    #[inline]
    pub fn servo(&self) -> &S {
        &self.servo
    }

    /// The status panel.
    #[inline]
    pub fn panel(&self) -> &Ssd1306<B> {
        &self.panel
    }

    /// Mutable access to the status panel.
    #[inline]
    pub fn panel_mut(&mut self) -> &mut Ssd1306<B> {
        &mut self.panel
    }
}

impl<M, S, B> FrameHandler for ControlLoop<M, S, B>
where
    M: MotorDriver,
    M::Error: Debug,
    S: SteeringServo,
    S::Error: Debug,
    B: DisplayBus,
{
    fn on_frame(&mut self, frame: &JoystickFrame) {
        let cmd = self.actuate(frame);
        debug!(
            "x {} y {} -> {} duty {} steer {:.2}",
            frame.x,
            frame.y,
            cmd.direction.as_str(),
            cmd.motor_duty,
            cmd.steer_angle
        );
        self.present(&StatusScreen::FrameEcho {
            x: frame.x,
            y: frame.y,
            angle: cmd.steer_offset(),
        });
    }

    fn on_listener_closed(&mut self) {
        if self.halt_on_close {
            if let Err(e) = self.motor.stop() {
                error!("motor stop on close failed: {:?}", e);
            }
        }
        self.present(&StatusScreen::ListenerClosed);
    }
}

impl<M, S, B> StatusReporter for ControlLoop<M, S, B>
where
    M: MotorDriver,
    M::Error: Debug,
    S: SteeringServo,
    S::Error: Debug,
    B: DisplayBus,
{
    fn show_status(&mut self, screen: &StatusScreen<'_>) {
        self.present(screen);
    }
}
