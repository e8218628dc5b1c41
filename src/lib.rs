//! # joydrive
//!
//! Receiver firmware for a steered rover driven by a UDP joystick: one
//! datagram per stick sample, mapped to a DC drive motor, a steering servo
//! and a small OLED status panel.
//!
//! ## Features
//!
//! - **Hardware abstraction**: Traits for the motor, the servo and the display bus
//! - **Pure mapping**: Stick axes to direction, duty and steering angle, with presets
//! - **Self-contained display**: 5x7 font, paged framebuffer and SSD1306 protocol
//! - **Restartable listener**: Cooperative start/stop tied to network events
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! | Module | Role |
//! |--------|------|
//! | `frame` | 6-byte wire format |
//! | `kinematics` | Frame to actuator setpoints |
//! | `actuator` | Pin levels and duty arithmetic |
//! | `display` | Font, framebuffer, panel protocol, status screens |
//! | `control` | Per-frame map, actuate and echo |
//! | `listener` | UDP receiving task lifecycle (`std`) |
//! | `supervisor` | Network events to listener and screens (`std`) |
//! | `hal` | Concrete implementations (mock for testing, esp32 for hardware) |
//!
//! ## Example
//!
//! ```rust
//! use joydrive::{
//!     control::ControlLoop,
//!     display::Ssd1306,
//!     hal::{MockBus, MockMotor, MockServo},
//!     traits::FrameHandler,
//!     Direction, JoystickFrame, KinematicsConfig,
//! };
//!
//! let mut control = ControlLoop::new(
//!     MockMotor::new(),
//!     MockServo::new(),
//!     Ssd1306::new(MockBus::new()),
//!     KinematicsConfig::default(),
//! );
//!
//! // Full forward, stick centered left-right
//! let frame = JoystickFrame::decode(&[0x00, 0x00, 0xC8, 0x00, 0x00, 0x01]).unwrap();
//! control.on_frame(&frame);
//!
//! assert_eq!(control.motor().direction, Direction::Forward);
//! assert_eq!(control.motor().duty, 1023);
//! assert_eq!(control.servo().angle, 90);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Duty-cycle arithmetic for the motor and servo.
pub mod actuator;
/// Shared configuration system for desktop and ESP32.
pub mod config;
/// Per-frame controller owning actuators and panel.
pub mod control;
/// Status display: font, framebuffer, SSD1306 protocol.
pub mod display;
/// Joystick datagram format.
pub mod frame;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Stick-to-actuator mapping.
pub mod kinematics;
/// Core traits for hardware and network abstraction.
pub mod traits;

/// Network readiness signal.
#[cfg(feature = "std")]
pub mod connectivity;
/// UDP receiving task and its coordinator.
#[cfg(feature = "std")]
pub mod listener;
/// Network event dispatch.
#[cfg(feature = "std")]
pub mod supervisor;

// Re-exports for convenience
pub use actuator::{MotorOutput, MAX_DUTY};
pub use control::ControlLoop;
pub use frame::{JoystickFrame, FRAME_LEN};
pub use kinematics::{map_frame, ActuatorCommand, FoldMode};
pub use traits::{
    // Hardware
    Direction,
    // Display
    DisplayBus,
    // Network
    FrameHandler,
    I2cBus,
    MotorDriver,
    NetworkEvent,
    ProvisioningFailure,
    StatusReporter,
    SteeringServo,
};

// Config re-exports
pub use config::{
    Config, DeviceConfig, DisplayConfig, KinematicsConfig, MotorConfig, NetworkConfig,
    ServoConfig, WifiConfig,
};

#[cfg(feature = "std")]
pub use connectivity::ConnectivitySignal;
#[cfg(feature = "std")]
pub use listener::{ListenerCoordinator, ListenerError, ListenerState};
#[cfg(feature = "std")]
pub use supervisor::Supervisor;
