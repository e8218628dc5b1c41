//! Trait definitions for hardware abstraction and network integration.
//!
//! This module defines the core abstractions that allow joydrive to:
//! - Run on different hardware (ESP32, desktop mock)
//! - Talk to the status panel over any byte bus
//! - Plug any frame consumer into the receiving task
//!
//! # Submodules
//!
//! - `hardware`: Drive motor and steering servo
//! - `display`: Display bus and status sink
//! - `network`: Frame handler and connectivity events
//!
//! # Hardware Abstraction
//!
//! The key hardware traits are:
//!
//! - [`MotorDriver`]: Direction outputs plus 10-bit PWM duty
//! - [`SteeringServo`]: 50 Hz servo positioned in degrees
//! - [`DisplayBus`]: One-transaction writes to the panel controller

pub mod display;
pub mod hardware;
pub mod network;

pub use display::*;
pub use hardware::*;
pub use network::*;
