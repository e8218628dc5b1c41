//! Shared configuration system for desktop and ESP32.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use joydrive::config::{Config, KinematicsConfig, NetworkConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.network.port, 65000);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_network(NetworkConfig::default().with_port(7000))
//!     .with_kinematics(KinematicsConfig::wide());
//! ```

use heapless::String as HString;

use crate::actuator::{MAX_DUTY, MOTOR_PWM_HZ, SERVO_DUTY_MAX, SERVO_DUTY_MIN, SERVO_PWM_HZ};
use crate::kinematics::FoldMode;

/// Maximum length for short config strings (names, SSIDs)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// UDP port the listener binds when none is configured.
pub const DEFAULT_UDP_PORT: u16 = 65000;

// ============================================================================
// Helper for creating heapless strings
// ============================================================================

/// Create a ShortString from a &str, truncating at a character boundary if too long
pub fn short_string(s: &str) -> ShortString {
    let mut end = s.len().min(MAX_SHORT_STRING);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut hs = ShortString::new();
    let _ = hs.push_str(&s[..end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// UDP listener configuration
    pub network: NetworkConfig,
    /// Stick-to-actuator mapping
    pub kinematics: KinematicsConfig,
    /// Drive motor PWM
    pub motor: MotorConfig,
    /// Steering servo PWM
    pub servo: ServoConfig,
    /// Status panel bus
    pub display: DisplayConfig,
    /// WiFi connection configuration
    pub wifi: WifiConfig,
    /// Device identification
    pub device: DeviceConfig,
}

impl Config {
    /// Set network configuration
    pub fn with_network(mut self, network: NetworkConfig) -> Self {
        self.network = network;
        self
    }

    /// Set kinematics configuration
    pub fn with_kinematics(mut self, kinematics: KinematicsConfig) -> Self {
        self.kinematics = kinematics;
        self
    }

    /// Set motor configuration
    pub fn with_motor(mut self, motor: MotorConfig) -> Self {
        self.motor = motor;
        self
    }

    /// Set servo configuration
    pub fn with_servo(mut self, servo: ServoConfig) -> Self {
        self.servo = servo;
        self
    }

    /// Set display configuration
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    /// Set WiFi configuration
    pub fn with_wifi(mut self, wifi: WifiConfig) -> Self {
        self.wifi = wifi;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// Network Config
// ============================================================================

/// UDP listener configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkConfig {
    /// UDP port bound on all local interfaces (0 = ephemeral)
    pub port: u16,
    /// Upper bound on one blocking receive; also bounds stop latency
    pub recv_timeout_ms: u32,
    /// How long `stop()` waits before reporting a slow listener exit
    pub stop_grace_ms: u32,
    /// Pause after each processed frame
    pub frame_yield_ms: u32,
    /// Receive buffer size; larger datagrams are truncated (and rejected)
    pub datagram_buffer: usize,
    /// Stack size for the receiving thread in bytes
    pub task_stack_bytes: usize,
    /// Stop the motor when the listener shuts down
    pub halt_on_close: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_UDP_PORT,
            recv_timeout_ms: 50,
            stop_grace_ms: 100,
            frame_yield_ms: 10,
            datagram_buffer: 128,
            task_stack_bytes: 8192,
            halt_on_close: true,
        }
    }
}

impl NetworkConfig {
    /// Set the UDP port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the receive timeout (minimum 1 ms)
    pub fn with_recv_timeout_ms(mut self, ms: u32) -> Self {
        self.recv_timeout_ms = ms.max(1);
        self
    }

    /// Set the stop grace period
    pub fn with_stop_grace_ms(mut self, ms: u32) -> Self {
        self.stop_grace_ms = ms;
        self
    }

    /// Set the per-frame yield delay
    pub fn with_frame_yield_ms(mut self, ms: u32) -> Self {
        self.frame_yield_ms = ms;
        self
    }

    /// Set the receive buffer size. The listener always keeps at least one
    /// byte more than a frame so oversize datagrams are detected.
    pub fn with_datagram_buffer(mut self, bytes: usize) -> Self {
        self.datagram_buffer = bytes;
        self
    }

    /// Set whether the motor is stopped when the listener shuts down
    pub fn with_halt_on_close(mut self, halt: bool) -> Self {
        self.halt_on_close = halt;
        self
    }
}

// ============================================================================
// Kinematics Config
// ============================================================================

/// Stick-to-actuator mapping parameters.
///
/// Two presets exist because two firmware revisions were deployed with
/// different tuning; pick one explicitly rather than mixing values.
///
/// | Preset | deadzone | max swing | fold |
/// |--------|----------|-----------|------|
/// | [`narrow`](Self::narrow) (default) | 20° | 40° | [`FoldMode::Inward`] |
/// | [`wide`](Self::wide) | 25° | 60° | [`FoldMode::Outward`] |
///
/// Both use the full 10-bit duty range as speed scale.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicsConfig {
    /// Angle magnitude (degrees) treated as straight ahead
    pub deadzone: f32,
    /// Largest steering deflection from center (degrees)
    pub max_swing: f32,
    /// Fold direction at ±90°
    pub fold: FoldMode,
    /// Duty at full stick deflection (`SPEED_SCALE`)
    pub speed_scale: u32,
}

impl Default for KinematicsConfig {
    fn default() -> Self {
        Self::narrow()
    }
}

impl KinematicsConfig {
    /// 20° deadzone, 40° swing, inward fold.
    pub fn narrow() -> Self {
        Self {
            deadzone: 20.0,
            max_swing: 40.0,
            fold: FoldMode::Inward,
            speed_scale: MAX_DUTY,
        }
    }

    /// 25° deadzone, 60° swing, outward fold.
    pub fn wide() -> Self {
        Self {
            deadzone: 25.0,
            max_swing: 60.0,
            fold: FoldMode::Outward,
            speed_scale: MAX_DUTY,
        }
    }

    /// Set the deadzone (negative values become 0)
    pub fn with_deadzone(mut self, degrees: f32) -> Self {
        self.deadzone = degrees.max(0.0);
        self
    }

    /// Set the maximum swing, limited to 0..=90
    pub fn with_max_swing(mut self, degrees: f32) -> Self {
        self.max_swing = degrees.clamp(0.0, 90.0);
        self
    }

    /// Set the fold mode
    pub fn with_fold(mut self, fold: FoldMode) -> Self {
        self.fold = fold;
        self
    }

    /// Set the speed scale
    pub fn with_speed_scale(mut self, scale: u32) -> Self {
        self.speed_scale = scale;
        self
    }
}

// ============================================================================
// Actuator Config
// ============================================================================

/// Drive motor PWM configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotorConfig {
    /// PWM carrier frequency in Hz
    pub pwm_hz: u32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            pwm_hz: MOTOR_PWM_HZ,
        }
    }
}

impl MotorConfig {
    /// Set the PWM frequency
    pub fn with_pwm_hz(mut self, hz: u32) -> Self {
        self.pwm_hz = hz;
        self
    }
}

/// Steering servo PWM configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServoConfig {
    /// Frame rate in Hz
    pub pwm_hz: u32,
    /// Duty at 0°
    pub duty_min: u32,
    /// Duty at 180°
    pub duty_max: u32,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            pwm_hz: SERVO_PWM_HZ,
            duty_min: SERVO_DUTY_MIN,
            duty_max: SERVO_DUTY_MAX,
        }
    }
}

impl ServoConfig {
    /// Set the duty range; the bounds are swapped if given in reverse order
    pub fn with_duty_range(mut self, min: u32, max: u32) -> Self {
        self.duty_min = min.min(max).min(MAX_DUTY);
        self.duty_max = max.max(min).min(MAX_DUTY);
        self
    }
}

// ============================================================================
// Display Config
// ============================================================================

/// Status panel configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    /// 7-bit I2C address of the panel controller
    pub i2c_address: u8,
    /// I2C clock in Hz
    pub i2c_hz: u32,
    /// Power-up delay before the init sequence, in milliseconds
    pub power_up_delay_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_address: 0x3C,
            i2c_hz: 400_000,
            power_up_delay_ms: 100,
        }
    }
}

impl DisplayConfig {
    /// Set the I2C address
    pub fn with_i2c_address(mut self, address: u8) -> Self {
        self.i2c_address = address;
        self
    }

    /// Set the I2C clock
    pub fn with_i2c_hz(mut self, hz: u32) -> Self {
        self.i2c_hz = hz;
        self
    }
}

// ============================================================================
// WiFi Config
// ============================================================================

/// WiFi connection configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WifiConfig {
    /// WiFi network SSID
    pub ssid: ShortString,
    /// WiFi password
    pub password: ShortString,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            ssid: ShortString::new(),
            password: ShortString::new(),
        }
    }
}

impl WifiConfig {
    /// Set the SSID
    pub fn with_ssid(mut self, ssid: &str) -> Self {
        self.ssid = short_string(ssid);
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = short_string(password);
        self
    }

    /// Check if WiFi credentials are configured
    pub fn is_configured(&self) -> bool {
        !self.ssid.is_empty()
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Human-readable device name, shown on the banner screen
    pub name: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("joydrive"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.network.port, 65000);
        assert_eq!(config.kinematics, KinematicsConfig::narrow());
        assert_eq!(config.servo.duty_min, 51);
        assert_eq!(config.servo.duty_max, 102);
        assert_eq!(config.display.i2c_address, 0x3C);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::default()
            .with_network(NetworkConfig::default().with_port(7000))
            .with_kinematics(KinematicsConfig::wide().with_speed_scale(256))
            .with_device(DeviceConfig::default().with_name("Rover"));

        assert_eq!(config.network.port, 7000);
        assert_eq!(config.kinematics.deadzone, 25.0);
        assert_eq!(config.kinematics.speed_scale, 256);
        assert_eq!(config.device.name.as_str(), "Rover");
    }

    #[test]
    fn presets_differ_explicitly() {
        let narrow = KinematicsConfig::narrow();
        let wide = KinematicsConfig::wide();
        assert_eq!((narrow.deadzone, narrow.max_swing), (20.0, 40.0));
        assert_eq!((wide.deadzone, wide.max_swing), (25.0, 60.0));
        assert_eq!(narrow.fold, FoldMode::Inward);
        assert_eq!(wide.fold, FoldMode::Outward);
    }

    #[test]
    fn kinematics_builder_limits() {
        let cfg = KinematicsConfig::default()
            .with_deadzone(-5.0)
            .with_max_swing(120.0);
        assert_eq!(cfg.deadzone, 0.0);
        assert_eq!(cfg.max_swing, 90.0);
    }

    #[test]
    fn recv_timeout_never_zero() {
        let net = NetworkConfig::default().with_recv_timeout_ms(0);
        assert_eq!(net.recv_timeout_ms, 1);
    }

    #[test]
    fn servo_range_is_ordered() {
        let servo = ServoConfig::default().with_duty_range(110, 40);
        assert_eq!((servo.duty_min, servo.duty_max), (40, 110));
    }

    #[test]
    fn wifi_config_is_configured() {
        assert!(!WifiConfig::default().is_configured());
        assert!(WifiConfig::default().with_ssid("HomeWifi").is_configured());
        assert!(!WifiConfig::default().with_ssid("").is_configured());
    }

    #[test]
    fn short_string_truncation() {
        let long_input = "a".repeat(100);
        let s = short_string(&long_input);
        assert_eq!(s.len(), MAX_SHORT_STRING);
    }

    #[test]
    fn short_string_utf8_boundary() {
        // 3 bytes each: 22 of them is 66 bytes, only 21 fit
        let input = "€".repeat(22);
        let s = short_string(&input);
        assert_eq!(s.len(), 63);
        assert!(s.chars().all(|c| c == '€'));
    }
}
