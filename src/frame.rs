//! Joystick datagram decoding.
//!
//! Every UDP datagram is one complete joystick sample: exactly
//! [`FRAME_LEN`] bytes, three little-endian signed 16-bit fields.
//!
//! ```text
//! offset  0      2      4      6
//!         +------+------+------+
//!         |  x   |  y   | lim  |
//!         +------+------+------+
//! ```
//!
//! Anything of a different length is rejected without looking at the
//! contents. There is no reassembly and no sequencing; a lost datagram
//! simply leaves the actuators where the previous frame put them.

/// Wire size of one joystick frame in bytes.
pub const FRAME_LEN: usize = 6;

/// One joystick sample as sent by the remote controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JoystickFrame {
    /// Horizontal stick axis (steering), nominally -200..=200.
    pub x: i16,
    /// Vertical stick axis (drive), nominally -200..=200.
    pub y: i16,
    /// Speed ceiling reported by the controller.
    ///
    /// Carried on the wire but not used by the mapping; duty is scaled by
    /// [`KinematicsConfig::speed_scale`](crate::config::KinematicsConfig).
    pub speed_limit: i16,
}

impl JoystickFrame {
    /// Creates a frame from its three fields.
    pub const fn new(x: i16, y: i16, speed_limit: i16) -> Self {
        Self { x, y, speed_limit }
    }

    /// Decodes a datagram, returning `None` unless it is exactly
    /// [`FRAME_LEN`] bytes long.
    ///
    /// # Example
    ///
    /// ```
    /// use joydrive::JoystickFrame;
    ///
    /// let frame = JoystickFrame::decode(&[0x00, 0x00, 0xC8, 0x00, 0x00, 0x01]).unwrap();
    /// assert_eq!(frame, JoystickFrame::new(0, 200, 256));
    ///
    /// assert!(JoystickFrame::decode(&[0; 5]).is_none());
    /// ```
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; FRAME_LEN] = bytes.try_into().ok()?;
        Some(Self {
            x: i16::from_le_bytes([bytes[0], bytes[1]]),
            y: i16::from_le_bytes([bytes[2], bytes[3]]),
            speed_limit: i16::from_le_bytes([bytes[4], bytes[5]]),
        })
    }

    /// Encodes the frame into its wire form.
    pub fn encode(&self) -> [u8; FRAME_LEN] {
        let mut out = [0u8; FRAME_LEN];
        out[0..2].copy_from_slice(&self.x.to_le_bytes());
        out[2..4].copy_from_slice(&self.y.to_le_bytes());
        out[4..6].copy_from_slice(&self.speed_limit.to_le_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_little_endian_fields() {
        let frame = JoystickFrame::decode(&[0x38, 0xFF, 0xC8, 0x00, 0x00, 0x01]).unwrap();
        assert_eq!(frame.x, -200);
        assert_eq!(frame.y, 200);
        assert_eq!(frame.speed_limit, 256);
    }

    #[test]
    fn rejects_every_other_length() {
        let buf = [0u8; 128];
        for len in (0..buf.len()).filter(|&n| n != FRAME_LEN) {
            assert!(JoystickFrame::decode(&buf[..len]).is_none(), "len {len}");
        }
    }

    #[test]
    fn encode_matches_wire_layout() {
        let frame = JoystickFrame::new(-1, 0x1234, i16::MIN);
        assert_eq!(frame.encode(), [0xFF, 0xFF, 0x34, 0x12, 0x00, 0x80]);
        assert_eq!(JoystickFrame::decode(&frame.encode()), Some(frame));
    }
}
