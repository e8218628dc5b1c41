//! Network-facing traits and the connectivity event contract.
//!
//! The receiving task hands every decoded datagram to a [`FrameHandler`].
//! The connectivity collaborator (WiFi station, provisioning manager, or a
//! desktop stand-in) reports state changes as [`NetworkEvent`]s, which the
//! [`Supervisor`](crate::supervisor::Supervisor) turns into listener
//! start/stop requests.
//!
//! # Event flow
//!
//! ```text
//! ProvisioningStarted  -> stop listener
//! CredentialsReceived  -> status screen only
//! Connected { ip }     -> readiness set, start listener
//! Disconnected         -> readiness cleared, stop listener
//! ```

use core::net::Ipv4Addr;

use crate::config::ShortString;
use crate::frame::JoystickFrame;

/// Consumer of decoded joystick frames.
///
/// Runs on the receiving task. Calls are strictly sequential; an
/// implementation never sees two frames concurrently.
pub trait FrameHandler {
    /// Handles one valid frame: map, actuate, echo to the display.
    fn on_frame(&mut self, frame: &JoystickFrame);

    /// Called once after the socket has been closed, before the task ends.
    fn on_listener_closed(&mut self);
}

/// Why provisioning failed to bring up the station link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProvisioningFailure {
    /// The access point rejected the credentials.
    AuthError,
    /// The access point could not be found.
    ApNotFound,
}

impl ProvisioningFailure {
    /// Human-readable reason.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProvisioningFailure::AuthError => "authentication error",
            ProvisioningFailure::ApNotFound => "access point not found",
        }
    }
}

/// Notification from the connectivity collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkEvent {
    /// The provisioning manager started advertising.
    ProvisioningStarted,
    /// Station credentials arrived from the provisioning client.
    CredentialsReceived {
        /// Network SSID (the password is never carried here).
        ssid: ShortString,
    },
    /// The provisioned credentials did not work.
    ProvisioningFailed(ProvisioningFailure),
    /// The provisioned credentials produced a working link.
    ProvisioningSucceeded,
    /// The station obtained an address; the network path is usable.
    Connected {
        /// Address assigned to the station interface.
        ip: Ipv4Addr,
    },
    /// The station link dropped.
    Disconnected,
}
