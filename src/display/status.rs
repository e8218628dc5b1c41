//! Whole-screen status layouts.
//!
//! Each [`StatusScreen`] knows where its text goes. Rendering always starts
//! from a cleared framebuffer.

use core::net::Ipv4Addr;

use super::framebuffer::Framebuffer;

/// Something worth putting on the panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatusScreen<'a> {
    /// Raw stick axes and the computed steering angle.
    FrameEcho {
        /// Horizontal axis as received.
        x: i16,
        /// Vertical axis as received.
        y: i16,
        /// Signed steering offset in degrees.
        angle: f32,
    },
    /// The receiving socket was closed.
    ListenerClosed,
    /// Station address and the port frames are accepted on.
    IpConfig {
        /// Station address.
        ip: Ipv4Addr,
        /// UDP port.
        port: u16,
    },
    /// The station link dropped.
    Disconnected,
    /// Provisioning is advertising and waiting for a client.
    ProvisioningStarted,
    /// Credentials arrived for this network.
    CredentialsReceived {
        /// Network name.
        ssid: &'a str,
    },
    /// Device name, shown once at boot.
    Banner {
        /// Device name.
        name: &'a str,
    },
}

impl StatusScreen<'_> {
    /// Draws this screen into `fb`.
    pub fn render(&self, fb: &mut Framebuffer) {
        fb.clear();
        match *self {
            StatusScreen::FrameEcho { x, y, angle } => {
                fb.print_fmt(0, 0, format_args!("x = {}", x));
                fb.print_fmt(0, 1, format_args!("y = {}", y));
                fb.print_fmt(0, 3, format_args!("angle = {:.2}", angle));
            }
            StatusScreen::ListenerClosed => fb.draw_string(0, 5, "close Socket UDP"),
            StatusScreen::IpConfig { ip, port } => {
                fb.draw_string(10, 0, "IP Config");
                fb.print_fmt(0, 1, format_args!("port: {}", port));
                fb.print_fmt(0, 2, format_args!("ip: {}", ip));
            }
            StatusScreen::Disconnected => fb.draw_string(5, 3, "Disconnected"),
            StatusScreen::ProvisioningStarted => fb.draw_string(0, 5, "Start provisioning"),
            StatusScreen::CredentialsReceived { ssid } => {
                fb.draw_string(10, 0, "Connected wifi");
                fb.print_fmt(0, 2, format_args!("ssid: {}", ssid));
            }
            StatusScreen::Banner { name } => fb.draw_string(0, 0, name),
        }
    }
}
