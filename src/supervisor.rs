//! Network event dispatch.
//!
//! [`Supervisor`] is the single consumer of [`NetworkEvent`]s. It keeps the
//! readiness signal in step with the link, starts and stops the listener,
//! and puts the matching status screen on the panel.
//!
//! | Event | Readiness | Listener | Screen |
//! |-------|-----------|----------|--------|
//! | `ProvisioningStarted` | | stop | provisioning notice |
//! | `CredentialsReceived` | | | SSID |
//! | `ProvisioningFailed` | | | |
//! | `ProvisioningSucceeded` | | | |
//! | `Connected` | set | start | IP and port |
//! | `Disconnected` | clear | stop | disconnected notice |

use std::sync::{Arc, PoisonError};

use log::{error, info, warn};

use crate::display::StatusScreen;
use crate::listener::{ListenerCoordinator, ListenerError};
use crate::traits::{FrameHandler, NetworkEvent, StatusReporter};

/// Turns connectivity events into listener and display actions.
///
/// # Example
///
/// ```rust,no_run
/// use std::net::Ipv4Addr;
/// use std::sync::{Arc, Mutex};
/// use joydrive::config::Config;
/// use joydrive::connectivity::ConnectivitySignal;
/// use joydrive::control::ControlLoop;
/// use joydrive::display::Ssd1306;
/// use joydrive::hal::{MockBus, MockMotor, MockServo};
/// use joydrive::listener::ListenerCoordinator;
/// use joydrive::supervisor::Supervisor;
/// use joydrive::traits::NetworkEvent;
///
/// let config = Config::default();
/// let control = ControlLoop::from_config(
///     MockMotor::new(),
///     MockServo::new(),
///     Ssd1306::new(MockBus::new()),
///     &config,
/// );
/// let listener = ListenerCoordinator::new(
///     Arc::new(Mutex::new(control)),
///     Arc::new(ConnectivitySignal::new()),
///     config.network.clone(),
/// );
///
/// let supervisor = Supervisor::new(Arc::new(listener));
/// supervisor.handle(&NetworkEvent::Connected { ip: Ipv4Addr::new(192, 168, 1, 20) })?;
/// assert!(supervisor.listener().is_running());
/// supervisor.handle(&NetworkEvent::Disconnected)?;
/// # Ok::<(), joydrive::listener::ListenerError>(())
/// ```
#[derive(Debug)]
pub struct Supervisor<H> {
    listener: Arc<ListenerCoordinator<H>>,
}

impl<H> Supervisor<H>
where
    H: FrameHandler + StatusReporter + Send + 'static,
{
    /// Creates a supervisor driving `listener`.
    pub fn new(listener: Arc<ListenerCoordinator<H>>) -> Self {
        Self { listener }
    }

    /// The coordinator being driven.
    pub fn listener(&self) -> &Arc<ListenerCoordinator<H>> {
        &self.listener
    }

    /// Applies one event. Listener errors are logged and returned.
    pub fn handle(&self, event: &NetworkEvent) -> Result<(), ListenerError> {
        match event {
            NetworkEvent::ProvisioningStarted => {
                info!("provisioning started");
                let stopped = self.stop_listener();
                self.show(&StatusScreen::ProvisioningStarted);
                stopped
            }
            NetworkEvent::CredentialsReceived { ssid } => {
                info!("received credentials for \"{}\"", ssid);
                self.show(&StatusScreen::CredentialsReceived {
                    ssid: ssid.as_str(),
                });
                Ok(())
            }
            NetworkEvent::ProvisioningFailed(reason) => {
                warn!("provisioning failed: {}", reason.as_str());
                Ok(())
            }
            NetworkEvent::ProvisioningSucceeded => {
                info!("provisioning succeeded");
                Ok(())
            }
            NetworkEvent::Connected { ip } => {
                info!("network up, address {}", ip);
                self.show(&StatusScreen::IpConfig {
                    ip: *ip,
                    port: self.listener.config().port,
                });
                self.listener.signal().set_ready();
                self.listener.start().map_err(|e| {
                    error!("{}", e);
                    e
                })
            }
            NetworkEvent::Disconnected => {
                info!("network down");
                self.listener.signal().clear();
                let stopped = self.stop_listener();
                self.show(&StatusScreen::Disconnected);
                stopped
            }
        }
    }

    /// Shows the device name.
    pub fn show_banner(&self, name: &str) {
        self.show(&StatusScreen::Banner { name });
    }

    fn stop_listener(&self) -> Result<(), ListenerError> {
        self.listener.stop().map_err(|e| {
            error!("{}", e);
            e
        })
    }

    // Never called with the listener mid-stop: the receiving task takes the
    // same lock for its close notice.
    fn show(&self, screen: &StatusScreen<'_>) {
        self.listener
            .handler()
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .show_status(screen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{short_string, NetworkConfig};
    use crate::connectivity::ConnectivitySignal;
    use crate::frame::JoystickFrame;
    use crate::listener::ListenerState;
    use crate::traits::ProvisioningFailure;
    use std::net::Ipv4Addr;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    #[derive(Debug, Default)]
    struct Recorder {
        screens: Vec<String>,
        closed: usize,
    }

    impl FrameHandler for Recorder {
        fn on_frame(&mut self, _frame: &JoystickFrame) {}
        fn on_listener_closed(&mut self) {
            self.closed += 1;
        }
    }

    impl StatusReporter for Recorder {
        fn show_status(&mut self, screen: &StatusScreen<'_>) {
            self.screens.push(format!("{:?}", screen));
        }
    }

    fn supervisor() -> Supervisor<Recorder> {
        let listener = ListenerCoordinator::new(
            Arc::new(Mutex::new(Recorder::default())),
            Arc::new(ConnectivitySignal::new()),
            NetworkConfig::default().with_port(0).with_recv_timeout_ms(10),
        );
        Supervisor::new(Arc::new(listener))
    }

    fn recorder(sup: &Supervisor<Recorder>) -> std::sync::MutexGuard<'_, Recorder> {
        sup.listener().handler().lock().unwrap()
    }

    fn wait_bound(sup: &Supervisor<Recorder>) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while sup.listener().local_addr().is_none() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn connect_sets_ready_and_starts() {
        let sup = supervisor();
        sup.handle(&NetworkEvent::Connected {
            ip: Ipv4Addr::new(10, 0, 0, 2),
        })
        .unwrap();

        assert!(sup.listener().signal().is_ready());
        assert_eq!(sup.listener().state(), ListenerState::Running);
        assert!(recorder(&sup).screens[0].starts_with("IpConfig"));
        sup.listener().stop().unwrap();
    }

    #[test]
    fn disconnect_clears_ready_and_stops() {
        let sup = supervisor();
        sup.handle(&NetworkEvent::Connected {
            ip: Ipv4Addr::new(10, 0, 0, 2),
        })
        .unwrap();
        wait_bound(&sup);
        sup.handle(&NetworkEvent::Disconnected).unwrap();

        assert!(!sup.listener().signal().is_ready());
        assert_eq!(sup.listener().state(), ListenerState::Idle);
        let rec = recorder(&sup);
        assert_eq!(rec.closed, 1);
        assert_eq!(rec.screens.last().map(String::as_str), Some("Disconnected"));
    }

    #[test]
    fn provisioning_start_stops_listener() {
        let sup = supervisor();
        sup.handle(&NetworkEvent::Connected {
            ip: Ipv4Addr::new(10, 0, 0, 2),
        })
        .unwrap();
        sup.handle(&NetworkEvent::ProvisioningStarted).unwrap();

        assert_eq!(sup.listener().state(), ListenerState::Idle);
        assert_eq!(
            recorder(&sup).screens.last().map(String::as_str),
            Some("ProvisioningStarted")
        );
    }

    #[test]
    fn repeated_connect_is_idempotent() {
        let sup = supervisor();
        let up = NetworkEvent::Connected {
            ip: Ipv4Addr::new(10, 0, 0, 2),
        };
        sup.handle(&up).unwrap();
        sup.handle(&up).unwrap();
        assert!(sup.listener().is_running());
        sup.handle(&NetworkEvent::Disconnected).unwrap();
        sup.handle(&NetworkEvent::Disconnected).unwrap();
        assert!(!sup.listener().is_running());
    }

    #[test]
    fn provisioning_outcomes_leave_listener_alone() {
        let sup = supervisor();
        sup.handle(&NetworkEvent::ProvisioningFailed(ProvisioningFailure::AuthError))
            .unwrap();
        sup.handle(&NetworkEvent::ProvisioningSucceeded).unwrap();
        assert_eq!(sup.listener().state(), ListenerState::Idle);
        assert!(recorder(&sup).screens.is_empty());
    }

    #[test]
    fn credentials_show_ssid_only() {
        let sup = supervisor();
        sup.handle(&NetworkEvent::CredentialsReceived {
            ssid: short_string("workshop"),
        })
        .unwrap();
        let rec = recorder(&sup);
        assert!(rec.screens[0].contains("workshop"));
    }
}
