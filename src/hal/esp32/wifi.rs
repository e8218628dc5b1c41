//! WiFi station management for ESP32.
//!
//! Connects in station mode using esp-idf-svc and reports link changes as
//! [`NetworkEvent`]s for the [`Supervisor`](crate::supervisor::Supervisor).
//!
//! # Example
//!
//! ```ignore
//! use joydrive::hal::esp32::Esp32Wifi;
//! use joydrive::config::WifiConfig;
//!
//! let config = WifiConfig::default()
//!     .with_ssid("MyNetwork")
//!     .with_password("secret123");
//!
//! let mut wifi = Esp32Wifi::new(modem, sysloop, nvs, &config)?;
//! for event in wifi.connect() {
//!     supervisor.handle(&event)?;
//! }
//! loop {
//!     if let Some(event) = wifi.poll() {
//!         supervisor.handle(&event)?;
//!     }
//! }
//! ```

use std::net::Ipv4Addr;

use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use log::{info, warn};

use crate::config::WifiConfig;
use crate::traits::{NetworkEvent, ProvisioningFailure};

/// WiFi station for ESP32.
///
/// Credentials are applied at construction; [`connect`](Self::connect) and
/// [`poll`](Self::poll) drive the link and translate its state into events.
pub struct Esp32Wifi<'a> {
    wifi: BlockingWifi<EspWifi<'a>>,
    config: WifiConfig,
    link_up: bool,
}

impl<'a> Esp32Wifi<'a> {
    /// Initializes the driver in station mode with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver cannot be created, configured or started.
    pub fn new(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: Option<EspDefaultNvsPartition>,
        config: &WifiConfig,
    ) -> anyhow::Result<Self> {
        let esp_wifi = EspWifi::new(modem, sysloop.clone(), nvs)?;
        let mut wifi = BlockingWifi::wrap(esp_wifi, sysloop)?;

        let mut ssid_buf: heapless::String<32> = heapless::String::new();
        ssid_buf
            .push_str(config.ssid.as_str())
            .map_err(|_| anyhow::anyhow!("SSID longer than 32 bytes"))?;

        let mut pass_buf: heapless::String<64> = heapless::String::new();
        let _ = pass_buf.push_str(config.password.as_str());

        wifi.set_configuration(&Configuration::Client(ClientConfiguration {
            ssid: ssid_buf,
            password: pass_buf,
            ..Default::default()
        }))?;

        info!("WiFi starting");
        wifi.start()?;

        Ok(Self {
            wifi,
            config: config.clone(),
            link_up: false,
        })
    }

    /// Connects and waits for DHCP, returning the events that happened.
    ///
    /// A failed attempt yields `ProvisioningFailed`; call again to retry.
    pub fn connect(&mut self) -> Vec<NetworkEvent> {
        let mut events = vec![NetworkEvent::CredentialsReceived {
            ssid: self.config.ssid.clone(),
        }];

        info!("WiFi connecting to '{}'", self.config.ssid);
        if let Err(e) = self.wifi.connect() {
            warn!("WiFi connect failed: {:?}", e);
            events.push(NetworkEvent::ProvisioningFailed(ProvisioningFailure::ApNotFound));
            return events;
        }
        if let Err(e) = self.wifi.wait_netif_up() {
            warn!("WiFi DHCP failed: {:?}", e);
            events.push(NetworkEvent::ProvisioningFailed(ProvisioningFailure::AuthError));
            return events;
        }

        events.push(NetworkEvent::ProvisioningSucceeded);
        if let Some(ip) = self.ip_addr() {
            self.link_up = true;
            events.push(NetworkEvent::Connected { ip });
        }
        events
    }

    /// Reports a link change since the last call, if any.
    pub fn poll(&mut self) -> Option<NetworkEvent> {
        let connected = self.is_connected();
        match (self.link_up, connected) {
            (true, false) => {
                self.link_up = false;
                Some(NetworkEvent::Disconnected)
            }
            (false, true) => {
                let ip = self.ip_addr()?;
                self.link_up = true;
                Some(NetworkEvent::Connected { ip })
            }
            _ => None,
        }
    }

    /// Get the current IP address, if connected.
    pub fn ip_addr(&self) -> Option<Ipv4Addr> {
        self.wifi
            .wifi()
            .sta_netif()
            .get_ip_info()
            .ok()
            .map(|info| info.ip)
            .filter(|ip| !ip.is_unspecified())
    }

    /// Check if WiFi is connected.
    pub fn is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
    }
}
