//! ESP32 joystick rover receiver.
//!
//! This is the main entry point for the physical hardware. It:
//! - Brings up the motor, the steering servo and the OLED panel
//! - Connects to WiFi in station mode (if enabled)
//! - Runs the UDP listener while the network is up, one frame per datagram
//!
//! # Build
//!
//! ```bash
//! # Actuators and display only
//! cargo build --release --features esp32
//!
//! # With WiFi (credentials from the build environment)
//! WIFI_SSID=... WIFI_PASSWORD=... cargo build --release --features wifi
//! ```

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::log::EspLogger;
use joydrive::hal::esp32::{open_panel, Esp32Motor, Esp32Servo};
use joydrive::{Config, ConnectivitySignal, ControlLoop, ListenerCoordinator, Supervisor, WifiConfig};
use log::{info, warn};

/// How often the WiFi link is polled for changes.
const LINK_POLL_INTERVAL: Duration = Duration::from_millis(500);

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    EspLogger::initialize_default();

    // =========================================================================
    // Configuration
    // =========================================================================
    let config = Config::default().with_wifi(
        WifiConfig::default()
            .with_ssid(option_env!("WIFI_SSID").unwrap_or(""))
            .with_password(option_env!("WIFI_PASSWORD").unwrap_or("")),
    );
    info!("{} starting", config.device.name);

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Actuators (motor PWM GPIO5, direction GPIO18/19; servo GPIO13)
    // =========================================================================
    let motor = Esp32Motor::new(
        peripherals.pins.gpio5,
        peripherals.pins.gpio18.downgrade_output(),
        peripherals.pins.gpio19.downgrade_output(),
        peripherals.ledc.timer0,
        peripherals.ledc.channel0,
        &config.motor,
    )?;
    info!("motor initialized");

    let servo = Esp32Servo::new(
        peripherals.pins.gpio13,
        peripherals.ledc.timer1,
        peripherals.ledc.channel1,
        &config.servo,
    )?;
    info!("servo initialized");

    // =========================================================================
    // Display (SSD1306 on GPIO21/22)
    // =========================================================================
    let panel = open_panel(
        peripherals.i2c0,
        peripherals.pins.gpio21,
        peripherals.pins.gpio22,
        &config.display,
    )?;
    info!("display initialized");

    // =========================================================================
    // Listener and event dispatch
    // =========================================================================
    let control = ControlLoop::from_config(motor, servo, panel, &config);
    let listener = ListenerCoordinator::new(
        Arc::new(Mutex::new(control)),
        Arc::new(ConnectivitySignal::new()),
        config.network.clone(),
    );
    let supervisor = Supervisor::new(Arc::new(listener));
    supervisor.show_banner(&config.device.name);

    #[cfg(feature = "wifi")]
    {
        use esp_idf_svc::eventloop::EspSystemEventLoop;
        use esp_idf_svc::nvs::EspDefaultNvsPartition;
        use joydrive::hal::esp32::Esp32Wifi;
        use joydrive::NetworkEvent;

        if !config.wifi.is_configured() {
            anyhow::bail!("WiFi not configured (set WIFI_SSID/WIFI_PASSWORD)");
        }

        let sysloop = EspSystemEventLoop::take()?;
        let nvs = EspDefaultNvsPartition::take()?;
        let mut wifi = Esp32Wifi::new(peripherals.modem, sysloop, Some(nvs), &config.wifi)?;

        let dispatch = |event: &NetworkEvent| {
            if let Err(e) = supervisor.handle(event) {
                warn!("event {:?} not fully handled: {}", event, e);
            }
        };

        dispatch(&NetworkEvent::ProvisioningStarted);
        loop {
            let events = wifi.connect();
            let up = events
                .iter()
                .any(|e| matches!(e, NetworkEvent::Connected { .. }));
            events.iter().for_each(dispatch);
            if up {
                break;
            }
            thread::sleep(LINK_POLL_INTERVAL);
        }

        loop {
            if let Some(event) = wifi.poll() {
                dispatch(&event);
            }
            if !wifi.is_connected() {
                wifi.connect()
                    .iter()
                    .filter(|e| matches!(e, NetworkEvent::Connected { .. }))
                    .for_each(dispatch);
            }
            thread::sleep(LINK_POLL_INTERVAL);
        }
    }

    #[cfg(not(feature = "wifi"))]
    {
        warn!("built without WiFi; listener stays idle");
        loop {
            thread::sleep(LINK_POLL_INTERVAL);
        }
    }
}
