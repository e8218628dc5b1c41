//! Desktop receiver example with mock hardware.
//!
//! Runs the full receive path on the desktop: the listener binds a UDP port,
//! a sender thread plays a short joystick script at it, and the mock motor,
//! servo and panel show what the rover would do.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example desktop_receiver
//! ```
//!
//! Pass a port number to listen somewhere other than the default 65000:
//!
//! ```sh
//! cargo run --example desktop_receiver -- 7000
//! ```
//!
//! While it runs, any other sender can push 6-byte frames at the port too.

use std::net::{Ipv4Addr, UdpSocket};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use joydrive::display::{Framebuffer, Ssd1306, HEIGHT, WIDTH};
use joydrive::hal::{MockBus, MockMotor, MockServo};
use joydrive::{
    Config, ConnectivitySignal, ControlLoop, JoystickFrame, ListenerCoordinator, NetworkConfig,
    NetworkEvent, Supervisor,
};

type DemoControl = ControlLoop<MockMotor, MockServo, MockBus>;

/// Stick positions played by the sender: (x, y, label).
const SCRIPT: &[(i16, i16, &str)] = &[
    (0, 200, "full ahead"),
    (60, 180, "slight right"),
    (200, 0, "hard right, stopped"),
    (-120, 120, "left, half speed"),
    (0, -200, "full reverse"),
    (0, 0, "centered"),
];

fn main() -> anyhow::Result<()> {
    println!("=================================");
    println!("  joydrive Desktop Receiver");
    println!("=================================");
    println!();

    let port = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => joydrive::config::DEFAULT_UDP_PORT,
    };

    // Central configuration - modify this for your setup
    let config = Config::default().with_network(NetworkConfig::default().with_port(port));

    let control: DemoControl = ControlLoop::from_config(
        MockMotor::new(),
        MockServo::new(),
        Ssd1306::new(MockBus::new()),
        &config,
    );
    let listener = Arc::new(ListenerCoordinator::new(
        Arc::new(Mutex::new(control)),
        Arc::new(ConnectivitySignal::new()),
        config.network.clone(),
    ));
    let supervisor = Supervisor::new(Arc::clone(&listener));
    supervisor.show_banner(&config.device.name);

    supervisor.handle(&NetworkEvent::Connected {
        ip: Ipv4Addr::LOCALHOST,
    })?;

    let deadline = Instant::now() + Duration::from_secs(2);
    let addr = loop {
        if let Some(addr) = listener.local_addr() {
            break addr;
        }
        if Instant::now() > deadline {
            anyhow::bail!("listener did not bind port {}", port);
        }
        thread::sleep(Duration::from_millis(5));
    };
    println!("Listening on {}", addr);
    println!();

    let sender = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0))?;
    let target = (Ipv4Addr::LOCALHOST, addr.port());

    for (x, y, label) in SCRIPT {
        sender.send_to(&JoystickFrame::new(*x, *y, 256).encode(), target)?;
        thread::sleep(Duration::from_millis(100));

        let control = listener
            .handler()
            .lock()
            .map_err(|_| anyhow::anyhow!("control loop lock poisoned"))?;
        let motor = control.motor();
        let servo = control.servo();
        println!(
            "{:<22} x {:>4} y {:>4} -> {:<7} duty {:>4}  servo {:>3}° (duty {})",
            label,
            x,
            y,
            motor.direction.as_str(),
            motor.duty,
            servo.angle,
            servo.duty
        );
    }

    // Wrong length: logged and dropped
    sender.send_to(&[1, 2, 3, 4, 5], target)?;
    thread::sleep(Duration::from_millis(50));

    println!();
    println!("Last frame on the panel:");
    {
        let control = listener
            .handler()
            .lock()
            .map_err(|_| anyhow::anyhow!("control loop lock poisoned"))?;
        print_panel(control.panel().framebuffer());
    }

    supervisor.handle(&NetworkEvent::Disconnected)?;
    println!();
    println!("Listener stopped; port {} released.", addr.port());
    Ok(())
}

/// Prints the panel at half resolution, two pixel rows per text line.
fn print_panel(fb: &Framebuffer) {
    println!("+{}+", "-".repeat(WIDTH / 2));
    for y in (0..HEIGHT).step_by(2) {
        let line: String = (0..WIDTH)
            .step_by(2)
            .map(|x| {
                let lit = fb.pixel(x, y) || fb.pixel(x + 1, y) || fb.pixel(x, y + 1);
                if lit {
                    '#'
                } else {
                    ' '
                }
            })
            .collect();
        println!("|{}|", line);
    }
    println!("+{}+", "-".repeat(WIDTH / 2));
}
