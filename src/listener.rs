//! UDP listener lifecycle.
//!
//! [`ListenerCoordinator`] owns at most one receiving task. The task binds
//! the configured port on all interfaces and feeds every 6-byte datagram to
//! a shared [`FrameHandler`].
//!
//! # Lifecycle
//!
//! ```text
//!            start()                      stop()
//!   Idle ───────────────▶ Running ───────────────▶ Idle
//!    ▲                       │
//!    └── bind failed ────────┘   (reaped on the next start/stop)
//! ```
//!
//! Inside the task:
//!
//! 1. Wait for the [`ConnectivitySignal`], checking the running flag every
//!    receive timeout.
//! 2. Bind `0.0.0.0:port` with a read timeout of `recv_timeout_ms`.
//! 3. Loop while the running flag is set: receive, decode, hand to the
//!    handler, yield `frame_yield_ms`.
//! 4. Close the socket and call [`FrameHandler::on_listener_closed`].
//!
//! Cancellation is cooperative. [`stop`](ListenerCoordinator::stop) clears
//! the flag, waits for the task's exit notice and joins; the receive timeout
//! bounds how long that takes. State queries stay available while a stop is
//! in progress. The task always runs its own cleanup, so the port can be
//! bound again as soon as `stop()` returns.

use std::io;
use std::net::{Ipv4Addr, SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::config::NetworkConfig;
use crate::connectivity::ConnectivitySignal;
use crate::frame::{JoystickFrame, FRAME_LEN};
use crate::traits::FrameHandler;

/// Thread name of the receiving task.
pub const TASK_NAME: &str = "udp_listener";

/// Coordinator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ListenerState {
    /// No receiving task.
    #[default]
    Idle,
    /// A receiving task exists and has not been told to stop.
    Running,
}

/// Listener failure.
#[derive(Debug)]
pub enum ListenerError {
    /// The UDP socket could not be bound or configured.
    Bind {
        /// Port that was requested.
        port: u16,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The receiving thread could not be created.
    Spawn(io::Error),
}

impl core::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ListenerError::Bind { port, source } => {
                write!(f, "failed to bind UDP port {}: {}", port, source)
            }
            ListenerError::Spawn(e) => write!(f, "failed to spawn listener task: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListenerError::Bind { source, .. } => Some(source),
            ListenerError::Spawn(e) => Some(e),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: ListenerState,
    handle: Option<JoinHandle<Result<(), ListenerError>>>,
    // disconnects when the task returns
    exited: Option<Receiver<()>>,
    running: Arc<AtomicBool>,
}

/// Starts and stops the receiving task.
///
/// All methods take `&self`; state and the task handle sit behind one mutex,
/// so the coordinator can be shared between the event dispatcher and
/// whatever else needs to query it.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::{Arc, Mutex};
/// use joydrive::config::NetworkConfig;
/// use joydrive::connectivity::ConnectivitySignal;
/// use joydrive::listener::{ListenerCoordinator, ListenerState};
/// use joydrive::traits::FrameHandler;
/// use joydrive::JoystickFrame;
///
/// struct Print;
/// impl FrameHandler for Print {
///     fn on_frame(&mut self, frame: &JoystickFrame) {
///         println!("{:?}", frame);
///     }
///     fn on_listener_closed(&mut self) {}
/// }
///
/// let signal = Arc::new(ConnectivitySignal::new());
/// let listener = ListenerCoordinator::new(
///     Arc::new(Mutex::new(Print)),
///     Arc::clone(&signal),
///     NetworkConfig::default(),
/// );
///
/// signal.set_ready();
/// listener.start()?;
/// assert_eq!(listener.state(), ListenerState::Running);
/// listener.stop()?;
/// # Ok::<(), joydrive::listener::ListenerError>(())
/// ```
pub struct ListenerCoordinator<H> {
    handler: Arc<Mutex<H>>,
    signal: Arc<ConnectivitySignal>,
    config: NetworkConfig,
    bound: Arc<Mutex<Option<SocketAddr>>>,
    inner: Mutex<Inner>,
    // serializes start/stop without blocking state queries
    lifecycle: Mutex<()>,
}

impl<H> core::fmt::Debug for ListenerCoordinator<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListenerCoordinator")
            .field("config", &self.config)
            .field("local_addr", &self.local_addr())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<H> ListenerCoordinator<H> {
    /// Creates an idle coordinator.
    pub fn new(
        handler: Arc<Mutex<H>>,
        signal: Arc<ConnectivitySignal>,
        config: NetworkConfig,
    ) -> Self {
        Self {
            handler,
            signal,
            config,
            bound: Arc::new(Mutex::new(None)),
            inner: Mutex::new(Inner::default()),
            lifecycle: Mutex::new(()),
        }
    }

    /// Current state. A task that exited on its own reports [`ListenerState::Idle`].
    pub fn state(&self) -> ListenerState {
        let inner = lock(&self.inner);
        match &inner.handle {
            Some(handle) if handle.is_finished() => ListenerState::Idle,
            _ => inner.state,
        }
    }

    /// Returns `true` while a task is running.
    pub fn is_running(&self) -> bool {
        self.state() == ListenerState::Running
    }

    /// Address the socket is bound to, while bound.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        *lock(&self.bound)
    }

    /// The shared frame handler.
    pub fn handler(&self) -> &Arc<Mutex<H>> {
        &self.handler
    }

    /// The readiness signal the task waits on.
    pub fn signal(&self) -> &Arc<ConnectivitySignal> {
        &self.signal
    }

    /// Listener configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }
}

impl<H> ListenerCoordinator<H>
where
    H: FrameHandler + Send + 'static,
{
    /// Spawns the receiving task. No-op while already running.
    ///
    /// A task that ended on its own (bind failure) is reaped first, so a
    /// later `start()` retries the bind.
    pub fn start(&self) -> Result<(), ListenerError> {
        let _lifecycle = lock(&self.lifecycle);
        let mut inner = lock(&self.inner);
        let alive = inner.handle.as_ref().is_some_and(|h| !h.is_finished());
        if inner.state == ListenerState::Running && alive {
            debug!("listener already running");
            return Ok(());
        }
        if let Err(e) = Self::reap(&mut inner) {
            warn!("previous listener task ended with: {}", e);
        }

        let running = Arc::new(AtomicBool::new(true));
        let (exit_tx, exited) = mpsc::channel::<()>();
        let task = ReceiveTask {
            handler: Arc::clone(&self.handler),
            signal: Arc::clone(&self.signal),
            config: self.config.clone(),
            bound: Arc::clone(&self.bound),
            running: Arc::clone(&running),
        };
        let handle = thread::Builder::new()
            .name(TASK_NAME.into())
            .stack_size(self.config.task_stack_bytes)
            .spawn(move || {
                let _exit = exit_tx;
                task.run()
            })
            .map_err(ListenerError::Spawn)?;

        inner.running = running;
        inner.handle = Some(handle);
        inner.exited = Some(exited);
        inner.state = ListenerState::Running;
        info!("listener started for port {}", self.config.port);
        Ok(())
    }

    /// Tells the receiving task to exit and waits for it. No-op while idle.
    ///
    /// Returns the task's own error if it had already failed to bind.
    pub fn stop(&self) -> Result<(), ListenerError> {
        let _lifecycle = lock(&self.lifecycle);
        let (handle, exited) = {
            let mut inner = lock(&self.inner);
            if inner.state == ListenerState::Idle {
                return Ok(());
            }
            inner.running.store(false, Ordering::Release);
            inner.state = ListenerState::Idle;
            (inner.handle.take(), inner.exited.take())
        };

        if let Some(exited) = exited {
            let grace = Duration::from_millis(u64::from(self.config.stop_grace_ms));
            if let Err(RecvTimeoutError::Timeout) = exited.recv_timeout(grace) {
                warn!(
                    "listener still running {} ms after stop, waiting for receive timeout",
                    grace.as_millis()
                );
            }
        }
        let result = Self::join(handle);
        info!("listener stopped");
        result
    }

    /// Joins a task that already finished and returns to idle.
    fn reap(inner: &mut Inner) -> Result<(), ListenerError> {
        inner.state = ListenerState::Idle;
        inner.exited = None;
        Self::join(inner.handle.take())
    }

    fn join(handle: Option<JoinHandle<Result<(), ListenerError>>>) -> Result<(), ListenerError> {
        match handle.map(JoinHandle::join) {
            Some(Ok(result)) => result,
            Some(Err(_)) => {
                error!("listener task panicked");
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl<H> Drop for ListenerCoordinator<H> {
    fn drop(&mut self) {
        let inner = self
            .inner
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        inner.running.store(false, Ordering::Release);
        if let Some(handle) = inner.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Everything the receiving thread owns.
struct ReceiveTask<H> {
    handler: Arc<Mutex<H>>,
    signal: Arc<ConnectivitySignal>,
    config: NetworkConfig,
    bound: Arc<Mutex<Option<SocketAddr>>>,
    running: Arc<AtomicBool>,
}

impl<H: FrameHandler> ReceiveTask<H> {
    fn running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn run(self) -> Result<(), ListenerError> {
        let timeout = Duration::from_millis(u64::from(self.config.recv_timeout_ms.max(1)));

        while !self.signal.wait_ready_timeout(timeout) {
            if !self.running() {
                debug!("listener stopped before network was ready");
                return Ok(());
            }
        }
        if !self.running() {
            return Ok(());
        }

        let socket = self.bind(timeout).map_err(|e| {
            error!("{}", e);
            e
        })?;
        let addr = socket.local_addr().ok();
        *lock(&self.bound) = addr;
        if let Some(addr) = addr {
            info!("listening for joystick frames on {}", addr);
        }

        self.receive_loop(&socket);

        drop(socket);
        *lock(&self.bound) = None;
        lock(&self.handler).on_listener_closed();
        info!("UDP socket closed");
        Ok(())
    }

    fn bind(&self, timeout: Duration) -> Result<UdpSocket, ListenerError> {
        let port = self.config.port;
        let bind_err = move |source: io::Error| ListenerError::Bind { port, source };
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, port)).map_err(bind_err)?;
        socket.set_read_timeout(Some(timeout)).map_err(bind_err)?;
        Ok(socket)
    }

    fn receive_loop(&self, socket: &UdpSocket) {
        // one spare byte so a truncated oversize datagram never reads as a frame
        let mut buf = vec![0u8; self.config.datagram_buffer.max(FRAME_LEN + 1)];
        let frame_yield = Duration::from_millis(u64::from(self.config.frame_yield_ms));

        while self.running() {
            match socket.recv_from(&mut buf) {
                Ok((len, peer)) => match JoystickFrame::decode(&buf[..len]) {
                    Some(frame) => {
                        lock(&self.handler).on_frame(&frame);
                        if !frame_yield.is_zero() {
                            thread::sleep(frame_yield);
                        }
                    }
                    None => warn!(
                        "dropping {} byte datagram from {} (expected {})",
                        len, peer, FRAME_LEN
                    ),
                },
                Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {}
                Err(e) => {
                    if self.running() {
                        error!("UDP receive failed: {}", e);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[derive(Default)]
    struct Counting {
        frames: Vec<JoystickFrame>,
        closed: usize,
    }

    impl FrameHandler for Counting {
        fn on_frame(&mut self, frame: &JoystickFrame) {
            self.frames.push(*frame);
        }
        fn on_listener_closed(&mut self) {
            self.closed += 1;
        }
    }

    fn coordinator(ready: bool) -> ListenerCoordinator<Counting> {
        let signal = Arc::new(ConnectivitySignal::new());
        if ready {
            signal.set_ready();
        }
        ListenerCoordinator::new(
            Arc::new(Mutex::new(Counting::default())),
            signal,
            NetworkConfig::default().with_port(0).with_recv_timeout_ms(10),
        )
    }

    #[test]
    fn stop_while_idle_is_noop() {
        let listener = coordinator(true);
        assert_eq!(listener.state(), ListenerState::Idle);
        listener.stop().unwrap();
        assert_eq!(listener.state(), ListenerState::Idle);
        assert_eq!(lock(listener.handler()).closed, 0);
    }

    #[test]
    fn stop_before_ready_exits_without_binding() {
        let listener = coordinator(false);
        listener.start().unwrap();
        assert!(listener.is_running());
        thread::sleep(Duration::from_millis(30));
        assert!(listener.local_addr().is_none());

        listener.stop().unwrap();
        assert_eq!(listener.state(), ListenerState::Idle);
        assert_eq!(lock(listener.handler()).closed, 0);
    }

    #[test]
    fn closing_notifies_handler_once() {
        let listener = coordinator(true);
        listener.start().unwrap();
        let deadline = Instant::now() + Duration::from_secs(2);
        while listener.local_addr().is_none() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(listener.local_addr().is_some());

        listener.stop().unwrap();
        assert!(listener.local_addr().is_none());
        assert_eq!(lock(listener.handler()).closed, 1);
    }

    #[test]
    fn error_messages() {
        let err = ListenerError::Bind {
            port: 65000,
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };
        assert_eq!(err.to_string(), "failed to bind UDP port 65000: in use");
        assert!(std::error::Error::source(&err).is_some());
    }
}
