//! Request/response coordination for the serial control port
//!
//! [`ControlPort`] is the public protocol surface. It builds outgoing request
//! frames, enforces the inter-request pacing interval, writes to the
//! transport, and resolves the caller once the matching response frame
//! arrives. Inbound bytes are pumped by a background task that feeds the
//! frame assembler and hands completed frames to the single pending-request
//! slot.
//!
//! The protocol carries no correlation token; responses match requests by
//! temporal adjacency only. At most one request may therefore be in flight,
//! and callers are responsible for serializing their requests. A request
//! issued while another is pending overwrites the pending resolver, and the
//! superseded caller never resolves.

use crate::builder::ControlPortBuilder;
use crate::config::PortConfig;
use bravia_core::{BraviaError, BraviaResult};
use bravia_protocol::{ControlFrame, ControlRequest, FrameAssembler};
use bravia_transport::{ControlLink, SerialTransport, Transport};
use std::future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::sync::{oneshot, Mutex, Notify};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Close notification delivered to the registered observer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseEvent {
    /// Whether the closure was requested through [`ControlPort::close`]
    pub intentional: bool,
}

type CloseObserver = Box<dyn FnOnce(CloseEvent) + Send>;
type Writer = WriteHalf<Box<dyn ControlLink>>;

/// State shared between the port handle and the reader task
struct Shared {
    /// Single pending-request slot; overwritten, never queued
    pending: StdMutex<Option<oneshot::Sender<ControlFrame>>>,
    writer: Mutex<Option<Writer>>,
    on_close: StdMutex<Option<CloseObserver>>,
    closed_intentionally: AtomicBool,
    open: AtomicBool,
}

impl Shared {
    fn resolve(&self, frame: ControlFrame) {
        let sender = self.pending.lock().unwrap().take();
        match sender {
            Some(sender) => {
                let _ = sender.send(frame);
            }
            None => log::trace!("dropping response frame: no request awaiting it"),
        }
    }

    /// Report the closure to the observer, then re-arm the intentional flag
    async fn connection_closed(&self) {
        self.writer.lock().await.take();
        self.open.store(false, Ordering::SeqCst);
        let intentional = self.closed_intentionally.swap(false, Ordering::SeqCst);
        let observer = self.on_close.lock().unwrap().take();
        if let Some(observer) = observer {
            observer(CloseEvent { intentional });
        }
    }
}

/// Serial control port for a BRAVIA professional display
///
/// One instance owns one connection; multiple displays are driven by
/// independent instances.
pub struct ControlPort {
    config: PortConfig,
    interval: Duration,
    transport: Box<dyn Transport>,
    shared: Arc<Shared>,
    last_request: StdMutex<Option<Instant>>,
    shutdown: Arc<Notify>,
    reader: Mutex<Option<JoinHandle<()>>>,
}

impl ControlPort {
    /// Create a port over the real serial transport
    ///
    /// # Errors
    ///
    /// Fails when the configuration does not validate.
    pub fn new(config: PortConfig) -> BraviaResult<Self> {
        let transport = Box::new(SerialTransport::for_path(config.path.clone()));
        Self::with_transport(config, transport)
    }

    /// Create a port over a caller-supplied transport
    pub fn with_transport(
        config: PortConfig,
        transport: Box<dyn Transport>,
    ) -> BraviaResult<Self> {
        config.validate()?;
        let interval = config.interval();
        Ok(Self {
            config,
            interval,
            transport,
            shared: Arc::new(Shared {
                pending: StdMutex::new(None),
                writer: Mutex::new(None),
                on_close: StdMutex::new(None),
                closed_intentionally: AtomicBool::new(false),
                open: AtomicBool::new(false),
            }),
            last_request: StdMutex::new(None),
            shutdown: Arc::new(Notify::new()),
            reader: Mutex::new(None),
        })
    }

    /// Start building a port
    pub fn builder() -> ControlPortBuilder {
        ControlPortBuilder::new()
    }

    /// Get the configuration this port was built from
    pub fn config(&self) -> &PortConfig {
        &self.config
    }

    /// Get the connection status of the serial port
    pub fn is_open(&self) -> bool {
        self.shared.open.load(Ordering::SeqCst)
    }

    /// Register a one-shot observer for the next closure, intentional or not
    ///
    /// The observer fires once and is cleared; re-register after each open.
    pub fn set_on_close(&self, observer: impl FnOnce(CloseEvent) + Send + 'static) {
        *self.shared.on_close.lock().unwrap() = Some(Box::new(observer));
    }

    /// Open the serial port and start delivering inbound bytes
    ///
    /// # Errors
    ///
    /// Fails when the port is already open or the device cannot be claimed.
    pub async fn open(&self) -> BraviaResult<()> {
        if self.is_open() {
            return Err(BraviaError::Connection(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Connection has already been opened",
            )));
        }
        self.shared.closed_intentionally.store(false, Ordering::SeqCst);

        let link = self.transport.connect().await?;
        let (read_half, write_half) = tokio::io::split(link);
        *self.shared.writer.lock().await = Some(write_half);
        self.shared.open.store(true, Ordering::SeqCst);

        let handle = tokio::spawn(run_reader(
            read_half,
            Arc::clone(&self.shared),
            Arc::clone(&self.shutdown),
        ));
        *self.reader.lock().await = Some(handle);
        log::debug!("serial port {} opened", self.config.path);
        Ok(())
    }

    /// Close the serial port
    ///
    /// Succeeds as a no-op when the port is already closed. The registered
    /// close observer fires with `intentional: true` before this returns.
    ///
    /// # Errors
    ///
    /// Fails when the underlying link refuses to shut down; the closure
    /// still counts as intentional for the close observer.
    pub async fn close(&self) -> BraviaResult<()> {
        if !self.is_open() {
            return Ok(());
        }
        self.shared
            .closed_intentionally
            .store(true, Ordering::SeqCst);
        if let Some(mut writer) = self.shared.writer.lock().await.take() {
            writer.shutdown().await?;
        }
        self.shutdown.notify_one();
        if let Some(handle) = self.reader.lock().await.take() {
            let _ = handle.await;
        }
        log::debug!("serial port {} closed", self.config.path);
        Ok(())
    }

    /// Send a request for reading data and await the response
    pub async fn request_read(&self, function: u8) -> BraviaResult<ControlFrame> {
        self.request(ControlRequest::read(function)).await
    }

    /// Send a request for writing data and await the acknowledgement
    pub async fn request_write(&self, function: u8, data: Vec<u8>) -> BraviaResult<ControlFrame> {
        self.request(ControlRequest::write(function, data)).await
    }

    async fn request(&self, request: ControlRequest) -> BraviaResult<ControlFrame> {
        if !self.is_open() {
            return Err(BraviaError::NotOpen);
        }
        let wire = request.encode()?;
        self.pace().await;

        // Register the resolver before writing so a fast response cannot
        // slip past the slot. This overwrites any in-flight resolver.
        let (sender, receiver) = oneshot::channel();
        *self.shared.pending.lock().unwrap() = Some(sender);

        if let Err(e) = self.write_wire(&wire).await {
            self.shared.pending.lock().unwrap().take();
            return Err(e);
        }

        match receiver.await {
            Ok(frame) if frame.code().is_completed() => Ok(frame),
            Ok(frame) => Err(BraviaError::Answer(frame.code())),
            // The resolver was overwritten by a later request, or dropped at
            // disconnect. Such a call never resolves; callers must serialize
            // their requests.
            Err(_) => future::pending().await,
        }
    }

    async fn write_wire(&self, wire: &[u8]) -> BraviaResult<()> {
        let mut writer = self.shared.writer.lock().await;
        let writer = writer.as_mut().ok_or(BraviaError::NotOpen)?;
        writer.write_all(wire).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Enforce the inter-request interval
    ///
    /// The baseline timestamp advances at the moment of evaluation, not after
    /// the wait, so back-to-back calls each see a strictly advancing
    /// baseline.
    async fn pace(&self) {
        let delay = {
            let mut last = self.last_request.lock().unwrap();
            let now = Instant::now();
            let elapsed = last.map(|at| now.duration_since(at));
            *last = Some(now);
            match elapsed {
                Some(elapsed) if elapsed < self.interval => Some(self.interval - elapsed),
                _ => None,
            }
        };
        if let Some(delay) = delay {
            log::trace!("pacing next request by {:?}", delay);
            tokio::time::sleep(delay).await;
        }
    }
}

impl Drop for ControlPort {
    fn drop(&mut self) {
        // The reader task would otherwise outlive the port and hold the
        // device open.
        if let Ok(mut reader) = self.reader.try_lock() {
            if let Some(handle) = reader.take() {
                handle.abort();
            }
        }
    }
}

/// Inbound byte pump: read chunks, assemble frames, resolve the pending slot
async fn run_reader(
    mut reader: ReadHalf<Box<dyn ControlLink>>,
    shared: Arc<Shared>,
    shutdown: Arc<Notify>,
) {
    let mut assembler = FrameAssembler::new();
    let mut buf = [0u8; 256];
    loop {
        tokio::select! {
            _ = shutdown.notified() => break,
            read = reader.read(&mut buf) => match read {
                Ok(0) => {
                    log::debug!("serial link reached end of stream");
                    break;
                }
                Ok(n) => {
                    for frame in assembler.feed(&buf[..n], std::time::Instant::now()) {
                        shared.resolve(frame);
                    }
                }
                Err(e) => {
                    log::warn!("serial read failed: {}", e);
                    break;
                }
            },
        }
    }
    shared.connection_closed().await;
}
