use crate::core::errors::BlockfactsError;
use futures_util::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use tracing::{debug, instrument, warn};

/// Sink for events produced by the WebSocket transport.
///
/// The transport owns the delivery task: every callback runs on that task,
/// concurrently with caller-issued sends, and never on the thread that
/// initiated the connection. Inbound payloads are delivered verbatim;
/// message-type discrimination is the sink's responsibility.
pub trait WsEvents: Send + Sync + 'static {
    /// Connection handshake completed.
    fn on_open(&self);

    /// Inbound text payload, undecoded.
    fn on_message(&self, payload: &str);

    /// Connection closed. `event` carries the peer's close frame when one
    /// was received.
    fn on_close(&self, event: Option<CloseEvent>);

    /// Transport error. Not a state transition by itself; the close
    /// notification governs the disconnected transition.
    fn on_error(&self, error: &BlockfactsError);
}

/// Close code and reason reported by the peer.
#[derive(Debug, Clone)]
pub struct CloseEvent {
    pub code: u16,
    pub reason: String,
}

/// Connection lifecycle: disconnected -> connecting -> connected ->
/// disconnected. Errors are a side channel, not a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    fn as_u8(self) -> u8 {
        match self {
            Self::Disconnected => 0,
            Self::Connecting => 1,
            Self::Connected => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Connecting,
            2 => Self::Connected,
            _ => Self::Disconnected,
        }
    }
}

/// WebSocket transport configuration
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 10_000, // 10 seconds
        }
    }
}

/// Tungstenite-based WebSocket transport.
///
/// Owns exactly one connection at a time. Sends may be issued from any
/// thread; they are forwarded through an unbounded channel to a writer task
/// and either reach the outbound buffer or fail immediately. There is no
/// automatic reconnect: after a close the caller creates a new connection.
pub struct TungsteniteWs {
    url: String,
    config: WsConfig,
    state: Arc<AtomicU8>,
    sender: Arc<Mutex<Option<mpsc::UnboundedSender<Message>>>>,
}

impl TungsteniteWs {
    /// Create a new transport for the given URL.
    pub fn new(url: String) -> Self {
        Self::with_config(url, WsConfig::default())
    }

    /// Create a new transport with custom configuration.
    pub fn with_config(url: String, config: WsConfig) -> Self {
        Self {
            url,
            config,
            state: Arc::new(AtomicU8::new(ConnectionState::Disconnected.as_u8())),
            sender: Arc::new(Mutex::new(None)),
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Check if the connection is alive
    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Initiate the connection handshake.
    ///
    /// Asynchronous: the call returns once the connection task is spawned;
    /// completion is signaled through `events.on_open`, handshake failure
    /// through `events.on_error`. Must be called within a Tokio runtime.
    ///
    /// Fails with [`BlockfactsError::AlreadyConnected`] unless the
    /// transport is currently disconnected.
    #[instrument(skip(self, events), fields(url = %self.url))]
    pub fn connect<E: WsEvents>(&self, events: Arc<E>) -> Result<(), BlockfactsError> {
        self.state
            .compare_exchange(
                ConnectionState::Disconnected.as_u8(),
                ConnectionState::Connecting.as_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .map_err(|_| BlockfactsError::AlreadyConnected)?;

        let url = self.url.clone();
        let timeout = Duration::from_millis(self.config.connect_timeout_ms);
        let state = Arc::clone(&self.state);
        let sender_slot = Arc::clone(&self.sender);

        tokio::spawn(async move {
            run_connection(url, timeout, state, sender_slot, events).await;
        });

        Ok(())
    }

    /// Send a text frame over the open connection.
    ///
    /// Fails with [`BlockfactsError::NotConnected`] when no connection is
    /// established; the frame otherwise reaches the writer task's outbound
    /// buffer before this returns.
    pub fn send_text(&self, payload: String) -> Result<(), BlockfactsError> {
        self.send(Message::Text(payload))
    }

    /// Initiate the closing handshake.
    ///
    /// The resulting transport close notification drives the transition to
    /// disconnected and the `on_close` delivery.
    pub fn close(&self) -> Result<(), BlockfactsError> {
        self.send(Message::Close(None))
    }

    fn send(&self, message: Message) -> Result<(), BlockfactsError> {
        let guard = self.sender.lock().unwrap_or_else(|e| e.into_inner());
        match guard.as_ref() {
            Some(tx) if self.is_connected() => {
                tx.send(message).map_err(|_| BlockfactsError::NotConnected)
            }
            _ => Err(BlockfactsError::NotConnected),
        }
    }
}

async fn run_connection<E: WsEvents>(
    url: String,
    connect_timeout: Duration,
    state: Arc<AtomicU8>,
    sender_slot: Arc<Mutex<Option<mpsc::UnboundedSender<Message>>>>,
    events: Arc<E>,
) {
    let connection = tokio::time::timeout(connect_timeout, connect_async(&url)).await;

    let ws_stream = match connection {
        Ok(Ok((ws_stream, _))) => ws_stream,
        Ok(Err(e)) => {
            state.store(ConnectionState::Disconnected.as_u8(), Ordering::SeqCst);
            events.on_error(&BlockfactsError::NetworkError(format!(
                "WebSocket connection failed: {}",
                e
            )));
            return;
        }
        Err(_) => {
            state.store(ConnectionState::Disconnected.as_u8(), Ordering::SeqCst);
            events.on_error(&BlockfactsError::ConnectionTimeout(
                "WebSocket connection timeout".to_string(),
            ));
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    {
        let mut guard = sender_slot.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(tx.clone());
    }
    state.store(ConnectionState::Connected.as_u8(), Ordering::SeqCst);
    events.on_open();

    // Writer task: forwards caller sends (and transport pongs) to the sink.
    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if let Err(e) = write.send(message).await {
                warn!("Failed to send WebSocket message: {}", e);
                break;
            }
        }
    });

    let mut close_event: Option<CloseEvent> = None;

    loop {
        match read.next().await {
            Some(Ok(Message::Text(text))) => events.on_message(&text),
            Some(Ok(Message::Binary(data))) => match String::from_utf8(data) {
                Ok(text) => events.on_message(&text),
                Err(e) => events.on_error(&BlockfactsError::DeserializationError(format!(
                    "Invalid UTF-8 in binary message: {}",
                    e
                ))),
            },
            Some(Ok(Message::Ping(data))) => {
                // Auto-respond to pings at transport level
                if tx.send(Message::Pong(data)).is_err() {
                    break;
                }
            }
            Some(Ok(Message::Pong(_))) => {}
            Some(Ok(Message::Close(frame))) => {
                close_event = frame.map(|f| CloseEvent {
                    code: u16::from(f.code),
                    reason: f.reason.into_owned(),
                });
                break;
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                events.on_error(&BlockfactsError::NetworkError(format!(
                    "WebSocket error: {}",
                    e
                )));
                break;
            }
            None => break,
        }
    }

    debug!("WebSocket connection to {} ended", url);

    // Tear down before notifying so close handlers observe the
    // disconnected state.
    {
        let mut guard = sender_slot.lock().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }
    state.store(ConnectionState::Disconnected.as_u8(), Ordering::SeqCst);
    writer.abort();
    events.on_close(close_event);
}
