use crate::core::config::ApiCredentials;
use crate::core::errors::BlockfactsError;
use crate::core::kernel::{CloseEvent, ConnectionState, TungsteniteWs, WsConfig, WsEvents};
use crate::ws::messages::{ChannelSubscription, SubscribeMessage};
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Default endpoint for the BlockFacts streaming API.
pub const DEFAULT_WS_URL: &str = "wss://ws.blockfacts.io/v1/";

type OpenHandler = Box<dyn Fn() + Send + Sync>;
type MessageHandler = Box<dyn Fn(&str) + Send + Sync>;
type CloseHandler = Box<dyn Fn(Option<&CloseEvent>) + Send + Sync>;
type ErrorHandler = Box<dyn Fn(&BlockfactsError) + Send + Sync>;

/// Ordered handler lists for the four event categories.
///
/// Handlers fire synchronously, in registration order, on the transport's
/// delivery task.
#[derive(Default)]
struct HandlerRegistry {
    open: Mutex<Vec<OpenHandler>>,
    message: Mutex<Vec<MessageHandler>>,
    close: Mutex<Vec<CloseHandler>>,
    error: Mutex<Vec<ErrorHandler>>,
}

impl WsEvents for HandlerRegistry {
    fn on_open(&self) {
        let handlers = self.open.lock().unwrap_or_else(|e| e.into_inner());
        for handler in handlers.iter() {
            handler();
        }
    }

    fn on_message(&self, payload: &str) {
        let handlers = self.message.lock().unwrap_or_else(|e| e.into_inner());
        for handler in handlers.iter() {
            handler(payload);
        }
    }

    fn on_close(&self, event: Option<CloseEvent>) {
        let handlers = self.close.lock().unwrap_or_else(|e| e.into_inner());
        for handler in handlers.iter() {
            handler(event.as_ref());
        }
    }

    fn on_error(&self, error: &BlockfactsError) {
        let handlers = self.error.lock().unwrap_or_else(|e| e.into_inner());
        for handler in handlers.iter() {
            handler(error);
        }
    }
}

/// Streaming client for the BlockFacts real-time data feed.
///
/// Wraps one persistent WebSocket connection. Register handlers, connect,
/// then subscribe; inbound payloads are delivered verbatim to the message
/// handlers - trade/normalization/ping discrimination is the caller's job,
/// as is replying to inbound JSON ping frames with [`Self::pong`]. There is
/// no automatic reconnect: observe the close or error handlers and create a
/// new connection when needed.
pub struct BlockfactsWebSocketClient {
    transport: TungsteniteWs,
    handlers: Arc<HandlerRegistry>,
    credentials: Arc<ApiCredentials>,
}

impl BlockfactsWebSocketClient {
    /// Create a client against the default BlockFacts streaming endpoint.
    #[must_use]
    pub fn new(credentials: Arc<ApiCredentials>) -> Self {
        Self::with_url(DEFAULT_WS_URL.to_string(), credentials)
    }

    /// Create a client against a custom endpoint URL.
    #[must_use]
    pub fn with_url(url: String, credentials: Arc<ApiCredentials>) -> Self {
        Self {
            transport: TungsteniteWs::new(url),
            handlers: Arc::new(HandlerRegistry::default()),
            credentials,
        }
    }

    /// Create a client with custom transport configuration.
    #[must_use]
    pub fn with_config(
        url: String,
        config: WsConfig,
        credentials: Arc<ApiCredentials>,
    ) -> Self {
        Self {
            transport: TungsteniteWs::with_config(url, config),
            handlers: Arc::new(HandlerRegistry::default()),
            credentials,
        }
    }

    /// Register a handler fired when the connection opens.
    pub fn on_open<F>(&self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.handlers
            .open
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(handler));
    }

    /// Register a handler fired for every inbound message payload.
    pub fn on_message<F>(&self, handler: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.handlers
            .message
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(handler));
    }

    /// Register a handler fired when the connection closes.
    pub fn on_close<F>(&self, handler: F)
    where
        F: Fn(Option<&CloseEvent>) + Send + Sync + 'static,
    {
        self.handlers
            .close
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(handler));
    }

    /// Register a handler fired on transport errors.
    pub fn on_error<F>(&self, handler: F)
    where
        F: Fn(&BlockfactsError) + Send + Sync + 'static,
    {
        self.handlers
            .error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(handler));
    }

    /// Connect to the BlockFacts streaming server.
    ///
    /// Completion is signaled through the registered open handlers, not
    /// through this call's return value.
    pub async fn connect(&self) -> Result<(), BlockfactsError> {
        self.transport.connect(Arc::clone(&self.handlers))
    }

    /// Subscribe to the real-time data stream for the given channels.
    ///
    /// `snapshot` requests an initial full-state dump before incremental
    /// updates; `id` is an optional correlation id echoed by the server.
    /// The frame carries the current credentials.
    pub fn subscribe(
        &self,
        channels: Vec<ChannelSubscription>,
        snapshot: bool,
        id: Option<&str>,
    ) -> Result<(), BlockfactsError> {
        let message = SubscribeMessage::subscribe(
            channels,
            snapshot,
            id.map(ToString::to_string),
            self.credentials.api_key(),
            self.credentials.api_secret(),
        );
        self.send_frame(&message)
    }

    /// Unsubscribe from the given channels or pairs.
    pub fn unsubscribe(
        &self,
        channels: Vec<ChannelSubscription>,
    ) -> Result<(), BlockfactsError> {
        let message = SubscribeMessage::unsubscribe(channels);
        self.send_frame(&message)
    }

    /// Send a pre-built subscribe frame verbatim.
    ///
    /// Bypasses the typed builder, for server message types not yet
    /// modeled.
    pub fn subscribe_raw(&self, frame: &str) -> Result<(), BlockfactsError> {
        self.transport.send_text(frame.to_string())
    }

    /// Send a pre-built unsubscribe frame verbatim.
    pub fn unsubscribe_raw(&self, frame: &str) -> Result<(), BlockfactsError> {
        self.transport.send_text(frame.to_string())
    }

    /// Send a `{"type":"ping"}` frame to check that the server is online.
    pub fn ping(&self) -> Result<(), BlockfactsError> {
        self.transport.send_text(json!({"type": "ping"}).to_string())
    }

    /// Send a `{"type":"pong"}` frame to tell the server this client is
    /// still connected.
    pub fn pong(&self) -> Result<(), BlockfactsError> {
        self.transport.send_text(json!({"type": "pong"}).to_string())
    }

    /// Initiate the closing handshake. The close handlers fire once the
    /// transport reports the connection closed.
    pub fn close(&self) -> Result<(), BlockfactsError> {
        self.transport.close()
    }

    /// Check if the connection is alive
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.transport.state()
    }

    fn send_frame(&self, message: &SubscribeMessage) -> Result<(), BlockfactsError> {
        let frame = serde_json::to_string(message).map_err(|e| {
            BlockfactsError::SerializationError(format!(
                "Failed to serialize control frame: {}",
                e
            ))
        })?;
        self.transport.send_text(frame)
    }
}
