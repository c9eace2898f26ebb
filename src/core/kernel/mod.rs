/// Transport layer for the BlockFacts API.
///
/// The kernel contains only transport logic and generic interfaces: the
/// HTTP client used by every REST endpoint group and the WebSocket session
/// that backs the streaming client. Endpoint semantics live above it, in
/// `crate::rest` and `crate::ws`.
///
/// # Architecture
///
/// - `RestClient`: unified HTTP GET interface with raw-JSON and typed
///   variants; `ReqwestRest` is the production implementation.
/// - `TungsteniteWs`: one persistent WebSocket connection with a spawned
///   reader/writer pair; events are pushed into a caller-supplied
///   [`WsEvents`] sink from the transport's own task.
///
/// Credential headers are attached per request from the shared
/// [`crate::core::config::ApiCredentials`], so a runtime credential
/// replacement takes effect on the next call without rebuilding clients.
pub mod rest;
pub mod ws;

// Re-export key types for convenience
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use ws::{CloseEvent, ConnectionState, TungsteniteWs, WsConfig, WsEvents};
