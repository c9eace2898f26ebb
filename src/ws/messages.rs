use serde::{Deserialize, Serialize};

/// One exchange and its pair list within a subscribe/unsubscribe frame.
///
/// The server expects the exchange-name field under the short `name` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSubscription {
    #[serde(rename = "name")]
    pub exchange_name: String,
    pub pairs: Vec<String>,
}

impl ChannelSubscription {
    pub fn new(exchange_name: impl Into<String>, pairs: Vec<String>) -> Self {
        Self {
            exchange_name: exchange_name.into(),
            pairs,
        }
    }
}

/// Outbound subscribe/unsubscribe control frame.
///
/// Credential fields are emitted under the header-style `X-API-KEY` /
/// `X-API-SECRET` keys; optional fields set to `None` are omitted from the
/// serialized output entirely.
#[derive(Debug, Clone, Serialize)]
pub struct SubscribeMessage {
    #[serde(rename = "type")]
    pub message_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "X-API-KEY", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(rename = "X-API-SECRET", skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,
    pub channels: Vec<ChannelSubscription>,
}

impl SubscribeMessage {
    /// Build a `subscribe` frame. `snapshot` requests an initial full-state
    /// dump before incremental updates.
    pub fn subscribe(
        channels: Vec<ChannelSubscription>,
        snapshot: bool,
        id: Option<String>,
        api_key: String,
        api_secret: String,
    ) -> Self {
        Self {
            message_type: "subscribe",
            snapshot: Some(snapshot),
            id,
            api_key: Some(api_key),
            api_secret: Some(api_secret),
            channels,
        }
    }

    /// Build an `unsubscribe` frame. Carries channels only; snapshot and
    /// credential fields are never included.
    pub fn unsubscribe(channels: Vec<ChannelSubscription>) -> Self {
        Self {
            message_type: "unsubscribe",
            snapshot: None,
            id: None,
            api_key: None,
            api_secret: None,
            channels,
        }
    }
}
