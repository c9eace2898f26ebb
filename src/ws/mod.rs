pub mod client;
pub mod messages;

pub use client::BlockfactsWebSocketClient;
pub use messages::{ChannelSubscription, SubscribeMessage};
