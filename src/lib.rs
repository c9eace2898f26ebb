pub mod core;
pub mod rest;
pub mod ws;

pub use crate::core::{config::ApiCredentials, errors::BlockfactsError, types::*};
pub use crate::rest::BlockfactsRest;
pub use crate::ws::{client::BlockfactsWebSocketClient, messages::ChannelSubscription};
