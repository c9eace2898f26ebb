pub mod assets;
pub mod exchanges;
pub mod normalization;

use crate::core::config::ApiCredentials;
use crate::core::errors::BlockfactsError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use std::sync::Arc;

pub use assets::AssetEndpoints;
pub use exchanges::ExchangeEndpoints;
pub use normalization::NormalizationEndpoints;

/// Strip whitespace out of a comma-joined list parameter.
///
/// A textual transform only, not validation: `"BTC, ETH"` becomes
/// `"BTC,ETH"`; anything else malformed is forwarded to the server as-is.
pub(crate) fn normalize_list(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// The three BlockFacts REST endpoint groups behind one shared transport.
///
/// All groups read the same [`ApiCredentials`], so replacing the key/secret
/// pair at runtime is visible to every group on its next call.
pub struct BlockfactsRest {
    pub assets: AssetEndpoints<ReqwestRest>,
    pub normalization: NormalizationEndpoints<ReqwestRest>,
    pub exchanges: ExchangeEndpoints<ReqwestRest>,
}

impl BlockfactsRest {
    /// Create the endpoint groups against the default API endpoint.
    pub fn new(credentials: Arc<ApiCredentials>) -> Result<Self, BlockfactsError> {
        Self::with_config(RestClientConfig::new(), credentials)
    }

    /// Create the endpoint groups with a custom transport configuration.
    pub fn with_config(
        config: RestClientConfig,
        credentials: Arc<ApiCredentials>,
    ) -> Result<Self, BlockfactsError> {
        let rest = RestClientBuilder::new(config, credentials).build()?;
        Ok(Self {
            assets: AssetEndpoints::new(rest.clone()),
            normalization: NormalizationEndpoints::new(rest.clone()),
            exchanges: ExchangeEndpoints::new(rest),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_list_strips_embedded_whitespace() {
        assert_eq!(normalize_list("BTC, ETH"), "BTC,ETH");
        assert_eq!(normalize_list(" USD,\tEUR "), "USD,EUR");
        assert_eq!(normalize_list("KRAKEN"), "KRAKEN");
    }

    #[test]
    fn normalize_list_forwards_malformed_values() {
        // Not validation: stray separators survive untouched.
        assert_eq!(normalize_list("BTC,,ETH,"), "BTC,,ETH,");
    }
}
