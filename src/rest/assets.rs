use crate::core::errors::BlockfactsError;
use crate::core::kernel::RestClient;
use crate::core::types::Asset;

/// Asset endpoint group.
pub struct AssetEndpoints<R: RestClient> {
    client: R,
}

impl<R: RestClient> AssetEndpoints<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    /// Lists all assets that BlockFacts supports.
    pub async fn list_all_assets(&self) -> Result<Vec<Asset>, BlockfactsError> {
        self.client.get_json("/api/v1/assets", &[]).await
    }

    /// Gets a specific asset by ticker ID (e.g. BTC).
    pub async fn get_specific_asset(&self, ticker: &str) -> Result<Asset, BlockfactsError> {
        let endpoint = format!("/api/v1/assets/{}", ticker);
        self.client.get_json(&endpoint, &[]).await
    }
}
