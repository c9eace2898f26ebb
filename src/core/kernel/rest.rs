use crate::core::config::ApiCredentials;
use crate::core::errors::BlockfactsError;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{instrument, trace};

/// Default base endpoint for the BlockFacts REST API.
pub const DEFAULT_API_URL: &str = "https://api.blockfacts.io";

/// REST client trait for making HTTP requests against the API.
///
/// The BlockFacts surface is GET-only; every method builds one request,
/// attaches the fixed credential headers and returns the parsed body.
/// Implementations never retry, cache or rate-limit.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request and return the body as a raw JSON value.
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `query_params` - Query parameters as key-value pairs
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Value, BlockfactsError>;

    /// Make a GET request with strongly-typed response.
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `query_params` - Query parameters as key-value pairs
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<T, BlockfactsError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    /// Create a new configuration with the default BlockFacts endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: 30,
            user_agent: "blockfacts-rust-sdk/0.1".to_string(),
        }
    }

    /// Override the base endpoint URL.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    credentials: Arc<ApiCredentials>,
}

impl RestClientBuilder {
    /// Create a new builder with the given configuration and the shared
    /// credential pair.
    pub fn new(config: RestClientConfig, credentials: Arc<ApiCredentials>) -> Self {
        Self {
            config,
            credentials,
        }
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, BlockfactsError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                BlockfactsError::Other(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            credentials: self.credentials,
        })
    }
}

/// Implementation of `RestClient` using reqwest.
///
/// Stateless across calls apart from the shared credentials, which are read
/// at request time.
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    credentials: Arc<ApiCredentials>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    /// Create a new `ReqwestRest` against the default BlockFacts endpoint.
    pub fn new(credentials: Arc<ApiCredentials>) -> Result<Self, BlockfactsError> {
        RestClientBuilder::new(RestClientConfig::new(), credentials).build()
    }

    /// Build the full URL for an endpoint.
    ///
    /// Query values are appended verbatim, not percent-encoded. Comma
    /// lists must reach the service with literal commas.
    fn build_url(&self, endpoint: &str, query_params: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.config.base_url, endpoint);
        if !query_params.is_empty() {
            let query = query_params
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect::<Vec<_>>()
                .join("&");
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    /// Handle the response and extract JSON
    #[instrument(skip(self, response), fields(status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<Value, BlockfactsError> {
        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            BlockfactsError::NetworkError(format!("Failed to read response body: {}", e))
        })?;

        trace!("Response body: {}", response_text);

        if status.is_success() {
            serde_json::from_str(&response_text).map_err(|e| {
                BlockfactsError::DeserializationError(format!(
                    "Failed to parse JSON response: {}",
                    e
                ))
            })
        } else {
            Err(BlockfactsError::ApiError {
                status: status.as_u16(),
                body: response_text,
            })
        }
    }

    #[instrument(skip(self, query_params), fields(endpoint = %endpoint, param_count = query_params.len()))]
    async fn make_request(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Value, BlockfactsError> {
        let url = self.build_url(endpoint, query_params);
        let request = self
            .client
            .get(&url)
            .header("Content-Type", "application/json")
            .header("X-API-KEY", self.credentials.api_key())
            .header("X-API-SECRET", self.credentials.api_secret());

        let response = request
            .send()
            .await
            .map_err(|e| BlockfactsError::NetworkError(format!("Request failed: {}", e)))?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Value, BlockfactsError> {
        self.make_request(endpoint, query_params).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<T, BlockfactsError> {
        self.make_request(endpoint, query_params)
            .await
            .and_then(|value| {
                serde_json::from_value(value).map_err(|e| {
                    BlockfactsError::DeserializationError(format!(
                        "Failed to deserialize JSON: {}",
                        e
                    ))
                })
            })
    }
}
