use secrecy::{ExposeSecret, Secret};
use std::env;
use std::sync::RwLock;

const API_KEY_VAR: &str = "BLOCKFACTS_API_KEY";
const API_SECRET_VAR: &str = "BLOCKFACTS_API_SECRET";

/// API key/secret pair shared by every endpoint group and the streaming
/// client.
///
/// The pair can be replaced at runtime through [`ApiCredentials::replace`];
/// the new values take effect on the next request issued by any client
/// holding the same `Arc<ApiCredentials>`. A call that is already in flight
/// observes either the old or the new pair depending on timing.
pub struct ApiCredentials {
    inner: RwLock<KeyPair>,
}

struct KeyPair {
    api_key: Secret<String>,
    api_secret: Secret<String>,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

impl ApiCredentials {
    /// Create a new credential pair.
    #[must_use]
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            inner: RwLock::new(KeyPair {
                api_key: Secret::new(api_key),
                api_secret: Secret::new(api_secret),
            }),
        }
    }

    /// Create credentials for public endpoints only.
    ///
    /// Requests still carry the credential headers, with empty values; the
    /// server decides which endpoints require a valid key.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(String::new(), String::new())
    }

    /// Create credentials from environment variables.
    ///
    /// Expected environment variables:
    /// - `BLOCKFACTS_API_KEY`
    /// - `BLOCKFACTS_API_SECRET`
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(API_KEY_VAR.to_string()))?;

        let api_secret = env::var(API_SECRET_VAR)
            .map_err(|_| ConfigError::MissingEnvironmentVariable(API_SECRET_VAR.to_string()))?;

        Ok(Self::new(api_key, api_secret))
    }

    /// Create credentials from a .env file and environment variables.
    ///
    /// **Security Warning**: Never commit .env files to version control!
    /// Add .env to your .gitignore file.
    #[cfg(feature = "env-file")]
    pub fn from_env_file() -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(".env")
    }

    /// Create credentials from a specific .env file path.
    ///
    /// Useful for different environments (e.g., .env.development,
    /// .env.production).
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(_) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // .env file doesn't exist, continue with system env vars
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env()
    }

    /// Replace the held key/secret pair.
    ///
    /// Visible to every client sharing this `ApiCredentials` instance; no
    /// synchronization guarantee is made for requests already in flight.
    pub fn replace(&self, api_key: String, api_secret: String) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        guard.api_key = Secret::new(api_key);
        guard.api_secret = Secret::new(api_secret);
    }

    /// Get the current API key (use carefully - exposes secret).
    pub fn api_key(&self) -> String {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.api_key.expose_secret().clone()
    }

    /// Get the current API secret (use carefully - exposes secret).
    pub fn api_secret(&self) -> String {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.api_secret.expose_secret().clone()
    }

    /// Check whether a non-empty key/secret pair is held.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        !guard.api_key.expose_secret().is_empty() && !guard.api_secret.expose_secret().is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
