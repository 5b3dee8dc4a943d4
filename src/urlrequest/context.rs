//! Request context: configuration plus the shared collaborators.
//!
//! Based on Chromium's net::URLRequestContext, which bundles the pieces
//! every request of one client shares.

use crate::base::neterror::NetError;
use crate::cookies::monster::CookieMonster;
use crate::cookies::store::CookieStore;
use crate::http::transaction::HttpTransport;
use crate::http::transport::Transport;
use http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Redirects followed per chain unless configured otherwise.
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

/// Per-hop timeout unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `User-Agent`: the transport identifier plus our product token.
pub fn default_agent() -> String {
    format!(
        "{} jarnet/{}",
        HttpTransport::identifier(),
        env!("CARGO_PKG_VERSION")
    )
}

/// Configuration options for a client.
///
/// Every field is optional when deserializing; missing ones take their
/// defaults. `timeout` is written as fractional seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// User-Agent string sent with every hop.
    pub agent: String,

    /// Timeout applied to each transport attempt.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,

    /// Redirects followed before the last 3xx response is returned as is.
    pub max_redirects: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            agent: default_agent(),
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl ClientConfig {
    /// Parse a JSON configuration document and validate it.
    pub fn from_json(json: &str) -> Result<Self, NetError> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            tracing::warn!(error = %e, "invalid client configuration");
            NetError::InvalidConfig
        })?;
        config.validate()?;
        Ok(config)
    }

    /// The agent must fit in a header and the timeout must be non-zero.
    pub fn validate(&self) -> Result<(), NetError> {
        if HeaderValue::from_str(&self.agent).is_err() || self.timeout.is_zero() {
            return Err(NetError::InvalidConfig);
        }
        Ok(())
    }
}

mod duration_secs {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(de::Error::custom)
    }
}

/// Everything one client shares across its requests.
#[derive(Clone)]
pub struct URLRequestContext {
    transport: Arc<dyn Transport>,
    cookie_store: Arc<dyn CookieStore>,
    config: ClientConfig,
}

impl Default for URLRequestContext {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl URLRequestContext {
    /// Default transport and a fresh in-memory jar.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            transport: Arc::new(HttpTransport::default()),
            cookie_store: Arc::new(CookieMonster::new()),
            config,
        }
    }

    pub fn with_parts(
        transport: Arc<dyn Transport>,
        cookie_store: Arc<dyn CookieStore>,
        config: ClientConfig,
    ) -> Self {
        Self {
            transport,
            cookie_store,
            config,
        }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn cookie_store(&self) -> &Arc<dyn CookieStore> {
        &self.cookie_store
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ClientConfig {
        &mut self.config
    }

    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = transport;
    }

    pub fn set_cookie_store(&mut self, cookie_store: Arc<dyn CookieStore>) {
        self.cookie_store = cookie_store;
    }
}

impl std::fmt::Debug for URLRequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("URLRequestContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
