//! HTTP Client with builder pattern.
//!
//! Holds the configuration, the cookie store and the transport, and turns
//! verb calls into redirect-following chains.
//!
//! # Example
//!
//! ```rust,no_run
//! use jarnet::Client;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), jarnet::NetError> {
//! let client = Client::builder()
//!     .timeout(Duration::from_secs(10))
//!     .max_redirects(3)
//!     .build()?;
//!
//! let resp = client.get("https://example.com").send().await?;
//! println!("{} after {} redirects", resp.status(), resp.redirect_count());
//! # Ok(())
//! # }
//! ```

use crate::base::neterror::NetError;
use crate::cookies::store::CookieStore;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::transport::Transport;
use crate::urlrequest::context::{ClientConfig, URLRequestContext};
use crate::urlrequest::job::URLRequestHttpJob;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use std::sync::Arc;
use std::time::Duration;

/// HTTP Client for making requests.
///
/// Clones share the cookie store and transport but each carries its own
/// copy of the configuration.
#[derive(Clone, Debug, Default)]
pub struct Client {
    context: URLRequestContext,
}

impl Client {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Start building a GET request.
    pub fn get<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    /// Start building a HEAD request.
    pub fn head<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::HEAD, url)
    }

    /// Start building a PUT request.
    pub fn put<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    /// Start building a DELETE request.
    pub fn delete<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }

    /// Start building a POST request.
    pub fn post<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    /// Start building a PATCH request.
    pub fn patch<U: AsRef<str>>(&self, url: U) -> RequestBuilder {
        self.request(Method::PATCH, url)
    }

    /// Start building a request with custom method.
    pub fn request<U: AsRef<str>>(&self, method: Method, url: U) -> RequestBuilder {
        RequestBuilder {
            client: self.clone(),
            method,
            url: url.as_ref().to_string(),
            headers: HeaderMap::new(),
            body: None,
            error: None,
        }
    }

    /// Run `request` through the cookie jar, the transport and the
    /// redirect engine. Resolves once, with the final response of the chain.
    pub async fn dispatch(&self, request: Request) -> Response {
        URLRequestHttpJob::new(&self.context).start(request).await
    }

    pub fn config(&self) -> &ClientConfig {
        self.context.config()
    }

    pub fn cookie_store(&self) -> &Arc<dyn CookieStore> {
        self.context.cookie_store()
    }

    pub fn set_agent(&mut self, agent: impl Into<String>) -> Result<(), NetError> {
        let agent = agent.into();
        HeaderValue::from_str(&agent).map_err(|_| NetError::InvalidConfig)?;
        self.context.config_mut().agent = agent;
        Ok(())
    }

    pub fn set_timeout(&mut self, timeout: Duration) -> Result<(), NetError> {
        if timeout.is_zero() {
            return Err(NetError::InvalidConfig);
        }
        self.context.config_mut().timeout = timeout;
        Ok(())
    }

    pub fn set_max_redirects(&mut self, max_redirects: u32) {
        self.context.config_mut().max_redirects = max_redirects;
    }

    pub fn set_cookie_store(&mut self, store: Arc<dyn CookieStore>) {
        self.context.set_cookie_store(store);
    }
}

/// Builder for creating a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    config: Option<ClientConfig>,
    agent: Option<String>,
    timeout: Option<Duration>,
    max_redirects: Option<u32>,
    cookie_store: Option<Arc<dyn CookieStore>>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Start from a whole configuration; individual setters still win.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the User-Agent sent with every hop.
    pub fn agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = Some(agent.into());
        self
    }

    /// Set the per-hop timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set how many redirects one request may follow.
    pub fn max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = Some(max_redirects);
        self
    }

    /// Set cookie store.
    pub fn cookie_store(mut self, store: Arc<dyn CookieStore>) -> Self {
        self.cookie_store = Some(store);
        self
    }

    /// Replace the default hyper transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client, NetError> {
        let mut config = self.config.unwrap_or_default();
        if let Some(agent) = self.agent {
            config.agent = agent;
        }
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(max_redirects) = self.max_redirects {
            config.max_redirects = max_redirects;
        }
        config.validate()?;

        let mut context = URLRequestContext::new(config);
        if let Some(store) = self.cookie_store {
            context.set_cookie_store(store);
        }
        if let Some(transport) = self.transport {
            context.set_transport(transport);
        }

        Ok(Client { context })
    }
}

/// Builder for a single request.
pub struct RequestBuilder {
    client: Client,
    method: Method,
    url: String,
    headers: HeaderMap,
    body: Option<Bytes>,
    error: Option<NetError>,
}

impl RequestBuilder {
    /// Add a header. Repeated names are kept as separate values.
    pub fn header<K, V>(mut self, key: K, value: V) -> Self
    where
        K: TryInto<HeaderName>,
        V: TryInto<HeaderValue>,
    {
        match (key.try_into(), value.try_into()) {
            (Ok(k), Ok(v)) => {
                self.headers.append(k, v);
            }
            _ => {
                self.error.get_or_insert(NetError::InvalidHeader);
            }
        }
        self
    }

    /// Set request body.
    pub fn body<B: Into<Bytes>>(mut self, body: B) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set JSON body.
    #[cfg(feature = "json")]
    pub fn json<T: serde::Serialize>(mut self, json: &T) -> Self {
        match serde_json::to_vec(json) {
            Ok(bytes) => {
                self.body = Some(Bytes::from(bytes));
                self.headers.insert(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
            }
            Err(_) => {
                self.error.get_or_insert(NetError::JsonParseError);
            }
        }
        self
    }

    /// Assemble the request without sending it.
    pub fn build(self) -> Result<(Client, Request), NetError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let mut request = Request::parse(self.method, &self.url)?.with_headers(self.headers);
        if let Some(body) = self.body {
            request = request.with_body(body);
        }
        Ok((self.client, request))
    }

    /// Send the request and follow redirects.
    ///
    /// Errors only when the request itself cannot be built; anything that
    /// goes wrong on the wire comes back as a status-0 [`Response`].
    pub async fn send(self) -> Result<Response, NetError> {
        let (client, request) = self.build()?;
        Ok(client.dispatch(request).await)
    }
}
