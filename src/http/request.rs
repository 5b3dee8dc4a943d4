//! Outgoing request value.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, COOKIE, USER_AGENT};
use http::{HeaderMap, Method};
use url::Url;

use crate::base::neterror::NetError;

/// A single HTTP request as handed to the transport.
///
/// A redirect never edits a request in place; the engine builds a fresh
/// one through [`Request::for_redirect`].
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Parse `url` and build a request with no headers or body.
    pub fn parse(method: Method, url: &str) -> Result<Self, NetError> {
        Ok(Self::new(method, Url::parse(url)?))
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn head(url: Url) -> Self {
        Self::new(Method::HEAD, url)
    }

    /// Build the follow-up request for a redirect out of `self`.
    ///
    /// HEAD stays HEAD; every other method becomes GET. Headers and body
    /// are not carried over.
    pub fn for_redirect(&self, location: Url) -> Self {
        if self.method == Method::HEAD {
            Self::head(location)
        } else {
            Self::get(location)
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Value of `name` as a string, if present and valid UTF-8.
    pub fn header(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The `Cookie` header the cookie store attached, if any.
    pub fn cookie_header(&self) -> Option<&str> {
        self.header(COOKIE)
    }

    /// Replace any existing `User-Agent`.
    pub fn set_user_agent(&mut self, agent: &str) -> Result<(), NetError> {
        let value = HeaderValue::from_str(agent).map_err(|_| NetError::InvalidConfig)?;
        self.headers.insert(USER_AGENT, value);
        Ok(())
    }

    pub(crate) fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }
}
