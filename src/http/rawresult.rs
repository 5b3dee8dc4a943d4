//! What a transport hands back for one attempt.

use bytes::Bytes;
use http::HeaderMap;

use crate::base::neterror::NetError;

/// Raw outcome of a single transport attempt.
///
/// `status == 0` together with `body == None` marks a transport failure;
/// `error` then says what went wrong.
#[derive(Debug, Clone, Default)]
pub struct RawResult {
    pub status: u16,
    pub reason: Option<String>,
    /// Protocol version without the `HTTP/` prefix, e.g. `"1.1"`.
    pub http_version: Option<String>,
    /// Final URL the transport talked to.
    pub url: Option<String>,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    pub error: Option<NetError>,
}

impl RawResult {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// A failed attempt: status 0, no body.
    pub fn failed(error: NetError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.http_version = Some(version.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Append a header. Invalid names or values are skipped.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            http::header::HeaderName::from_bytes(name.as_bytes()),
            http::header::HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// True when the transport never got a status line.
    pub fn is_failure(&self) -> bool {
        self.status == 0
    }
}
