//! The transport seam.
//!
//! The client owns cookies and redirect policy; everything below that
//! (DNS, sockets, TLS, timeouts) lives behind [`Transport`].

use crate::http::rawresult::RawResult;
use bytes::Bytes;
use futures::future::BoxFuture;
use http::{HeaderMap, Method};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Per-attempt options handed to a [`Transport`].
#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub timeout: Duration,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    /// Redirects the transport may follow on its own. The client always
    /// passes 0.
    pub recurse: u32,
}

impl TransportOptions {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            headers: HeaderMap::new(),
            body: None,
            recurse: 0,
        }
    }
}

/// Alias for the `Future` returned by a transport.
pub type Sending = BoxFuture<'static, RawResult>;

/// One HTTP attempt, start to finish.
///
/// Implementations must:
/// - complete exactly once per call, asynchronously;
/// - report failures as a [`RawResult`] with status 0 rather than panicking;
/// - enforce `options.timeout`;
/// - never follow redirects when `options.recurse` is 0.
pub trait Transport: Send + Sync {
    fn send(&self, method: Method, url: Url, options: TransportOptions) -> Sending;
}

/// Blanket implementation for Arc-wrapped transports.
impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, method: Method, url: Url, options: TransportOptions) -> Sending {
        (**self).send(method, url, options)
    }
}
