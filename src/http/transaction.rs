//! Default [`Transport`]: one HTTP/1.1 exchange per attempt over hyper.

use crate::base::neterror::NetError;
use crate::http::rawresult::RawResult;
use crate::http::streamfactory::{HttpStream, HttpStreamFactory};
use crate::http::transport::{Sending, Transport, TransportOptions};
use bytes::Bytes;
use futures::FutureExt;
use http::header::{HeaderValue, HOST};
use http::{Method, Response, Version};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use std::sync::Arc;
use url::{Position, Url};

/// Internal state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    CreateStream,
    SendRequest,
    ReadBody,
    Done,
}

/// A single request/response exchange.
pub struct HttpNetworkTransaction {
    factory: Arc<HttpStreamFactory>,
    method: Method,
    url: Url,
    options: TransportOptions,
    state: State,
    stream: Option<HttpStream>,
    response: Option<Response<Incoming>>,
    result: Option<RawResult>,
}

impl HttpNetworkTransaction {
    pub fn new(
        factory: Arc<HttpStreamFactory>,
        method: Method,
        url: Url,
        options: TransportOptions,
    ) -> Self {
        Self {
            factory,
            method,
            url,
            options,
            state: State::CreateStream,
            stream: None,
            response: None,
            result: None,
        }
    }

    /// Run the exchange under the configured timeout. Always yields a
    /// result; failures come back with status 0.
    pub async fn run(mut self) -> RawResult {
        let timeout = self.options.timeout;
        let outcome = tokio::time::timeout(timeout, self.do_loop()).await;
        match outcome {
            Ok(Ok(())) => self
                .result
                .take()
                .unwrap_or_else(|| RawResult::failed(NetError::EmptyResponse)),
            Ok(Err(e)) => RawResult::failed(e).with_url(self.url.as_str()),
            Err(_) => {
                tracing::debug!(url = %self.url, ?timeout, "transport attempt timed out");
                RawResult::failed(NetError::ConnectionTimedOut).with_url(self.url.as_str())
            }
        }
    }

    async fn do_loop(&mut self) -> Result<(), NetError> {
        loop {
            match self.state {
                State::CreateStream => {
                    self.stream = Some(self.factory.request_stream(&self.url).await?);
                    self.state = State::SendRequest;
                }
                State::SendRequest => {
                    let req = self.build_request()?;
                    let stream = self.stream.as_mut().ok_or(NetError::ConnectionClosed)?;
                    self.response = Some(stream.send_request(req).await?);
                    self.state = State::ReadBody;
                }
                State::ReadBody => {
                    let resp = self.response.take().ok_or(NetError::EmptyResponse)?;
                    self.result = Some(self.read_response(resp).await?);
                    self.state = State::Done;
                }
                State::Done => return Ok(()),
            }
        }
    }

    fn build_request(&self) -> Result<http::Request<Full<Bytes>>, NetError> {
        // Origin-form target; we never talk to proxies.
        let target = &self.url[Position::BeforePath..Position::AfterQuery];

        let mut headers = self.options.headers.clone();
        if !headers.contains_key(HOST) {
            let host = self.url.host_str().ok_or(NetError::InvalidUrl)?;
            let host = match self.url.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            };
            let value = HeaderValue::from_str(&host).map_err(|_| NetError::InvalidUrl)?;
            headers.insert(HOST, value);
        }

        let body = self.options.body.clone().unwrap_or_default();
        let mut req = http::Request::builder()
            .method(self.method.clone())
            .uri(target)
            .version(Version::HTTP_11)
            .body(Full::new(body))
            .map_err(|_| NetError::InvalidUrl)?;
        *req.headers_mut() = headers;
        Ok(req)
    }

    async fn read_response(&self, resp: Response<Incoming>) -> Result<RawResult, NetError> {
        let (parts, body) = resp.into_parts();

        let reason = parts
            .extensions
            .get::<hyper::ext::ReasonPhrase>()
            .and_then(|r| std::str::from_utf8(r.as_bytes()).ok())
            .or_else(|| parts.status.canonical_reason())
            .unwrap_or("")
            .to_string();

        let body = body
            .collect()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "reading response body failed");
                NetError::ConnectionClosed
            })?
            .to_bytes();

        Ok(RawResult {
            status: parts.status.as_u16(),
            reason: Some(reason),
            http_version: version_string(parts.version).map(str::to_string),
            url: Some(self.url.to_string()),
            headers: parts.headers,
            body: Some(body),
            error: None,
        })
    }
}

fn version_string(version: Version) -> Option<&'static str> {
    match version {
        Version::HTTP_09 => Some("0.9"),
        Version::HTTP_10 => Some("1.0"),
        Version::HTTP_11 => Some("1.1"),
        Version::HTTP_2 => Some("2"),
        Version::HTTP_3 => Some("3"),
        _ => None,
    }
}

/// The transport the client uses unless told otherwise.
#[derive(Clone, Default)]
pub struct HttpTransport {
    factory: Arc<HttpStreamFactory>,
}

impl HttpTransport {
    pub fn new(factory: HttpStreamFactory) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// Identifier used to build the default `User-Agent`.
    pub fn identifier() -> &'static str {
        "hyper/1"
    }
}

impl Transport for HttpTransport {
    fn send(&self, method: Method, url: Url, options: TransportOptions) -> Sending {
        if options.recurse > 0 {
            tracing::debug!(recurse = options.recurse, "transport never follows redirects itself");
        }
        HttpNetworkTransaction::new(self.factory.clone(), method, url, options)
            .run()
            .boxed()
    }
}
