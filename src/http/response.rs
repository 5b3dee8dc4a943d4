//! HTTP Response with its redirect history.

use crate::base::neterror::NetError;
use crate::http::rawresult::RawResult;
use crate::http::request::Request;
use crate::http::setcookie::split_set_cookie;
use bytes::Bytes;
use http::header::{HeaderValue, LOCATION, SET_COOKIE};
use http::HeaderMap;

/// Status codes the redirect engine follows. Anything else, including the
/// other 3xx codes, ends a chain.
pub const REDIRECT_CODES: [u16; 4] = [301, 302, 303, 307];

/// A fully built response.
///
/// Each hop of a redirect chain owns the response of the hop before it,
/// reachable through [`Response::previous`]. Cloning and dropping walk
/// the chain iteratively, so chain length is not bounded by stack depth.
pub struct Response {
    status: u16,
    reason: Option<String>,
    protocol: Option<String>,
    headers: HeaderMap,
    body: Option<Bytes>,
    request: Request,
    previous: Option<Box<Response>>,
    error: Option<NetError>,
}

impl Response {
    /// Build a response out of a transport's raw output.
    ///
    /// Never fails: a zero or bogus status is carried through as-is.
    pub fn build(request: Request, raw: RawResult, previous: Option<Response>) -> Self {
        let RawResult {
            status,
            reason,
            http_version,
            url: _,
            headers: raw_headers,
            body,
            error,
        } = raw;

        let mut headers = HeaderMap::with_capacity(raw_headers.len());
        for (name, value) in raw_headers.iter() {
            if value.is_empty() {
                continue;
            }
            if *name == SET_COOKIE {
                append_set_cookie(&mut headers, value);
            } else {
                headers.append(name.clone(), value.clone());
            }
        }

        Self {
            status,
            reason,
            protocol: http_version.map(|v| format!("HTTP/{v}")),
            headers,
            body,
            request,
            previous: previous.map(Box::new),
            error,
        }
    }

    /// Get the status code. Zero means the transport failed.
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Protocol string such as `HTTP/1.1`, when the transport reported one.
    pub fn protocol(&self) -> Option<&str> {
        self.protocol.as_deref()
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// `Location` of this response, if any.
    pub fn location(&self) -> Option<&str> {
        self.header(LOCATION)
    }

    /// Individual `Set-Cookie` values, in arrival order.
    pub fn set_cookies(&self) -> impl Iterator<Item = &str> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Body as UTF-8 text.
    pub fn text(&self) -> Result<&str, NetError> {
        let body = self.body.as_ref().ok_or(NetError::HttpBodyError)?;
        std::str::from_utf8(body).map_err(|_| NetError::InvalidUtf8)
    }

    /// Body deserialized from JSON.
    #[cfg(feature = "json")]
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, NetError> {
        let body = self.body.as_ref().ok_or(NetError::HttpBodyError)?;
        serde_json::from_slice(body).map_err(|_| NetError::JsonParseError)
    }

    /// The request that produced this response, as it was sent.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Response of the preceding hop in the same redirect chain.
    pub fn previous(&self) -> Option<&Response> {
        self.previous.as_deref()
    }

    /// Transport error, for status-0 responses.
    pub fn error(&self) -> Option<&NetError> {
        self.error.as_ref()
    }

    pub fn is_redirect(&self) -> bool {
        REDIRECT_CODES.contains(&self.status)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// This response followed by every earlier hop, newest first.
    pub fn chain(&self) -> impl Iterator<Item = &Response> {
        std::iter::successors(Some(self), |r| r.previous())
    }

    /// Number of redirects followed to reach this response.
    pub fn redirect_count(&self) -> usize {
        self.chain().count() - 1
    }
}

impl Response {
    /// Copy of this hop alone, without its history.
    fn clone_hop(&self) -> Self {
        Self {
            status: self.status,
            reason: self.reason.clone(),
            protocol: self.protocol.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            request: self.request.clone(),
            previous: None,
            error: self.error,
        }
    }
}

impl Clone for Response {
    fn clone(&self) -> Self {
        let older: Vec<&Response> = self.chain().skip(1).collect();
        let mut previous: Option<Box<Response>> = None;
        for hop in older.into_iter().rev() {
            let mut copy = hop.clone_hop();
            copy.previous = previous;
            previous = Some(Box::new(copy));
        }
        let mut head = self.clone_hop();
        head.previous = previous;
        head
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .field("protocol", &self.protocol)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .field("request", &self.request)
            .field("error", &self.error)
            .field("redirect_count", &self.redirect_count())
            .finish()
    }
}

impl Drop for Response {
    fn drop(&mut self) {
        let mut next = self.previous.take();
        while let Some(mut hop) = next {
            next = hop.previous.take();
        }
    }
}

fn append_set_cookie(headers: &mut HeaderMap, value: &HeaderValue) {
    let Ok(joined) = value.to_str() else {
        // Opaque bytes cannot be split safely.
        headers.append(SET_COOKIE, value.clone());
        return;
    };
    for cookie in split_set_cookie(joined) {
        if let Ok(single) = HeaderValue::from_str(cookie) {
            headers.append(SET_COOKIE, single);
        }
    }
}
