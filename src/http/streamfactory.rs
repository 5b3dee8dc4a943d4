use crate::base::neterror::NetError;
use crate::socket::connectjob::ConnectJob;
use crate::socket::tls::TlsConfig;
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use tokio::spawn;
use url::Url;

/// Wraps an HTTP/1.1 connection ready to carry one request.
/// Equivalent to net::HttpStream.
pub struct HttpStream {
    sender: http1::SendRequest<Full<Bytes>>,
}

impl HttpStream {
    pub async fn send_request(
        &mut self,
        req: Request<Full<Bytes>>,
    ) -> Result<Response<Incoming>, NetError> {
        self.sender.send_request(req).await.map_err(|e| {
            tracing::debug!(error = %e, "request failed");
            if e.is_incomplete_message() {
                NetError::EmptyResponse
            } else if e.is_parse() {
                NetError::InvalidResponse
            } else {
                NetError::ConnectionClosed
            }
        })
    }
}

/// Opens a fresh connection for every stream.
pub struct HttpStreamFactory {
    tls: TlsConfig,
}

impl Default for HttpStreamFactory {
    fn default() -> Self {
        Self::new(TlsConfig::default())
    }
}

impl HttpStreamFactory {
    pub fn new(tls: TlsConfig) -> Self {
        Self { tls }
    }

    pub async fn request_stream(&self, url: &Url) -> Result<HttpStream, NetError> {
        let socket = ConnectJob::connect(url, &self.tls).await?;
        let io = TokioIo::new(socket);

        let (sender, conn) = http1::handshake(io).await.map_err(|_| NetError::ConnectionFailed)?;

        // Drive the connection until the response body is done.
        spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!(error = %e, "connection closed with error");
            }
        });

        Ok(HttpStream { sender })
    }
}
