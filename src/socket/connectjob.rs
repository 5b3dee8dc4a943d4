use crate::base::neterror::NetError;
use crate::socket::client::SocketType;
use crate::socket::tls::TlsConfig;
use tokio::net::TcpStream;
use url::Url;

/// Manages the connection process: DNS -> TCP -> SSL.
/// Roughly equivalent to net::ConnectJob.
pub struct ConnectJob;

impl ConnectJob {
    pub async fn connect(url: &Url, tls: &TlsConfig) -> Result<SocketType, NetError> {
        let secure = match url.scheme() {
            "http" => false,
            "https" => true,
            _ => return Err(NetError::UnknownUrlScheme),
        };

        let host = url.host_str().ok_or(NetError::InvalidUrl)?;
        let port = url.port_or_known_default().ok_or(NetError::InvalidUrl)?;

        // 1. DNS Resolution
        let bare_host = host.trim_start_matches('[').trim_end_matches(']');
        let addrs = tokio::net::lookup_host((bare_host, port)).await.map_err(|e| {
            tracing::debug!(host = %host, error = %e, "DNS resolution failed");
            NetError::NameNotResolved
        })?;

        // 2. TCP Connect, first reachable address wins
        let mut last_error = NetError::AddressUnreachable;
        let mut stream = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "TCP connect failed");
                    last_error = NetError::from(e);
                }
            }
        }
        let stream = stream.ok_or(last_error)?;
        let _ = stream.set_nodelay(true);

        if !secure {
            return Ok(SocketType::Tcp(stream));
        }

        // 3. SSL Handshake
        let mut config = tls
            .connector()?
            .configure()
            .map_err(|_| NetError::SslProtocolError)?;
        if !TlsConfig::should_set_sni(host) {
            config.set_use_server_name_indication(false);
            config.set_verify_hostname(false);
        }

        let tls_stream = tokio_boring::connect(config, host, stream).await.map_err(|e| {
            tracing::debug!(host = %host, error = ?e, "SSL handshake failed");
            NetError::SslProtocolError
        })?;

        Ok(SocketType::Ssl(tls_stream))
    }
}
