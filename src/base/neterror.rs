use thiserror::Error;

/// Network error codes, numbered after Chromium's `net_error_list.h`.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum NetError {
    // Connection Errors
    #[error("Connection closed (TCP FIN)")]
    ConnectionClosed,
    #[error("Connection reset (TCP RST)")]
    ConnectionReset,
    #[error("Connection refused")]
    ConnectionRefused,
    #[error("Connection aborted")]
    ConnectionAborted,
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("SSL protocol error")]
    SslProtocolError,
    #[error("Address unreachable")]
    AddressUnreachable,
    #[error("Connection timed out")]
    ConnectionTimedOut,

    // HTTP Errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Unknown URL scheme")]
    UnknownUrlScheme,
    #[error("Invalid redirect")]
    InvalidRedirect,
    #[error("Invalid response")]
    InvalidResponse,
    #[error("Empty response")]
    EmptyResponse,

    // Edge case errors (custom codes starting at -900)
    #[error("Cookie prefix validation failed")]
    CookieInvalidPrefix,
    #[error("Cookie domain is a public suffix")]
    CookiePublicSuffix,
    #[error("Cookie line could not be parsed")]
    CookieInvalidData,
    #[error("Response body unavailable")]
    HttpBodyError,
    #[error("Response body is not valid UTF-8")]
    InvalidUtf8,
    #[error("Response body is not valid JSON")]
    JsonParseError,
    #[error("Invalid client configuration")]
    InvalidConfig,
    #[error("Invalid request header")]
    InvalidHeader,

    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::ConnectionClosed => -100,
            NetError::ConnectionReset => -101,
            NetError::ConnectionRefused => -102,
            NetError::ConnectionAborted => -103,
            NetError::ConnectionFailed => -104,
            NetError::NameNotResolved => -105,
            NetError::SslProtocolError => -107,
            NetError::AddressUnreachable => -109,
            NetError::ConnectionTimedOut => -118,

            NetError::InvalidUrl => -300,
            NetError::UnknownUrlScheme => -302,
            NetError::InvalidRedirect => -303,
            NetError::InvalidResponse => -320,
            NetError::EmptyResponse => -324,

            NetError::CookieInvalidPrefix => -903,
            NetError::CookiePublicSuffix => -904,
            NetError::HttpBodyError => -905,
            NetError::InvalidUtf8 => -906,
            NetError::JsonParseError => -907,
            NetError::InvalidConfig => -908,
            NetError::CookieInvalidData => -909,
            NetError::InvalidHeader => -910,
            NetError::Unknown(code) => *code,
        }
    }

    /// True for failures raised below HTTP, before any status line was read.
    pub fn is_connection_error(&self) -> bool {
        (-199..=-100).contains(&self.as_i32())
    }
}

impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -100 => NetError::ConnectionClosed,
            -101 => NetError::ConnectionReset,
            -102 => NetError::ConnectionRefused,
            -103 => NetError::ConnectionAborted,
            -104 => NetError::ConnectionFailed,
            -105 => NetError::NameNotResolved,
            -107 => NetError::SslProtocolError,
            -109 => NetError::AddressUnreachable,
            -118 => NetError::ConnectionTimedOut,

            -300 => NetError::InvalidUrl,
            -302 => NetError::UnknownUrlScheme,
            -303 => NetError::InvalidRedirect,
            -320 => NetError::InvalidResponse,
            -324 => NetError::EmptyResponse,

            -903 => NetError::CookieInvalidPrefix,
            -904 => NetError::CookiePublicSuffix,
            -905 => NetError::HttpBodyError,
            -906 => NetError::InvalidUtf8,
            -907 => NetError::JsonParseError,
            -908 => NetError::InvalidConfig,
            -909 => NetError::CookieInvalidData,
            -910 => NetError::InvalidHeader,
            _ => NetError::Unknown(code),
        }
    }
}

impl From<url::ParseError> for NetError {
    fn from(_: url::ParseError) -> Self {
        NetError::InvalidUrl
    }
}

impl From<std::io::Error> for NetError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match err.kind() {
            ErrorKind::ConnectionRefused => NetError::ConnectionRefused,
            ErrorKind::ConnectionReset => NetError::ConnectionReset,
            ErrorKind::ConnectionAborted => NetError::ConnectionAborted,
            ErrorKind::TimedOut => NetError::ConnectionTimedOut,
            ErrorKind::UnexpectedEof => NetError::EmptyResponse,
            _ => NetError::ConnectionFailed,
        }
    }
}
