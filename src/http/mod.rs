//! HTTP layer: request and response values, the transport seam and the
//! default hyper-backed transport.

pub mod rawresult;
pub mod request;
pub mod response;
pub mod setcookie;
pub mod streamfactory;
pub mod transaction;
pub mod transport;

// Re-exports for convenience
pub use rawresult::RawResult;
pub use request::Request;
pub use response::Response;
pub use transaction::HttpTransport;
pub use transport::{Transport, TransportOptions};
