//! # jarnet
//!
//! An asynchronous HTTP client that follows redirects and keeps cookies.
//!
//! One call to [`RequestBuilder::send`] drives a whole redirect chain:
//! every hop carries the cookies the jar holds for its URL, every response
//! feeds its `Set-Cookie` headers back into the jar, and the final
//! [`Response`] links back to the ones before it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jarnet::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), jarnet::NetError> {
//!     let client = Client::new();
//!     let response = client.get("https://example.com").send().await?;
//!     println!("Status: {}", response.status());
//!     for hop in response.chain() {
//!         println!("  {} {}", hop.status(), hop.request().url());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`cookies`] - Cookie jar, parsing and public suffix checks
//! - [`http`] - Request, response and the transport seam
//! - [`socket`] - TCP and TLS connection setup
//! - [`urlrequest`] - Client context and the redirect engine

pub mod base;
pub mod client;
pub mod cookies;
pub mod http;
pub mod socket;
pub mod urlrequest;

pub use base::neterror::NetError;
pub use client::{Client, ClientBuilder, RequestBuilder};
pub use cookies::{CookieMonster, CookieStore};
pub use http::{RawResult, Request, Response, Transport, TransportOptions};
pub use urlrequest::context::ClientConfig;
