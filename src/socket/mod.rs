//! Sockets for the default transport: DNS, TCP and TLS connect.

pub mod client;
pub mod connectjob;
pub mod tls;
