//! Shared test helpers: a scripted transport and a tiny local HTTP server.

#![allow(dead_code)]

use futures::FutureExt;
use http::{HeaderMap, Method};
use jarnet::http::transport::Sending;
use jarnet::{RawResult, Transport, TransportOptions};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

/// One call seen by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub timeout: Duration,
    pub recurse: u32,
}

impl Call {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Answers calls from a queue of scripted results and records every call.
/// Once the queue runs dry it keeps answering 404.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<RawResult>>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn new(script: impl IntoIterator<Item = RawResult>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn send(&self, method: Method, url: Url, options: TransportOptions) -> Sending {
        self.calls.lock().unwrap().push(Call {
            method,
            url,
            headers: options.headers,
            timeout: options.timeout,
            recurse: options.recurse,
        });
        let raw = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| RawResult::new(404));
        async move {
            tokio::task::yield_now().await;
            raw
        }
        .boxed()
    }
}

pub fn redirect(status: u16, location: &str) -> RawResult {
    RawResult::new(status)
        .with_version("1.1")
        .with_header("Location", location)
}

pub fn ok(body: &str) -> RawResult {
    RawResult::new(200)
        .with_reason("OK")
        .with_version("1.1")
        .with_body(body.to_string())
}

/// Read one request head (and its Content-Length body) off `socket`.
pub async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Serve each connection with `handler(request_text)`, forever.
pub async fn serve<F>(handler: F) -> String
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let handler = handler.clone();
            tokio::spawn(async move {
                let request = read_request(&mut socket).await;
                let response = handler(&request);
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    base
}
