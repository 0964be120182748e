mod send;
mod standard;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use shipsign::{Client, Config, StaticCredentialProvider};
use shipsign_core::{Context, Result, Transport};

pub const API_KEY: &str = "12345678ASGHSGHJ";
pub const API_SECRET: &str = "12345678ASGHSGHJ123213321312";
pub const TIMESTAMP: i64 = 1660582212;

/// What the transport received.
#[derive(Debug, Clone)]
pub struct Dispatched {
    pub method: http::Method,
    pub uri: http::Uri,
    pub body: Bytes,
}

impl Dispatched {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        form_urlencoded::parse(self.uri.query().unwrap_or_default().as_bytes())
            .into_owned()
            .collect()
    }

    pub fn query_values(&self, key: &str) -> Vec<String> {
        self.query_pairs()
            .into_iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v)
            .collect()
    }
}

/// Transport double that records every request and answers `connected!`.
#[derive(Debug, Default)]
pub struct MockTransport {
    dispatched: Mutex<Vec<Dispatched>>,
}

impl MockTransport {
    pub fn dispatched(&self) -> Vec<Dispatched> {
        self.dispatched.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn dispatch(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        self.dispatched.lock().unwrap().push(Dispatched {
            method: parts.method,
            uri: parts.uri,
            body,
        });
        Ok(http::Response::new(Bytes::from_static(b"connected!")))
    }
}

pub fn init_client() -> (Client, Arc<MockTransport>) {
    let _ = env_logger::builder().is_test(true).try_init();

    let transport = Arc::new(MockTransport::default());
    let ctx = Context::new().with_shared_transport(transport.clone());
    let client = Client::new(ctx, Config::new().with_base_url("https://www.test.com"))
        .with_credential_provider(StaticCredentialProvider::new(API_KEY, API_SECRET));

    (client, transport)
}
