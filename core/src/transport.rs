use crate::{Error, Result};
use bytes::Bytes;
use std::fmt::Debug;

/// Transport performs the network call for a signed request.
///
/// The request handed over is complete: method, fully-qualified url with the
/// signed query, and body. Implementations must not alter it, and whatever
/// they return (response or error) is passed to the caller untouched.
#[async_trait::async_trait]
pub trait Transport: Debug + Send + Sync + 'static {
    /// Dispatch the request and return the response.
    async fn dispatch(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// NoopTransport is a no-op implementation that always returns an error.
///
/// This is used when no transport is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTransport;

#[async_trait::async_trait]
impl Transport for NoopTransport {
    async fn dispatch(&self, _req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        Err(Error::transport(
            "request dispatch not supported: no transport configured",
        ))
    }
}
