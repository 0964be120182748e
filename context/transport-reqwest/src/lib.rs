// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Reqwest-based transport for shipsign.
//!
//! This crate provides `ReqwestTransport`, which implements the `Transport`
//! trait from `shipsign_core` on top of [`reqwest::Client`].
//!
//! ## Example
//!
//! ```no_run
//! use shipsign_core::Context;
//! use shipsign_transport_reqwest::ReqwestTransport;
//!
//! let ctx = Context::new().with_transport(ReqwestTransport::default());
//! ```
//!
//! Bring your own client to control timeouts, proxies or TLS:
//!
//! ```no_run
//! use std::time::Duration;
//! use shipsign_transport_reqwest::ReqwestTransport;
//!
//! let client = reqwest::Client::builder()
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//! let transport = ReqwestTransport::new(client);
//! ```
//!
//! ## Errors
//!
//! Connection failures, timeouts and non-2xx responses are all reported as
//! `ErrorKind::Transport`. The error message of a non-2xx response carries
//! the status code and the response text.

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::BodyExt;
use log::debug;
use reqwest::{Client, Request};
use shipsign_core::{Error, Result, Transport};

/// Transport backed by a [`reqwest::Client`].
#[derive(Debug, Default, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new ReqwestTransport with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn dispatch(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req).map_err(|e| {
            Error::request_invalid("failed to convert request into reqwest request")
                .with_source(e)
        })?;
        debug!("dispatching {} {}", req.method(), req.url().path());

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::transport(format!("failed to execute request: {e}")).with_source(e))?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::transport("failed to read response body").with_source(e))?;

        if !parts.status.is_success() {
            return Err(Error::transport(format!(
                "request failed with status {}: {}",
                parts.status,
                String::from_utf8_lossy(&bs)
            )));
        }

        Ok(http::Response::from_parts(parts, bs))
    }
}
