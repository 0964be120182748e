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

use std::fmt::{Debug, Formatter};

use serde::Deserialize;
use shipsign_core::{utils::Redact, Context};

use crate::constants::*;

/// Config carries all the configuration needed to sign and send requests.
///
/// Build it once at startup and hand it to [`Client`](crate::Client). It is
/// never mutated by shipsign: to rotate credentials, build a new `Config`
/// (or use a credential provider that resolves them on every call).
///
/// `Config` can also be embedded in an application's own config file:
///
/// ```
/// use shipsign::Config;
///
/// let config: Config = serde_json::from_str(
///     r#"{"api_key": "key", "api_secret": "secret", "base_url": "http://localhost:3000"}"#,
/// )
/// .unwrap();
/// assert_eq!(config.base_url(), "http://localhost:3000");
/// assert_eq!(config.api_mount(), "/api");
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `api_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SHIPSIGN_API_KEY`]
    pub api_key: Option<String>,
    /// `api_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SHIPSIGN_API_SECRET`]
    pub api_secret: Option<String>,
    /// `base_url` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SHIPSIGN_BASE_URL`]
    /// - default: `https://app.shippingeasy.com`
    pub base_url: Option<String>,
    /// `api_mount` is the path prefix every relative path lives under.
    ///
    /// - this field if it's `is_some`
    /// - env value: [`SHIPSIGN_API_MOUNT`]
    /// - default: `/api`
    pub api_mount: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set api_key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set api_secret
    pub fn with_api_secret(mut self, api_secret: impl Into<String>) -> Self {
        self.api_secret = Some(api_secret.into());
        self
    }

    /// Set base_url
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set api_mount
    pub fn with_api_mount(mut self, api_mount: impl Into<String>) -> Self {
        self.api_mount = Some(api_mount.into());
        self
    }

    /// Load config from env.
    ///
    /// Fields already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(SHIPSIGN_API_KEY) {
            self.api_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SHIPSIGN_API_SECRET) {
            self.api_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SHIPSIGN_BASE_URL) {
            self.base_url.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(SHIPSIGN_API_MOUNT) {
            self.api_mount.get_or_insert(v);
        }

        self
    }

    /// Base url without trailing slash, e.g. `https://app.shippingeasy.com`.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    /// Api mount point with a leading slash and without a trailing one,
    /// e.g. `/api`. An empty mount stays empty.
    pub fn api_mount(&self) -> String {
        let mount = self
            .api_mount
            .as_deref()
            .unwrap_or(DEFAULT_API_MOUNT)
            .trim()
            .trim_matches('/');

        if mount.is_empty() {
            String::new()
        } else {
            format!("/{mount}")
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(Redact::from))
            .field("api_secret", &self.api_secret.as_ref().map(Redact::from))
            .field("base_url", &self.base_url)
            .field("api_mount", &self.api_mount)
            .finish()
    }
}
