//! Request signature.
//!
//! ## String to sign
//!
//! ```text
//! METHOD + "&" +
//! FULL_PATH + "&" +
//! CanonicalizedParams + "&" +
//! Body + "&" +
//! Timestamp
//! ```
//!
//! - `METHOD` is the upper cased http method: `POST`.
//! - `FULL_PATH` is the api mount followed by the relative path: `/api/orders`.
//! - `CanonicalizedParams` is every param except `api_signature` and
//!   `api_timestamp`, rendered `key=value` with key and value each
//!   form-urlencoded (space as `+`, `&` as `%26`), sorted, joined with `&`.
//!   Plain names and values like `page=1` are left as they are.
//! - `Body` is the serialized json body, or nothing when the request has no body.
//! - `Timestamp` is the unix timestamp in seconds.
//!
//! The digest is the hex encoded HMAC-SHA256 of the string to sign, keyed by
//! the api secret. This format is what the server reproduces to verify the
//! request, so it must not change.

use std::collections::HashMap;
use std::fmt::Write;

use http::Method;
use log::debug;
use serde_json::Value;
use shipsign_core::hash::{digest_eq, hex_hmac_sha256};
use shipsign_core::time::now;
use shipsign_core::{Error, Result};

use crate::constants::{API_SIGNATURE, API_TIMESTAMP};

/// Request params, keyed by name.
pub type Params = HashMap<String, Value>;

/// Signature binds a request's content to an api secret and a moment in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    digest: String,
    timestamp: i64,
}

impl Signature {
    /// Compute the signature at the current time.
    pub fn compute(
        secret: &str,
        method: &Method,
        path: &str,
        params: &Params,
        body: Option<&str>,
    ) -> Result<Self> {
        Self::compute_at(secret, method, path, params, body, now().timestamp())
    }

    /// Compute the signature at the given unix timestamp.
    ///
    /// Identical inputs always produce an identical digest.
    pub fn compute_at(
        secret: &str,
        method: &Method,
        path: &str,
        params: &Params,
        body: Option<&str>,
        timestamp: i64,
    ) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::config_invalid(
                "api_secret is empty, refusing to sign with an empty key",
            ));
        }

        let string_to_sign = string_to_sign(method, path, params, body, timestamp)?;
        let digest = hex_hmac_sha256(secret.as_bytes(), string_to_sign.as_bytes());

        Ok(Self { digest, timestamp })
    }

    /// Check that this signature was made with `secret` over the given
    /// content, at this signature's own timestamp.
    pub fn verify(
        &self,
        secret: &str,
        method: &Method,
        path: &str,
        params: &Params,
        body: Option<&str>,
    ) -> Result<bool> {
        let expected = Self::compute_at(secret, method, path, params, body, self.timestamp)?;
        Ok(digest_eq(&self.digest, &expected.digest))
    }

    /// Hex encoded HMAC-SHA256 digest.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Unix timestamp in seconds the digest was computed at.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// Render the signature as its digest.
impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.digest)
    }
}

/// Construct the string to sign.
pub fn string_to_sign(
    method: &Method,
    path: &str,
    params: &Params,
    body: Option<&str>,
    timestamp: i64,
) -> Result<String> {
    let mut s = String::new();
    s.write_str(method.as_str())?;
    s.write_str("&")?;
    s.write_str(path)?;
    s.write_str("&")?;
    s.write_str(&canonicalize_params(params)?)?;
    s.write_str("&")?;
    s.write_str(body.unwrap_or_default())?;
    write!(&mut s, "&{timestamp}")?;

    debug!("string to sign: {}", &s);
    Ok(s)
}

/// Sorted, form-urlencoded `key=value` pairs joined by `&`, without the
/// signature params.
fn canonicalize_params(params: &Params) -> Result<String> {
    let mut pairs = params
        .iter()
        .filter(|(k, _)| !is_signature_param(k))
        .map(|(k, v)| param_value_to_string(k, v).map(|v| (encode(k), encode(&v))))
        .collect::<Result<Vec<_>>>()?;

    // Sort via encoded param name.
    pairs.sort();

    let mut s = String::with_capacity(16);
    for (idx, (k, v)) in pairs.into_iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.push_str(&k);
        s.push('=');
        s.push_str(&v);
    }

    Ok(s)
}

/// Render a param value the way it appears in the query string.
///
/// Only scalars can be signed: null, arrays and objects have no single
/// query representation.
pub(crate) fn param_value_to_string(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(v) => Ok(v.clone()),
        Value::Number(v) => Ok(v.to_string()),
        Value::Bool(v) => Ok(v.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => Err(Error::request_invalid(format!(
            "param '{key}' has unsupported value {value}, only strings, numbers and bools can be signed"
        ))),
    }
}

/// Escape `&`, `=` and friends so every canonical pair splits back into
/// exactly one key and one value.
fn encode(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

fn is_signature_param(key: &str) -> bool {
    key == API_SIGNATURE || key == API_TIMESTAMP
}
