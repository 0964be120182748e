use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderValue, Method, Uri};
use log::debug;
use serde::Serialize;
use serde_json::Value;
use shipsign_core::time::{now, DateTime};
use shipsign_core::{Error, Result};

use crate::constants::{API_KEY, API_SIGNATURE, API_TIMESTAMP};
use crate::signature::param_value_to_string;
use crate::{Client, Credential, Params, Signature};

/// SignedRequest is a single api call that signs itself before it is sent.
///
/// A request starts unsigned. [`sign`](Self::sign) computes a [`Signature`]
/// and adds `api_signature` and `api_timestamp` to the params; [`send`](Self::send)
/// signs and hands the request to the transport configured in the client's
/// [`Context`](shipsign_core::Context).
///
/// Changing the content of a signed request (params or body) moves it back
/// to unsigned.
///
/// One instance serves one in-flight call. `sign` and `send` take `&mut self`,
/// share it across tasks only behind your own lock.
///
/// ```no_run
/// use serde_json::json;
/// use shipsign::{Client, Config};
/// use shipsign_core::Context;
/// use shipsign_transport_reqwest::ReqwestTransport;
///
/// # async fn example() -> shipsign_core::Result<()> {
/// let ctx = Context::new().with_transport(ReqwestTransport::default());
/// let client = Client::new(ctx, Config::new().with_api_key("key").with_api_secret("secret"));
///
/// let mut req = client
///     .request("post", "/orders")?
///     .with_param("page", 1)
///     .with_payload(Some(&json!({"order_number": "1234"})))?;
/// let resp = req.send().await?;
/// println!("{}", String::from_utf8_lossy(resp.body()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SignedRequest {
    client: Client,
    method: Method,
    path: String,
    params: Params,
    body: Option<String>,
    time: Option<DateTime>,
    state: State,
}

#[derive(Debug, Clone)]
enum State {
    Unsigned,
    Signed { signature: Signature, api_key: String },
}

impl SignedRequest {
    /// Create a new unsigned request.
    ///
    /// `method` is case-insensitive. `path` is relative to the api mount, a
    /// missing leading `/` is added.
    pub fn new(client: &Client, method: &str, path: &str) -> Result<Self> {
        let method = method.trim();
        if method.is_empty() {
            return Err(Error::request_invalid("http method must not be empty"));
        }
        let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())?;

        let path = path.trim();
        if path.is_empty() {
            return Err(Error::request_invalid("path must not be empty"));
        }
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Ok(Self {
            client: client.clone(),
            method,
            path,
            params: Params::new(),
            body: None,
            time: None,
            state: State::Unsigned,
        })
    }

    /// Replace all params.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self.reset();
        self
    }

    /// Set a single param.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self.reset();
        self
    }

    /// Set the payload, serialized as json.
    ///
    /// GET requests never carry a body: the payload is dropped for them.
    /// A payload that serializes to `null` is treated as no payload.
    pub fn with_payload<T: Serialize + ?Sized>(self, payload: Option<&T>) -> Result<Self> {
        let body = payload
            .map(|v| {
                serde_json::to_string(v).map_err(|e| {
                    Error::request_invalid("failed to serialize payload as json").with_source(e)
                })
            })
            .transpose()?
            .filter(|v| v != "null");

        Ok(self.with_body(body))
    }

    /// Set the already serialized body.
    ///
    /// Same rules as [`with_payload`](Self::with_payload): ignored for GET.
    /// An empty body is the same as no body.
    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = if self.method == Method::GET {
            None
        } else {
            body.filter(|v| !v.is_empty())
        };
        self.reset();
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Http method, upper cased.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path relative to the api mount.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path including the api mount, e.g. `/api/orders`. This is the path that gets signed.
    pub fn full_path(&self) -> String {
        format!("{}{}", self.client.config().api_mount(), self.path)
    }

    /// Params, including `api_signature` and `api_timestamp` once signed.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Serialized json body, `None` for GET and for requests without payload.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Resolve the credential from the client's provider.
    ///
    /// Not cached: every call asks the provider again.
    pub async fn credentials(&self) -> Result<Credential> {
        self.client.credential().await
    }

    /// Check if the request has been signed.
    pub fn is_signed(&self) -> bool {
        matches!(self.state, State::Signed { .. })
    }

    /// Get the signature computed by the last [`sign`](Self::sign).
    ///
    /// Returns an error if the request has not been signed yet.
    pub fn signature(&self) -> Result<&Signature> {
        match &self.state {
            State::Signed { signature, .. } => Ok(signature),
            State::Unsigned => Err(Error::request_invalid(
                "request has not been signed yet",
            )),
        }
    }

    /// Sign the request.
    ///
    /// Inserts `api_signature` and `api_timestamp` into the params. Signing
    /// again overwrites both with values for the current time.
    pub async fn sign(&mut self) -> Result<&Signature> {
        let cred = self.credentials().await?;
        let timestamp = self.time.unwrap_or_else(now).timestamp();

        let signature = Signature::compute_at(
            &cred.api_secret,
            &self.method,
            &self.full_path(),
            &self.params,
            self.body(),
            timestamp,
        )?;

        self.params.insert(
            API_SIGNATURE.to_string(),
            Value::String(signature.digest().to_string()),
        );
        self.params
            .insert(API_TIMESTAMP.to_string(), Value::from(signature.timestamp()));
        self.state = State::Signed {
            signature,
            api_key: cred.api_key,
        };

        self.signature()
    }

    /// Sign the request and dispatch it through the client's transport.
    ///
    /// The transport's response or error is returned untouched.
    pub async fn send(&mut self) -> Result<http::Response<Bytes>> {
        self.sign().await?;

        let req = self.to_http_request()?;
        debug!("sending signed request: {} {}", req.method(), req.uri().path());

        self.client.context().dispatch(req).await
    }

    /// Build the http request that will be handed to the transport.
    ///
    /// The url is `{base_url}{api_mount}{path}?{query}` where the query holds
    /// the signed params and `api_key`. Fails if the request is not signed.
    pub fn to_http_request(&self) -> Result<http::Request<Bytes>> {
        let State::Signed { api_key, .. } = &self.state else {
            return Err(Error::request_invalid(
                "request must be signed before it is built",
            ));
        };

        let mut pairs = self
            .params
            .iter()
            .map(|(k, v)| param_value_to_string(k, v).map(|v| (k.as_str(), v)))
            .collect::<Result<Vec<_>>>()?;
        pairs.push((API_KEY, api_key.clone()));
        pairs.sort();

        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        let url = format!(
            "{}{}?{}",
            self.client.config().base_url(),
            self.full_path(),
            query
        );
        let uri = Uri::try_from(url.as_str()).map_err(|e| {
            Error::request_invalid(format!("failed to build request url from {url}"))
                .with_source(e)
        })?;

        let mut builder = http::Request::builder()
            .method(self.method.clone())
            .uri(uri)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        let body = match &self.body {
            Some(body) => {
                builder = builder.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Bytes::from(body.clone())
            }
            None => Bytes::new(),
        };

        Ok(builder.body(body)?)
    }

    fn reset(&mut self) {
        if self.is_signed() {
            self.params.remove(API_SIGNATURE);
            self.params.remove(API_TIMESTAMP);
            self.state = State::Unsigned;
        }
    }
}
