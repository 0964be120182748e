//! Signed requests for the ShippingEasy style api.
//!
//! Every call to the api carries two extra query params: `api_timestamp`,
//! the unix time the request was signed at, and `api_signature`, a hex
//! encoded HMAC-SHA256 over the method, path, params and body keyed by the
//! account's api secret. The server recomputes the signature and rejects
//! the request on mismatch.
//!
//! ## Quick Start
//!
//! ```no_run
//! use serde_json::json;
//! use shipsign::{Client, Config};
//! use shipsign_core::{Context, OsEnv};
//! use shipsign_transport_reqwest::ReqwestTransport;
//!
//! #[tokio::main]
//! async fn main() -> shipsign_core::Result<()> {
//!     let ctx = Context::new()
//!         .with_env(OsEnv)
//!         .with_transport(ReqwestTransport::default());
//!
//!     // Picks up SHIPSIGN_API_KEY and SHIPSIGN_API_SECRET.
//!     let config = Config::new().from_env(&ctx);
//!     let client = Client::new(ctx, config);
//!
//!     let mut req = client
//!         .request("post", "/orders")?
//!         .with_payload(Some(&json!({"order_number": "1234"})))?;
//!     let resp = req.send().await?;
//!
//!     println!("{}", String::from_utf8_lossy(resp.body()));
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! ### Config
//!
//! ```no_run
//! use shipsign::Config;
//!
//! let config = Config::new()
//!     .with_api_key("your-api-key")
//!     .with_api_secret("your-api-secret");
//! ```
//!
//! ### Environment Variables
//!
//! ```bash
//! export SHIPSIGN_API_KEY=your-api-key
//! export SHIPSIGN_API_SECRET=your-api-secret
//! ```
//!
//! ### Custom Providers
//!
//! Anything implementing [`ProvideCredential`](shipsign_core::ProvideCredential)
//! can be installed with [`Client::with_credential_provider`]. It is asked on
//! every signing, so a provider backed by a secret store sees rotations
//! immediately.

mod constants;
pub use constants::{API_KEY, API_SIGNATURE, API_TIMESTAMP};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod signature;
pub use signature::{string_to_sign, Params, Signature};

mod client;
pub use client::Client;

mod request;
pub use request::SignedRequest;
